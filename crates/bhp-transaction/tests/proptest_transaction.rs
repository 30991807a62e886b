use proptest::prelude::*;

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_primitives::io::Serializable;
use bhp_script::ScriptHash;
use bhp_transaction::fees::{self, FEE_PER_EXTRA_BYTE, MAX_FREE_TRANSACTION_SIZE, PRIORITY_FEE};
use bhp_transaction::{
    ContractTransactionBuilder, InvocationTransactionBuilder, RawTransaction,
    TransactionAttribute, TransactionInput, TransactionOutput,
};

prop_compose! {
    fn arb_input()(hash in prop::array::uniform32(any::<u8>()), index in any::<u16>())
        -> TransactionInput
    {
        TransactionInput::new(Hash256::new(hash), index)
    }
}

prop_compose! {
    fn arb_output()(
        asset in prop::array::uniform32(any::<u8>()),
        value in any::<i64>(),
        script in prop::collection::vec(any::<u8>(), 1..64)
    ) -> TransactionOutput {
        TransactionOutput::new(
            Hash256::new(asset),
            Fixed8::from_raw(value),
            ScriptHash::from_script(&script),
        )
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn contract_transaction_roundtrip(
        inputs in prop::collection::vec(arb_input(), 1..8),
        outputs in prop::collection::vec(arb_output(), 0..8),
        attr_hash in prop::collection::vec(any::<u8>(), 1..64)
    ) {
        let tx = ContractTransactionBuilder::new()
            .attribute(TransactionAttribute::script(&ScriptHash::from_script(&attr_hash)))
            .inputs(inputs)
            .outputs(outputs)
            .build()
            .unwrap();

        let bytes = tx.to_bytes();
        let back = RawTransaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&back, &tx);
        prop_assert_eq!(back.tx_id(), tx.tx_id());
    }

    #[test]
    fn invocation_transaction_roundtrip(
        script in prop::collection::vec(any::<u8>(), 1..256),
        gas in any::<i64>(),
        remark in prop::collection::vec(any::<u8>(), 0..32)
    ) {
        let tx = InvocationTransactionBuilder::new()
            .script(script)
            .gas(Fixed8::from_raw(gas))
            .attribute(TransactionAttribute::remark(remark))
            .build()
            .unwrap();

        let bytes = tx.to_unsigned_bytes();
        let back = RawTransaction::from_bytes(&bytes).unwrap();
        prop_assert_eq!(&back, &tx);
    }

    #[test]
    fn unsigned_bytes_prefix_signed_bytes(
        inputs in prop::collection::vec(arb_input(), 1..4)
    ) {
        let tx = ContractTransactionBuilder::new()
            .inputs(inputs)
            .build()
            .unwrap();
        let unsigned = tx.to_unsigned_bytes();
        let signed = tx.to_bytes();
        prop_assert_eq!(&signed[..unsigned.len()], &unsigned[..]);
    }

    #[test]
    fn network_fee_is_zero_up_to_the_threshold(size in 0usize..=MAX_FREE_TRANSACTION_SIZE) {
        prop_assert_eq!(fees::necessary_network_fee(size), Fixed8::ZERO);
    }

    #[test]
    fn network_fee_grows_linearly_past_the_threshold(extra in 1usize..1_000_000) {
        let fee = fees::necessary_network_fee(MAX_FREE_TRANSACTION_SIZE + extra);
        let expected = Fixed8::from_raw(extra as i64 * FEE_PER_EXTRA_BYTE + PRIORITY_FEE);
        prop_assert_eq!(fee, expected);
    }
}
