//! Unspent transaction outputs and per-asset balances.

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_transaction::TransactionInput;

/// An unspent output owned by an account.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Utxo {
    /// The asset the output holds.
    pub asset_id: Hash256,
    /// Hash of the transaction that created the output.
    pub tx_id: Hash256,
    /// Index of the output within that transaction.
    pub index: u16,
    /// Amount held by the output.
    pub value: Fixed8,
}

impl Utxo {
    /// Create a UTXO.
    ///
    /// # Arguments
    /// * `asset_id` - The asset the output holds.
    /// * `tx_id` - The creating transaction's hash.
    /// * `index` - The output index.
    /// * `value` - The amount.
    pub fn new(asset_id: Hash256, tx_id: Hash256, index: u16, value: Fixed8) -> Self {
        Utxo { asset_id, tx_id, index, value }
    }

    /// Convert the UTXO into the transaction input that spends it.
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput::new(self.tx_id, self.index)
    }
}

/// The UTXOs an account holds for a single asset, with their summed
/// amount.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct AssetBalance {
    utxos: Vec<Utxo>,
    amount: Fixed8,
}

impl AssetBalance {
    /// Build a balance from a set of UTXOs, summing their amounts.
    ///
    /// # Arguments
    /// * `utxos` - The unspent outputs, all of the same asset.
    pub fn from_utxos(utxos: Vec<Utxo>) -> Self {
        let amount = sum_values(&utxos);
        AssetBalance { utxos, amount }
    }

    /// Return the unspent outputs.
    pub fn utxos(&self) -> &[Utxo] {
        &self.utxos
    }

    /// Return the summed amount.
    pub fn amount(&self) -> Fixed8 {
        self.amount
    }
}

/// Sum the values of a set of UTXOs, saturating on overflow.
pub(crate) fn sum_values(utxos: &[Utxo]) -> Fixed8 {
    utxos.iter().fold(Fixed8::ZERO, |acc, u| {
        acc.checked_add(u.value).unwrap_or(Fixed8::from_raw(i64::MAX))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use crate::assets::GOVERNING_TOKEN_ID;

    const TX_ID: &str = "4ba4d1f1acf7c6648ced8824aa2cd3e8f836f59e7071340e0c440d099a508cff";

    #[test]
    fn test_to_input() {
        let utxo = Utxo::new(
            GOVERNING_TOKEN_ID,
            Hash256::from_hex(TX_ID).unwrap(),
            3,
            Fixed8::from_str("10").unwrap(),
        );
        let input = utxo.to_input();
        assert_eq!(input.prev_hash.to_string(), TX_ID);
        assert_eq!(input.prev_index, 3);
    }

    #[test]
    fn test_balance_sums_utxos() {
        let tx_id = Hash256::from_hex(TX_ID).unwrap();
        let balance = AssetBalance::from_utxos(vec![
            Utxo::new(GOVERNING_TOKEN_ID, tx_id, 0, Fixed8::from_str("10").unwrap()),
            Utxo::new(GOVERNING_TOKEN_ID, tx_id, 1, Fixed8::from_str("2.5").unwrap()),
        ]);
        assert_eq!(balance.amount(), Fixed8::from_str("12.5").unwrap());
        assert_eq!(balance.utxos().len(), 2);

        assert_eq!(AssetBalance::from_utxos(Vec::new()).amount(), Fixed8::ZERO);
    }
}
