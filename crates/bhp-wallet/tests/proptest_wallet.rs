use proptest::prelude::*;

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_wallet::{AssetBalance, DefaultStrategy, InputStrategy, Utxo, GOVERNING_TOKEN_ID};

prop_compose! {
    fn arb_pool()(raws in prop::collection::vec(1i64..1_000_000_000, 1..16)) -> Vec<Utxo> {
        raws.iter()
            .enumerate()
            .map(|(i, raw)| {
                let mut tx_id = [0u8; 32];
                tx_id[0] = i as u8;
                Utxo::new(GOVERNING_TOKEN_ID, Hash256::new(tx_id), 0, Fixed8::from_raw(*raw))
            })
            .collect()
    }
}

fn pool_total(pool: &[Utxo]) -> i64 {
    pool.iter().map(|u| u.value.raw()).sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn selection_is_a_minimal_covering_prefix(pool in arb_pool(), pick in 0.0f64..=1.0) {
        let total = pool_total(&pool);
        let amount = Fixed8::from_raw((total as f64 * pick) as i64);

        let selected = DefaultStrategy.calculate_inputs(&pool, amount).unwrap();
        prop_assert_eq!(&selected[..], &pool[..selected.len()]);

        let covered = pool_total(&selected);
        prop_assert!(covered >= amount.raw());
        if let Some(last) = selected.last() {
            // Without its last element the prefix would not cover.
            prop_assert!(covered - last.value.raw() < amount.raw());
        }
    }

    #[test]
    fn selection_fails_when_the_pool_is_short(pool in arb_pool(), shortfall in 1i64..1_000) {
        let amount = Fixed8::from_raw(pool_total(&pool) + shortfall);
        prop_assert!(DefaultStrategy.calculate_inputs(&pool, amount).is_err());
    }

    #[test]
    fn balance_amount_matches_utxo_sum(pool in arb_pool()) {
        let total = pool_total(&pool);
        let balance = AssetBalance::from_utxos(pool);
        prop_assert_eq!(balance.amount(), Fixed8::from_raw(total));
    }
}
