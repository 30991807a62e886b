//! Input selection strategies.
//!
//! A strategy picks the UTXOs that cover a required amount. Selection is
//! deterministic for a fixed pool so that transaction bytes are
//! reproducible.

use bhp_primitives::fixed8::Fixed8;

use crate::utxo::{sum_values, Utxo};
use crate::WalletError;

/// Picks the UTXOs used to cover a required asset amount.
pub trait InputStrategy {
    /// Select UTXOs from the pool whose sum covers `amount`.
    ///
    /// # Arguments
    /// * `utxos` - The available pool, all of one asset.
    /// * `amount` - The required amount.
    ///
    /// # Returns
    /// The selected UTXOs, or an insufficient-funds error when the pool
    /// sum is short.
    fn calculate_inputs(&self, utxos: &[Utxo], amount: Fixed8) -> Result<Vec<Utxo>, WalletError>;
}

/// Left-to-right greedy selection: accumulates UTXOs in pool order until
/// the required amount is covered.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStrategy;

impl InputStrategy for DefaultStrategy {
    fn calculate_inputs(&self, utxos: &[Utxo], amount: Fixed8) -> Result<Vec<Utxo>, WalletError> {
        let available = sum_values(utxos);
        if available < amount {
            let asset = utxos.first().map(|u| u.asset_id).unwrap_or_default();
            return Err(WalletError::InsufficientFunds {
                asset,
                required: amount,
                available,
            });
        }
        let mut selected = Vec::new();
        let mut covered = Fixed8::ZERO;
        for utxo in utxos {
            if covered >= amount {
                break;
            }
            selected.push(*utxo);
            covered = covered
                .checked_add(utxo.value)
                .unwrap_or(Fixed8::from_raw(i64::MAX));
        }
        Ok(selected)
    }
}
