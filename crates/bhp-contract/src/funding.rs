//! Input selection shared by deployments and invocations.

use std::collections::BTreeMap;

use bhp_primitives::fixed8::Fixed8;
use bhp_primitives::hash256::Hash256;
use bhp_script::ScriptHash;
use bhp_transaction::{TransactionInput, TransactionOutput};
use bhp_wallet::{Account, InputStrategy, Utxo, WalletError};

use crate::ContractError;

/// Inputs covering a set of required asset amounts, with the change
/// outputs that return the surplus.
pub(crate) struct Funding {
    pub inputs: Vec<TransactionInput>,
    pub change: Vec<TransactionOutput>,
}

/// Select inputs for every required asset amount and compute change.
///
/// Draws from `pool` when it is non-empty, otherwise from the account's
/// balance snapshot. Change goes to `change_to`.
pub(crate) fn fund(
    account: &Account,
    pool: &[Utxo],
    required: &BTreeMap<Hash256, Fixed8>,
    strategy: &dyn InputStrategy,
    change_to: ScriptHash,
) -> Result<Funding, ContractError> {
    let mut inputs = Vec::new();
    let mut change = Vec::new();
    for (asset_id, amount) in required {
        let selected = if pool.is_empty() {
            account.utxos_for_asset_amount(asset_id, *amount, strategy)?
        } else {
            select_from_pool(pool, asset_id, *amount, strategy)?
        };
        inputs.extend(selected.iter().map(Utxo::to_input));
        let surplus = selected
            .iter()
            .fold(Fixed8::ZERO, |acc, u| {
                acc.checked_add(u.value).unwrap_or(Fixed8::from_raw(i64::MAX))
            })
            .checked_sub(*amount)
            .unwrap_or(Fixed8::ZERO);
        if surplus > Fixed8::ZERO {
            change.push(TransactionOutput::new(*asset_id, surplus, change_to));
        }
    }
    Ok(Funding { inputs, change })
}

fn select_from_pool(
    pool: &[Utxo],
    asset_id: &Hash256,
    amount: Fixed8,
    strategy: &dyn InputStrategy,
) -> Result<Vec<Utxo>, ContractError> {
    let of_asset: Vec<Utxo> = pool
        .iter()
        .filter(|u| u.asset_id == *asset_id)
        .copied()
        .collect();
    let available = of_asset.iter().fold(Fixed8::ZERO, |acc, u| {
        acc.checked_add(u.value).unwrap_or(Fixed8::from_raw(i64::MAX))
    });
    if available < amount {
        return Err(ContractError::Wallet(WalletError::InsufficientFunds {
            asset: *asset_id,
            required: amount,
            available,
        }));
    }
    Ok(strategy.calculate_inputs(&of_asset, amount)?)
}
