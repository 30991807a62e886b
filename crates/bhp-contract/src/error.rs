//! Contract error types.

use thiserror::Error;

/// Errors raised while building contract deployments and invocations.
#[derive(Error, Debug)]
pub enum ContractError {
    /// A required builder field was not set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The builder was used in a way that cannot produce a valid
    /// transaction.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Script assembly failed.
    #[error("script error: {0}")]
    Script(#[from] bhp_script::ScriptError),

    /// Transaction construction failed.
    #[error("transaction error: {0}")]
    Transaction(#[from] bhp_transaction::TransactionError),

    /// Funding the transaction from the account failed.
    #[error("wallet error: {0}")]
    Wallet(#[from] bhp_wallet::WalletError),
}
