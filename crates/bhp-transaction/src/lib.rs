/// BHP SDK - Raw transaction model, witnesses, and fees.
///
/// Provides the wire-level transaction types (inputs, outputs, attributes,
/// witnesses), the `RawTransaction` container for contract and invocation
/// transactions, typed builders, signing, and network fee calculation.

pub mod attribute;
pub mod input;
pub mod output;
pub mod witness;
pub mod transaction;
pub mod fees;

mod error;
pub use error::TransactionError;
pub use attribute::{AttributeUsage, TransactionAttribute};
pub use input::TransactionInput;
pub use output::TransactionOutput;
pub use witness::Witness;
pub use transaction::{
    ContractTransactionBuilder, InvocationTransactionBuilder, RawTransaction, TransactionKind,
};
