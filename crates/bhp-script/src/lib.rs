/// BHP SDK - Script building, script hashes, and addresses.
///
/// Provides the VM opcode constants, a script builder emitting canonical
/// push operations, contract parameter encoding, verification/invocation
/// script construction, and script hash / address conversion.

pub mod opcodes;
pub mod builder;
pub mod script_hash;
pub mod param;
pub mod verification;

mod error;
pub use error::ScriptError;
pub use builder::ScriptBuilder;
pub use script_hash::ScriptHash;
pub use param::{ContractParameter, ContractParameterType};
