/// BHP SDK - Smart contract deployment and invocation.
///
/// Builds deployment scripts that register a contract binary through
/// the `Bhp.Contract.Create` interop service and invocation scripts
/// that APPCALL a deployed contract, wraps both in invocation
/// transactions, and funds their fees from a wallet account.

pub mod deployment;
pub mod invocation;

mod error;
mod funding;

pub use deployment::{
    ContractDeployment, ContractDeploymentBuilder, DeploymentScript, DescriptionProperties,
    FunctionProperties,
};
pub use error::ContractError;
pub use invocation::{ContractInvocation, ContractInvocationBuilder};
