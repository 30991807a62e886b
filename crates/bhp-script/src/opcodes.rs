//! VM opcode constants used by the script builder.
//!
//! Only the opcodes the SDK emits are defined here; the chain's VM has
//! many more.

/// Push an empty byte array (also the integer 0).
pub const PUSH0: u8 = 0x00;

/// Highest direct-push opcode: opcodes 0x01-0x4B push that many bytes.
pub const PUSHBYTES75: u8 = 0x4b;

/// Push data with a 1-byte length prefix.
pub const PUSHDATA1: u8 = 0x4c;

/// Push data with a 2-byte little-endian length prefix.
pub const PUSHDATA2: u8 = 0x4d;

/// Push data with a 4-byte little-endian length prefix.
pub const PUSHDATA4: u8 = 0x4e;

/// Push the integer -1.
pub const PUSHM1: u8 = 0x4f;

/// Push the integer 1. PUSH2 through PUSH16 follow contiguously.
pub const PUSH1: u8 = 0x51;

/// Push the integer 16.
pub const PUSH16: u8 = 0x60;

/// Call the contract whose 20-byte script hash follows the opcode.
pub const APPCALL: u8 = 0x67;

/// Invoke an interop service by ASCII name (1-byte length prefix).
pub const SYSCALL: u8 = 0x68;

/// Pack the top n stack items into an array.
pub const PACK: u8 = 0xc1;

/// Verify a signature against a public key.
pub const CHECKSIG: u8 = 0xac;

/// Verify m-of-n signatures against a key set.
pub const CHECKMULTISIG: u8 = 0xae;
