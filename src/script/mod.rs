//! Standard lock and unlock scripts
//!
//! Only the two standard templates the signer produces witnesses for are
//! modelled here. The node's script interpreter is out of scope.

pub mod opcode;
mod standard;

pub use standard::*;
