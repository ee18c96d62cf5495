//! Primitive codec - fixed-width hashes, bounded integers and network ids
//!
//! Every type here has one canonical text form (`0x`-prefixed lowercase hex
//! for hashes and quantities) and one canonical RLP form.

mod fixed;
mod uint;
mod network;
pub mod hex_serde;

pub use fixed::*;
pub use uint::*;
pub use network::*;

use thiserror::Error;

/// Primitive construction errors
#[derive(Debug, Error, PartialEq)]
pub enum PrimitiveError {
    #[error("Invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("Invalid hex length: expected {expected} digits, got {actual}")]
    InvalidHexLength { expected: usize, actual: usize },
    #[error("Invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Integer out of range for {bits} bits: {value}")]
    OutOfRange { bits: u32, value: String },
    #[error("Invalid integer literal: {0}")]
    InvalidInteger(String),
    #[error("Invalid network id: {0:?}")]
    InvalidNetworkId(String),
}

/// Strip an optional `0x`/`0X` prefix
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
