//! Transactions - actions, the unsigned envelope and signed transactions

mod action;
mod platform;
mod text;
mod ccc;
mod mint;
mod transfer;
mod compose;
mod decompose;
mod scheme;
mod unsigned;
mod signed;

pub use action::*;
pub use platform::*;
pub use text::*;
pub use ccc::*;
pub use mint::*;
pub use transfer::*;
pub use compose::*;
pub use decompose::*;
pub use scheme::*;
pub use unsigned::*;
pub use signed::*;

use thiserror::Error;

use crate::crypto::SignatureError;
use crate::keystore::KeyStoreError;
use crate::primitives::{NetworkId, H256, U64};
use crate::rlp::RlpError;

/// Transaction construction and envelope errors
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("seq is already set")]
    SeqAlreadySet,
    #[error("fee is already set")]
    FeeAlreadySet,
    #[error("seq is not set")]
    SeqNotSet,
    #[error("fee is not set")]
    FeeNotSet,
    #[error("Network mismatch: configured {expected}, transaction has {actual}")]
    NetworkMismatch { expected: NetworkId, actual: NetworkId },
    #[error("Output index {index} out of range ({len} outputs)")]
    OutputOutOfRange { index: usize, len: usize },
    #[error("Quantity overflow")]
    QuantityOverflow,
    #[error("Hash mismatch: declared {declared}, computed {computed}")]
    HashMismatch { declared: H256, computed: H256 },
    #[error("Order offers {available}, cannot consume {requested}")]
    OrderExceeded { requested: U64, available: U64 },
    #[error(transparent)]
    Rlp(#[from] RlpError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
    #[error("Invalid transaction JSON: {0}")]
    Json(#[from] serde_json::Error),
}
