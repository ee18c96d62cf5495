//! Partial-hash signing
//!
//! A signature over an asset transaction commits to a chosen subset of its
//! inputs and outputs. The subset is described by a [`SignatureTag`] whose
//! encoding keys the final hash, so two different subsets can never share
//! a message even when they select the same items.

mod tag;
mod partial;

pub use tag::*;
pub use partial::*;

use thiserror::Error;

use crate::crypto::SignatureError;
use crate::keystore::KeyStoreError;

/// Errors from partial hashing and witness attachment
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    #[error("Single-input tag requires an input or burn target")]
    MissingTarget,
    #[error("{kind} index {index} out of range ({len} available)")]
    TargetOutOfRange {
        kind: &'static str,
        index: usize,
        len: usize,
    },
    #[error("This transaction has no {0} to sign")]
    UnsupportedTarget(&'static str),
    #[error("Output index {index} out of range ({len} outputs)")]
    OutputOutOfRange { index: usize, len: usize },
    #[error("Output index {0} cannot be encoded in a signature tag (max 503)")]
    OutputIndexTooLarge(usize),
    #[error("Transactions with orders only support the all/all signature tag")]
    OrdersRequireFullTag,
    #[error("Unsupported signature tag: {0}")]
    UnsupportedTag(&'static str),
    #[error("Witness already attached")]
    WitnessAlreadyAttached,
    #[error("Spent output is locked by {0}, not a standard P2PKH script")]
    NonStandardLockScript(String),
    #[error("Key not found in key store: {0}")]
    UnknownKey(String),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}
