//! Key storage capability
//!
//! Signing never touches secrets directly; it asks a [`KeyStore`] to sign a
//! 32-byte message on behalf of a key id. Backends may be remote or
//! disk-backed, so every call is async and fallible.

mod memory;

pub use memory::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::crypto::{EcdsaSignature, PublicKey, SignatureError};
use crate::primitives::H256;

/// Key store errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyStoreError {
    #[error("No such key: {0}")]
    NoSuchKey(String),
    #[error("Wrong passphrase for key {0}")]
    WrongPassphrase(String),
    #[error("Key store backend failure: {0}")]
    Backend(String),
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Generate a key and return its id
    async fn create_key(&self, passphrase: Option<&str>) -> Result<String, KeyStoreError>;

    /// Public key of `key_id`, or `None` when the store does not hold it
    async fn get_public_key(&self, key_id: &str) -> Result<Option<PublicKey>, KeyStoreError>;

    /// Recoverable signature of `message` by `key_id`
    async fn sign(
        &self,
        key_id: &str,
        message: &H256,
        passphrase: Option<&str>,
    ) -> Result<EcdsaSignature, KeyStoreError>;
}
