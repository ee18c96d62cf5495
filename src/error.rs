//! Crate-wide error type

use thiserror::Error;

use crate::address::AddressError;
use crate::config::ConfigError;
use crate::crypto::SignatureError;
use crate::keystore::KeyStoreError;
use crate::primitives::PrimitiveError;
use crate::rlp::RlpError;
use crate::signing::SigningError;
use crate::transaction::TransactionError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
    #[error(transparent)]
    Rlp(#[from] RlpError),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Signature(#[from] SignatureError),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error(transparent)]
    Signing(#[from] SigningError),
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
