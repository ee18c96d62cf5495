//! Addresses - bech32 platform and asset addresses
//!
//! Platform addresses identify accounts (`<network>c…`), asset addresses
//! identify output owners (`<network>a…`). Both carry a version byte of 1.

mod platform;
mod asset;

pub use platform::*;
pub use asset::*;

use thiserror::Error;

use crate::primitives::NetworkId;

/// Address version understood by this crate
pub const ADDRESS_VERSION: u8 = 1;

/// Address parsing errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid bech32 encoding: {0}")]
    InvalidBech32(String),
    #[error("Invalid address prefix: {0}")]
    InvalidPrefix(String),
    #[error("Unsupported address version: {0}")]
    UnsupportedVersion(u8),
    #[error("Unknown asset address type: {0}")]
    UnknownType(u8),
    #[error("Invalid address payload length: {0}")]
    InvalidPayloadLength(usize),
}

/// Split an address string into network id, kind character and payload
fn decode_bech32(address: &str) -> Result<(NetworkId, char, Vec<u8>), AddressError> {
    let (hrp, data) =
        bech32::decode(address).map_err(|e| AddressError::InvalidBech32(e.to_string()))?;
    let prefix = hrp.as_str().to_ascii_lowercase();
    let mut chars = prefix.chars();
    let (Some(a), Some(b), Some(kind), None) = (chars.next(), chars.next(), chars.next(), chars.next())
    else {
        return Err(AddressError::InvalidPrefix(prefix));
    };
    let network_id = NetworkId::new(&format!("{}{}", a, b))
        .map_err(|_| AddressError::InvalidPrefix(prefix.clone()))?;
    match data.first() {
        Some(&ADDRESS_VERSION) => Ok((network_id, kind, data[1..].to_vec())),
        Some(&other) => Err(AddressError::UnsupportedVersion(other)),
        None => Err(AddressError::InvalidPayloadLength(0)),
    }
}

fn encode_bech32(network_id: &NetworkId, kind: char, payload: &[u8]) -> Result<String, AddressError> {
    let hrp = bech32::Hrp::parse(&format!("{}{}", network_id, kind))
        .map_err(|e| AddressError::InvalidPrefix(e.to_string()))?;
    let mut data = Vec::with_capacity(1 + payload.len());
    data.push(ADDRESS_VERSION);
    data.extend_from_slice(payload);
    bech32::encode::<bech32::Bech32>(hrp, &data).map_err(|e| AddressError::InvalidBech32(e.to_string()))
}
