//! Binary encoder - canonical RLP
//!
//! Every wire structure is first projected to an [`RlpItem`] tree and then
//! serialized with the `rlp` crate. Decoding is strict: any non-canonical
//! header, truncated payload or trailing byte is rejected.

mod item;

pub use item::*;

use thiserror::Error;

/// RLP decoding errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RlpError {
    #[error("RLP input too short: need {needed} bytes, have {available}")]
    TooShort { needed: usize, available: usize },
    #[error("{0} trailing bytes after RLP item")]
    TrailingBytes(usize),
    #[error("Non-canonical RLP: {0}")]
    NonCanonical(&'static str),
    #[error("Malformed RLP: {0}")]
    Malformed(String),
    #[error("Expected RLP list")]
    ExpectedList,
    #[error("Expected RLP byte string")]
    ExpectedBytes,
    #[error("Expected list of {expected} items, got {actual}")]
    ListLength { expected: usize, actual: usize },
    #[error("Integer has leading zero bytes")]
    LeadingZero,
    #[error("Integer wider than {max} bytes")]
    IntegerOverflow { max: usize },
    #[error("Expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("Unexpected type tag: 0x{0:02x}")]
    UnexpectedTag(u64),
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Types with a canonical RLP projection
pub trait Encodable {
    fn to_rlp(&self) -> RlpItem;

    /// Serialized bytes of [`Encodable::to_rlp`]
    fn rlp_bytes(&self) -> Vec<u8> {
        self.to_rlp().encode()
    }
}

/// Types that can be rebuilt from their RLP projection
pub trait Decodable: Sized {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError>;

    /// Decode from serialized bytes
    fn decode(bytes: &[u8]) -> Result<Self, RlpError> {
        Self::from_rlp(&RlpItem::decode(bytes)?)
    }
}

/// Encode a slice as an RLP list
pub fn encode_list<T: Encodable>(values: &[T]) -> RlpItem {
    RlpItem::List(values.iter().map(Encodable::to_rlp).collect())
}

/// Decode every element of an RLP list
pub fn decode_list<T: Decodable>(item: &RlpItem) -> Result<Vec<T>, RlpError> {
    decode_list_with(item, T::from_rlp)
}

/// `decode_list` with an explicit element decoder
pub fn decode_list_with<T, F>(item: &RlpItem, decode: F) -> Result<Vec<T>, RlpError>
where
    F: Fn(&RlpItem) -> Result<T, RlpError>,
{
    item.as_list()?.iter().map(decode).collect()
}

/// Encode a list of byte strings (script parameters)
pub fn encode_bytes_list(values: &[Vec<u8>]) -> RlpItem {
    RlpItem::List(values.iter().map(|v| RlpItem::bytes(v.clone())).collect())
}

pub fn decode_bytes_list(item: &RlpItem) -> Result<Vec<Vec<u8>>, RlpError> {
    item.as_list()?
        .iter()
        .map(|v| v.as_bytes().map(<[u8]>::to_vec))
        .collect()
}

/// Encode an optional value as `[]` or `[value]`
pub fn encode_optional<T: Encodable>(value: Option<&T>) -> RlpItem {
    match value {
        Some(v) => RlpItem::List(vec![v.to_rlp()]),
        None => RlpItem::List(Vec::new()),
    }
}

/// Decode `[]` or `[value]`
pub fn decode_optional<T: Decodable>(item: &RlpItem) -> Result<Option<T>, RlpError> {
    decode_optional_with(item, T::from_rlp)
}

/// `decode_optional` with an explicit value decoder
pub fn decode_optional_with<T, F>(item: &RlpItem, decode: F) -> Result<Option<T>, RlpError>
where
    F: Fn(&RlpItem) -> Result<T, RlpError>,
{
    match item.as_list()? {
        [] => Ok(None),
        [inner] => decode(inner).map(Some),
        other => Err(RlpError::ListLength {
            expected: 1,
            actual: other.len(),
        }),
    }
}

impl Encodable for u64 {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::uint(*self)
    }
}

impl Decodable for u64 {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        item.as_u64()
    }
}

impl Encodable for u16 {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::uint(u64::from(*self))
    }
}

impl Decodable for u16 {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        item.as_u16()
    }
}

impl Encodable for usize {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::uint(*self as u64)
    }
}

impl Decodable for usize {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let v = item.as_u64()?;
        usize::try_from(v).map_err(|_| RlpError::IntegerOverflow {
            max: std::mem::size_of::<usize>(),
        })
    }
}
