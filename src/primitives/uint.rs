//! Bounded unsigned integers
//!
//! `U64` carries asset quantities and fees. `U256` wraps
//! `primitive_types::U256` for wide intermediates such as order ratios.
//! Both encode in RLP as minimal big-endian byte strings (zero is the empty
//! string) and in JSON as `0x`-prefixed minimal hex.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{strip_hex_prefix, PrimitiveError};
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

/// 64-bit unsigned quantity
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct U64(pub u64);

impl U64 {
    pub const MAX: U64 = U64(u64::MAX);

    pub const fn new(value: u64) -> Self {
        U64(value)
    }

    pub const fn zero() -> Self {
        U64(0)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: U64) -> Option<U64> {
        self.0.checked_add(other.0).map(U64)
    }

    pub fn checked_sub(self, other: U64) -> Option<U64> {
        self.0.checked_sub(other.0).map(U64)
    }

    /// Parse `0x`-prefixed hex or a decimal literal
    pub fn parse(s: &str) -> Result<Self, PrimitiveError> {
        parse_u64_literal(s).map(U64)
    }

    /// Minimal big-endian bytes; empty for zero
    pub fn to_be_bytes_trimmed(&self) -> Vec<u8> {
        trim_leading_zeros(&self.0.to_be_bytes()).to_vec()
    }
}

fn parse_u64_literal(s: &str) -> Result<u64, PrimitiveError> {
    if s.starts_with("0x") || s.starts_with("0X") {
        let digits = strip_hex_prefix(s);
        if digits.is_empty() {
            return Err(PrimitiveError::InvalidInteger(s.to_string()));
        }
        u64::from_str_radix(digits, 16).map_err(|_| out_of_range_or_invalid(s, digits, 16, 64))
    } else {
        s.parse::<u64>().map_err(|_| out_of_range_or_invalid(s, s, 10, 64))
    }
}

fn out_of_range_or_invalid(original: &str, digits: &str, radix: u32, bits: u32) -> PrimitiveError {
    if !digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)) {
        PrimitiveError::OutOfRange {
            bits,
            value: original.to_string(),
        }
    } else {
        PrimitiveError::InvalidInteger(original.to_string())
    }
}

pub(crate) fn trim_leading_zeros(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b != 0) {
        Some(idx) => &bytes[idx..],
        None => &[],
    }
}

impl From<u64> for U64 {
    fn from(value: u64) -> Self {
        U64(value)
    }
}

impl From<U64> for u64 {
    fn from(value: U64) -> Self {
        value.0
    }
}

impl fmt::Display for U64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for U64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U64({})", self.0)
    }
}

impl FromStr for U64 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Encodable for U64 {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::uint(self.0)
    }
}

impl Decodable for U64 {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        item.as_u64().map(U64)
    }
}

impl Serialize for U64 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{:x}", self.0))
    }
}

impl<'de> Deserialize<'de> for U64 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct U64Visitor;

        impl<'de> de::Visitor<'de> for U64Visitor {
            type Value = U64;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a non-negative integer or a hex/decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<U64, E> {
                Ok(U64(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<U64, E> {
                u64::try_from(v)
                    .map(U64)
                    .map_err(|_| E::custom(format!("negative quantity: {}", v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<U64, E> {
                U64::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(U64Visitor)
    }
}

/// 256-bit unsigned integer
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct U256(pub primitive_types::U256);

impl U256 {
    pub const MAX: U256 = U256(primitive_types::U256::MAX);

    pub fn zero() -> Self {
        U256(primitive_types::U256::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: U256) -> Option<U256> {
        self.0.checked_add(other.0).map(U256)
    }

    pub fn checked_mul(self, other: U256) -> Option<U256> {
        self.0.checked_mul(other.0).map(U256)
    }

    /// `None` on division by zero
    pub fn checked_div(self, other: U256) -> Option<U256> {
        self.0.checked_div(other.0).map(U256)
    }

    /// Narrow to 64 bits when the value fits
    pub fn to_u64(&self) -> Option<u64> {
        (self.0.bits() <= 64).then(|| self.0.low_u64())
    }

    /// Parse `0x`-prefixed hex or a decimal literal
    pub fn parse(s: &str) -> Result<Self, PrimitiveError> {
        if s.starts_with("0x") || s.starts_with("0X") {
            let digits = strip_hex_prefix(s);
            if digits.is_empty() {
                return Err(PrimitiveError::InvalidInteger(s.to_string()));
            }
            primitive_types::U256::from_str_radix(digits, 16)
                .map(U256)
                .map_err(|_| out_of_range_or_invalid(s, digits, 16, 256))
        } else {
            if s.is_empty() {
                return Err(PrimitiveError::InvalidInteger(s.to_string()));
            }
            primitive_types::U256::from_dec_str(s)
                .map(U256)
                .map_err(|_| out_of_range_or_invalid(s, s, 10, 256))
        }
    }

    /// Minimal big-endian bytes; empty for zero
    pub fn to_be_bytes_trimmed(&self) -> Vec<u8> {
        let mut buf = [0u8; 32];
        self.0.to_big_endian(&mut buf);
        trim_leading_zeros(&buf).to_vec()
    }
}

impl From<u64> for U256 {
    fn from(value: u64) -> Self {
        U256(primitive_types::U256::from(value))
    }
}

impl From<U64> for U256 {
    fn from(value: U64) -> Self {
        U256::from(value.0)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256(0x{:x})", self.0)
    }
}

impl FromStr for U256 {
    type Err = PrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Encodable for U256 {
    fn to_rlp(&self) -> RlpItem {
        RlpItem::bytes(self.to_be_bytes_trimmed())
    }
}

impl Decodable for U256 {
    fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
        let data = item.as_uint_bytes(32)?;
        Ok(U256(primitive_types::U256::from_big_endian(data)))
    }
}

impl Serialize for U256 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct U256Visitor;

        impl<'de> de::Visitor<'de> for U256Visitor {
            type Value = U256;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "a non-negative integer or a hex/decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
                Ok(U256::from(v))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<U256, E> {
                U256::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(U256Visitor)
    }
}
