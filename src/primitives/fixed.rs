//! Fixed-width big-endian hash values
//!
//! `H128`, `H160`, `H256` and `H512` share one implementation. The text form
//! is always `0x` followed by exactly `2 * LEN` lowercase hex digits.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::{strip_hex_prefix, PrimitiveError};
use crate::rlp::{Decodable, Encodable, RlpError, RlpItem};

macro_rules! fixed_hash {
    ($(#[$attr:meta])* $name:ident, $len:expr) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub [u8; $len]);

        impl $name {
            /// Width in bytes
            pub const LEN: usize = $len;

            /// All-zero value
            pub const fn zero() -> Self {
                $name([0u8; $len])
            }

            /// Create from an owned array
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }

            /// Create from a slice of exactly `LEN` bytes
            pub fn from_slice(bytes: &[u8]) -> Result<Self, PrimitiveError> {
                if bytes.len() != $len {
                    return Err(PrimitiveError::InvalidLength {
                        expected: $len,
                        actual: bytes.len(),
                    });
                }
                let mut arr = [0u8; $len];
                arr.copy_from_slice(bytes);
                Ok($name(arr))
            }

            /// Parse from hex, with or without the `0x` prefix
            pub fn from_hex(s: &str) -> Result<Self, PrimitiveError> {
                let digits = strip_hex_prefix(s);
                if digits.len() != $len * 2 {
                    return Err(PrimitiveError::InvalidHexLength {
                        expected: $len * 2,
                        actual: digits.len(),
                    });
                }
                let mut arr = [0u8; $len];
                hex::decode_to_slice(digits, &mut arr)?;
                Ok($name(arr))
            }

            /// Lowercase hex without prefix
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), self.to_hex())
            }
        }

        impl FromStr for $name {
            type Err = PrimitiveError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_hex(s)
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                $name(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl Encodable for $name {
            fn to_rlp(&self) -> RlpItem {
                RlpItem::bytes(self.0.to_vec())
            }
        }

        impl Decodable for $name {
            fn from_rlp(item: &RlpItem) -> Result<Self, RlpError> {
                let bytes = item.as_bytes()?;
                if bytes.len() != $len {
                    return Err(RlpError::InvalidLength {
                        expected: $len,
                        actual: bytes.len(),
                    });
                }
                let mut arr = [0u8; $len];
                arr.copy_from_slice(bytes);
                Ok($name(arr))
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(de::Error::custom)
            }
        }
    };
}

fixed_hash!(
    /// 16-byte hash (blake128 output, signature-tag keys)
    H128,
    16
);
fixed_hash!(
    /// 20-byte hash (account ids, lock script hashes)
    H160,
    20
);
fixed_hash!(
    /// 32-byte hash (trackers, transaction hashes, asset types)
    H256,
    32
);
fixed_hash!(
    /// 64-byte value (uncompressed secp256k1 public key without the 0x04 tag)
    H512,
    64
);
