//! BLAKE2b hashing
//!
//! All digests use BLAKE2b with the output length of the target type. The
//! keyed variants use BLAKE2b's native key parameter for domain separation.

use blake2b_simd::Params;

use crate::primitives::{H128, H160, H256};

fn blake2b<const N: usize>(data: &[u8], key: &[u8]) -> [u8; N] {
    let hash = Params::new().hash_length(N).key(key).hash(data);
    let mut out = [0u8; N];
    out.copy_from_slice(hash.as_bytes());
    out
}

/// 256-bit general hash
pub fn blake256(data: &[u8]) -> H256 {
    H256(blake2b::<32>(data, &[]))
}

/// 160-bit hash (account ids, lock script hashes)
pub fn blake160(data: &[u8]) -> H160 {
    H160(blake2b::<20>(data, &[]))
}

/// 128-bit hash
pub fn blake128(data: &[u8]) -> H128 {
    H128(blake2b::<16>(data, &[]))
}

/// Keyed 256-bit hash. Keys longer than 64 bytes are not valid BLAKE2b keys.
pub fn blake256_with_key(data: &[u8], key: &[u8]) -> H256 {
    H256(blake2b::<32>(data, key))
}

pub fn blake160_with_key(data: &[u8], key: &[u8]) -> H160 {
    H160(blake2b::<20>(data, key))
}

pub fn blake128_with_key(data: &[u8], key: &[u8]) -> H128 {
    H128(blake2b::<16>(data, key))
}
