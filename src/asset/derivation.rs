//! Asset identifier derivation
//!
//! Both identifiers are keyed BLAKE2b digests of a transaction tracker whose
//! first four bytes are overwritten with `prefix, 0x00, shard_id (BE)`.

use tracing::trace;

use crate::crypto::blake256_with_key;
use crate::primitives::H256;

/// Leading byte of an asset scheme address (asset type)
pub const ASSET_SCHEME_PREFIX: u8 = 0x53;
/// Leading byte of an asset address (one output instance)
pub const ASSET_PREFIX: u8 = 0x41;

const SCHEME_KEY: [u8; 16] = [0xf0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

fn splice_prefix(mut hash: H256, prefix: u8, shard_id: u16) -> H256 {
    let [hi, lo] = shard_id.to_be_bytes();
    hash.0[..4].copy_from_slice(&[prefix, 0x00, hi, lo]);
    hash
}

/// Address of the asset scheme created by the transaction with `tracker`
pub fn asset_scheme_address(tracker: &H256, shard_id: u16) -> H256 {
    let hash = blake256_with_key(&tracker.0, &SCHEME_KEY);
    let address = splice_prefix(hash, ASSET_SCHEME_PREFIX, shard_id);
    trace!(%tracker, shard_id, %address, "derived asset scheme address");
    address
}

/// Address of output `index` of the transaction with `tracker`
pub fn asset_address(tracker: &H256, shard_id: u16, index: usize) -> H256 {
    let mut key = [0u8; 16];
    key[8..].copy_from_slice(&(index as u64).to_be_bytes());
    let hash = blake256_with_key(&tracker.0, &key);
    let address = splice_prefix(hash, ASSET_PREFIX, shard_id);
    trace!(%tracker, shard_id, index, %address, "derived asset address");
    address
}
