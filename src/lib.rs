//! CodeChain Transaction Core
//!
//! Builds, encodes, hashes and signs CodeChain transactions. Covers the
//! canonical RLP wire format, platform and asset address derivation and
//! the partial-hash signing scheme that lets independent parties sign
//! selected inputs and outputs of one asset transaction.

pub mod address;
pub mod asset;
pub mod config;
pub mod crypto;
pub mod error;
pub mod keystore;
pub mod primitives;
pub mod rlp;
pub mod script;
pub mod signer;
pub mod signing;
pub mod transaction;

pub use error::{CoreError, Result};

/// Protocol constants
pub mod constants {
    use crate::primitives::NetworkId;

    /// Network used when a configuration does not name one
    pub const DEFAULT_NETWORK_ID: NetworkId = NetworkId::TESTNET;

    /// Leading RLP field of every action
    pub mod action_tag {
        pub const PAY: u8 = 0x02;
        pub const SET_REGULAR_KEY: u8 = 0x03;
        pub const CREATE_SHARD: u8 = 0x04;
        pub const SET_SHARD_OWNERS: u8 = 0x05;
        pub const SET_SHARD_USERS: u8 = 0x06;
        pub const WRAP_CCC: u8 = 0x07;
        pub const STORE: u8 = 0x08;
        pub const REMOVE: u8 = 0x09;
        pub const UNWRAP_CCC: u8 = 0x11;
        /// Distinct from `SET_REGULAR_KEY`
        pub const MINT_ASSET: u8 = 0x13;
        pub const TRANSFER_ASSET: u8 = 0x14;
        pub const CHANGE_ASSET_SCHEME: u8 = 0x15;
        pub const COMPOSE_ASSET: u8 = 0x16;
        pub const DECOMPOSE_ASSET: u8 = 0x17;
        pub const INCREASE_ASSET_SUPPLY: u8 = 0x18;
        pub const CUSTOM: u8 = 0xFF;
    }
}
