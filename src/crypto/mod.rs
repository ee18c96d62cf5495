//! Cryptography module - BLAKE2b hashing and secp256k1 ECDSA signatures

mod hash;
mod ecdsa;

pub use hash::*;
pub use ecdsa::*;
