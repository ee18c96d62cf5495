//! P2PKH templates

use super::opcode::*;
use crate::crypto::{blake160, EcdsaSignature, PublicKey};
use crate::primitives::H160;

/// Pay-to-public-key-hash lock script. Expects `[pubkey_hash]` as parameters.
pub const P2PKH_LOCK_SCRIPT: [u8; 7] = [COPY, 0x01, BLAKE160, EQ, JZ, 0xff, CHKSIG];

/// P2PKH followed by a burn of the spent asset
pub const P2PKH_BURN_LOCK_SCRIPT: [u8; 10] =
    [COPY, 0x01, BLAKE160, EQ, JZ, 0xff, CHKSIG, JZ, 0xff, BURN];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardScript {
    P2pkh,
    P2pkhBurn,
}

impl StandardScript {
    pub fn lock_script(&self) -> &'static [u8] {
        match self {
            StandardScript::P2pkh => &P2PKH_LOCK_SCRIPT,
            StandardScript::P2pkhBurn => &P2PKH_BURN_LOCK_SCRIPT,
        }
    }

    pub fn lock_script_hash(&self) -> H160 {
        blake160(self.lock_script())
    }

    /// Recognize a standard template by its lock script hash
    pub fn from_lock_script_hash(hash: &H160) -> Option<Self> {
        [StandardScript::P2pkh, StandardScript::P2pkhBurn]
            .into_iter()
            .find(|script| script.lock_script_hash() == *hash)
    }

    /// Build the unlock script that satisfies this template:
    /// `PUSHB 65 sig PUSHB len(tag) tag PUSHB 64 pubkey`
    pub fn unlock_script(
        &self,
        public: &PublicKey,
        signature: &EcdsaSignature,
        encoded_tag: &[u8],
    ) -> Vec<u8> {
        let mut script = Vec::with_capacity(3 * 2 + EcdsaSignature::LEN + encoded_tag.len() + 64);
        script.push(PUSHB);
        script.push(EcdsaSignature::LEN as u8);
        script.extend_from_slice(&signature.0);
        script.push(PUSHB);
        script.push(encoded_tag.len() as u8);
        script.extend_from_slice(encoded_tag);
        script.push(PUSHB);
        script.push(64);
        script.extend_from_slice(&public.as_h512().0);
        script
    }
}
