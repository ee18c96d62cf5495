//! Signing asset inputs through a key store
//!
//! Each spent input gets a standard P2PKH witness: the lock script itself
//! and an unlock script carrying the signature, the encoded tag and the
//! signer's public key. Inputs sign as P2PKH, burns as P2PKH-with-burn.

use tracing::debug;

use crate::asset::AssetTransferInput;
use crate::keystore::KeyStore;
use crate::script::StandardScript;
use crate::signing::{pick_slot, HashWithoutScript, InputTarget, SignatureTag, SigningError};
use crate::transaction::{ComposeAsset, DecomposeAsset, TransferAsset, UnwrapCcc};

/// Asset actions with spending slots that take witnesses
pub trait SpendsAssets: HashWithoutScript + Sized {
    fn spent_input(&self, target: InputTarget) -> Result<&AssetTransferInput, SigningError>;

    fn attach_witness(
        self,
        target: InputTarget,
        lock_script: Vec<u8>,
        unlock_script: Vec<u8>,
    ) -> Result<Self, SigningError>;
}

impl SpendsAssets for TransferAsset {
    fn spent_input(&self, target: InputTarget) -> Result<&AssetTransferInput, SigningError> {
        match target {
            InputTarget::Input(index) => pick_slot(&self.inputs, index, "input"),
            InputTarget::Burn(index) => pick_slot(&self.burns, index, "burn"),
        }
    }

    fn attach_witness(self, target: InputTarget, lock_script: Vec<u8>, unlock_script: Vec<u8>) -> Result<Self, SigningError> {
        self.with_witness(target, lock_script, unlock_script)
    }
}

impl SpendsAssets for ComposeAsset {
    fn spent_input(&self, target: InputTarget) -> Result<&AssetTransferInput, SigningError> {
        match target {
            InputTarget::Input(index) => pick_slot(&self.inputs, index, "input"),
            InputTarget::Burn(_) => Err(SigningError::UnsupportedTarget("burn")),
        }
    }

    fn attach_witness(self, target: InputTarget, lock_script: Vec<u8>, unlock_script: Vec<u8>) -> Result<Self, SigningError> {
        self.with_witness(target, lock_script, unlock_script)
    }
}

impl SpendsAssets for DecomposeAsset {
    fn spent_input(&self, target: InputTarget) -> Result<&AssetTransferInput, SigningError> {
        match target {
            InputTarget::Input(index) => pick_slot(std::slice::from_ref(&self.input), index, "input"),
            InputTarget::Burn(_) => Err(SigningError::UnsupportedTarget("burn")),
        }
    }

    fn attach_witness(self, target: InputTarget, lock_script: Vec<u8>, unlock_script: Vec<u8>) -> Result<Self, SigningError> {
        self.with_witness(target, lock_script, unlock_script)
    }
}

impl SpendsAssets for UnwrapCcc {
    fn spent_input(&self, target: InputTarget) -> Result<&AssetTransferInput, SigningError> {
        match target {
            InputTarget::Burn(index) => pick_slot(std::slice::from_ref(&self.burn), index, "burn"),
            InputTarget::Input(_) => Err(SigningError::UnsupportedTarget("input")),
        }
    }

    fn attach_witness(self, target: InputTarget, lock_script: Vec<u8>, unlock_script: Vec<u8>) -> Result<Self, SigningError> {
        self.with_witness(target, lock_script, unlock_script)
    }
}

/// Sign one input or burn of `action` and return it with the witness attached
pub async fn sign_input<T: SpendsAssets>(
    action: T,
    target: InputTarget,
    tag: &SignatureTag,
    key_store: &dyn KeyStore,
    key_id: &str,
    passphrase: Option<&str>,
) -> Result<T, SigningError> {
    let public = key_store
        .get_public_key(key_id)
        .await?
        .ok_or_else(|| SigningError::UnknownKey(key_id.to_string()))?;

    let script = match target {
        InputTarget::Input(_) => StandardScript::P2pkh,
        InputTarget::Burn(_) => StandardScript::P2pkhBurn,
    };
    let spent = action.spent_input(target)?;
    if let Some(hash) = spent.prev_out.lock_script_hash {
        if hash != script.lock_script_hash() {
            return Err(SigningError::NonStandardLockScript(hash.to_string()));
        }
    }

    let message = action.hash_without_script(tag, Some(target))?;
    let signature = key_store.sign(key_id, &message, passphrase).await?;
    let unlock_script = script.unlock_script(&public, &signature, &tag.encode()?);
    debug!(?target, %message, key_id, "signed asset input");
    action.attach_witness(target, script.lock_script().to_vec(), unlock_script)
}

/// Sign several slots with the same key and tag
pub async fn sign_inputs<T: SpendsAssets>(
    mut action: T,
    targets: &[InputTarget],
    tag: &SignatureTag,
    key_store: &dyn KeyStore,
    key_id: &str,
    passphrase: Option<&str>,
) -> Result<T, SigningError> {
    for target in targets {
        action = sign_input(action, *target, tag, key_store, key_id, passphrase).await?;
    }
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::PlatformAddress;
    use crate::asset::{AssetMintOutput, AssetOutPoint, AssetTransferOutput};
    use crate::crypto::{EcdsaSignature, PublicKey};
    use crate::keystore::MemoryKeyStore;
    use crate::primitives::{NetworkId, H160, H256, H512, U64};
    use crate::script::opcode::PUSHB;
    use crate::signing::{InputTag, OutputTag};

    fn owned_input(owner: &PublicKey, script: StandardScript, n: u8) -> AssetTransferInput {
        let prev_out = AssetOutPoint::new(H256([n; 32]), 0, H256([0xaa; 32]), 0, U64::new(10))
            .with_owner(script.lock_script_hash(), vec![owner.account_id().0.to_vec()]);
        AssetTransferInput::new(prev_out, None)
    }

    fn transfer(owner: &PublicKey) -> TransferAsset {
        let output = AssetTransferOutput {
            lock_script_hash: H160([1; 20]),
            parameters: vec![],
            asset_type: H256([0xaa; 32]),
            shard_id: 0,
            quantity: U64::new(20),
        };
        let mut tx = TransferAsset::new(
            NetworkId::TESTNET,
            vec![owned_input(owner, StandardScript::P2pkh, 1), owned_input(owner, StandardScript::P2pkh, 2)],
            vec![output],
        );
        tx.burns = vec![owned_input(owner, StandardScript::P2pkhBurn, 3)];
        tx
    }

    /// Split `PUSHB 65 sig PUSHB n tag PUSHB 64 pubkey`
    fn parse_unlock(script: &[u8]) -> (EcdsaSignature, Vec<u8>, PublicKey) {
        assert_eq!(script[0], PUSHB);
        let signature = EcdsaSignature::from_bytes(&script[2..67]).unwrap();
        let tag_len = script[68] as usize;
        let tag = script[69..69 + tag_len].to_vec();
        let key = H512::from_slice(&script[69 + tag_len + 2..]).unwrap();
        (signature, tag, PublicKey::from_h512(key).unwrap())
    }

    async fn store_with_key() -> (MemoryKeyStore, String, PublicKey) {
        let store = MemoryKeyStore::new();
        let key_id = store.create_key(None).await.unwrap();
        let public = store.get_public_key(&key_id).await.unwrap().unwrap();
        (store, key_id, public)
    }

    #[tokio::test]
    async fn test_sign_all_slots() {
        let (store, key_id, public) = store_with_key().await;
        let tag = SignatureTag::all();
        let targets = [InputTarget::Input(0), InputTarget::Burn(0), InputTarget::Input(1)];
        let signed = sign_inputs(transfer(&public), &targets, &tag, &store, &key_id, None)
            .await
            .unwrap();

        let message = signed.hash_without_script(&tag, None).unwrap();
        for input in &signed.inputs {
            assert_eq!(input.lock_script(), StandardScript::P2pkh.lock_script());
            let (signature, encoded_tag, key) = parse_unlock(input.unlock_script());
            assert_eq!(encoded_tag, vec![0b11]);
            assert_eq!(key, public);
            assert!(public.verify(&message, &signature));
        }
        assert_eq!(signed.burns[0].lock_script(), StandardScript::P2pkhBurn.lock_script());
    }

    #[tokio::test]
    async fn test_single_input_signature_is_per_input() {
        let (store, key_id, public) = store_with_key().await;
        let tag = SignatureTag::new(InputTag::Single, OutputTag::Indices(vec![0]));
        let signed = sign_input(transfer(&public), InputTarget::Input(1), &tag, &store, &key_id, None)
            .await
            .unwrap();

        assert!(!signed.inputs[0].has_witness());
        let (signature, encoded_tag, _) = parse_unlock(signed.inputs[1].unlock_script());
        assert_eq!(encoded_tag, tag.encode().unwrap());
        let message = signed
            .hash_without_script(&tag, Some(InputTarget::Input(1)))
            .unwrap();
        assert!(public.verify(&message, &signature));
    }

    #[tokio::test]
    async fn test_single_burn_signature() {
        let (store, key_id, public) = store_with_key().await;
        let tag = SignatureTag::new(InputTag::Single, OutputTag::All);
        let signed = sign_input(transfer(&public), InputTarget::Burn(0), &tag, &store, &key_id, None)
            .await
            .unwrap();

        assert!(signed.inputs.iter().all(|input| !input.has_witness()));
        let (signature, _, _) = parse_unlock(signed.burns[0].unlock_script());
        let burn_message = signed
            .hash_without_script(&tag, Some(InputTarget::Burn(0)))
            .unwrap();
        assert!(public.verify(&burn_message, &signature));
        let input_message = signed
            .hash_without_script(&tag, Some(InputTarget::Input(0)))
            .unwrap();
        assert!(!public.verify(&input_message, &signature));
    }

    #[tokio::test]
    async fn test_order_independent() {
        let (store, key_id, public) = store_with_key().await;
        let tag = SignatureTag::all();
        let forward = sign_inputs(
            transfer(&public),
            &[InputTarget::Input(0), InputTarget::Input(1)],
            &tag,
            &store,
            &key_id,
            None,
        )
        .await
        .unwrap();
        let backward = sign_inputs(
            transfer(&public),
            &[InputTarget::Input(1), InputTarget::Input(0)],
            &tag,
            &store,
            &key_id,
            None,
        )
        .await
        .unwrap();
        assert_eq!(
            forward.hash_without_script(&tag, None).unwrap(),
            backward.hash_without_script(&tag, None).unwrap()
        );
    }

    #[tokio::test]
    async fn test_double_sign_rejected() {
        let (store, key_id, public) = store_with_key().await;
        let tag = SignatureTag::all();
        let once = sign_input(transfer(&public), InputTarget::Input(0), &tag, &store, &key_id, None)
            .await
            .unwrap();
        assert_eq!(
            sign_input(once, InputTarget::Input(0), &tag, &store, &key_id, None).await,
            Err(SigningError::WitnessAlreadyAttached)
        );
    }

    #[tokio::test]
    async fn test_rejections() {
        let (store, key_id, public) = store_with_key().await;
        let tag = SignatureTag::all();

        assert_eq!(
            sign_input(transfer(&public), InputTarget::Input(0), &tag, &store, "missing", None).await,
            Err(SigningError::UnknownKey("missing".to_string()))
        );

        let mut foreign = transfer(&public);
        foreign.inputs[0].prev_out.lock_script_hash = Some(H160([0xee; 20]));
        assert!(matches!(
            sign_input(foreign, InputTarget::Input(0), &tag, &store, &key_id, None).await,
            Err(SigningError::NonStandardLockScript(_))
        ));

        assert_eq!(
            sign_input(transfer(&public), InputTarget::Burn(4), &tag, &store, &key_id, None).await,
            Err(SigningError::TargetOutOfRange { kind: "burn", index: 4, len: 1 })
        );
    }

    #[tokio::test]
    async fn test_compose_decompose_unwrap() {
        let (store, key_id, public) = store_with_key().await;
        let tag = SignatureTag::all();

        let compose = ComposeAsset::new(
            NetworkId::TESTNET,
            0,
            String::new(),
            vec![owned_input(&public, StandardScript::P2pkh, 1)],
            AssetMintOutput::zero(),
        );
        let compose = sign_input(compose, InputTarget::Input(0), &tag, &store, &key_id, None)
            .await
            .unwrap();
        assert!(compose.inputs[0].has_witness());

        let decompose = DecomposeAsset::new(
            NetworkId::TESTNET,
            owned_input(&public, StandardScript::P2pkh, 2),
            vec![],
        );
        let decompose = sign_input(decompose, InputTarget::Input(0), &tag, &store, &key_id, None)
            .await
            .unwrap();
        assert!(decompose.input.has_witness());

        let unwrap = UnwrapCcc::new(
            NetworkId::TESTNET,
            owned_input(&public, StandardScript::P2pkhBurn, 3),
            PlatformAddress::from_public(NetworkId::TESTNET, &public),
        );
        let unwrap = sign_input(unwrap, InputTarget::Burn(0), &tag, &store, &key_id, None)
            .await
            .unwrap();
        assert_eq!(unwrap.burn.lock_script(), StandardScript::P2pkhBurn.lock_script());
    }
}
