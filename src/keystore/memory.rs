//! In-process key store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use super::{KeyStore, KeyStoreError};
use crate::crypto::{EcdsaSignature, PrivateKey, PublicKey};
use crate::primitives::H256;

struct StoredKey {
    secret: PrivateKey,
    passphrase: Option<String>,
}

/// Keys held in memory, indexed by account id hex
#[derive(Default)]
pub struct MemoryKeyStore {
    keys: RwLock<HashMap<String, StoredKey>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing secret and return its key id
    pub async fn import(&self, secret: PrivateKey, passphrase: Option<&str>) -> String {
        let key_id = Self::key_id(&secret.public_key());
        let mut keys = self.keys.write().await;
        keys.insert(
            key_id.clone(),
            StoredKey {
                secret,
                passphrase: passphrase.map(str::to_string),
            },
        );
        key_id
    }

    pub async fn len(&self) -> usize {
        self.keys.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.keys.read().await.is_empty()
    }

    /// Key ids are the signer's account id in hex
    pub fn key_id(public: &PublicKey) -> String {
        public.account_id().to_hex()
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn create_key(&self, passphrase: Option<&str>) -> Result<String, KeyStoreError> {
        let key_id = self.import(PrivateKey::generate(), passphrase).await;
        debug!(%key_id, "created key");
        Ok(key_id)
    }

    async fn get_public_key(&self, key_id: &str) -> Result<Option<PublicKey>, KeyStoreError> {
        let keys = self.keys.read().await;
        Ok(keys.get(key_id).map(|stored| stored.secret.public_key()))
    }

    async fn sign(
        &self,
        key_id: &str,
        message: &H256,
        passphrase: Option<&str>,
    ) -> Result<EcdsaSignature, KeyStoreError> {
        let keys = self.keys.read().await;
        let stored = keys
            .get(key_id)
            .ok_or_else(|| KeyStoreError::NoSuchKey(key_id.to_string()))?;
        if stored.passphrase.as_deref() != passphrase {
            return Err(KeyStoreError::WrongPassphrase(key_id.to_string()));
        }
        Ok(stored.secret.sign(message)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_sign() {
        let store = MemoryKeyStore::new();
        let key_id = store.create_key(None).await.unwrap();
        let public = store.get_public_key(&key_id).await.unwrap().unwrap();
        assert_eq!(MemoryKeyStore::key_id(&public), key_id);

        let message = H256([5; 32]);
        let signature = store.sign(&key_id, &message, None).await.unwrap();
        assert!(public.verify(&message, &signature));
    }

    #[tokio::test]
    async fn test_passphrase_checked() {
        let store = MemoryKeyStore::new();
        let key_id = store.create_key(Some("hunter2")).await.unwrap();
        let message = H256::zero();
        assert_eq!(
            store.sign(&key_id, &message, Some("wrong")).await,
            Err(KeyStoreError::WrongPassphrase(key_id.clone()))
        );
        assert_eq!(
            store.sign(&key_id, &message, None).await,
            Err(KeyStoreError::WrongPassphrase(key_id.clone()))
        );
        assert!(store.sign(&key_id, &message, Some("hunter2")).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_key() {
        let store = MemoryKeyStore::new();
        assert_eq!(store.get_public_key("00").await.unwrap(), None);
        assert_eq!(
            store.sign("00", &H256::zero(), None).await,
            Err(KeyStoreError::NoSuchKey("00".to_string()))
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_import_is_deterministic() {
        let store = MemoryKeyStore::new();
        let secret = PrivateKey::from_bytes(&[9u8; 32]).unwrap();
        let expected = MemoryKeyStore::key_id(&secret.public_key());
        assert_eq!(store.import(secret, None).await, expected);
        assert_eq!(store.len().await, 1);
    }
}
