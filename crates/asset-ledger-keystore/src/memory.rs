//! In-memory implementation of the KeyStore trait.
//!
//! Keys live only as long as the store. One lock guards all three maps so a
//! key, its passphrase and its public key appear and disappear together.
//! Passphrases are kept as BLAKE2b digests that are wiped when dropped and
//! compared in constant time.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use k256::ecdsa::SigningKey;
use rand::rngs::OsRng;
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use asset_ledger_core::crypto::public_from_verifying_key;
use asset_ledger_core::{blake256, EcdsaSignature, H256, H512};

use crate::error::{KeyStoreError, Result};
use crate::mapping::{AssetMapping, KeyId, KeyMapping, PlatformMapping};
use crate::traits::{KeyStore, DEFAULT_PASSPHRASE};

/// In-memory key store.
///
/// Namespaces differ only in the injected [`KeyMapping`]; use
/// [`MemoryKeyStore::platform`] or [`MemoryKeyStore::asset`] for the two
/// standard ones.
pub struct MemoryKeyStore {
    mapping: Arc<dyn KeyMapping>,
    inner: RwLock<MemoryKeyStoreInner>,
}

#[derive(Default)]
struct MemoryKeyStoreInner {
    private_keys: HashMap<KeyId, SigningKey>,
    passphrases: HashMap<KeyId, PassphraseDigest>,
    public_keys: HashMap<KeyId, H512>,
}

type PassphraseDigest = Zeroizing<[u8; 32]>;

fn passphrase_digest(passphrase: &str) -> PassphraseDigest {
    Zeroizing::new(blake256(passphrase.as_bytes()).0)
}

/// Both sides are fixed-width digests, so the comparison time does not
/// depend on where the passphrases first differ or on their lengths.
fn passphrase_matches(stored: &PassphraseDigest, given: &str) -> bool {
    let given = passphrase_digest(given);
    bool::from(stored[..].ct_eq(&given[..]))
}

impl MemoryKeyStore {
    /// Create an empty store that names keys with `mapping`.
    pub fn with_mapping(mapping: Arc<dyn KeyMapping>) -> Self {
        Self {
            mapping,
            inner: RwLock::new(MemoryKeyStoreInner::default()),
        }
    }

    /// Store for platform account keys.
    pub fn platform() -> Self {
        Self::with_mapping(Arc::new(PlatformMapping))
    }

    /// Store for asset lock keys.
    pub fn asset() -> Self {
        Self::with_mapping(Arc::new(AssetMapping))
    }

    /// The namespace this store's mapping belongs to.
    pub fn namespace(&self) -> &str {
        self.mapping.namespace()
    }

    /// Number of stored keys.
    pub async fn len(&self) -> usize {
        self.inner.read().await.private_keys.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyStore for MemoryKeyStore {
    async fn list_keys(&self) -> Result<Vec<KeyId>> {
        let inner = self.inner.read().await;
        let mut ids: Vec<KeyId> = inner.private_keys.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }

    async fn create_key(&self, passphrase: Option<&str>) -> Result<KeyId> {
        let key = SigningKey::random(&mut OsRng);
        let public = public_from_verifying_key(key.verifying_key());
        let id = self.mapping.key_id(&public);

        let mut inner = self.inner.write().await;
        inner.private_keys.insert(id.clone(), key);
        inner.passphrases.insert(
            id.clone(),
            passphrase_digest(passphrase.unwrap_or(DEFAULT_PASSPHRASE)),
        );
        inner.public_keys.insert(id.clone(), public);

        debug!(namespace = self.namespace(), key_id = %id, "created key");
        Ok(id)
    }

    async fn remove_key(&self, id: &KeyId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        if inner.private_keys.remove(id).is_none() {
            return Ok(false);
        }
        // Dropping the digest wipes it.
        drop(inner.passphrases.remove(id));
        inner.public_keys.remove(id);

        debug!(namespace = self.namespace(), key_id = %id, "removed key");
        Ok(true)
    }

    async fn get_public_key(&self, id: &KeyId) -> Result<Option<H512>> {
        let inner = self.inner.read().await;
        Ok(inner.public_keys.get(id).copied())
    }

    async fn sign(
        &self,
        id: &KeyId,
        message: &H256,
        passphrase: Option<&str>,
    ) -> Result<Option<EcdsaSignature>> {
        let inner = self.inner.read().await;
        let Some(key) = inner.private_keys.get(id) else {
            return Ok(None);
        };

        let given = passphrase.unwrap_or(DEFAULT_PASSPHRASE);
        let accepted = match inner.passphrases.get(id) {
            Some(stored) => passphrase_matches(stored, given),
            None => passphrase_matches(&passphrase_digest(DEFAULT_PASSPHRASE), given),
        };
        if !accepted {
            warn!(namespace = self.namespace(), key_id = %id, "passphrase mismatch");
            return Err(KeyStoreError::Authentication(id.to_string()));
        }

        let (signature, recovery_id) = key
            .sign_prehash_recoverable(message.as_bytes())
            .map_err(|e| KeyStoreError::Signing(e.to_string()))?;

        debug!(namespace = self.namespace(), key_id = %id, hash = ?message, "signed message");
        Ok(Some(EcdsaSignature::from_recoverable(&signature, recovery_id)))
    }
}
