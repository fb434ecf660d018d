//! Custody: signing ledger transactions with stored keys.
//!
//! Custody pairs a platform key store (accounts that pay for and sign
//! transactions) with an asset key store (keys named in lock scripts) and
//! decides which hash each kind of signature covers.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use asset_ledger_core::{
    verify, AssetMintTransaction, AssetScheme, AssetTransferTransaction, EcdsaSignature,
    NetworkId, Transaction, H256, H512,
};
use asset_ledger_keystore::{KeyId, KeyStore, MemoryKeyStore};

use crate::error::Result;

/// Configuration for Custody.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustodyConfig {
    /// Network stamped on schemes derived from mints.
    pub network_id: NetworkId,
    /// Sign transfer inputs over the hash with scripts emptied.
    ///
    /// When off, inputs are signed over the full transaction hash.
    pub sign_without_script: bool,
}

impl Default for CustodyConfig {
    fn default() -> Self {
        Self {
            network_id: NetworkId::default(),
            sign_without_script: true,
        }
    }
}

/// Platform and asset key stores behind one signing API.
pub struct Custody<P: KeyStore, A: KeyStore> {
    platform: Arc<P>,
    asset: Arc<A>,
    config: CustodyConfig,
}

impl Custody<MemoryKeyStore, MemoryKeyStore> {
    /// Custody over two fresh in-memory stores.
    pub fn in_memory(config: CustodyConfig) -> Self {
        Self::new(MemoryKeyStore::platform(), MemoryKeyStore::asset(), config)
    }
}

impl<P: KeyStore, A: KeyStore> Custody<P, A> {
    pub fn new(platform: P, asset: A, config: CustodyConfig) -> Self {
        Self {
            platform: Arc::new(platform),
            asset: Arc::new(asset),
            config,
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn config(&self) -> &CustodyConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Keys
    // ─────────────────────────────────────────────────────────────────────────

    /// Generate a platform account key.
    pub async fn create_platform_key(&self, passphrase: Option<&str>) -> Result<KeyId> {
        Ok(self.platform.create_key(passphrase).await?)
    }

    /// Generate an asset lock key.
    pub async fn create_asset_key(&self, passphrase: Option<&str>) -> Result<KeyId> {
        Ok(self.asset.create_key(passphrase).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Signing
    // ─────────────────────────────────────────────────────────────────────────

    /// Sign a transaction's hash with a platform key.
    ///
    /// Returns `None` if the platform store has no such key.
    pub async fn sign_transaction(
        &self,
        id: &KeyId,
        tx: &Transaction,
        passphrase: Option<&str>,
    ) -> Result<Option<EcdsaSignature>> {
        let hash = tx.hash();
        let signature = self.platform.sign(id, &hash, passphrase).await?;
        if signature.is_some() {
            info!(key_id = %id, kind = ?tx.kind(), hash = ?hash, "signed transaction");
        }
        Ok(signature)
    }

    /// Sign a transfer on behalf of one of its inputs with an asset key.
    ///
    /// Returns `None` if the asset store has no such key.
    pub async fn sign_transfer_input(
        &self,
        id: &KeyId,
        tx: &AssetTransferTransaction,
        passphrase: Option<&str>,
    ) -> Result<Option<EcdsaSignature>> {
        let message = self.transfer_signing_hash(tx);
        let signature = self.asset.sign(id, &message, passphrase).await?;
        if signature.is_some() {
            debug!(key_id = %id, hash = ?message, "signed transfer input");
        }
        Ok(signature)
    }

    /// The hash a transfer input signature covers under this config.
    pub fn transfer_signing_hash(&self, tx: &AssetTransferTransaction) -> H256 {
        if self.config.sign_without_script {
            tx.hash_without_script()
        } else {
            tx.hash()
        }
    }

    /// Check a platform signature over a transaction.
    pub fn verify_transaction(
        &self,
        public: &H512,
        tx: &Transaction,
        signature: &EcdsaSignature,
    ) -> Result<bool> {
        Ok(verify(public, &tx.hash(), signature)?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Schemes
    // ─────────────────────────────────────────────────────────────────────────

    /// The scheme a mint registers on the configured network.
    pub fn asset_scheme_of(&self, mint: &AssetMintTransaction) -> AssetScheme {
        mint.asset_scheme(self.config.network_id)
    }
}
