//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bytes::Bytes;

use asset_ledger_core::{
    AssetMintBuilder, AssetMintTransaction, AssetTransferInput, AssetTransferOutput,
    AssetTransferTransaction, H256, U256,
};
use asset_ledger_keystore::{KeyId, KeyStore, MemoryKeyStore};

/// Lock script hash used for every asset the fixtures create.
pub const FIXTURE_LOCK_SCRIPT_HASH: H256 = H256([0x5f; 32]);

/// A test fixture with one platform and one asset key store.
pub struct TestFixture {
    pub platform: MemoryKeyStore,
    pub asset: MemoryKeyStore,
}

impl TestFixture {
    /// Create a new test fixture with empty stores.
    pub fn new() -> Self {
        Self {
            platform: MemoryKeyStore::platform(),
            asset: MemoryKeyStore::asset(),
        }
    }

    /// Create an asset key and a capped mint locked to it.
    ///
    /// The key id is the mint's only lock script parameter.
    pub async fn mint_to_new_key(
        &self,
        metadata: &str,
        amount: u64,
    ) -> (KeyId, AssetMintTransaction) {
        let id = self
            .asset
            .create_key(None)
            .await
            .expect("in-memory key creation");
        let mint = AssetMintBuilder::new(FIXTURE_LOCK_SCRIPT_HASH)
            .metadata(metadata)
            .parameter(key_parameter(&id))
            .amount(amount)
            .build();
        (id, mint)
    }

    /// A transfer spending everything `mint` created to `recipient`.
    pub fn spend_mint(&self, mint: &AssetMintTransaction, recipient: &KeyId) -> AssetTransferTransaction {
        let asset = mint.minted_asset().expect("fixture mints are capped");
        AssetTransferTransaction::new(
            vec![],
            vec![AssetTransferInput::new(asset.outpoint, Bytes::new(), Bytes::new())],
            vec![AssetTransferOutput {
                lock_script_hash: FIXTURE_LOCK_SCRIPT_HASH,
                parameters: vec![key_parameter(recipient)],
                asset_type: asset.asset_type,
                amount: asset.amount,
            }],
        )
    }

    /// A transfer splitting a minted asset into `parts` outputs.
    ///
    /// # Panics
    ///
    /// Panics if `parts` is zero.
    pub fn split_mint(&self, mint: &AssetMintTransaction, parts: u64) -> AssetTransferTransaction {
        assert!(parts > 0, "cannot split an asset into zero outputs");
        let asset = mint.minted_asset().expect("fixture mints are capped");
        let total = asset.amount.to_u64().expect("fixture amounts fit in u64");
        let outputs = (0..parts)
            .map(|i| {
                let share = total / parts + u64::from(i < total % parts);
                AssetTransferOutput {
                    lock_script_hash: FIXTURE_LOCK_SCRIPT_HASH,
                    parameters: vec![],
                    asset_type: asset.asset_type,
                    amount: U256::from(share),
                }
            })
            .collect();
        AssetTransferTransaction::new(
            vec![],
            vec![AssetTransferInput::new(asset.outpoint, Bytes::new(), Bytes::new())],
            outputs,
        )
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count).map(|_| TestFixture::new()).collect()
}

fn key_parameter(id: &KeyId) -> Bytes {
    Bytes::from(hex::decode(id.as_str()).expect("standard key ids are hex"))
}
