//! KeyStore trait: the abstract interface for key custody.
//!
//! Private keys never cross this interface. Callers see key identifiers,
//! public keys and signatures.

use async_trait::async_trait;
use asset_ledger_core::{EcdsaSignature, H256, H512};

use crate::error::Result;
use crate::mapping::KeyId;

/// Passphrase assumed when a caller supplies none.
pub const DEFAULT_PASSPHRASE: &str = "";

/// The KeyStore trait: async interface for key generation and signing.
///
/// # Design Notes
///
/// - **Not-found is not an error**: unknown identifiers yield `false` or `None`.
/// - **Passphrase gate**: signing with a passphrase other than the one given
///   at creation fails with `Authentication`. A missing passphrase means
///   [`DEFAULT_PASSPHRASE`].
/// - **Atomic per key**: create, remove and sign on one identifier are
///   serialized against each other.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// Identifiers of every stored key.
    async fn list_keys(&self) -> Result<Vec<KeyId>>;

    /// Generate a fresh key pair and return its identifier.
    async fn create_key(&self, passphrase: Option<&str>) -> Result<KeyId>;

    /// Delete a key. Returns `false` if the key was unknown.
    async fn remove_key(&self, id: &KeyId) -> Result<bool>;

    /// The 64-byte public key, or `None` if the key is unknown.
    async fn get_public_key(&self, id: &KeyId) -> Result<Option<H512>>;

    /// Sign a 32-byte message hash.
    ///
    /// Returns `None` if the key is unknown.
    async fn sign(
        &self,
        id: &KeyId,
        message: &H256,
        passphrase: Option<&str>,
    ) -> Result<Option<EcdsaSignature>>;

    /// Whether a key with this identifier is stored.
    async fn has_key(&self, id: &KeyId) -> Result<bool> {
        Ok(self.get_public_key(id).await?.is_some())
    }
}
