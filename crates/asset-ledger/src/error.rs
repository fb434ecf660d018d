//! Error types for the custody facade.

use asset_ledger_core::CoreError;
use asset_ledger_keystore::KeyStoreError;
use thiserror::Error;

/// Errors that can occur during custody operations.
#[derive(Debug, Error)]
pub enum CustodyError {
    /// Encoding, decoding or primitive conversion error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Key store error, including passphrase mismatch.
    #[error("key store error: {0}")]
    KeyStore(#[from] KeyStoreError),
}

impl CustodyError {
    /// Whether this is a passphrase mismatch.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::KeyStore(KeyStoreError::Authentication(_)))
    }
}

/// Result type for custody operations.
pub type Result<T> = std::result::Result<T, CustodyError>;
