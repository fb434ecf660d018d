//! Error types for the key store.

use asset_ledger_core::CoreError;
use thiserror::Error;

/// Errors that can occur during key store operations.
///
/// An unknown key identifier is not an error; lookups report it as absent.
#[derive(Debug, Error)]
pub enum KeyStoreError {
    /// The supplied passphrase does not match the one stored with the key.
    #[error("passphrase does not match key {0}")]
    Authentication(String),

    /// Key generation or signing failed inside the curve library.
    #[error("signing error: {0}")]
    Signing(String),

    /// A core primitive rejected its input.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for key store operations.
pub type Result<T> = std::result::Result<T, KeyStoreError>;
