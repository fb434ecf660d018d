//! # Asset Ledger Key Store
//!
//! Key custody for the Asset Ledger. Keys are generated inside a store,
//! addressed by identifiers derived from their public keys, and used to sign
//! 32-byte message hashes behind a passphrase gate.
//!
//! ## Key Types
//!
//! - [`KeyStore`] - The async trait for all custody operations
//! - [`MemoryKeyStore`] - In-memory store, one instance per namespace
//! - [`KeyMapping`] - Strategy turning a public key into a [`KeyId`]
//! - [`PlatformMapping`] / [`AssetMapping`] - The two standard namespaces
//!
//! ## Usage
//!
//! ```rust,no_run
//! use asset_ledger_keystore::{KeyStore, MemoryKeyStore};
//! use asset_ledger_core::blake256;
//!
//! async fn example() {
//!     let platform = MemoryKeyStore::platform();
//!     let id = platform.create_key(Some("passphrase")).await.unwrap();
//!
//!     let message = blake256(b"payload");
//!     let signature = platform.sign(&id, &message, Some("passphrase")).await.unwrap();
//!     assert!(signature.is_some());
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Confinement**: private keys never leave the store
//! - **Not-found is absence**: unknown identifiers yield `false` or `None`
//! - **Namespaces by injection**: platform and asset stores share one
//!   implementation and differ only in their [`KeyMapping`]

pub mod error;
pub mod mapping;
pub mod memory;
pub mod traits;

pub use error::{KeyStoreError, Result};
pub use mapping::{AssetMapping, FnMapping, KeyId, KeyMapping, PlatformMapping};
pub use memory::MemoryKeyStore;
pub use traits::{KeyStore, DEFAULT_PASSPHRASE};
