//! # Asset Ledger
//!
//! The unified API for asset transactions: canonical encoding, content
//! hashing, address derivation and signing with custodied keys.
//!
//! ## Overview
//!
//! - **Transactions**: Mints register an asset scheme, transfers move assets
//! - **Canonical bytes**: RLP over an ordered field list, tag first
//! - **Addresses**: Mints derive a scheme address and an asset address from
//!   their hash by keyed BLAKE2b
//! - **Custody**: Keys are generated and held by key stores, one per
//!   namespace, and sign behind a passphrase gate
//!
//! ## Usage
//!
//! ```rust,no_run
//! use asset_ledger::{AssetMintBuilder, Custody, CustodyConfig, Transaction, H256};
//!
//! async fn example() {
//!     let custody = Custody::in_memory(CustodyConfig::default());
//!     let payer = custody.create_platform_key(Some("pw")).await.unwrap();
//!
//!     let mint = AssetMintBuilder::new(H256::ZERO)
//!         .metadata("gold")
//!         .amount(1_000u64)
//!         .build();
//!     println!("scheme address: {:#x}", mint.asset_scheme_address());
//!
//!     let tx = Transaction::from(mint);
//!     let signature = custody.sign_transaction(&payer, &tx, Some("pw")).await.unwrap();
//!     assert!(signature.is_some());
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `asset_ledger::core` - Primitives, encoding and transactions
//! - `asset_ledger::keystore` - Key stores and identifier mappings

pub mod custody;
pub mod error;

// Re-export component crates
pub use asset_ledger_core as core;
pub use asset_ledger_keystore as keystore;

// Re-export main types for convenience
pub use custody::{Custody, CustodyConfig};
pub use error::{CustodyError, Result};

// Re-export commonly used core types
pub use asset_ledger_core::{
    Asset, AssetMintBuilder, AssetMintTransaction, AssetOutPoint, AssetScheme,
    AssetTransferInput, AssetTransferOutput, AssetTransferTransaction, CoreError, EcdsaSignature,
    NetworkId, Transaction, TransactionKind, H160, H256, H512, U256,
};
pub use asset_ledger_keystore::{
    AssetMapping, KeyId, KeyMapping, KeyStore, KeyStoreError, MemoryKeyStore, PlatformMapping,
};
