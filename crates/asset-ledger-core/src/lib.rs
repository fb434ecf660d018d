//! # Asset Ledger Core
//!
//! Pure primitives for the Asset Ledger: identifiers, canonical encoding,
//! hashing, address derivation and the transaction model.
//!
//! This crate contains no I/O, no storage, no key material. It is pure
//! computation over transaction records.
//!
//! ## Key Types
//!
//! - [`Transaction`] - Tagged union of every ledger transaction
//! - [`AssetMintTransaction`] - Registers an asset scheme and mints its first asset
//! - [`AssetTransferTransaction`] - Moves assets between lock scripts
//! - [`AssetScheme`] - Registration record of an asset type
//! - [`H160`], [`H256`], [`H512`], [`U256`] - Fixed-width identifiers and quantities
//!
//! ## Canonicalization
//!
//! All transactions are encoded with RLP through the `rlp` crate; every
//! transaction type implements `Encodable` and `Decodable`. See the
//! [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
mod json;
pub mod mint;
pub mod scheme;
pub mod transaction;
pub mod transfer;
pub mod types;

pub use rlp;

pub use canonical::{decode, decode_exact, encode, encode_list, Value, MAX_DEPTH};
pub use crypto::{
    asset_address, asset_scheme_address, blake160, blake256, blake256_with_key, recover_public,
    verify, EcdsaSignature,
};
pub use error::{CoreError, Result};
pub use mint::{AssetMintBuilder, AssetMintTransaction};
pub use scheme::{Asset, AssetOutPoint, AssetScheme};
pub use transaction::{Transaction, TransactionKind};
pub use transfer::{AssetTransferInput, AssetTransferOutput, AssetTransferTransaction};
pub use types::{NetworkId, H160, H256, H512, U256};
