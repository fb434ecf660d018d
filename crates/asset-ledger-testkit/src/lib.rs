//! # Asset Ledger Testkit
//!
//! Testing utilities for the Asset Ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Mint transactions with pinned canonical bytes, hashes and addresses
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Key stores and transaction chains for integration tests
//!
//! ## Golden Vectors
//!
//! ```rust
//! use asset_ledger_testkit::vectors::{all_vectors, mint_from_vector};
//!
//! for vector in all_vectors() {
//!     let mint = mint_from_vector(&vector);
//!     assert_eq!(mint.hash().to_hex(), vector.expected_hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use asset_ledger_testkit::generators::{mint_from_params, MintParams};
//!
//! proptest! {
//!     #[test]
//!     fn mint_hash_is_deterministic(params: MintParams) {
//!         prop_assert_eq!(mint_from_params(&params).hash(), mint_from_params(&params).hash());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, TestFixture, FIXTURE_LOCK_SCRIPT_HASH};
pub use generators::{mint_from_params, MintParams};
pub use vectors::{all_vectors, mint_from_vector, verify_all_vectors, GoldenVector};
