//! Key identifier mappings.
//!
//! A key store never hands out private keys. Callers address keys by a
//! [`KeyId`] computed from the public key by an injected [`KeyMapping`].
//! Two mappings ship with the crate, one per namespace:
//!
//! - [`PlatformMapping`]: the platform account id, `blake160(public)`
//! - [`AssetMapping`]: the public key hash, `blake256(public)`
//!
//! The digests differ in width, so one public key never maps to the same
//! identifier in both namespaces.

use std::fmt;

use asset_ledger_core::{blake160, blake256, H512};

/// Caller-visible identifier of a stored key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId(String);

impl KeyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyId({})", self.0)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for KeyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for KeyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Maps a public key to the identifier callers use for it.
///
/// Must be deterministic: the same public key always yields the same id.
pub trait KeyMapping: Send + Sync {
    /// Namespace name, used in log fields.
    fn namespace(&self) -> &str;

    fn key_id(&self, public: &H512) -> KeyId;
}

/// Platform accounts: `blake160` of the public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformMapping;

impl KeyMapping for PlatformMapping {
    fn namespace(&self) -> &str {
        "platform"
    }

    fn key_id(&self, public: &H512) -> KeyId {
        KeyId(blake160(public).to_hex())
    }
}

/// Asset lock keys: `blake256` of the public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetMapping;

impl KeyMapping for AssetMapping {
    fn namespace(&self) -> &str {
        "asset"
    }

    fn key_id(&self, public: &H512) -> KeyId {
        KeyId(blake256(public).to_hex())
    }
}

/// Any deterministic function can serve as a mapping.
pub struct FnMapping<F> {
    namespace: String,
    f: F,
}

impl<F> FnMapping<F>
where
    F: Fn(&H512) -> KeyId + Send + Sync,
{
    pub fn new(namespace: impl Into<String>, f: F) -> Self {
        Self {
            namespace: namespace.into(),
            f,
        }
    }
}

impl<F> KeyMapping for FnMapping<F>
where
    F: Fn(&H512) -> KeyId + Send + Sync,
{
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn key_id(&self, public: &H512) -> KeyId {
        (self.f)(public)
    }
}
