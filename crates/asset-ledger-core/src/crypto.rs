//! Cryptographic primitives for Asset Ledger.
//!
//! Wraps BLAKE2b hashing, keyed address derivation and the fixed-width
//! secp256k1 ECDSA signature form with strong types.

use blake2::digest::consts::{U20, U32};
use blake2::digest::{Digest, KeyInit, Mac};
use blake2::{Blake2b, Blake2bMac};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::{CoreError, Result};
use crate::types::{H160, H256, H512};

type Blake2b256 = Blake2b<U32>;
type Blake2b160 = Blake2b<U20>;
type Blake2b256Mac = Blake2bMac<U32>;

/// Keyed-hash mask for asset scheme addresses.
pub const ASSET_SCHEME_ADDRESS_MASK: [u8; 16] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
];

/// Keyed-hash mask for asset addresses.
pub const ASSET_ADDRESS_MASK: [u8; 16] = [0x00; 16];

/// Leading bytes written over an asset scheme address (`5300000000000000`).
pub const ASSET_SCHEME_ADDRESS_PREFIX: [u8; 8] = [0x53, 0, 0, 0, 0, 0, 0, 0];

/// Leading bytes written over an asset address (`4100000000000000`).
pub const ASSET_ADDRESS_PREFIX: [u8; 8] = [0x41, 0, 0, 0, 0, 0, 0, 0];

/// BLAKE2b with a 32-byte digest.
pub fn blake256(data: impl AsRef<[u8]>) -> H256 {
    H256(Blake2b256::digest(data.as_ref()).into())
}

/// BLAKE2b with a 20-byte digest.
pub fn blake160(data: impl AsRef<[u8]>) -> H160 {
    H160(Blake2b160::digest(data.as_ref()).into())
}

/// Keyed BLAKE2b with a 32-byte digest.
///
/// Keys longer than 64 bytes are rejected.
pub fn blake256_with_key(data: impl AsRef<[u8]>, key: &[u8]) -> Result<H256> {
    let mut mac = <Blake2b256Mac as KeyInit>::new_from_slice(key)
        .map_err(|_| CoreError::conversion(format!("BLAKE2b key of {} bytes", key.len())))?;
    mac.update(data.as_ref());
    Ok(H256(mac.finalize().into_bytes().into()))
}

/// Derive the asset scheme address registered by a mint transaction.
pub fn asset_scheme_address(tx_hash: &H256) -> H256 {
    masked_address(tx_hash, &ASSET_SCHEME_ADDRESS_MASK, &ASSET_SCHEME_ADDRESS_PREFIX)
}

/// Derive the address of the asset created by a mint transaction.
pub fn asset_address(tx_hash: &H256) -> H256 {
    masked_address(tx_hash, &ASSET_ADDRESS_MASK, &ASSET_ADDRESS_PREFIX)
}

fn masked_address(tx_hash: &H256, mask: &[u8; 16], prefix: &[u8; 8]) -> H256 {
    // 16-byte masks are always within the 64-byte key limit.
    let mut address = blake256_with_key(tx_hash, mask).expect("16-byte BLAKE2b key");
    address.0[..prefix.len()].copy_from_slice(prefix);
    address
}

/// A 65-byte recoverable ECDSA signature: `r (32) || s (32) || v (1)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EcdsaSignature(pub [u8; 65]);

impl EcdsaSignature {
    /// Wire length.
    pub const LEN: usize = 65;

    /// Assemble from components.
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        let mut bytes = [0u8; 65];
        bytes[..32].copy_from_slice(&r);
        bytes[32..64].copy_from_slice(&s);
        bytes[64] = v;
        Self(bytes)
    }

    /// Assemble from a k256 signature and its recovery id.
    pub fn from_recoverable(signature: &Signature, recovery_id: RecoveryId) -> Self {
        let mut bytes = [0u8; 65];
        bytes[..64].copy_from_slice(&signature.to_bytes());
        bytes[64] = recovery_id.to_byte();
        Self(bytes)
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }

    /// Create from a 65-byte buffer.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes: [u8; 65] = slice.try_into().map_err(|_| {
            CoreError::conversion(format!("signature expects 65 bytes, got {}", slice.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        Self::from_slice(&hex::decode(digits)?)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 65] {
        &self.0
    }

    /// The r component.
    pub fn r(&self) -> &[u8] {
        &self.0[..32]
    }

    /// The s component.
    pub fn s(&self) -> &[u8] {
        &self.0[32..64]
    }

    /// The recovery id.
    pub fn v(&self) -> u8 {
        self.0[64]
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    fn split(&self) -> Result<(Signature, RecoveryId)> {
        let signature =
            Signature::from_slice(&self.0[..64]).map_err(|_| CoreError::InvalidSignature)?;
        let recovery_id = RecoveryId::from_byte(self.v()).ok_or(CoreError::InvalidSignature)?;
        Ok((signature, recovery_id))
    }
}

impl fmt::Debug for EcdsaSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EcdsaSig({}...)", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for EcdsaSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 65]> for EcdsaSignature {
    fn from(bytes: [u8; 65]) -> Self {
        Self(bytes)
    }
}

impl Serialize for EcdsaSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", self.to_hex()))
    }
}

impl<'de> Deserialize<'de> for EcdsaSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(de::Error::custom)
    }
}

/// The 64-byte public key form: uncompressed SEC1 point without the tag byte.
pub fn public_from_verifying_key(key: &VerifyingKey) -> H512 {
    let point = key.to_encoded_point(false);
    let mut public = [0u8; 64];
    public.copy_from_slice(&point.as_bytes()[1..]);
    H512(public)
}

fn verifying_key_from_public(public: &H512) -> Result<VerifyingKey> {
    let mut sec1 = [0u8; 65];
    sec1[0] = 0x04;
    sec1[1..].copy_from_slice(public.as_bytes());
    VerifyingKey::from_sec1_bytes(&sec1)
        .map_err(|_| CoreError::conversion("not a point on secp256k1"))
}

/// Recover the signer's public key from a message hash and signature.
pub fn recover_public(message: &H256, signature: &EcdsaSignature) -> Result<H512> {
    let (sig, recovery_id) = signature.split()?;
    let key = VerifyingKey::recover_from_prehash(message.as_bytes(), &sig, recovery_id)
        .map_err(|_| CoreError::InvalidSignature)?;
    Ok(public_from_verifying_key(&key))
}

/// Check that `signature` over `message` was produced by `public`.
pub fn verify(public: &H512, message: &H256, signature: &EcdsaSignature) -> Result<bool> {
    let key = verifying_key_from_public(public)?;
    let (sig, _) = signature.split()?;
    if key.verify_prehash(message.as_bytes(), &sig).is_err() {
        return Ok(false);
    }
    Ok(recover_public(message, signature)? == *public)
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::ecdsa::SigningKey;

    fn sign(key: &SigningKey, message: &H256) -> EcdsaSignature {
        let (sig, recovery_id) = key.sign_prehash_recoverable(message.as_bytes()).unwrap();
        EcdsaSignature::from_recoverable(&sig, recovery_id)
    }

    #[test]
    fn test_blake256_known_vector() {
        // BLAKE2b-256 of the empty string
        assert_eq!(
            blake256(b"").to_hex(),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_blake_deterministic() {
        assert_eq!(blake256(b"test"), blake256(b"test"));
        assert_ne!(blake256(b"test"), blake256(b"different"));
        assert_eq!(blake160(b"test"), blake160(b"test"));
    }

    #[test]
    fn test_keyed_hash_separates_domains() {
        let data = blake256(b"tx");
        let a = blake256_with_key(data, &ASSET_ADDRESS_MASK).unwrap();
        let b = blake256_with_key(data, &ASSET_SCHEME_ADDRESS_MASK).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, blake256(data));
    }

    #[test]
    fn test_keyed_hash_rejects_oversized_key() {
        assert!(blake256_with_key(b"x", &[0u8; 65]).is_err());
    }

    #[test]
    fn test_address_prefixes() {
        let tx_hash = blake256(b"some transaction");
        let scheme = asset_scheme_address(&tx_hash);
        let asset = asset_address(&tx_hash);
        assert!(scheme.to_hex().starts_with("5300000000000000"));
        assert!(asset.to_hex().starts_with("4100000000000000"));

        let raw = blake256_with_key(tx_hash, &ASSET_ADDRESS_MASK).unwrap();
        assert_eq!(&asset.0[8..], &raw.0[8..]);
    }

    #[test]
    fn test_sign_recover_verify() {
        let key = SigningKey::random(&mut rand::rngs::OsRng);
        let public = public_from_verifying_key(key.verifying_key());
        let message = blake256(b"hello world");
        let signature = sign(&key, &message);

        assert_eq!(recover_public(&message, &signature).unwrap(), public);
        assert!(verify(&public, &message, &signature).unwrap());

        let tampered = blake256(b"hello worlD");
        assert!(!verify(&public, &tampered, &signature).unwrap());
    }

    #[test]
    fn test_invalid_recovery_id() {
        let mut bytes = [0x11u8; 65];
        bytes[64] = 9;
        let signature = EcdsaSignature::from_bytes(bytes);
        assert!(matches!(
            recover_public(&H256::ZERO, &signature),
            Err(CoreError::InvalidSignature)
        ));
    }

    #[test]
    fn test_signature_hex_roundtrip() {
        let signature = EcdsaSignature::new([0x01; 32], [0x02; 32], 1);
        let parsed = EcdsaSignature::from_hex(&signature.to_hex()).unwrap();
        assert_eq!(parsed, signature);
        assert_eq!(parsed.v(), 1);
        assert!(EcdsaSignature::from_slice(&[0u8; 64]).is_err());
    }
}
