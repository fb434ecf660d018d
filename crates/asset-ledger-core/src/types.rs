//! Strong type definitions for Asset Ledger.
//!
//! Fixed-width identifiers are `fixed-hash` types with RLP and serde support
//! from `impl-rlp`/`impl-serde`; on the serde boundary they carry a `0x`
//! prefix. Hex parsing here reports [`CoreError::Conversion`].

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Strip an optional `0x`/`0X` prefix.
fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

macro_rules! fixed_hash {
    ($(#[$doc:meta])* $name:ident, $len:expr) => {
        fixed_hash::construct_fixed_hash! {
            $(#[$doc])*
            pub struct $name($len);
        }

        // Scope the foreign impl macros away from the crate `Result` alias,
        // which they would otherwise pick up unqualified.
        const _: () = {
            #[allow(unused_imports)]
            use std::result::Result;
            impl_rlp::impl_fixed_hash_rlp!($name, $len);
            impl_serde::impl_fixed_hash_serde!($name, $len);
        };

        impl $name {
            /// Width in bytes.
            pub const LEN: usize = $len;

            /// The all-zero value.
            pub const ZERO: Self = Self([0u8; $len]);

            /// Create from raw bytes.
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// Create from a byte buffer of exactly the declared width.
            pub fn try_from_slice(slice: &[u8]) -> Result<Self> {
                if slice.len() != $len {
                    return Err(CoreError::conversion(format!(
                        "{} expects {} bytes, got {}",
                        stringify!($name),
                        $len,
                        slice.len()
                    )));
                }
                let mut arr = [0u8; $len];
                arr.copy_from_slice(slice);
                Ok(Self(arr))
            }

            /// Parse from hex, with or without a `0x` prefix.
            pub fn from_hex(s: &str) -> Result<Self> {
                let bytes = hex::decode(strip_hex_prefix(s))?;
                Self::try_from_slice(&bytes)
            }

            /// Convert to lowercase hex (no prefix).
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }
        }
    };
}

fixed_hash!(
    /// A 20-byte identifier (account ids, registrars).
    H160,
    20
);

fixed_hash!(
    /// A 32-byte identifier (transaction hashes, lock script hashes, addresses).
    H256,
    32
);

fixed_hash!(
    /// A 64-byte identifier (uncompressed secp256k1 public keys without the tag byte).
    H512,
    64
);

/// Identifies a ledger network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NetworkId(pub u16);

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl NetworkId {
    /// Build from a two-letter code such as `b"tc"`.
    pub const fn from_code(code: [u8; 2]) -> Self {
        Self(u16::from_be_bytes(code))
    }

    pub const fn code(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

/// `tc`, the test network.
impl Default for NetworkId {
    fn default() -> Self {
        Self::from_code(*b"tc")
    }
}

impl From<u16> for NetworkId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

/// An unbounded non-negative integer.
///
/// Stored as minimal big-endian bytes: no leading zeros, and zero is the
/// empty buffer. This is exactly the form the canonical encoder emits.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct U256(Vec<u8>);

impl U256 {
    /// Zero.
    pub const fn zero() -> Self {
        Self(Vec::new())
    }

    /// Whether this is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Build from big-endian bytes. Leading zeros are dropped.
    pub fn from_be_slice(bytes: &[u8]) -> Self {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        Self(bytes[start..].to_vec())
    }

    /// Minimal big-endian bytes (empty for zero).
    pub fn to_be_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Narrow to `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        if self.0.len() > 8 {
            return None;
        }
        Some(self.0.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }

    /// Parse hex, with or without a `0x` prefix. Odd digit counts are allowed.
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = strip_hex_prefix(s);
        if digits.is_empty() {
            return Err(CoreError::conversion("empty hex quantity"));
        }
        let bytes = if digits.len() % 2 == 1 {
            hex::decode(format!("0{}", digits))?
        } else {
            hex::decode(digits)?
        };
        Ok(Self::from_be_slice(&bytes))
    }

    /// `0x`-prefixed hex without leading zero digits (`0x0` for zero).
    pub fn to_hex(&self) -> String {
        if self.is_zero() {
            return "0x0".to_string();
        }
        let digits = hex::encode(&self.0);
        format!("0x{}", digits.trim_start_matches('0'))
    }

    /// Parse a base-10 string.
    pub fn from_dec_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(CoreError::conversion("empty decimal quantity"));
        }
        let mut acc: Vec<u8> = Vec::new();
        for c in s.chars() {
            let digit = c
                .to_digit(10)
                .ok_or_else(|| CoreError::conversion(format!("invalid decimal digit {:?}", c)))?;
            mul_add_small(&mut acc, 10, digit as u8);
        }
        Ok(Self::from_be_slice(&acc))
    }

    /// Parse either `0x`-prefixed hex or base-10.
    pub fn parse(s: &str) -> Result<Self> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_dec_str(s)
        }
    }

    /// Convert a loosely-typed JSON value (number or string).
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Number(n) => match n.as_u64() {
                Some(v) => Ok(Self::from(v)),
                None => Err(CoreError::conversion(format!(
                    "{} is not a non-negative integer",
                    n
                ))),
            },
            serde_json::Value::String(s) => Self::parse(s),
            other => Err(CoreError::conversion(format!(
                "expected number or string, got {}",
                other
            ))),
        }
    }
}

/// `acc = acc * mul + add` over big-endian bytes.
fn mul_add_small(acc: &mut Vec<u8>, mul: u8, add: u8) {
    let mut carry = add as u16;
    for byte in acc.iter_mut().rev() {
        let v = (*byte as u16) * (mul as u16) + carry;
        *byte = (v & 0xff) as u8;
        carry = v >> 8;
    }
    while carry > 0 {
        acc.insert(0, (carry & 0xff) as u8);
        carry >>= 8;
    }
}

impl Ord for U256 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for U256 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U256({})", self)
    }
}

impl fmt::Display for U256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut digits = Vec::new();
        let mut n = self.0.clone();
        while !n.is_empty() {
            let mut rem = 0u16;
            let mut quotient = Vec::with_capacity(n.len());
            for &byte in &n {
                let cur = (rem << 8) | byte as u16;
                let q = (cur / 10) as u8;
                rem = cur % 10;
                if !(quotient.is_empty() && q == 0) {
                    quotient.push(q);
                }
            }
            digits.push(b'0' + rem as u8);
            n = quotient;
        }
        digits.reverse();
        f.write_str(&String::from_utf8_lossy(&digits))
    }
}

impl FromStr for U256 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

macro_rules! u256_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for U256 {
                fn from(v: $t) -> Self {
                    Self::from_be_slice(&v.to_be_bytes())
                }
            }
        )*
    };
}

u256_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl TryFrom<i64> for U256 {
    type Error = CoreError;

    fn try_from(v: i64) -> Result<Self> {
        u64::try_from(v)
            .map(Self::from)
            .map_err(|_| CoreError::conversion(format!("{} is negative", v)))
    }
}

impl TryFrom<i128> for U256 {
    type Error = CoreError;

    fn try_from(v: i128) -> Result<Self> {
        u128::try_from(v)
            .map(Self::from)
            .map_err(|_| CoreError::conversion(format!("{} is negative", v)))
    }
}

impl TryFrom<f64> for U256 {
    type Error = CoreError;

    fn try_from(v: f64) -> Result<Self> {
        if !v.is_finite() || v < 0.0 || v.fract() != 0.0 || v > u64::MAX as f64 {
            return Err(CoreError::conversion(format!("{} is not a u64 integer", v)));
        }
        Ok(Self::from(v as u64))
    }
}

/// Minimal big-endian bytes, so zero is the empty string.
impl Encodable for U256 {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.encoder().encode_value(&self.0);
    }
}

impl Decodable for U256 {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        rlp.decoder().decode_value(|bytes| match bytes.first() {
            Some(0) => Err(DecoderError::RlpInvalidIndirection),
            _ => Ok(U256(bytes.to_vec())),
        })
    }
}

impl Serialize for U256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for U256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct U256Visitor;

        impl<'de> Visitor<'de> for U256Visitor {
            type Value = U256;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or a hex/decimal string")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<U256, E> {
                Ok(U256::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<U256, E> {
                U256::try_from(v).map_err(E::custom)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<U256, E> {
                U256::parse(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(U256Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_h256_hex_roundtrip() {
        let id = H256::from_bytes([0x42; 32]);
        let recovered = H256::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, recovered);

        let prefixed = H256::from_hex(&format!("0x{}", id.to_hex())).unwrap();
        assert_eq!(id, prefixed);
    }

    #[test]
    fn test_hex_is_normalized_lowercase() {
        let upper = "AB".repeat(20);
        let id = H160::from_hex(&upper).unwrap();
        assert_eq!(id.to_hex(), "ab".repeat(20));
        assert_eq!(format!("{:x}", id), id.to_hex());
        assert_eq!(id, H160::from_hex(&"ab".repeat(20)).unwrap());
    }

    #[test]
    fn test_wrong_width_is_conversion_error() {
        assert!(matches!(
            H256::from_hex("0x00"),
            Err(CoreError::Conversion(_))
        ));
        assert!(matches!(
            H160::try_from_slice(&[0u8; 21]),
            Err(CoreError::Conversion(_))
        ));
        assert!(matches!(
            H512::from_hex("zz"),
            Err(CoreError::Conversion(_))
        ));
    }

    #[test]
    fn test_h256_alternate_hex() {
        let id = H256::from_bytes([0xcd; 32]);
        assert_eq!(format!("{:#x}", id), format!("0x{}", "cd".repeat(32)));
    }

    #[test]
    fn test_fixed_hash_rlp() {
        let id = H160::from_bytes([0x07; 20]);
        let encoded = rlp::encode(&id);
        assert_eq!(encoded[0], 0x80 + 20);
        assert_eq!(rlp::decode::<H160>(&encoded).unwrap(), id);
        assert!(rlp::decode::<H256>(&encoded).is_err());
    }

    #[test]
    fn test_h160_serde_prefixed() {
        let id = H160::from_bytes([0x01; 20]);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "01".repeat(20)));
        let back: H160 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_network_id_code() {
        assert_eq!(NetworkId::default(), NetworkId(0x7463));
        assert_eq!(&NetworkId::default().code(), b"tc");
    }

    #[test]
    fn test_u256_minimal_bytes() {
        assert!(U256::zero().to_be_bytes().is_empty());
        assert!(U256::from(0u64).to_be_bytes().is_empty());
        assert_eq!(U256::from(1u64).to_be_bytes(), &[0x01]);
        assert_eq!(U256::from(0x0100u64).to_be_bytes(), &[0x01, 0x00]);
        assert_eq!(U256::from_be_slice(&[0, 0, 7]).to_be_bytes(), &[7]);
    }

    #[test]
    fn test_u256_decimal() {
        let big = "340282366920938463463374607431768211456"; // 2^128
        let n = U256::from_dec_str(big).unwrap();
        let mut expected = vec![1u8];
        expected.extend_from_slice(&[0u8; 16]);
        assert_eq!(n.to_be_bytes(), expected.as_slice());
        assert_eq!(n.to_string(), big);
        assert_eq!(U256::from(1234567890u64).to_string(), "1234567890");
        assert_eq!(U256::zero().to_string(), "0");
    }

    #[test]
    fn test_u256_hex() {
        assert_eq!(U256::from(255u64).to_hex(), "0xff");
        assert_eq!(U256::from(256u64).to_hex(), "0x100");
        assert_eq!(U256::zero().to_hex(), "0x0");
        assert_eq!(U256::from_hex("0x100").unwrap(), U256::from(256u64));
        assert_eq!(U256::from_hex("0x0").unwrap(), U256::zero());
    }

    #[test]
    fn test_u256_out_of_range_natives() {
        assert!(matches!(U256::try_from(-1i64), Err(CoreError::Conversion(_))));
        assert!(matches!(U256::try_from(1.5f64), Err(CoreError::Conversion(_))));
        assert!(matches!(U256::try_from(-2.0f64), Err(CoreError::Conversion(_))));
        assert_eq!(U256::try_from(42i64).unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_u256_from_json() {
        use serde_json::json;
        assert_eq!(U256::from_json(&json!(10)).unwrap(), U256::from(10u64));
        assert_eq!(U256::from_json(&json!("0x0a")).unwrap(), U256::from(10u64));
        assert_eq!(U256::from_json(&json!("10")).unwrap(), U256::from(10u64));
        assert!(U256::from_json(&json!(-3)).is_err());
        assert!(U256::from_json(&json!(true)).is_err());
    }

    #[test]
    fn test_u256_rlp() {
        assert_eq!(rlp::encode(&U256::zero()).to_vec(), vec![0x80]);
        assert_eq!(rlp::encode(&U256::from(1024u64)).to_vec(), vec![0x82, 0x04, 0x00]);
        assert_eq!(rlp::decode::<U256>(&[0x82, 0x04, 0x00]).unwrap(), U256::from(1024u64));
        assert!(rlp::decode::<U256>(&[0x82, 0x00, 0x01]).is_err());
    }

    #[test]
    fn test_u256_serde() {
        let n: U256 = serde_json::from_str("\"0x100\"").unwrap();
        assert_eq!(n, U256::from(256u64));
        let n: U256 = serde_json::from_str("42").unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), "\"0x2a\"");
    }

    #[test]
    fn test_u256_ordering() {
        assert!(U256::from(255u64) < U256::from(256u64));
        assert!(U256::zero() < U256::from(1u64));
        assert_eq!(U256::from(7u64).to_u64(), Some(7));
    }
}
