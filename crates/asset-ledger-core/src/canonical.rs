//! Canonical RLP encoding for deterministic serialization.
//!
//! Transactions implement [`rlp::Encodable`]/[`rlp::Decodable`] and encode as
//! a list whose first item is the type tag. [`Value`] is the generic field
//! model used to inspect or hand-assemble the same bytes:
//! - Byte strings and integers are RLP data items; integers are minimal
//!   big-endian bytes and zero is the empty string
//! - Sequences are RLP lists
//!
//! Optional fields are an empty list when absent and a one-element list when
//! present, so presence is visible in the byte length.
//!
//! Decoding is strict: the input must be exactly one item, every list's items
//! must exactly fill its payload, and generic decoding stops at
//! [`MAX_DEPTH`] levels of nesting.
//!
//! **This encoding is the ledger wire format.** Changing it changes every hash.

use bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::error::{CoreError, Result};
use crate::types::{H160, H256, H512, U256};

/// Deepest list nesting [`decode`] will follow.
pub const MAX_DEPTH: usize = 32;

/// An encodable value.
///
/// The decoder only produces `Bytes` and `List`; `Uint` exists so callers can
/// hand integers to the encoder without pre-trimming them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A raw byte string.
    Bytes(Vec<u8>),
    /// A nested ordered sequence.
    List(Vec<Value>),
    /// An unsigned integer, encoded as minimal big-endian bytes.
    Uint(U256),
}

impl Value {
    /// A byte string.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(bytes.into())
    }

    /// A UTF-8 string as a byte string.
    pub fn text(s: &str) -> Self {
        Value::Bytes(s.as_bytes().to_vec())
    }

    /// An unsigned integer.
    pub fn uint(n: impl Into<U256>) -> Self {
        Value::Uint(n.into())
    }

    /// A fixed-width identifier by its raw bytes.
    pub fn fixed(id: impl AsRef<[u8]>) -> Self {
        Value::Bytes(id.as_ref().to_vec())
    }

    /// An empty list when absent, a one-element list when present.
    pub fn optional(value: Option<Value>) -> Self {
        Value::List(value.into_iter().collect())
    }

    /// The list children, or `None` for a byte string.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl Encodable for Value {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            Value::Bytes(bytes) => s.encoder().encode_value(bytes),
            Value::Uint(n) => n.rlp_append(s),
            Value::List(items) => append_list(s, items),
        }
    }
}

impl From<U256> for Value {
    fn from(n: U256) -> Self {
        Value::Uint(n)
    }
}

impl From<H160> for Value {
    fn from(id: H160) -> Self {
        Value::fixed(id)
    }
}

impl From<H256> for Value {
    fn from(id: H256) -> Self {
        Value::fixed(id)
    }
}

impl From<H512> for Value {
    fn from(id: H512) -> Self {
        Value::fixed(id)
    }
}

/// Encode a single value.
pub fn encode(value: &Value) -> Vec<u8> {
    rlp::encode(value).to_vec()
}

/// Encode an ordered field sequence as one list.
pub fn encode_list(fields: &[Value]) -> Vec<u8> {
    let mut s = RlpStream::new();
    append_list(&mut s, fields);
    s.out().to_vec()
}

/// Decode exactly one value spanning all of `bytes`.
///
/// Non-canonical forms are rejected: long prefixes for short payloads,
/// length fields with leading zeros, single small bytes wrapped in a string
/// prefix, trailing bytes, and nesting deeper than [`MAX_DEPTH`].
pub fn decode(bytes: &[u8]) -> Result<Value> {
    let rlp = Rlp::new(bytes);
    ensure_exact(&rlp, bytes)?;
    Ok(decode_value(&rlp, 0)?)
}

/// Decode one typed item spanning all of `bytes`.
pub fn decode_exact<T: Decodable>(bytes: &[u8]) -> Result<T> {
    let rlp = Rlp::new(bytes);
    ensure_exact(&rlp, bytes)?;
    rlp.as_val().map_err(CoreError::from)
}

fn ensure_exact(rlp: &Rlp<'_>, bytes: &[u8]) -> std::result::Result<(), DecoderError> {
    if rlp.payload_info()?.total() != bytes.len() {
        return Err(DecoderError::RlpIsTooBig);
    }
    Ok(())
}

fn decode_value(rlp: &Rlp<'_>, depth: usize) -> std::result::Result<Value, DecoderError> {
    if rlp.is_data() {
        return rlp.decoder().decode_value(|bytes| Ok(Value::Bytes(bytes.to_vec())));
    }
    if depth >= MAX_DEPTH {
        return Err(DecoderError::Custom("list nesting too deep"));
    }
    let count = item_count(rlp)?;
    let mut items = Vec::with_capacity(count);
    for index in 0..count {
        items.push(decode_value(&rlp.at(index)?, depth + 1)?);
    }
    Ok(Value::List(items))
}

// ─────────────────────────────────────────────────────────────────────────────
// Stream helpers shared by the transaction codecs
// ─────────────────────────────────────────────────────────────────────────────

/// Append `items` as one list.
pub(crate) fn append_list<E: Encodable>(s: &mut RlpStream, items: &[E]) {
    s.begin_list(items.len());
    for item in items {
        s.append(item);
    }
}

/// Append opaque buffers as a list of byte strings.
pub(crate) fn append_byte_list(s: &mut RlpStream, items: &[Bytes]) {
    s.begin_list(items.len());
    for item in items {
        s.append(&item.to_vec());
    }
}

/// Append an empty list for `None` and a one-element list for `Some`.
pub(crate) fn append_optional<E: Encodable>(s: &mut RlpStream, value: Option<&E>) {
    match value {
        Some(value) => {
            s.begin_list(1).append(value);
        }
        None => {
            s.begin_list(0);
        }
    }
}

/// Number of items in a list whose items exactly fill its payload.
pub(crate) fn item_count(rlp: &Rlp<'_>) -> std::result::Result<usize, DecoderError> {
    let count = rlp.item_count()?;
    let payload = rlp.payload_info()?;
    let mut consumed = 0usize;
    for index in 0..count {
        consumed += rlp.at(index)?.payload_info()?.total();
    }
    if consumed != payload.value_len {
        return Err(DecoderError::RlpInconsistentLengthAndData);
    }
    Ok(count)
}

/// Check that `rlp` is a list of exactly `expected` items.
pub(crate) fn expect_items(
    rlp: &Rlp<'_>,
    expected: usize,
) -> std::result::Result<(), DecoderError> {
    if item_count(rlp)? != expected {
        return Err(DecoderError::RlpIncorrectListLen);
    }
    Ok(())
}

/// The typed items of the list at `index`.
pub(crate) fn list_at<T: Decodable>(
    rlp: &Rlp<'_>,
    index: usize,
) -> std::result::Result<Vec<T>, DecoderError> {
    let list = rlp.at(index)?;
    (0..item_count(&list)?).map(|i| list.val_at(i)).collect()
}

/// The byte string at `index`.
pub(crate) fn bytes_at(rlp: &Rlp<'_>, index: usize) -> std::result::Result<Bytes, DecoderError> {
    rlp.val_at::<Vec<u8>>(index).map(Bytes::from)
}

/// The list of byte strings at `index`.
pub(crate) fn byte_list_at(
    rlp: &Rlp<'_>,
    index: usize,
) -> std::result::Result<Vec<Bytes>, DecoderError> {
    let list = rlp.at(index)?;
    (0..item_count(&list)?).map(|i| bytes_at(&list, i)).collect()
}

/// The inverse of [`append_optional`].
pub(crate) fn optional_at<T: Decodable>(
    rlp: &Rlp<'_>,
    index: usize,
) -> std::result::Result<Option<T>, DecoderError> {
    let list = rlp.at(index)?;
    match item_count(&list)? {
        0 => Ok(None),
        1 => list.val_at(0).map(Some),
        _ => Err(DecoderError::RlpIncorrectListLen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `depth` empty lists nested inside each other.
    fn nested(depth: usize) -> Vec<u8> {
        let mut headers = Vec::with_capacity(depth);
        let mut len = 1usize;
        for _ in 0..depth {
            let header = if len <= 55 {
                vec![0xc0 + len as u8]
            } else {
                let be = len.to_be_bytes();
                let start = be.iter().position(|&b| b != 0).unwrap_or(be.len() - 1);
                let mut header = vec![0xf7 + (be.len() - start) as u8];
                header.extend_from_slice(&be[start..]);
                header
            };
            len += header.len();
            headers.push(header);
        }

        let mut bytes = Vec::with_capacity(len);
        for header in headers.iter().rev() {
            bytes.extend_from_slice(header);
        }
        bytes.push(0xc0);
        bytes
    }

    #[test]
    fn test_single_byte_encoding() {
        assert_eq!(encode(&Value::bytes(vec![0x00])), vec![0x00]);
        assert_eq!(encode(&Value::bytes(vec![0x7f])), vec![0x7f]);
        assert_eq!(encode(&Value::bytes(vec![0x80])), vec![0x81, 0x80]);
        assert_eq!(encode(&Value::bytes(Vec::new())), vec![0x80]);
    }

    #[test]
    fn test_integer_encoding() {
        assert_eq!(encode(&Value::uint(0u64)), vec![0x80]);
        assert_eq!(encode(&Value::uint(3u64)), vec![0x03]);
        assert_eq!(encode(&Value::uint(127u64)), vec![0x7f]);
        assert_eq!(encode(&Value::uint(128u64)), vec![0x81, 0x80]);
        assert_eq!(encode(&Value::uint(1024u64)), vec![0x82, 0x04, 0x00]);
    }

    #[test]
    fn test_string_encoding() {
        assert_eq!(encode(&Value::text("dog")), vec![0x83, b'd', b'o', b'g']);

        let long = "a".repeat(56);
        let encoded = encode(&Value::text(&long));
        assert_eq!(&encoded[..2], &[0xb8, 56]);
        assert_eq!(encoded.len(), 58);
    }

    #[test]
    fn test_list_encoding() {
        assert_eq!(encode_list(&[]), vec![0xc0]);
        assert_eq!(
            encode_list(&[Value::text("cat"), Value::text("dog")]),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
        // [ [], [[]], [ [], [[]] ] ]
        let nested = Value::List(vec![
            Value::List(vec![]),
            Value::List(vec![Value::List(vec![])]),
            Value::List(vec![
                Value::List(vec![]),
                Value::List(vec![Value::List(vec![])]),
            ]),
        ]);
        assert_eq!(
            encode(&nested),
            vec![0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0]
        );
    }

    #[test]
    fn test_long_list_encoding() {
        let items: Vec<Value> = (0..30).map(|_| Value::text("ab")).collect();
        let encoded = encode_list(&items);
        assert_eq!(&encoded[..2], &[0xf8, 90]);
        assert_eq!(encoded.len(), 92);
    }

    #[test]
    fn test_optional_changes_length() {
        let absent = encode(&Value::optional(None));
        let zero = encode(&Value::optional(Some(Value::uint(0u64))));
        assert_eq!(absent, vec![0xc0]);
        assert_eq!(zero, vec![0xc1, 0x80]);
        assert!(absent.len() < zero.len());
    }

    #[test]
    fn test_stream_helpers_match_value_model() {
        let mut s = RlpStream::new_list(3);
        append_byte_list(&mut s, &[Bytes::from_static(b"\x01\x02")]);
        append_optional::<U256>(&mut s, None);
        append_optional(&mut s, Some(&U256::from(5u64)));

        let expected = encode_list(&[
            Value::List(vec![Value::bytes(vec![0x01, 0x02])]),
            Value::optional(None),
            Value::optional(Some(Value::uint(5u64))),
        ]);
        assert_eq!(s.out().to_vec(), expected);
    }

    #[test]
    fn test_decode_roundtrip() {
        let value = Value::List(vec![
            Value::bytes(vec![0x03]),
            Value::text("metadata"),
            Value::fixed(H256::from_bytes([0x11; 32])),
            Value::List(vec![Value::bytes(vec![0xaa; 60])]),
            Value::List(vec![]),
        ]);
        let decoded = decode(&encode(&value)).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_decode_rejects_non_canonical() {
        // 0x05 wrapped in a string prefix
        assert!(decode(&[0x81, 0x05]).is_err());
        // long form for a 1-byte payload
        assert!(decode(&[0xb8, 0x01, 0xff]).is_err());
        // length with leading zero
        assert!(decode(&[0xb9, 0x00, 0x38]).is_err());
        // trailing bytes
        assert!(decode(&[0x80, 0x80]).is_err());
        // truncated
        assert!(decode(&[0x83, b'd', b'o']).is_err());
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage_inside_list() {
        // [0x01] followed by a truncated string inside the list payload
        assert!(matches!(
            decode(&[0xc3, 0x01, 0x82, 0x01]),
            Err(CoreError::Decoding(_))
        ));
    }

    #[test]
    fn test_decode_typed_optional() {
        let absent = encode(&Value::optional(None));
        let present = encode(&Value::optional(Some(Value::uint(7u64))));
        let two = encode_list(&[Value::uint(1u64), Value::uint(2u64)]);

        let wrap = |item: Vec<u8>| {
            let mut s = RlpStream::new_list(1);
            s.append_raw(&item, 1);
            s.out().to_vec()
        };
        let read = |bytes: &[u8]| optional_at::<U256>(&Rlp::new(bytes), 0);

        assert_eq!(read(&wrap(absent)).unwrap(), None);
        assert_eq!(read(&wrap(present)).unwrap(), Some(U256::from(7u64)));
        assert!(read(&wrap(two)).is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected_without_overflow() {
        let shallow = nested(MAX_DEPTH - 1);
        assert!(decode(&shallow).is_ok());

        let deep = nested(MAX_DEPTH);
        assert!(matches!(decode(&deep), Err(CoreError::Decoding(_))));

        let hostile = nested(200_000);
        assert!(matches!(decode(&hostile), Err(CoreError::Decoding(_))));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn decoded_value() -> impl Strategy<Value = Value> {
            let leaf = prop::collection::vec(any::<u8>(), 0..80).prop_map(Value::Bytes);
            leaf.prop_recursive(4, 64, 8, |inner| {
                prop::collection::vec(inner, 0..8).prop_map(Value::List)
            })
        }

        proptest! {
            #[test]
            fn test_decode_inverts_encode(value in decoded_value()) {
                let bytes = encode(&value);
                prop_assert_eq!(decode(&bytes).unwrap(), value);
            }

            #[test]
            fn test_truncation_is_rejected(value in decoded_value()) {
                let bytes = encode(&value);
                prop_assert!(decode(&bytes[..bytes.len() - 1]).is_err());
            }
        }
    }
}
