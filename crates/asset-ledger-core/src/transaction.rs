//! The closed set of ledger transactions.
//!
//! Every transaction encodes as a list whose first field is its type tag.
//! Decoding reads the tag and hands the list to the variant's decoder.

use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde_json::json;

use crate::canonical::{self, Value};
use crate::crypto::blake256;
use crate::error::{CoreError, Result};
use crate::json;
use crate::mint::AssetMintTransaction;
use crate::transfer::AssetTransferTransaction;
use crate::types::H256;

/// Discriminator written as the first encoded field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TransactionKind {
    AssetMint = 3,
    AssetTransfer = 4,
}

impl TransactionKind {
    /// Wire tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Try to parse from a wire tag.
    pub fn from_u64(tag: u64) -> Option<Self> {
        match tag {
            3 => Some(Self::AssetMint),
            4 => Some(Self::AssetTransfer),
            _ => None,
        }
    }

    /// The `type` string of a JSON record.
    pub fn json_name(self) -> &'static str {
        match self {
            Self::AssetMint => "assetMint",
            Self::AssetTransfer => "assetTransfer",
        }
    }

    fn from_json_name(name: &str) -> Option<Self> {
        match name {
            "assetMint" => Some(Self::AssetMint),
            "assetTransfer" => Some(Self::AssetTransfer),
            _ => None,
        }
    }
}

/// A ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    AssetMint(AssetMintTransaction),
    AssetTransfer(AssetTransferTransaction),
}

impl Transaction {
    pub fn kind(&self) -> TransactionKind {
        match self {
            Self::AssetMint(_) => TransactionKind::AssetMint,
            Self::AssetTransfer(_) => TransactionKind::AssetTransfer,
        }
    }

    /// Ordered wire fields, tag first.
    pub fn to_fields(&self) -> Vec<Value> {
        match self {
            Self::AssetMint(tx) => tx.to_fields(),
            Self::AssetTransfer(tx) => tx.to_fields(),
        }
    }

    /// Canonical bytes.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Content hash of the canonical bytes.
    pub fn hash(&self) -> H256 {
        blake256(self.rlp_bytes())
    }

    /// Decode canonical bytes, dispatching on the leading tag.
    ///
    /// The bytes must hold exactly one transaction. Decoding reads only the
    /// fields each variant declares, so hostile nesting is rejected at the
    /// first field of the wrong shape.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let rlp = Rlp::new(bytes);
        let tag: u64 = rlp.val_at(0)?;
        if TransactionKind::from_u64(tag).is_none() {
            return Err(CoreError::UnknownTransactionType(tag));
        }
        canonical::decode_exact(bytes)
    }

    /// Read a `{"type": .., "data": {..}}` record.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = json::object(value, "transaction")?;
        let name = json::string(json::required(obj, "type")?, "type")?;
        let data = json::required(obj, "data")?;

        match TransactionKind::from_json_name(&name) {
            Some(TransactionKind::AssetMint) => {
                AssetMintTransaction::from_json_data(data).map(Self::AssetMint)
            }
            Some(TransactionKind::AssetTransfer) => {
                AssetTransferTransaction::from_json_data(data).map(Self::AssetTransfer)
            }
            None => Err(CoreError::malformed(format!(
                "unknown transaction type `{}`",
                name
            ))),
        }
    }

    /// The inverse of [`Transaction::from_json`].
    pub fn to_json(&self) -> serde_json::Value {
        let data = match self {
            Self::AssetMint(tx) => tx.to_json_data(),
            Self::AssetTransfer(tx) => tx.to_json_data(),
        };
        json!({
            "type": self.kind().json_name(),
            "data": data,
        })
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        match self {
            Self::AssetMint(tx) => tx.rlp_append(s),
            Self::AssetTransfer(tx) => tx.rlp_append(s),
        }
    }
}

impl Decodable for Transaction {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        let tag: u64 = rlp.val_at(0)?;
        match TransactionKind::from_u64(tag) {
            Some(TransactionKind::AssetMint) => {
                AssetMintTransaction::decode(rlp).map(Self::AssetMint)
            }
            Some(TransactionKind::AssetTransfer) => {
                AssetTransferTransaction::decode(rlp).map(Self::AssetTransfer)
            }
            None => Err(DecoderError::Custom("unknown transaction type")),
        }
    }
}

impl From<AssetMintTransaction> for Transaction {
    fn from(tx: AssetMintTransaction) -> Self {
        Self::AssetMint(tx)
    }
}

impl From<AssetTransferTransaction> for Transaction {
    fn from(tx: AssetTransferTransaction) -> Self {
        Self::AssetTransfer(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mint::AssetMintBuilder;
    use crate::scheme::AssetOutPoint;
    use crate::transfer::{AssetTransferInput, AssetTransferOutput};
    use crate::types::{H160, U256};

    fn mint() -> Transaction {
        AssetMintBuilder::new(H256::from_bytes([0x11; 32]))
            .metadata("{\"name\":\"gold\"}")
            .parameter(vec![0x01, 0x02])
            .amount(1_000u64)
            .registrar(H160::from_bytes([0x22; 20]))
            .build()
            .into()
    }

    fn transfer() -> Transaction {
        let prev_out = AssetOutPoint {
            transaction_hash: mint().hash(),
            index: 0,
            asset_type: H256::from_bytes([0x53; 32]),
            amount: U256::from(1_000u64),
        };
        AssetTransferTransaction::new(
            vec![],
            vec![AssetTransferInput::new(prev_out, vec![0x30u8], vec![0x31u8, 0x32])],
            vec![AssetTransferOutput {
                lock_script_hash: H256::from_bytes([0x33; 32]),
                parameters: vec![],
                asset_type: H256::from_bytes([0x53; 32]),
                amount: U256::from(1_000u64),
            }],
        )
        .into()
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(TransactionKind::AssetMint.tag(), 3);
        assert_eq!(TransactionKind::AssetTransfer.tag(), 4);
        assert_eq!(TransactionKind::from_u64(3), Some(TransactionKind::AssetMint));
        assert_eq!(TransactionKind::from_u64(9), None);
    }

    #[test]
    fn test_decode_roundtrip() {
        for tx in [mint(), transfer()] {
            let decoded = Transaction::decode(&tx.rlp_bytes()).unwrap();
            assert_eq!(decoded, tx);
            assert_eq!(decoded.hash(), tx.hash());
        }
    }

    #[test]
    fn test_fields_match_stream_encoding() {
        for tx in [mint(), transfer()] {
            assert_eq!(canonical::encode_list(&tx.to_fields()), tx.rlp_bytes());
        }
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = mint().rlp_bytes();
        bytes.push(0x80);
        assert!(matches!(Transaction::decode(&bytes), Err(CoreError::Decoding(_))));
    }

    #[test]
    fn test_decode_deeply_nested_field() {
        // A mint whose parameter list is replaced by 100k nested lists.
        let mut headers = Vec::new();
        let mut len = 1usize;
        for _ in 0..100_000 {
            let header = if len <= 55 {
                vec![0xc0 + len as u8]
            } else {
                let be = (len as u32).to_be_bytes();
                let start = be.iter().position(|&b| b != 0).unwrap_or(3);
                let mut h = vec![0xf7 + (4 - start) as u8];
                h.extend_from_slice(&be[start..]);
                h
            };
            len += header.len();
            headers.push(header);
        }
        let mut nested = Vec::with_capacity(len);
        for header in headers.iter().rev() {
            nested.extend_from_slice(header);
        }
        nested.push(0xc0);

        let mut fields = mint().to_fields();
        fields.truncate(3);
        let mut s = RlpStream::new_list(6);
        for field in &fields {
            s.append(field);
        }
        s.append_raw(&nested, 1);
        s.begin_list(0);
        s.begin_list(0);

        assert!(matches!(
            Transaction::decode(&s.out()),
            Err(CoreError::Decoding(_))
        ));
    }

    #[test]
    fn test_decode_unknown_tag() {
        let bytes = canonical::encode_list(&[Value::uint(9u64)]);
        assert_eq!(
            Transaction::decode(&bytes),
            Err(CoreError::UnknownTransactionType(9))
        );
    }

    #[test]
    fn test_decode_rejects_bare_string() {
        let bytes = canonical::encode(&Value::bytes(b"mint".to_vec()));
        assert!(matches!(
            Transaction::decode(&bytes),
            Err(CoreError::Decoding(_))
        ));
    }

    #[test]
    fn test_json_roundtrip_preserves_hash() {
        for tx in [mint(), transfer()] {
            let back = Transaction::from_json(&tx.to_json()).unwrap();
            assert_eq!(back.hash(), tx.hash());
        }
    }

    #[test]
    fn test_json_type_names() {
        assert_eq!(mint().to_json()["type"], "assetMint");
        assert_eq!(transfer().to_json()["type"], "assetTransfer");
    }

    #[test]
    fn test_json_unknown_type_is_malformed() {
        let result = Transaction::from_json(&json!({ "type": "payment", "data": {} }));
        assert!(matches!(result, Err(CoreError::MalformedInput(_))));
    }

    #[test]
    fn test_json_null_optionals() {
        let record = json!({
            "type": "assetMint",
            "data": {
                "metadata": "m",
                "lockScriptHash": "0x0000000000000000000000000000000000000000000000000000000000000001",
                "parameters": [],
                "amount": null,
                "registrar": null,
            }
        });
        let tx = Transaction::from_json(&record).unwrap();
        let Transaction::AssetMint(mint) = &tx else {
            panic!("expected a mint");
        };
        assert_eq!(mint.amount(), None);
        assert_eq!(mint.registrar(), None);
        assert_eq!(tx.rlp_bytes().len(), 39);
    }

    #[test]
    fn test_json_missing_lock_script_hash() {
        let record = json!({ "type": "assetMint", "data": { "metadata": "m" } });
        assert!(matches!(
            Transaction::from_json(&record),
            Err(CoreError::MalformedInput(_))
        ));
    }
}
