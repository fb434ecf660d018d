//! Asset schemes and the assets they govern.

use bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde_json::json;

use crate::canonical::{self, Value};
use crate::error::{CoreError, Result};
use crate::json;
use crate::types::{NetworkId, H160, H256, U256};

/// The registration record of an asset type.
///
/// `amount` is the supply cap (`None` leaves it uncapped); `registrar`, when
/// set, is the only account allowed to authorize transfers of the scheme's
/// assets.
///
/// Records go through [`AssetScheme::from_json`] and [`AssetScheme::to_json`]
/// only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetScheme {
    network_id: NetworkId,
    metadata: String,
    amount: Option<U256>,
    registrar: Option<H160>,
}

impl AssetScheme {
    /// Build a scheme from its fields.
    pub fn new(
        network_id: NetworkId,
        metadata: impl Into<String>,
        amount: Option<U256>,
        registrar: Option<H160>,
    ) -> Self {
        Self {
            network_id,
            metadata: metadata.into(),
            amount,
            registrar,
        }
    }

    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    pub fn amount(&self) -> Option<&U256> {
        self.amount.as_ref()
    }

    pub fn registrar(&self) -> Option<&H160> {
        self.registrar.as_ref()
    }

    /// Whether supply is uncapped.
    pub fn is_uncapped(&self) -> bool {
        self.amount.is_none()
    }

    /// Read a scheme from a loosely-typed record.
    pub fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = json::object(value, "asset scheme")?;
        let network_id = json::u64(json::required(obj, "networkId")?, "networkId")?;
        let network_id = u16::try_from(network_id)
            .map_err(|_| CoreError::conversion(format!("network id {} out of range", network_id)))?;
        let metadata = json::string(json::required(obj, "metadata")?, "metadata")?;
        let amount = json::optional(obj, "amount").map(json::uint).transpose()?;
        let registrar = json::optional(obj, "registrar")
            .map(|v| json::h160(v, "registrar"))
            .transpose()?;

        Ok(Self::new(NetworkId(network_id), metadata, amount, registrar))
    }

    /// The inverse of [`AssetScheme::from_json`].
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "networkId": self.network_id.0,
            "metadata": self.metadata,
            "amount": self.amount.as_ref().map(U256::to_hex),
            "registrar": self.registrar.map(json::hex_id),
        })
    }
}

/// A reference to an asset created by an earlier transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetOutPoint {
    /// Hash of the transaction that created the asset.
    pub transaction_hash: H256,
    /// Output index within that transaction.
    pub index: u64,
    /// Asset type (the scheme address).
    pub asset_type: H256,
    pub amount: U256,
}

impl AssetOutPoint {
    /// Encoded as `[transactionHash, index, assetType, amount]`.
    pub fn to_fields(&self) -> Value {
        Value::List(vec![
            Value::from(self.transaction_hash),
            Value::uint(self.index),
            Value::from(self.asset_type),
            Value::from(self.amount.clone()),
        ])
    }

    pub(crate) fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = json::object(value, "prevOut")?;
        Ok(Self {
            transaction_hash: json::h256(
                json::required(obj, "transactionHash")?,
                "transactionHash",
            )?,
            index: json::u64(json::required(obj, "index")?, "index")?,
            asset_type: json::h256(json::required(obj, "assetType")?, "assetType")?,
            amount: json::uint(json::required(obj, "amount")?)?,
        })
    }

    pub(crate) fn to_json(&self) -> serde_json::Value {
        json!({
            "transactionHash": json::hex_id(self.transaction_hash),
            "index": self.index,
            "assetType": json::hex_id(self.asset_type),
            "amount": self.amount.to_hex(),
        })
    }
}

impl Encodable for AssetOutPoint {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4)
            .append(&self.transaction_hash)
            .append(&self.index)
            .append(&self.asset_type)
            .append(&self.amount);
    }
}

impl Decodable for AssetOutPoint {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        canonical::expect_items(rlp, 4)?;
        Ok(Self {
            transaction_hash: rlp.val_at(0)?,
            index: rlp.val_at(1)?,
            asset_type: rlp.val_at(2)?,
            amount: rlp.val_at(3)?,
        })
    }
}

/// An asset as it exists on the ledger after a mint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// The scheme address of the asset's type.
    pub asset_type: H256,
    pub lock_script_hash: H256,
    pub parameters: Vec<Bytes>,
    pub amount: U256,
    /// Where the asset lives, for spending it in a transfer.
    pub outpoint: AssetOutPoint,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scheme_json_roundtrip() {
        let scheme = AssetScheme::new(
            NetworkId(17),
            "gold",
            Some(U256::from(1000u64)),
            Some(H160::from_bytes([0x01; 20])),
        );
        let back = AssetScheme::from_json(&scheme.to_json()).unwrap();
        assert_eq!(back, scheme);
    }

    #[test]
    fn test_scheme_null_optionals_are_absent() {
        let scheme = AssetScheme::from_json(&json!({
            "networkId": 17,
            "metadata": "silver",
            "amount": null,
            "registrar": null,
        }))
        .unwrap();
        assert!(scheme.is_uncapped());
        assert_eq!(scheme.registrar(), None);
    }

    #[test]
    fn test_scheme_missing_metadata() {
        let result = AssetScheme::from_json(&json!({ "networkId": 17 }));
        assert!(matches!(result, Err(CoreError::MalformedInput(_))));
    }

    #[test]
    fn test_scheme_bad_registrar_is_conversion_error() {
        let result = AssetScheme::from_json(&json!({
            "networkId": 17,
            "metadata": "x",
            "registrar": "0x1234",
        }));
        assert!(matches!(result, Err(CoreError::Conversion(_))));
    }

    #[test]
    fn test_scheme_json_camel_case() {
        let scheme = AssetScheme::new(NetworkId(3), "m", None, None);
        let value = scheme.to_json();
        assert_eq!(value["networkId"], json!(3));
        assert_eq!(value["amount"], json!(null));
        assert_eq!(AssetScheme::from_json(&value).unwrap(), scheme);
    }

    #[test]
    fn test_outpoint_rlp_roundtrip() {
        let outpoint = AssetOutPoint {
            transaction_hash: H256::from_bytes([0x0a; 32]),
            index: 2,
            asset_type: H256::from_bytes([0x53; 32]),
            amount: U256::from(500u64),
        };
        let bytes = rlp::encode(&outpoint).to_vec();
        assert_eq!(bytes, canonical::encode(&outpoint.to_fields()));
        assert_eq!(canonical::decode_exact::<AssetOutPoint>(&bytes).unwrap(), outpoint);
    }

    #[test]
    fn test_outpoint_rejects_extra_field() {
        let mut fields = AssetOutPoint {
            transaction_hash: H256::ZERO,
            index: 0,
            asset_type: H256::ZERO,
            amount: U256::zero(),
        }
        .to_fields();
        if let Value::List(items) = &mut fields {
            items.push(Value::uint(1u64));
        }
        assert!(canonical::decode_exact::<AssetOutPoint>(&canonical::encode(&fields)).is_err());
    }
}
