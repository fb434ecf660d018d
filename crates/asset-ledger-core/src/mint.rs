//! Asset mint transactions.
//!
//! A mint registers a new asset scheme and creates the first asset of that
//! type, locked by `lock_script_hash`. The scheme and asset addresses are
//! derived from the mint's hash; transfers have no such addresses.

use bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde_json::json;

use crate::canonical::{self, Value};
use crate::crypto::{asset_address, asset_scheme_address, blake256};
use crate::error::Result;
use crate::json;
use crate::scheme::{Asset, AssetOutPoint, AssetScheme};
use crate::transaction::TransactionKind;
use crate::types::{NetworkId, H160, H256, U256};

/// A transaction minting a new asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMintTransaction {
    metadata: String,
    lock_script_hash: H256,
    parameters: Vec<Bytes>,
    amount: Option<U256>,
    registrar: Option<H160>,
}

impl AssetMintTransaction {
    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    pub fn lock_script_hash(&self) -> &H256 {
        &self.lock_script_hash
    }

    pub fn parameters(&self) -> &[Bytes] {
        &self.parameters
    }

    /// Supply of the minted asset; `None` leaves the scheme uncapped.
    pub fn amount(&self) -> Option<&U256> {
        self.amount.as_ref()
    }

    pub fn registrar(&self) -> Option<&H160> {
        self.registrar.as_ref()
    }

    /// Project onto the ordered wire fields:
    /// `[3, metadata, lockScriptHash, parameters, [amount?], [registrar?]]`.
    pub fn to_fields(&self) -> Vec<Value> {
        vec![
            Value::uint(TransactionKind::AssetMint.tag()),
            Value::text(&self.metadata),
            Value::from(self.lock_script_hash),
            Value::List(
                self.parameters
                    .iter()
                    .map(|p| Value::bytes(p.to_vec()))
                    .collect(),
            ),
            Value::optional(self.amount.clone().map(Value::from)),
            Value::optional(self.registrar.map(Value::from)),
        ]
    }

    /// Canonical bytes.
    pub fn rlp_bytes(&self) -> Vec<u8> {
        rlp::encode(self).to_vec()
    }

    /// Content hash of the canonical bytes.
    pub fn hash(&self) -> H256 {
        blake256(self.rlp_bytes())
    }

    /// Address of the scheme this mint registers.
    pub fn asset_scheme_address(&self) -> H256 {
        asset_scheme_address(&self.hash())
    }

    /// Address of the asset this mint creates.
    pub fn asset_address(&self) -> H256 {
        asset_address(&self.hash())
    }

    /// The scheme this mint registers on `network_id`.
    pub fn asset_scheme(&self, network_id: NetworkId) -> AssetScheme {
        AssetScheme::new(
            network_id,
            self.metadata.clone(),
            self.amount.clone(),
            self.registrar,
        )
    }

    /// The asset created at output 0, or `None` for an uncapped mint.
    pub fn minted_asset(&self) -> Option<Asset> {
        let amount = self.amount.clone()?;
        let asset_type = self.asset_scheme_address();
        Some(Asset {
            asset_type,
            lock_script_hash: self.lock_script_hash,
            parameters: self.parameters.clone(),
            amount: amount.clone(),
            outpoint: AssetOutPoint {
                transaction_hash: self.hash(),
                index: 0,
                asset_type,
                amount,
            },
        })
    }

    /// Read the `data` object of a mint record.
    pub(crate) fn from_json_data(value: &serde_json::Value) -> Result<Self> {
        let obj = json::object(value, "data")?;
        let mut builder = AssetMintBuilder::new(json::h256(
            json::required(obj, "lockScriptHash")?,
            "lockScriptHash",
        )?)
        .metadata(json::string(json::required(obj, "metadata")?, "metadata")?);

        for p in json::bytes_list(json::required(obj, "parameters")?, "parameters")? {
            builder = builder.parameter(p);
        }
        if let Some(amount) = json::optional(obj, "amount") {
            builder = builder.amount(json::uint(amount)?);
        }
        if let Some(registrar) = json::optional(obj, "registrar") {
            builder = builder.registrar(json::h160(registrar, "registrar")?);
        }

        Ok(builder.build())
    }

    /// The `data` object of a mint record.
    pub(crate) fn to_json_data(&self) -> serde_json::Value {
        json!({
            "metadata": self.metadata,
            "lockScriptHash": json::hex_id(self.lock_script_hash),
            "parameters": self.parameters.iter().map(|p| json::hex_bytes(p)).collect::<Vec<_>>(),
            "amount": self.amount.as_ref().map(U256::to_hex),
            "registrar": self.registrar.map(json::hex_id),
        })
    }
}

impl Encodable for AssetMintTransaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(6)
            .append(&TransactionKind::AssetMint.tag())
            .append(&self.metadata)
            .append(&self.lock_script_hash);
        canonical::append_byte_list(s, &self.parameters);
        canonical::append_optional(s, self.amount.as_ref());
        canonical::append_optional(s, self.registrar.as_ref());
    }
}

impl Decodable for AssetMintTransaction {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        canonical::expect_items(rlp, 6)?;
        let tag: u8 = rlp.val_at(0)?;
        if tag != TransactionKind::AssetMint.tag() {
            return Err(DecoderError::Custom("not an asset mint"));
        }

        Ok(Self {
            metadata: rlp.val_at(1)?,
            lock_script_hash: rlp.val_at(2)?,
            parameters: canonical::byte_list_at(rlp, 3)?,
            amount: canonical::optional_at(rlp, 4)?,
            registrar: canonical::optional_at(rlp, 5)?,
        })
    }
}

/// Builder for mint transactions.
pub struct AssetMintBuilder {
    metadata: String,
    lock_script_hash: H256,
    parameters: Vec<Bytes>,
    amount: Option<U256>,
    registrar: Option<H160>,
}

impl AssetMintBuilder {
    /// Start building a mint whose asset is locked by `lock_script_hash`.
    pub fn new(lock_script_hash: H256) -> Self {
        Self {
            metadata: String::new(),
            lock_script_hash,
            parameters: Vec::new(),
            amount: None,
            registrar: None,
        }
    }

    /// Set the metadata.
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = metadata.into();
        self
    }

    /// Append a lock script parameter.
    pub fn parameter(mut self, p: impl Into<Bytes>) -> Self {
        self.parameters.push(p.into());
        self
    }

    /// Set the supply.
    pub fn amount(mut self, amount: impl Into<U256>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Set the registrar.
    pub fn registrar(mut self, registrar: H160) -> Self {
        self.registrar = Some(registrar);
        self
    }

    pub fn build(self) -> AssetMintTransaction {
        AssetMintTransaction {
            metadata: self.metadata,
            lock_script_hash: self.lock_script_hash,
            parameters: self.parameters,
            amount: self.amount,
            registrar: self.registrar,
        }
    }
}
