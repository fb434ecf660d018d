//! Asset transfer transactions.
//!
//! A transfer spends `inputs`, destroys `burns` and creates `outputs`.
//! Inputs and burns carry the lock script they unlock and the unlock script
//! proving the right to spend.

use bytes::Bytes;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use serde_json::json;

use crate::canonical::{self, Value};
use crate::crypto::blake256;
use crate::error::Result;
use crate::json;
use crate::scheme::AssetOutPoint;
use crate::transaction::TransactionKind;
use crate::types::{H256, U256};

/// An asset being spent (or burnt).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransferInput {
    pub prev_out: AssetOutPoint,
    pub lock_script: Bytes,
    pub unlock_script: Bytes,
}

impl AssetTransferInput {
    pub fn new(
        prev_out: AssetOutPoint,
        lock_script: impl Into<Bytes>,
        unlock_script: impl Into<Bytes>,
    ) -> Self {
        Self {
            prev_out,
            lock_script: lock_script.into(),
            unlock_script: unlock_script.into(),
        }
    }

    /// `[prevOut, lockScript, unlockScript]`.
    pub fn to_fields(&self) -> Value {
        Value::List(vec![
            self.prev_out.to_fields(),
            Value::bytes(self.lock_script.to_vec()),
            Value::bytes(self.unlock_script.to_vec()),
        ])
    }

    /// The same input with both scripts emptied.
    pub fn without_script(&self) -> Self {
        Self {
            prev_out: self.prev_out.clone(),
            lock_script: Bytes::new(),
            unlock_script: Bytes::new(),
        }
    }

    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = json::object(value, "input")?;
        Ok(Self {
            prev_out: AssetOutPoint::from_json(json::required(obj, "prevOut")?)?,
            lock_script: json::bytes(json::required(obj, "lockScript")?, "lockScript")?,
            unlock_script: json::bytes(json::required(obj, "unlockScript")?, "unlockScript")?,
        })
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "prevOut": self.prev_out.to_json(),
            "lockScript": json::hex_bytes(&self.lock_script),
            "unlockScript": json::hex_bytes(&self.unlock_script),
        })
    }
}

/// An asset being created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransferOutput {
    pub lock_script_hash: H256,
    pub parameters: Vec<Bytes>,
    pub asset_type: H256,
    pub amount: U256,
}

impl AssetTransferOutput {
    /// `[lockScriptHash, parameters, assetType, amount]`.
    pub fn to_fields(&self) -> Value {
        Value::List(vec![
            Value::from(self.lock_script_hash),
            Value::List(
                self.parameters
                    .iter()
                    .map(|p| Value::bytes(p.to_vec()))
                    .collect(),
            ),
            Value::from(self.asset_type),
            Value::from(self.amount.clone()),
        ])
    }

    fn from_json(value: &serde_json::Value) -> Result<Self> {
        let obj = json::object(value, "output")?;
        Ok(Self {
            lock_script_hash: json::h256(
                json::required(obj, "lockScriptHash")?,
                "lockScriptHash",
            )?,
            parameters: json::bytes_list(json::required(obj, "parameters")?, "parameters")?,
            asset_type: json::h256(json::required(obj, "assetType")?, "assetType")?,
            amount: json::uint(json::required(obj, "amount")?)?,
        })
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "lockScriptHash": json::hex_id(self.lock_script_hash),
            "parameters": self.parameters.iter().map(|p| json::hex_bytes(p)).collect::<Vec<_>>(),
            "assetType": json::hex_id(self.asset_type),
            "amount": self.amount.to_hex(),
        })
    }
}

impl Encodable for AssetTransferInput {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(3)
            .append(&self.prev_out)
            .append(&self.lock_script.to_vec())
            .append(&self.unlock_script.to_vec());
    }
}

impl Decodable for AssetTransferInput {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        canonical::expect_items(rlp, 3)?;
        Ok(Self {
            prev_out: rlp.val_at(0)?,
            lock_script: canonical::bytes_at(rlp, 1)?,
            unlock_script: canonical::bytes_at(rlp, 2)?,
        })
    }
}

impl Encodable for AssetTransferOutput {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4).append(&self.lock_script_hash);
        canonical::append_byte_list(s, &self.parameters);
        s.append(&self.asset_type).append(&self.amount);
    }
}

impl Decodable for AssetTransferOutput {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        canonical::expect_items(rlp, 4)?;
        Ok(Self {
            lock_script_hash: rlp.val_at(0)?,
            parameters: canonical::byte_list_at(rlp, 1)?,
            asset_type: rlp.val_at(2)?,
            amount: rlp.val_at(3)?,
        })
    }
}

/// A transaction moving assets between lock scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetTransferTransaction {
    burns: Vec<AssetTransferInput>,
    inputs: Vec<AssetTransferInput>,
    outputs: Vec<AssetTransferOutput>,
}

impl AssetTransferTransaction {
    pub fn new(
        burns: Vec<AssetTransferInput>,
        inputs: Vec<AssetTransferInput>,
        outputs: Vec<AssetTransferOutput>,
    ) -> Self {
        Self {
            burns,
            inputs,
            outputs,
        }
    }

    pub fn burns(&self) -> &[AssetTransferInput] {
        &self.burns
    }

    pub fn inputs(&self) -> &[AssetTransferInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[AssetTransferOutput] {
        &self.outputs
    }

    /// `[4, burns, inputs, outputs]`.
    pub fn to_fields(&self) -> Vec<Value> {
        vec![
            Value::uint(TransactionKind::AssetTransfer.tag()),
            Value::List(self.burns.iter().map(AssetTransferInput::to_fields).collect()),
            Value::List(self.inputs.iter().map(AssetTransferInput::to_fields).collect()),
            Value::List(self.outputs.iter().map(AssetTransferOutput::to_fields).collect()),
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

    /// Hash with every burn and input script emptied.
    ///
    /// Unlock scripts commit to this hash, so it cannot cover them.
    pub fn hash_without_script(&self) -> H256 {
        let stripped = Self {
            burns: self.burns.iter().map(AssetTransferInput::without_script).collect(),
            inputs: self.inputs.iter().map(AssetTransferInput::without_script).collect(),
            outputs: self.outputs.clone(),
        };
        stripped.hash()
    }

    pub(crate) fn from_json_data(value: &serde_json::Value) -> Result<Self> {
        let obj = json::object(value, "data")?;
        let burns = json::array(json::required(obj, "burns")?, "burns")?
            .iter()
            .map(AssetTransferInput::from_json)
            .collect::<Result<_>>()?;
        let inputs = json::array(json::required(obj, "inputs")?, "inputs")?
            .iter()
            .map(AssetTransferInput::from_json)
            .collect::<Result<_>>()?;
        let outputs = json::array(json::required(obj, "outputs")?, "outputs")?
            .iter()
            .map(AssetTransferOutput::from_json)
            .collect::<Result<_>>()?;

        Ok(Self::new(burns, inputs, outputs))
    }

    pub(crate) fn to_json_data(&self) -> serde_json::Value {
        json!({
            "burns": self.burns.iter().map(AssetTransferInput::to_json).collect::<Vec<_>>(),
            "inputs": self.inputs.iter().map(AssetTransferInput::to_json).collect::<Vec<_>>(),
            "outputs": self.outputs.iter().map(AssetTransferOutput::to_json).collect::<Vec<_>>(),
        })
    }
}

impl Encodable for AssetTransferTransaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(4).append(&TransactionKind::AssetTransfer.tag());
        canonical::append_list(s, &self.burns);
        canonical::append_list(s, &self.inputs);
        canonical::append_list(s, &self.outputs);
    }
}

impl Decodable for AssetTransferTransaction {
    fn decode(rlp: &Rlp<'_>) -> std::result::Result<Self, DecoderError> {
        canonical::expect_items(rlp, 4)?;
        let tag: u8 = rlp.val_at(0)?;
        if tag != TransactionKind::AssetTransfer.tag() {
            return Err(DecoderError::Custom("not an asset transfer"));
        }

        Ok(Self {
            burns: canonical::list_at(rlp, 1)?,
            inputs: canonical::list_at(rlp, 2)?,
            outputs: canonical::list_at(rlp, 3)?,
        })
    }
}
