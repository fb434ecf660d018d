//! Proptest generators for property-based testing.

use bytes::Bytes;
use proptest::prelude::*;

use asset_ledger_core::{
    AssetMintBuilder, AssetMintTransaction, AssetOutPoint, AssetTransferInput,
    AssetTransferOutput, AssetTransferTransaction, H160, H256, U256,
};

/// Generate a random H160.
pub fn h160() -> impl Strategy<Value = H160> {
    any::<[u8; 20]>().prop_map(H160::from_bytes)
}

/// Generate a random H256.
pub fn h256() -> impl Strategy<Value = H256> {
    any::<[u8; 32]>().prop_map(H256::from_bytes)
}

/// Generate a quantity, biased towards small values and zero.
pub fn u256() -> impl Strategy<Value = U256> {
    prop_oneof![
        Just(U256::zero()),
        (0u64..1_000).prop_map(U256::from),
        any::<u128>().prop_map(U256::from),
        prop::collection::vec(any::<u8>(), 0..=32).prop_map(|b| U256::from_be_slice(&b)),
    ]
}

/// Generate opaque bytes of specified max length.
pub fn bytes(max_len: usize) -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..=max_len).prop_map(Bytes::from)
}

/// Generate lock script parameters.
pub fn parameters() -> impl Strategy<Value = Vec<Bytes>> {
    prop::collection::vec(bytes(80), 0..4)
}

/// Generate metadata text, occasionally past the short string limit.
pub fn metadata() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{0,16}".prop_map(String::from),
        "\\PC{0,120}".prop_map(String::from),
    ]
}

/// Parameters for generating a mint.
#[derive(Debug, Clone)]
pub struct MintParams {
    pub metadata: String,
    pub lock_script_hash: H256,
    pub parameters: Vec<Bytes>,
    pub amount: Option<U256>,
    pub registrar: Option<H160>,
}

impl Arbitrary for MintParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            metadata(),
            h256(),
            parameters(),
            prop::option::of(u256()),
            prop::option::of(h160()),
        )
            .prop_map(|(metadata, lock_script_hash, parameters, amount, registrar)| MintParams {
                metadata,
                lock_script_hash,
                parameters,
                amount,
                registrar,
            })
            .boxed()
    }
}

/// Generate a mint from parameters.
pub fn mint_from_params(params: &MintParams) -> AssetMintTransaction {
    let mut builder =
        AssetMintBuilder::new(params.lock_script_hash).metadata(params.metadata.clone());

    for p in &params.parameters {
        builder = builder.parameter(p.clone());
    }
    if let Some(amount) = &params.amount {
        builder = builder.amount(amount.clone());
    }
    if let Some(registrar) = params.registrar {
        builder = builder.registrar(registrar);
    }

    builder.build()
}

/// Generate an outpoint.
pub fn outpoint() -> impl Strategy<Value = AssetOutPoint> {
    (h256(), any::<u64>(), h256(), u256()).prop_map(
        |(transaction_hash, index, asset_type, amount)| AssetOutPoint {
            transaction_hash,
            index,
            asset_type,
            amount,
        },
    )
}

/// Generate a transfer input (or burn).
pub fn transfer_input() -> impl Strategy<Value = AssetTransferInput> {
    (outpoint(), bytes(64), bytes(128)).prop_map(|(prev_out, lock_script, unlock_script)| {
        AssetTransferInput::new(prev_out, lock_script, unlock_script)
    })
}

/// Generate a transfer output.
pub fn transfer_output() -> impl Strategy<Value = AssetTransferOutput> {
    (h256(), parameters(), h256(), u256()).prop_map(
        |(lock_script_hash, parameters, asset_type, amount)| AssetTransferOutput {
            lock_script_hash,
            parameters,
            asset_type,
            amount,
        },
    )
}

/// Generate a transfer.
pub fn transfer() -> impl Strategy<Value = AssetTransferTransaction> {
    (
        prop::collection::vec(transfer_input(), 0..2),
        prop::collection::vec(transfer_input(), 0..4),
        prop::collection::vec(transfer_output(), 0..4),
    )
        .prop_map(|(burns, inputs, outputs)| AssetTransferTransaction::new(burns, inputs, outputs))
}
