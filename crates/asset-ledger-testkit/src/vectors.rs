//! Golden test vectors for deterministic verification.
//!
//! Each vector pins the canonical bytes, the content hash and both derived
//! addresses of one mint transaction. Any change to the encoding, the hash
//! function or the address masks breaks them.

use asset_ledger_core::{AssetMintBuilder, AssetMintTransaction, H160, H256, U256};

/// A golden mint vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    pub metadata: &'static str,
    pub lock_script_hash: [u8; 32],
    pub parameters: &'static [&'static [u8]],
    pub amount: Option<u128>,
    pub registrar: Option<[u8; 20]>,
    /// Expected canonical bytes (hex).
    pub expected_rlp: &'static str,
    /// Expected content hash (hex).
    pub expected_hash: &'static str,
    pub expected_asset_scheme_address: &'static str,
    pub expected_asset_address: &'static str,
}

const LOCK_ONE: [u8; 32] = {
    let mut bytes = [0u8; 32];
    bytes[31] = 1;
    bytes
};

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "minimal mint",
            metadata: "m",
            lock_script_hash: LOCK_ONE,
            parameters: &[],
            amount: None,
            registrar: None,
            expected_rlp: "e6036da00000000000000000000000000000000000000000000000000000000000000001c0c0c0",
            expected_hash: "5a7e60ff7649f5fbc82ae0788ec2217ae94ca5d2ea12d9ccf139457693519a8f",
            expected_asset_scheme_address: "5300000000000000b8946b32a76ac880b9796299274d5afa8c4958ff71c68871",
            expected_asset_address: "4100000000000000c0cba0dfaf5401ea69ab0d7f97fb692835178adbe7d5a3cd",
        },
        GoldenVector {
            name: "capped mint with parameter",
            metadata: "gold",
            lock_script_hash: [0x11; 32],
            parameters: &[&[0x01, 0x02]],
            amount: Some(1000),
            registrar: None,
            expected_rlp: "f00384676f6c64a01111111111111111111111111111111111111111111111111111111111111111c3820102c38203e8c0",
            expected_hash: "9e7b651b61756e74c6c81c39835468d7ea61051413edbf333d411df2511c0765",
            expected_asset_scheme_address: "5300000000000000471c8a29f1cdc58d4fa8bb57abb0265771a0a0e085ba1649",
            expected_asset_address: "4100000000000000daba9ff4c468f6c8e3123ddd08ce5249332f02cc9e9fed9c",
        },
        GoldenVector {
            name: "zero amount is present",
            metadata: "m",
            lock_script_hash: LOCK_ONE,
            parameters: &[],
            amount: Some(0),
            registrar: None,
            expected_rlp: "e7036da00000000000000000000000000000000000000000000000000000000000000001c0c180c0",
            expected_hash: "ef94577a78a05b68373b1c0ec9953686968257e60a8a6cc38eef7f324453288e",
            expected_asset_scheme_address: "5300000000000000eeadb100ec8c0c41a17dbb7ddb06ec21e2a7149d4bed62c2",
            expected_asset_address: "4100000000000000caf4d3852f32726527c3d9bdd5c40c86ab0a6947c02e9e6a",
        },
        GoldenVector {
            name: "registrar and wide amount",
            metadata: "{\"name\":\"silver\"}",
            lock_script_hash: [0x22; 32],
            parameters: &[&[0xaa; 20], &[]],
            amount: Some(1u128 << 64),
            registrar: Some([0x07; 20]),
            expected_rlp: "f86c03917b226e616d65223a2273696c766572227da02222222222222222222222222222222222222222222222222222222222222222d694aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa80ca89010000000000000000d5940707070707070707070707070707070707070707",
            expected_hash: "8766b2624f37d1609690b7b5068572ec5cdf951021ef00f011e8a6d999af9b3a",
            expected_asset_scheme_address: "5300000000000000102f7e87c9c0eca645d69cbe92c7122786bf457b39af075a",
            expected_asset_address: "4100000000000000117a95c25b95c638881e2f7eae5e7e56b53ea779d50927f9",
        },
        GoldenVector {
            name: "metadata past the short string limit",
            metadata: "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx",
            lock_script_hash: [0x33; 32],
            parameters: &[],
            amount: Some(1),
            registrar: None,
            expected_rlp: "f86403b83c787878787878787878787878787878787878787878787878787878787878787878787878787878787878787878787878787878787878787878787878a03333333333333333333333333333333333333333333333333333333333333333c0c101c0",
            expected_hash: "442d9f0cdd0d6fcb4c581cc1a56aff84400c56604fed243acc16288b77876bbb",
            expected_asset_scheme_address: "53000000000000006a76ab6f51284605d5e1700b8b6b5391feafabd4bfe94882",
            expected_asset_address: "41000000000000009c94d8f2af8a0229a7ded006afc7969b4589521052289fc2",
        },
    ]
}

/// Build the mint a golden vector describes.
pub fn mint_from_vector(vector: &GoldenVector) -> AssetMintTransaction {
    let mut builder = AssetMintBuilder::new(H256::from_bytes(vector.lock_script_hash))
        .metadata(vector.metadata);

    for p in vector.parameters {
        builder = builder.parameter(p.to_vec());
    }
    if let Some(amount) = vector.amount {
        builder = builder.amount(U256::from(amount));
    }
    if let Some(registrar) = vector.registrar {
        builder = builder.registrar(H160::from_bytes(registrar));
    }

    builder.build()
}

/// Check every vector, returning `(name, matches, computed hash)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let tx = mint_from_vector(v);
            let hash = tx.hash().to_hex();
            let matches = hex::encode(tx.rlp_bytes()) == v.expected_rlp
                && hash == v.expected_hash
                && tx.asset_scheme_address().to_hex() == v.expected_asset_scheme_address
                && tx.asset_address().to_hex() == v.expected_asset_address;

            (v.name.to_string(), matches, hash)
        })
        .collect()
}
