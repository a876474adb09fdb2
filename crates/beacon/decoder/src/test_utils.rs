//! Beacon API block fixtures.
//!
//! The messages mirror a slot 1 block served by a Lighthouse node, optionally carrying a
//! mainnet execution payload.

use alloy_primitives::{b256, fixed_bytes, B256};
use beacon_primitives::BlsSignature;
use serde_json::{json, Value};

/// `parent_root` of [`block_message`].
pub const PARENT_ROOT: B256 =
    b256!("6a89af5df908893eedbed10ba4c13fc13d5653ce57db637e3bfded73a987bb87");

/// `state_root` of [`block_message`].
pub const STATE_ROOT: B256 =
    b256!("7773ed5a7e944c6238cd0a5c32170663ef2be9efc594fb43ad0f07ecf4c09d2b");

/// `randao_reveal` of [`block_message`].
pub const RANDAO_REVEAL: BlsSignature = fixed_bytes!(
    "8e245a52a0a680fcfe789013e123880c321f237de10cad108dc55dd47290d7cfe50cdaa003c6f783405efdac48cef44e152493abba40d9f9815a060dd6151cb0635906c9e3c1ad4859cada73ccd2d6b8747e4aeeada7d75d454bcc8672afa813"
);

/// `prev_randao` of [`execution_payload`].
pub const PREV_RANDAO: B256 =
    b256!("6474a9820165be467f1d25ed54f4802f72c4c95a19cf4ba4cdb8894f55d74195");

/// `block_hash` (and `parent_hash`) of [`execution_payload`].
pub const EXECUTION_BLOCK_HASH: B256 =
    b256!("cb94e150c06faee9ab2bf12a40b0937ac9eab1879c733ebe3249aafbba2f80b1");

/// A pre-merge block message for slot 1.
pub fn block_message() -> Value {
    json!({
        "slot": "1",
        "proposer_index": "61090",
        "parent_root": "0x6a89af5df908893eedbed10ba4c13fc13d5653ce57db637e3bfded73a987bb87",
        "state_root": "0x7773ed5a7e944c6238cd0a5c32170663ef2be9efc594fb43ad0f07ecf4c09d2b",
        "body": {
            "randao_reveal": "0x8e245a52a0a680fcfe789013e123880c321f237de10cad108dc55dd47290d7cfe50cdaa003c6f783405efdac48cef44e152493abba40d9f9815a060dd6151cb0635906c9e3c1ad4859cada73ccd2d6b8747e4aeeada7d75d454bcc8672afa813",
            "eth1_data": {
                "deposit_root": "0x4e910ac762815c13e316e72506141f5b6b441d58af8e0a049cd3341c25728752",
                "deposit_count": "100596",
                "block_hash": "0x89cb78044843805fb4dab8abd743fc96c2b8e955c58f9b7224d468d85ef57130"
            },
            "graffiti": "0x74656b752f76302e31322e31342b34342d673863656562663600000000000000",
            "proposer_slashings": [],
            "attester_slashings": [],
            "attestations": [
                {
                    "aggregation_bits": "0x0080020004000000008208000102000905",
                    "data": {
                        "slot": "0",
                        "index": "7",
                        "beacon_block_root": "0x6a89af5df908893eedbed10ba4c13fc13d5653ce57db637e3bfded73a987bb87",
                        "source": {
                            "epoch": "0",
                            "root": "0x0000000000000000000000000000000000000000000000000000000000000000"
                        },
                        "target": {
                            "epoch": "0",
                            "root": "0x6a89af5df908893eedbed10ba4c13fc13d5653ce57db637e3bfded73a987bb87"
                        }
                    },
                    "signature": "0x967dd2946358db7e426ed19d4576bc75123520ef6a489ca50002222070ee4611f9cef394e5e3071236a93b825f18a4ad07f1d5a1405e6c984f1d71e03f535d13a2156d6ba22cb0c2b148df23a7b8a7293315d6e74b9a26b64283e8393f2ad4c5"
                }
            ],
            "deposits": [],
            "voluntary_exits": []
        }
    })
}

/// A Bellatrix execution payload.
pub fn execution_payload() -> Value {
    json!({
        "parent_hash": "0xcb94e150c06faee9ab2bf12a40b0937ac9eab1879c733ebe3249aafbba2f80b1",
        "fee_recipient": "0x",
        "state_root": "0x8728474146565003152f9cee496de043fd68566dabdb06116a0d5bfc63e1a5a9",
        "receipts_root": "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
        "logs_bloom": "0x0",
        "prev_randao": "0x6474a9820165be467f1d25ed54f4802f72c4c95a19cf4ba4cdb8894f55d74195",
        "block_number": "15796864",
        "gas_limit": "30000000",
        "gas_used": "12900335",
        "timestamp": "1660932629",
        "total_difficulty": "58750003716598352816469",
        "extra_data": "0x",
        "base_fee": "30487386013",
        "block_hash": "0xcb94e150c06faee9ab2bf12a40b0937ac9eab1879c733ebe3249aafbba2f80b1",
        "transactions": []
    })
}

/// [`block_message`] with [`execution_payload`] in its body.
pub fn block_message_with_payload() -> Value {
    let mut message = block_message();
    message["body"]["execution_payload"] = execution_payload();
    message
}

/// Wraps `message` in a `GET /eth/v2/beacon/blocks/{block_id}` response envelope.
pub fn signed_block_response(message: Value) -> Value {
    json!({
        "version": "phase0",
        "execution_optimistic": false,
        "data": {
            "message": message,
            "signature": "0xa30d70b3e62ff776fe97f7f8b3472194af66849238a958880510e698ec3b8a470916680b1a82f9d4753c023153fbe6db10c464ac532c1c9c8919adb242b05ef7152ba3e6cd08b730eac2154b9802203ead6079c8dfb87f1e900595e6c00b4a9a"
        }
    })
}
