// ===== INTEGRATION TESTS - SUBSTRATE SIGNING =====

use chain_signer::config::chains::{params, Chain};
use chain_signer::services::chains::polkadot::{self, PolkadotSigningInput};
use chain_signer::services::encoding::scale::Era;
use chain_signer::services::keys::{Curve, PrivateKey};
use chain_signer::services::signer::{AnySigner, SigningError, SigningRequest};

use crate::common::hex32;

const GENESIS: &str = "91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3";
const DEST: &str = "13ZLCqJNPsRZYEbwjtZZFpWt9GyFzg5WahXCVWKpWdUJqrQ5";

// ===== TEST 1: MORTAL BALANCE TRANSFER =====

#[test]
fn test_sign_transfer() {
    let input = PolkadotSigningInput {
        genesis_hash: hex32(GENESIS),
        block_hash: hex32("5d2143bb808626d63ad7e1cda70fa8697059d670a992e82cd440fbb95ea40351"),
        nonce: 3,
        spec_version: 26,
        transaction_version: 5,
        tip: 0,
        era: Era::Mortal { period: 64, block: 3_541_050 },
        to_address: DEST.to_string(),
        value: 2_000_000_000,
        call_index: polkadot::BALANCE_TRANSFER_CALL,
        multi_address: false,
        private_key: PrivateKey::from_hex(
            Curve::Ed25519,
            "70a794d4f1019c3ce002f33062f45029c4f930a56b3d20ec477f7668c6bbc37f",
        )
        .unwrap(),
    };

    let payload = polkadot::payload(params(Chain::Polkadot), &input).unwrap();
    assert_eq!(
        hex::encode(&payload),
        "05007120f76076bcb0efdf94c7219e116899d0163ea61cb428183d71324eb33b2bce030094\
         3577a5030c001a0000000500000091b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1e\
         b49219da7a70ce90c35d2143bb808626d63ad7e1cda70fa8697059d670a992e82cd440fbb9\
         5ea40351"
    );

    let output = AnySigner::sign(&SigningRequest::Polkadot(input), Chain::Polkadot);
    assert!(output.is_success());
    assert_eq!(
        output.encoded_hex(),
        "3502849dca538b7a925b8ea979cc546464a3c5f81d2398a3a272f6f93bdf4803f2f7830073\
         e59cef381aedf56d7af076bafff9857ffc1e3bd7d1d7484176ff5b58b73f1211a518e1ed1f\
         d2ea201bd31869c0798bba4ffe753998c409d098b65d25dff801a5030c0005007120f76076\
         bcb0efdf94c7219e116899d0163ea61cb428183d71324eb33b2bce0300943577"
    );
    println!("✅ mortal transfer extrinsic matches the reference bytes");
}

// ===== TEST 2: MULTIADDRESS RUNTIME ENCODING =====

#[test]
fn test_sign_transfer_multi_address() {
    let input = PolkadotSigningInput {
        genesis_hash: hex32(GENESIS),
        block_hash: hex32("7d5fa17b70251d0806f26156b1b698dfd09e040642fa092595ce0a78e9e84fcd"),
        nonce: 1,
        spec_version: 28,
        transaction_version: 6,
        tip: 0,
        era: Era::Mortal { period: 64, block: 3_910_736 },
        to_address: DEST.to_string(),
        value: 10_000_000_000,
        call_index: polkadot::BALANCE_TRANSFER_CALL,
        multi_address: true,
        private_key: PrivateKey::from_hex(
            Curve::Ed25519,
            "37932b086586a6675e66e562fe68bd3eeea4177d066619c602fe3efc290ada62",
        )
        .unwrap(),
    };

    let payload = polkadot::payload(params(Chain::Polkadot), &input).unwrap();
    assert_eq!(
        hex::encode(&payload),
        "0500007120f76076bcb0efdf94c7219e116899d0163ea61cb428183d71324eb33b2bce0700\
         e40b5402050104001c0000000600000091b171bb158e2d3848fa23a9f1c25182fb8e20313b\
         2c1eb49219da7a70ce90c37d5fa17b70251d0806f26156b1b698dfd09e040642fa092595ce\
         0a78e9e84fcd"
    );

    let output = AnySigner::sign(&SigningRequest::Polkadot(input), Chain::Polkadot);
    assert!(output.is_success());
    assert_eq!(
        output.encoded_hex(),
        "410284008d96660f14babe708b5e61853c9f5929bc90dd9874485bf4d6dc32d3e6f22eaa00\
         38ec4973ab9773dfcbf170b8d27d36d89b85c3145e038d68914de83cf1f7aca24af64c55ec\
         51ba9f45c5a4d74a9917dee380e9171108921c3e5546e05be15206050104000500007120f7\
         6076bcb0efdf94c7219e116899d0163ea61cb428183d71324eb33b2bce0700e40b5402"
    );
    println!("✅ MultiAddress wrapping applied to signer and destination");
}

// ===== TEST 3: DESTINATION PREFIX CHECK =====

#[test]
fn test_rejects_foreign_ss58_prefix() {
    let mut input = PolkadotSigningInput {
        genesis_hash: hex32(GENESIS),
        block_hash: hex32(GENESIS),
        nonce: 0,
        spec_version: 26,
        transaction_version: 5,
        tip: 0,
        era: Era::Immortal,
        to_address: DEST.to_string(),
        value: 1,
        call_index: polkadot::BALANCE_TRANSFER_CALL,
        multi_address: false,
        private_key: PrivateKey::new(Curve::Ed25519, &[7u8; 32]).unwrap(),
    };
    // A polkadot-prefixed destination is not valid on kusama.
    let output = AnySigner::sign(&SigningRequest::Polkadot(input.clone()), Chain::Kusama);
    assert!(matches!(output.error, SigningError::InvalidAddress(_)));

    input.to_address = "not an address".to_string();
    let output = AnySigner::sign(&SigningRequest::Polkadot(input), Chain::Polkadot);
    assert!(matches!(output.error, SigningError::InvalidAddress(_)));
    println!("✅ ss58 prefixes are enforced per network");
}
