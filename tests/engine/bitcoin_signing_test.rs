// ===== INTEGRATION TESTS - BITCOIN FAMILY SIGNING =====

use chain_signer::config::chains::{params, Chain};
use chain_signer::services::chains::bitcoin::BitcoinSigningInput;
use chain_signer::services::keys::{Curve, PrivateKey};
use chain_signer::services::planner::TransactionPlan;
use chain_signer::services::signer::{AnySigner, SigningError, SigningRequest};

use crate::common::utxo;

const TO_ADDRESS: &str = "1Bp9U1ogV3A14FMvKbRJms7ctyso4Z4Tcx";
const CHANGE_ADDRESS: &str = "1FQc5LdgGHMHEN9nwkjmz6tWkxhPpxBvBU";

fn key(hex: &str) -> PrivateKey {
    PrivateKey::from_hex(Curve::Secp256k1, hex).unwrap()
}

fn input() -> BitcoinSigningInput {
    BitcoinSigningInput {
        private_keys: vec![],
        utxos: vec![],
        to_address: TO_ADDRESS.to_string(),
        change_address: CHANGE_ADDRESS.to_string(),
        amount: 0,
        byte_fee: 1,
        use_max: false,
        plan: None,
        sighash_type: None,
        lock_time: 0,
    }
}

// ===== TEST 1: LEGACY P2PKH SIGNING =====

#[test]
fn test_sign_p2pkh() {
    let mut input = input();
    input.amount = 335_790_000;
    input.private_keys =
        vec![key("bbc27228ddcb9209d7fd6f36b02f7dfa6252af40bb2f1cbc7a557da8027ff866")];
    let spend = utxo(
        "fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f",
        0,
        u32::MAX,
        "76a914b7cd046b6d522a3d61dbcb5235c0e9cc9726545788ac",
        625_000_000,
    );
    input.utxos = vec![spend.clone()];
    input.plan = Some(TransactionPlan {
        selected: vec![spend],
        amount: 335_790_000,
        available: 1_225_000_000,
        fee: 226,
        change: 289_209_774,
    });

    let output = AnySigner::sign(&SigningRequest::Bitcoin(input), Chain::Bitcoin);
    assert!(output.is_success());
    assert_eq!(
        output.encoded_hex(),
        "0100000001fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f\
         000000006a47304402202819d70d4bec472113a1392cadc0860a7a1b34ea0869abb4bdce32\
         90c3aba086022023eff75f410ad19cdbe6c6a017362bd554ce5fb906c13534ddc306be117a\
         d30a012103c9f4836b9a4f77fc0d81f7bcb01b7f1b35916864b9476c241ce9fc198bd25432\
         ffffffff02b0bf0314000000001976a914769bdff96a02f9135a1d19b749db6a78fe07dc90\
         88acaefd3c11000000001976a9149e089b6889e032d46e3b915a3392edfd616fb1c488ac00\
         000000"
    );
    assert_eq!(
        output.tx_id,
        "430d6205de8d19a1630302bf4dd84be9e3768a6f6beb1db4dd224c66ecfd1bd1"
    );
    println!("✅ legacy P2PKH transaction matches the reference bytes");
}

// ===== TEST 2: BIP-143 SEGWIT SIGNING, MIXED INPUTS =====

#[test]
fn test_sign_p2wpkh_bip143() {
    let mut input = input();
    input.to_address = "1Cu32FVupVCgHkMMRJdYJugxwo2Aprgk7H".to_string();
    input.change_address = "16TZ8J6Q5iZKBWizWzFAYnrsaox5Z5aBRV".to_string();
    input.amount = 112_340_000;
    input.lock_time = 0x11;
    input.private_keys = vec![
        key("bbc27228ddcb9209d7fd6f36b02f7dfa6252af40bb2f1cbc7a557da8027ff866"),
        key("619c335025c7f4012e556c2a58b2506e30b8511b53ade95ea316fd8c3286feb9"),
    ];
    let p2pk = utxo(
        "fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f",
        0,
        0xffff_ffee,
        "2103c9f4836b9a4f77fc0d81f7bcb01b7f1b35916864b9476c241ce9fc198bd25432ac",
        625_000_000,
    );
    let p2wpkh = utxo(
        "ef51e1b804cc89d182d279655c3aa89e815b1b309fe287d9b2b55d57b90ec68a",
        1,
        u32::MAX,
        "00141d0f172a0ecb48aee1be1f2687d2963ae33f71a1",
        600_000_000,
    );
    input.utxos = vec![p2pk.clone(), p2wpkh.clone()];
    input.plan = Some(TransactionPlan {
        selected: vec![p2pk, p2wpkh],
        amount: 112_340_000,
        available: 1_225_000_000,
        fee: 265_210_000,
        change: 223_450_000,
    });

    let output = AnySigner::sign(&SigningRequest::Bitcoin(input), Chain::Bitcoin);
    assert!(output.is_success());
    assert_eq!(
        output.encoded_hex(),
        "01000000000102fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad\
         969f00000000494830450221008b9d1dc26ba6a9cb62127b02742fa9d754cd3bebf337f7a5\
         5d114c8e5cdd30be022040529b194ba3f9281a99f2b1c0a19c0489bc22ede944ccf4ecbab4\
         cc618ef3ed01eeffffffef51e1b804cc89d182d279655c3aa89e815b1b309fe287d9b2b55d\
         57b90ec68a0100000000ffffffff02202cb206000000001976a9148280b37df378db99f66f\
         85c95a783a76ac7a6d5988ac9093510d000000001976a9143bde42dbee7e4dbe6a21b2d50c\
         e2f0167faa815988ac000247304402203609e17b84f6a7d30c80bfa610b5b4542f32a8a0d5\
         447a12fb1366d7f01cc44a0220573a954c4518331561406f90300e8f3358f51928d43c212a\
         8caed02de67eebee0121025476c2e83188368da1ff3e292e7acafcdb3566bb0ad253f62fc7\
         0f07aeee635711000000"
    );
    assert_eq!(
        output.tx_id,
        "e8151a2af31c368a35053ddd4bdb285a8595c769a3ad83e0fa02314a602d4609"
    );
    println!("✅ BIP-143 witness transaction matches the reference bytes");
}

// ===== TEST 3: BITCOIN CASH FORKID, PLANNER END TO END =====

#[test]
fn test_sign_bitcoin_cash() {
    let mut input = input();
    input.amount = 600;
    input.private_keys =
        vec![key("7fdafb9db5bc501f2096e7d13d331dc7a75d9594af3d251313ba8b6200f4e384")];
    input.utxos = vec![utxo(
        "e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05",
        2,
        u32::MAX,
        "76a914aff1e0789e5fe316b729577665aa0a04d5b0f8c788ac",
        5151,
    )];

    let output = AnySigner::sign(&SigningRequest::Bitcoin(input), Chain::BitcoinCash);
    assert!(output.is_success());
    assert_eq!(
        output.encoded_hex(),
        "0100000001e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05\
         020000006b483045022100b70d158b43cbcded60e6977e93f9a84966bc0cec6f2dfd1463d1\
         223a90563f0d02207548d081069de570a494d0967ba388ff02641d91cadb060587ead95a98\
         d4e3534121038eab72ec78e639d02758e7860cdec018b49498c307791f785aa3019622f4ea\
         5bffffffff0258020000000000001976a914769bdff96a02f9135a1d19b749db6a78fe07dc\
         9088ace5100000000000001976a9149e089b6889e032d46e3b915a3392edfd616fb1c488ac\
         00000000"
    );
    assert_eq!(
        output.tx_id,
        "96ee20002b34e468f9d3c5ee54f6a8ddaa61c118889c4f35395c2cd93ba5bbb4"
    );
    println!("✅ FORKID transaction planned and signed end to end");
}

// ===== TEST 4: MISSING PRIVATE KEY =====

#[test]
fn test_missing_private_key() {
    let mut input = input();
    input.amount = 600;
    input.utxos = vec![utxo(
        "e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05",
        2,
        u32::MAX,
        "76a914aff1e0789e5fe316b729577665aa0a04d5b0f8c788ac",
        5151,
    )];

    let output = AnySigner::sign(&SigningRequest::Bitcoin(input), Chain::BitcoinCash);
    assert!(matches!(output.error, SigningError::MissingPrivateKey(_)));
    assert!(output.encoded.is_empty());
    println!("✅ missing key surfaces as data, not a panic");
}

// ===== TEST 5: UNRECOGNIZED PREVIOUS OUTPUT =====

#[test]
fn test_unknown_utxo_script() {
    let mut input = input();
    input.amount = 600;
    input.private_keys =
        vec![key("7fdafb9db5bc501f2096e7d13d331dc7a75d9594af3d251313ba8b6200f4e384")];
    // OP_RETURN output, never spendable.
    input.utxos = vec![utxo(
        "e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05",
        0,
        u32::MAX,
        "6a0101",
        5151,
    )];

    let output = AnySigner::sign(&SigningRequest::Bitcoin(input), Chain::BitcoinCash);
    assert!(matches!(output.error, SigningError::ScriptOutput(_)));
    println!("✅ unspendable scripts are refused");
}

// ===== TEST 6: FOREIGN DESTINATION ADDRESS =====

#[test]
fn test_wrong_network_destination() {
    let mut input = input();
    input.amount = 600;
    // Dogecoin destination on a bitcoin cash transaction.
    input.to_address = "DJRFZNg8jkUtjcpo2zJd92FUAzwRjitw6f".to_string();
    input.private_keys =
        vec![key("7fdafb9db5bc501f2096e7d13d331dc7a75d9594af3d251313ba8b6200f4e384")];
    input.utxos = vec![utxo(
        "e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05",
        2,
        u32::MAX,
        "76a914aff1e0789e5fe316b729577665aa0a04d5b0f8c788ac",
        5151,
    )];

    let output = AnySigner::sign(&SigningRequest::Bitcoin(input), Chain::BitcoinCash);
    assert!(matches!(output.error, SigningError::InvalidAddress(_)));
    println!("✅ wrong-network destinations are rejected");
}
