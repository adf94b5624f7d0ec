// ===== SHARED TEST FIXTURES =====

#![allow(dead_code)]

use chain_signer::services::keys::seed_from_mnemonic;
use chain_signer::services::planner::{OutPoint, Utxo};

/// The BIP-39 reference mnemonic used across the derivation tests.
pub const TEST_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

pub fn test_seed() -> [u8; 64] {
    seed_from_mnemonic(TEST_MNEMONIC, "").unwrap()
}

pub fn hex32(s: &str) -> [u8; 32] {
    hex::decode(s).unwrap().try_into().unwrap()
}

/// Build a spendable input. `txid` is given exactly as it appears in the
/// serialized transaction.
pub fn utxo(txid: &str, vout: u32, sequence: u32, script: &str, amount: u64) -> Utxo {
    Utxo {
        out_point: OutPoint { txid: hex32(txid), vout, sequence },
        amount,
        script: hex::decode(script).unwrap(),
    }
}
