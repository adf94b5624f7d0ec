// ===== INTEGRATION TESTS - UTXO PLANNER =====

use chain_signer::config::chains::Chain;
use chain_signer::services::planner::{PlanError, PlanRequest};
use chain_signer::services::signer::AnySigner;

use crate::common::utxo;

const TXID_A: &str = "e28c2b955293159898e34c6840d99bf4d390e2ee1c6f606939f18ee1e2000d05";
const TXID_B: &str = "fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f";

fn request(amount: u64, byte_fee: u64, amounts: &[u64]) -> PlanRequest {
    PlanRequest {
        amount,
        byte_fee,
        utxos: amounts
            .iter()
            .enumerate()
            .map(|(i, a)| utxo(TXID_A, i as u32, u32::MAX, "", *a))
            .collect(),
        use_max: false,
    }
}

// ===== TEST 1: LEGACY COST MODEL VIA THE REGISTRY =====

#[test]
fn test_bch_plan_uses_p2pkh_sizes() {
    let plan = AnySigner::plan(&request(600, 1, &[5151]), Chain::BitcoinCash).unwrap();
    assert_eq!(plan.selected.len(), 1);
    // 10 + 148 + 2 * 34 bytes at 1 sat/byte.
    assert_eq!(plan.fee, 226);
    assert_eq!(plan.change, 4325);
    assert_eq!(plan.available, 5151);
    println!("✅ bitcoin cash plan priced with legacy sizes");
}

// ===== TEST 2: SEGWIT COST MODEL VIA THE REGISTRY =====

#[test]
fn test_btc_plan_uses_segwit_sizes() {
    let mut req = request(335_790_000, 1, &[]);
    req.utxos = vec![
        utxo(TXID_B, 0, u32::MAX, "", 625_000_000),
        utxo(TXID_A, 1, u32::MAX, "", 600_000_000),
    ];
    let plan = AnySigner::plan(&req, Chain::Bitcoin).unwrap();
    // The first input already covers the payment.
    assert_eq!(plan.selected.len(), 1);
    assert_eq!(plan.fee, 147);
    assert_eq!(plan.change, 625_000_000 - 335_790_000 - 147);
    assert_eq!(plan.available, 1_225_000_000);
    println!("✅ bitcoin plan priced with segwit sizes");
}

// ===== TEST 3: PER-CHAIN DUST FOLDING =====

#[test]
fn test_dogecoin_dust_threshold() {
    // Residue of one DOGE minus fees is far below the 1-DOGE dust floor.
    let plan =
        AnySigner::plan(&request(150_000_000, 1, &[200_000_000]), Chain::Dogecoin).unwrap();
    assert_eq!(plan.change, 0);
    assert_eq!(plan.fee, 50_000_000);
    assert_eq!(plan.amount + plan.fee, 200_000_000);
    println!("✅ sub-dust change folded into the fee");
}

// ===== TEST 4: SWEEP =====

#[test]
fn test_max_amount_sweep() {
    let mut req = request(0, 1, &[4000, 2000, 6000, 1000]);
    req.use_max = true;
    let plan = AnySigner::plan(&req, Chain::Bitcoin).unwrap();
    assert_eq!(plan.selected.len(), 4);
    // Single output, no change: 11 + 4 * 74 + 31 bytes.
    assert_eq!(plan.fee, 338);
    assert_eq!(plan.amount, 13_000 - 338);
    assert_eq!(plan.change, 0);
    println!("✅ sweep spends every input");
}

// ===== TEST 5: INSUFFICIENT FUNDS =====

#[test]
fn test_insufficient_funds() {
    let err = AnySigner::plan(&request(10_000, 1, &[1000]), Chain::BitcoinCash).unwrap_err();
    assert_eq!(err, PlanError::InsufficientFunds { available: 1000, required: 10_226 });
    println!("✅ shortfall reported with the full requirement");
}
