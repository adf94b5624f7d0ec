use serde::{Deserialize, Serialize};
use tracing::debug;

// =============================================================================
// UTXO TRANSACTION PLANNER
// Pure fee/selection arithmetic, parameterized by a byte cost model.
// Selection is in-order greedy: inputs are consumed exactly as given.
// =============================================================================

/// Virtual-size model: vsize = base + n_in * per_input + n_out * per_output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostModel {
    pub base_bytes: u64,
    pub bytes_per_input: u64,
    pub bytes_per_output: u64,
}

impl CostModel {
    /// Legacy pay-to-pubkey-hash sizes (1-in/2-out = 226 bytes).
    pub const fn p2pkh() -> Self {
        Self { base_bytes: 10, bytes_per_input: 148, bytes_per_output: 34 }
    }

    /// Native segwit sizes, witness discounted (1-in/2-out = 147 bytes).
    pub const fn segwit() -> Self {
        Self { base_bytes: 11, bytes_per_input: 74, bytes_per_output: 31 }
    }

    pub fn virtual_size(&self, inputs: u64, outputs: u64) -> u64 {
        self.base_bytes + inputs * self.bytes_per_input + outputs * self.bytes_per_output
    }

    pub fn fee(&self, inputs: u64, outputs: u64, byte_fee: u64) -> u64 {
        self.virtual_size(inputs, outputs) * byte_fee
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPoint {
    pub txid: [u8; 32],
    pub vout: u32,
    /// nSequence to use when the input is spent.
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub out_point: OutPoint,
    pub amount: u64,
    pub script: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub amount: u64,
    pub byte_fee: u64,
    pub utxos: Vec<Utxo>,
    pub use_max: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPlan {
    pub selected: Vec<Utxo>,
    /// Amount actually paid to the recipient.
    pub amount: u64,
    /// Total value of all inputs offered.
    pub available: u64,
    pub fee: u64,
    pub change: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum PlanError {
    #[error("no inputs provided")]
    MissingInputs,
    #[error("zero amount requested")]
    ZeroAmount,
    #[error("insufficient funds: available {available}, required {required}")]
    InsufficientFunds { available: u64, required: u64 },
}

/// Select inputs and compute the fee for a payment. `dust` is the change
/// threshold below which residue is folded into the fee.
pub fn plan(
    request: &PlanRequest,
    model: &CostModel,
    dust: u64,
) -> Result<TransactionPlan, PlanError> {
    if request.utxos.is_empty() {
        return Err(PlanError::MissingInputs);
    }
    let available = request
        .utxos
        .iter()
        .fold(0u64, |acc, u| acc.saturating_add(u.amount));

    if request.use_max {
        return plan_max(request, model, available);
    }
    if request.amount == 0 {
        return Err(PlanError::ZeroAmount);
    }

    let mut selected: Vec<Utxo> = Vec::new();
    let mut total: u64 = 0;
    for utxo in &request.utxos {
        selected.push(utxo.clone());
        total = total.saturating_add(utxo.amount);

        let fee = model.fee(selected.len() as u64, 2, request.byte_fee);
        let required = request.amount.saturating_add(fee);
        if total < required {
            continue;
        }

        let change = total - required;
        let plan = if change > 0 && change < dust {
            // Sub-dust residue goes to the miner instead of a change output.
            TransactionPlan {
                selected,
                amount: request.amount,
                available,
                fee: total - request.amount,
                change: 0,
            }
        } else {
            TransactionPlan {
                selected,
                amount: request.amount,
                available,
                fee,
                change,
            }
        };
        debug!(
            inputs = plan.selected.len(),
            amount = plan.amount,
            fee = plan.fee,
            change = plan.change,
            "utxo plan ready"
        );
        return Ok(plan);
    }

    Err(PlanError::InsufficientFunds {
        available,
        required: request
            .amount
            .saturating_add(model.fee(request.utxos.len() as u64, 2, request.byte_fee)),
    })
}

fn plan_max(
    request: &PlanRequest,
    model: &CostModel,
    available: u64,
) -> Result<TransactionPlan, PlanError> {
    let fee = model.fee(request.utxos.len() as u64, 1, request.byte_fee);
    if available <= fee {
        return Err(PlanError::InsufficientFunds { available, required: fee });
    }
    let plan = TransactionPlan {
        selected: request.utxos.clone(),
        amount: available - fee,
        available,
        fee,
        change: 0,
    };
    debug!(
        inputs = plan.selected.len(),
        amount = plan.amount,
        fee = plan.fee,
        "utxo sweep plan ready"
    );
    Ok(plan)
}
