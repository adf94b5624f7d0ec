pub mod types;

pub use types::{SigningError, SigningOutput};

use tracing::{debug, warn};

use crate::config::chains::{self, Chain, ChainFamily};
use crate::services::chains::{bitcoin, cosmos, ethereum, polkadot};
use crate::services::planner::{self, PlanError, PlanRequest, TransactionPlan};

// =============================================================================
// ANY-SIGNER FACADE
// Single entry point dispatching to the per-family signers. Failures are
// returned as data; nothing here panics.
// =============================================================================

/// A signing request for one of the supported chain families.
#[derive(Debug, Clone)]
pub enum SigningRequest {
    Bitcoin(bitcoin::BitcoinSigningInput),
    Ethereum(ethereum::EthereumSigningInput),
    Cosmos(cosmos::CosmosSigningInput),
    Polkadot(polkadot::PolkadotSigningInput),
}

impl SigningRequest {
    fn family(&self) -> ChainFamily {
        match self {
            SigningRequest::Bitcoin(_) => ChainFamily::Utxo,
            SigningRequest::Ethereum(_) => ChainFamily::Evm,
            SigningRequest::Cosmos(_) => ChainFamily::Cosmos,
            SigningRequest::Polkadot(_) => ChainFamily::Substrate,
        }
    }
}

pub struct AnySigner;

impl AnySigner {
    /// Sign a transaction for `chain`. The request family must match the
    /// chain's family.
    pub fn sign(request: &SigningRequest, chain: Chain) -> SigningOutput {
        let params = chains::params(chain);
        debug!(chain = params.symbol, "dispatching signing request");

        if params.family == ChainFamily::Account {
            return SigningOutput::failure(SigningError::UnsupportedChain(format!(
                "{} has no transaction signer",
                params.symbol
            )));
        }
        if request.family() != params.family {
            return SigningOutput::failure(SigningError::InvalidParams(format!(
                "request family {:?} does not match {}",
                request.family(),
                params.symbol
            )));
        }

        let result = match request {
            SigningRequest::Bitcoin(input) => bitcoin::sign(params, input),
            SigningRequest::Ethereum(input) => ethereum::sign(input),
            SigningRequest::Cosmos(input) => cosmos::sign(params, input),
            SigningRequest::Polkadot(input) => polkadot::sign(params, input),
        };
        match result {
            Ok(output) => output,
            Err(error) => {
                warn!(chain = params.symbol, %error, "signing failed");
                SigningOutput::failure(error)
            }
        }
    }

    /// Run the UTXO planner with the chain's cost model and dust threshold.
    pub fn plan(request: &PlanRequest, chain: Chain) -> Result<TransactionPlan, PlanError> {
        let params = chains::params(chain);
        planner::plan(request, &params.cost_model, params.dust)
    }

    /// Whether signing output for the chain carries a JSON broadcast
    /// envelope.
    pub fn supports_json(chain: Chain) -> bool {
        chains::params(chain).supports_json
    }
}
