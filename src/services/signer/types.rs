use serde::{Deserialize, Serialize};

use crate::services::address::AddressError;
use crate::services::keys::{HdError, KeyError};
use crate::services::planner::PlanError;

// =============================================================================
// UNIFIED SIGNING ERROR TAXONOMY
// Failures travel as data inside SigningOutput; nothing here panics.
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum SigningError {
    #[error("no error")]
    Ok,
    #[error("signing failed: {0}")]
    General(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid signing parameters: {0}")]
    InvalidParams(String),
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("missing private key: {0}")]
    MissingPrivateKey(String),
    #[error("not enough inputs: {0}")]
    NotEnoughUtxos(String),
    #[error("zero amount requested")]
    ZeroAmount,
    #[error("unrecognized output script: {0}")]
    ScriptOutput(String),
    #[error("unsupported chain: {0}")]
    UnsupportedChain(String),
}

impl SigningError {
    pub fn is_ok(&self) -> bool {
        matches!(self, SigningError::Ok)
    }
}

impl From<PlanError> for SigningError {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::MissingInputs => SigningError::NotEnoughUtxos("no inputs provided".to_string()),
            PlanError::ZeroAmount => SigningError::ZeroAmount,
            PlanError::InsufficientFunds { .. } => SigningError::NotEnoughUtxos(err.to_string()),
        }
    }
}

impl From<KeyError> for SigningError {
    fn from(err: KeyError) -> Self {
        SigningError::InvalidPrivateKey(err.to_string())
    }
}

impl From<HdError> for SigningError {
    fn from(err: HdError) -> Self {
        SigningError::InvalidPrivateKey(err.to_string())
    }
}

impl From<AddressError> for SigningError {
    fn from(err: AddressError) -> Self {
        SigningError::InvalidAddress(err.to_string())
    }
}

/// Result of a signing run. `error` is `Ok` on success; on failure the
/// payload fields are empty and `error` carries the cause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningOutput {
    pub encoded: Vec<u8>,
    pub tx_id: String,
    pub json: Option<String>,
    pub error: SigningError,
}

impl SigningOutput {
    pub fn success(encoded: Vec<u8>, tx_id: String) -> Self {
        Self { encoded, tx_id, json: None, error: SigningError::Ok }
    }

    pub fn success_with_json(encoded: Vec<u8>, tx_id: String, json: String) -> Self {
        Self { encoded, tx_id, json: Some(json), error: SigningError::Ok }
    }

    pub fn failure(error: SigningError) -> Self {
        Self { encoded: Vec::new(), tx_id: String::new(), json: None, error }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_ok()
    }

    pub fn encoded_hex(&self) -> String {
        hex::encode(&self.encoded)
    }
}
