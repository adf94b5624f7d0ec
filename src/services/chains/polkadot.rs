use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use ed25519_dalek::{Signer, SigningKey};

use crate::config::chains::ChainParams;
use crate::services::address::ss58;
use crate::services::encoding::scale::{compact, Era};
use crate::services::keys::PrivateKey;
use crate::services::signer::types::{SigningError, SigningOutput};

type Blake2b256 = Blake2b<U32>;

// =============================================================================
// SUBSTRATE SIGNER
// SCALE-encoded balance-transfer extrinsics for Polkadot and Kusama
// =============================================================================

/// Extrinsic format version 4, signed bit set.
const EXTRINSIC_VERSION_SIGNED: u8 = 0x84;
/// Signature scheme tag for ed25519.
const SIGNATURE_TYPE_ED25519: u8 = 0x00;
/// MultiAddress::Id tag.
const MULTI_ADDRESS_ID: u8 = 0x00;
/// Balances pallet transfer call.
pub const BALANCE_TRANSFER_CALL: [u8; 2] = [0x05, 0x00];

#[derive(Debug, Clone)]
pub struct PolkadotSigningInput {
    pub genesis_hash: [u8; 32],
    pub block_hash: [u8; 32],
    pub nonce: u64,
    pub spec_version: u32,
    pub transaction_version: u32,
    pub tip: u128,
    pub era: Era,
    pub to_address: String,
    pub value: u128,
    /// Pallet and call indices of the transfer call.
    pub call_index: [u8; 2],
    /// Newer runtimes wrap account ids in MultiAddress. Runtime dependent,
    /// so callers choose; the registry carries the chain default.
    pub multi_address: bool,
    pub private_key: PrivateKey,
}

fn encode_call(params: &ChainParams, input: &PolkadotSigningInput) -> Result<Vec<u8>, SigningError> {
    let dest = ss58::decode(&input.to_address, params.ss58_network)?;
    let mut call = Vec::new();
    call.extend_from_slice(&input.call_index);
    if input.multi_address {
        call.push(MULTI_ADDRESS_ID);
    }
    call.extend_from_slice(&dest);
    call.extend_from_slice(&compact(input.value));
    Ok(call)
}

/// The unsigned signing payload:
/// call | era | nonce | tip | spec | tx version | genesis | block
pub fn payload(params: &ChainParams, input: &PolkadotSigningInput) -> Result<Vec<u8>, SigningError> {
    let call = encode_call(params, input)?;
    let mut payload = Vec::new();
    payload.extend_from_slice(&call);
    payload.extend_from_slice(&input.era.encode());
    payload.extend_from_slice(&compact(input.nonce as u128));
    payload.extend_from_slice(&compact(input.tip));
    payload.extend_from_slice(&input.spec_version.to_le_bytes());
    payload.extend_from_slice(&input.transaction_version.to_le_bytes());
    payload.extend_from_slice(&input.genesis_hash);
    payload.extend_from_slice(&input.block_hash);
    Ok(payload)
}

pub fn sign(params: &ChainParams, input: &PolkadotSigningInput) -> Result<SigningOutput, SigningError> {
    let call = encode_call(params, input)?;
    let signing_payload = payload(params, input)?;

    let signing_key = SigningKey::from_bytes(input.private_key.as_bytes());

    // Long payloads are signed through their blake2b hash.
    let signature = if signing_payload.len() > 256 {
        let hash = Blake2b256::digest(&signing_payload);
        signing_key.sign(&hash)
    } else {
        signing_key.sign(&signing_payload)
    };

    let mut body = Vec::new();
    body.push(EXTRINSIC_VERSION_SIGNED);
    if input.multi_address {
        body.push(MULTI_ADDRESS_ID);
    }
    body.extend_from_slice(&signing_key.verifying_key().to_bytes());
    body.push(SIGNATURE_TYPE_ED25519);
    body.extend_from_slice(&signature.to_bytes());
    body.extend_from_slice(&input.era.encode());
    body.extend_from_slice(&compact(input.nonce as u128));
    body.extend_from_slice(&compact(input.tip));
    body.extend_from_slice(&call);

    let mut encoded = compact(body.len() as u128);
    encoded.extend_from_slice(&body);

    let tx_id = hex::encode(Blake2b256::digest(&encoded));
    Ok(SigningOutput::success(encoded, tx_id))
}
