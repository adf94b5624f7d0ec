use secp256k1::{Message, Secp256k1, SecretKey};
use sha3::{Digest, Keccak256};

use crate::services::address::eip55;
use crate::services::encoding::rlp::{self, Item};
use crate::services::keys::PrivateKey;
use crate::services::signer::types::{SigningError, SigningOutput};

// =============================================================================
// EVM SIGNER
// EIP-155 legacy transactions and EIP-1559 dynamic-fee transactions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    Legacy,
    Eip1559,
}

#[derive(Debug, Clone)]
pub struct EthereumSigningInput {
    pub chain_id: u64,
    pub nonce: u64,
    pub mode: TxMode,
    /// Legacy gas price.
    pub gas_price: u128,
    /// EIP-1559 fee caps.
    pub max_fee_per_gas: u128,
    pub max_inclusion_fee_per_gas: u128,
    pub gas_limit: u64,
    pub to: String,
    pub value: u128,
    pub data: Vec<u8>,
    pub private_key: PrivateKey,
}

pub fn sign(input: &EthereumSigningInput) -> Result<SigningOutput, SigningError> {
    let to = eip55::decode(&input.to)?;
    let secret = SecretKey::from_slice(input.private_key.as_bytes())
        .map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))?;

    let encoded = match input.mode {
        TxMode::Legacy => sign_legacy(input, &to, &secret)?,
        TxMode::Eip1559 => sign_eip1559(input, &to, &secret)?,
    };

    let tx_id = format!("0x{}", hex::encode(Keccak256::digest(&encoded)));
    Ok(SigningOutput::success(encoded, tx_id))
}

/// [nonce, gasPrice, gasLimit, to, value, data, chainId, 0, 0], then the
/// last three fields replaced by [v, r, s] with the EIP-155 v offset.
fn sign_legacy(
    input: &EthereumSigningInput,
    to: &[u8; 20],
    secret: &SecretKey,
) -> Result<Vec<u8>, SigningError> {
    let mut fields = vec![
        Item::uint(input.nonce as u128),
        Item::uint(input.gas_price),
        Item::uint(input.gas_limit as u128),
        Item::bytes(to),
        Item::uint(input.value),
        Item::bytes(&input.data),
    ];
    if input.chain_id != 0 {
        fields.push(Item::uint(input.chain_id as u128));
        fields.push(Item::empty());
        fields.push(Item::empty());
    }

    let pre_hash = Keccak256::digest(rlp::encode(&Item::List(fields.clone())));
    let (recovery, r, s) = recoverable_signature(&pre_hash, secret)?;

    let v = if input.chain_id == 0 {
        27 + recovery as u128
    } else {
        recovery as u128 + 35 + 2 * input.chain_id as u128
    };

    if input.chain_id != 0 {
        fields.truncate(6);
    }
    fields.push(Item::uint(v));
    fields.push(Item::Bytes(r));
    fields.push(Item::Bytes(s));
    Ok(rlp::encode(&Item::List(fields)))
}

/// Type-2 payload: 0x02 || rlp([chainId, nonce, maxTip, maxFee, gasLimit,
/// to, value, data, accessList, yParity, r, s]).
fn sign_eip1559(
    input: &EthereumSigningInput,
    to: &[u8; 20],
    secret: &SecretKey,
) -> Result<Vec<u8>, SigningError> {
    let fields = vec![
        Item::uint(input.chain_id as u128),
        Item::uint(input.nonce as u128),
        Item::uint(input.max_inclusion_fee_per_gas),
        Item::uint(input.max_fee_per_gas),
        Item::uint(input.gas_limit as u128),
        Item::bytes(to),
        Item::uint(input.value),
        Item::bytes(&input.data),
        Item::List(vec![]),
    ];

    let mut pre_image = vec![0x02];
    pre_image.extend(rlp::encode(&Item::List(fields.clone())));
    let pre_hash = Keccak256::digest(&pre_image);
    let (recovery, r, s) = recoverable_signature(&pre_hash, secret)?;

    let mut signed = fields;
    signed.push(Item::uint(recovery as u128));
    signed.push(Item::Bytes(r));
    signed.push(Item::Bytes(s));

    let mut out = vec![0x02];
    out.extend(rlp::encode(&Item::List(signed)));
    Ok(out)
}

fn recoverable_signature(
    pre_hash: &[u8],
    secret: &SecretKey,
) -> Result<(i32, Vec<u8>, Vec<u8>), SigningError> {
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(pre_hash)
        .map_err(|e| SigningError::Internal(e.to_string()))?;
    let signature = secp.sign_ecdsa_recoverable(&message, secret);
    let (recovery, bytes) = signature.serialize_compact();

    Ok((
        recovery.to_i32(),
        trim_leading_zeros(&bytes[..32]),
        trim_leading_zeros(&bytes[32..]),
    ))
}

fn trim_leading_zeros(bytes: &[u8]) -> Vec<u8> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    bytes[start..].to_vec()
}
