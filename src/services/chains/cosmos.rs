use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use secp256k1::{Message, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::chains::ChainParams;
use crate::services::address::bech32_codec;
use crate::services::encoding::protowire::ProtoWriter;
use crate::services::keys::PrivateKey;
use crate::services::signer::types::{SigningError, SigningOutput};

// =============================================================================
// COSMOS SDK SIGNER
// SIGN_MODE_DIRECT over protobuf SignDoc, bank MsgSend payloads
// =============================================================================

const MSG_SEND_TYPE_URL: &str = "/cosmos.bank.v1beta1.MsgSend";
const PUBKEY_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";
const SIGN_MODE_DIRECT: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: u128,
}

#[derive(Debug, Clone)]
pub struct CosmosSigningInput {
    pub chain_id: String,
    pub account_number: u64,
    pub sequence: u64,
    pub memo: String,
    pub fee_amounts: Vec<Coin>,
    pub gas: u64,
    pub from_address: String,
    pub to_address: String,
    pub amounts: Vec<Coin>,
    pub private_key: PrivateKey,
}

pub fn sign(params: &ChainParams, input: &CosmosSigningInput) -> Result<SigningOutput, SigningError> {
    for address in [&input.from_address, &input.to_address] {
        bech32_codec::decode_plain(address, params.hrp)?;
    }
    if input.amounts.is_empty() {
        return Err(SigningError::InvalidParams("no send amounts".to_string()));
    }

    let secret = SecretKey::from_slice(input.private_key.as_bytes())
        .map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))?;
    let public_key = input.private_key.public_key()?;

    let body = encode_body(input);
    let auth_info = encode_auth_info(input, public_key.as_bytes());

    // SignDoc { body_bytes = 1, auth_info_bytes = 2, chain_id = 3,
    // account_number = 4 }
    let mut sign_doc = ProtoWriter::new();
    sign_doc.bytes_field(1, &body);
    sign_doc.bytes_field(2, &auth_info);
    sign_doc.string_field(3, &input.chain_id);
    sign_doc.varint_field(4, input.account_number);

    let digest = Sha256::digest(sign_doc.into_bytes());
    let secp = Secp256k1::new();
    let message = Message::from_digest_slice(&digest)
        .map_err(|e| SigningError::Internal(e.to_string()))?;
    let signature = secp.sign_ecdsa(&message, &secret).serialize_compact();

    // TxRaw { body_bytes = 1, auth_info_bytes = 2, signatures = 3 }
    let mut tx_raw = ProtoWriter::new();
    tx_raw.bytes_field(1, &body);
    tx_raw.bytes_field(2, &auth_info);
    tx_raw.bytes_field(3, &signature);
    let tx_bytes = tx_raw.into_bytes();

    let broadcast = serde_json::json!({
        "mode": "BROADCAST_MODE_BLOCK",
        "tx_bytes": BASE64.encode(&tx_bytes),
    });
    let json = serde_json::to_string(&broadcast)
        .map_err(|e| SigningError::Internal(e.to_string()))?;

    let tx_id = hex::encode_upper(Sha256::digest(&tx_bytes));
    Ok(SigningOutput::success_with_json(tx_bytes, tx_id, json))
}

fn encode_coin(coin: &Coin) -> ProtoWriter {
    let mut w = ProtoWriter::new();
    w.string_field(1, &coin.denom);
    w.string_field(2, &coin.amount.to_string());
    w
}

/// TxBody { messages = 1, memo = 2 } with a single bank MsgSend.
fn encode_body(input: &CosmosSigningInput) -> Vec<u8> {
    let mut msg_send = ProtoWriter::new();
    msg_send.string_field(1, &input.from_address);
    msg_send.string_field(2, &input.to_address);
    for coin in &input.amounts {
        msg_send.message_field(3, encode_coin(coin));
    }

    let mut any = ProtoWriter::new();
    any.string_field(1, MSG_SEND_TYPE_URL);
    any.bytes_field(2, &msg_send.into_bytes());

    let mut body = ProtoWriter::new();
    body.message_field(1, any);
    body.string_field(2, &input.memo);
    body.into_bytes()
}

/// AuthInfo { signer_infos = 1, fee = 2 }
fn encode_auth_info(input: &CosmosSigningInput, public_key: &[u8]) -> Vec<u8> {
    let mut pubkey_msg = ProtoWriter::new();
    pubkey_msg.bytes_field(1, public_key);

    let mut pubkey_any = ProtoWriter::new();
    pubkey_any.string_field(1, PUBKEY_TYPE_URL);
    pubkey_any.bytes_field(2, &pubkey_msg.into_bytes());

    let mut single = ProtoWriter::new();
    single.varint_field(1, SIGN_MODE_DIRECT);
    let mut mode_info = ProtoWriter::new();
    mode_info.message_field(1, single);

    let mut signer_info = ProtoWriter::new();
    signer_info.message_field(1, pubkey_any);
    signer_info.message_field(2, mode_info);
    signer_info.varint_field(3, input.sequence);

    let mut fee = ProtoWriter::new();
    for coin in &input.fee_amounts {
        fee.message_field(1, encode_coin(coin));
    }
    fee.varint_field(2, input.gas);

    let mut auth_info = ProtoWriter::new();
    auth_info.message_field(1, signer_info);
    auth_info.message_field(2, fee);
    auth_info.into_bytes()
}
