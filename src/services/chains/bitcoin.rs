use secp256k1::{Message, Secp256k1, SecretKey};
use std::collections::HashMap;

use crate::config::chains::{ChainParams, SIGHASH_FORKID};
use crate::services::address::{base58check, bech32_codec, double_sha256, hash160};
use crate::services::keys::PrivateKey;
use crate::services::planner::{self, PlanRequest, TransactionPlan, Utxo};
use crate::services::signer::types::{SigningError, SigningOutput};

// =============================================================================
// BITCOIN-FAMILY SIGNER
// Covers Bitcoin, Bitcoin Cash (FORKID) and Dogecoin. Legacy and BIP143
// sighash, P2PKH / P2WPKH / P2PK inputs.
// =============================================================================

const TX_VERSION: u32 = 1;

#[derive(Debug, Clone)]
pub struct BitcoinSigningInput {
    pub private_keys: Vec<PrivateKey>,
    pub utxos: Vec<Utxo>,
    pub to_address: String,
    pub change_address: String,
    pub amount: u64,
    pub byte_fee: u64,
    pub use_max: bool,
    /// Caller-computed plan; fees and selection are taken verbatim.
    pub plan: Option<TransactionPlan>,
    /// Overrides the chain's default sighash type.
    pub sighash_type: Option<u32>,
    pub lock_time: u32,
}

/// Recognized previous-output script shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptKind {
    P2pkh([u8; 20]),
    P2wpkh([u8; 20]),
    P2pk(Vec<u8>),
}

/// Classify a previous-output script.
pub fn classify_script(script: &[u8]) -> Option<ScriptKind> {
    match script {
        // OP_DUP OP_HASH160 <20> OP_EQUALVERIFY OP_CHECKSIG
        [0x76, 0xa9, 0x14, h160 @ .., 0x88, 0xac] if h160.len() == 20 => {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(h160);
            Some(ScriptKind::P2pkh(hash))
        }
        // OP_0 <20>
        [0x00, 0x14, program @ ..] if program.len() == 20 => {
            let mut hash = [0u8; 20];
            hash.copy_from_slice(program);
            Some(ScriptKind::P2wpkh(hash))
        }
        // <33|65 byte pubkey> OP_CHECKSIG
        [len, rest @ ..] if (*len == 33 || *len == 65) && rest.len() == *len as usize + 1 => {
            if rest[rest.len() - 1] != 0xac {
                return None;
            }
            Some(ScriptKind::P2pk(rest[..rest.len() - 1].to_vec()))
        }
        _ => None,
    }
}

pub fn p2pkh_script(h160: &[u8; 20]) -> Vec<u8> {
    let mut script = Vec::with_capacity(25);
    script.extend_from_slice(&[0x76, 0xa9, 0x14]);
    script.extend_from_slice(h160);
    script.extend_from_slice(&[0x88, 0xac]);
    script
}

/// Output script for an address, validated against the chain parameters.
pub fn output_script(params: &ChainParams, address: &str) -> Result<Vec<u8>, SigningError> {
    if let Ok((version, payload)) = base58check::decode(address) {
        if version != params.p2pkh_version || payload.len() != 20 {
            return Err(SigningError::InvalidAddress(address.to_string()));
        }
        let mut h160 = [0u8; 20];
        h160.copy_from_slice(&payload);
        return Ok(p2pkh_script(&h160));
    }
    if !params.hrp.is_empty() {
        if let Ok((version, program)) = bech32_codec::decode_segwit(address, params.hrp) {
            let mut script = Vec::with_capacity(2 + program.len());
            // OP_0 for v0, OP_1..OP_16 for later versions.
            script.push(if version == 0 { 0x00 } else { 0x50 + version });
            script.push(program.len() as u8);
            script.extend_from_slice(&program);
            return Ok(script);
        }
    }
    Err(SigningError::InvalidAddress(address.to_string()))
}

struct TxOutput {
    amount: u64,
    script: Vec<u8>,
}

struct SignedInput {
    script_sig: Vec<u8>,
    witness: Vec<Vec<u8>>,
}

pub fn sign(params: &ChainParams, input: &BitcoinSigningInput) -> Result<SigningOutput, SigningError> {
    let plan = match &input.plan {
        Some(plan) => plan.clone(),
        None => planner::plan(
            &PlanRequest {
                amount: input.amount,
                byte_fee: input.byte_fee,
                utxos: input.utxos.clone(),
                use_max: input.use_max,
            },
            &params.cost_model,
            params.dust,
        )?,
    };
    let sighash_type = input.sighash_type.unwrap_or(params.default_sighash);

    let mut outputs = vec![TxOutput {
        amount: plan.amount,
        script: output_script(params, &input.to_address)?,
    }];
    if plan.change > 0 {
        outputs.push(TxOutput {
            amount: plan.change,
            script: output_script(params, &input.change_address)?,
        });
    }

    // Private keys indexed by pubkey hash and by raw pubkey.
    let secp = Secp256k1::new();
    let mut by_hash: HashMap<[u8; 20], (SecretKey, Vec<u8>)> = HashMap::new();
    let mut by_pubkey: HashMap<Vec<u8>, (SecretKey, Vec<u8>)> = HashMap::new();
    for key in &input.private_keys {
        let secret = SecretKey::from_slice(key.as_bytes())
            .map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))?;
        let public = key.public_key()?.as_bytes().to_vec();
        by_hash.insert(hash160(&public), (secret, public.clone()));
        by_pubkey.insert(public.clone(), (secret, public));
    }

    let forkid = sighash_type & SIGHASH_FORKID != 0;
    let mut signed_inputs = Vec::with_capacity(plan.selected.len());
    for (index, utxo) in plan.selected.iter().enumerate() {
        let kind = classify_script(&utxo.script).ok_or_else(|| {
            SigningError::ScriptOutput(hex::encode(&utxo.script))
        })?;

        let signed = match kind {
            ScriptKind::P2pkh(h160) => {
                let (secret, public) = by_hash.get(&h160).ok_or_else(|| {
                    SigningError::MissingPrivateKey(hex::encode(h160))
                })?;
                let digest = if forkid {
                    bip143_digest(input, &plan, &outputs, index, &utxo.script, utxo.amount, sighash_type)
                } else {
                    legacy_digest(input, &plan, &outputs, index, &utxo.script, sighash_type)
                };
                let signature = encode_signature(&secp, &digest, secret, sighash_type)?;
                let mut script_sig = push_data(&signature);
                script_sig.extend(push_data(public));
                SignedInput { script_sig, witness: Vec::new() }
            }
            ScriptKind::P2wpkh(program) => {
                let (secret, public) = by_hash.get(&program).ok_or_else(|| {
                    SigningError::MissingPrivateKey(hex::encode(program))
                })?;
                let script_code = p2pkh_script(&program);
                let digest =
                    bip143_digest(input, &plan, &outputs, index, &script_code, utxo.amount, sighash_type);
                let signature = encode_signature(&secp, &digest, secret, sighash_type)?;
                SignedInput { script_sig: Vec::new(), witness: vec![signature, public.clone()] }
            }
            ScriptKind::P2pk(public) => {
                let (secret, _) = by_pubkey.get(&public).ok_or_else(|| {
                    SigningError::MissingPrivateKey(hex::encode(&public))
                })?;
                let digest = if forkid {
                    bip143_digest(input, &plan, &outputs, index, &utxo.script, utxo.amount, sighash_type)
                } else {
                    legacy_digest(input, &plan, &outputs, index, &utxo.script, sighash_type)
                };
                let signature = encode_signature(&secp, &digest, secret, sighash_type)?;
                SignedInput { script_sig: push_data(&signature), witness: Vec::new() }
            }
        };
        signed_inputs.push(signed);
    }

    let encoded = serialize(input, &plan, &outputs, &signed_inputs, true);
    let no_witness = serialize(input, &plan, &outputs, &signed_inputs, false);

    let mut txid = double_sha256(&no_witness);
    txid.reverse();
    Ok(SigningOutput::success(encoded, hex::encode(txid)))
}

fn encode_signature(
    secp: &Secp256k1<secp256k1::All>,
    digest: &[u8; 32],
    secret: &SecretKey,
    sighash_type: u32,
) -> Result<Vec<u8>, SigningError> {
    let message = Message::from_digest_slice(digest)
        .map_err(|e| SigningError::Internal(e.to_string()))?;
    let signature = secp.sign_ecdsa(&message, secret);
    let mut out = signature.serialize_der().to_vec();
    out.push((sighash_type & 0xff) as u8);
    Ok(out)
}

fn push_data(data: &[u8]) -> Vec<u8> {
    // All pushed items here fit a direct length opcode.
    let mut out = Vec::with_capacity(1 + data.len());
    out.push(data.len() as u8);
    out.extend_from_slice(data);
    out
}

fn write_varint(out: &mut Vec<u8>, value: u64) {
    match value {
        0..=0xfc => out.push(value as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(value as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(value as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&value.to_le_bytes());
        }
    }
}

fn write_outputs(out: &mut Vec<u8>, outputs: &[TxOutput]) {
    write_varint(out, outputs.len() as u64);
    for output in outputs {
        out.extend_from_slice(&output.amount.to_le_bytes());
        write_varint(out, output.script.len() as u64);
        out.extend_from_slice(&output.script);
    }
}

/// Original Satoshi signature hash: all other input scripts blanked.
fn legacy_digest(
    input: &BitcoinSigningInput,
    plan: &TransactionPlan,
    outputs: &[TxOutput],
    signing_index: usize,
    script_code: &[u8],
    sighash_type: u32,
) -> [u8; 32] {
    let mut data = Vec::new();
    data.extend_from_slice(&TX_VERSION.to_le_bytes());
    write_varint(&mut data, plan.selected.len() as u64);
    for (index, utxo) in plan.selected.iter().enumerate() {
        data.extend_from_slice(&utxo.out_point.txid);
        data.extend_from_slice(&utxo.out_point.vout.to_le_bytes());
        if index == signing_index {
            write_varint(&mut data, script_code.len() as u64);
            data.extend_from_slice(script_code);
        } else {
            write_varint(&mut data, 0);
        }
        data.extend_from_slice(&utxo.out_point.sequence.to_le_bytes());
    }
    write_outputs(&mut data, outputs);
    data.extend_from_slice(&input.lock_time.to_le_bytes());
    data.extend_from_slice(&sighash_type.to_le_bytes());
    double_sha256(&data)
}

/// BIP143 signature hash, also used by Bitcoin Cash with FORKID.
fn bip143_digest(
    input: &BitcoinSigningInput,
    plan: &TransactionPlan,
    outputs: &[TxOutput],
    signing_index: usize,
    script_code: &[u8],
    amount: u64,
    sighash_type: u32,
) -> [u8; 32] {
    let mut prevouts = Vec::new();
    let mut sequences = Vec::new();
    for utxo in &plan.selected {
        prevouts.extend_from_slice(&utxo.out_point.txid);
        prevouts.extend_from_slice(&utxo.out_point.vout.to_le_bytes());
        sequences.extend_from_slice(&utxo.out_point.sequence.to_le_bytes());
    }
    let mut outs = Vec::new();
    for output in outputs {
        outs.extend_from_slice(&output.amount.to_le_bytes());
        write_varint(&mut outs, output.script.len() as u64);
        outs.extend_from_slice(&output.script);
    }

    let signing = &plan.selected[signing_index];
    let mut data = Vec::new();
    data.extend_from_slice(&TX_VERSION.to_le_bytes());
    data.extend_from_slice(&double_sha256(&prevouts));
    data.extend_from_slice(&double_sha256(&sequences));
    data.extend_from_slice(&signing.out_point.txid);
    data.extend_from_slice(&signing.out_point.vout.to_le_bytes());
    write_varint(&mut data, script_code.len() as u64);
    data.extend_from_slice(script_code);
    data.extend_from_slice(&amount.to_le_bytes());
    data.extend_from_slice(&signing.out_point.sequence.to_le_bytes());
    data.extend_from_slice(&double_sha256(&outs));
    data.extend_from_slice(&input.lock_time.to_le_bytes());
    data.extend_from_slice(&sighash_type.to_le_bytes());
    double_sha256(&data)
}

fn serialize(
    input: &BitcoinSigningInput,
    plan: &TransactionPlan,
    outputs: &[TxOutput],
    signed_inputs: &[SignedInput],
    with_witness: bool,
) -> Vec<u8> {
    let has_witness = with_witness && signed_inputs.iter().any(|i| !i.witness.is_empty());

    let mut data = Vec::new();
    data.extend_from_slice(&TX_VERSION.to_le_bytes());
    if has_witness {
        data.push(0x00);
        data.push(0x01);
    }
    write_varint(&mut data, plan.selected.len() as u64);
    for (utxo, signed) in plan.selected.iter().zip(signed_inputs) {
        data.extend_from_slice(&utxo.out_point.txid);
        data.extend_from_slice(&utxo.out_point.vout.to_le_bytes());
        write_varint(&mut data, signed.script_sig.len() as u64);
        data.extend_from_slice(&signed.script_sig);
        data.extend_from_slice(&utxo.out_point.sequence.to_le_bytes());
    }
    write_outputs(&mut data, outputs);
    if has_witness {
        for signed in signed_inputs {
            write_varint(&mut data, signed.witness.len() as u64);
            for item in &signed.witness {
                write_varint(&mut data, item.len() as u64);
                data.extend_from_slice(item);
            }
        }
    }
    data.extend_from_slice(&input.lock_time.to_le_bytes());
    data
}
