use sha2::{Digest, Sha256};

use crate::config::chains::{ChainParams, HdScheme};
use crate::services::keys::{
    Curve, DerivationPath, HdError, HdNode, HdPublicNode, KeyError, PublicKey, HARDENED,
};

// =============================================================================
// EXTENDED KEYS (BIP32 SERIALIZATION)
// version(4) | depth(1) | parent fingerprint(4) | child number(4)
// | chain code(32) | key(33), Base58Check encoded
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum XkeyError {
    #[error("invalid extended key length: {0}")]
    InvalidLength(usize),
    #[error("invalid extended key checksum")]
    InvalidChecksum,
    #[error("invalid base58: {0}")]
    InvalidBase58(String),
    #[error("unknown version bytes: {0:#010x}")]
    UnknownVersion(u32),
    #[error("chain has no extended key scheme {0:?}")]
    UnsupportedScheme(HdScheme),
    #[error("expected a public extended key")]
    NotPublic,
    #[error("derivation failed: {0}")]
    Hd(#[from] HdError),
    #[error("key error: {0}")]
    Key(#[from] KeyError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtendedKey {
    pub version: u32,
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: u32,
    pub chain_code: [u8; 32],
    pub key: [u8; 33],
}

impl ExtendedKey {
    pub fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(78);
        payload.extend_from_slice(&self.version.to_be_bytes());
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_number.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.extend_from_slice(&self.key);

        let checksum = double_sha256(&payload);
        payload.extend_from_slice(&checksum[0..4]);
        bs58::encode(payload).into_string()
    }

    pub fn decode(encoded: &str) -> Result<Self, XkeyError> {
        let raw = bs58::decode(encoded)
            .into_vec()
            .map_err(|e| XkeyError::InvalidBase58(e.to_string()))?;
        if raw.len() != 82 {
            return Err(XkeyError::InvalidLength(raw.len()));
        }
        let checksum = double_sha256(&raw[..78]);
        if checksum[0..4] != raw[78..82] {
            return Err(XkeyError::InvalidChecksum);
        }

        let version = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]);
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&raw[5..9]);
        let child_number = u32::from_be_bytes([raw[9], raw[10], raw[11], raw[12]]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&raw[13..45]);
        let mut key = [0u8; 33];
        key.copy_from_slice(&raw[45..78]);

        Ok(Self {
            version,
            depth: raw[4],
            parent_fingerprint,
            child_number,
            chain_code,
            key,
        })
    }

    /// True when the key field carries private material (0x00 pad byte).
    pub fn is_private(&self) -> bool {
        self.key[0] == 0x00
    }
}

fn account_node(
    seed: &[u8],
    params: &ChainParams,
    scheme: HdScheme,
) -> Result<HdNode, XkeyError> {
    let path = DerivationPath::new(vec![
        scheme.purpose() | HARDENED,
        params.coin_type | HARDENED,
        HARDENED,
    ]);
    Ok(HdNode::master(seed, Curve::Secp256k1)?.derive_path(&path)?)
}

fn versions_for(params: &ChainParams, scheme: HdScheme) -> Result<(u32, u32), XkeyError> {
    params
        .xkey_versions
        .iter()
        .find(|v| v.scheme == scheme)
        .map(|v| (v.private, v.public))
        .ok_or(XkeyError::UnsupportedScheme(scheme))
}

/// Serialized account-level (`m/purpose'/coin'/0'`) private key.
pub fn extended_private_key(
    seed: &[u8],
    params: &ChainParams,
    scheme: HdScheme,
) -> Result<String, XkeyError> {
    let (private_version, _) = versions_for(params, scheme)?;
    let node = account_node(seed, params, scheme)?;

    let mut key = [0u8; 33];
    key[1..].copy_from_slice(node.private_key()?.as_bytes());

    Ok(ExtendedKey {
        version: private_version,
        depth: node.depth,
        parent_fingerprint: node.parent_fingerprint,
        child_number: node.child_number,
        chain_code: node.chain_code,
        key,
    }
    .encode())
}

/// Serialized account-level (`m/purpose'/coin'/0'`) public key.
pub fn extended_public_key(
    seed: &[u8],
    params: &ChainParams,
    scheme: HdScheme,
) -> Result<String, XkeyError> {
    let (_, public_version) = versions_for(params, scheme)?;
    let node = account_node(seed, params, scheme)?;

    let mut key = [0u8; 33];
    key.copy_from_slice(node.public_key()?.as_bytes());

    Ok(ExtendedKey {
        version: public_version,
        depth: node.depth,
        parent_fingerprint: node.parent_fingerprint,
        child_number: node.child_number,
        chain_code: node.chain_code,
        key,
    }
    .encode())
}

/// Receive-address public key from an extended public key, no private
/// material involved. `change` and `index` are the last two path levels.
pub fn public_key_from_extended(
    encoded: &str,
    params: &ChainParams,
    change: u32,
    index: u32,
) -> Result<PublicKey, XkeyError> {
    let xkey = ExtendedKey::decode(encoded)?;
    let known = params
        .xkey_versions
        .iter()
        .any(|v| v.public == xkey.version || v.private == xkey.version);
    if !known {
        return Err(XkeyError::UnknownVersion(xkey.version));
    }
    if xkey.is_private() {
        return Err(XkeyError::NotPublic);
    }

    let node = HdPublicNode {
        depth: xkey.depth,
        parent_fingerprint: xkey.parent_fingerprint,
        child_number: xkey.child_number,
        chain_code: xkey.chain_code,
        public: PublicKey::new(Curve::Secp256k1, &xkey.key)?,
    };
    Ok(node.derive_child(change)?.derive_child(index)?.public)
}

fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}
