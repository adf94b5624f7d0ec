use sha3::{Digest, Keccak256};

use super::AddressError;

/// 20-byte account from an uncompressed secp256k1 public key:
/// Keccak256 of the coordinate bytes, last 20 bytes.
pub fn account_from_public(uncompressed: &[u8; 65]) -> [u8; 20] {
    let hash = Keccak256::digest(&uncompressed[1..]);
    let mut account = [0u8; 20];
    account.copy_from_slice(&hash[12..]);
    account
}

/// 0x-prefixed hex with EIP-55 checksum casing.
pub fn encode(account: &[u8; 20]) -> String {
    let lower = hex::encode(account);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Accepts all-lowercase, all-uppercase, or exact EIP-55 casing.
pub fn validate(address: &str) -> Result<(), AddressError> {
    let hex_part = address
        .strip_prefix("0x")
        .ok_or_else(|| AddressError::Invalid("missing 0x prefix".to_string()))?;
    if hex_part.len() != 40 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(AddressError::Invalid("expected 40 hex characters".to_string()));
    }

    let has_upper = hex_part.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = hex_part.chars().any(|c| c.is_ascii_lowercase());
    if !(has_upper && has_lower) {
        return Ok(());
    }

    let mut account = [0u8; 20];
    hex::decode_to_slice(hex_part.to_lowercase(), &mut account)
        .map_err(|e| AddressError::Invalid(e.to_string()))?;
    if encode(&account) != address {
        return Err(AddressError::Checksum(address.to_string()));
    }
    Ok(())
}

/// Decode to raw bytes after validation.
pub fn decode(address: &str) -> Result<[u8; 20], AddressError> {
    validate(address)?;
    let mut account = [0u8; 20];
    hex::decode_to_slice(address[2..].to_lowercase(), &mut account)
        .map_err(|e| AddressError::Invalid(e.to_string()))?;
    Ok(account)
}
