pub mod base58check;
pub mod bech32_codec;
pub mod eip55;
pub mod ss58;

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::config::chains::{AddressFormat, ChainParams};
use crate::services::keys::{Curve, PublicKey};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AddressError {
    #[error("invalid address: {0}")]
    Invalid(String),
    #[error("bad checksum: {0}")]
    Checksum(String),
    #[error("wrong network: {0}")]
    WrongNetwork(String),
    #[error("wrong key type: {0}")]
    WrongKey(String),
}

/// RIPEMD160(SHA256(data)).
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let ripemd = Ripemd160::digest(sha);
    let mut out = [0u8; 20];
    out.copy_from_slice(&ripemd);
    out
}

/// SHA256(SHA256(data)).
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

fn require_curve(public: &PublicKey, curve: Curve) -> Result<(), AddressError> {
    if public.curve() != curve {
        return Err(AddressError::WrongKey(format!(
            "expected a {:?} public key",
            curve
        )));
    }
    Ok(())
}

/// Render the canonical address for a public key on a chain.
pub fn derive_address(params: &ChainParams, public: &PublicKey) -> Result<String, AddressError> {
    match params.address_format {
        AddressFormat::Base58Check => {
            require_curve(public, Curve::Secp256k1)?;
            Ok(base58check::encode(
                params.p2pkh_version,
                &hash160(public.as_bytes()),
            ))
        }
        AddressFormat::SegwitBech32 => {
            require_curve(public, Curve::Secp256k1)?;
            bech32_codec::encode_segwit(params.hrp, 0, &hash160(public.as_bytes()))
        }
        AddressFormat::CosmosBech32 => {
            require_curve(public, Curve::Secp256k1)?;
            bech32_codec::encode_plain(params.hrp, &hash160(public.as_bytes()))
        }
        AddressFormat::Ss58 => {
            require_curve(public, Curve::Ed25519)?;
            let mut account = [0u8; 32];
            account.copy_from_slice(public.as_bytes());
            ss58::encode(params.ss58_network, &account)
        }
        AddressFormat::Eip55 => {
            require_curve(public, Curve::Secp256k1)?;
            let uncompressed = public
                .uncompressed()
                .map_err(|e| AddressError::WrongKey(e.to_string()))?;
            Ok(eip55::encode(&eip55::account_from_public(&uncompressed)))
        }
        AddressFormat::RawBase58 => {
            require_curve(public, Curve::Ed25519)?;
            Ok(bs58::encode(public.as_bytes()).into_string())
        }
        AddressFormat::RawHex => {
            require_curve(public, Curve::Ed25519)?;
            Ok(hex::encode(public.as_bytes()))
        }
    }
}

/// Validate an address string against a chain's format and network
/// parameters. Never panics on arbitrary input.
pub fn validate_address(params: &ChainParams, address: &str) -> Result<(), AddressError> {
    match params.address_format {
        AddressFormat::Base58Check => {
            let (version, payload) = base58check::decode(address)?;
            if version != params.p2pkh_version {
                return Err(AddressError::WrongNetwork(format!(
                    "version byte {:#04x}",
                    version
                )));
            }
            if payload.len() != 20 {
                return Err(AddressError::Invalid(format!(
                    "payload length {}",
                    payload.len()
                )));
            }
            Ok(())
        }
        AddressFormat::SegwitBech32 => {
            bech32_codec::decode_segwit(address, params.hrp).map(|_| ())
        }
        AddressFormat::CosmosBech32 => {
            let payload = bech32_codec::decode_plain(address, params.hrp)?;
            if payload.len() != 20 {
                return Err(AddressError::Invalid(format!(
                    "payload length {}",
                    payload.len()
                )));
            }
            Ok(())
        }
        AddressFormat::Ss58 => ss58::decode(address, params.ss58_network).map(|_| ()),
        AddressFormat::Eip55 => eip55::validate(address),
        AddressFormat::RawBase58 => {
            let raw = bs58::decode(address)
                .into_vec()
                .map_err(|e| AddressError::Invalid(e.to_string()))?;
            if raw.len() != 32 {
                return Err(AddressError::Invalid(format!("length {}", raw.len())));
            }
            Ok(())
        }
        AddressFormat::RawHex => {
            if address.len() != 64 || !address.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(AddressError::Invalid("expected 64 hex characters".to_string()));
            }
            if address.chars().any(|c| c.is_ascii_uppercase()) {
                return Err(AddressError::Invalid("expected lowercase hex".to_string()));
            }
            Ok(())
        }
    }
}

pub fn is_valid_address(params: &ChainParams, address: &str) -> bool {
    validate_address(params, address).is_ok()
}
