pub mod curve;
pub mod extended;
pub mod hd;
pub mod path;

pub use curve::{Curve, KeyError, PrivateKey, PublicKey};
pub use extended::{ExtendedKey, XkeyError};
pub use hd::{HdError, HdNode, HdPublicNode};
pub use path::{DerivationPath, PathError, HARDENED};

use bip39::{Language, Mnemonic};

/// Turn a BIP-39 mnemonic into the 64-byte root seed.
pub fn seed_from_mnemonic(phrase: &str, passphrase: &str) -> Result<[u8; 64], HdError> {
    let mnemonic = Mnemonic::parse_in_normalized(Language::English, phrase)
        .map_err(|e| HdError::InvalidSeed(format!("invalid mnemonic: {}", e)))?;
    Ok(mnemonic.to_seed(passphrase))
}

/// Validate a BIP-39 mnemonic (word count and checksum).
pub fn is_valid_mnemonic(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    if !matches!(words.len(), 12 | 15 | 18 | 21 | 24) {
        return false;
    }
    Mnemonic::parse_in_normalized(Language::English, phrase).is_ok()
}
