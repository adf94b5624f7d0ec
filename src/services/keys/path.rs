use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Hardened-index marker bit.
pub const HARDENED: u32 = 0x8000_0000;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathError {
    #[error("derivation path must start with 'm': {0}")]
    MissingPrefix(String),
    #[error("invalid path component: {0}")]
    InvalidComponent(String),
    #[error("index out of range: {0}")]
    IndexTooLarge(String),
}

/// A BIP32 derivation path such as `m/44'/0'/0'/0/0`.
/// Indices are stored raw, with the hardened bit set where applicable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn new(indexes: Vec<u32>) -> Self {
        Self(indexes)
    }

    pub fn indexes(&self) -> &[u32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for DerivationPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match parts.next() {
            Some("m") | Some("M") => {}
            _ => return Err(PathError::MissingPrefix(s.to_string())),
        }

        let mut indexes = Vec::new();
        for part in parts {
            if part.is_empty() {
                return Err(PathError::InvalidComponent(s.to_string()));
            }
            let (digits, hardened) = match part.strip_suffix('\'').or(part.strip_suffix('h')) {
                Some(rest) => (rest, true),
                None => (part, false),
            };
            let index: u32 = digits
                .parse()
                .map_err(|_| PathError::InvalidComponent(part.to_string()))?;
            if index >= HARDENED {
                return Err(PathError::IndexTooLarge(part.to_string()));
            }
            indexes.push(if hardened { index | HARDENED } else { index });
        }
        Ok(Self(indexes))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.0 {
            if index & HARDENED != 0 {
                write!(f, "/{}'", index & !HARDENED)?;
            } else {
                write!(f, "/{}", index)?;
            }
        }
        Ok(())
    }
}
