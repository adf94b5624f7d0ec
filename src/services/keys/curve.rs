use ed25519_dalek::SigningKey as EdSigningKey;
use secp256k1::{PublicKey as SecpPublicKey, Secp256k1, SecretKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Curve {
    Secp256k1,
    Ed25519,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KeyError {
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// A raw 32-byte private key, validated for its curve on construction.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey {
    curve: Curve,
    bytes: [u8; 32],
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        write!(f, "PrivateKey({:?})", self.curve)
    }
}

impl PrivateKey {
    pub fn new(curve: Curve, bytes: &[u8]) -> Result<Self, KeyError> {
        if bytes.len() != 32 {
            return Err(KeyError::InvalidLength { expected: 32, got: bytes.len() });
        }
        let mut raw = [0u8; 32];
        raw.copy_from_slice(bytes);
        if curve == Curve::Secp256k1 {
            // Rejects zero and values at or above the group order.
            SecretKey::from_slice(&raw)
                .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        }
        Ok(Self { curve, bytes: raw })
    }

    pub fn from_hex(curve: Curve, hex_str: &str) -> Result<Self, KeyError> {
        let clean = hex_str.trim_start_matches("0x");
        let bytes = hex::decode(clean).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Self::new(curve, &bytes)
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Compressed public key for secp256k1, 32-byte public key for ed25519.
    pub fn public_key(&self) -> Result<PublicKey, KeyError> {
        match self.curve {
            Curve::Secp256k1 => {
                let secp = Secp256k1::new();
                let secret = SecretKey::from_slice(&self.bytes)
                    .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
                let public = SecpPublicKey::from_secret_key(&secp, &secret);
                PublicKey::new(Curve::Secp256k1, &public.serialize())
            }
            Curve::Ed25519 => {
                let signing = EdSigningKey::from_bytes(&self.bytes);
                PublicKey::new(Curve::Ed25519, signing.verifying_key().as_bytes())
            }
        }
    }
}

/// Public key bytes: secp256k1 compressed (33) or ed25519 (32).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    curve: Curve,
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn new(curve: Curve, bytes: &[u8]) -> Result<Self, KeyError> {
        match curve {
            Curve::Secp256k1 => {
                if bytes.len() != 33 {
                    return Err(KeyError::InvalidLength { expected: 33, got: bytes.len() });
                }
                SecpPublicKey::from_slice(bytes)
                    .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
            }
            Curve::Ed25519 => {
                if bytes.len() != 32 {
                    return Err(KeyError::InvalidLength { expected: 32, got: bytes.len() });
                }
            }
        }
        Ok(Self { curve, bytes: bytes.to_vec() })
    }

    pub fn curve(&self) -> Curve {
        self.curve
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Uncompressed form (65 bytes, 0x04 prefix). Secp256k1 only.
    pub fn uncompressed(&self) -> Result<[u8; 65], KeyError> {
        if self.curve != Curve::Secp256k1 {
            return Err(KeyError::InvalidPublicKey(
                "uncompressed form only exists for secp256k1".to_string(),
            ));
        }
        let key = SecpPublicKey::from_slice(&self.bytes)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
        Ok(key.serialize_uncompressed())
    }
}
