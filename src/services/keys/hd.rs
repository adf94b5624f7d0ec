use hmac::{Hmac, Mac};
use secp256k1::{PublicKey as SecpPublicKey, Scalar, Secp256k1, SecretKey};
use sha2::Sha512;

use crate::services::address::hash160;
use crate::services::keys::{Curve, DerivationPath, KeyError, PrivateKey, PublicKey, HARDENED};

type HmacSha512 = Hmac<Sha512>;

// =============================================================================
// HD KEY DERIVATION
// BIP32 for secp256k1, SLIP-0010 for ed25519 (hardened-only)
// =============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HdError {
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("unsupported derivation: {0}")]
    UnsupportedDerivation(String),
    #[error("invalid derivation path: {0}")]
    Path(#[from] super::PathError),
    #[error("key error: {0}")]
    Key(#[from] KeyError),
    #[error("internal error: {0}")]
    Internal(String),
}

/// A private node in the derivation tree.
#[derive(Clone)]
pub struct HdNode {
    pub curve: Curve,
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: u32,
    pub chain_code: [u8; 32],
    key: [u8; 32],
}

impl HdNode {
    /// Master node from a BIP-39 seed.
    pub fn master(seed: &[u8], curve: Curve) -> Result<Self, HdError> {
        if seed.is_empty() {
            return Err(HdError::InvalidSeed("empty seed".to_string()));
        }
        let salt: &[u8] = match curve {
            Curve::Secp256k1 => b"Bitcoin seed",
            Curve::Ed25519 => b"ed25519 seed",
        };
        let digest = hmac_sha512(salt, seed)?;
        let mut key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&digest[..32]);
        chain_code.copy_from_slice(&digest[32..]);

        if curve == Curve::Secp256k1 {
            SecretKey::from_slice(&key)
                .map_err(|e| HdError::InvalidSeed(format!("unusable master key: {}", e)))?;
        }

        Ok(Self {
            curve,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
            chain_code,
            key,
        })
    }

    pub fn private_key(&self) -> Result<PrivateKey, HdError> {
        Ok(PrivateKey::new(self.curve, &self.key)?)
    }

    pub fn public_key(&self) -> Result<PublicKey, HdError> {
        Ok(self.private_key()?.public_key()?)
    }

    /// hash160 of the compressed public key, first four bytes.
    pub fn fingerprint(&self) -> Result<[u8; 4], HdError> {
        match self.curve {
            Curve::Secp256k1 => {
                let public = self.public_key()?;
                let h = hash160(public.as_bytes());
                Ok([h[0], h[1], h[2], h[3]])
            }
            // Ed25519 nodes are never serialized as extended keys.
            Curve::Ed25519 => Ok([0u8; 4]),
        }
    }

    pub fn derive_child(&self, index: u32) -> Result<Self, HdError> {
        let hardened = index & HARDENED != 0;

        let mut data = Vec::with_capacity(37);
        match self.curve {
            Curve::Ed25519 => {
                if !hardened {
                    return Err(HdError::UnsupportedDerivation(
                        "ed25519 supports hardened derivation only".to_string(),
                    ));
                }
                data.push(0x00);
                data.extend_from_slice(&self.key);
            }
            Curve::Secp256k1 => {
                if hardened {
                    data.push(0x00);
                    data.extend_from_slice(&self.key);
                } else {
                    let public = self.public_key()?;
                    data.extend_from_slice(public.as_bytes());
                }
            }
        }
        data.extend_from_slice(&index.to_be_bytes());

        let digest = hmac_sha512(&self.chain_code, &data)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&digest[32..]);

        let key = match self.curve {
            Curve::Ed25519 => {
                let mut key = [0u8; 32];
                key.copy_from_slice(&digest[..32]);
                key
            }
            Curve::Secp256k1 => {
                let mut il = [0u8; 32];
                il.copy_from_slice(&digest[..32]);
                let tweak = Scalar::from_be_bytes(il).map_err(|_| {
                    HdError::InvalidSeed("derived tweak out of range".to_string())
                })?;
                let parent = SecretKey::from_slice(&self.key)
                    .map_err(|e| HdError::Internal(e.to_string()))?;
                let child = parent.add_tweak(&tweak).map_err(|e| {
                    HdError::InvalidSeed(format!("derived key invalid: {}", e))
                })?;
                child.secret_bytes()
            }
        };

        Ok(Self {
            curve: self.curve,
            depth: self.depth.wrapping_add(1),
            parent_fingerprint: self.fingerprint()?,
            child_number: index,
            chain_code,
            key,
        })
    }

    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self, HdError> {
        let mut node = self.clone();
        for index in path.indexes() {
            node = node.derive_child(*index)?;
        }
        Ok(node)
    }
}

/// A public-only node. Secp256k1 only; supports non-hardened steps.
#[derive(Clone)]
pub struct HdPublicNode {
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: u32,
    pub chain_code: [u8; 32],
    pub public: PublicKey,
}

impl HdPublicNode {
    pub fn derive_child(&self, index: u32) -> Result<Self, HdError> {
        if index & HARDENED != 0 {
            return Err(HdError::UnsupportedDerivation(
                "cannot derive a hardened child from a public key".to_string(),
            ));
        }

        let mut data = Vec::with_capacity(37);
        data.extend_from_slice(self.public.as_bytes());
        data.extend_from_slice(&index.to_be_bytes());
        let digest = hmac_sha512(&self.chain_code, &data)?;

        let mut il = [0u8; 32];
        il.copy_from_slice(&digest[..32]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&digest[32..]);

        let secp = Secp256k1::new();
        let tweak = Scalar::from_be_bytes(il)
            .map_err(|_| HdError::InvalidSeed("derived tweak out of range".to_string()))?;
        let parent = SecpPublicKey::from_slice(self.public.as_bytes())
            .map_err(|e| HdError::Internal(e.to_string()))?;
        let child = parent
            .add_exp_tweak(&secp, &tweak)
            .map_err(|e| HdError::InvalidSeed(format!("derived key invalid: {}", e)))?;

        let parent_hash = hash160(self.public.as_bytes());

        Ok(Self {
            depth: self.depth.wrapping_add(1),
            parent_fingerprint: [parent_hash[0], parent_hash[1], parent_hash[2], parent_hash[3]],
            child_number: index,
            chain_code,
            public: PublicKey::new(Curve::Secp256k1, &child.serialize())?,
        })
    }
}

/// Derive the private key for `path` from a seed.
pub fn derive(seed: &[u8], path: &DerivationPath, curve: Curve) -> Result<PrivateKey, HdError> {
    HdNode::master(seed, curve)?.derive_path(path)?.private_key()
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64], HdError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| HdError::Internal(e.to_string()))?;
    mac.update(data);
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
