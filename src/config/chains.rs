use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::services::keys::Curve;
use crate::services::planner::CostModel;

// =============================================================================
// CHAIN PARAMETER REGISTRY
// Read-only table of per-chain constants, built once per process
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    Bitcoin,
    BitcoinCash,
    Dogecoin,
    Ethereum,
    Cosmos,
    Polkadot,
    Kusama,
    Solana,
    Near,
}

/// Which signer family handles a chain. `Account` chains only have
/// key/address support, no transaction signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainFamily {
    Utxo,
    Evm,
    Cosmos,
    Substrate,
    Account,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressFormat {
    /// version byte + hash160, double-SHA256 checksum
    Base58Check,
    /// segwit bech32 (v0) / bech32m (v1+)
    SegwitBech32,
    /// bech32 over hash160, no witness version
    CosmosBech32,
    /// SS58 with blake2b checksum
    Ss58,
    /// 0x-prefixed hex with EIP-55 checksum casing
    Eip55,
    /// base58 of the raw ed25519 public key
    RawBase58,
    /// lowercase hex of the raw ed25519 public key
    RawHex,
}

/// Extended-key serialization scheme. Selects the version-byte pair and
/// the purpose level of the account derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HdScheme {
    Bip44,
    Bip84,
}

impl HdScheme {
    pub fn purpose(&self) -> u32 {
        match self {
            HdScheme::Bip44 => 44,
            HdScheme::Bip84 => 84,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct XKeyVersions {
    pub scheme: HdScheme,
    pub private: u32,
    pub public: u32,
}

#[derive(Debug, Clone)]
pub struct ChainParams {
    pub chain: Chain,
    pub symbol: &'static str,
    pub name: &'static str,
    pub family: ChainFamily,
    pub coin_type: u32,
    pub curve: Curve,
    pub address_format: AddressFormat,
    /// Base58Check version byte for P2PKH outputs, when applicable.
    pub p2pkh_version: u8,
    pub hrp: &'static str,
    pub ss58_network: u16,
    pub xkey_versions: &'static [XKeyVersions],
    pub dust: u64,
    pub cost_model: CostModel,
    pub default_sighash: u32,
    pub supports_json: bool,
    pub multi_address: bool,
    pub derivation_path: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unknown chain: {0}")]
    UnknownChain(String),
}

const BTC_XKEYS: &[XKeyVersions] = &[
    XKeyVersions { scheme: HdScheme::Bip44, private: 0x0488_ADE4, public: 0x0488_B21E },
    XKeyVersions { scheme: HdScheme::Bip84, private: 0x04B2_430C, public: 0x04B2_4746 },
];

const BCH_XKEYS: &[XKeyVersions] = &[
    XKeyVersions { scheme: HdScheme::Bip44, private: 0x0488_ADE4, public: 0x0488_B21E },
];

const DOGE_XKEYS: &[XKeyVersions] = &[
    XKeyVersions { scheme: HdScheme::Bip44, private: 0x02FA_C398, public: 0x02FA_CAFD },
];

pub const SIGHASH_ALL: u32 = 0x01;
pub const SIGHASH_FORKID: u32 = 0x40;

lazy_static! {
    static ref CHAINS: HashMap<Chain, ChainParams> = {
        let mut m = HashMap::new();
        let mut add = |p: ChainParams| {
            m.insert(p.chain, p);
        };

        add(ChainParams {
            chain: Chain::Bitcoin,
            symbol: "BTC",
            name: "Bitcoin",
            family: ChainFamily::Utxo,
            coin_type: 0,
            curve: Curve::Secp256k1,
            address_format: AddressFormat::SegwitBech32,
            p2pkh_version: 0x00,
            hrp: "bc",
            ss58_network: 0,
            xkey_versions: BTC_XKEYS,
            // Registry plans fold change below this into the fee; callers
            // wanting smaller change must plan with their own threshold.
            dust: 546,
            cost_model: CostModel::segwit(),
            default_sighash: SIGHASH_ALL,
            supports_json: false,
            multi_address: false,
            derivation_path: "m/84'/0'/0'/0/0",
        });
        add(ChainParams {
            chain: Chain::BitcoinCash,
            symbol: "BCH",
            name: "Bitcoin Cash",
            family: ChainFamily::Utxo,
            coin_type: 145,
            curve: Curve::Secp256k1,
            address_format: AddressFormat::Base58Check,
            p2pkh_version: 0x00,
            hrp: "",
            ss58_network: 0,
            xkey_versions: BCH_XKEYS,
            dust: 546,
            cost_model: CostModel::p2pkh(),
            default_sighash: SIGHASH_ALL | SIGHASH_FORKID,
            supports_json: false,
            multi_address: false,
            derivation_path: "m/44'/145'/0'/0/0",
        });
        add(ChainParams {
            chain: Chain::Dogecoin,
            symbol: "DOGE",
            name: "Dogecoin",
            family: ChainFamily::Utxo,
            coin_type: 3,
            curve: Curve::Secp256k1,
            address_format: AddressFormat::Base58Check,
            p2pkh_version: 0x1E,
            hrp: "",
            ss58_network: 0,
            xkey_versions: DOGE_XKEYS,
            dust: 100_000_000,
            cost_model: CostModel::p2pkh(),
            default_sighash: SIGHASH_ALL,
            supports_json: false,
            multi_address: false,
            derivation_path: "m/44'/3'/0'/0/0",
        });
        add(ChainParams {
            chain: Chain::Ethereum,
            symbol: "ETH",
            name: "Ethereum",
            family: ChainFamily::Evm,
            coin_type: 60,
            curve: Curve::Secp256k1,
            address_format: AddressFormat::Eip55,
            p2pkh_version: 0,
            hrp: "",
            ss58_network: 0,
            xkey_versions: &[],
            dust: 0,
            cost_model: CostModel::p2pkh(),
            default_sighash: 0,
            supports_json: false,
            multi_address: false,
            derivation_path: "m/44'/60'/0'/0/0",
        });
        add(ChainParams {
            chain: Chain::Cosmos,
            symbol: "ATOM",
            name: "Cosmos Hub",
            family: ChainFamily::Cosmos,
            coin_type: 118,
            curve: Curve::Secp256k1,
            address_format: AddressFormat::CosmosBech32,
            p2pkh_version: 0,
            hrp: "cosmos",
            ss58_network: 0,
            xkey_versions: &[],
            dust: 0,
            cost_model: CostModel::p2pkh(),
            default_sighash: 0,
            supports_json: true,
            multi_address: false,
            derivation_path: "m/44'/118'/0'/0/0",
        });
        add(ChainParams {
            chain: Chain::Polkadot,
            symbol: "DOT",
            name: "Polkadot",
            family: ChainFamily::Substrate,
            coin_type: 354,
            curve: Curve::Ed25519,
            address_format: AddressFormat::Ss58,
            p2pkh_version: 0,
            hrp: "",
            ss58_network: 0,
            xkey_versions: &[],
            dust: 0,
            cost_model: CostModel::p2pkh(),
            default_sighash: 0,
            supports_json: false,
            multi_address: true,
            derivation_path: "m/44'/354'/0'/0'/0'",
        });
        add(ChainParams {
            chain: Chain::Kusama,
            symbol: "KSM",
            name: "Kusama",
            family: ChainFamily::Substrate,
            coin_type: 434,
            curve: Curve::Ed25519,
            address_format: AddressFormat::Ss58,
            p2pkh_version: 0,
            hrp: "",
            ss58_network: 2,
            xkey_versions: &[],
            dust: 0,
            cost_model: CostModel::p2pkh(),
            default_sighash: 0,
            supports_json: false,
            multi_address: true,
            derivation_path: "m/44'/434'/0'/0'/0'",
        });
        add(ChainParams {
            chain: Chain::Solana,
            symbol: "SOL",
            name: "Solana",
            family: ChainFamily::Account,
            coin_type: 501,
            curve: Curve::Ed25519,
            address_format: AddressFormat::RawBase58,
            p2pkh_version: 0,
            hrp: "",
            ss58_network: 0,
            xkey_versions: &[],
            dust: 0,
            cost_model: CostModel::p2pkh(),
            default_sighash: 0,
            supports_json: false,
            multi_address: false,
            derivation_path: "m/44'/501'/0'/0'",
        });
        add(ChainParams {
            chain: Chain::Near,
            symbol: "NEAR",
            name: "NEAR",
            family: ChainFamily::Account,
            coin_type: 397,
            curve: Curve::Ed25519,
            address_format: AddressFormat::RawHex,
            p2pkh_version: 0,
            hrp: "",
            ss58_network: 0,
            xkey_versions: &[],
            dust: 0,
            cost_model: CostModel::p2pkh(),
            default_sighash: 0,
            supports_json: false,
            multi_address: false,
            derivation_path: "m/44'/397'/0'",
        });

        m
    };
    static ref SYMBOLS: HashMap<&'static str, Chain> =
        CHAINS.values().map(|p| (p.symbol, p.chain)).collect();
}

/// Look up the parameters for a chain.
pub fn params(chain: Chain) -> &'static ChainParams {
    // Every Chain variant is seeded above.
    &CHAINS[&chain]
}

/// Look up a chain by ticker symbol, case-insensitive.
pub fn by_symbol(symbol: &str) -> Result<&'static ChainParams, RegistryError> {
    let upper = symbol.to_uppercase();
    SYMBOLS
        .get(upper.as_str())
        .map(|c| params(*c))
        .ok_or_else(|| RegistryError::UnknownChain(symbol.to_string()))
}
