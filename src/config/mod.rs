pub mod chains;

pub use chains::{by_symbol, params, Chain, ChainFamily, ChainParams, RegistryError};
