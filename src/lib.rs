pub mod config;
pub mod services;

pub use config::chains::{Chain, ChainParams};
pub use services::signer::{AnySigner, SigningError, SigningOutput, SigningRequest};
