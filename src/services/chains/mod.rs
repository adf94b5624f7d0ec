pub mod bitcoin;
pub mod cosmos;
pub mod ethereum;
pub mod polkadot;
