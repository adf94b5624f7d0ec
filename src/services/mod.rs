pub mod address;
pub mod chains;
pub mod encoding;
pub mod keys;
pub mod planner;
pub mod signer;
