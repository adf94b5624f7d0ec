pub mod protowire;
pub mod rlp;
pub mod scale;
