use bech32::{Bech32, Fe32, Hrp};

use super::AddressError;

/// Segwit address: bech32 for v0, bech32m for v1 and above, per the
/// witness-version rules. Program length is enforced by the codec.
pub fn encode_segwit(hrp: &str, version: u8, program: &[u8]) -> Result<String, AddressError> {
    let hrp = Hrp::parse(hrp).map_err(|e| AddressError::Invalid(e.to_string()))?;
    let version = Fe32::try_from(version).map_err(|e| AddressError::Invalid(e.to_string()))?;
    bech32::segwit::encode(hrp, version, program)
        .map_err(|e| AddressError::Invalid(e.to_string()))
}

/// Decode a segwit address, checking the human-readable part. Mixed-case
/// input and checksum-variant mismatches are rejected by the codec.
pub fn decode_segwit(address: &str, hrp: &str) -> Result<(u8, Vec<u8>), AddressError> {
    let (found, version, program) =
        bech32::segwit::decode(address).map_err(|e| AddressError::Checksum(e.to_string()))?;
    if !found.as_str().eq_ignore_ascii_case(hrp) {
        return Err(AddressError::WrongNetwork(found.as_str().to_string()));
    }
    Ok((version.to_u8(), program))
}

/// Bech32 without a witness version, Cosmos style.
pub fn encode_plain(hrp: &str, payload: &[u8]) -> Result<String, AddressError> {
    let hrp = Hrp::parse(hrp).map_err(|e| AddressError::Invalid(e.to_string()))?;
    bech32::encode::<Bech32>(hrp, payload).map_err(|e| AddressError::Invalid(e.to_string()))
}

pub fn decode_plain(address: &str, hrp: &str) -> Result<Vec<u8>, AddressError> {
    let (found, payload) =
        bech32::decode(address).map_err(|e| AddressError::Checksum(e.to_string()))?;
    if !found.as_str().eq_ignore_ascii_case(hrp) {
        return Err(AddressError::WrongNetwork(found.as_str().to_string()));
    }
    Ok(payload)
}
