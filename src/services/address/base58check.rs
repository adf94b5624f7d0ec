use super::{double_sha256, AddressError};

/// Base58Check encode a version byte plus payload.
pub fn encode(version: u8, payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 4);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = double_sha256(&data);
    data.extend_from_slice(&checksum[0..4]);
    bs58::encode(data).into_string()
}

/// Decode and checksum-verify, returning the version byte and payload.
pub fn decode(encoded: &str) -> Result<(u8, Vec<u8>), AddressError> {
    let raw = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| AddressError::Invalid(e.to_string()))?;
    if raw.len() < 5 {
        return Err(AddressError::Invalid(format!("length {}", raw.len())));
    }

    let (data, checksum) = raw.split_at(raw.len() - 4);
    let expected = double_sha256(data);
    if checksum != &expected[0..4] {
        return Err(AddressError::Checksum(encoded.to_string()));
    }

    Ok((data[0], data[1..].to_vec()))
}
