use blake2::{Blake2b512, Digest};

use super::AddressError;

const CHECKSUM_PREAMBLE: &[u8] = b"SS58PRE";

/// SS58 encode a 32-byte account id. Simple one-byte network prefixes
/// (0..64) only.
pub fn encode(network: u16, account: &[u8; 32]) -> Result<String, AddressError> {
    if network >= 64 {
        return Err(AddressError::Invalid(format!(
            "network prefix {} out of simple range",
            network
        )));
    }

    let mut data = Vec::with_capacity(35);
    data.push(network as u8);
    data.extend_from_slice(account);

    let checksum = checksum(&data);
    data.extend_from_slice(&checksum);
    Ok(bs58::encode(data).into_string())
}

/// Decode an SS58 address, verifying checksum and network prefix.
pub fn decode(address: &str, network: u16) -> Result<[u8; 32], AddressError> {
    let raw = bs58::decode(address)
        .into_vec()
        .map_err(|e| AddressError::Invalid(e.to_string()))?;
    if raw.len() != 35 {
        return Err(AddressError::Invalid(format!("length {}", raw.len())));
    }

    let (data, found_checksum) = raw.split_at(33);
    if checksum(data) != found_checksum {
        return Err(AddressError::Checksum(address.to_string()));
    }
    if data[0] as u16 != network {
        return Err(AddressError::WrongNetwork(format!("prefix {}", data[0])));
    }

    let mut account = [0u8; 32];
    account.copy_from_slice(&data[1..]);
    Ok(account)
}

fn checksum(data: &[u8]) -> [u8; 2] {
    let mut hasher = Blake2b512::new();
    hasher.update(CHECKSUM_PREAMBLE);
    hasher.update(data);
    let hash = hasher.finalize();
    [hash[0], hash[1]]
}
