// =============================================================================
// SIMPLIFIED RLP ENCODER
// =============================================================================

/// An RLP item: a byte string or a list of items.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Bytes(Vec<u8>),
    List(Vec<Item>),
}

impl Item {
    pub fn uint(value: u128) -> Self {
        Item::Bytes(encode_uint(value))
    }

    pub fn bytes(data: &[u8]) -> Self {
        Item::Bytes(data.to_vec())
    }

    pub fn empty() -> Self {
        Item::Bytes(Vec::new())
    }
}

/// Minimal big-endian integer bytes; zero encodes as the empty string.
pub fn encode_uint(value: u128) -> Vec<u8> {
    if value == 0 {
        return vec![];
    }
    let bytes = value.to_be_bytes();
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(16);
    bytes[start..].to_vec()
}

pub fn encode(item: &Item) -> Vec<u8> {
    match item {
        Item::Bytes(bytes) => {
            if bytes.len() == 1 && bytes[0] < 0x80 {
                bytes.clone()
            } else {
                let mut out = header(bytes.len(), 0x80);
                out.extend_from_slice(bytes);
                out
            }
        }
        Item::List(items) => {
            let mut payload = Vec::new();
            for item in items {
                payload.extend(encode(item));
            }
            let mut out = header(payload.len(), 0xc0);
            out.extend(payload);
            out
        }
    }
}

fn header(len: usize, offset: u8) -> Vec<u8> {
    if len < 56 {
        vec![offset + len as u8]
    } else {
        let len_bytes = encode_uint(len as u128);
        let mut out = vec![offset + 55 + len_bytes.len() as u8];
        out.extend_from_slice(&len_bytes);
        out
    }
}
