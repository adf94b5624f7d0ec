use serde::{Deserialize, Serialize};

// =============================================================================
// SCALE ENCODING HELPERS
// Compact integers and transaction mortality, as used by Substrate
// extrinsics.
// =============================================================================

/// SCALE compact encoding of an unsigned integer.
pub fn compact(value: u128) -> Vec<u8> {
    if value < 0x40 {
        vec![(value as u8) << 2]
    } else if value < 0x4000 {
        (((value as u16) << 2) | 0b01).to_le_bytes().to_vec()
    } else if value < 0x4000_0000 {
        (((value as u32) << 2) | 0b10).to_le_bytes().to_vec()
    } else {
        let bytes = value.to_le_bytes();
        let len = 16 - bytes.iter().rev().position(|&b| b != 0).unwrap_or(16);
        let mut out = Vec::with_capacity(1 + len);
        out.push((((len - 4) as u8) << 2) | 0b11);
        out.extend_from_slice(&bytes[..len]);
        out
    }
}

/// Transaction mortality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Era {
    Immortal,
    Mortal { period: u64, block: u64 },
}

impl Era {
    pub fn encode(&self) -> Vec<u8> {
        match *self {
            Era::Immortal => vec![0x00],
            Era::Mortal { period, block } => {
                let period = period.next_power_of_two().clamp(4, 1 << 16);
                let phase = block % period;
                let quantize_factor = (period >> 12).max(1);
                let quantized_phase = phase / quantize_factor * quantize_factor;

                let low = (period.trailing_zeros() as u64).saturating_sub(1).clamp(1, 15);
                let encoded = (low | ((quantized_phase / quantize_factor) << 4)) as u16;
                encoded.to_le_bytes().to_vec()
            }
        }
    }
}
