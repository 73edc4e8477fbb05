//! Configuration byte encoding and sample decoding.
//!
//! Configuration byte layout, MSB first:
//!
//! | bit | 7     | 6..5    | 4          | 3..2       | 1..0 |
//! |-----|-------|---------|------------|------------|------|
//! |     | ready | channel | continuous | resolution | gain |

use crate::constants::*;

/// How the sign bit of a sample is interpreted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignMode {
    /// Negative when the sign bit is set
    Corrected,
    /// Negative only when the masked sign bit equals 1, which none of the
    /// masks can produce. Readings in this mode are never negative.
    Legacy,
}

impl Default for SignMode {
    fn default() -> Self {
        SignMode::Corrected
    }
}

/// Fields recovered from a configuration byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedConfig {
    pub ready: bool,
    pub continuous: bool,
    pub channel: Channel,
    pub resolution: Resolution,
    pub gain: Gain,
}

/// Builds the configuration byte for a conversion in continuous mode
pub fn encode_config(resolution: Resolution, channel: Channel, gain: Gain) -> u8 {
    CFG_READY
        | (channel.code() << CHANNEL_SHIFT)
        | CFG_CONTINUOUS
        | (resolution.code() << RESOLUTION_SHIFT)
        | gain.code()
}

/// Recovers the fields of a configuration byte
pub fn decode_config(byte: u8) -> DecodedConfig {
    DecodedConfig {
        ready: byte & CFG_READY != 0,
        continuous: byte & CFG_CONTINUOUS != 0,
        channel: Channel::from_code(byte >> CHANNEL_SHIFT),
        resolution: Resolution::from_code(byte >> RESOLUTION_SHIFT),
        gain: Gain::from_code(byte),
    }
}

/// Splits a sample into (magnitude, masked sign bit)
fn split_sample(bytes: &[u8; 3], resolution: Resolution) -> (u32, u8) {
    let [b0, b1, b2] = *bytes;
    match resolution {
        Resolution::Bits18 => (
            ((b0 & 0b1) as u32) << 16 | (b1 as u32) << 8 | b2 as u32,
            b0 & 0b10,
        ),
        Resolution::Bits16 => (((b0 & 0b111_1111) as u32) << 8 | b1 as u32, b0 & 0b1000_0000),
        Resolution::Bits14 => (((b0 & 0b1_1111) as u32) << 8 | b1 as u32, b0 & 0b10_0000),
        Resolution::Bits12 => (((b0 & 0b111) as u32) << 8 | b1 as u32, b0 & 0b1000),
    }
}

/// Decodes a sample held in the first `resolution.buffer_len()` bytes
pub(crate) fn sample_to_microvolts(
    bytes: &[u8; 3],
    resolution: Resolution,
    gain: Gain,
    sign: SignMode,
) -> f64 {
    let (magnitude, sign_bit) = split_sample(bytes, resolution);
    let negative = match sign {
        SignMode::Corrected => sign_bit != 0,
        SignMode::Legacy => sign_bit == 1,
    };

    let counts = if negative {
        -(magnitude as f64)
    } else {
        magnitude as f64
    };

    counts * resolution.lsb_microvolts() * gain.value()
}

/// Converts the bytes of one sample to microvolts.
///
/// Returns `None` if `bytes` is shorter than [`Resolution::buffer_len`].
pub fn decode_sample(bytes: &[u8], resolution: Resolution, gain: Gain, sign: SignMode) -> Option<f64> {
    let len = resolution.buffer_len();
    if bytes.len() < len {
        return None;
    }

    let mut sample = [0u8; 3];
    sample[..len].copy_from_slice(&bytes[..len]);
    Some(sample_to_microvolts(&sample, resolution, gain, sign))
}
