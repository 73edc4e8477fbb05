/// Base I2C address of the MCP342x family (address pins A0/A1 floating or low)
pub const DEFAULT_ADDRESS: u8 = 0x68;
/// Highest address selectable through the address pins
pub const MAX_ADDRESS: u8 = 0x6F;

/// Configuration register flags
pub const CFG_READY: u8 = 0b1000_0000;
pub const CFG_CONTINUOUS: u8 = 0b0001_0000;

pub(crate) const CHANNEL_SHIFT: u8 = 5;
pub(crate) const RESOLUTION_SHIFT: u8 = 2;
pub(crate) const FIELD_MASK: u8 = 0b11;

/// Sample resolution; also selects the data rate on the device
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Bits12 = 0b00,
    Bits14 = 0b01,
    Bits16 = 0b10,
    Bits18 = 0b11,
}

impl Resolution {
    pub const ALL: [Resolution; 4] = [
        Resolution::Bits12,
        Resolution::Bits14,
        Resolution::Bits16,
        Resolution::Bits18,
    ];

    /// Number of bits per sample
    pub fn bits(&self) -> u8 {
        match self {
            Resolution::Bits12 => 12,
            Resolution::Bits14 => 14,
            Resolution::Bits16 => 16,
            Resolution::Bits18 => 18,
        }
    }

    /// Weight of one LSB in microvolts at gain 1
    pub fn lsb_microvolts(&self) -> f64 {
        match self {
            Resolution::Bits12 => 1000.0,
            Resolution::Bits14 => 250.0,
            Resolution::Bits16 => 62.5,
            Resolution::Bits18 => 15.625,
        }
    }

    /// Number of data bytes the device returns for one sample
    pub fn buffer_len(&self) -> usize {
        if self.bits() > 15 {
            3
        } else {
            2
        }
    }

    pub(crate) fn code(&self) -> u8 {
        *self as u8
    }

    pub(crate) fn from_code(code: u8) -> Self {
        match code & FIELD_MASK {
            0b00 => Resolution::Bits12,
            0b01 => Resolution::Bits14,
            0b10 => Resolution::Bits16,
            _ => Resolution::Bits18,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Bits18
    }
}

impl TryFrom<u8> for Resolution {
    type Error = u8;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            12 => Ok(Resolution::Bits12),
            14 => Ok(Resolution::Bits14),
            16 => Ok(Resolution::Bits16),
            18 => Ok(Resolution::Bits18),
            other => Err(other),
        }
    }
}

/// Input channel selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Ch0 = 0b00,
    Ch1 = 0b01,
    Ch2 = 0b10,
    Ch3 = 0b11,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Ch0, Channel::Ch1, Channel::Ch2, Channel::Ch3];

    /// Zero-based channel number
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub(crate) fn code(&self) -> u8 {
        *self as u8
    }

    pub(crate) fn from_code(code: u8) -> Self {
        match code & FIELD_MASK {
            0b00 => Channel::Ch0,
            0b01 => Channel::Ch1,
            0b10 => Channel::Ch2,
            _ => Channel::Ch3,
        }
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel::Ch1
    }
}

impl TryFrom<u8> for Channel {
    type Error = u8;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        match number {
            0 => Ok(Channel::Ch0),
            1 => Ok(Channel::Ch1),
            2 => Ok(Channel::Ch2),
            3 => Ok(Channel::Ch3),
            other => Err(other),
        }
    }
}

/// Gain settings for the programmable gain amplifier (PGA)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gain {
    Gain1 = 0b00,
    Gain2 = 0b01,
    Gain4 = 0b10,
    Gain8 = 0b11,
}

impl Gain {
    pub const ALL: [Gain; 4] = [Gain::Gain1, Gain::Gain2, Gain::Gain4, Gain::Gain8];

    /// Returns the gain value as a floating-point number
    pub fn value(&self) -> f64 {
        self.multiplier() as f64
    }

    /// Returns the gain as the integer multiplier
    pub fn multiplier(&self) -> u8 {
        match self {
            Gain::Gain1 => 1,
            Gain::Gain2 => 2,
            Gain::Gain4 => 4,
            Gain::Gain8 => 8,
        }
    }

    pub(crate) fn code(&self) -> u8 {
        *self as u8
    }

    pub(crate) fn from_code(code: u8) -> Self {
        match code & FIELD_MASK {
            0b00 => Gain::Gain1,
            0b01 => Gain::Gain2,
            0b10 => Gain::Gain4,
            _ => Gain::Gain8,
        }
    }
}

impl Default for Gain {
    fn default() -> Self {
        Gain::Gain1
    }
}

impl TryFrom<u8> for Gain {
    type Error = u8;

    fn try_from(multiplier: u8) -> Result<Self, Self::Error> {
        match multiplier {
            1 => Ok(Gain::Gain1),
            2 => Ok(Gain::Gain2),
            4 => Ok(Gain::Gain4),
            8 => Ok(Gain::Gain8),
            other => Err(other),
        }
    }
}

/// Parts of the family; they differ in how many inputs are bonded out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Mcp3422,
    Mcp3423,
    Mcp3424,
}

impl Variant {
    pub fn channel_count(&self) -> u8 {
        match self {
            Variant::Mcp3422 | Variant::Mcp3423 => 2,
            Variant::Mcp3424 => 4,
        }
    }

    pub fn supports(&self, channel: Channel) -> bool {
        channel.number() < self.channel_count()
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Mcp3424
    }
}
