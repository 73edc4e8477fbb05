use crate::codec::SignMode;
use crate::constants::*;
use crate::error::{Field, Mcp342xError};

/// Bounded retry used while waiting for exclusive bus access
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of lock attempts, including the first
    pub max_attempts: u32,
    /// Pause between two attempts
    pub delay_us: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 100,
            delay_us: 1_000,
        }
    }
}

/// Driver settings applied at construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    pub resolution: Resolution,
    pub channel: Channel,
    pub gain: Gain,
    pub variant: Variant,
    pub address: u8,
    pub retry: RetryPolicy,
    /// Wait after a channel switch in `read_from_channel`. The default
    /// covers one 18-bit conversion (3.75 SPS).
    pub settle_delay_ms: u32,
    pub sign: SignMode,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            resolution: Resolution::default(),
            channel: Channel::default(),
            gain: Gain::default(),
            variant: Variant::default(),
            address: DEFAULT_ADDRESS,
            retry: RetryPolicy::default(),
            settle_delay_ms: 300,
            sign: SignMode::default(),
        }
    }
}

impl Config {
    /// Builds a configuration from plain numbers, e.g. `(18, 1, 1)`
    pub fn from_numbers<E>(resolution: u8, channel: u8, gain: u8) -> Result<Self, Mcp342xError<E>> {
        let resolution =
            Resolution::try_from(resolution).map_err(|v| Mcp342xError::<E>::invalid(Field::Resolution, v))?;
        let channel = Channel::try_from(channel).map_err(|v| Mcp342xError::<E>::invalid(Field::Channel, v))?;
        let gain = Gain::try_from(gain).map_err(|v| Mcp342xError::<E>::invalid(Field::Gain, v))?;

        Ok(Config {
            resolution,
            channel,
            gain,
            ..Config::default()
        })
    }

    pub fn resolution(mut self, resolution: Resolution) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    pub fn gain(mut self, gain: Gain) -> Self {
        self.gain = gain;
        self
    }

    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    pub fn retry(mut self, max_attempts: u32, delay_us: u32) -> Self {
        self.retry = RetryPolicy {
            max_attempts,
            delay_us,
        };
        self
    }

    pub fn settle_delay_ms(mut self, ms: u32) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    pub fn sign(mut self, sign: SignMode) -> Self {
        self.sign = sign;
        self
    }

    /// Checks the settings the enums alone cannot guarantee
    pub fn validate<E>(&self) -> Result<(), Mcp342xError<E>> {
        if !self.variant.supports(self.channel) {
            return Err(Mcp342xError::invalid(Field::Channel, self.channel.number()));
        }
        if !(DEFAULT_ADDRESS..=MAX_ADDRESS).contains(&self.address) {
            return Err(Mcp342xError::invalid(Field::Address, self.address));
        }
        if self.retry.max_attempts == 0 {
            return Err(Mcp342xError::invalid(Field::MaxAttempts, 0u32));
        }
        Ok(())
    }
}
