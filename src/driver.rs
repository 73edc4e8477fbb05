use crate::bus::{self, SharedBus};
use crate::codec::{decode_config, encode_config, sample_to_microvolts};
use crate::config::Config;
use crate::constants::{Channel, Gain, Resolution};
use crate::error::{Field, Mcp342xError};
use core::result::Result;
use core::result::Result::Ok;

use embedded_hal::delay::DelayNs;

/// Bytes of one sample as read from the device
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawSample {
    resolution: Resolution,
    bytes: [u8; 3],
}

impl RawSample {
    /// Resolution the sample was read at
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.resolution.buffer_len()]
    }
}

/// MCP3422/3/4 driver
pub struct Mcp342x<BUS, DELAY> {
    bus: BUS,
    delay: DELAY,
    config: Config,
    /// Last configuration byte the device acknowledged
    written: Option<u8>,
}

impl<BUS, DELAY, BusError> Mcp342x<BUS, DELAY>
where
    BUS: SharedBus<Error = BusError>,
    DELAY: DelayNs,
{
    /// Creates a driver and writes `config` to the device.
    ///
    /// Settings are validated before the bus is touched.
    pub fn new(bus: BUS, delay: DELAY, config: Config) -> Result<Self, Mcp342xError<BusError>> {
        config.validate::<BusError>()?;

        let mut adc = Mcp342x {
            bus,
            delay,
            config,
            written: None,
        };
        adc.configure_device()?;
        Ok(adc)
    }

    /// 18 bits, channel 1, gain 1 at the base address
    pub fn with_defaults(bus: BUS, delay: DELAY) -> Result<Self, Mcp342xError<BusError>> {
        Self::new(bus, delay, Config::default())
    }

    /// Gives back the bus and delay provider
    pub fn release(self) -> (BUS, DELAY) {
        (self.bus, self.delay)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resolution(&self) -> Resolution {
        self.config.resolution
    }

    pub fn channel(&self) -> Channel {
        self.config.channel
    }

    pub fn gain(&self) -> Gain {
        self.config.gain
    }

    /// Updates the stored resolution; takes effect on the next `configure_device`
    pub fn set_resolution(&mut self, resolution: Resolution) {
        self.config.resolution = resolution;
    }

    pub fn set_resolution_bits(&mut self, bits: u8) -> Result<(), Mcp342xError<BusError>> {
        let resolution =
            Resolution::try_from(bits).map_err(|v| Mcp342xError::<BusError>::invalid(Field::Resolution, v))?;
        self.set_resolution(resolution);
        Ok(())
    }

    /// Updates the stored channel; fails if the part has no such input
    pub fn set_channel(&mut self, channel: Channel) -> Result<(), Mcp342xError<BusError>> {
        self.check_channel(channel)?;
        self.config.channel = channel;
        Ok(())
    }

    fn check_channel(&self, channel: Channel) -> Result<(), Mcp342xError<BusError>> {
        if !self.config.variant.supports(channel) {
            return Err(Mcp342xError::invalid(Field::Channel, channel.number()));
        }
        Ok(())
    }

    pub fn set_channel_number(&mut self, number: u8) -> Result<(), Mcp342xError<BusError>> {
        let channel = Channel::try_from(number).map_err(|v| Mcp342xError::<BusError>::invalid(Field::Channel, v))?;
        self.set_channel(channel)
    }

    pub fn set_gain(&mut self, gain: Gain) {
        self.config.gain = gain;
    }

    pub fn set_gain_value(&mut self, multiplier: u8) -> Result<(), Mcp342xError<BusError>> {
        let gain = Gain::try_from(multiplier).map_err(|v| Mcp342xError::<BusError>::invalid(Field::Gain, v))?;
        self.set_gain(gain);
        Ok(())
    }

    /// Writes the configuration byte for the current settings
    pub fn configure_device(&mut self) -> Result<(), Mcp342xError<BusError>> {
        let byte = encode_config(self.config.resolution, self.config.channel, self.config.gain);
        self.write_config(byte)
    }

    /// Forgets the last written byte if the transfer fails, since the
    /// device state is then unknown. A lock timeout leaves it untouched.
    fn write_config(&mut self, byte: u8) -> Result<(), Mcp342xError<BusError>> {
        log::debug!(
            "Writing config 0x{:02X} to 0x{:02X}: {:?}",
            byte,
            self.config.address,
            decode_config(byte)
        );

        let mut bus = bus::acquire(&mut self.bus, &mut self.delay, &self.config.retry)?;
        let result = bus.write(self.config.address, &[byte]);
        drop(bus);

        self.written = result.is_ok().then_some(byte);
        result.map_err(Mcp342xError::Bus)
    }

    /// Reads one sample without decoding it
    pub fn read_raw(&mut self) -> Result<RawSample, Mcp342xError<BusError>> {
        let resolution = self.config.resolution;
        let len = resolution.buffer_len();
        let mut bytes = [0u8; 3];

        let mut bus = bus::acquire(&mut self.bus, &mut self.delay, &self.config.retry)?;
        bus.read(self.config.address, &mut bytes[..len])
            .map_err(Mcp342xError::Bus)?;
        drop(bus);

        log::debug!("Raw data: {:02X?}", &bytes[..len]);
        Ok(RawSample { resolution, bytes })
    }

    /// Reads the current channel and returns microvolts
    pub fn read(&mut self) -> Result<f64, Mcp342xError<BusError>> {
        let raw = self.read_raw()?;
        Ok(sample_to_microvolts(
            &raw.bytes,
            raw.resolution,
            self.config.gain,
            self.config.sign,
        ))
    }

    /// Switches to `channel` if the device is not already set up for it,
    /// optionally waits for the input to settle, then reads.
    ///
    /// The stored channel only changes once the device has accepted the
    /// new configuration.
    pub fn read_from_channel(
        &mut self,
        channel: u8,
        apply_delay: bool,
    ) -> Result<f64, Mcp342xError<BusError>> {
        let channel = Channel::try_from(channel).map_err(|v| Mcp342xError::<BusError>::invalid(Field::Channel, v))?;

        self.check_channel(channel)?;

        let byte = encode_config(self.config.resolution, channel, self.config.gain);
        if self.written != Some(byte) {
            self.write_config(byte)?;
        }
        self.config.channel = channel;

        if apply_delay {
            self.delay.delay_ms(self.config.settle_delay_ms);
        }

        self.read()
    }
}
