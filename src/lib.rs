//! Driver for the Microchip MCP3422/3423/3424 delta-sigma ADCs on a shared
//! I2C bus, built on the `embedded-hal` traits.

#![cfg_attr(not(test), no_std)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

pub mod bus;
pub mod codec;
mod config;
mod constants;
mod driver;
mod error;

pub use bus::{BusGuard, BusLock, Exclusive, SharedBus, SharedI2c};
pub use codec::{decode_config, decode_sample, encode_config, DecodedConfig, SignMode};
pub use config::{Config, RetryPolicy};
pub use constants::{Channel, Gain, Resolution, Variant, DEFAULT_ADDRESS, MAX_ADDRESS};
pub use driver::{Mcp342x, RawSample};
pub use error::{Field, Mcp342xError};
