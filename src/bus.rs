//! Exclusive access to a shared I2C bus.
//!
//! Drivers only talk to the device while holding a [`BusGuard`]; dropping the
//! guard gives the bus back, so every exit path (including `?`) unlocks it.

use core::cell::{Cell, RefCell};
use core::ops::{Deref, DerefMut};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};
use embedded_hal_bus::i2c::RefCellDevice;

use crate::config::RetryPolicy;
use crate::error::Mcp342xError;

/// An I2C bus that other participants may hold.
///
/// `try_lock` must not block. `unlock` is only called after a successful
/// `try_lock`.
pub trait SharedBus: I2c {
    fn try_lock(&mut self) -> bool;
    fn unlock(&mut self);
}

impl<T: SharedBus + ?Sized> SharedBus for &mut T {
    fn try_lock(&mut self) -> bool {
        T::try_lock(self)
    }

    fn unlock(&mut self) {
        T::unlock(self)
    }
}

/// Scoped exclusive access; unlocks on drop
pub struct BusGuard<'a, B: SharedBus> {
    bus: &'a mut B,
}

impl<B: SharedBus> Deref for BusGuard<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.bus
    }
}

impl<B: SharedBus> DerefMut for BusGuard<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.bus
    }
}

impl<B: SharedBus> Drop for BusGuard<'_, B> {
    fn drop(&mut self) {
        self.bus.unlock();
    }
}

/// Tries to lock `bus` up to `policy.max_attempts` times, pausing
/// `policy.delay_us` between attempts.
pub fn acquire<'a, B, D>(
    bus: &'a mut B,
    delay: &mut D,
    policy: &RetryPolicy,
) -> Result<BusGuard<'a, B>, Mcp342xError<B::Error>>
where
    B: SharedBus,
    D: DelayNs,
{
    let mut waited_us: u64 = 0;
    for attempt in 1..=policy.max_attempts {
        if bus.try_lock() {
            return Ok(BusGuard { bus });
        }
        log::trace!("Bus busy (attempt {} of {})", attempt, policy.max_attempts);
        if attempt < policy.max_attempts {
            delay.delay_us(policy.delay_us);
            waited_us += policy.delay_us as u64;
        }
    }

    Err(Mcp342xError::BusLockTimeout {
        attempts: policy.max_attempts,
        waited_us,
    })
}

/// Wraps an I2C peripheral the driver owns outright.
///
/// Nobody else can reach the bus, so locking only fails while a guard is
/// already held.
pub struct Exclusive<I2C> {
    i2c: I2C,
    in_use: bool,
}

impl<I2C: I2c> Exclusive<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Exclusive { i2c, in_use: false }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> ErrorType for Exclusive<I2C> {
    type Error = I2C::Error;
}

impl<I2C: I2c> I2c for Exclusive<I2C> {
    fn read(&mut self, address: SevenBitAddress, read: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.read(address, read)
    }

    fn write(&mut self, address: SevenBitAddress, write: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, write)
    }

    fn write_read(
        &mut self,
        address: SevenBitAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.i2c.write_read(address, write, read)
    }

    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.i2c.transaction(address, operations)
    }
}

impl<I2C: I2c> SharedBus for Exclusive<I2C> {
    fn try_lock(&mut self) -> bool {
        if self.in_use {
            false
        } else {
            self.in_use = true;
            true
        }
    }

    fn unlock(&mut self) {
        self.in_use = false;
    }
}

/// One physical bus shared by several devices on a single thread.
///
/// Each participant gets its own [`SharedI2c`] handle from [`BusLock::handle`].
pub struct BusLock<I2C> {
    locked: Cell<bool>,
    i2c: RefCell<I2C>,
}

impl<I2C: I2c> BusLock<I2C> {
    pub fn new(i2c: I2C) -> Self {
        BusLock {
            locked: Cell::new(false),
            i2c: RefCell::new(i2c),
        }
    }

    pub fn handle(&self) -> SharedI2c<'_, I2C> {
        SharedI2c {
            device: RefCellDevice::new(&self.i2c),
            locked: &self.locked,
            held: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked.get()
    }

    pub fn into_inner(self) -> I2C {
        self.i2c.into_inner()
    }
}

/// A device's view of a [`BusLock`]
pub struct SharedI2c<'a, I2C> {
    device: RefCellDevice<'a, I2C>,
    locked: &'a Cell<bool>,
    held: bool,
}

impl<I2C: I2c> ErrorType for SharedI2c<'_, I2C> {
    type Error = I2C::Error;
}

impl<I2C: I2c> I2c for SharedI2c<'_, I2C> {
    fn read(&mut self, address: SevenBitAddress, read: &mut [u8]) -> Result<(), Self::Error> {
        self.device.read(address, read)
    }

    fn write(&mut self, address: SevenBitAddress, write: &[u8]) -> Result<(), Self::Error> {
        self.device.write(address, write)
    }

    fn write_read(
        &mut self,
        address: SevenBitAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.device.write_read(address, write, read)
    }

    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.device.transaction(address, operations)
    }
}

impl<I2C: I2c> SharedBus for SharedI2c<'_, I2C> {
    fn try_lock(&mut self) -> bool {
        if self.locked.get() {
            return false;
        }
        self.locked.set(true);
        self.held = true;
        true
    }

    fn unlock(&mut self) {
        if self.held {
            self.held = false;
            self.locked.set(false);
        }
    }
}

impl<I2C> Drop for SharedI2c<'_, I2C> {
    fn drop(&mut self) {
        if self.held {
            self.locked.set(false);
        }
    }
}
