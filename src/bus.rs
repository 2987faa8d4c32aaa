//! Single-byte register access to one device on an I2C bus

use crate::error::Error;
use embedded_hal::i2c::I2c;

/// Identifies one physical chip by bus number and 7-bit device address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceHandle {
    bus: u8,
    address: u8,
}

impl DeviceHandle {
    pub const fn new(bus: u8, address: u8) -> Self {
        Self { bus, address }
    }

    /// Handle for the charger at its fixed address on `bus`
    pub const fn charger(bus: u8) -> Self {
        Self::new(bus, crate::registers::FAN54040_SLAVE_ADDRESS)
    }

    pub const fn bus(&self) -> u8 {
        self.bus
    }

    pub const fn address(&self) -> u8 {
        self.address
    }
}

/// A device on an I2C bus, addressed by its [`DeviceHandle`]
///
/// Every call is one blocking bus transaction. Nothing is retried and
/// writes are not read back.
pub struct BusDevice<I> {
    i2c: I,
    handle: DeviceHandle,
}

impl<I> BusDevice<I>
where
    I: I2c,
{
    pub fn new(i2c: I, handle: DeviceHandle) -> Self {
        Self { i2c, handle }
    }

    pub fn handle(&self) -> DeviceHandle {
        self.handle
    }

    /// Consume the device and return the owned I2C bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Read a single register
    pub fn read(&mut self, reg: u8) -> Result<u8, Error<I::Error>> {
        let mut buf = [0u8];
        self.i2c
            .write_read(self.handle.address, &[reg], &mut buf)
            .map_err(Error::I2c)?;
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "i2c-{} 0x{:02X}: read 0x{:02X} = 0x{:02X}",
            self.handle.bus,
            self.handle.address,
            reg,
            buf[0]
        );
        Ok(buf[0])
    }

    /// Write a single register
    pub fn write(&mut self, reg: u8, value: u8) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "i2c-{} 0x{:02X}: write 0x{:02X} = 0x{:02X}",
            self.handle.bus,
            self.handle.address,
            reg,
            value
        );
        self.i2c
            .write(self.handle.address, &[reg, value])
            .map_err(Error::I2c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDR: u8 = 0x42;

    #[test]
    fn charger_handle() {
        let handle = DeviceHandle::charger(1);
        assert_eq!(handle.bus(), 1);
        assert_eq!(handle.address(), 0x6B);
    }

    #[test]
    fn read_is_one_write_read() {
        let expectations = [I2cTransaction::write_read(ADDR, vec![0x10], vec![0xA5])];
        let mut dev = BusDevice::new(I2cMock::new(&expectations), DeviceHandle::new(2, ADDR));

        assert_eq!(dev.read(0x10), Ok(0xA5));
        dev.release().done();
    }

    #[test]
    fn write_sends_register_then_value() {
        let expectations = [I2cTransaction::write(ADDR, vec![0x06, 0xA0])];
        let mut dev = BusDevice::new(I2cMock::new(&expectations), DeviceHandle::new(2, ADDR));

        assert_eq!(dev.write(0x06, 0xA0), Ok(()));
        dev.release().done();
    }

    #[test]
    fn bus_errors_are_surfaced_without_retry() {
        let expectations = [
            I2cTransaction::write_read(ADDR, vec![0x00], vec![0x00]).with_error(ErrorKind::Other),
            I2cTransaction::write(ADDR, vec![0x00, 0x60]).with_error(ErrorKind::Other),
        ];
        let mut dev = BusDevice::new(I2cMock::new(&expectations), DeviceHandle::new(0, ADDR));

        assert_eq!(dev.read(0x00), Err(Error::I2c(ErrorKind::Other)));
        assert_eq!(dev.write(0x00, 0x60), Err(Error::I2c(ErrorKind::Other)));
        dev.release().done();
    }
}
