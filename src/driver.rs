//! FAN54040 charger driver implementation

use crate::{
    bus::{BusDevice, DeviceHandle},
    config::ChargerConfig,
    error::Error,
    registers::*,
    types::*,
};
use embedded_hal::i2c::I2c;

/// FAN54040 charger driver
///
/// Holds no state besides the bus device. Every method is a fresh
/// read-decode or encode-write against the chip; callers sharing one chip
/// between contexts must serialize access themselves.
pub struct ChargerController<I> {
    dev: BusDevice<I>,
}

impl<I> ChargerController<I>
where
    I: I2c,
{
    /// Create a new driver for the charger on I2C bus number `bus`
    ///
    /// # Example
    /// ```no_run
    /// # use fan54040::ChargerController;
    /// # use embedded_hal::i2c::I2c;
    /// # fn example<I: I2c>(i2c: I) {
    /// let charger = ChargerController::new(i2c, 1);
    /// # }
    /// ```
    pub fn new(i2c: I, bus: u8) -> Self {
        Self::from_device(BusDevice::new(i2c, DeviceHandle::charger(bus)))
    }

    /// Wrap an already addressed bus device
    pub fn from_device(dev: BusDevice<I>) -> Self {
        Self { dev }
    }

    pub fn handle(&self) -> DeviceHandle {
        self.dev.handle()
    }

    /// Consume the driver and return the owned I2C bus
    pub fn release(self) -> I {
        self.dev.release()
    }

    // ========================================
    // Configuration
    // ========================================

    /// Write the standard bring-up values, see [`ChargerConfig::default`]
    pub fn configure_defaults(&mut self) -> Result<(), Error<I::Error>> {
        self.configure(&ChargerConfig::default())
    }

    /// Write a full bring-up configuration
    ///
    /// Stops at the first failed transaction. Registers written before the
    /// failure keep their new values.
    pub fn configure(&mut self, config: &ChargerConfig) -> Result<(), Error<I::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("FAN54040: configuring {}", config);

        // SAFETY only latches on the second write after power-up
        let safety = config.safety.to_register();
        self.dev.write(FAN54040_SAFETY, safety)?;
        self.dev.write(FAN54040_SAFETY, safety)?;

        self.dev.write(FAN54040_WD_CONTROL, config.watchdog)?;
        self.set_voreg(config.voreg)?;
        self.dev.write(FAN54040_CONTROL1, config.control1)?;
        self.dev.write(FAN54040_VBUS_CONTROL, config.vbus_control)?;
        self.set_charge_current(config.charge)
    }

    /// Reset the 32s safety timer
    pub fn reset_timer(&mut self) -> Result<(), Error<I::Error>> {
        self.dev.write(FAN54040_CONTROL0, CONTROL0_TIMER_RESET)
    }

    /// Read the SAFETY register
    pub fn safety_limits(&mut self) -> Result<SafetyLimits, Error<I::Error>> {
        let val = self.dev.read(FAN54040_SAFETY)?;
        Ok(SafetyLimits::from_register(val))
    }

    // ========================================
    // Output voltage regulation
    // ========================================

    /// Get output voltage regulation set-point in volts (3.50-4.44V)
    pub fn voreg(&mut self) -> Result<f32, Error<I::Error>> {
        let val = self.dev.read(FAN54040_OREG)?;
        Ok(oreg_code_to_volts(get_field(val, OREG_SHIFT, OREG_MASK)))
    }

    /// Set output voltage regulation (3.50-4.44V, 20mV steps)
    ///
    /// Out of range values are clamped. The whole register is overwritten,
    /// clearing OTG_PL and OTG_EN in bits 1..0; use [`Self::update_voreg`]
    /// to keep them.
    pub fn set_voreg(&mut self, volts: f32) -> Result<(), Error<I::Error>> {
        if !volts.is_finite() {
            return Err(Error::InvalidVoltage);
        }
        let code = volts_to_oreg_code(volts);
        self.dev.write(FAN54040_OREG, set_field(0, OREG_SHIFT, OREG_MASK, code))
    }

    /// Set output voltage regulation, preserving OREG bits 1..0
    pub fn update_voreg(&mut self, volts: f32) -> Result<(), Error<I::Error>> {
        if !volts.is_finite() {
            return Err(Error::InvalidVoltage);
        }
        let code = volts_to_oreg_code(volts);
        let val = self.dev.read(FAN54040_OREG)?;
        self.dev
            .write(FAN54040_OREG, set_field(val, OREG_SHIFT, OREG_MASK, code))
    }

    // ========================================
    // Charge current
    // ========================================

    /// Get programmed charge current in mA
    pub fn iocharge(&mut self) -> Result<u16, Error<I::Error>> {
        let val = self.dev.read(FAN54040_IBAT)?;
        Ok(ChargeCurrent::from_register(val).iocharge_ma)
    }

    /// Read both IOCHARGE and ITERM
    pub fn charge_current(&mut self) -> Result<ChargeCurrent, Error<I::Error>> {
        let val = self.dev.read(FAN54040_IBAT)?;
        Ok(ChargeCurrent::from_register(val))
    }

    /// Set charge and termination current (IOCHARGE 550-2050mA, 100mA steps)
    pub fn set_charge_current(&mut self, current: ChargeCurrent) -> Result<(), Error<I::Error>> {
        self.dev.write(FAN54040_IBAT, current.to_register())
    }

    // ========================================
    // Status
    // ========================================

    /// Decode the fault code in CONTROL0
    pub fn fault(&mut self) -> Result<Fault, Error<I::Error>> {
        let code = self.dev.read(FAN54040_CONTROL0)? & CONTROL0_FAULT_MASK;
        Fault::from_code(code).ok_or(Error::InvalidFaultCode(code))
    }

    /// Read and decode the full charger state
    pub fn status(&mut self) -> Result<ChargerStatus, Error<I::Error>> {
        let voreg = self.voreg()?;

        let vbus_control = VbusControl(self.dev.read(FAN54040_VBUS_CONTROL)?);
        let charge_current = if vbus_control.io_level() {
            ChargeCurrentLimit::IoLevel340
        } else {
            ChargeCurrentLimit::Programmed(self.iocharge()?)
        };

        let monitor0 = Monitor0(self.dev.read(FAN54040_MONITOR0)?);
        let monitor1 = Monitor1(self.dev.read(FAN54040_MONITOR1)?);
        let fault = self.fault()?;

        let status = ChargerStatus {
            voreg,
            charge_current,
            vbus_control,
            monitor0,
            monitor1,
            fault,
        };
        #[cfg(feature = "defmt")]
        defmt::debug!("FAN54040: {}", status);
        Ok(status)
    }
}
