//! Error types for FAN54040 operations
//!
//! This module defines the error types that can occur when using the FAN54040 driver.

/// Error types for FAN54040 operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C communication error
    I2c(E),
    /// Voltage argument is not a finite number
    InvalidVoltage,
    /// Register held a code with no defined meaning
    InvalidFaultCode(u8),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Error::I2c(error)
    }
}
