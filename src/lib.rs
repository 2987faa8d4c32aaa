#![cfg_attr(not(test), no_std)]
//! # FAN54040 Battery Charger Driver
//!
//! This crate provides an embedded-hal driver for the FAN54040 single-cell
//! Li-ion switching charger. It supports:
//! - Single-byte register access on any `embedded_hal::i2c::I2c` bus
//! - Bring-up configuration (safety limits, watchdog, VOREG, input and charge current)
//! - Output voltage regulation (VOREG) read and write in volts
//! - Charge current (IOCHARGE) and termination current (ITERM)
//! - Safety timer reset
//! - Decoded status report: monitor flags and fault code
//!
//! ## Example
//!
//! ```no_run
//! use fan54040::{ChargerController, Error, Fault};
//! # use embedded_hal::i2c::I2c;
//! # fn example<I: I2c>(i2c: I) -> Result<(), Error<I::Error>> {
//! let mut charger = ChargerController::new(i2c, 1);
//!
//! charger.configure_defaults()?;
//!
//! let status = charger.status()?;
//! if status.fault != Fault::NoFault {
//!     // ... report status.fault.description()
//! }
//! for (flag, set) in status.monitor0.flags() {
//!     // ... print flag.name and flag.meaning(status.monitor0.0)
//! #   let _ = (flag, set);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! With the `defmt` feature enabled, register traffic is traced and
//! configuration and status snapshots are logged at debug level.

mod bus;
mod config;
mod driver;
mod error;
mod registers;
mod types;

// Re-export main types
pub use bus::{BusDevice, DeviceHandle};
pub use config::*;
pub use driver::ChargerController;
pub use error::Error;
pub use registers::*;
pub use types::*;
