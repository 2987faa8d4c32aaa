//! Startup configuration written by [`ChargerController::configure`].
//!
//! [`ChargerController::configure`]: crate::ChargerController::configure

use crate::types::{ChargeCurrent, SafetyLimits};

/// Watchdog disabled
pub const WD_CONTROL_DISABLED: u8 = 0b0110_1110;

/// Unlimited input current, VLOWV 3.4V, boost mode for USB-OTG
pub const CONTROL1_DEFAULT: u8 = 0b1100_0001;

/// Input current level select
pub const VBUS_CONTROL_DEFAULT: u8 = 0b0000_0100;

/// Values written to the charger during bring-up
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargerConfig {
    /// SAFETY register, only honoured once per power cycle
    pub safety: SafetyLimits,
    /// Raw WD_CONTROL value
    pub watchdog: u8,
    /// Output voltage regulation in volts
    pub voreg: f32,
    /// Raw CONTROL1 value
    pub control1: u8,
    /// Raw VBUS_CONTROL value
    pub vbus_control: u8,
    pub charge: ChargeCurrent,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            safety: SafetyLimits {
                current_ma: 1550,
                voltage_code: 0,
            },
            watchdog: WD_CONTROL_DISABLED,
            voreg: 4.20,
            control1: CONTROL1_DEFAULT,
            vbus_control: VBUS_CONTROL_DEFAULT,
            charge: ChargeCurrent {
                iocharge_ma: 1550,
                iterm_code: 1,
            },
        }
    }
}
