//! Register addresses and constants for FAN54040
//!
//! This module defines the register map, field masks and shifts, and the
//! unit conversion constants for the FAN54040 charger.

/// I2C Address
pub const FAN54040_SLAVE_ADDRESS: u8 = 0x6B;

/// Control register 0 - Timer reset, status and the 3-bit fault code
pub const FAN54040_CONTROL0: u8 = 0x00;

/// Control register 1 - Input current limit, weak battery voltage and operating mode
pub const FAN54040_CONTROL1: u8 = 0x01;

/// Output voltage regulation register - OREG set-point in bits 7..2
pub const FAN54040_OREG: u8 = 0x02;

/// IC information register - Vendor, part number and revision
pub const FAN54040_IC_INFO: u8 = 0x03;

/// Battery current register - IOCHARGE in bits 6..3, ITERM in bits 2..0
pub const FAN54040_IBAT: u8 = 0x04;

/// VBUS control register - PROD and IO_LEVEL
pub const FAN54040_VBUS_CONTROL: u8 = 0x05;

/// Safety limit register - ISAFE in bits 7..4, VSAFE in bits 3..0.
/// Only accepted once after power-up, must be written twice to latch.
pub const FAN54040_SAFETY: u8 = 0x06;

/// Post charging register
pub const FAN54040_POST_CHARGING: u8 = 0x07;

/// Monitor register 0 - Charge loop comparators
pub const FAN54040_MONITOR0: u8 = 0x10;

/// Monitor register 1 - Pin levels, battery presence and post charging
pub const FAN54040_MONITOR1: u8 = 0x11;

/// NTC register
pub const FAN54040_NTC: u8 = 0x12;

/// Watchdog control register
pub const FAN54040_WD_CONTROL: u8 = 0x13;

// CONTROL0
pub const CONTROL0_FAULT_MASK: u8 = 0b0000_0111;
/// Written to CONTROL0 to reset the 32 s safety timer
pub const CONTROL0_TIMER_RESET: u8 = 0b0110_0000;

// OREG
pub const OREG_SHIFT: u8 = 2;
pub const OREG_MASK: u8 = 0b0011_1111;
pub const OREG_KEEP_MASK: u8 = 0b0000_0011;
pub const OREG_VOL_MIN: f32 = 3.50;
pub const OREG_VOL_MAX: f32 = 4.44;
pub const OREG_VOL_STEPS: f32 = 0.02;

// IBAT
pub const IBAT_IOCHARGE_SHIFT: u8 = 3;
pub const IBAT_IOCHARGE_MASK: u8 = 0b0000_1111;
pub const IBAT_ITERM_MASK: u8 = 0b0000_0111;
pub const IOCHARGE_CUR_MIN: u16 = 550;
pub const IOCHARGE_CUR_MAX: u16 = 2050;
pub const IOCHARGE_CUR_STEPS: u16 = 100;

// VBUS_CONTROL
pub const VBUS_CONTROL_PROD_BIT: u8 = 6;
pub const VBUS_CONTROL_IO_LEVEL_BIT: u8 = 5;
/// Charge current while IO_LEVEL is set
pub const IO_LEVEL_CURRENT_MA: u16 = 340;

// SAFETY
pub const SAFETY_ISAFE_SHIFT: u8 = 4;
pub const SAFETY_ISAFE_MASK: u8 = 0b0000_1111;
pub const SAFETY_VSAFE_MASK: u8 = 0b0000_1111;

/// Extract a field of `mask` width sitting at `shift`
#[inline]
pub const fn get_field(reg: u8, shift: u8, mask: u8) -> u8 {
    (reg >> shift) & mask
}

/// Place `code` into the field of `mask` width at `shift`, dropping excess bits
#[inline]
pub const fn set_field(reg: u8, shift: u8, mask: u8, code: u8) -> u8 {
    (reg & !(mask << shift)) | ((code & mask) << shift)
}

/// Convert a 6-bit OREG code to volts, capped at the highest regulation point
#[inline]
pub fn oreg_code_to_volts(code: u8) -> f32 {
    let volts = (code & OREG_MASK) as f32 * OREG_VOL_STEPS + OREG_VOL_MIN;
    volts.min(OREG_VOL_MAX)
}

/// Convert volts to the nearest 6-bit OREG code, clamping to 3.50..=4.44 V
#[inline]
pub fn volts_to_oreg_code(volts: f32) -> u8 {
    let volts = volts.clamp(OREG_VOL_MIN, OREG_VOL_MAX);
    // round half up; the operand is never negative after the clamp
    let code = ((volts - OREG_VOL_MIN) / OREG_VOL_STEPS + 0.5) as u8;
    code & OREG_MASK
}

/// Convert a 4-bit IOCHARGE (or ISAFE) code to milliamps
#[inline]
pub const fn current_code_to_ma(code: u8) -> u16 {
    (code & IBAT_IOCHARGE_MASK) as u16 * IOCHARGE_CUR_STEPS + IOCHARGE_CUR_MIN
}

/// Convert milliamps to a 4-bit IOCHARGE (or ISAFE) code, clamping to 550..=2050 mA
#[inline]
pub fn ma_to_current_code(milliamp: u16) -> u8 {
    let milliamp = milliamp.clamp(IOCHARGE_CUR_MIN, IOCHARGE_CUR_MAX);
    ((milliamp - IOCHARGE_CUR_MIN) / IOCHARGE_CUR_STEPS) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_helpers_mask_before_shift() {
        assert_eq!(get_field(0xFF, IBAT_IOCHARGE_SHIFT, IBAT_IOCHARGE_MASK), 0x0F);
        assert_eq!(get_field(0x88, OREG_SHIFT, OREG_MASK), 34);
        // 0x7F does not fit in 6 bits, the top bit must not spill into bit 8
        assert_eq!(set_field(0x00, OREG_SHIFT, OREG_MASK, 0x7F), 0b1111_1100);
        assert_eq!(set_field(0b0000_0011, OREG_SHIFT, OREG_MASK, 0), 0b0000_0011);
    }

    #[test]
    fn oreg_conversion_stays_within_one_step() {
        let mut volts = OREG_VOL_MIN;
        while volts <= OREG_VOL_MAX {
            let back = oreg_code_to_volts(volts_to_oreg_code(volts));
            assert!((back - volts).abs() <= OREG_VOL_STEPS, "{} -> {}", volts, back);
            assert!(back <= OREG_VOL_MAX);
            volts += 0.005;
        }
    }

    #[test]
    fn oreg_conversion_clamps() {
        assert_eq!(volts_to_oreg_code(5.0), volts_to_oreg_code(4.44));
        assert_eq!(volts_to_oreg_code(2.0), volts_to_oreg_code(3.50));
        assert_eq!(volts_to_oreg_code(2.0), 0);
        assert_eq!(volts_to_oreg_code(4.44), 47);
        assert_eq!(volts_to_oreg_code(4.2), 35);
        // codes above 47 would read back higher than the ceiling
        assert_eq!(oreg_code_to_volts(63), OREG_VOL_MAX);
    }

    #[test]
    fn current_conversion() {
        assert_eq!(current_code_to_ma(0), 550);
        assert_eq!(current_code_to_ma(10), 1550);
        assert_eq!(current_code_to_ma(0xFF), 2050);
        assert_eq!(ma_to_current_code(1550), 10);
        assert_eq!(ma_to_current_code(1599), 10);
        assert_eq!(ma_to_current_code(100), 0);
        assert_eq!(ma_to_current_code(5000), 15);
    }
}
