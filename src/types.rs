//! Type definitions and enumerations for FAN54040 configuration and status
//!
//! This module provides strongly-typed values for the charger's bitfields
//! and the decoded status report.

use crate::registers::*;

/// Fault code reported in CONTROL0 bits 2..0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Fault {
    NoFault = 0,
    VbusOvp = 1,
    SleepMode = 2,
    PoorInputSource = 3,
    BatteryOvp = 4,
    ThermalShutdown = 5,
    TimerFault = 6,
    NoBattery = 7,
}

impl Fault {
    /// Decode a raw fault code, `None` if it lies outside the 3-bit table
    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Fault::NoFault,
            1 => Fault::VbusOvp,
            2 => Fault::SleepMode,
            3 => Fault::PoorInputSource,
            4 => Fault::BatteryOvp,
            5 => Fault::ThermalShutdown,
            6 => Fault::TimerFault,
            7 => Fault::NoBattery,
            _ => return None,
        })
    }

    pub fn description(self) -> &'static str {
        match self {
            Fault::NoFault => "No Fault",
            Fault::VbusOvp => "VBUS OVP",
            Fault::SleepMode => "Sleep Mode",
            Fault::PoorInputSource => "Poor Input Source",
            Fault::BatteryOvp => "Battery OVP",
            Fault::ThermalShutdown => "Thermal Shutdown",
            Fault::TimerFault => "Timer Fault",
            Fault::NoBattery => "No Battery",
        }
    }
}

/// IBAT register contents: fast charge current and termination current
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargeCurrent {
    /// Charge current in mA (550-2050mA, 100mA steps, rounded down)
    pub iocharge_ma: u16,
    /// Raw 3-bit ITERM code
    pub iterm_code: u8,
}

impl ChargeCurrent {
    pub fn from_register(val: u8) -> Self {
        Self {
            iocharge_ma: current_code_to_ma(get_field(val, IBAT_IOCHARGE_SHIFT, IBAT_IOCHARGE_MASK)),
            iterm_code: val & IBAT_ITERM_MASK,
        }
    }

    /// Register image; bit 7 (RESET) is always written as zero
    pub fn to_register(self) -> u8 {
        let val = set_field(0, 0, IBAT_ITERM_MASK, self.iterm_code);
        set_field(
            val,
            IBAT_IOCHARGE_SHIFT,
            IBAT_IOCHARGE_MASK,
            ma_to_current_code(self.iocharge_ma),
        )
    }
}

/// SAFETY register contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SafetyLimits {
    /// Maximum charge current in mA (550-2050mA, 100mA steps)
    pub current_ma: u16,
    /// Raw 4-bit VSAFE code, 0 selects 4.20V
    pub voltage_code: u8,
}

impl SafetyLimits {
    pub fn from_register(val: u8) -> Self {
        Self {
            current_ma: current_code_to_ma(get_field(val, SAFETY_ISAFE_SHIFT, SAFETY_ISAFE_MASK)),
            voltage_code: val & SAFETY_VSAFE_MASK,
        }
    }

    pub fn to_register(self) -> u8 {
        let val = set_field(0, 0, SAFETY_VSAFE_MASK, self.voltage_code);
        set_field(
            val,
            SAFETY_ISAFE_SHIFT,
            SAFETY_ISAFE_MASK,
            ma_to_current_code(self.current_ma),
        )
    }
}

/// Effective charge current limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeCurrentLimit {
    /// IOCHARGE setting is in effect (mA)
    Programmed(u16),
    /// IO_LEVEL is set, current is held at 340mA
    IoLevel340,
}

impl ChargeCurrentLimit {
    pub fn milliamps(self) -> u16 {
        match self {
            ChargeCurrentLimit::Programmed(ma) => ma,
            ChargeCurrentLimit::IoLevel340 => IO_LEVEL_CURRENT_MA,
        }
    }
}

/// Description of a single status bit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub bit: u8,
    /// Meaning when the bit reads 0
    pub clear: &'static str,
    /// Meaning when the bit reads 1
    pub set: &'static str,
}

impl FlagSpec {
    const fn new(name: &'static str, bit: u8, clear: &'static str, set: &'static str) -> Self {
        Self {
            name,
            bit,
            clear,
            set,
        }
    }

    pub fn is_set(&self, reg: u8) -> bool {
        reg & (1 << self.bit) != 0
    }

    pub fn meaning(&self, reg: u8) -> &'static str {
        if self.is_set(reg) {
            self.set
        } else {
            self.clear
        }
    }
}

pub static VBUS_CONTROL_FLAGS: [FlagSpec; 2] = [
    FlagSpec::new(
        "PROD",
        VBUS_CONTROL_PROD_BIT,
        "Charger operating in normal mode",
        "Charger operating in Production Test mode",
    ),
    FlagSpec::new(
        "IO_LEVEL",
        VBUS_CONTROL_IO_LEVEL_BIT,
        "Charge current set by IOCHARGE",
        "Current control is set to 340 mA",
    ),
];

pub static MONITOR0_FLAGS: [FlagSpec; 8] = [
    FlagSpec::new("ITERM_CMP", 7, "Icharge <= Iterm", "Icharge > Iterm"),
    FlagSpec::new("VBAT_CMP", 6, "Vbat >= Vbus", "Vbat < Vbus"),
    FlagSpec::new(
        "LINCHG",
        5,
        "30mA linear charger OFF",
        "30mA linear charger ON (Vbat < Vshort)",
    ),
    FlagSpec::new(
        "T_120",
        4,
        "Die temperature < 120C, charge current not limited",
        "Die temperature > 120C, charge current limited to 340 mA",
    ),
    FlagSpec::new(
        "ICHG",
        3,
        "ICHARGE loop is controlling charge current",
        "ICHARGE loop not controlling charge current",
    ),
    FlagSpec::new(
        "IBUS",
        2,
        "IBUS (input current) is controlling charge current",
        "IBUS (input current) not controlling charge current",
    ),
    FlagSpec::new(
        "VBUS_VALID",
        1,
        "Vbus is not capable of charging",
        "Vbus is capable of charging",
    ),
    FlagSpec::new(
        "CV",
        0,
        "OREG not controlling charger (other limiting loops are controlling)",
        "OREG controlling charger",
    ),
];

pub static MONITOR1_FLAGS: [FlagSpec; 6] = [
    FlagSpec::new(
        "GATE",
        7,
        "GATE pin is LOW, Q5 is driven on",
        "GATE pin is HIGH, Q5 is off",
    ),
    FlagSpec::new(
        "VBAT",
        6,
        "Vbat < Vbatmin in PP charging, Vbat < Vlow in PWM charging",
        "Vbat > Vbatmin in PP charging, Vbat > Vlow in PWM charging",
    ),
    FlagSpec::new(
        "POK_B",
        5,
        "High current draw from host is OK",
        "Host should limit power usage",
    ),
    FlagSpec::new("DIS_LEVEL", 4, "DIS pin is LOW", "DIS pin is HIGH"),
    FlagSpec::new("NOBAT", 3, "Battery present", "Battery absent"),
    FlagSpec::new(
        "PC_ON",
        2,
        "Post charging not in progress",
        "Post charging (background charging) in progress",
    ),
];

macro_rules! flag_register {
    ($(#[$doc:meta])* $name:ident, $table:ident, { $($getter:ident => $bit:expr),* $(,)? }) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name(pub u8);

        impl $name {
            $(
                pub fn $getter(&self) -> bool {
                    self.0 & (1 << $bit) != 0
                }
            )*

            /// Every documented bit with its decoded state
            pub fn flags(&self) -> impl Iterator<Item = (&'static FlagSpec, bool)> + '_ {
                $table.iter().map(move |spec| (spec, spec.is_set(self.0)))
            }
        }
    };
}

flag_register!(
    /// Decoded VBUS_CONTROL register
    VbusControl, VBUS_CONTROL_FLAGS, {
        prod => VBUS_CONTROL_PROD_BIT,
        io_level => VBUS_CONTROL_IO_LEVEL_BIT,
    }
);

flag_register!(
    /// Decoded MONITOR0 register
    Monitor0, MONITOR0_FLAGS, {
        iterm_cmp => 7,
        vbat_cmp => 6,
        linchg => 5,
        t_120 => 4,
        ichg => 3,
        ibus => 2,
        vbus_valid => 1,
        cv => 0,
    }
);

flag_register!(
    /// Decoded MONITOR1 register
    Monitor1, MONITOR1_FLAGS, {
        gate => 7,
        vbat => 6,
        pok_b => 5,
        dis_level => 4,
        nobat => 3,
        pc_on => 2,
    }
);

/// Snapshot of the charger state
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChargerStatus {
    /// Output voltage regulation set-point in volts
    pub voreg: f32,
    pub charge_current: ChargeCurrentLimit,
    pub vbus_control: VbusControl,
    pub monitor0: Monitor0,
    pub monitor1: Monitor1,
    pub fault: Fault,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fault_table() {
        let expected = [
            "No Fault",
            "VBUS OVP",
            "Sleep Mode",
            "Poor Input Source",
            "Battery OVP",
            "Thermal Shutdown",
            "Timer Fault",
            "No Battery",
        ];
        for (code, text) in expected.iter().enumerate() {
            let fault = Fault::from_code(code as u8).unwrap();
            assert_eq!(fault as u8, code as u8);
            assert_eq!(fault.description(), *text);
        }
        assert_eq!(Fault::from_code(8), None);
    }

    #[test]
    fn charge_current_register() {
        let current = ChargeCurrent::from_register(0b0101_0001);
        assert_eq!(current.iocharge_ma, 1550);
        assert_eq!(current.iterm_code, 1);
        assert_eq!(current.to_register(), 0b0101_0001);

        // bits 7 and 2..0 do not influence IOCHARGE
        assert_eq!(ChargeCurrent::from_register(0b1101_0111).iocharge_ma, 1550);

        let oversized = ChargeCurrent {
            iocharge_ma: 9000,
            iterm_code: 0xFF,
        };
        assert_eq!(oversized.to_register(), 0b0111_1111);
    }

    #[test]
    fn safety_register() {
        let limits = SafetyLimits {
            current_ma: 1550,
            voltage_code: 0,
        };
        assert_eq!(limits.to_register(), 0b1010_0000);
        assert_eq!(SafetyLimits::from_register(0b1010_0000), limits);
        assert_eq!(SafetyLimits::from_register(0xFF).voltage_code, 0x0F);
        assert_eq!(SafetyLimits::from_register(0xFF).current_ma, 2050);
    }

    #[test]
    fn flag_tables_match_getters() {
        let mon0 = Monitor0(0b1000_0010);
        assert!(mon0.iterm_cmp());
        assert!(mon0.vbus_valid());
        assert!(!mon0.cv());

        let set: usize = mon0.flags().filter(|(_, on)| *on).count();
        assert_eq!(set, 2);
        let (spec, on) = mon0.flags().next().unwrap();
        assert_eq!(spec.name, "ITERM_CMP");
        assert!(on);
        assert_eq!(spec.meaning(mon0.0), "Icharge > Iterm");

        let mon1 = Monitor1(0b0000_1000);
        assert!(mon1.nobat());
        let nobat = mon1.flags().find(|(spec, _)| spec.name == "NOBAT").unwrap();
        assert!(nobat.1);
        assert_eq!(nobat.0.meaning(mon1.0), "Battery absent");
        assert_eq!(mon1.flags().count(), 6);

        let vbus = VbusControl(1 << VBUS_CONTROL_IO_LEVEL_BIT);
        assert!(vbus.io_level());
        assert!(!vbus.prod());
    }

    #[test]
    fn flag_bits_are_unique() {
        for table in [&MONITOR0_FLAGS[..], &MONITOR1_FLAGS[..], &VBUS_CONTROL_FLAGS[..]] {
            for (i, a) in table.iter().enumerate() {
                for b in &table[i + 1..] {
                    assert_ne!(a.bit, b.bit);
                }
            }
        }
    }
}
