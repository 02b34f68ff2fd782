//! Power and error status reported by the projector.

use std::fmt;

use projlib_core::error::{Error, Result};
use projlib_core::{Code, decode16};

/// Power state of the projector (item `01 02`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerStatus {
    Standby,
    StartingUp,
    LampStarting,
    On,
    Cooling1,
    Cooling2,
    SavingCooling1,
    SavingCooling2,
    SavingStandby,
}

impl PowerStatus {
    /// All power states, in code order.
    pub const ALL: [PowerStatus; 9] = [
        PowerStatus::Standby,
        PowerStatus::StartingUp,
        PowerStatus::LampStarting,
        PowerStatus::On,
        PowerStatus::Cooling1,
        PowerStatus::Cooling2,
        PowerStatus::SavingCooling1,
        PowerStatus::SavingCooling2,
        PowerStatus::SavingStandby,
    ];

    /// The numeric code sent by the projector.
    pub fn code(self) -> u16 {
        match self {
            PowerStatus::Standby => 0,
            PowerStatus::StartingUp => 1,
            PowerStatus::LampStarting => 2,
            PowerStatus::On => 3,
            PowerStatus::Cooling1 => 4,
            PowerStatus::Cooling2 => 5,
            PowerStatus::SavingCooling1 => 6,
            PowerStatus::SavingCooling2 => 7,
            PowerStatus::SavingStandby => 8,
        }
    }

    /// Decode a status payload.
    pub fn from_code(code: Code) -> Result<Self> {
        let value = decode16(code);
        Self::ALL
            .into_iter()
            .find(|s| s.code() == value)
            .ok_or_else(|| Error::UnknownCode {
                table: "power status",
                category: crate::tables::COMMON,
                code: code.to_vec(),
            })
    }

    /// Whether the projector is on or on its way to on.
    pub fn is_on(self) -> bool {
        matches!(
            self,
            PowerStatus::StartingUp | PowerStatus::LampStarting | PowerStatus::On
        )
    }

    /// Display name, matching the power status capability table.
    pub fn name(self) -> &'static str {
        match self {
            PowerStatus::Standby => "Standby",
            PowerStatus::StartingUp => "Starting up",
            PowerStatus::LampStarting => "Lamp starting",
            PowerStatus::On => "On",
            PowerStatus::Cooling1 => "Cooling 1",
            PowerStatus::Cooling2 => "Cooling 2",
            PowerStatus::SavingCooling1 => "Saving cooling 1",
            PowerStatus::SavingCooling2 => "Saving cooling 2",
            PowerStatus::SavingStandby => "Saving standby",
        }
    }
}

impl fmt::Display for PowerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error flags reported by the projector (item `01 01`).
///
/// Each bit of the low payload byte is one fault. An empty set means no error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ErrorStatus(u16);

impl ErrorStatus {
    pub const LAMP: ErrorStatus = ErrorStatus(0x0001);
    pub const FAN: ErrorStatus = ErrorStatus(0x0002);
    pub const COVER: ErrorStatus = ErrorStatus(0x0004);
    pub const TEMPERATURE: ErrorStatus = ErrorStatus(0x0008);
    pub const D5V: ErrorStatus = ErrorStatus(0x0010);
    pub const POWER: ErrorStatus = ErrorStatus(0x0020);
    pub const WARNING_TEMPERATURE: ErrorStatus = ErrorStatus(0x0040);
    pub const NVM: ErrorStatus = ErrorStatus(0x0080);

    const NAMED: [(ErrorStatus, &'static str); 8] = [
        (Self::LAMP, "lamp"),
        (Self::FAN, "fan"),
        (Self::COVER, "cover"),
        (Self::TEMPERATURE, "temperature"),
        (Self::D5V, "D5V"),
        (Self::POWER, "power"),
        (Self::WARNING_TEMPERATURE, "warning temperature"),
        (Self::NVM, "NVM data"),
    ];

    pub fn from_code(code: Code) -> Self {
        ErrorStatus(decode16(code))
    }

    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn is_ok(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, flag: ErrorStatus) -> bool {
        flag.0 != 0 && self.0 & flag.0 == flag.0
    }

    /// Names of the faults that are set.
    pub fn faults(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ok() {
            return f.write_str("no error");
        }
        f.write_str(&self.faults().join(", "))
    }
}
