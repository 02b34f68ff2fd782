//! Decoded setting values and the polled projector snapshot.

use std::fmt;

use crate::models::Setting;
use crate::status::{ErrorStatus, PowerStatus};

/// The current value of one setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingValue {
    Numeric(u16),
    Choice(&'static str),
    Switch(bool),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Numeric(value) => write!(f, "{value}"),
            SettingValue::Choice(name) => f.write_str(name),
            SettingValue::Switch(true) => f.write_str("on"),
            SettingValue::Switch(false) => f.write_str("off"),
        }
    }
}

/// A snapshot produced by [`SonyProjector::refresh`](crate::SonyProjector::refresh).
///
/// Every read is independent: a field is `None` when its read failed or was
/// skipped, without affecting the others. Settings are only polled while
/// the projector is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectorState {
    pub power: Option<PowerStatus>,
    pub error: Option<ErrorStatus>,
    /// Every setting available on the model, in polling order.
    pub settings: Vec<(Setting, Option<SettingValue>)>,
}

impl ProjectorState {
    pub fn is_on(&self) -> bool {
        self.power.is_some_and(PowerStatus::is_on)
    }

    /// Value of `setting`, if it was read successfully.
    pub fn get(&self, setting: Setting) -> Option<SettingValue> {
        self.settings
            .iter()
            .find(|(s, _)| *s == setting)
            .and_then(|(_, value)| *value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_values() {
        assert_eq!(SettingValue::Numeric(50).to_string(), "50");
        assert_eq!(SettingValue::Choice("Stretch").to_string(), "Stretch");
        assert_eq!(SettingValue::Switch(true).to_string(), "on");
        assert_eq!(SettingValue::Switch(false).to_string(), "off");
    }

    #[test]
    fn lookup_in_snapshot() {
        let state = ProjectorState {
            power: Some(PowerStatus::On),
            settings: vec![
                (Setting::Contrast, Some(SettingValue::Numeric(40))),
                (Setting::Aspect, None),
            ],
            ..Default::default()
        };
        assert!(state.is_on());
        assert_eq!(state.get(Setting::Contrast), Some(SettingValue::Numeric(40)));
        assert_eq!(state.get(Setting::Aspect), None);
        assert_eq!(state.get(Setting::Hue), None);
    }
}
