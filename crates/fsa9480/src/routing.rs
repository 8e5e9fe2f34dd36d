//! Switch controller: named routing paths and their register encodings.
//!
//! A manual route pins the D+/D- lines to one set of pins through MANSW1 and
//! clears CTRL's manual-switch bit (0 = manual). `Auto` writes an all-open
//! MANSW1 and sets the bit again so detection drives the switches.

use core::str::FromStr;

use platform::fsa9480::{
    CON_MANUAL_IDLE, CON_MANUAL_SW, SW_AUDIO, SW_AUTO, SW_DHOST, SW_UART, SW_VAUDIO,
};

use crate::error::SwitchError;

/// Signal path selectable on the D+/D- lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RoutingPath {
    /// Video/audio pins (dock speakers on most handsets).
    VAudio,
    /// UART pins.
    Uart,
    /// Audio pins.
    Audio,
    /// USB host pins.
    UsbHost,
    /// Automatic routing by detection.
    Auto,
}

impl RoutingPath {
    /// Every path, in the order names are matched.
    pub const ALL: [Self; 5] = [Self::VAudio, Self::Uart, Self::Audio, Self::UsbHost, Self::Auto];

    /// MANSW1 value and whether CTRL's manual-switch bit is cleared.
    pub const fn route(self) -> (u8, bool) {
        match self {
            Self::VAudio => (SW_VAUDIO, true),
            Self::Uart => (SW_UART, true),
            Self::Audio => (SW_AUDIO, true),
            Self::UsbHost => (SW_DHOST, true),
            Self::Auto => (SW_AUTO, false),
        }
    }

    /// MANSW1 value for this path.
    pub const fn switch_value(self) -> u8 {
        self.route().0
    }

    /// Management-interface token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::VAudio => "VAUDIO",
            Self::Uart => "UART",
            Self::Audio => "AUDIO",
            Self::UsbHost => "DHOST",
            Self::Auto => "AUTO",
        }
    }

    /// Path whose MANSW1 encoding is exactly `value`.
    pub fn from_switch_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.switch_value() == value)
    }

    /// Match a management-interface write against the path tokens.
    ///
    /// Only the token prefix is compared, so trailing newlines and junk after
    /// the token are accepted.
    pub fn parse(input: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| input.starts_with(p.name()))
    }

    /// CTRL value to write alongside this path, starting from `control`.
    pub const fn apply_to_control(self, control: u8) -> u8 {
        if self.route().1 {
            control & !CON_MANUAL_SW
        } else {
            control | CON_MANUAL_SW
        }
    }
}

impl FromStr for RoutingPath {
    type Err = SwitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(SwitchError::UnknownPath)
    }
}

/// Free-function form of [`RoutingPath::route`].
pub const fn route(path: RoutingPath) -> (u8, bool) {
    path.route()
}

/// `true` when `control` (manual bit ignored) is switch-open + raw-data + wait.
///
/// Any other control state means detection or a fault owns the switch and a
/// manual override is not safe.
pub const fn manual_override_allowed(control: u8) -> bool {
    control & !CON_MANUAL_SW == CON_MANUAL_IDLE
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::fsa9480::{CON_INT_MASK, CON_MASK};

    #[test]
    fn route_table() {
        assert_eq!(route(RoutingPath::VAudio), (0x92, true));
        assert_eq!(route(RoutingPath::Uart), (0x6D, true));
        assert_eq!(route(RoutingPath::Audio), (0x49, true));
        assert_eq!(route(RoutingPath::UsbHost), (0x24, true));
        assert_eq!(route(RoutingPath::Auto), (0x00, false));
    }

    #[test]
    fn parse_accepts_tokens_with_trailing_newline() {
        assert_eq!(RoutingPath::parse("VAUDIO\n"), Some(RoutingPath::VAudio));
        assert_eq!(RoutingPath::parse("UART"), Some(RoutingPath::Uart));
        assert_eq!(RoutingPath::parse("AUDIO\n"), Some(RoutingPath::Audio));
        assert_eq!(RoutingPath::parse("DHOST"), Some(RoutingPath::UsbHost));
        assert_eq!(RoutingPath::parse("AUTO\n"), Some(RoutingPath::Auto));
    }

    #[test]
    fn parse_rejects_unknown_tokens() {
        assert_eq!(RoutingPath::parse("USB"), None);
        assert_eq!(RoutingPath::parse("uart"), None);
        assert_eq!(RoutingPath::parse(""), None);
        assert_eq!("HOST".parse::<RoutingPath>(), Err(SwitchError::UnknownPath));
    }

    #[test]
    fn names_round_trip_through_switch_values() {
        for path in RoutingPath::ALL {
            assert_eq!(RoutingPath::from_switch_value(path.switch_value()), Some(path));
        }
        assert_eq!(RoutingPath::from_switch_value(0x01), None);
    }

    #[test]
    fn manual_paths_clear_and_auto_sets_manual_bit() {
        assert_eq!(RoutingPath::Uart.apply_to_control(CON_MASK), CON_MANUAL_IDLE);
        assert_eq!(RoutingPath::Auto.apply_to_control(CON_MANUAL_IDLE), CON_MASK);
    }

    #[test]
    fn override_requires_idle_control() {
        assert!(manual_override_allowed(CON_MASK));
        assert!(manual_override_allowed(CON_MANUAL_IDLE));
        assert!(!manual_override_allowed(CON_MASK | CON_INT_MASK));
        assert!(!manual_override_allowed(0x00));
    }
}
