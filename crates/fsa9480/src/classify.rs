//! Accessory classification.
//!
//! The device-type bits are not mutually exclusive in hardware (a JIG USB
//! cable also reports a JIG bit, a car dock shares its bit with JIG UART-on),
//! so classification walks a fixed priority list and stops at the first hit.

use platform::fsa9480::{
    DEV_AV, DEV_JIG_UART_ON, DEV_T1_CHARGER_MASK, DEV_T1_UART_MASK, DEV_T1_USB_MASK,
    DEV_T2_JIG_MASK, DEV_T2_UART_MASK, DEV_T2_USB_MASK,
};
use platform::Category;

/// DEV_T1/DEV_T2 pair as read from the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceType {
    /// DEV_T1 bits.
    pub dev1: u8,
    /// DEV_T2 bits.
    pub dev2: u8,
}

impl DeviceType {
    /// Nothing attached.
    pub const NONE: Self = Self { dev1: 0, dev2: 0 };

    /// Build from raw register values.
    pub const fn new(dev1: u8, dev2: u8) -> Self {
        Self { dev1, dev2 }
    }

    /// Split a DEV_T1 word read (DEV_T1 in the low byte).
    pub const fn from_word(word: u16) -> Self {
        let [dev1, dev2] = word.to_le_bytes();
        Self { dev1, dev2 }
    }

    /// `true` when no device-type bit is set.
    pub const fn is_empty(self) -> bool {
        self.dev1 == 0 && self.dev2 == 0
    }

    /// Category of this reading; see [`classify`].
    pub const fn category(self) -> Category {
        classify(self.dev1, self.dev2)
    }
}

/// Pick the single category a device-type pair belongs to.
///
/// Priority, first match wins: USB, UART, charger, JIG, desk dock, car dock.
pub const fn classify(dev1: u8, dev2: u8) -> Category {
    if dev1 & DEV_T1_USB_MASK != 0 || dev2 & DEV_T2_USB_MASK != 0 {
        Category::Usb
    } else if dev1 & DEV_T1_UART_MASK != 0 || dev2 & DEV_T2_UART_MASK != 0 {
        Category::Uart
    } else if dev1 & DEV_T1_CHARGER_MASK != 0 {
        Category::Charger
    } else if dev2 & DEV_T2_JIG_MASK != 0 {
        Category::Jig
    } else if dev2 & DEV_AV != 0 {
        Category::DeskDock
    } else if dev2 & DEV_JIG_UART_ON != 0 {
        Category::CarDock
    } else {
        Category::None
    }
}
