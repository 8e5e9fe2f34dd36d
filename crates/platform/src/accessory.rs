//! Accessory categories and the platform callback contract.
//!
//! The switch driver decides *what* is attached; the rest of the system
//! decides what to do about it. [`AccessoryCallbacks`] is the seam between the
//! two: the board support code implements it and hands it to the driver at
//! probe time.

/// Accessory class picked by priority-ordered classification.
///
/// Exactly one category is produced per device-type reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Category {
    /// USB host or device (including JIG USB cables).
    Usb,
    /// UART cable (including JIG UART boot-off).
    Uart,
    /// Dedicated, USB or car-kit charger.
    Charger,
    /// Factory test fixture.
    Jig,
    /// Desk dock (AV cable).
    DeskDock,
    /// Car dock.
    CarDock,
    /// Nothing recognised.
    #[default]
    None,
}

impl Category {
    /// Short lowercase name for log lines.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usb => "usb",
            Self::Uart => "uart",
            Self::Charger => "charger",
            Self::Jig => "jig",
            Self::DeskDock => "desk-dock",
            Self::CarDock => "car-dock",
            Self::None => "none",
        }
    }

    /// Returns `true` for the two dock categories, which reroute audio.
    pub const fn is_dock(self) -> bool {
        matches!(self, Self::DeskDock | Self::CarDock)
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Board hooks invoked by the switch driver.
///
/// Attach and detach are delivered at most once per transition and never for
/// [`Category::None`]. Implementations run on the driver's interrupt task and
/// must not block for long.
pub trait AccessoryCallbacks {
    /// An accessory of `category` was attached.
    fn on_attach(&mut self, category: Category);

    /// The accessory of `category` was removed.
    fn on_detach(&mut self, category: Category);

    /// Probe is about to program the switch: configure the INTB pin (input,
    /// pull-up) and anything else the board needs before the first interrupt.
    fn on_configure(&mut self) {}

    /// The switch finished its probe-time register initialisation.
    fn on_reset(&mut self) {}

    /// A manual route was applied; `enabled` is `true` for the V_AUDIO path.
    ///
    /// Boards that feed the V_AUDIO pins from a VBUS charge pump switch it here.
    fn on_vaudio_path(&mut self, enabled: bool) {
        let _ = enabled;
    }
}
