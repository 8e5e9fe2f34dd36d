//! Dock status aggregation.
//!
//! The detection pass latches whether a car or desk dock is attached; the
//! audio side decides separately whether dock audio is wanted at all. Both
//! halves live in one [`DockStatus`] record that the driver and any number of
//! readers share by reference.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use platform::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DockFlags {
    car_status: bool,
    desk_status: bool,
    car_enabled: bool,
    desk_enabled: bool,
}

/// Latched dock attachment plus externally controlled enables.
///
/// Place it in a `static` with `CriticalSectionRawMutex` when readers run in
/// other tasks or interrupt context.
pub struct DockStatus<M: RawMutex> {
    flags: Mutex<M, Cell<DockFlags>>,
}

impl<M: RawMutex> DockStatus<M> {
    /// Nothing docked, both enables off.
    pub const fn new() -> Self {
        Self {
            flags: Mutex::new(Cell::new(DockFlags {
                car_status: false,
                desk_status: false,
                car_enabled: false,
                desk_enabled: false,
            })),
        }
    }

    fn get(&self) -> DockFlags {
        self.flags.lock(Cell::get)
    }

    fn update(&self, f: impl FnOnce(&mut DockFlags)) {
        self.flags.lock(|cell| {
            let mut flags = cell.get();
            f(&mut flags);
            cell.set(flags);
        });
    }

    /// `true` when an enabled dock is attached.
    pub fn get_dock_status(&self) -> bool {
        let f = self.get();
        (f.car_status && f.car_enabled) || (f.desk_status && f.desk_enabled)
    }

    /// A car dock is attached (regardless of the enable).
    pub fn car_docked(&self) -> bool {
        self.get().car_status
    }

    /// A desk dock is attached (regardless of the enable).
    pub fn desk_docked(&self) -> bool {
        self.get().desk_status
    }

    /// Car dock audio enable.
    pub fn car_enabled(&self) -> bool {
        self.get().car_enabled
    }

    /// Set the car dock audio enable.
    pub fn set_car_enabled(&self, enabled: bool) {
        self.update(|f| f.car_enabled = enabled);
    }

    /// Desk dock audio enable.
    pub fn desk_enabled(&self) -> bool {
        self.get().desk_enabled
    }

    /// Set the desk dock audio enable.
    pub fn set_desk_enabled(&self, enabled: bool) {
        self.update(|f| f.desk_enabled = enabled);
    }

    /// Record a dock attach or detach. Non-dock categories are ignored.
    pub(crate) fn latch(&self, category: Category, attached: bool) {
        match category {
            Category::CarDock => self.update(|f| f.car_status = attached),
            Category::DeskDock => self.update(|f| f.desk_status = attached),
            _ => {}
        }
    }
}

impl<M: RawMutex> Default for DockStatus<M> {
    fn default() -> Self {
        Self::new()
    }
}
