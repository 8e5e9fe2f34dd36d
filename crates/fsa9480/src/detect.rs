//! Detection engine.
//!
//! One pass reads DEV_T1/DEV_T2 as a word, classifies the reading and turns
//! the difference against the latched category into at most one detach and
//! one attach. Register side effects on attach/detach (dock audio routing,
//! sticky manual routes) happen here too. Write failures inside a pass are
//! logged and the pass carries on.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::i2c::I2c;
use platform::fsa9480::{CON_MANUAL_SW, REG_CONTROL, REG_DEV_T1, REG_MANSW1, SW_UART};
use platform::{AccessoryCallbacks, Category};

use crate::classify::DeviceType;
use crate::driver::Fsa9480;
use crate::error::TransportError;

/// Outcome of one detection pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Detection {
    /// Device-type reading taken by this pass.
    pub device: DeviceType,
    /// Category latched before the pass.
    pub previous: Category,
    /// Category latched after the pass.
    pub current: Category,
}

impl Detection {
    /// `true` when the pass dispatched any callback.
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

impl<M, I, C> Fsa9480<'_, M, I, C>
where
    M: RawMutex,
    I: I2c,
    C: AccessoryCallbacks,
{
    /// Run one detection pass.
    ///
    /// Fails only when the device-type read fails, in which case nothing is
    /// dispatched and the latched state is untouched.
    pub async fn detect(&mut self) -> Result<Detection, TransportError> {
        let word = match self.port.read_word(REG_DEV_T1).await {
            Ok(word) => word,
            Err(e) => {
                error!("fsa9480: detect: {}", e);
                return Err(e);
            }
        };
        let reading = DeviceType::from_word(word);

        info!(
            "fsa9480: prev_dev1 {:#x} prev_dev2 {:#x}",
            self.device.dev1, self.device.dev2
        );
        info!("fsa9480: new_dev1 {:#x} new_dev2 {:#x}", reading.dev1, reading.dev2);

        let previous = self.attached;
        // An all-zero reading means "detached"; the stored pair says from what.
        let current = if reading.is_empty() {
            Category::None
        } else {
            reading.category()
        };

        if current != previous {
            if previous != Category::None {
                self.dispatch_detach(previous).await;
            }
            if current != Category::None {
                self.dispatch_attach(current).await;
            }
        }

        self.device = reading;
        self.attached = current;

        Ok(Detection {
            device: reading,
            previous,
            current,
        })
    }

    async fn dispatch_attach(&mut self, category: Category) {
        info!("fsa9480: {} attached", category.as_str());
        self.callbacks.on_attach(category);

        match category {
            Category::Usb if self.manual_switch != 0 => {
                let value = self.manual_switch;
                self.write_logged(REG_MANSW1, value).await;
            }
            Category::Uart if self.manual_switch != 0 => {
                self.write_logged(REG_MANSW1, SW_UART).await;
            }
            Category::DeskDock | Category::CarDock => {
                self.dock.latch(category, true);
                let route = self.config.dock_audio_route;
                self.write_logged(REG_MANSW1, route).await;
                self.update_control(|ctrl| ctrl & !CON_MANUAL_SW).await;
            }
            _ => {}
        }
    }

    async fn dispatch_detach(&mut self, category: Category) {
        info!("fsa9480: {} detached", category.as_str());
        self.callbacks.on_detach(category);

        if category.is_dock() {
            self.dock.latch(category, false);
            self.update_control(|ctrl| ctrl | CON_MANUAL_SW).await;
        }
    }

    async fn write_logged(&mut self, reg: u8, value: u8) {
        if let Err(e) = self.port.write_byte(reg, value).await {
            error!("fsa9480: detect: {}", e);
        }
    }

    async fn update_control(&mut self, f: impl FnOnce(u8) -> u8) {
        if let Err(e) = self.port.modify_byte(REG_CONTROL, f).await {
            error!("fsa9480: detect: {}", e);
        }
    }
}
