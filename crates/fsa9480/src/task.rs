//! Shared switch handle and the interrupt task.
//!
//! # Architecture
//!
//! [`UsbSwitch`] wraps the driver in an async [`Mutex`]. Everything that
//! touches CTRL or MANSW1 (the interrupt pass, manual routing, the management
//! attributes, resume) goes through that one lock, so a detection pass and a
//! routing request can never interleave their read-modify-write sequences.
//!
//! [`UsbSwitch::run_irq`] is the body of the dedicated interrupt task. It
//! waits for INTB to go low, takes the lock and services the interrupt.
//! Suspend closes a gate the task checks before and after waiting, and
//! resume re-opens it through a [`Signal`].
//!
//! ```text
//! INTB low ──► run_irq ──► lock ──► handle_interrupt ──► detect ──► callbacks
//! manual_switching ───────► lock ──► set_path
//! ```

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use embedded_hal::digital::Error as _;
use embedded_hal_async::digital::Wait;
use embedded_hal_async::i2c::I2c;
use platform::config::IRQ_LINE_RETRY_MS;
use platform::AccessoryCallbacks;

use crate::detect::Detection;
use crate::dock::DockStatus;
use crate::driver::{Fsa9480, Fsa9480Config};
use crate::error::{ProbeError, SwitchError, TransportError};
#[cfg(test)]
use crate::irq::IrqReport;
use crate::routing::RoutingPath;

// ---------------------------------------------------------------------------
// UsbSwitch
// ---------------------------------------------------------------------------

/// Serialised, shareable FSA9480 handle.
///
/// Share it by reference between the interrupt task and whoever issues
/// routing requests. `M` should be `CriticalSectionRawMutex` when those run
/// on different executors.
pub struct UsbSwitch<'d, M: RawMutex, I, C> {
    driver: Mutex<M, Fsa9480<'d, M, I, C>>,
    dock: &'d DockStatus<M>,
    irq_enabled: BlockingMutex<M, Cell<bool>>,
    irq_wake: Signal<M, ()>,
}

impl<'d, M, I, C> UsbSwitch<'d, M, I, C>
where
    M: RawMutex,
    I: I2c,
    C: AccessoryCallbacks,
{
    /// Wrap a probed driver. Interrupt delivery starts enabled.
    pub fn new(driver: Fsa9480<'d, M, I, C>) -> Self {
        let dock = driver.dock();
        Self {
            driver: Mutex::new(driver),
            dock,
            irq_enabled: BlockingMutex::new(Cell::new(true)),
            irq_wake: Signal::new(),
        }
    }

    /// Probe the switch and wrap it; see [`Fsa9480::probe`].
    pub async fn probe(
        i2c: I,
        config: Fsa9480Config,
        callbacks: C,
        dock: &'d DockStatus<M>,
    ) -> Result<Self, ProbeError> {
        Ok(Self::new(Fsa9480::probe(i2c, config, callbacks, dock).await?))
    }

    /// Lock the driver for direct access.
    pub async fn lock(&self) -> MutexGuard<'_, M, Fsa9480<'d, M, I, C>> {
        self.driver.lock().await
    }

    /// Shared dock status; readable without the driver lock.
    pub fn dock(&self) -> &'d DockStatus<M> {
        self.dock
    }

    /// `true` while interrupts are being serviced.
    pub fn irq_enabled(&self) -> bool {
        self.irq_enabled.lock(Cell::get)
    }

    fn set_irq_enabled(&self, enabled: bool) {
        self.irq_enabled.lock(|cell| cell.set(enabled));
        if enabled {
            self.irq_wake.signal(());
        }
    }

    /// Interrupt task body. Never returns.
    ///
    /// `irq` is the INTB line (active low). A line error is logged and the
    /// wait retried after [`IRQ_LINE_RETRY_MS`].
    pub async fn run_irq<P: Wait>(&self, irq: &mut P) {
        loop {
            while !self.irq_enabled() {
                self.irq_wake.wait().await;
            }

            if let Err(e) = irq.wait_for_low().await {
                error!("fsa9480: irq line: {}", e.kind());
                Timer::after(Duration::from_millis(IRQ_LINE_RETRY_MS)).await;
                continue;
            }

            let mut driver = self.driver.lock().await;
            // Suspend may have won the lock while we were waiting on the line.
            if !self.irq_enabled() {
                continue;
            }
            let _ = driver.handle_interrupt().await;
        }
    }

    /// One `run_irq` pass without waiting on the line, for unit tests.
    /// Interrupts are only ever serviced on the task that owns INTB.
    #[cfg(test)]
    async fn service_interrupt(&self) -> Option<IrqReport> {
        let mut driver = self.driver.lock().await;
        if !self.irq_enabled() {
            return None;
        }
        Some(driver.handle_interrupt().await)
    }

    /// Route the D+/D- lines; see [`Fsa9480::set_path`].
    pub async fn manual_switching(&self, path: RoutingPath) -> Result<(), SwitchError> {
        self.driver.lock().await.set_path(path).await
    }

    /// Stop servicing interrupts.
    ///
    /// Waits for an in-flight interrupt pass to finish first.
    pub async fn suspend(&self) {
        let _driver = self.driver.lock().await;
        self.set_irq_enabled(false);
        debug!("fsa9480: suspended");
    }

    /// Resume servicing interrupts and catch up on anything missed while
    /// suspended with one detection pass.
    pub async fn resume(&self) -> Result<Detection, TransportError> {
        self.set_irq_enabled(true);
        debug!("fsa9480: resumed");
        self.driver.lock().await.detect().await
    }

    /// Stop interrupt service for good and hand the driver back.
    pub fn remove(self) -> Fsa9480<'d, M, I, C> {
        self.set_irq_enabled(false);
        self.driver.into_inner()
    }
}
