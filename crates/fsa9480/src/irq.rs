//! Interrupt service: status drain, reset recovery and settle-then-detect.
//!
//! The switch can queue several status words if the interrupt is not
//! serviced promptly, so each pass drains INT1/INT2 until it reads idle. An
//! interrupt with no status bits at all means the chip reset itself and lost
//! its configuration; the registers are reprogrammed before detection.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::{Duration, Timer};
use embedded_hal_async::i2c::I2c;
use platform::config::{
    ADC_DETECT_TIME_500MS, CK_INT_MASK_ALL, INT_MASK_ATTACH_DETACH_ONLY, IRQ_MAX_EVENTS,
    IRQ_SETTLE_TIME_US,
};
use platform::fsa9480::{
    CON_MANUAL_SW, CON_MASK, INT_ATTACH, INT_DETACH, REG_CK_INTMASK1, REG_CONTROL, REG_INT1,
    REG_INT1_MASK, REG_MANSW1, REG_TIMING1,
};
use platform::AccessoryCallbacks;

use crate::detect::Detection;
use crate::driver::Fsa9480;
use crate::error::{HardwareDegraded, TransportError};

/// What one interrupt pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IrqReport {
    /// Non-zero status words drained.
    pub events_seen: u8,
    /// Drained words with the attach bit set.
    pub attach_events: u8,
    /// Drained words with the detach bit set.
    pub detach_events: u8,
    /// The drain ran out of reads before the status went idle.
    pub degraded: bool,
    /// Registers were reprogrammed because no event was seen.
    pub reinitialized: bool,
    /// Result of the detection pass that closed the interrupt.
    pub detection: Result<Detection, TransportError>,
}

impl IrqReport {
    /// Surface drain exhaustion as an error.
    pub fn check(&self) -> Result<(), HardwareDegraded> {
        if self.degraded {
            Err(HardwareDegraded {
                drained: self.events_seen,
            })
        } else {
            Ok(())
        }
    }
}

impl<M, I, C> Fsa9480<'_, M, I, C>
where
    M: RawMutex,
    I: I2c,
    C: AccessoryCallbacks,
{
    /// Service one interrupt.
    ///
    /// Drains up to [`IRQ_MAX_EVENTS`] status words, stopping at the first
    /// idle word or transport error. With no event seen the registers are
    /// re-initialised. After [`IRQ_SETTLE_TIME_US`] the device-type registers
    /// are stable and one detection pass runs.
    pub async fn handle_interrupt(&mut self) -> IrqReport {
        let mut events_seen: u8 = 0;
        let mut attach_events: u8 = 0;
        let mut detach_events: u8 = 0;
        let mut degraded = true;

        for _ in 0..IRQ_MAX_EVENTS {
            match self.port.read_word(REG_INT1).await {
                Ok(0) => {
                    degraded = false;
                    break;
                }
                Ok(status) => {
                    let [int1, int2] = status.to_le_bytes();
                    debug!("fsa9480: int1 {:#x} int2 {:#x}", int1, int2);
                    events_seen = events_seen.saturating_add(1);
                    if int1 & INT_ATTACH != 0 {
                        attach_events = attach_events.saturating_add(1);
                    }
                    if int1 & INT_DETACH != 0 {
                        detach_events = detach_events.saturating_add(1);
                    }
                }
                Err(e) => {
                    error!("fsa9480: irq: {}", e);
                    degraded = false;
                    break;
                }
            }
        }

        if degraded {
            warn!("fsa9480: {}", HardwareDegraded { drained: events_seen });
        }

        let reinitialized = events_seen == 0;
        if reinitialized {
            warn!("fsa9480: interrupt without status, reinitialising registers");
            self.reg_init().await;
        }

        Timer::after(Duration::from_micros(IRQ_SETTLE_TIME_US)).await;

        IrqReport {
            events_seen,
            attach_events,
            detach_events,
            degraded,
            reinitialized,
            detection: self.detect().await,
        }
    }

    /// Program interrupt masks, ADC timing and the control mode.
    ///
    /// A non-zero MANSW1 survives a chip reset, so it is read back and manual
    /// mode restored around it. If that read fails the previous sticky route
    /// is kept.
    pub(crate) async fn reg_init(&mut self) {
        if let Err(e) = self
            .port
            .write_word(REG_INT1_MASK, INT_MASK_ATTACH_DETACH_ONLY)
            .await
        {
            error!("fsa9480: reg_init: {}", e);
        }
        if let Err(e) = self.port.write_word(REG_CK_INTMASK1, CK_INT_MASK_ALL).await {
            error!("fsa9480: reg_init: {}", e);
        }
        if let Err(e) = self.port.write_byte(REG_TIMING1, ADC_DETECT_TIME_500MS).await {
            error!("fsa9480: reg_init: {}", e);
        }

        match self.port.read_byte(REG_MANSW1).await {
            Ok(mansw) => self.manual_switch = mansw,
            Err(e) => error!("fsa9480: reg_init: {}", e),
        }

        let ctrl = if self.manual_switch != 0 {
            CON_MASK & !CON_MANUAL_SW
        } else {
            CON_MASK
        };
        if let Err(e) = self.port.write_byte(REG_CONTROL, ctrl).await {
            error!("fsa9480: reg_init: {}", e);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dock::DockStatus;
    use crate::driver::Fsa9480Config;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use platform::fsa9480::{REG_CK_INTMASK2, REG_INT2_MASK, SW_UART};
    use platform::mocks::{MockRegisterFile, RecordingCallbacks};

    #[tokio::test]
    async fn reg_init_programs_masks_and_timing() {
        let bus = MockRegisterFile::new();
        let dock = DockStatus::<NoopRawMutex>::new();
        let _switch = Fsa9480::probe(
            bus.clone(),
            Fsa9480Config::default(),
            RecordingCallbacks::new(),
            &dock,
        )
        .await
        .unwrap();

        assert_eq!(bus.reg(REG_INT1_MASK), 0xFC);
        assert_eq!(bus.reg(REG_INT2_MASK), 0x1F);
        assert_eq!(bus.reg(REG_CK_INTMASK1), 0xFF);
        assert_eq!(bus.reg(REG_CK_INTMASK2), 0x07);
        assert_eq!(bus.reg(REG_TIMING1), 0x06);
    }

    #[tokio::test]
    async fn reg_init_restores_manual_mode_from_mansw1() {
        let bus = MockRegisterFile::new();
        bus.set_reg(REG_MANSW1, SW_UART);
        let dock = DockStatus::<NoopRawMutex>::new();
        let switch = Fsa9480::probe(
            bus.clone(),
            Fsa9480Config::default(),
            RecordingCallbacks::new(),
            &dock,
        )
        .await
        .unwrap();

        assert_eq!(switch.manual_switch(), SW_UART);
        assert_eq!(bus.reg(REG_CONTROL), CON_MASK & !CON_MANUAL_SW);
    }

    #[tokio::test]
    async fn decodes_attach_and_detach_bits() {
        let bus = MockRegisterFile::new();
        let dock = DockStatus::<NoopRawMutex>::new();
        let mut switch = Fsa9480::probe(
            bus.clone(),
            Fsa9480Config::default(),
            RecordingCallbacks::new(),
            &dock,
        )
        .await
        .unwrap();

        bus.raise_interrupt(u16::from(INT_ATTACH));
        bus.raise_interrupt(u16::from(INT_DETACH));
        bus.raise_interrupt(u16::from(INT_ATTACH | INT_DETACH));
        let report = switch.handle_interrupt().await;

        assert_eq!(report.events_seen, 3);
        assert_eq!(report.attach_events, 2);
        assert_eq!(report.detach_events, 2);
        assert!(!report.reinitialized);
        assert!(report.check().is_ok());
    }

    #[test]
    fn degraded_report_converts_to_error() {
        let report = IrqReport {
            events_seen: 100,
            attach_events: 100,
            detach_events: 0,
            degraded: true,
            reinitialized: false,
            detection: Err(TransportError::Read {
                reg: 0x0A,
                kind: embedded_hal::i2c::ErrorKind::Bus,
            }),
        };
        assert_eq!(report.check(), Err(HardwareDegraded { drained: 100 }));
    }
}
