//! FSA9480 micro-USB accessory switch driver
//!
//! Detects what is plugged into a multiplexed micro-USB port (USB, UART,
//! chargers, car and desk docks, factory JIGs) and routes the D+/D- lines.
//! The chip is driven over async I²C; attach/detach notifications go to the
//! board through [`platform::AccessoryCallbacks`].
//!
//! # Architecture
//!
//! ```text
//! INTB ──► task (UsbSwitch::run_irq)
//!            ↓
//!          irq (drain, reset recovery, settle)
//!            ↓
//!          detect ──► classify ──► callbacks, dock status
//!            ↓
//!          routing (MANSW1 / CTRL encodings)
//!            ↓
//!          port (byte/word register access)
//! ```
//!
//! # Features
//!
//! - `defmt` - Log through defmt (hardware builds)
//! - `tracing` - Log through tracing (host builds)
//! - `std` - Enable the host-side mocks in `platform`
//! - `dock-audio-sw-audio` - Route dock audio to the AUDIO pins instead of V_AUDIO
//!
//! # Example
//!
//! ```no_run
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use fsa9480::{DockStatus, Fsa9480Config, RoutingPath, UsbSwitch};
//! # use platform::{AccessoryCallbacks, Category};
//! # struct Board;
//! # impl AccessoryCallbacks for Board {
//! #     fn on_attach(&mut self, _: Category) {}
//! #     fn on_detach(&mut self, _: Category) {}
//! # }
//!
//! static DOCK: DockStatus<CriticalSectionRawMutex> = DockStatus::new();
//!
//! # async fn run<I: embedded_hal_async::i2c::I2c, P: embedded_hal_async::digital::Wait>(
//! #     i2c: I, mut intb: P,
//! # ) -> Result<(), fsa9480::ProbeError> {
//! let switch = UsbSwitch::probe(i2c, Fsa9480Config::default(), Board, &DOCK).await?;
//! let _ = switch.manual_switching(RoutingPath::Uart).await;
//! switch.run_irq(&mut intb).await;
//! # Ok(())
//! # }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this driver crate:
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // register accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
mod fmt;

pub mod attrs;
pub mod classify;
pub mod detect;
pub mod dock;
pub mod driver;
pub mod error;
pub mod irq;
pub mod port;
pub mod routing;
pub mod task;

pub use attrs::AttrString;
pub use classify::{classify, DeviceType};
pub use detect::Detection;
pub use dock::DockStatus;
pub use driver::{Fsa9480, Fsa9480Config};
pub use error::{HardwareDegraded, ProbeError, SwitchError, TransportError};
pub use irq::IrqReport;
pub use routing::{route, RoutingPath};
pub use task::UsbSwitch;
