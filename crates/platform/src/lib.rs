//! Hardware vocabulary for the FSA9480 micro-USB accessory switch
//!
//! This crate holds everything about the switch that is not driver logic:
//! the register map, the accessory categories and the board callback
//! contract, build-time board configuration, and host-side mocks.
//!
//! # Architecture Layers
//!
//! ```text
//! Board support (callbacks, IRQ pin, I2C bus)
//!         ↓
//! Driver (fsa9480 crate - detection, routing, event loop)
//!         ↓
//! Platform (this crate - registers, categories, config)
//!         ↓
//! embedded-hal / embedded-hal-async traits
//! ```
//!
//! # Features
//!
//! - `std`: Enable the [`mocks`] module outside this crate's own tests
//! - `defmt`: Enable defmt logging derives
//! - `dock-audio-sw-audio`: Route dock audio to the AUDIO pins instead of V_AUDIO
//!
//! # Example
//!
//! ```no_run
//! use platform::{AccessoryCallbacks, Category};
//!
//! struct Board;
//!
//! impl AccessoryCallbacks for Board {
//!     fn on_attach(&mut self, category: Category) {
//!         if category == Category::Usb {
//!             // start the USB gadget
//!         }
//!     }
//!     fn on_detach(&mut self, _category: Category) {}
//! }
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
#![deny(unsafe_op_in_unsafe_fn)] // unsafe fn body is not implicitly unsafe block
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
// Pedantic lints suppressed for this hardware crate:
#![allow(clippy::doc_markdown)] // hex addresses and register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

pub mod accessory;
pub mod config;
pub mod fsa9480;
pub mod mocks;

pub use accessory::{AccessoryCallbacks, Category};
