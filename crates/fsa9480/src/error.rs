//! Driver error types.
//!
//! Only [`ProbeError`] is fatal, and only during bring-up. Everything else is
//! logged by the driver and the pass carries on with the last good data.

use embedded_hal::i2c::ErrorKind;
use thiserror_no_std::Error;

/// A register transaction on the I2C bus failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// Reading from `reg` failed.
    #[error("read of register {reg:#04x} failed: {kind}")]
    Read {
        /// First register of the transaction.
        reg: u8,
        /// Bus-level failure reported by the HAL.
        kind: ErrorKind,
    },
    /// Writing to `reg` failed.
    #[error("write of register {reg:#04x} failed: {kind}")]
    Write {
        /// First register of the transaction.
        reg: u8,
        /// Bus-level failure reported by the HAL.
        kind: ErrorKind,
    },
}

impl TransportError {
    /// Register the failed transaction started at.
    pub const fn register(&self) -> u8 {
        match self {
            Self::Read { reg, .. } | Self::Write { reg, .. } => *reg,
        }
    }

    /// Bus-level failure reported by the HAL.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Read { kind, .. } | Self::Write { kind, .. } => *kind,
        }
    }
}

/// The interrupt drain hit its bound without reading an idle status word.
///
/// The chip keeps asserting events faster than they are consumed; the pass
/// still proceeds to detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("interrupt status still pending after {drained} reads")]
pub struct HardwareDegraded {
    /// Status words read before giving up.
    pub drained: u8,
}

/// A manual routing request was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchError {
    /// The request did not name a known routing path.
    #[error("unknown routing path")]
    UnknownPath,
    /// The control register is not in the state that allows manual override.
    #[error("control register {control:#04x} does not allow manual switching")]
    NotIdle {
        /// Control register value read before the request.
        control: u8,
    },
    /// The control register could not be read, or a write failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The switch could not be brought up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProbeError {
    /// The configured bus address is not a 7-bit I2C address.
    #[error("invalid I2C address {0:#04x}")]
    InvalidAddress(u8),
    /// The chip did not answer the device-ID read.
    #[error("switch not responding: {0}")]
    NotResponding(TransportError),
}
