//! Board configuration and constants
//!
//! Values the switch driver needs that depend on the board or on chip timing.
//! Everything here is fixed at build time; the dock audio route in particular
//! differs between handset variants and is chosen with a cargo feature.

/// Manual-switch value written when a car or desk dock attaches.
///
/// Handsets whose dock speakers hang off the AUDIO pins build with the
/// `dock-audio-sw-audio` feature; everything else routes to V_AUDIO.
#[cfg(feature = "dock-audio-sw-audio")]
pub const DOCK_AUDIO_ROUTE: u8 = crate::fsa9480::SW_AUDIO;
/// Manual-switch value written when a car or desk dock attaches.
///
/// Handsets whose dock speakers hang off the AUDIO pins build with the
/// `dock-audio-sw-audio` feature; everything else routes to V_AUDIO.
#[cfg(not(feature = "dock-audio-sw-audio"))]
pub const DOCK_AUDIO_ROUTE: u8 = crate::fsa9480::SW_VAUDIO;

/// Upper bound on interrupt-status words drained per interrupt.
pub const IRQ_MAX_EVENTS: u8 = 100;

/// Wait after draining INT1/INT2 before DEV_T1/DEV_T2 can be trusted (µs).
///
/// The chip needs 200-300 µs; the upper end is used.
pub const IRQ_SETTLE_TIME_US: u64 = 300;

/// Back-off after the INTB line reports an error (ms).
pub const IRQ_LINE_RETRY_MS: u64 = 10;

/// INT1/INT2 mask word: only attach and detach raise INTB.
pub const INT_MASK_ATTACH_DETACH_ONLY: u16 = 0x1FFC;

/// CK_INTMASK1/CK_INTMASK2 mask word: all car-kit interrupts masked.
pub const CK_INT_MASK_ALL: u16 = 0x07FF;

/// TIMING1 value: 500 ms ADC detect time.
pub const ADC_DETECT_TIME_500MS: u8 = 0x06;
