//! Management attributes.
//!
//! Text show/store pairs over [`UsbSwitch`], in the format a sysfs-style
//! shell or debug console expects. Shows render into a fixed
//! [`heapless::String`]; stores return the number of bytes consumed, with 0
//! meaning the request was rejected.

use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::i2c::I2c;
use heapless::String;
use platform::AccessoryCallbacks;

use crate::error::TransportError;
use crate::routing::RoutingPath;
use crate::task::UsbSwitch;

/// Capacity of a rendered attribute.
pub const ATTR_CAPACITY: usize = 32;

/// One rendered attribute value.
pub type AttrString = String<ATTR_CAPACITY>;

fn render(args: core::fmt::Arguments<'_>) -> AttrString {
    let mut out = AttrString::new();
    // Every format used here fits in ATTR_CAPACITY.
    let _ = out.write_fmt(args);
    out
}

fn logged(what: &str, e: TransportError) -> TransportError {
    error!("fsa9480: {}: {}", what, e);
    e
}

fn render_flag(flag: bool) -> AttrString {
    render(format_args!("{}\n", i32::from(flag)))
}

/// `sscanf("%d")`-style parse: optional sign and leading digits, whitespace
/// skipped. Anything else is `None`.
fn parse_int(buf: &str) -> Option<i32> {
    let trimmed = buf.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(trimmed.len(), |(i, _)| i);
    trimmed.get(..end)?.parse().ok()
}

impl<M, I, C> UsbSwitch<'_, M, I, C>
where
    M: RawMutex,
    I: I2c,
    C: AccessoryCallbacks,
{
    /// `CONTROL: xx\n`
    pub async fn show_control(&self) -> Result<AttrString, TransportError> {
        let control = self
            .lock()
            .await
            .read_control()
            .await
            .map_err(|e| logged("show control", e))?;
        Ok(render(format_args!("CONTROL: {control:02x}\n")))
    }

    /// `DEVICE_TYPE: xx\n` (DEV_T1 only)
    pub async fn show_device_type(&self) -> Result<AttrString, TransportError> {
        let dev1 = self
            .lock()
            .await
            .read_device_type1()
            .await
            .map_err(|e| logged("show device type", e))?;
        Ok(render(format_args!("DEVICE_TYPE: {dev1:02x}\n")))
    }

    /// Current MANSW1 route by name, or its raw hex value (no newline) when
    /// it matches no named path.
    pub async fn show_switch(&self) -> Result<AttrString, TransportError> {
        let value = self
            .lock()
            .await
            .read_manual_switch()
            .await
            .map_err(|e| logged("show switch", e))?;
        Ok(match RoutingPath::from_switch_value(value) {
            Some(path) => render(format_args!("{}\n", path.name())),
            None => render(format_args!("{value:x}")),
        })
    }

    /// Apply a route named by `buf` (`VAUDIO`, `UART`, `AUDIO`, `DHOST`,
    /// `AUTO`; prefix match).
    ///
    /// Returns `buf.len()` when the route was applied, 0 when it was refused.
    pub async fn store_switch(&self, buf: &str) -> usize {
        let result = match buf.parse::<RoutingPath>() {
            Ok(path) => self.manual_switching(path).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => buf.len(),
            Err(e) => {
                warn!("fsa9480: store switch: {}", e);
                0
            }
        }
    }

    /// `0\n` or `1\n`.
    pub fn show_cardock_enable(&self) -> AttrString {
        render_flag(self.dock().car_enabled())
    }

    /// Set the car dock enable from an integer; non-zero enables. Unparsable
    /// input leaves the flag unchanged. Always consumes the whole buffer.
    pub fn store_cardock_enable(&self, buf: &str) -> usize {
        if let Some(value) = parse_int(buf) {
            self.dock().set_car_enabled(value != 0);
        }
        buf.len()
    }

    /// `0\n` or `1\n`.
    pub fn show_deskdock_enable(&self) -> AttrString {
        render_flag(self.dock().desk_enabled())
    }

    /// Desk dock counterpart of [`store_cardock_enable`](Self::store_cardock_enable).
    pub fn store_deskdock_enable(&self, buf: &str) -> usize {
        if let Some(value) = parse_int(buf) {
            self.dock().set_desk_enabled(value != 0);
        }
        buf.len()
    }

    /// Aggregated dock signal as `0\n` or `1\n`.
    pub fn show_dock_status(&self) -> AttrString {
        render_flag(self.dock().get_dock_status())
    }
}
