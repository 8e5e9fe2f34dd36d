//! FSA9480 driver core.
//!
//! [`Fsa9480`] owns the register port and the state the detection engine and
//! the switch controller share: last device-type reading, latched category
//! and the sticky manual route. Bring-up happens in [`Fsa9480::probe`].
//!
//! # Probe sequence
//!
//! 1. Validate [`Fsa9480Config`]
//! 2. Read DEVID. No answer is fatal ([`ProbeError::NotResponding`])
//! 3. `on_configure` board hook (INTB pin setup)
//! 4. Program interrupt masks, ADC timing and control mode
//! 5. `on_reset` board hook
//! 6. Initial detection pass, so an accessory present at boot is reported

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::i2c::I2c;
use platform::config::DOCK_AUDIO_ROUTE;
use platform::fsa9480::{FSA9480_I2C_ADDR, REG_CONTROL, REG_DEVICE_ID, REG_DEV_T1, REG_MANSW1};
use platform::{AccessoryCallbacks, Category};

use crate::classify::DeviceType;
use crate::dock::DockStatus;
use crate::error::{ProbeError, SwitchError, TransportError};
use crate::port::RegisterPort;
use crate::routing::{manual_override_allowed, RoutingPath};

/// Board configuration for one switch instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Fsa9480Config {
    /// 7-bit I2C address.
    pub address: u8,
    /// MANSW1 value written when a car or desk dock attaches.
    pub dock_audio_route: u8,
}

impl Fsa9480Config {
    /// Reject configurations the bus cannot express.
    pub const fn validate(&self) -> Result<(), ProbeError> {
        if self.address > 0x7F {
            return Err(ProbeError::InvalidAddress(self.address));
        }
        Ok(())
    }
}

impl Default for Fsa9480Config {
    fn default() -> Self {
        Self {
            address: FSA9480_I2C_ADDR,
            dock_audio_route: DOCK_AUDIO_ROUTE,
        }
    }
}

/// One FSA9480 accessory switch.
///
/// `M` is the raw mutex guarding the shared [`DockStatus`], `I` the async I2C
/// bus and `C` the board callbacks.
pub struct Fsa9480<'d, M: RawMutex, I, C> {
    pub(crate) port: RegisterPort<I>,
    pub(crate) callbacks: C,
    pub(crate) dock: &'d DockStatus<M>,
    pub(crate) config: Fsa9480Config,
    pub(crate) device: DeviceType,
    pub(crate) attached: Category,
    pub(crate) manual_switch: u8,
    device_id: u8,
}

impl<'d, M, I, C> Fsa9480<'d, M, I, C>
where
    M: RawMutex,
    I: I2c,
    C: AccessoryCallbacks,
{
    /// Bring the switch up and report whatever is already plugged in.
    ///
    /// Only a bad configuration or a silent bus fail the probe. Transport
    /// errors after the device-ID read are logged and the last good state is
    /// kept.
    pub async fn probe(
        i2c: I,
        config: Fsa9480Config,
        callbacks: C,
        dock: &'d DockStatus<M>,
    ) -> Result<Self, ProbeError> {
        config.validate()?;

        let mut port = RegisterPort::new(i2c, config.address);
        let device_id = port
            .read_byte(REG_DEVICE_ID)
            .await
            .map_err(ProbeError::NotResponding)?;
        info!("fsa9480: device id {:#x} at address {:#x}", device_id, config.address);

        let mut switch = Self {
            port,
            callbacks,
            dock,
            config,
            device: DeviceType::NONE,
            attached: Category::None,
            manual_switch: 0,
            device_id,
        };

        switch.callbacks.on_configure();
        switch.reg_init().await;
        switch.callbacks.on_reset();

        if let Err(e) = switch.detect().await {
            error!("fsa9480: initial detection failed: {}", e);
        }

        Ok(switch)
    }

    /// Apply a manual routing request.
    ///
    /// Refused with [`SwitchError::NotIdle`] unless CTRL (manual bit ignored)
    /// is exactly switch-open + raw-data + wait. Once accepted the route
    /// becomes the sticky value, both writes are attempted even if the first
    /// fails, and the first failure is returned.
    pub async fn set_path(&mut self, path: RoutingPath) -> Result<(), SwitchError> {
        let control = match self.port.read_byte(REG_CONTROL).await {
            Ok(control) => control,
            Err(e) => {
                error!("fsa9480: manual switch: {}", e);
                return Err(e.into());
            }
        };

        if !manual_override_allowed(control) {
            warn!(
                "fsa9480: manual switch to {} refused, control {:#x}",
                path.name(),
                control
            );
            return Err(SwitchError::NotIdle { control });
        }

        let value = path.switch_value();
        info!("fsa9480: manual switch to {} ({:#x})", path.name(), value);
        self.manual_switch = value;

        let mansw = self.port.write_byte(REG_MANSW1, value).await;
        if let Err(e) = mansw {
            error!("fsa9480: manual switch: {}", e);
        }
        let ctrl = self
            .port
            .write_byte(REG_CONTROL, path.apply_to_control(control))
            .await;
        if let Err(e) = ctrl {
            error!("fsa9480: manual switch: {}", e);
        }

        self.callbacks.on_vaudio_path(path == RoutingPath::VAudio);

        mansw.and(ctrl).map_err(SwitchError::from)
    }

    /// Raw CTRL register.
    pub async fn read_control(&mut self) -> Result<u8, TransportError> {
        self.port.read_byte(REG_CONTROL).await
    }

    /// Raw DEV_T1 register.
    pub async fn read_device_type1(&mut self) -> Result<u8, TransportError> {
        self.port.read_byte(REG_DEV_T1).await
    }

    /// Raw MANSW1 register.
    pub async fn read_manual_switch(&mut self) -> Result<u8, TransportError> {
        self.port.read_byte(REG_MANSW1).await
    }

    /// Last device-type reading.
    pub fn device_type(&self) -> DeviceType {
        self.device
    }

    /// Category currently reported as attached.
    pub fn attached(&self) -> Category {
        self.attached
    }

    /// Sticky manual route (0 = automatic).
    pub fn manual_switch(&self) -> u8 {
        self.manual_switch
    }

    /// DEVID value read at probe.
    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    /// Board configuration in use.
    pub fn config(&self) -> &Fsa9480Config {
        &self.config
    }

    /// Shared dock status record.
    pub fn dock(&self) -> &'d DockStatus<M> {
        self.dock
    }

    /// Board callbacks.
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    /// Board callbacks, mutably.
    pub fn callbacks_mut(&mut self) -> &mut C {
        &mut self.callbacks
    }

    /// Tear down, returning the bus and the callbacks.
    pub fn release(self) -> (I, C) {
        (self.port.release(), self.callbacks)
    }
}
