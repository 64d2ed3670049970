#![cfg_attr(not(test), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! `no_std` control driver for the Sony IMX662 CMOS image sensor.
//!
//! The IMX662 is a 1/2.8" 1920x1080 class sensor with a MIPI CSI-2 output and
//! a flat 16-bit register map. This crate turns camera-level requests into
//! ordered register writes while keeping the sensor's timing rules intact:
//!
//! - Selecting a readout mode and pixel format from static catalogs
//! - Range-checking exposure, blanking, gain and flip against the active mode
//!   and encoding them into the sensor's register fields, using the register
//!   hold latch for multi-byte values
//! - Sequencing stream start and stop with the required settle delays
//! - Using `embedded-hal` 1.0 traits so the driver works across platforms
//!
//! Pixel data never flows through this crate; only the control interface.
//!
//! ```no_run
//! use embedded_hal::{delay::DelayNs, i2c::{I2c, SevenBitAddress}};
//! use imx662::{AlwaysOn, Config, ControlKind, I2cPort, Imx662};
//!
//! fn example<I2C, D, E>(i2c: I2C, delay: D) -> Result<(), imx662::Error<E, core::convert::Infallible>>
//! where
//!   I2C: I2c<SevenBitAddress, Error = E>,
//!   D: DelayNs,
//! {
//!   let config = Config::new(4, 37_125_000).with_link_frequencies(&[297_000_000]);
//!   let mut sensor = Imx662::new(I2cPort::new(i2c), AlwaysOn, delay, config)?;
//!
//!   sensor.set_control(ControlKind::AnalogueGain, 20)?;
//!   sensor.start_stream()?;
//!   Ok(())
//! }
//! ```
mod fmt;

mod config;
mod control;
mod defs;
mod mode;
mod power;
mod reg;
mod rw;
mod stream;
#[cfg(test)]
mod testing;

use embedded_hal::delay::DelayNs;

pub use config::*;
pub use control::*;
pub use defs::{
  LINK_FREQ_2_LANES, LINK_FREQ_4_LANES, NATIVE_HEIGHT, NATIVE_WIDTH, PIXEL_ARRAY_HEIGHT, PIXEL_ARRAY_LEFT,
  PIXEL_ARRAY_TOP, PIXEL_ARRAY_WIDTH, PIXEL_RATE,
};
pub use mode::*;
pub use power::*;
pub use reg::{LaneRate, RegVal, HMAX_MAX, VMAX_MAX};
pub use rw::*;
pub use stream::{StartStep, StateError, StreamState};

use crate::fmt::{debug, info};
use crate::mode::{NATIVE_RECT, PIXEL_ARRAY_RECT};

/// Errors that can occur while driving the sensor.
///
/// `E` is the register bus error and `P` the power controller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E, P> {
  /// Register transaction failed with the underlying bus error.
  Device(E),
  /// The power controller failed.
  Power(P),
  Config(ConfigError),
  Control(ControlError),
  State(StateError),
}

impl<E, P> From<ConfigError> for Error<E, P> {
  fn from(e: ConfigError) -> Self {
    Self::Config(e)
  }
}

impl<E, P> From<ControlError> for Error<E, P> {
  fn from(e: ControlError) -> Self {
    Self::Control(e)
  }
}

impl<E, P> From<StateError> for Error<E, P> {
  fn from(e: StateError) -> Self {
    Self::State(e)
  }
}

/// The negotiated output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveFormat {
  pub width: u32,
  pub height: u32,
  pub code: MbusCode,
  pub bit_depth: u8,
}

/// Everything that changes over the life of a driver instance.
#[derive(Debug)]
struct DriverContext {
  mode: &'static Mode,
  format: PixelFormat,
  controls: ControlState,
  powered: bool,
  state: StreamState,
}

/// Driver for one IMX662.
///
/// Owns the register port, power controller and delay. Every operation takes
/// `&mut self` and runs to completion, register writes and settle delays
/// included, so sequences never interleave. Share an instance between threads
/// by wrapping it in the platform's mutex, held for the whole call.
pub struct Imx662<P, PWR, D> {
  port: P,
  power: PWR,
  delay: D,
  config: ValidatedConfig,
  ctx: DriverContext,
}

impl<P, PWR, D> Imx662<P, PWR, D>
where
  P: RegisterPort,
  PWR: PowerControl,
  D: DelayNs,
{
  /// Create a driver for the board described by `config`.
  ///
  /// The configuration is validated here, so a badly wired board is refused
  /// before it can be streamed. Nothing is written and the sensor is assumed
  /// to be powered down; the first mode and format are selected.
  pub fn new(port: P, power: PWR, delay: D, config: Config) -> Result<Self, ConfigError> {
    let config = config.validate()?;
    debug!("using {} data lanes", config.lanes.count());

    let mode = &MODES[0];
    let ctx = DriverContext {
      mode,
      format: config.variant.formats()[0],
      controls: ControlState::for_mode(mode),
      powered: false,
      state: StreamState::Idle,
    };

    Ok(Self { port, power, delay, config, ctx })
  }

  /// Give back the owned peripherals.
  pub fn release(self) -> (P, PWR, D) {
    (self.port, self.power, self.delay)
  }

  pub fn config(&self) -> ValidatedConfig {
    self.config
  }

  /// Choose the mode nearest to `width`x`height` and the format `code`.
  ///
  /// Unknown codes fall back to the variant's first format. Blanking is reset
  /// to the new mode's defaults and exposure pulled into its range; when the
  /// sensor is powered the blanking registers are written straight away. If
  /// one of those writes fails the previous mode, format and controls are
  /// restored, although the sensor may already hold some of the new blanking.
  pub fn set_format(
    &mut self,
    code: MbusCode,
    width: u32,
    height: u32,
  ) -> Result<ActiveFormat, Error<P::Error, PWR::Error>> {
    if self.ctx.state.is_active() {
      return Err(StateError::Streaming.into());
    }

    let mode = nearest_mode(width, height);
    let formats = self.config.variant.formats();
    let (_, format) = self.config.variant.format_for_code(code).unwrap_or((0, formats[0]));

    let previous = (self.ctx.mode, self.ctx.format, self.ctx.controls);
    self.ctx.mode = mode;
    self.ctx.format = format;
    self.ctx.controls.retarget(mode);

    if self.ctx.powered {
      let written = self
        .apply_control(ControlKind::HorizontalBlank)
        .and_then(|()| self.apply_control(ControlKind::VerticalBlank));
      if let Err(e) = written {
        (self.ctx.mode, self.ctx.format, self.ctx.controls) = previous;
        return Err(Error::Device(e));
      }
    }

    Ok(self.format())
  }

  pub fn format(&self) -> ActiveFormat {
    ActiveFormat {
      width: self.ctx.mode.width,
      height: self.ctx.mode.height,
      code: self.ctx.format.code,
      bit_depth: self.ctx.format.bit_depth,
    }
  }

  pub fn mode(&self) -> &'static Mode {
    self.ctx.mode
  }

  pub fn enumerate_formats(&self) -> &'static [PixelFormat] {
    self.config.variant.formats()
  }

  pub fn enumerate_frame_sizes(&self, code: MbusCode) -> Option<impl Iterator<Item = FrameSize>> {
    self.config.variant.frame_sizes(code)
  }

  pub fn selection(&self, target: SelectionTarget) -> Rect {
    match target {
      SelectionTarget::Crop => self.ctx.mode.crop,
      SelectionTarget::NativeSize => NATIVE_RECT,
      SelectionTarget::CropDefault | SelectionTarget::CropBounds => PIXEL_ARRAY_RECT,
    }
  }

  /// Output pixel rate in pixels per second.
  pub fn pixel_rate(&self) -> u64 {
    PIXEL_RATE
  }

  /// MIPI link frequency in Hz for the configured lanes.
  pub fn link_frequency(&self) -> u64 {
    self.config.lanes.link_frequency()
  }

  /// Power the sensor up. A no-op when it already is.
  ///
  /// Cached control values are not written here; they reach the sensor when
  /// streaming starts.
  pub fn power_on(&mut self) -> Result<(), Error<P::Error, PWR::Error>> {
    if self.ctx.powered {
      return Ok(());
    }

    self.power.power_on().map_err(Error::Power)?;
    self.ctx.powered = true;
    info!("powered on");
    Ok(())
  }

  /// Power the sensor down. Refused while streaming.
  pub fn power_off(&mut self) -> Result<(), Error<P::Error, PWR::Error>> {
    if self.ctx.state.is_active() {
      return Err(StateError::Streaming.into());
    }
    if !self.ctx.powered {
      return Ok(());
    }

    self.power.power_off().map_err(Error::Power)?;
    self.ctx.powered = false;
    info!("powered off");
    Ok(())
  }

  pub fn is_powered(&self) -> bool {
    self.ctx.powered
  }
}
