use embedded_hal::delay::DelayNs;

use crate::fmt::debug;
use crate::mode::Mode;
use crate::power::PowerControl;
use crate::reg::{Reg, EXPOSURE_BYTES, GAIN_BYTES, HMAX_BYTES, VMAX_BYTES};
use crate::rw::RegisterPort;
use crate::{Error, Imx662};

mod ranges;

pub use ranges::*;

/// The tunable controls of the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlKind {
  AnalogueGain,
  /// Integration time in lines.
  Exposure,
  HorizontalBlank,
  VerticalBlank,
  HorizontalFlip,
  VerticalFlip,
}

impl ControlKind {
  /// Every control, in the order they are pushed to the sensor when it
  /// starts streaming.
  pub const ALL: [ControlKind; 6] = [
    Self::AnalogueGain,
    Self::Exposure,
    Self::HorizontalBlank,
    Self::VerticalBlank,
    Self::HorizontalFlip,
    Self::VerticalFlip,
  ];

  /// Flips change the Bayer phase and readout direction and cannot change
  /// mid-stream.
  pub const fn locked_while_streaming(self) -> bool {
    matches!(self, Self::HorizontalFlip | Self::VerticalFlip)
  }
}

/// Live control values. Ranges are not stored; they derive from the mode and
/// `vblank` through the functions in this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlState {
  pub gain: u32,
  pub exposure: u32,
  pub hblank: u32,
  pub vblank: u32,
  pub hflip: bool,
  pub vflip: bool,
}

impl ControlState {
  /// Defaults for a freshly selected mode.
  pub const fn for_mode(mode: &Mode) -> Self {
    let vblank = vblank_range(mode).default;
    Self {
      gain: GAIN_DEFAULT,
      exposure: exposure_range(mode, vblank).default,
      hblank: hblank_range(mode).default,
      vblank,
      hflip: false,
      vflip: false,
    }
  }

  /// Reset blanking to the defaults of `mode` and pull exposure into the
  /// resulting range. Gain and flips carry over.
  pub fn retarget(&mut self, mode: &Mode) {
    self.hblank = hblank_range(mode).default;
    self.vblank = vblank_range(mode).default;
    self.exposure = exposure_range(mode, self.vblank).clamp(self.exposure);
  }

  pub fn range(&self, mode: &Mode, kind: ControlKind) -> ControlRange {
    match kind {
      ControlKind::AnalogueGain => gain_range(),
      ControlKind::Exposure => exposure_range(mode, self.vblank),
      ControlKind::HorizontalBlank => hblank_range(mode),
      ControlKind::VerticalBlank => vblank_range(mode),
      ControlKind::HorizontalFlip | ControlKind::VerticalFlip => flip_range(),
    }
  }

  pub fn get(&self, kind: ControlKind) -> u32 {
    match kind {
      ControlKind::AnalogueGain => self.gain,
      ControlKind::Exposure => self.exposure,
      ControlKind::HorizontalBlank => self.hblank,
      ControlKind::VerticalBlank => self.vblank,
      ControlKind::HorizontalFlip => self.hflip as u32,
      ControlKind::VerticalFlip => self.vflip as u32,
    }
  }

  /// Store an already validated value. A new vertical blank moves the
  /// exposure range, so exposure is clamped into it.
  fn set(&mut self, mode: &Mode, kind: ControlKind, value: u32) {
    match kind {
      ControlKind::AnalogueGain => self.gain = value,
      ControlKind::Exposure => self.exposure = value,
      ControlKind::HorizontalBlank => self.hblank = value,
      ControlKind::VerticalBlank => {
        self.vblank = value;
        self.exposure = exposure_range(mode, value).clamp(self.exposure);
      }
      ControlKind::HorizontalFlip => self.hflip = value != 0,
      ControlKind::VerticalFlip => self.vflip = value != 0,
    }
  }
}

/// Rejections raised before anything reaches the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControlError {
  OutOfRange { kind: ControlKind, value: u32, min: u32, max: u32 },
  /// The control cannot change while the sensor is streaming.
  Locked(ControlKind),
}

impl<P, PWR, D> Imx662<P, PWR, D>
where
  P: RegisterPort,
  PWR: PowerControl,
  D: DelayNs,
{
  /// Change a control.
  ///
  /// The value is range-checked against the current mode and blanking first.
  /// While powered the register write happens immediately; otherwise the value
  /// is kept and reaches the sensor when streaming starts. If the write fails
  /// the previous value is restored, although some of the sensor's registers
  /// may already hold the new one.
  pub fn set_control(&mut self, kind: ControlKind, value: u32) -> Result<(), Error<P::Error, PWR::Error>> {
    if kind.locked_while_streaming() && self.ctx.state.is_active() {
      return Err(ControlError::Locked(kind).into());
    }

    let range = self.control_range(kind);
    if !range.contains(value) {
      return Err(ControlError::OutOfRange { kind, value, min: range.min, max: range.max }.into());
    }

    let previous = self.ctx.controls;
    self.ctx.controls.set(self.ctx.mode, kind, value);

    if !self.ctx.powered {
      debug!("{} = {} cached until power up", kind, value);
      return Ok(());
    }

    if let Err(e) = self.apply_control(kind) {
      self.ctx.controls = previous;
      return Err(Error::Device(e));
    }

    Ok(())
  }

  pub fn get_control(&self, kind: ControlKind) -> u32 {
    self.ctx.controls.get(kind)
  }

  /// Current legal range of `kind`.
  pub fn control_range(&self, kind: ControlKind) -> ControlRange {
    self.ctx.controls.range(self.ctx.mode, kind)
  }

  pub fn controls(&self) -> ControlState {
    self.ctx.controls
  }

  /// Push the stored value of `kind` to the sensor.
  pub(crate) fn apply_control(&mut self, kind: ControlKind) -> Result<(), P::Error> {
    let mode = self.ctx.mode;
    let c = self.ctx.controls;

    match kind {
      ControlKind::AnalogueGain => {
        self.port.write_held_le(Reg::Gain.into(), c.gain, GAIN_BYTES)?;
        self.port.write(Reg::FdgSel0.into(), conversion_gain(c.gain))
      }
      ControlKind::Exposure => {
        let shutter = encode_exposure(mode, c.vblank, c.exposure);
        self.port.write_held_le(Reg::Exposure.into(), shutter, EXPOSURE_BYTES)
      }
      ControlKind::HorizontalBlank => {
        self.port.write_held_le(Reg::Hmax.into(), encode_hmax(c.hblank, mode), HMAX_BYTES)
      }
      ControlKind::VerticalBlank => {
        self.port.write_held_le(Reg::Vmax.into(), encode_vmax(c.vblank, mode), VMAX_BYTES)?;
        // The shutter register is relative to VMAX, so the same exposure
        // needs a new encoding.
        self.apply_control(ControlKind::Exposure)
      }
      ControlKind::HorizontalFlip => self.port.write(Reg::WinModeH.into(), c.hflip as u8),
      ControlKind::VerticalFlip => self.port.write(Reg::WinModeV.into(), c.vflip as u8),
    }
  }
}
