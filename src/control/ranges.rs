//! Legal ranges and register encodings for the sensor controls.
//!
//! Everything here is a pure function of the active [`Mode`] and the current
//! blanking. The ranges are recomputed on every use, so a change of mode or
//! vertical blank is reflected immediately.

use crate::mode::Mode;
use crate::reg::{FDG_SEL0_LCG, HMAX_MAX, VMAX_MAX};

pub const GAIN_MIN: u32 = 0;
pub const GAIN_MAX: u32 = 100;
pub const GAIN_DEFAULT: u32 = 0;

pub const EXPOSURE_MIN: u32 = 1;
pub const EXPOSURE_STEP: u32 = 1;
/// Lines the exposure must stay below the frame length.
pub const EXPOSURE_MARGIN: u32 = 2;

/// Gain code at and above which the high conversion gain path would be used.
pub const HCG_GAIN_THRESHOLD: u32 = 0x22;

/// Inclusive range of a control, with its step and default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControlRange {
  pub min: u32,
  pub max: u32,
  pub step: u32,
  pub default: u32,
}

impl ControlRange {
  pub const fn new(min: u32, max: u32, step: u32, default: u32) -> Self {
    Self { min, max, step, default }
  }

  pub const fn contains(&self, value: u32) -> bool {
    value >= self.min && value <= self.max
  }

  pub fn clamp(&self, value: u32) -> u32 {
    value.clamp(self.min, self.max)
  }
}

pub const fn gain_range() -> ControlRange {
  ControlRange::new(GAIN_MIN, GAIN_MAX, 1, GAIN_DEFAULT)
}

pub const fn flip_range() -> ControlRange {
  ControlRange::new(0, 1, 1, 0)
}

pub const fn hblank_range(mode: &Mode) -> ControlRange {
  ControlRange::new(0, HMAX_MAX - mode.width, 1, mode.hmax - mode.width)
}

pub const fn vblank_range(mode: &Mode) -> ControlRange {
  ControlRange::new(0, VMAX_MAX - mode.height, 1, mode.vmax - mode.height)
}

/// Exposure range for `vblank` lines of vertical blanking. Defaults to the
/// longest exposure the frame allows.
pub const fn exposure_range(mode: &Mode, vblank: u32) -> ControlRange {
  let max = mode.height + vblank - EXPOSURE_MARGIN;
  ControlRange::new(EXPOSURE_MIN, max, EXPOSURE_STEP, max)
}

/// The shutter register counts from the end of the frame: it holds the line
/// at which integration starts, not the integration length.
pub const fn encode_exposure(mode: &Mode, vblank: u32, exposure: u32) -> u32 {
  (mode.height + vblank).saturating_sub(exposure + 1)
}

/// HMAX is programmed in units of two pixel clocks.
pub const fn encode_hmax(hblank: u32, mode: &Mode) -> u32 {
  (hblank + mode.width) >> 1
}

pub const fn encode_vmax(vblank: u32, mode: &Mode) -> u32 {
  vblank + mode.height
}

/// FDG_SEL0 value for an analogue gain code.
///
/// Both sides of the threshold select LCG. HCG above
/// [`HCG_GAIN_THRESHOLD`] has not been characterised on this sensor yet.
#[allow(clippy::if_same_then_else)]
pub const fn conversion_gain(gain: u32) -> u8 {
  if gain < HCG_GAIN_THRESHOLD {
    FDG_SEL0_LCG
  } else {
    FDG_SEL0_LCG
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::mode::MODES;

  fn mode() -> &'static Mode {
    &MODES[0]
  }

  #[test]
  fn defaults_follow_mode_timing() {
    let m = mode();
    assert_eq!((m.width, m.height, m.hmax, m.vmax), (1936, 1100, 0x7BC, 0x4E2));

    let h = hblank_range(m);
    assert_eq!((h.min, h.max, h.default), (0, 0xFFFF - 1936, 0x7BC - 1936));

    let v = vblank_range(m);
    assert_eq!((v.min, v.max, v.default), (0, 0x3FFFF - 1100, 0x4E2 - 1100));
  }

  #[test]
  fn exposure_range_tracks_vblank() {
    let m = mode();
    let v = vblank_range(m);
    for vb in [v.min, 1, v.default, 10_000, v.max] {
      let e = exposure_range(m, vb);
      assert!(e.min <= e.max);
      assert_eq!(e.max, m.height + vb - 2);
      assert_eq!(e.default, e.max);
    }
  }

  #[test]
  fn exposure_encoding_is_inverted() {
    let m = mode();
    let max = exposure_range(m, 0).max;
    assert_eq!(max, 1098);
    assert_eq!(encode_exposure(m, 0, max), 1);

    let vb = vblank_range(m).default;
    let range = exposure_range(m, vb);
    let mut previous = u32::MAX;
    for e in range.min..=range.max {
      let encoded = encode_exposure(m, vb, e);
      assert!(encoded < previous);
      previous = encoded;
    }
  }

  #[test]
  fn timing_encodings() {
    let m = mode();
    assert_eq!(encode_hmax(hblank_range(m).default, m), 0x3DE);
    assert_eq!(encode_hmax(1, m), (1 + 1936) >> 1);
    assert_eq!(encode_vmax(vblank_range(m).default, m), 0x4E2);
  }

  #[test]
  fn conversion_gain_stays_low() {
    assert_eq!(conversion_gain(0), FDG_SEL0_LCG);
    assert_eq!(conversion_gain(HCG_GAIN_THRESHOLD), FDG_SEL0_LCG);
    assert_eq!(conversion_gain(GAIN_MAX), FDG_SEL0_LCG);
  }

  #[test]
  fn range_bounds_are_inclusive() {
    let r = ControlRange::new(1, 10, 1, 10);
    assert!(r.contains(1) && r.contains(10));
    assert!(!r.contains(0) && !r.contains(11));
    assert_eq!(r.clamp(42), 10);
  }
}
