//! Static mode and pixel-format catalogs.

use crate::defs::*;
use crate::reg::RegVal;

/// A rectangle in sensor pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
  pub left: u32,
  pub top: u32,
  pub width: u32,
  pub height: u32,
}

impl Rect {
  pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
    Self { left, top, width, height }
  }
}

/// A fixed readout configuration.
///
/// `hmax` and `vmax` are the line length and frame length the mode was
/// characterised with; the blanking defaults fall out of them.
#[derive(Debug, PartialEq, Eq)]
pub struct Mode {
  pub width: u32,
  pub height: u32,
  pub hmax: u32,
  pub vmax: u32,
  pub crop: Rect,
  pub(crate) registers: &'static [RegVal],
}

impl Mode {
  /// Register assignments applied when the mode becomes active.
  pub fn registers(&self) -> &'static [RegVal] {
    self.registers
  }

  pub const fn size(&self) -> FrameSize {
    FrameSize { width: self.width, height: self.height }
  }
}

#[rustfmt::skip]
const MODE_1080P_REGS: &[RegVal] = &[
  RegVal::new(0x3018, 0x00), // WINMODE: all-pixel
  RegVal::new(0x3031, 0x00), // FDG_SEL1
  RegVal::new(0x3032, 0x00), // FDG_SEL2
];

/// Every readout mode the driver supports, in preference order.
///
/// The single mode reads out the margins the datasheet marks as colour
/// processing and ignored areas, hence 1936x1100 rather than 1920x1080.
pub static MODES: &[Mode] = &[Mode {
  width: 1936,
  height: 1100,
  hmax: 0x7BC,
  vmax: 0x4E2,
  crop: Rect::new(PIXEL_ARRAY_LEFT, PIXEL_ARRAY_TOP, NATIVE_WIDTH, NATIVE_HEIGHT),
  registers: MODE_1080P_REGS,
}];

/// Pick the mode closest to the requested size.
///
/// Distance is `|dw| + |dh|`; ties keep the earlier catalog entry.
pub fn nearest_mode(width: u32, height: u32) -> &'static Mode {
  nearest_in(MODES, width, height)
}

pub(crate) fn nearest_in(modes: &'static [Mode], width: u32, height: u32) -> &'static Mode {
  let mut best = &modes[0];
  let mut best_error = u64::MAX;

  for mode in modes {
    let error = u64::from(mode.width.abs_diff(width)) + u64::from(mode.height.abs_diff(height));
    if error < best_error {
      best = mode;
      best_error = error;
    }
    if error == 0 {
      break;
    }
  }

  best
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameSize {
  pub width: u32,
  pub height: u32,
}

/// Media bus pixel code, numbered as in Linux `media-bus-format.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MbusCode(pub u32);

impl MbusCode {
  pub const Y10_1X10: Self = Self(0x200A);
  pub const Y12_1X12: Self = Self(0x2013);
  pub const SRGGB10_1X10: Self = Self(0x300F);
  pub const SRGGB12_1X12: Self = Self(0x3012);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PixelFormat {
  pub code: MbusCode,
  pub bit_depth: u8,
}

impl PixelFormat {
  pub const fn new(code: MbusCode, bit_depth: u8) -> Self {
    Self { code, bit_depth }
  }
}

static COLOUR_FORMATS: [PixelFormat; 2] = [
  PixelFormat::new(MbusCode::SRGGB10_1X10, 10),
  PixelFormat::new(MbusCode::SRGGB12_1X12, 12),
];

static MONO_FORMATS: [PixelFormat; 2] = [
  PixelFormat::new(MbusCode::Y10_1X10, 10),
  PixelFormat::new(MbusCode::Y12_1X12, 12),
];

/// Colour filter variant of the sensor, fixed by the part fitted on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
  #[default]
  Colour,
  Mono,
}

impl Variant {
  pub fn formats(self) -> &'static [PixelFormat] {
    match self {
      Self::Colour => &COLOUR_FORMATS,
      Self::Mono => &MONO_FORMATS,
    }
  }

  /// Look `code` up in this variant's format list.
  pub fn format_for_code(self, code: MbusCode) -> Option<(usize, PixelFormat)> {
    self.formats().iter().copied().enumerate().find(|(_, f)| f.code == code)
  }

  /// Sizes offered for `code`, one per catalog mode, or `None` when the code
  /// is not produced by this variant.
  pub fn frame_sizes(self, code: MbusCode) -> Option<impl Iterator<Item = FrameSize>> {
    self.format_for_code(code).map(|_| MODES.iter().map(Mode::size))
  }
}

/// Rectangle queries a host can make about the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelectionTarget {
  /// Crop of the active mode.
  Crop,
  NativeSize,
  CropDefault,
  CropBounds,
}

pub(crate) const NATIVE_RECT: Rect = Rect::new(0, 0, NATIVE_WIDTH, NATIVE_HEIGHT);
pub(crate) const PIXEL_ARRAY_RECT: Rect =
  Rect::new(PIXEL_ARRAY_LEFT, PIXEL_ARRAY_TOP, PIXEL_ARRAY_WIDTH, PIXEL_ARRAY_HEIGHT);

#[cfg(test)]
mod tests {
  use super::*;

  static TWO_MODES: &[Mode] = &[
    Mode { width: 1920, height: 1080, hmax: 0, vmax: 0, crop: NATIVE_RECT, registers: &[] },
    Mode { width: 1280, height: 720, hmax: 0, vmax: 0, crop: NATIVE_RECT, registers: &[] },
  ];

  static EQUIDISTANT: &[Mode] = &[
    Mode { width: 1000, height: 1000, hmax: 0, vmax: 0, crop: NATIVE_RECT, registers: &[] },
    Mode { width: 1200, height: 1000, hmax: 0, vmax: 0, crop: NATIVE_RECT, registers: &[] },
  ];

  #[test]
  fn single_mode_catalog_always_wins() {
    for (w, h) in [(0, 0), (1936, 1100), (640, 480), (u32::MAX, u32::MAX)] {
      assert!(core::ptr::eq(nearest_mode(w, h), &MODES[0]));
    }
  }

  #[test]
  fn nearest_handles_extreme_requests() {
    assert_eq!(nearest_in(TWO_MODES, u32::MAX, u32::MAX).width, 1920);
    assert_eq!(nearest_in(TWO_MODES, 0, u32::MAX).width, 1280);
  }

  #[test]
  fn nearest_picks_smallest_distance() {
    assert_eq!(nearest_in(TWO_MODES, 1300, 700).width, 1280);
    assert_eq!(nearest_in(TWO_MODES, 1900, 1000).width, 1920);
  }

  #[test]
  fn ties_keep_catalog_order() {
    assert_eq!(nearest_in(EQUIDISTANT, 1100, 1000).width, 1000);
  }

  #[test]
  fn formats_by_variant() {
    assert_eq!(Variant::Colour.format_for_code(MbusCode::SRGGB12_1X12), Some((1, COLOUR_FORMATS[1])));
    assert_eq!(Variant::Mono.format_for_code(MbusCode::Y10_1X10).map(|(i, _)| i), Some(0));
    assert_eq!(Variant::Mono.format_for_code(MbusCode::SRGGB10_1X10), None);
  }

  #[test]
  fn frame_sizes_follow_catalog() {
    let sizes: Vec<_> = Variant::Colour.frame_sizes(MbusCode::SRGGB10_1X10).unwrap().collect();
    assert_eq!(sizes, [FrameSize { width: 1936, height: 1100 }]);
    assert!(Variant::Colour.frame_sizes(MbusCode::Y12_1X12).is_none());
  }
}
