//! Fixed sensor geometry, link parameters and the global register table.

use crate::reg::RegVal;

/// Full readable array, including the optical black and ignored margins.
pub const NATIVE_WIDTH: u32 = 1956;
pub const NATIVE_HEIGHT: u32 = 1110;

/// Active pixel array inside the native area.
pub const PIXEL_ARRAY_LEFT: u32 = 0;
pub const PIXEL_ARRAY_TOP: u32 = 20;
pub const PIXEL_ARRAY_WIDTH: u32 = 1936;
pub const PIXEL_ARRAY_HEIGHT: u32 = 1100;

/// Output pixel rate in pixels per second. Identical for every mode.
pub const PIXEL_RATE: u64 = 148_500_000;

/// MIPI link frequency (Hz) the driver programs for each lane count.
pub const LINK_FREQ_2_LANES: u64 = 594_000_000;
pub const LINK_FREQ_4_LANES: u64 = 297_000_000;

/// Wait after each register table is applied.
pub(crate) const TABLE_SETTLE_MS: u32 = 10;
/// Wait between leaving/entering standby and toggling master start.
pub(crate) const STANDBY_SETTLE_MS: u32 = 30;
/// Wait after the reset line is released before the sensor accepts commands.
pub(crate) const POWER_UP_SETTLE_MS: u32 = 30;

/// Register table applied verbatim at the start of every stream.
#[rustfmt::skip]
pub(crate) const GLOBAL_SETTINGS: &[RegVal] = &[
  // Master start, HDR off, readout window
  RegVal::new(0x3002, 0x00),
  RegVal::new(0x301A, 0x00),
  RegVal::new(0x301B, 0x00),
  RegVal::new(0x301C, 0x00),
  RegVal::new(0x301E, 0x01),
  RegVal::new(0x303C, 0x00),
  RegVal::new(0x303D, 0x00),
  RegVal::new(0x303E, 0x90),
  RegVal::new(0x303F, 0x07),
  RegVal::new(0x3044, 0x00),
  RegVal::new(0x3045, 0x00),
  RegVal::new(0x3046, 0x4C),
  RegVal::new(0x3047, 0x04),
  // Output timing, gain bookkeeping and XVS/XHS pins
  RegVal::new(0x3060, 0x16),
  RegVal::new(0x3061, 0x01),
  RegVal::new(0x3062, 0x00),
  RegVal::new(0x3064, 0xC4),
  RegVal::new(0x3065, 0x0C),
  RegVal::new(0x3066, 0x00),
  RegVal::new(0x3069, 0x00),
  RegVal::new(0x3072, 0x00),
  RegVal::new(0x3073, 0x00),
  RegVal::new(0x3074, 0x00),
  RegVal::new(0x3075, 0x00),
  RegVal::new(0x3081, 0x00),
  RegVal::new(0x308C, 0x00),
  RegVal::new(0x308D, 0x01),
  RegVal::new(0x3094, 0x00),
  RegVal::new(0x3095, 0x00),
  RegVal::new(0x3096, 0x00),
  RegVal::new(0x3097, 0x00),
  RegVal::new(0x309C, 0x00),
  RegVal::new(0x309D, 0x00),
  RegVal::new(0x30A4, 0xAA),
  RegVal::new(0x30A6, 0x0F),
  RegVal::new(0x30CC, 0x00),
  RegVal::new(0x30CD, 0x00),
  // Analog tuning from the vendor reference sequence
  RegVal::new(0x3400, 0x01),
  RegVal::new(0x3444, 0xAC),
  RegVal::new(0x3460, 0x21),
  RegVal::new(0x3492, 0x08),
  RegVal::new(0x3A50, 0xFF),
  RegVal::new(0x3A51, 0x03),
  RegVal::new(0x3A52, 0x00),
  RegVal::new(0x3B00, 0x39),
  RegVal::new(0x3B23, 0x2D),
  RegVal::new(0x3B45, 0x04),
  RegVal::new(0x3C0A, 0x1F),
  RegVal::new(0x3C0B, 0x1E),
  RegVal::new(0x3C38, 0x21),
  RegVal::new(0x3C40, 0x06),
  RegVal::new(0x3C44, 0x00),
  RegVal::new(0x3CB6, 0xD8),
  RegVal::new(0x3CC4, 0xDA),
  RegVal::new(0x3E24, 0x79),
  RegVal::new(0x3E2C, 0x15),
  RegVal::new(0x3EDC, 0x2D),
  RegVal::new(0x4498, 0x05),
  RegVal::new(0x449C, 0x19),
  RegVal::new(0x449D, 0x00),
  RegVal::new(0x449E, 0x32),
  RegVal::new(0x449F, 0x01),
  RegVal::new(0x44A0, 0x92),
  RegVal::new(0x44A2, 0x91),
  RegVal::new(0x44A4, 0x8C),
  RegVal::new(0x44A6, 0x87),
  RegVal::new(0x44A8, 0x82),
  RegVal::new(0x44AA, 0x78),
  RegVal::new(0x44AC, 0x6E),
  RegVal::new(0x44AE, 0x69),
  RegVal::new(0x44B0, 0x92),
  RegVal::new(0x44B2, 0x91),
  RegVal::new(0x44B4, 0x8C),
  RegVal::new(0x44B6, 0x87),
  RegVal::new(0x44B8, 0x82),
  RegVal::new(0x44BA, 0x78),
  RegVal::new(0x44BC, 0x6E),
  RegVal::new(0x44BE, 0x69),
  RegVal::new(0x44C1, 0x01),
  RegVal::new(0x44C2, 0x7F),
  RegVal::new(0x44C3, 0x01),
  RegVal::new(0x44C4, 0x7A),
  RegVal::new(0x44C5, 0x01),
  RegVal::new(0x44C6, 0x7A),
  RegVal::new(0x44C7, 0x01),
  RegVal::new(0x44C8, 0x70),
  RegVal::new(0x44C9, 0x01),
  RegVal::new(0x44CA, 0x6B),
  RegVal::new(0x44CB, 0x01),
  RegVal::new(0x44CC, 0x6B),
  RegVal::new(0x44CD, 0x01),
  RegVal::new(0x44CE, 0x5C),
  RegVal::new(0x44CF, 0x01),
  RegVal::new(0x44D0, 0x7F),
  RegVal::new(0x44D1, 0x01),
  RegVal::new(0x44D2, 0x7F),
  RegVal::new(0x44D3, 0x01),
  RegVal::new(0x44D4, 0x7A),
  RegVal::new(0x44D5, 0x01),
  RegVal::new(0x44D6, 0x7A),
  RegVal::new(0x44D7, 0x01),
  RegVal::new(0x44D8, 0x70),
  RegVal::new(0x44D9, 0x01),
  RegVal::new(0x44DA, 0x6B),
  RegVal::new(0x44DB, 0x01),
  RegVal::new(0x44DC, 0x6B),
  RegVal::new(0x44DD, 0x01),
  RegVal::new(0x44DE, 0x5C),
  RegVal::new(0x44DF, 0x01),
  RegVal::new(0x4534, 0x1C),
  RegVal::new(0x4535, 0x03),
  RegVal::new(0x4538, 0x1C),
  RegVal::new(0x4539, 0x1C),
  RegVal::new(0x453A, 0x1C),
  RegVal::new(0x453B, 0x1C),
  RegVal::new(0x453C, 0x1C),
  RegVal::new(0x453D, 0x1C),
  RegVal::new(0x453E, 0x1C),
  RegVal::new(0x453F, 0x1C),
  RegVal::new(0x4540, 0x1C),
  RegVal::new(0x4541, 0x03),
  RegVal::new(0x4542, 0x03),
  RegVal::new(0x4543, 0x03),
  RegVal::new(0x4544, 0x03),
  RegVal::new(0x4545, 0x03),
  RegVal::new(0x4546, 0x03),
  RegVal::new(0x4547, 0x03),
  RegVal::new(0x4548, 0x03),
  RegVal::new(0x4549, 0x03),
];
