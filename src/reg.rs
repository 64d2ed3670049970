/******************************************************************************
 * Refer to the Sony IMX662 register map (IMX662-AAQR-C application note)     *
 * ========================================================================== *
 *                       IMX662 - Registers & Memory Map                      *
*******************************************************************************/

/// Default 7-bit I²C slave address of the sensor.
pub(crate) const I2C_ADDR: u8 = 0x1A;

#[allow(dead_code)]
#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Reg {
  // Operation control (0x3000..0x3002)
  Standby = 0x3000,
  RegHold = 0x3001,
  MasterStart = 0x3002,

  // Clocking (0x3014..0x3015)
  InckSel = 0x3014,
  LaneRate = 0x3015,

  // Readout direction and AD resolution (0x3020..0x3023)
  WinModeH = 0x3020,
  WinModeV = 0x3021,
  AdBit = 0x3022,
  MdBit = 0x3023,

  // Frame timing, VMAX is 3 bytes and HMAX 2 bytes, LSB first (0x3028..0x302D)
  Vmax = 0x3028,
  Hmax = 0x302C,

  // Conversion gain (0x3030..0x3032)
  FdgSel0 = 0x3030,
  FdgSel1 = 0x3031,
  FdgSel2 = 0x3032,

  // MIPI output (0x3040)
  CsiLaneMode = 0x3040,

  // Shutter, 3 bytes LSB first (0x3050..0x3052)
  Exposure = 0x3050,

  // Analogue gain, 2 bytes LSB first (0x3070..0x3071)
  Gain = 0x3070,
}

impl From<Reg> for u16 {
  #[inline]
  fn from(r: Reg) -> Self {
    r as u16
  }
}

pub(crate) const STANDBY_ON: u8 = 0x01;
pub(crate) const STANDBY_OFF: u8 = 0x00;
pub(crate) const MASTER_STOP: u8 = 0x01;
pub(crate) const MASTER_START: u8 = 0x00;
pub(crate) const HOLD: u8 = 0x01;
pub(crate) const RELEASE: u8 = 0x00;

pub(crate) const FDG_SEL0_LCG: u8 = 0x00;
#[allow(dead_code)]
pub(crate) const FDG_SEL0_HCG: u8 = 0x01;

pub(crate) const CSI_LANE_MODE_2: u8 = 0x01;
pub(crate) const CSI_LANE_MODE_4: u8 = 0x03;

/// Largest value the 16-bit HMAX field accepts.
pub const HMAX_MAX: u32 = 0xFFFF;
/// Largest value the 18-bit VMAX field accepts.
pub const VMAX_MAX: u32 = 0x03_FFFF;

/// Byte widths of the held multi-byte fields.
pub(crate) const GAIN_BYTES: usize = 2;
pub(crate) const HMAX_BYTES: usize = 2;
pub(crate) const VMAX_BYTES: usize = 3;
pub(crate) const EXPOSURE_BYTES: usize = 3;

/// MIPI lane data rate selector written to [`Reg::LaneRate`].
#[allow(dead_code)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LaneRate {
  Mbps2376 = 0x00,
  Mbps2079 = 0x01,
  Mbps1782 = 0x02,
  Mbps1440 = 0x03,
  Mbps1188 = 0x04,
  Mbps891 = 0x05,
  Mbps720 = 0x06,
  Mbps594 = 0x07,
}

impl From<LaneRate> for u8 {
  fn from(v: LaneRate) -> Self {
    v as u8
  }
}

/// A single `(address, value)` register assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegVal {
  pub addr: u16,
  pub val: u8,
}

impl RegVal {
  pub const fn new(addr: u16, val: u8) -> Self {
    Self { addr, val }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn register_addresses_match_datasheet() {
    assert_eq!(u16::from(Reg::RegHold), 0x3001);
    assert_eq!(u16::from(Reg::Vmax), 0x3028);
    assert_eq!(u16::from(Reg::Hmax), 0x302C);
    assert_eq!(u16::from(Reg::Exposure), 0x3050);
    assert_eq!(u16::from(Reg::Gain), 0x3070);
    assert_eq!(u8::from(LaneRate::Mbps1188), 0x04);
    assert_eq!(u8::from(LaneRate::Mbps594), 0x07);
  }
}
