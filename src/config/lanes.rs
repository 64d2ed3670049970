use super::ConfigError;
use crate::defs::{LINK_FREQ_2_LANES, LINK_FREQ_4_LANES};
use crate::reg::{LaneRate, CSI_LANE_MODE_2, CSI_LANE_MODE_4};

/// MIPI CSI-2 data lane wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lanes {
  Two,
  Four,
}

impl Lanes {
  pub const fn count(self) -> u8 {
    match self {
      Self::Two => 2,
      Self::Four => 4,
    }
  }

  /// Link frequency (Hz) the sensor runs at with this wiring.
  pub const fn link_frequency(self) -> u64 {
    match self {
      Self::Two => LINK_FREQ_2_LANES,
      Self::Four => LINK_FREQ_4_LANES,
    }
  }

  pub(crate) const fn lane_mode(self) -> u8 {
    match self {
      Self::Two => CSI_LANE_MODE_2,
      Self::Four => CSI_LANE_MODE_4,
    }
  }

  pub(crate) const fn lane_rate(self) -> LaneRate {
    match self {
      Self::Two => LaneRate::Mbps1188,
      Self::Four => LaneRate::Mbps594,
    }
  }
}

impl TryFrom<u8> for Lanes {
  type Error = ConfigError;

  fn try_from(count: u8) -> Result<Self, Self::Error> {
    match count {
      2 => Ok(Self::Two),
      4 => Ok(Self::Four),
      other => Err(ConfigError::InvalidLaneCount(other)),
    }
  }
}
