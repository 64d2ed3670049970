use crate::fmt::error;
use crate::mode::Variant;

mod clock;
mod lanes;

pub use clock::*;
pub use lanes::*;

/// Board-level description of how the sensor is wired.
///
/// Everything here is fixed for the lifetime of a driver instance and checked
/// once, in [`Config::validate`], before the driver is built.
///
/// # Example
/// ```no_run
/// use imx662::{Config, Variant};
///
/// let config = Config::new(4, 37_125_000)
///   .with_link_frequencies(&[297_000_000])
///   .with_variant(Variant::Mono);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Config {
  /// Number of MIPI CSI-2 data lanes (2 or 4).
  pub lanes: u8,
  /// External clock (INCK) frequency in Hz.
  pub clock_hz: u32,
  /// Link frequencies the board declares usable, in Hz.
  pub link_frequencies: &'static [u64],
  pub variant: Variant,
}

impl Config {
  pub const fn new(lanes: u8, clock_hz: u32) -> Self {
    Self { lanes, clock_hz, link_frequencies: &[], variant: Variant::Colour }
  }

  pub const fn with_link_frequencies(mut self, link_frequencies: &'static [u64]) -> Self {
    self.link_frequencies = link_frequencies;
    self
  }

  pub const fn with_variant(mut self, variant: Variant) -> Self {
    self.variant = variant;
    self
  }

  /// Check the wiring against what the sensor supports.
  ///
  /// Lane count is checked first, then the declared link frequencies, then
  /// the external clock.
  pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
    let lanes = match Lanes::try_from(self.lanes) {
      Ok(lanes) => lanes,
      Err(e) => {
        error!("invalid data lanes: {}", self.lanes);
        return Err(e);
      }
    };

    if self.link_frequencies.is_empty() {
      error!("no link frequencies declared");
      return Err(ConfigError::MissingLinkFrequencies);
    }

    let required = lanes.link_frequency();
    if !self.link_frequencies.contains(&required) {
      error!("link frequency {} is not declared", required);
      return Err(ConfigError::UnsupportedLinkFrequency(required));
    }

    let Some(inck) = Inck::from_hz(self.clock_hz) else {
      error!("external clock {} Hz is not supported", self.clock_hz);
      return Err(ConfigError::UnsupportedClock(self.clock_hz));
    };

    Ok(ValidatedConfig { lanes, inck, variant: self.variant })
  }
}

/// A [`Config`] that passed validation, in the form the register sequences use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidatedConfig {
  pub lanes: Lanes,
  pub inck: Inck,
  pub variant: Variant,
}

/// Reasons a configuration is refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
  /// Only 2 and 4 lane wiring is supported.
  InvalidLaneCount(u8),
  /// External clock frequency (Hz) outside the supported set.
  UnsupportedClock(u32),
  /// The board declared no link frequencies at all.
  MissingLinkFrequencies,
  /// The link frequency (Hz) the lane setup needs was not declared.
  UnsupportedLinkFrequency(u64),
  /// A pixel format carries a bit depth the AD converter cannot produce.
  UnsupportedBitDepth(u8),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_two_and_four_lane_boards() {
    let two = Config::new(2, 74_250_000).with_link_frequencies(&[594_000_000]).validate().unwrap();
    assert_eq!(two.lanes, Lanes::Two);
    assert_eq!(two.inck, Inck::Mhz74_25);

    let four = Config::new(4, 24_000_000)
      .with_link_frequencies(&[148_500_000, 297_000_000])
      .with_variant(Variant::Mono)
      .validate()
      .unwrap();
    assert_eq!(four.lanes, Lanes::Four);
    assert_eq!(four.inck, Inck::Mhz24);
    assert_eq!(four.variant, Variant::Mono);
  }

  #[test]
  fn rejects_odd_lane_counts() {
    for lanes in [0, 1, 3, 8] {
      let err = Config::new(lanes, 74_250_000).with_link_frequencies(&[594_000_000]).validate();
      assert_eq!(err, Err(ConfigError::InvalidLaneCount(lanes)));
    }
  }

  #[test]
  fn link_frequency_must_match_lane_count() {
    assert_eq!(Config::new(2, 74_250_000).validate(), Err(ConfigError::MissingLinkFrequencies));
    assert_eq!(
      Config::new(2, 74_250_000).with_link_frequencies(&[297_000_000]).validate(),
      Err(ConfigError::UnsupportedLinkFrequency(594_000_000))
    );
  }

  #[test]
  fn rejects_unknown_clock() {
    assert_eq!(
      Config::new(4, 25_000_000).with_link_frequencies(&[297_000_000]).validate(),
      Err(ConfigError::UnsupportedClock(25_000_000))
    );
  }
}
