/// External clock input selection, written to INCK_SEL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Inck {
  Mhz74_25 = 0x00,
  Mhz37_125 = 0x01,
  Mhz72 = 0x02,
  Mhz27 = 0x03,
  Mhz24 = 0x04,
}

impl Inck {
  pub const fn from_hz(hz: u32) -> Option<Self> {
    match hz {
      74_250_000 => Some(Self::Mhz74_25),
      37_125_000 => Some(Self::Mhz37_125),
      72_000_000 => Some(Self::Mhz72),
      27_000_000 => Some(Self::Mhz27),
      24_000_000 => Some(Self::Mhz24),
      _ => None,
    }
  }

  pub const fn hz(self) -> u32 {
    match self {
      Self::Mhz74_25 => 74_250_000,
      Self::Mhz37_125 => 37_125_000,
      Self::Mhz72 => 72_000_000,
      Self::Mhz27 => 27_000_000,
      Self::Mhz24 => 24_000_000,
    }
  }
}

impl From<Inck> for u8 {
  fn from(v: Inck) -> Self {
    v as u8
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn select_codes() {
    assert_eq!(Inck::from_hz(37_125_000).map(u8::from), Some(0x01));
    assert_eq!(Inck::from_hz(27_000_000).map(u8::from), Some(0x03));
    assert_eq!(Inck::from_hz(48_000_000), None);
    assert_eq!(Inck::from_hz(Inck::Mhz72.hz()), Some(Inck::Mhz72));
  }
}
