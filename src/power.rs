use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::defs::POWER_UP_SETTLE_MS;

/// Supplies, clock and reset sequencing for the sensor.
///
/// The driver only calls this at power transitions, never per frame. How the
/// rails and INCK are switched is up to the board.
pub trait PowerControl {
  type Error;

  fn power_on(&mut self) -> Result<(), Self::Error>;

  fn power_off(&mut self) -> Result<(), Self::Error>;
}

/// For boards where the sensor is permanently powered.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysOn;

impl PowerControl for AlwaysOn {
  type Error = Infallible;

  fn power_on(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }

  fn power_off(&mut self) -> Result<(), Self::Error> {
    Ok(())
  }
}

/// Drives the active-low XCLR reset line; supplies and INCK are assumed to be
/// running whenever the line is released.
pub struct ResetLine<PIN, D> {
  xclr: PIN,
  delay: D,
}

impl<PIN, D> ResetLine<PIN, D>
where
  PIN: OutputPin,
  D: DelayNs,
{
  pub fn new(xclr: PIN, delay: D) -> Self {
    Self { xclr, delay }
  }

  pub fn release(self) -> (PIN, D) {
    (self.xclr, self.delay)
  }
}

impl<PIN, D> PowerControl for ResetLine<PIN, D>
where
  PIN: OutputPin,
  D: DelayNs,
{
  type Error = PIN::Error;

  fn power_on(&mut self) -> Result<(), Self::Error> {
    self.xclr.set_high()?;
    self.delay.delay_ms(POWER_UP_SETTLE_MS);
    Ok(())
  }

  fn power_off(&mut self) -> Result<(), Self::Error> {
    self.xclr.set_low()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use embedded_hal_mock::eh1::delay::NoopDelay;
  use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

  #[test]
  fn reset_line_releases_then_asserts() {
    let expectations = [Transaction::set(State::High), Transaction::set(State::Low)];
    let mut power = ResetLine::new(PinMock::new(&expectations), NoopDelay::new());

    power.power_on().unwrap();
    power.power_off().unwrap();

    let (mut pin, _) = power.release();
    pin.done();
  }
}
