use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::reg::{Reg, RegVal, HOLD, I2C_ADDR, RELEASE};

/// Register-level access to the sensor's flat 16-bit address space.
///
/// Implementations only need [`write`](RegisterPort::write) and
/// [`read`](RegisterPort::read). The grouped operations are built on top of
/// them and never retry; the first bus failure is handed back to the caller.
pub trait RegisterPort {
  type Error;

  fn write(&mut self, addr: u16, value: u8) -> Result<(), Self::Error>;

  fn read(&mut self, addr: u16) -> Result<u8, Self::Error>;

  /// Write `bytes` to consecutive registers starting at `start`, bracketed by
  /// the register-hold latch so the device applies them as one value.
  ///
  /// A failed hold write aborts before anything else is sent. A failed value
  /// write skips the remaining bytes but the release is still attempted, so the
  /// sensor is not left latched; the value error wins over a release error.
  fn write_held(&mut self, start: u16, bytes: &[u8]) -> Result<(), Self::Error> {
    self.write(Reg::RegHold.into(), HOLD)?;

    let mut result = Ok(());
    for (offset, &byte) in bytes.iter().enumerate() {
      if let Err(e) = self.write(start.wrapping_add(offset as u16), byte) {
        result = Err(e);
        break;
      }
    }

    let release = self.write(Reg::RegHold.into(), RELEASE);
    result.and(release)
  }

  /// Held write of the `width` least significant bytes of `value`, LSB first.
  fn write_held_le(&mut self, start: u16, value: u32, width: usize) -> Result<(), Self::Error> {
    let bytes = value.to_le_bytes();
    self.write_held(start, &bytes[..width.min(bytes.len())])
  }

  /// Apply a register table in order, stopping at the first failure.
  fn write_array(&mut self, settings: &[RegVal]) -> Result<(), Self::Error> {
    settings.iter().try_for_each(|s| self.write(s.addr, s.val))
  }
}

impl<T: RegisterPort + ?Sized> RegisterPort for &mut T {
  type Error = T::Error;

  fn write(&mut self, addr: u16, value: u8) -> Result<(), Self::Error> {
    (**self).write(addr, value)
  }

  fn read(&mut self, addr: u16) -> Result<u8, Self::Error> {
    (**self).read(addr)
  }
}

/// [`RegisterPort`] over an `embedded-hal` I²C bus.
///
/// Register addresses go out big-endian ahead of the data byte, which is the
/// framing the IMX662 control interface expects.
pub struct I2cPort<I> {
  i2c: I,
  address: SevenBitAddress,
}

impl<I> I2cPort<I>
where
  I: I2c<SevenBitAddress>,
{
  pub fn new(i2c: I) -> Self {
    Self { i2c, address: I2C_ADDR }
  }

  /// Use a non-default slave address (the sensor can be strapped to 0x10..0x1F).
  pub fn with_address(mut self, address: SevenBitAddress) -> Self {
    self.address = address;
    self
  }

  pub fn address(&self) -> SevenBitAddress {
    self.address
  }

  /// Give the bus back.
  pub fn release(self) -> I {
    self.i2c
  }
}

impl<I> RegisterPort for I2cPort<I>
where
  I: I2c<SevenBitAddress>,
{
  type Error = I::Error;

  fn write(&mut self, addr: u16, value: u8) -> Result<(), Self::Error> {
    let [hi, lo] = addr.to_be_bytes();
    self.i2c.write(self.address, &[hi, lo, value])
  }

  fn read(&mut self, addr: u16) -> Result<u8, Self::Error> {
    let mut buf = [0u8; 1];
    self.i2c.write_read(self.address, &addr.to_be_bytes(), &mut buf)?;
    Ok(buf[0])
  }
}
