//! Recording doubles for the bus, power and delay seams.

use std::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;

use crate::{Config, Imx662, PowerControl, RegisterPort};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FakeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
  Write(u16, u8),
  DelayMs(u32),
  DelayNs(u32),
  PowerOn,
  PowerOff,
}

#[derive(Default)]
struct Inner {
  events: Vec<Event>,
  fail_at: Option<usize>,
  fail_power: bool,
  writes_seen: usize,
}

/// Shared view of everything the fakes were asked to do, in order.
#[derive(Clone, Default)]
pub(crate) struct Log(Rc<RefCell<Inner>>);

impl Log {
  pub(crate) fn events(&self) -> Vec<Event> {
    self.0.borrow().events.clone()
  }

  /// Attempted register writes, including a write that was made to fail.
  pub(crate) fn writes(&self) -> Vec<(u16, u8)> {
    self
      .0
      .borrow()
      .events
      .iter()
      .filter_map(|e| match *e {
        Event::Write(addr, val) => Some((addr, val)),
        _ => None,
      })
      .collect()
  }

  /// Make the `n`-th write from now (1-based) fail. Later writes succeed.
  pub(crate) fn fail_on_write(&self, n: usize) {
    let mut inner = self.0.borrow_mut();
    let at = inner.writes_seen + n;
    inner.fail_at = Some(at);
  }

  pub(crate) fn fail_power(&self) {
    self.0.borrow_mut().fail_power = true;
  }

  pub(crate) fn clear(&self) {
    self.0.borrow_mut().events.clear();
  }

  fn push(&self, event: Event) {
    self.0.borrow_mut().events.push(event);
  }
}

pub(crate) struct FakePort(pub(crate) Log);

impl RegisterPort for FakePort {
  type Error = FakeError;

  fn write(&mut self, addr: u16, value: u8) -> Result<(), Self::Error> {
    let mut inner = self.0 .0.borrow_mut();
    inner.events.push(Event::Write(addr, value));
    inner.writes_seen += 1;
    if inner.fail_at == Some(inner.writes_seen) {
      return Err(FakeError);
    }
    Ok(())
  }

  fn read(&mut self, addr: u16) -> Result<u8, Self::Error> {
    let inner = self.0 .0.borrow();
    let last = inner.events.iter().rev().find_map(|e| match *e {
      Event::Write(a, v) if a == addr => Some(v),
      _ => None,
    });
    Ok(last.unwrap_or(0))
  }
}

pub(crate) struct FakePower(pub(crate) Log);

impl PowerControl for FakePower {
  type Error = FakeError;

  fn power_on(&mut self) -> Result<(), Self::Error> {
    if self.0 .0.borrow().fail_power {
      return Err(FakeError);
    }
    self.0.push(Event::PowerOn);
    Ok(())
  }

  fn power_off(&mut self) -> Result<(), Self::Error> {
    self.0.push(Event::PowerOff);
    Ok(())
  }
}

pub(crate) struct FakeDelay(pub(crate) Log);

impl DelayNs for FakeDelay {
  fn delay_ns(&mut self, ns: u32) {
    self.0.push(Event::DelayNs(ns));
  }

  fn delay_ms(&mut self, ms: u32) {
    self.0.push(Event::DelayMs(ms));
  }
}

pub(crate) type TestDriver = Imx662<FakePort, FakePower, FakeDelay>;

/// Colour sensor, four lanes, 37.125 MHz INCK.
pub(crate) fn config() -> Config {
  Config::new(4, 37_125_000).with_link_frequencies(&[297_000_000])
}

pub(crate) fn driver_with(config: Config) -> (TestDriver, Log) {
  let log = Log::default();
  let imx = Imx662::new(FakePort(log.clone()), FakePower(log.clone()), FakeDelay(log.clone()), config)
    .expect("valid test config");
  (imx, log)
}

pub(crate) fn driver() -> (TestDriver, Log) {
  driver_with(config())
}
