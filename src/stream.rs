use embedded_hal::delay::DelayNs;

use crate::config::ConfigError;
use crate::control::ControlKind;
use crate::defs::{GLOBAL_SETTINGS, STANDBY_SETTLE_MS, TABLE_SETTLE_MS};
use crate::fmt::{error, info};
use crate::power::PowerControl;
use crate::reg::{Reg, MASTER_START, MASTER_STOP, STANDBY_OFF, STANDBY_ON};
use crate::rw::RegisterPort;
use crate::{Error, Imx662};

/// Where the sensor is in its stream lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamState {
  /// Not streaming, powered or not.
  #[default]
  Idle,
  /// The start sequence is being written.
  Configuring,
  Streaming,
}

impl StreamState {
  pub const fn is_active(self) -> bool {
    !matches!(self, Self::Idle)
  }
}

/// Operations refused because of the stream state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StateError {
  /// Mode, format and power changes need the stream stopped.
  Streaming,
}

/// Steps of the stream start sequence, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartStep {
  GlobalSettings,
  ClockSelect,
  BitDepth,
  ModeSettings,
  Lanes,
  Controls,
  LeaveStandby,
  MasterStart,
}

/// ADBIT/MDBIT code for a pixel bit depth.
pub(crate) const fn ad_bits(bit_depth: u8) -> Result<u8, ConfigError> {
  match bit_depth {
    10 => Ok(0x00),
    12 => Ok(0x01),
    other => Err(ConfigError::UnsupportedBitDepth(other)),
  }
}

impl<P, PWR, D> Imx662<P, PWR, D>
where
  P: RegisterPort,
  PWR: PowerControl,
  D: DelayNs,
{
  /// Program the sensor and start streaming, powering it up first if needed.
  ///
  /// The sequence stops at the first failing step and the error is returned
  /// as is. The sensor is then left powered and [`StreamState::Idle`].
  pub fn start_stream(&mut self) -> Result<(), Error<P::Error, PWR::Error>> {
    if self.ctx.state.is_active() {
      return Err(StateError::Streaming.into());
    }

    self.power_on()?;

    self.ctx.state = StreamState::Configuring;

    let mut step = StartStep::GlobalSettings;
    loop {
      match self.start_step(step) {
        Ok(Some(next)) => step = next,
        Ok(None) => break,
        Err(e) => {
          error!("stream start failed at {}", step);
          self.ctx.state = StreamState::Idle;
          return Err(e);
        }
      }
    }

    self.ctx.state = StreamState::Streaming;
    info!("streaming {}x{}", self.ctx.mode.width, self.ctx.mode.height);
    Ok(())
  }

  fn start_step(&mut self, step: StartStep) -> Result<Option<StartStep>, Error<P::Error, PWR::Error>> {
    match step {
      StartStep::GlobalSettings => {
        self.port.write_array(GLOBAL_SETTINGS).map_err(Error::Device)?;
        self.delay.delay_ms(TABLE_SETTLE_MS);
        Ok(Some(StartStep::ClockSelect))
      }

      StartStep::ClockSelect => {
        self.port.write(Reg::InckSel.into(), self.config.inck.into()).map_err(Error::Device)?;
        Ok(Some(StartStep::BitDepth))
      }

      StartStep::BitDepth => {
        let bits = ad_bits(self.ctx.format.bit_depth)?;
        self.port.write(Reg::AdBit.into(), bits).map_err(Error::Device)?;
        self.port.write(Reg::MdBit.into(), bits).map_err(Error::Device)?;
        Ok(Some(StartStep::ModeSettings))
      }

      StartStep::ModeSettings => {
        self.port.write_array(self.ctx.mode.registers()).map_err(Error::Device)?;
        self.delay.delay_ms(TABLE_SETTLE_MS);
        Ok(Some(StartStep::Lanes))
      }

      StartStep::Lanes => {
        let lanes = self.config.lanes;
        self.port.write(Reg::CsiLaneMode.into(), lanes.lane_mode()).map_err(Error::Device)?;
        self.port.write(Reg::LaneRate.into(), lanes.lane_rate().into()).map_err(Error::Device)?;
        Ok(Some(StartStep::Controls))
      }

      StartStep::Controls => {
        for kind in ControlKind::ALL {
          self.apply_control(kind).map_err(Error::Device)?;
        }
        Ok(Some(StartStep::LeaveStandby))
      }

      StartStep::LeaveStandby => {
        self.port.write(Reg::Standby.into(), STANDBY_OFF).map_err(Error::Device)?;
        self.delay.delay_ms(STANDBY_SETTLE_MS);
        Ok(Some(StartStep::MasterStart))
      }

      StartStep::MasterStart => {
        self.port.write(Reg::MasterStart.into(), MASTER_START).map_err(Error::Device)?;
        Ok(None)
      }
    }
  }

  /// Stop streaming. Does nothing when the sensor is not streaming.
  ///
  /// Both the standby and the master stop writes are always attempted and the
  /// first failure is returned. The driver reports [`StreamState::Idle`]
  /// afterwards either way; on error the sensor state is unknown and a power
  /// cycle is the safe recovery.
  pub fn stop_stream(&mut self) -> Result<(), Error<P::Error, PWR::Error>> {
    if !self.ctx.state.is_active() {
      return Ok(());
    }

    let standby = self.port.write(Reg::Standby.into(), STANDBY_ON);
    self.delay.delay_ms(STANDBY_SETTLE_MS);
    let stop = self.port.write(Reg::MasterStart.into(), MASTER_STOP);

    self.ctx.state = StreamState::Idle;

    match standby.and(stop) {
      Ok(()) => {
        info!("stream stopped");
        Ok(())
      }
      Err(e) => {
        error!("stream stop incomplete, power cycle the sensor");
        Err(Error::Device(e))
      }
    }
  }

  pub fn stream_state(&self) -> StreamState {
    self.ctx.state
  }
}
