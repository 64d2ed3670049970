//! Logging shims. Forward to `defmt` when the `defmt` feature is enabled and
//! expand to nothing otherwise, so the driver carries no logger requirement.
#![allow(unused_macros)]

macro_rules! debug {
  ($($arg:tt)*) => {
    #[cfg(feature = "defmt")]
    {
      ::defmt::debug!($($arg)*)
    }
  };
}

macro_rules! info {
  ($($arg:tt)*) => {
    #[cfg(feature = "defmt")]
    {
      ::defmt::info!($($arg)*)
    }
  };
}

macro_rules! error {
  ($($arg:tt)*) => {
    #[cfg(feature = "defmt")]
    {
      ::defmt::error!($($arg)*)
    }
  };
}

pub(crate) use {debug, error, info};
