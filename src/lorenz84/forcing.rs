use crate::lorenz84::{Lorenz84Error, S};
use std::f64::consts::PI;
use std::str::FromStr;

#[cfg(test)]
use crate::assert_float_eq;
#[cfg(test)]
use proptest::prelude::*;

// a model "year" is 73 time units
pub const YEAR_LENGTH: S = 73.0;
// the climate-change ramp switches on at year 100
pub const DEFAULT_RAMP_START: S = 100.0 * YEAR_LENGTH;

pub fn constant(_t: S) -> S {
  6.0
}

pub fn cyclic(t: S) -> S {
  9.5 + 2.0 * (t * 2.0 * PI / YEAR_LENGTH).sin()
}

pub fn linear(t: S, start_time: S) -> S {
  if t < start_time {
    0.0
  } else {
    -2.0 * (t - start_time) / start_time
  }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimeForcing {
  Constant,
  Cyclic,
  Linear { start_time: S },
  CyclicLinear { start_time: S },
  Custom(fn(S) -> S),
}

impl TimeForcing {
  pub fn value(&self, t: S) -> S {
    match *self {
      TimeForcing::Constant => constant(t),
      TimeForcing::Cyclic => cyclic(t),
      TimeForcing::Linear { start_time } => linear(t, start_time),
      TimeForcing::CyclicLinear { start_time } => {
        cyclic(t) + linear(t, start_time)
      }
      TimeForcing::Custom(forcing) => forcing(t),
    }
  }
}

impl Default for TimeForcing {
  fn default() -> Self {
    TimeForcing::Constant
  }
}

impl FromStr for TimeForcing {
  type Err = Lorenz84Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "constant" => Ok(TimeForcing::Constant),
      "cyclic" => Ok(TimeForcing::Cyclic),
      "linear" => Ok(TimeForcing::Linear {
        start_time: DEFAULT_RAMP_START,
      }),
      "cyclic-linear" => Ok(TimeForcing::CyclicLinear {
        start_time: DEFAULT_RAMP_START,
      }),
      _ => Err(Lorenz84Error::InvalidConfiguration(format!(
        "unrecognized forcing token {:?}",
        s
      ))),
    }
  }
}

#[test]
fn constant_forcing_is_six() {
  assert_eq!(constant(0.0), 6.0);
  assert_eq!(constant(-1.0e6), 6.0);
  assert_eq!(TimeForcing::Constant.value(42.0), 6.0);
}

#[test]
fn cyclic_forcing_seasonal_extremes() {
  assert_float_eq!(cyclic(0.0), 9.5);
  assert_float_eq!(cyclic(YEAR_LENGTH / 4.0), 11.5);
  assert_float_eq!(cyclic(3.0 * YEAR_LENGTH / 4.0), 7.5);
}

#[test]
fn linear_forcing_flat_up_to_ramp_start() {
  assert_eq!(linear(-1.0e5, DEFAULT_RAMP_START), 0.0);
  assert_eq!(linear(0.0, DEFAULT_RAMP_START), 0.0);
  assert_eq!(linear(DEFAULT_RAMP_START - 1.0e-9, DEFAULT_RAMP_START), 0.0);
  assert_eq!(linear(DEFAULT_RAMP_START, DEFAULT_RAMP_START), 0.0);
}

#[test]
fn linear_forcing_ramp_rate() {
  // one ramp-start's worth of time past the start reaches -2
  assert_float_eq!(linear(2.0 * DEFAULT_RAMP_START, DEFAULT_RAMP_START), -2.0);
  assert_float_eq!(linear(1.5 * DEFAULT_RAMP_START, DEFAULT_RAMP_START), -1.0);
}

#[test]
fn default_forcing_is_constant() {
  assert_eq!(TimeForcing::default(), TimeForcing::Constant);
}

#[test]
fn forcing_tokens_resolve() {
  assert_eq!("constant".parse::<TimeForcing>(), Ok(TimeForcing::Constant));
  assert_eq!("cyclic".parse::<TimeForcing>(), Ok(TimeForcing::Cyclic));
  assert_eq!(
    "linear".parse::<TimeForcing>(),
    Ok(TimeForcing::Linear {
      start_time: DEFAULT_RAMP_START
    })
  );
  assert_eq!(
    "cyclic-linear".parse::<TimeForcing>(),
    Ok(TimeForcing::CyclicLinear {
      start_time: DEFAULT_RAMP_START
    })
  );
}

#[test]
fn unrecognized_forcing_token_rejected() {
  match "seasonal".parse::<TimeForcing>() {
    Err(Lorenz84Error::InvalidConfiguration(_)) => {}
    other => panic!("expected InvalidConfiguration, got {:?}", other),
  }
}

#[test]
fn custom_forcing_dispatched() {
  let forcing = TimeForcing::Custom(|t| 0.5 * t);
  assert_eq!(forcing.value(8.0), 4.0);
}

#[cfg(test)]
proptest! {
#[test]
fn cyclic_forcing_has_period_of_one_year(t in -1.0e4f64..1.0e4) {
  assert_float_eq!(cyclic(t), cyclic(t + YEAR_LENGTH));
}

#[test]
fn linear_forcing_zero_before_ramp(t in -1.0e4f64..DEFAULT_RAMP_START) {
  prop_assert_eq!(linear(t, DEFAULT_RAMP_START), 0.0);
}

#[test]
fn linear_forcing_strictly_decreasing_after_ramp(
  t in DEFAULT_RAMP_START..10.0 * DEFAULT_RAMP_START,
  dt in 0.01f64..1000.0,
) {
  prop_assert!(
    linear(t + dt, DEFAULT_RAMP_START) < linear(t, DEFAULT_RAMP_START)
  );
}

#[test]
fn combined_forcing_is_sum_of_parts(
  t in -1.0e4f64..1.0e5,
  start_time in 1.0f64..1.0e5,
) {
  let combined = TimeForcing::CyclicLinear { start_time };
  prop_assert_eq!(combined.value(t), cyclic(t) + linear(t, start_time));
}
}
