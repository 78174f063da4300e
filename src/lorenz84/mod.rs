pub mod forcing;
pub mod model;

pub use forcing::TimeForcing;
pub use model::{Lorenz84, Lorenz84Params, Lorenz84State, STATE_DIM};

use std::fmt;

pub type S = f64;

#[derive(Clone, Debug, PartialEq)]
pub enum Lorenz84Error {
  InvalidConfiguration(String),
  ShapeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for Lorenz84Error {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Lorenz84Error::InvalidConfiguration(reason) => {
        write!(f, "invalid model configuration: {}", reason)
      }
      Lorenz84Error::ShapeMismatch { expected, actual } => write!(
        f,
        "packed state has length {}, expected {}",
        actual, expected
      ),
    }
  }
}

impl std::error::Error for Lorenz84Error {}
