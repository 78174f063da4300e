pub mod lorenz84;
pub mod ode;
pub mod utils;

pub use lorenz84::{
  Lorenz84, Lorenz84Error, Lorenz84Params, Lorenz84State, TimeForcing,
};
