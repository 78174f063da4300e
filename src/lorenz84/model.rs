use crate::{
  lorenz84::{forcing::TimeForcing, Lorenz84Error, S},
  ode::{Model, ModelState},
};
use nalgebra::Vector3;
use std::slice::{Iter, IterMut};

#[cfg(test)]
use crate::assert_float_eq;
#[cfg(test)]
use crate::lorenz84::forcing::DEFAULT_RAMP_START;
#[cfg(test)]
use crate::ode::{
  Euler, EulerSettings, Integrator, IntegratorType, MidpointSettings,
  RK4Settings, SwappableIntegrator,
};
#[cfg(test)]
use proptest::prelude::*;
#[cfg(test)]
use proptest_derive::Arbitrary;
#[cfg(test)]
use std::sync::atomic::{AtomicUsize, Ordering};

pub const STATE_DIM: usize = 3;

// component k of orbit i lives at flat index i * STATE_DIM + k; every
// consumer of the packed layout goes through here
fn flat_index(orbit: usize, component: usize) -> usize {
  orbit * STATE_DIM + component
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lorenz84Params {
  pub a: S,
  pub b: S,
  pub g: S,
}

impl Default for Lorenz84Params {
  fn default() -> Self {
    Self {
      a: 0.25,
      b: 4.0,
      g: 1.0,
    }
  }
}

#[derive(Clone, Debug)]
pub struct Lorenz84 {
  params: Lorenz84Params,
  forcing: TimeForcing,
  n_orbits: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Lorenz84State {
  packed: Vec<S>,
}

impl Lorenz84 {
  pub fn new(
    params: Lorenz84Params,
    forcing: TimeForcing,
    n_orbits: usize,
  ) -> Result<Self, Lorenz84Error> {
    if n_orbits == 0 {
      return Err(Lorenz84Error::InvalidConfiguration(
        "orbit count must be a positive integer".to_string(),
      ));
    }

    Ok(Self {
      params,
      forcing,
      n_orbits,
    })
  }

  pub fn params(&self) -> &Lorenz84Params {
    &self.params
  }

  pub fn forcing(&self) -> &TimeForcing {
    &self.forcing
  }

  pub fn n_orbits(&self) -> usize {
    self.n_orbits
  }

  pub fn state_len(&self) -> usize {
    self.n_orbits * STATE_DIM
  }

  // advisory (x, y, z) box; evaluation never clamps or rejects states
  // outside of it
  pub fn bounds() -> [Vector3<S>; 2] {
    [Vector3::new(-1.0, -3.0, -3.0), Vector3::new(3.0, 3.0, 3.0)]
  }

  pub fn initial_state(&self) -> Lorenz84State {
    Lorenz84State::zeros(self.n_orbits)
  }

  pub fn vector_field(
    &self,
    state: &Lorenz84State,
    t: S,
  ) -> Result<Lorenz84State, Lorenz84Error> {
    if state.len() != self.state_len() {
      return Err(Lorenz84Error::ShapeMismatch {
        expected: self.state_len(),
        actual: state.len(),
      });
    }

    let mut dxdt = Lorenz84State::zeros(self.n_orbits);
    self.fill_derivative(&state.packed, &mut dxdt.packed, t);

    Ok(dxdt)
  }

  fn fill_derivative(&self, state: &[S], dxdt: &mut [S], t: S) {
    debug_assert_eq!(state.len(), dxdt.len());

    let Lorenz84Params { a, b, g } = self.params;
    // the forcing depends only on t, evaluate it once for all orbits
    let f = self.forcing.value(t);

    for (x, dx) in state
      .chunks_exact(STATE_DIM)
      .zip(dxdt.chunks_exact_mut(STATE_DIM))
    {
      dx[0] = -x[1] * x[1] - x[2] * x[2] - a * x[0] + a * f;
      dx[1] = x[0] * x[1] - b * x[0] * x[2] - x[1] + g;
      dx[2] = x[0] * x[2] + b * x[0] * x[1] - x[2];
    }
  }
}

impl Default for Lorenz84 {
  fn default() -> Self {
    Self {
      params: Lorenz84Params::default(),
      forcing: TimeForcing::default(),
      n_orbits: 1,
    }
  }
}

impl Lorenz84State {
  pub fn zeros(n_orbits: usize) -> Self {
    Self {
      packed: vec![0.0; n_orbits * STATE_DIM],
    }
  }

  pub fn from_orbits(orbits: &[Vector3<S>]) -> Self {
    let mut packed = Vec::with_capacity(orbits.len() * STATE_DIM);
    for orbit in orbits {
      packed.extend(orbit.iter());
    }

    Self { packed }
  }

  pub fn from_packed(packed: Vec<S>) -> Result<Self, Lorenz84Error> {
    if packed.len() % STATE_DIM != 0 {
      return Err(Lorenz84Error::ShapeMismatch {
        expected: packed.len() / STATE_DIM * STATE_DIM,
        actual: packed.len(),
      });
    }

    Ok(Self { packed })
  }

  pub fn n_orbits(&self) -> usize {
    self.packed.len() / STATE_DIM
  }

  pub fn len(&self) -> usize {
    self.packed.len()
  }

  pub fn is_empty(&self) -> bool {
    self.packed.is_empty()
  }

  pub fn as_slice(&self) -> &[S] {
    &self.packed
  }

  pub fn orbit(&self, orbit: usize) -> Vector3<S> {
    Vector3::new(
      self.packed[flat_index(orbit, 0)],
      self.packed[flat_index(orbit, 1)],
      self.packed[flat_index(orbit, 2)],
    )
  }

  pub fn set_orbit(&mut self, orbit: usize, values: Vector3<S>) {
    for (component, value) in values.iter().enumerate() {
      self.packed[flat_index(orbit, component)] = *value;
    }
  }
}

impl<'a> IntoIterator for &'a Lorenz84State {
  type Item = &'a S;

  type IntoIter = Iter<'a, S>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.packed.iter()
  }
}

impl<'a> IntoIterator for &'a mut Lorenz84State {
  type Item = &'a mut S;

  type IntoIter = IterMut<'a, S>;

  #[inline]
  fn into_iter(self) -> Self::IntoIter {
    self.packed.iter_mut()
  }
}

impl ModelState<S> for Lorenz84State {
  fn new() -> Self {
    Self { packed: Vec::new() }
  }

  fn zeros_as(&mut self, other: &Self) {
    self.packed.clear();
    self.packed.resize(other.packed.len(), 0.0);
  }
}

impl Model for Lorenz84 {
  type S = S;
  type State = Lorenz84State;

  fn derivative(&self, x: &Self::State, dxdt: &mut Self::State, t: &Self::S) {
    // no error channel at this seam, so the shape precondition is a hard
    // failure
    assert_eq!(
      x.len(),
      self.state_len(),
      "packed state length must be 3 * n_orbits"
    );

    self.fill_derivative(&x.packed, &mut dxdt.packed, *t);
  }
}

#[cfg(test)]
fn single_orbit_vector_field(
  params: &Lorenz84Params,
  forcing: TimeForcing,
  orbit: Vector3<S>,
  t: S,
) -> Vector3<S> {
  let model = Lorenz84::new(*params, forcing, 1).unwrap();

  model
    .vector_field(&Lorenz84State::from_orbits(&[orbit]), t)
    .unwrap()
    .orbit(0)
}

#[cfg(test)]
#[derive(Debug, Arbitrary)]
enum ForcingOptions {
  Constant,
  Cyclic,
  Linear,
  CyclicLinear,
}

#[cfg(test)]
impl ForcingOptions {
  fn forcing(&self) -> TimeForcing {
    match self {
      ForcingOptions::Constant => TimeForcing::Constant,
      ForcingOptions::Cyclic => TimeForcing::Cyclic,
      ForcingOptions::Linear => TimeForcing::Linear {
        start_time: DEFAULT_RAMP_START,
      },
      ForcingOptions::CyclicLinear => TimeForcing::CyclicLinear {
        start_time: DEFAULT_RAMP_START,
      },
    }
  }
}

#[cfg(test)]
static FORCING_CALLS: AtomicUsize = AtomicUsize::new(0);

#[cfg(test)]
fn counting_forcing(_: S) -> S {
  FORCING_CALLS.fetch_add(1, Ordering::SeqCst);
  7.0
}

#[test]
fn rest_state_single_orbit() {
  let model = Lorenz84::default();
  let dxdt = model.vector_field(&model.initial_state(), 0.0).unwrap();
  let Lorenz84Params { a, g, .. } = *model.params();

  assert_eq!(dxdt.orbit(0), Vector3::new(a * 6.0, g, 0.0));
}

#[test]
fn zero_orbit_count_rejected() {
  match Lorenz84::new(Lorenz84Params::default(), TimeForcing::Constant, 0) {
    Err(Lorenz84Error::InvalidConfiguration(_)) => {}
    other => panic!("expected InvalidConfiguration, got {:?}", other),
  }
}

#[test]
fn shape_mismatch_surfaced() {
  let model =
    Lorenz84::new(Lorenz84Params::default(), TimeForcing::Constant, 2)
      .unwrap();
  let state = Lorenz84State::zeros(3);

  assert_eq!(
    model.vector_field(&state, 0.0),
    Err(Lorenz84Error::ShapeMismatch {
      expected: 6,
      actual: 9
    })
  );
}

#[test]
fn ragged_packed_vector_rejected() {
  match Lorenz84State::from_packed(vec![0.0; 4]) {
    Err(Lorenz84Error::ShapeMismatch { actual: 4, .. }) => {}
    other => panic!("expected ShapeMismatch, got {:?}", other),
  }
}

#[test]
fn bounds_box_is_fixed() {
  let [lower, upper] = Lorenz84::bounds();

  assert_eq!(lower, Vector3::new(-1.0, -3.0, -3.0));
  assert_eq!(upper, Vector3::new(3.0, 3.0, 3.0));
}

#[test]
fn a_zero_drops_decay_and_forcing() {
  let params = Lorenz84Params {
    a: 0.0,
    ..Lorenz84Params::default()
  };
  let dxdt = single_orbit_vector_field(
    &params,
    TimeForcing::Cyclic,
    Vector3::new(1.0, 2.0, -1.0),
    5.0,
  );

  assert_eq!(dxdt[0], -2.0 * 2.0 - (-1.0) * (-1.0));
}

#[test]
fn b_zero_drops_shear_coupling() {
  let params = Lorenz84Params {
    b: 0.0,
    ..Lorenz84Params::default()
  };
  let orbit = Vector3::new(0.5, -1.5, 2.0);
  let dxdt =
    single_orbit_vector_field(&params, TimeForcing::Constant, orbit, 0.0);

  assert_eq!(dxdt[1], orbit[0] * orbit[1] - orbit[1] + params.g);
  assert_eq!(dxdt[2], orbit[0] * orbit[2] - orbit[2]);
}

#[test]
fn forcing_evaluated_once_per_call() {
  let model = Lorenz84::new(
    Lorenz84Params::default(),
    TimeForcing::Custom(counting_forcing),
    8,
  )
  .unwrap();

  FORCING_CALLS.store(0, Ordering::SeqCst);
  model.vector_field(&model.initial_state(), 1.0).unwrap();

  assert_eq!(FORCING_CALLS.load(Ordering::SeqCst), 1);
}

#[test]
fn model_trait_matches_checked_evaluation() {
  let model = Lorenz84::new(
    Lorenz84Params::default(),
    TimeForcing::Cyclic,
    2,
  )
  .unwrap();
  let state = Lorenz84State::from_orbits(&[
    Vector3::new(1.0, 1.0, 1.0),
    Vector3::new(-0.5, 0.5, 1.25),
  ]);

  let mut dxdt = Lorenz84State::new();
  dxdt.zeros_as(&state);
  Model::derivative(&model, &state, &mut dxdt, &2.5);

  assert_eq!(dxdt, model.vector_field(&state, 2.5).unwrap());
}

#[test]
fn euler_step_is_state_plus_dt_derivative() {
  let model = Lorenz84::new(
    Lorenz84Params::default(),
    TimeForcing::Cyclic,
    2,
  )
  .unwrap();
  let mut state = Lorenz84State::from_orbits(&[
    Vector3::new(1.0, 1.0, 1.0),
    Vector3::new(-0.5, 0.5, 1.25),
  ]);
  let initial = state.clone();
  let dxdt = model.vector_field(&state, 0.0).unwrap();

  let mut integrator = Euler::new(EulerSettings {});
  let mut time = 0.0;
  let time_step = 0.01;
  integrator.step(&model, &mut state, &mut time, &time_step);

  assert_float_eq!(time, time_step);
  for ((updated, start), derivative) in
    (&state).into_iter().zip(&initial).zip(&dxdt)
  {
    assert_float_eq!(*updated, *start + *derivative * time_step);
  }
}

#[test]
fn integrators_advance_time_and_stay_finite() {
  for integrator_type in [
    IntegratorType::Euler(EulerSettings {}),
    IntegratorType::Midpoint(MidpointSettings {}),
    IntegratorType::RK4(RK4Settings {}),
  ]
  .iter()
  {
    let model = Lorenz84::new(
      Lorenz84Params::default(),
      TimeForcing::Cyclic,
      2,
    )
    .unwrap();
    let mut state = Lorenz84State::from_orbits(&[
      Vector3::new(1.0, 1.0, 1.0),
      Vector3::new(-0.5, 0.5, 1.25),
    ]);

    let mut integrator = SwappableIntegrator::new(integrator_type.clone());
    let mut time = 0.0;
    integrator.n_steps(&model, &mut state, &mut time, &0.01, 100);

    assert_float_eq!(time, 1.0);
    for value in &state {
      assert!(value.is_finite());
    }
  }
}

#[cfg(test)]
proptest! {
#[test]
fn packed_layout_roundtrip(
  orbits in prop::collection::vec(prop::array::uniform3(-3.0f64..3.0), 1..6),
) {
  let orbits: Vec<_> = orbits.into_iter().map(Vector3::from).collect();
  let state = Lorenz84State::from_orbits(&orbits);

  prop_assert_eq!(state.len(), orbits.len() * STATE_DIM);
  prop_assert_eq!(state.n_orbits(), orbits.len());

  for (i, orbit) in orbits.iter().enumerate() {
    prop_assert_eq!(state.orbit(i), *orbit);
    for k in 0..STATE_DIM {
      prop_assert_eq!(state.as_slice()[i * STATE_DIM + k], orbit[k]);
    }
  }
}

#[test]
fn set_orbit_only_touches_its_slot(
  orbits in prop::collection::vec(prop::array::uniform3(-3.0f64..3.0), 2..5),
  replacement in prop::array::uniform3(-3.0f64..3.0),
) {
  let orbits: Vec<_> = orbits.into_iter().map(Vector3::from).collect();
  let replacement = Vector3::from(replacement);

  let mut state = Lorenz84State::from_orbits(&orbits);
  state.set_orbit(1, replacement);

  prop_assert_eq!(state.orbit(1), replacement);
  for (i, orbit) in orbits.iter().enumerate() {
    if i != 1 {
      prop_assert_eq!(state.orbit(i), *orbit);
    }
  }
}

#[test]
fn orbits_evolve_independently(
  orbit_0 in prop::array::uniform3(-3.0f64..3.0),
  orbit_1 in prop::array::uniform3(-3.0f64..3.0),
  t in -100.0f64..8000.0,
  forcing_option: ForcingOptions,
) {
  let params = Lorenz84Params::default();
  let forcing = forcing_option.forcing();
  let orbit_0 = Vector3::from(orbit_0);
  let orbit_1 = Vector3::from(orbit_1);

  let model = Lorenz84::new(params, forcing, 2).unwrap();
  let dxdt = model
    .vector_field(&Lorenz84State::from_orbits(&[orbit_0, orbit_1]), t)
    .unwrap();

  prop_assert_eq!(
    dxdt.orbit(0),
    single_orbit_vector_field(&params, forcing, orbit_0, t)
  );
  prop_assert_eq!(
    dxdt.orbit(1),
    single_orbit_vector_field(&params, forcing, orbit_1, t)
  );
}

#[test]
fn evaluation_is_pure(
  orbits in prop::collection::vec(prop::array::uniform3(-3.0f64..3.0), 1..5),
  t in -1.0e3f64..1.0e4,
  forcing_option: ForcingOptions,
) {
  let orbits: Vec<_> = orbits.into_iter().map(Vector3::from).collect();
  let model = Lorenz84::new(
    Lorenz84Params::default(),
    forcing_option.forcing(),
    orbits.len(),
  )
  .unwrap();
  let state = Lorenz84State::from_orbits(&orbits);

  let first = model.vector_field(&state, t).unwrap();
  let second = model.vector_field(&state, t).unwrap();

  prop_assert_eq!(&first, &second);
  prop_assert_eq!(first.len(), state.len());
  prop_assert_eq!(&state, &Lorenz84State::from_orbits(&orbits));
}
}
