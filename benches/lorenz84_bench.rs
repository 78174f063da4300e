use chaoskit::lorenz84::{
  forcing::DEFAULT_RAMP_START, Lorenz84, Lorenz84Params, Lorenz84State,
  TimeForcing,
};
use chaoskit::ode::{
  EulerSettings, Integrator, IntegratorType, MidpointSettings, RK4Settings,
  SwappableIntegrator,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Vector3;

fn model_for_orbits(n_orbits: usize) -> (Lorenz84, Lorenz84State) {
  let model = Lorenz84::new(
    Lorenz84Params::default(),
    TimeForcing::CyclicLinear {
      start_time: DEFAULT_RAMP_START,
    },
    n_orbits,
  )
  .expect("benches use a positive orbit count");

  let orbits: Vec<_> = (0..n_orbits)
    .map(|i| {
      let offset = i as f64 / n_orbits as f64;
      Vector3::new(1.0 + offset, 1.0 - offset, 0.5 * offset)
    })
    .collect();

  (model, Lorenz84State::from_orbits(&orbits))
}

fn vector_field(c: &mut Criterion) {
  for n_orbits in [1usize, 10, 100, 1000].iter() {
    let (model, state) = model_for_orbits(*n_orbits);

    c.bench_function(&format!("vector field x {}", n_orbits), |b| {
      b.iter(|| model.vector_field(black_box(&state), black_box(36.5)))
    });
  }
}

fn integrator(c: &mut Criterion) {
  for integrator_type in [
    IntegratorType::Euler(EulerSettings {}),
    IntegratorType::Midpoint(MidpointSettings {}),
    IntegratorType::RK4(RK4Settings {}),
  ]
  .iter()
  {
    for n_orbits in [1usize, 10, 100, 1000].iter() {
      let (model, mut state) = model_for_orbits(*n_orbits);
      let mut integrator = SwappableIntegrator::new(integrator_type.clone());

      let mut time = 0.0;
      let time_step = 0.01;

      c.bench_function(
        &format!("integrator {:?} x {}", integrator_type, n_orbits),
        |b| {
          b.iter(|| {
            integrator.step(&model, &mut state, &mut time, &time_step)
          })
        },
      );
    }
  }
}

criterion_group!(benches, vector_field, integrator);
criterion_main!(benches);
