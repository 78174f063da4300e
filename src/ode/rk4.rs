use crate::ode::{Integrator, Model, ModelState, NullSettings};

pub type RK4Settings = NullSettings;

pub struct RK4<M: Model>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  dxdt: M::State,
  stage_state: M::State,
  k: [M::State; 4],
}

impl<M: Model> Integrator<M> for RK4<M>
where
  for<'a> &'a M::State: IntoIterator<Item = &'a M::S>,
  for<'a> &'a mut M::State: IntoIterator<Item = &'a mut M::S>,
{
  type Settings = RK4Settings;

  fn new(_: Self::Settings) -> Self {
    Self {
      dxdt: M::State::new(),
      stage_state: M::State::new(),
      k: [
        M::State::new(),
        M::State::new(),
        M::State::new(),
        M::State::new(),
      ],
    }
  }

  fn step_internal(
    &mut self,
    model: &M,
    state: &mut M::State,
    time: &M::S,
    time_step: &M::S,
  ) {
    let half: M::S = 0.5.into();

    self.dxdt.zeros_as(state);
    model.derivative(&*state, &mut self.dxdt, time);
    self.k[0].zeros_as(state);
    for (k, dxdt) in (&mut self.k[0]).into_iter().zip(&self.dxdt) {
      *k = *time_step * *dxdt;
    }

    // stages 2-4 evaluate at an offset along the previous stage's slope
    let stage_offsets: [(M::S, usize); 3] =
      [(half, 0), (half, 1), (1.0.into(), 2)];
    for &(offset, prev) in stage_offsets.iter() {
      self.stage_state.zeros_as(state);
      for ((stage, start), k) in (&mut self.stage_state)
        .into_iter()
        .zip(&*state)
        .zip(&self.k[prev])
      {
        *stage = *start + offset * *k;
      }

      self.dxdt.zeros_as(state);
      model.derivative(
        &self.stage_state,
        &mut self.dxdt,
        &(*time + offset * *time_step),
      );

      self.k[prev + 1].zeros_as(state);
      for (k, dxdt) in (&mut self.k[prev + 1]).into_iter().zip(&self.dxdt) {
        *k = *time_step * *dxdt;
      }
    }

    let two: M::S = 2.0.into();
    let sixth = (1.0 / 6.0).into();

    for ((((state, k_1), k_2), k_3), k_4) in state
      .into_iter()
      .zip(&self.k[0])
      .zip(&self.k[1])
      .zip(&self.k[2])
      .zip(&self.k[3])
    {
      *state += (*k_1 + two * *k_2 + two * *k_3 + *k_4) * sixth;
    }
  }
}
