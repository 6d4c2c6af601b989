//! Runge-Kutta integration methods

use super::{DerivativeField, Integrator};
use crate::physics::math::Scalar;

/// Fourth-order Runge-Kutta integrator (RK4)
///
/// A classic multi-stage integrator that provides fourth-order accuracy
/// by combining four intermediate evaluations of the derivative.
///
/// The RK4 algorithm:
/// 1. k1 = f(u)
/// 2. k2 = f(u + k1*dt/2)
/// 3. k3 = f(u + k2*dt/2)
/// 4. k4 = f(u + k3*dt)
/// 5. u(t+dt) = u(t) + dt/6 * (k1 + 2*k2 + 2*k3 + k4)
///
/// Written as a loop over the stages: each derivative is accumulated with
/// its `weight` and seeds the next stage at `offset` from the saved state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKuttaFourthOrder;

impl Integrator for RungeKuttaFourthOrder {
    fn clone_box(&self) -> Box<dyn Integrator> {
        Box::new(*self)
    }

    fn step(&self, state: &mut [Scalar], field: &dyn DerivativeField, dt: Scalar) {
        let offsets = [dt / 2.0, dt / 2.0, dt, 0.0];
        let weights = [dt / 6.0, dt / 3.0, dt / 3.0, dt / 6.0];

        let initial = state.to_vec();
        let mut stage = state.to_vec();
        let mut accumulated = vec![0.0; state.len()];

        for (offset, weight) in offsets.into_iter().zip(weights) {
            let derivative = field.derivative(&stage);
            debug_assert_eq!(derivative.len(), state.len());

            for (i, du) in derivative.into_iter().enumerate() {
                stage[i] = initial[i] + offset * du;
                accumulated[i] += weight * du;
            }
        }

        for ((value, start), delta) in state.iter_mut().zip(&initial).zip(&accumulated) {
            *value = start + delta;
        }
    }

    fn convergence_order(&self) -> usize {
        4
    }

    fn name(&self) -> &'static str {
        "runge_kutta_fourth_order"
    }
}
