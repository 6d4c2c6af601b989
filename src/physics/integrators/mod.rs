//! Numerical integration methods for the orbital simulation
//!
//! Integrators advance a flat state vector (see [`crate::physics::state`]) by a
//! fixed time step. They never look at the layout of the state; all physics
//! lives behind the [`DerivativeField`] they are handed.

use crate::physics::math::Scalar;

pub mod runge_kutta;

pub use runge_kutta::RungeKuttaFourthOrder;

/// Time derivative of a state vector
///
/// Implementors return `du/dt` evaluated at `state`. The returned vector must
/// have the same length as `state`.
pub trait DerivativeField {
    fn derivative(&self, state: &[Scalar]) -> Vec<Scalar>;
}

impl<F> DerivativeField for F
where
    F: Fn(&[Scalar]) -> Vec<Scalar>,
{
    fn derivative(&self, state: &[Scalar]) -> Vec<Scalar> {
        self(state)
    }
}

/// Base trait for all integrators
pub trait Integrator: Send + Sync {
    /// Clone this integrator into a new box
    fn clone_box(&self) -> Box<dyn Integrator>;

    /// Advance `state` in place by one step of length `dt`
    ///
    /// # Arguments
    /// * `state` - Mutable state vector
    /// * `field` - Derivative of the state
    /// * `dt` - Time step; negative values integrate backward
    fn step(&self, state: &mut [Scalar], field: &dyn DerivativeField, dt: Scalar);

    /// Global order of accuracy
    fn convergence_order(&self) -> usize;

    fn name(&self) -> &'static str;
}

impl Clone for Box<dyn Integrator> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl std::fmt::Debug for dyn Integrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integrator")
            .field("name", &self.name())
            .field("order", &self.convergence_order())
            .finish()
    }
}
