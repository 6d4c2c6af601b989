//! Newtonian gravitation between every pair of bodies

use crate::physics::integrators::DerivativeField;
use crate::physics::math::{Scalar, Vector};
use crate::physics::state::STRIDE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    #[inline]
    pub fn component(self, vector: Vector) -> Scalar {
        match self {
            Axis::X => vector.x,
            Axis::Y => vector.y,
        }
    }
}

/// Gravitational field produced by a set of point masses
///
/// Masses are indexed in the same order as the bodies of the state vector the
/// field is evaluated against. Two bodies at exactly the same position divide
/// by zero and produce non-finite accelerations; the simulation driver checks
/// for that after every step.
#[derive(Debug, Clone, Copy)]
pub struct Gravitation<'a> {
    masses: &'a [Scalar],
    gravitational_constant: Scalar,
}

impl<'a> Gravitation<'a> {
    pub fn new(masses: &'a [Scalar], gravitational_constant: Scalar) -> Self {
        Self {
            masses,
            gravitational_constant,
        }
    }

    pub fn gravitational_constant(&self) -> Scalar {
        self.gravitational_constant
    }

    /// Acceleration on `body` from every other body
    pub fn acceleration_vector(&self, state: &[Scalar], body: usize) -> Vector {
        let position = position_at(state, body);

        self.masses
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != body)
            .fold(Vector::ZERO, |acceleration, (other, &mass)| {
                let displacement = position_at(state, other) - position;
                let distance = libm::sqrt(
                    displacement.x * displacement.x + displacement.y * displacement.y,
                );

                // |d| / r³ carries the inverse-square law without normalizing d
                acceleration
                    + displacement * (self.gravitational_constant * mass
                        / (distance * distance * distance))
            })
    }

    /// One axis component of the acceleration on `body`
    pub fn acceleration(&self, state: &[Scalar], body: usize, axis: Axis) -> Scalar {
        axis.component(self.acceleration_vector(state, body))
    }
}

impl DerivativeField for Gravitation<'_> {
    /// `[vx, vy, ax, ay]` for every body
    fn derivative(&self, state: &[Scalar]) -> Vec<Scalar> {
        let mut derivative = vec![0.0; state.len()];

        for (body, du) in derivative.chunks_exact_mut(STRIDE).enumerate() {
            let start = body * STRIDE;
            let acceleration = self.acceleration_vector(state, body);

            du[0] = state[start + 2];
            du[1] = state[start + 3];
            du[2] = acceleration.x;
            du[3] = acceleration.y;
        }

        derivative
    }
}

#[inline]
fn position_at(state: &[Scalar], body: usize) -> Vector {
    let start = body * STRIDE;
    Vector::new(state[start], state[start + 1])
}
