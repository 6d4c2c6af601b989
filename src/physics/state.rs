//! Flat state vector for the whole system
//!
//! Bodies are laid out as repeating `[x, y, vx, vy]` groups so the integrator
//! can treat the system as one array of reals. Body `i` always occupies
//! `u[4i..4i + 4]`.

use crate::physics::math::{Scalar, Vector};

/// Number of reals stored per body
pub const STRIDE: usize = 4;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct StateVector(Vec<Scalar>);

impl StateVector {
    pub fn zeros(body_count: usize) -> Self {
        Self(vec![0.0; body_count * STRIDE])
    }

    pub fn from_bodies(bodies: impl IntoIterator<Item = (Vector, Vector)>) -> Self {
        Self(
            bodies
                .into_iter()
                .flat_map(|(position, velocity)| [position.x, position.y, velocity.x, velocity.y])
                .collect(),
        )
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.0.len() / STRIDE
    }

    #[inline]
    pub fn position(&self, body: usize) -> Vector {
        let start = body * STRIDE;
        Vector::new(self.0[start], self.0[start + 1])
    }

    #[inline]
    pub fn velocity(&self, body: usize) -> Vector {
        let start = body * STRIDE;
        Vector::new(self.0[start + 2], self.0[start + 3])
    }

    pub fn set_body(&mut self, body: usize, position: Vector, velocity: Vector) {
        let start = body * STRIDE;
        self.0[start..start + STRIDE].copy_from_slice(&[
            position.x, position.y, velocity.x, velocity.y,
        ]);
    }

    pub fn positions(&self) -> Vec<Vector> {
        (0..self.body_count()).map(|body| self.position(body)).collect()
    }

    pub fn velocities(&self) -> Vec<Vector> {
        (0..self.body_count()).map(|body| self.velocity(body)).collect()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Scalar] {
        &self.0
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Scalar] {
        &mut self.0
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|value| value.is_finite())
    }

    /// Mass-weighted average position, `None` when the total mass is unusable
    pub fn barycenter(&self, masses: &[Scalar]) -> Option<Vector> {
        weighted_average(masses, (0..self.body_count()).map(|body| self.position(body)))
    }

    /// Mass-weighted average velocity, `None` when the total mass is unusable
    pub fn barycentric_velocity(&self, masses: &[Scalar]) -> Option<Vector> {
        weighted_average(masses, (0..self.body_count()).map(|body| self.velocity(body)))
    }

    /// Shift every body so the barycenter sits at the origin and does not move
    pub fn center_on_barycenter(&mut self, masses: &[Scalar]) {
        let (Some(barycenter), Some(barycentric_velocity)) = (
            self.barycenter(masses),
            self.barycentric_velocity(masses),
        ) else {
            return;
        };

        for body in 0..self.body_count() {
            let position = self.position(body) - barycenter;
            let velocity = self.velocity(body) - barycentric_velocity;
            self.set_body(body, position, velocity);
        }
    }
}

/// A total mass the barycenter can be divided by
#[inline]
pub fn is_valid_total_mass(total_mass: Scalar) -> bool {
    total_mass > 0.0 && total_mass.is_finite()
}

fn weighted_average(masses: &[Scalar], values: impl Iterator<Item = Vector>) -> Option<Vector> {
    let (weighted_sum, total_mass): (Vector, Scalar) = values
        .zip(masses)
        .fold((Vector::ZERO, 0.0), |(sum, total), (value, &mass)| {
            (sum + value * mass, total + mass)
        });

    if !is_valid_total_mass(total_mass) {
        return None;
    }

    Some(weighted_sum / total_mass)
}
