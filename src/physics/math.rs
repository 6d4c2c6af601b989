use serde::{Deserialize, Serialize};

/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions and velocities
pub type Vector = bevy::math::DVec2;

pub const PI: Scalar = std::f64::consts::PI;

/// Newtonian gravitational constant in m³·kg⁻¹·s⁻²
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.67408e-11;

/// A point in polar form. `r` is meters for positions and meters per second
/// for velocities; `theta` is in radians.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct PolarCoordinate {
    pub r: Scalar,
    pub theta: Scalar,
}

impl PolarCoordinate {
    pub const fn new(r: Scalar, theta: Scalar) -> Self {
        Self { r, theta }
    }

    pub fn from_cartesian(vector: Vector) -> Self {
        Self {
            r: libm::sqrt(vector.x * vector.x + vector.y * vector.y),
            theta: libm::atan2(vector.y, vector.x),
        }
    }

    #[inline]
    pub fn to_cartesian(self) -> Vector {
        Vector::new(
            self.r * libm::cos(self.theta),
            self.r * libm::sin(self.theta),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.r.is_finite() && self.theta.is_finite()
    }
}

/// Diameter of a uniform sphere with the given mass and density.
///
/// Solves `density = mass / (4/3 π r³)` for `r`.
pub fn sphere_diameter(mass: Scalar, density: Scalar) -> Scalar {
    2.0 * libm::cbrt(3.0 * mass / (4.0 * PI * density))
}
