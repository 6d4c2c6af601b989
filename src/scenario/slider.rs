//! Slider range metadata for the input layer
//!
//! A slider reports a position between 0 and 1. The position is mapped onto
//! `[min, max]`, optionally through a power curve so that the slider is
//! coarse far from the default value and fine near it.
//!
//! With an odd power `p` the curve passes through the default value `d`
//! (normalized to `[0, 1]`):
//!
//! ```text
//! l = -d^(1/p)
//! a = (1 - d)^(1/p) - l
//! output(s) = (a·s + l)^p + d
//! ```
//!
//! so `output(0) = 0`, `output(1) = 1` and the curve is flat around `d`.
//! Even powers use `s^p`, no power is linear.

use crate::physics::math::Scalar;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct SliderSettings {
    pub min: Scalar,
    pub max: Scalar,
    pub power: Option<u32>,
}

impl SliderSettings {
    pub const fn new(min: Scalar, max: Scalar, power: Option<u32>) -> Self {
        Self { min, max, power }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.max > self.min && self.power != Some(0)
    }

    /// Value selected by a slider at `position`, rounded to four decimals
    pub fn value_at(&self, position: Scalar, default_value: Scalar) -> Scalar {
        let position = position.clamp(0.0, 1.0);

        let output = match self.power {
            Some(power) if power % 2 == 1 => {
                odd_power_output(self.normalize(default_value), position, power)
            }
            Some(power) => libm::pow(position, power as Scalar),
            None => position,
        };

        round_to_four_decimals(self.min + (self.max - self.min) * output)
    }

    /// Slider position that selects `value`
    pub fn position_of(&self, value: Scalar, default_value: Scalar) -> Scalar {
        let output = self.normalize(value);

        let position = match self.power {
            Some(power) if power % 2 == 1 => {
                odd_power_input(self.normalize(default_value), output, power)
            }
            Some(power) => libm::pow(output.max(0.0), 1.0 / power as Scalar),
            None => output,
        };

        position.clamp(0.0, 1.0)
    }

    fn normalize(&self, value: Scalar) -> Scalar {
        (value - self.min) / (self.max - self.min)
    }
}

fn curve_offset(default_output: Scalar, power: u32) -> Scalar {
    -libm::pow(default_output, 1.0 / power as Scalar)
}

fn curve_scale(default_output: Scalar, power: u32) -> Scalar {
    libm::pow(1.0 - default_output, 1.0 / power as Scalar) - curve_offset(default_output, power)
}

fn odd_power_output(default_output: Scalar, input: Scalar, power: u32) -> Scalar {
    let a = curve_scale(default_output, power);
    let l = curve_offset(default_output, power);

    // powi keeps the sign of a negative base for odd powers
    ((a * input + l).powi(power as i32) + default_output).max(0.0)
}

fn odd_power_input(default_output: Scalar, output: Scalar, power: u32) -> Scalar {
    let mut a = curve_scale(default_output, power);
    if a == 0.0 {
        a = 1.0;
    }
    let l = curve_offset(default_output, power);
    let delta = output - default_output;

    (delta.signum() * libm::pow(delta.abs(), 1.0 / power as Scalar) - l) / a
}

fn round_to_four_decimals(value: Scalar) -> Scalar {
    libm::round(value * 10000.0) / 10000.0
}
