//! Captions for slider values and telemetry

use crate::physics::math::Scalar;
use std::fmt;

/// Values above this are shown in exponential notation
const EXPONENTIAL_THRESHOLD: Scalar = 10000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Year,
    Century,
}

impl TimeUnit {
    /// The next larger unit and how many of `self` it holds
    fn promotion(self) -> Option<(TimeUnit, Scalar)> {
        match self {
            TimeUnit::Second => Some((TimeUnit::Minute, 60.0)),
            TimeUnit::Minute => Some((TimeUnit::Hour, 60.0)),
            TimeUnit::Hour => Some((TimeUnit::Day, 24.0)),
            TimeUnit::Day => Some((TimeUnit::Year, 365.0)),
            TimeUnit::Year => Some((TimeUnit::Century, 100.0)),
            TimeUnit::Century => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Year => "year",
            TimeUnit::Century => "century",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumanTime {
    pub value: Scalar,
    pub unit: TimeUnit,
}

/// Express a duration in the largest unit that keeps the value above one
pub fn humanize_time(seconds: Scalar) -> HumanTime {
    let mut time = HumanTime {
        value: seconds,
        unit: TimeUnit::Second,
    };

    while let Some((unit, size)) = time.unit.promotion() {
        if time.value < size {
            break;
        }
        time.value /= size;
        time.unit = unit;
    }

    time
}

/// Caption for the time scale slider, e.g. `Speed: 1.0000 year per second`
pub fn format_time_scale(time_scale_factor: Scalar) -> String {
    let time = humanize_time(time_scale_factor);
    let value = if time.value > EXPONENTIAL_THRESHOLD {
        format!("{:.2e}", time.value)
    } else {
        format!("{:.4}", round_to_four_decimals(time.value))
    };

    format!("Speed: {value} {} per second", time.unit)
}

/// Caption for a mass slider, e.g. `Mass of Mars : 6.4171e23 kg`
pub fn format_mass(body_name: &str, mass: Scalar, dimensionless: bool) -> String {
    let value = if mass > EXPONENTIAL_THRESHOLD {
        format!("{mass:.4e}")
    } else {
        format!("{:.4}", round_to_four_decimals(mass))
    };

    let mut caption = format!("Mass of {body_name} : {value}");
    if !dimensionless {
        caption.push_str(" kg");
    }
    caption
}

fn round_to_four_decimals(value: Scalar) -> Scalar {
    libm::round(value * 10000.0) / 10000.0
}
