//! Scenario definitions and initial conditions
//!
//! A [`Scenario`] is a plain data record describing the bodies of a
//! simulation at time zero. It is validated once when loaded; everything
//! downstream assumes a valid scenario.

use crate::physics::math::{PolarCoordinate, Scalar};
use crate::physics::state::is_valid_total_mass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub mod catalog;
pub mod manager;
pub mod slider;

pub use catalog::ScenarioCatalog;
pub use manager::InitialConditions;
pub use slider::SliderSettings;

/// Errors raised while loading or mutating a scenario
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// The scenario has no bodies
    Empty,
    /// A per-body list does not have one entry per body
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    /// A mass is negative or not finite
    InvalidMass { body: usize, mass: Scalar },
    /// The masses add up to zero or overflow, so the barycenter is undefined
    InvalidTotalMass(Scalar),
    /// A density is not a positive finite number
    InvalidDensity { body: usize, density: Scalar },
    /// A polar position or velocity contains a non-finite value
    NonFiniteCoordinate { field: &'static str, body: usize },
    /// The time scale factor is negative or not finite
    InvalidTimeScaleFactor(Scalar),
    /// A slider range is empty or has a zero power
    InvalidSlider(&'static str),
    /// A body index outside the scenario
    UnknownBody { body: usize, body_count: usize },
    /// No scenario with this name in the catalog
    UnknownScenario(String),
    /// A scenario file could not be read or parsed
    Load(String),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::Empty => write!(f, "scenario has no bodies"),
            ScenarioError::LengthMismatch {
                field,
                expected,
                actual,
            } => write!(f, "expected {expected} {field}, found {actual}"),
            ScenarioError::InvalidMass { body, mass } => {
                write!(f, "body {body} has invalid mass {mass}")
            }
            ScenarioError::InvalidTotalMass(total) => {
                write!(f, "total mass of the system must be positive and finite, got {total}")
            }
            ScenarioError::InvalidDensity { body, density } => {
                write!(f, "body {body} has invalid density {density}")
            }
            ScenarioError::NonFiniteCoordinate { field, body } => {
                write!(f, "body {body} has a non-finite {field} coordinate")
            }
            ScenarioError::InvalidTimeScaleFactor(value) => {
                write!(f, "invalid time scale factor {value}")
            }
            ScenarioError::InvalidSlider(name) => write!(f, "invalid {name} slider settings"),
            ScenarioError::UnknownBody { body, body_count } => {
                write!(f, "body {body} does not exist, scenario has {body_count}")
            }
            ScenarioError::UnknownScenario(name) => {
                write!(
                    f,
                    "unknown scenario '{name}'. Available scenarios: {}",
                    ScenarioCatalog::names().join(", ")
                )
            }
            ScenarioError::Load(msg) => write!(f, "failed to load scenario: {msg}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Initial conditions of a simulation
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Scenario {
    pub name: String,
    /// Use G = 1 instead of the physical gravitational constant
    #[serde(default)]
    pub dimensionless: bool,
    pub masses: Vec<Scalar>,
    /// Per-body densities in kg/m³; the average density is used when absent
    #[serde(default)]
    pub densities: Option<Vec<Scalar>>,
    /// Simulated seconds per real-world second
    pub time_scale_factor: Scalar,
    #[serde(default)]
    pub pale_orbital_paths: bool,
    #[serde(default)]
    pub body_names: Vec<String>,
    pub positions: Vec<PolarCoordinate>,
    pub velocities: Vec<PolarCoordinate>,
    pub mass_slider: SliderSettings,
    pub time_scale_factor_slider: SliderSettings,
}

impl Scenario {
    #[inline]
    pub fn body_count(&self) -> usize {
        self.masses.len()
    }

    pub fn body_name(&self, body: usize) -> String {
        self.body_names
            .get(body)
            .cloned()
            .unwrap_or_else(|| format!("body {body}"))
    }

    /// Check the shape and values of the scenario
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let body_count = self.body_count();

        if body_count == 0 {
            return Err(ScenarioError::Empty);
        }

        check_length("positions", body_count, self.positions.len())?;
        check_length("velocities", body_count, self.velocities.len())?;

        if let Some(densities) = &self.densities {
            check_length("densities", body_count, densities.len())?;

            if let Some((body, &density)) = densities
                .iter()
                .enumerate()
                .find(|&(_, density)| !(density.is_finite() && *density > 0.0))
            {
                return Err(ScenarioError::InvalidDensity { body, density });
            }
        }

        if !self.body_names.is_empty() {
            check_length("body names", body_count, self.body_names.len())?;
        }

        for (body, &mass) in self.masses.iter().enumerate() {
            validate_mass(body, mass)?;
        }

        validate_total_mass(self.masses.iter().sum())?;

        if let Some(body) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(ScenarioError::NonFiniteCoordinate {
                field: "position",
                body,
            });
        }

        if let Some(body) = self.velocities.iter().position(|v| !v.is_finite()) {
            return Err(ScenarioError::NonFiniteCoordinate {
                field: "velocity",
                body,
            });
        }

        validate_time_scale_factor(self.time_scale_factor)?;

        if !self.mass_slider.is_valid() {
            return Err(ScenarioError::InvalidSlider("mass"));
        }

        if !self.time_scale_factor_slider.is_valid() {
            return Err(ScenarioError::InvalidSlider("time scale factor"));
        }

        Ok(())
    }

    /// Load and validate a scenario from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ScenarioError::Load(format!("{}: {e}", path.display())))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ScenarioError> {
        let scenario: Self =
            toml::from_str(content).map_err(|e| ScenarioError::Load(e.to_string()))?;
        scenario.validate()?;
        Ok(scenario)
    }
}

fn check_length(field: &'static str, expected: usize, actual: usize) -> Result<(), ScenarioError> {
    if expected != actual {
        return Err(ScenarioError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn validate_mass(body: usize, mass: Scalar) -> Result<(), ScenarioError> {
    if !mass.is_finite() || mass < 0.0 {
        return Err(ScenarioError::InvalidMass { body, mass });
    }
    Ok(())
}

pub(crate) fn validate_total_mass(total_mass: Scalar) -> Result<(), ScenarioError> {
    if !is_valid_total_mass(total_mass) {
        return Err(ScenarioError::InvalidTotalMass(total_mass));
    }
    Ok(())
}

pub(crate) fn validate_time_scale_factor(value: Scalar) -> Result<(), ScenarioError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ScenarioError::InvalidTimeScaleFactor(value));
    }
    Ok(())
}
