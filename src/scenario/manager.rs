//! Holds the current scenario and derives ready-to-run states from it

use super::{
    Scenario, ScenarioError, validate_mass, validate_time_scale_factor, validate_total_mass,
};
use crate::physics::math::{GRAVITATIONAL_CONSTANT, Scalar, sphere_diameter};
use crate::physics::state::StateVector;
use bevy::log::debug;

/// Average body density in kg/m³ used when a scenario has no densities
pub const AVERAGE_DENSITY: Scalar = 1410.0;

/// Margin added to the largest initial distance so the outermost body is not
/// drawn on the edge of the screen
pub const LARGEST_DISTANCE_PADDING: Scalar = 2e11;

#[derive(Debug, Clone)]
pub struct InitialConditions {
    scenario: Scenario,
    /// Masses and time scale as loaded, before any input-layer changes
    default_masses: Vec<Scalar>,
    default_time_scale_factor: Scalar,
    average_density: Scalar,
    largest_distance_padding: Scalar,
}

impl InitialConditions {
    pub fn new(scenario: Scenario) -> Result<Self, ScenarioError> {
        scenario.validate()?;

        Ok(Self {
            default_masses: scenario.masses.clone(),
            default_time_scale_factor: scenario.time_scale_factor,
            scenario,
            average_density: AVERAGE_DENSITY,
            largest_distance_padding: LARGEST_DISTANCE_PADDING,
        })
    }

    pub fn with_average_density(mut self, average_density: Scalar) -> Self {
        self.average_density = average_density;
        self
    }

    pub fn with_largest_distance_padding(mut self, padding: Scalar) -> Self {
        self.largest_distance_padding = padding;
        self
    }

    /// Replace the held scenario. The simulation state is left alone; callers
    /// reset it explicitly.
    pub fn change_initial_conditions(&mut self, scenario: Scenario) -> Result<(), ScenarioError> {
        scenario.validate()?;

        debug!(
            "Changing initial conditions to '{}' with {} bodies",
            scenario.name,
            scenario.body_count()
        );

        self.default_masses = scenario.masses.clone();
        self.default_time_scale_factor = scenario.time_scale_factor;
        self.scenario = scenario;
        Ok(())
    }

    /// Cartesian state with the barycenter at rest at the origin
    pub fn reset_state_to_initial_conditions(&self) -> StateVector {
        let mut state = StateVector::from_bodies(
            self.scenario
                .positions
                .iter()
                .zip(&self.scenario.velocities)
                .map(|(position, velocity)| (position.to_cartesian(), velocity.to_cartesian())),
        );

        state.center_on_barycenter(&self.scenario.masses);
        state
    }

    /// Diameters in meters, from mass and density
    pub fn calculate_diameters(&self) -> Vec<Scalar> {
        self.scenario
            .masses
            .iter()
            .enumerate()
            .map(|(body, &mass)| sphere_diameter(mass, self.density(body)))
            .collect()
    }

    /// Largest initial distance from the origin plus padding, for display scaling
    pub fn largest_distance_meters(&self) -> Scalar {
        let largest = self
            .scenario
            .positions
            .iter()
            .map(|position| position.r.abs())
            .fold(0.0, Scalar::max);

        largest + self.largest_distance_padding
    }

    pub fn set_mass(&mut self, body: usize, mass: Scalar) -> Result<(), ScenarioError> {
        let body_count = self.body_count();
        if body >= body_count {
            return Err(ScenarioError::UnknownBody { body, body_count });
        }
        validate_mass(body, mass)?;

        let remaining: Scalar = self
            .scenario
            .masses
            .iter()
            .enumerate()
            .filter(|&(other, _)| other != body)
            .map(|(_, mass)| mass)
            .sum();
        validate_total_mass(remaining + mass)?;

        self.scenario.masses[body] = mass;
        Ok(())
    }

    pub fn set_time_scale_factor(&mut self, value: Scalar) -> Result<(), ScenarioError> {
        validate_time_scale_factor(value)?;
        self.scenario.time_scale_factor = value;
        Ok(())
    }

    /// Set a mass from a slider position using the scenario's mass slider
    pub fn set_mass_from_slider(
        &mut self,
        body: usize,
        position: Scalar,
    ) -> Result<Scalar, ScenarioError> {
        let default_mass = self
            .default_masses
            .get(body)
            .copied()
            .ok_or(ScenarioError::UnknownBody {
                body,
                body_count: self.body_count(),
            })?;

        let mass = self.scenario.mass_slider.value_at(position, default_mass);
        self.set_mass(body, mass)?;
        Ok(mass)
    }

    /// Set the time scale factor from a slider position
    pub fn set_time_scale_factor_from_slider(
        &mut self,
        position: Scalar,
    ) -> Result<Scalar, ScenarioError> {
        let value = self
            .scenario
            .time_scale_factor_slider
            .value_at(position, self.default_time_scale_factor);

        self.set_time_scale_factor(value)?;
        Ok(value)
    }

    pub fn gravitational_constant(&self) -> Scalar {
        if self.scenario.dimensionless {
            1.0
        } else {
            GRAVITATIONAL_CONSTANT
        }
    }

    #[inline]
    pub fn masses(&self) -> &[Scalar] {
        &self.scenario.masses
    }

    #[inline]
    pub fn time_scale_factor(&self) -> Scalar {
        self.scenario.time_scale_factor
    }

    #[inline]
    pub fn body_count(&self) -> usize {
        self.scenario.body_count()
    }

    pub fn body_name(&self, body: usize) -> String {
        self.scenario.body_name(body)
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    fn density(&self, body: usize) -> Scalar {
        self.scenario
            .densities
            .as_ref()
            .and_then(|densities| densities.get(body).copied())
            .unwrap_or(self.average_density)
    }
}
