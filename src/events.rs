//! Centralized event definitions
//!
//! Events are the boundary between the simulation and its collaborators:
//! the input layer writes [`SimulationCommand`]s, the renderer reads the
//! remaining events.

use crate::physics::math::{Scalar, Vector};
use bevy::prelude::*;

// Unified simulation command pattern
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SimulationCommand {
    Restart,
    TogglePause,
    SetMass { body: usize, mass: Scalar },
    SetTimeScaleFactor(Scalar),
    /// Slider position in `[0, 1]`
    SetMassFromSlider { body: usize, position: Scalar },
    SetTimeScaleFactorFromSlider(Scalar),
    LoadScenario(String),
}

/// Intermediate positions for orbit trails
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TrailSampled {
    pub frame: u64,
    pub step: usize,
    pub positions: Vec<Vector>,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct FrameAdvanced {
    pub frame: u64,
    /// Simulated seconds since the last reset
    pub elapsed: Scalar,
    pub positions: Vec<Vector>,
}

/// Sent on startup, restart, scenario switch and mass change
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DisplayMetricsChanged {
    pub diameters: Vec<Scalar>,
    pub largest_distance_meters: Scalar,
    pub pale_orbital_paths: bool,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub struct SimulationHalted {
    pub reason: String,
}
