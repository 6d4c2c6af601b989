//! Cycler prelude module
//!
//! Re-exports the types most systems and tests need.

// External crate re-exports
pub use bevy::prelude::*;

pub use crate::physics::math::{Scalar, Vector};

// Internal re-exports - Config
pub use crate::config::SimulationConfig;

// Internal re-exports - States
pub use crate::states::AppState;

// Internal re-exports - Resources
pub use crate::resources::SimulationSession;

// Internal re-exports - Events
pub use crate::events::{
    DisplayMetricsChanged, FrameAdvanced, SimulationCommand, SimulationHalted, TrailSampled,
};

// Internal re-exports - Simulation
pub use crate::scenario::{Scenario, ScenarioCatalog};
pub use crate::simulation::{FrameObserver, FrameReport, Simulation, SimulationError};
