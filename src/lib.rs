//! Cycler library
//!
//! Orbital mechanics for a small, fixed set of bodies: a classical
//! fourth-order Runge-Kutta integrator over a flat state vector, Newtonian
//! gravitation, scenario loading with barycenter correction, and a frame
//! driver exposed to Bevy through events.

pub mod cli;
pub mod config;
pub mod display;
pub mod events;
pub mod physics;
pub mod plugins;
pub mod prelude;
pub mod resources;
pub mod scenario;
pub mod simulation;
pub mod states;
pub mod utils;

// Test utilities are public for integration tests
pub mod test_utils;
