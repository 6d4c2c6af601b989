//! Orbital dynamics: state layout, gravitation and integration

pub mod gravitation;
pub mod integrators;
pub mod math;
pub mod state;
