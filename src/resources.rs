use crate::simulation::Simulation;
use bevy::prelude::*;

#[derive(Resource, Deref, DerefMut)]
pub struct SimulationSession(pub Simulation);
