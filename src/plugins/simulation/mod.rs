//! Simulation plugin - Self-contained plugin pattern
//!
//! Wraps a [`Simulation`] session in a resource, advances it once per
//! `Update`, and bridges it to the rest of the app through events: commands
//! from the input layer come in, trail samples, frames, display metrics and
//! halts go out.

use crate::physics::state::StateVector;
use crate::prelude::*;
use crate::scenario::{InitialConditions, ScenarioError};
use crate::simulation::FrameSettings;

mod actions;

pub use actions::display_metrics;
use actions::{emit_initial_display_metrics, handle_simulation_commands};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Commands,
    Advance,
}

pub struct SimulationPlugin {
    config: SimulationConfig,
    initial_conditions: InitialConditions,
}

impl SimulationPlugin {
    /// Validates the scenario and applies the configured overrides to it
    pub fn new(config: SimulationConfig, scenario: Scenario) -> Result<Self, ScenarioError> {
        let mut initial_conditions = InitialConditions::new(scenario)?
            .with_average_density(config.physics.average_density)
            .with_largest_distance_padding(config.rendering.largest_distance_padding);

        if let Some(time_scale_factor) = config.scenario.time_scale_factor {
            initial_conditions.set_time_scale_factor(time_scale_factor)?;
        }

        Ok(Self {
            config,
            initial_conditions,
        })
    }

    fn frame_settings(&self) -> FrameSettings {
        self.config.physics.frame_settings()
    }
}

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        match toml::to_string_pretty(&self.config) {
            Ok(toml_string) => {
                debug!("=== Current Configuration (TOML) ===\n{}", toml_string);
                debug!("=== End Configuration ===");
            }
            Err(e) => {
                error!("Failed to serialize configuration to TOML: {}", e);
            }
        }

        info!(
            "Simulating '{}' with {} bodies, {} steps per frame at {} frames per second",
            self.initial_conditions.scenario().name,
            self.initial_conditions.body_count(),
            self.frame_settings().steps_per_frame,
            self.frame_settings().frames_per_second,
        );

        app.insert_resource(self.config.clone());
        app.insert_resource(SimulationSession(Simulation::new(
            self.initial_conditions.clone(),
            self.frame_settings(),
        )));

        app.add_event::<SimulationCommand>();
        app.add_event::<TrailSampled>();
        app.add_event::<FrameAdvanced>();
        app.add_event::<DisplayMetricsChanged>();
        app.add_event::<SimulationHalted>();

        app.init_state::<AppState>();

        app.configure_sets(
            Update,
            (SimulationSet::Commands, SimulationSet::Advance).chain(),
        );

        app.add_systems(Startup, emit_initial_display_metrics);
        app.add_systems(
            Update,
            (
                handle_simulation_commands.in_set(SimulationSet::Commands),
                advance_simulation
                    .in_set(SimulationSet::Advance)
                    .run_if(in_state(AppState::Running)),
            ),
        );
    }
}

/// Forwards frame observations to Bevy events
struct EventObserver<'a, 't, 'f> {
    frame: u64,
    trails: &'a mut EventWriter<'t, TrailSampled>,
    frames: &'a mut EventWriter<'f, FrameAdvanced>,
}

impl FrameObserver for EventObserver<'_, '_, '_> {
    fn trail_sampled(&mut self, step: usize, state: &StateVector) {
        self.trails.write(TrailSampled {
            frame: self.frame,
            step,
            positions: state.positions(),
        });
    }

    fn frame_completed(&mut self, report: &FrameReport, state: &StateVector) {
        self.frames.write(FrameAdvanced {
            frame: report.frame,
            elapsed: report.elapsed,
            positions: state.positions(),
        });
    }
}

pub fn advance_simulation(
    mut session: ResMut<SimulationSession>,
    mut trails: EventWriter<TrailSampled>,
    mut frames: EventWriter<FrameAdvanced>,
    mut halts: EventWriter<SimulationHalted>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let mut observer = EventObserver {
        frame: session.frame() + 1,
        trails: &mut trails,
        frames: &mut frames,
    };

    match session.advance_one_frame(&mut observer) {
        Ok(_) => {}
        Err(err @ (SimulationError::NonFiniteState { .. } | SimulationError::Halted)) => {
            halts.write(SimulationHalted {
                reason: err.to_string(),
            });
            next_state.set(AppState::Halted);
        }
        Err(err) => {
            error!("Failed to advance simulation: {err}");
        }
    }
}
