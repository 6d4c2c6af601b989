//! Simulation session and frame driver
//!
//! A [`Simulation`] owns one scenario and the state vector derived from it.
//! Each call to [`Simulation::advance_one_frame`] runs a fixed number of
//! integration steps so numerical fidelity does not depend on how often the
//! screen is redrawn. Intermediate states are handed to a [`FrameObserver`]
//! at a lower cadence for orbit trails.

use crate::physics::gravitation::Gravitation;
use crate::physics::integrators::{Integrator, RungeKuttaFourthOrder};
use crate::physics::math::Scalar;
use crate::physics::state::StateVector;
use crate::scenario::{InitialConditions, Scenario, ScenarioError};
use bevy::log::{debug, error};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// The state became NaN or infinite, usually from two bodies colliding
    NonFiniteState { frame: u64, step: usize },
    /// A previous frame failed; the simulation must be reset
    Halted,
    Scenario(ScenarioError),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::NonFiniteState { frame, step } => write!(
                f,
                "state became non-finite at frame {frame}, step {step}; bodies probably collided"
            ),
            SimulationError::Halted => write!(f, "simulation is halted, reset to continue"),
            SimulationError::Scenario(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Scenario(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ScenarioError> for SimulationError {
    fn from(err: ScenarioError) -> Self {
        SimulationError::Scenario(err)
    }
}

/// How many integration steps run per displayed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSettings {
    /// Assumed display refresh rate
    pub frames_per_second: u32,
    pub steps_per_frame: usize,
    /// Upper bound on trail samples per frame
    pub draw_times_per_frame: usize,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            steps_per_frame: 250,
            draw_times_per_frame: 10,
        }
    }
}

impl FrameSettings {
    /// Simulated seconds advanced by one integration step
    pub fn step_size(&self, time_scale_factor: Scalar) -> Scalar {
        time_scale_factor / self.frames_per_second as Scalar / self.steps_per_frame as Scalar
    }

    /// A trail sample is taken on every step that is a multiple of this
    pub fn sample_interval(&self) -> usize {
        self.steps_per_frame
            .div_ceil(self.draw_times_per_frame.max(1))
            .max(1)
    }
}

/// Receives intermediate and final states while a frame is advanced
///
/// Observers only ever see the state by shared reference.
pub trait FrameObserver {
    /// Called after sampled integration steps, for orbit trails
    fn trail_sampled(&mut self, _step: usize, _state: &StateVector) {}

    /// Called once at the end of every successful frame
    fn frame_completed(&mut self, _report: &FrameReport, _state: &StateVector) {}
}

impl FrameObserver for () {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Number of frames completed since the last reset
    pub frame: u64,
    /// Simulated seconds since the last reset
    pub elapsed: Scalar,
    pub step_size: Scalar,
}

pub struct Simulation {
    initial_conditions: InitialConditions,
    state: StateVector,
    integrator: Box<dyn Integrator>,
    settings: FrameSettings,
    frame: u64,
    elapsed: Scalar,
    halted: bool,
}

impl Simulation {
    pub fn new(initial_conditions: InitialConditions, settings: FrameSettings) -> Self {
        let state = initial_conditions.reset_state_to_initial_conditions();

        Self {
            initial_conditions,
            state,
            integrator: Box::new(RungeKuttaFourthOrder),
            settings,
            frame: 0,
            elapsed: 0.0,
            halted: false,
        }
    }

    pub fn from_scenario(
        scenario: Scenario,
        settings: FrameSettings,
    ) -> Result<Self, ScenarioError> {
        Ok(Self::new(InitialConditions::new(scenario)?, settings))
    }

    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.integrator = integrator;
        self
    }

    /// Advance by `steps_per_frame` integration steps
    ///
    /// Fails fast when the state stops being finite; the session then stays
    /// halted until [`Simulation::reset`].
    pub fn advance_one_frame(
        &mut self,
        observer: &mut impl FrameObserver,
    ) -> Result<FrameReport, SimulationError> {
        if self.halted {
            return Err(SimulationError::Halted);
        }

        let step_size = self
            .settings
            .step_size(self.initial_conditions.time_scale_factor());
        let sample_interval = self.settings.sample_interval();
        let gravitation = Gravitation::new(
            self.initial_conditions.masses(),
            self.initial_conditions.gravitational_constant(),
        );

        for step in 0..self.settings.steps_per_frame {
            self.integrator
                .step(self.state.as_mut_slice(), &gravitation, step_size);

            if !self.state.is_finite() {
                self.halted = true;
                error!(
                    "Simulation halted at frame {}, step {step}: state is no longer finite",
                    self.frame
                );
                return Err(SimulationError::NonFiniteState {
                    frame: self.frame,
                    step,
                });
            }

            if step % sample_interval == 0 {
                observer.trail_sampled(step, &self.state);
            }
        }

        self.frame += 1;
        self.elapsed += step_size * self.settings.steps_per_frame as Scalar;

        let report = FrameReport {
            frame: self.frame,
            elapsed: self.elapsed,
            step_size,
        };
        observer.frame_completed(&report, &self.state);

        Ok(report)
    }

    /// Re-derive the state from the current initial conditions
    pub fn reset(&mut self) {
        debug!(
            "Resetting simulation '{}'",
            self.initial_conditions.scenario().name
        );

        self.state = self.initial_conditions.reset_state_to_initial_conditions();
        self.frame = 0;
        self.elapsed = 0.0;
        self.halted = false;
    }

    /// Switch to another scenario and reset
    pub fn change_scenario(&mut self, scenario: Scenario) -> Result<(), ScenarioError> {
        self.initial_conditions.change_initial_conditions(scenario)?;
        self.reset();
        Ok(())
    }

    /// Takes effect on the next frame
    pub fn set_mass(&mut self, body: usize, mass: Scalar) -> Result<(), ScenarioError> {
        self.initial_conditions.set_mass(body, mass)
    }

    /// Takes effect on the next frame
    pub fn set_time_scale_factor(&mut self, value: Scalar) -> Result<(), ScenarioError> {
        self.initial_conditions.set_time_scale_factor(value)
    }

    pub fn initial_conditions(&self) -> &InitialConditions {
        &self.initial_conditions
    }

    pub fn initial_conditions_mut(&mut self) -> &mut InitialConditions {
        &mut self.initial_conditions
    }

    #[inline]
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn settings(&self) -> FrameSettings {
        self.settings
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn elapsed(&self) -> Scalar {
        self.elapsed
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::math::{PolarCoordinate, Vector};
    use crate::scenario::ScenarioCatalog;

    #[derive(Default)]
    struct Recorder {
        samples: Vec<usize>,
        frames: Vec<FrameReport>,
        last_positions: Vec<Vector>,
    }

    impl FrameObserver for Recorder {
        fn trail_sampled(&mut self, step: usize, _state: &StateVector) {
            self.samples.push(step);
        }

        fn frame_completed(&mut self, report: &FrameReport, state: &StateVector) {
            self.frames.push(*report);
            self.last_positions = state.positions();
        }
    }

    fn mars_cycler() -> Simulation {
        Simulation::from_scenario(
            ScenarioCatalog::get("mars_cycler").unwrap(),
            FrameSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_frame_settings() {
        let settings = FrameSettings::default();

        assert_eq!(settings.sample_interval(), 25);
        assert_eq!(settings.step_size(60.0 * 250.0), 1.0);
    }

    #[test]
    fn test_sample_interval_rounds_up() {
        let settings = FrameSettings {
            frames_per_second: 60,
            steps_per_frame: 7,
            draw_times_per_frame: 3,
        };

        assert_eq!(settings.sample_interval(), 3);
    }

    #[test]
    fn test_sample_interval_with_more_draws_than_steps() {
        let settings = FrameSettings {
            frames_per_second: 60,
            steps_per_frame: 4,
            draw_times_per_frame: 10,
        };

        assert_eq!(settings.sample_interval(), 1);
    }

    #[test]
    fn test_frame_sampling_cadence() {
        let mut simulation = mars_cycler();
        let mut recorder = Recorder::default();

        let report = simulation.advance_one_frame(&mut recorder).unwrap();

        assert_eq!(
            recorder.samples,
            vec![0, 25, 50, 75, 100, 125, 150, 175, 200, 225]
        );
        assert_eq!(recorder.frames, vec![report]);
        assert_eq!(recorder.last_positions, simulation.state().positions());
        assert_eq!(report.frame, 1);
    }

    #[test]
    fn test_sampling_does_not_change_result() {
        let mut observed = mars_cycler();
        let mut unobserved = mars_cycler();
        let mut recorder = Recorder::default();

        for _ in 0..5 {
            observed.advance_one_frame(&mut recorder).unwrap();
            unobserved.advance_one_frame(&mut ()).unwrap();
        }

        assert_eq!(observed.state(), unobserved.state());
    }

    #[test]
    fn test_elapsed_time_tracks_time_scale() {
        let mut simulation = mars_cycler();
        let year = 3600.0 * 24.0 * 365.0;

        for _ in 0..60 {
            simulation.advance_one_frame(&mut ()).unwrap();
        }

        assert_eq!(simulation.frame(), 60);
        assert!((simulation.elapsed() - year).abs() / year < 1e-9);
    }

    #[test]
    fn test_zero_time_scale_does_not_move_bodies() {
        let mut simulation = mars_cycler();
        simulation.set_time_scale_factor(0.0).unwrap();
        let before = simulation.state().clone();

        let report = simulation.advance_one_frame(&mut ()).unwrap();

        assert_eq!(report.step_size, 0.0);
        assert_eq!(simulation.state(), &before);
    }

    #[test]
    fn test_bodies_move_and_stay_bound() {
        let mut simulation = mars_cycler();
        let start = simulation.state().position(1);

        for _ in 0..30 {
            simulation.advance_one_frame(&mut ()).unwrap();
        }

        // Half a year later the Earth is on the other side of the Sun
        let earth = simulation.state().position(1);
        let sun = simulation.state().position(0);
        assert!(earth.x < 0.0, "earth at {earth:?}");
        let radius = (earth - sun).length();
        assert!((radius - start.length()).abs() / start.length() < 0.1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut simulation = mars_cycler();
        let initial = simulation.state().clone();

        simulation.advance_one_frame(&mut ()).unwrap();
        assert_ne!(simulation.state(), &initial);

        simulation.reset();
        assert_eq!(simulation.state(), &initial);
        assert_eq!(simulation.frame(), 0);
        assert_eq!(simulation.elapsed(), 0.0);
    }

    #[test]
    fn test_mass_change_applies_to_next_frame() {
        let mut heavy = mars_cycler();
        let mut light = mars_cycler();

        light.set_mass(0, 1.0e29).unwrap();
        assert_eq!(light.state(), heavy.state());

        heavy.advance_one_frame(&mut ()).unwrap();
        light.advance_one_frame(&mut ()).unwrap();
        assert_ne!(light.state(), heavy.state());
    }

    #[test]
    fn test_change_scenario_resets_state() {
        let mut simulation = mars_cycler();
        simulation.advance_one_frame(&mut ()).unwrap();

        simulation
            .change_scenario(ScenarioCatalog::get("figure_eight").unwrap())
            .unwrap();

        assert_eq!(simulation.state().body_count(), 3);
        assert_eq!(simulation.frame(), 0);
    }

    fn coincident_bodies() -> Simulation {
        let mut scenario = ScenarioCatalog::get("figure_eight").unwrap();
        scenario.masses = vec![1.0, 1.0];
        scenario.densities = None;
        scenario.body_names.clear();
        scenario.positions = vec![PolarCoordinate::new(0.0, 0.0); 2];
        scenario.velocities = vec![PolarCoordinate::new(0.0, 0.0); 2];

        Simulation::from_scenario(scenario, FrameSettings::default()).unwrap()
    }

    #[test]
    fn test_singularity_halts() {
        let mut simulation = coincident_bodies();

        assert_eq!(
            simulation.advance_one_frame(&mut ()),
            Err(SimulationError::NonFiniteState { frame: 0, step: 0 })
        );
        assert!(simulation.is_halted());
        assert_eq!(
            simulation.advance_one_frame(&mut ()),
            Err(SimulationError::Halted)
        );

        simulation.reset();
        assert!(!simulation.is_halted());
        assert!(simulation.state().is_finite());
    }

    #[test]
    fn test_halted_frame_is_not_reported() {
        let mut simulation = coincident_bodies();
        let mut recorder = Recorder::default();

        let _ = simulation.advance_one_frame(&mut recorder);

        assert!(recorder.samples.is_empty());
        assert!(recorder.frames.is_empty());
    }
}
