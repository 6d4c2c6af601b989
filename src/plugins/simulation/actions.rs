//! Action handlers for simulation commands
//!
//! Mass and time scale changes only touch the initial conditions held by the
//! session, so they take effect from the next frame onwards.

use crate::prelude::*;
use crate::utils::format::{format_mass, format_time_scale};

/// Display metrics for the current initial conditions
pub fn display_metrics(simulation: &Simulation) -> DisplayMetricsChanged {
    let initial_conditions = simulation.initial_conditions();

    DisplayMetricsChanged {
        diameters: initial_conditions.calculate_diameters(),
        largest_distance_meters: initial_conditions.largest_distance_meters(),
        pale_orbital_paths: initial_conditions.scenario().pale_orbital_paths,
    }
}

pub fn emit_initial_display_metrics(
    session: Res<SimulationSession>,
    mut metrics: EventWriter<DisplayMetricsChanged>,
) {
    metrics.write(display_metrics(&session));
}

pub fn handle_simulation_commands(
    mut commands_reader: EventReader<SimulationCommand>,
    mut session: ResMut<SimulationSession>,
    mut metrics: EventWriter<DisplayMetricsChanged>,
    current_state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for command in commands_reader.read() {
        match command {
            SimulationCommand::Restart => {
                session.reset();
                metrics.write(display_metrics(&session));
                resume_if_halted(current_state.get(), &mut next_state);
            }
            SimulationCommand::TogglePause => match current_state.get() {
                AppState::Running => next_state.set(AppState::Paused),
                AppState::Paused => next_state.set(AppState::Running),
                AppState::Halted => warn!("Simulation is halted; restart it to continue"),
            },
            SimulationCommand::SetMass { body, mass } => {
                match session.set_mass(*body, *mass) {
                    Ok(()) => {
                        let name = session.initial_conditions().body_name(*body);
                        debug!("Set mass of {name} to {mass}");
                        metrics.write(display_metrics(&session));
                    }
                    Err(err) => warn!("Ignoring mass change: {err}"),
                }
            }
            SimulationCommand::SetTimeScaleFactor(value) => {
                match session.set_time_scale_factor(*value) {
                    Ok(()) => debug!("{}", format_time_scale(*value)),
                    Err(err) => warn!("Ignoring time scale change: {err}"),
                }
            }
            SimulationCommand::SetMassFromSlider { body, position } => {
                let initial_conditions = session.initial_conditions_mut();
                match initial_conditions.set_mass_from_slider(*body, *position) {
                    Ok(mass) => {
                        info!(
                            "{}",
                            format_mass(
                                &initial_conditions.body_name(*body),
                                mass,
                                initial_conditions.scenario().dimensionless,
                            )
                        );
                        metrics.write(display_metrics(&session));
                    }
                    Err(err) => warn!("Ignoring mass slider: {err}"),
                }
            }
            SimulationCommand::SetTimeScaleFactorFromSlider(position) => {
                match session
                    .initial_conditions_mut()
                    .set_time_scale_factor_from_slider(*position)
                {
                    Ok(value) => info!("{}", format_time_scale(value)),
                    Err(err) => warn!("Ignoring time scale slider: {err}"),
                }
            }
            SimulationCommand::LoadScenario(name) => {
                let loaded = ScenarioCatalog::get(name)
                    .and_then(|scenario| session.change_scenario(scenario));
                match loaded {
                    Ok(()) => {
                        info!("Loaded scenario '{name}'");
                        metrics.write(display_metrics(&session));
                        resume_if_halted(current_state.get(), &mut next_state);
                    }
                    Err(err) => warn!("Failed to load scenario: {err}"),
                }
            }
        }
    }
}

fn resume_if_halted(current: &AppState, next_state: &mut NextState<AppState>) {
    if *current == AppState::Halted {
        next_state.set(AppState::Running);
    }
}
