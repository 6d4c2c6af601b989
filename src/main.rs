use bevy::app::ScheduleRunnerPlugin;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use clap::Parser;
use cycler::cli::{
    Args, CliError, handle_list_scenarios, load_and_apply_config, resolve_scenario,
};
use cycler::plugins::run_control::RunControlPlugin;
use cycler::plugins::simulation::SimulationPlugin;
use cycler::plugins::telemetry::TelemetryPlugin;
use std::time::Duration;

fn main() -> AppExit {
    let args = Args::parse();

    if args.list_scenarios {
        return match handle_list_scenarios() {
            Ok(()) => AppExit::Success,
            Err(e) => {
                eprintln!("Error: {e}");
                AppExit::error()
            }
        };
    }

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    let simulation_plugin = match resolve_scenario(&config).and_then(|scenario| {
        SimulationPlugin::new(config.clone(), scenario).map_err(CliError::from)
    }) {
        Ok(plugin) => plugin,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    let frames_per_second = config.physics.frame_settings().frames_per_second;
    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(frames_per_second));
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame_interval)),
        LogPlugin {
            level: log_level,
            ..default()
        },
        StatesPlugin,
        simulation_plugin,
        TelemetryPlugin,
        RunControlPlugin::new(args.frames, true),
    ));

    app.run()
}
