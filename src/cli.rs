//! Command line interface for Cycler

use clap::Parser;
use std::fmt;
use std::path::PathBuf;

use crate::config::SimulationConfig;
use crate::physics::math::Scalar;
use crate::scenario::{Scenario, ScenarioCatalog, ScenarioError};
use crate::utils::format::format_time_scale;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Scenario could not be found, loaded or validated
    Scenario(ScenarioError),
    /// A command-line override is out of range
    InvalidArgument(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Scenario(err) => write!(f, "Invalid scenario: {err}"),
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Scenario(err) => Some(err),
            CliError::InvalidArgument(_) => None,
        }
    }
}

impl From<ScenarioError> for CliError {
    fn from(err: ScenarioError) -> Self {
        CliError::Scenario(err)
    }
}

/// Cycler - Mars cycler orbit simulation
#[derive(Parser, Debug, Default)]
#[command(
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")"),
    about,
    long_about = None
)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Built-in scenario to run (overrides config file)
    #[arg(short, long, value_name = "NAME")]
    pub scenario: Option<String>,

    /// Scenario file to run (TOML format, overrides --scenario)
    #[arg(long, value_name = "FILE")]
    pub scenario_file: Option<PathBuf>,

    /// Simulated seconds per real second (overrides the scenario)
    #[arg(short, long, value_name = "SECONDS")]
    pub time_scale: Option<Scalar>,

    /// Integration steps per frame (overrides config file)
    #[arg(long, value_name = "COUNT")]
    pub steps_per_frame: Option<usize>,

    /// Exit after this many frames
    #[arg(short, long, value_name = "COUNT")]
    pub frames: Option<u64>,

    /// Print every frame's positions to stdout as CSV
    #[arg(short, long)]
    pub print_positions: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// List built-in scenarios and exit
    #[arg(long)]
    pub list_scenarios: bool,
}

/// Handles the --list-scenarios flag by printing the built-in scenarios
pub fn handle_list_scenarios() -> Result<(), CliError> {
    println!("Available scenarios:");
    for name in ScenarioCatalog::names() {
        let scenario = ScenarioCatalog::get(name)?;
        let marker = if name == ScenarioCatalog::DEFAULT {
            " (default)"
        } else {
            ""
        };

        println!(
            "  - {name}{marker}: {} bodies, {}",
            scenario.body_count(),
            format_time_scale(scenario.time_scale_factor)
        );
    }
    Ok(())
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_or_default(config_path)
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(name) = &args.scenario {
        println!("Using scenario: {name}");
        config.scenario.name = name.clone();
        config.scenario.file = None;
    }

    if let Some(path) = &args.scenario_file {
        println!("Loading scenario from: {}", path.display());
        config.scenario.file = Some(path.clone());
    }

    if let Some(time_scale) = args.time_scale {
        if !time_scale.is_finite() || time_scale < 0.0 {
            return Err(CliError::InvalidArgument(format!(
                "time scale must be a non-negative number, got {time_scale}"
            )));
        }
        println!("Overriding time scale to: {}", format_time_scale(time_scale));
        config.scenario.time_scale_factor = Some(time_scale);
    }

    if let Some(steps_per_frame) = args.steps_per_frame {
        if steps_per_frame == 0 {
            return Err(CliError::InvalidArgument(
                "steps per frame must be at least 1".into(),
            ));
        }
        println!("Overriding steps per frame to: {steps_per_frame}");
        config.physics.steps_per_frame = steps_per_frame;
    }

    if args.print_positions {
        config.telemetry.print_positions = true;
    }

    Ok(config)
}

/// The scenario named by the configuration, from a file if one is given
pub fn resolve_scenario(config: &SimulationConfig) -> Result<Scenario, CliError> {
    let scenario = match &config.scenario.file {
        Some(path) => Scenario::load(path)?,
        None => ScenarioCatalog::get(&config.scenario.name)?,
    };
    Ok(scenario)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(argv: &[&str]) -> Args {
        Args::parse_from(std::iter::once("cycler").chain(argv.iter().copied()))
    }

    #[test]
    fn test_parse_flags() {
        let args = args(&[
            "--scenario",
            "figure_eight",
            "--time-scale",
            "2.5",
            "--frames",
            "120",
            "-p",
        ]);

        assert_eq!(args.scenario.as_deref(), Some("figure_eight"));
        assert_eq!(args.time_scale, Some(2.5));
        assert_eq!(args.frames, Some(120));
        assert!(args.print_positions);
        assert!(!args.verbose);
    }

    #[test]
    fn test_overrides_are_applied() {
        let args = Args {
            config: Some("/nonexistent/cycler.toml".into()),
            scenario: Some("figure_eight".into()),
            time_scale: Some(3.0),
            steps_per_frame: Some(500),
            print_positions: true,
            ..Default::default()
        };

        let config = load_and_apply_config(&args).unwrap();

        assert_eq!(config.scenario.name, "figure_eight");
        assert_eq!(config.scenario.time_scale_factor, Some(3.0));
        assert_eq!(config.physics.steps_per_frame, 500);
        assert!(config.telemetry.print_positions);
    }

    #[test]
    fn test_invalid_overrides() {
        let negative_time_scale = Args {
            config: Some("/nonexistent/cycler.toml".into()),
            time_scale: Some(-1.0),
            ..Default::default()
        };
        let zero_steps = Args {
            config: Some("/nonexistent/cycler.toml".into()),
            steps_per_frame: Some(0),
            ..Default::default()
        };

        assert!(matches!(
            load_and_apply_config(&negative_time_scale),
            Err(CliError::InvalidArgument(_))
        ));
        assert!(matches!(
            load_and_apply_config(&zero_steps),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_resolve_builtin_scenario() {
        let scenario = resolve_scenario(&SimulationConfig::default()).unwrap();

        assert_eq!(scenario.name, ScenarioCatalog::DEFAULT);
    }

    #[test]
    fn test_resolve_unknown_scenario() {
        let mut config = SimulationConfig::default();
        config.scenario.name = "pluto".into();

        let err = resolve_scenario(&config).unwrap_err();

        assert!(matches!(
            err,
            CliError::Scenario(ScenarioError::UnknownScenario(_))
        ));
    }

    #[test]
    fn test_list_scenarios() {
        assert!(handle_list_scenarios().is_ok());
    }
}
