use crate::physics::math::Scalar;
use crate::scenario::ScenarioCatalog;
use crate::scenario::manager::{AVERAGE_DENSITY, LARGEST_DISTANCE_PADDING};
use crate::simulation::FrameSettings;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub scenario: ScenarioConfig,
    pub rendering: RenderingConfig,
    pub telemetry: TelemetryConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub frames_per_second: u32,
    /// Integration steps per displayed frame; higher is more precise and slower
    pub steps_per_frame: usize,
    /// Maximum number of orbit trail samples per frame
    pub draw_times_per_frame: usize,
    /// kg/m³, used for diameters when a scenario has no densities
    pub average_density: Scalar,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 60,
            steps_per_frame: 250,
            draw_times_per_frame: 10,
            average_density: AVERAGE_DENSITY,
        }
    }
}

impl PhysicsConfig {
    /// Frame settings with at least one frame per second and one step per frame
    pub fn frame_settings(&self) -> FrameSettings {
        FrameSettings {
            frames_per_second: self.frames_per_second.max(1),
            steps_per_frame: self.steps_per_frame.max(1),
            draw_times_per_frame: self.draw_times_per_frame,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Name of a built-in scenario
    pub name: String,
    /// TOML scenario file, takes precedence over `name`
    pub file: Option<PathBuf>,
    /// Overrides the scenario's own time scale factor
    pub time_scale_factor: Option<Scalar>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: ScenarioCatalog::DEFAULT.into(),
            file: None,
            time_scale_factor: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RenderingConfig {
    /// Meters added to the largest initial distance when choosing a scale
    pub largest_distance_padding: Scalar,
    /// The padded largest distance spans this many half-viewports
    pub viewport_margin_factor: Scalar,
    /// Nominal viewport size used for display metrics in logs
    pub viewport_pixels: Scalar,
    pub minimum_size_pixels: Scalar,
    pub maximum_size_pixels: Scalar,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            largest_distance_padding: LARGEST_DISTANCE_PADDING,
            viewport_margin_factor: 2.3,
            viewport_pixels: 700.0,
            minimum_size_pixels: 10.0,
            maximum_size_pixels: 80.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Log body positions every this many frames; 0 disables
    pub log_interval_frames: u64,
    /// Print every frame's positions to stdout as CSV
    pub print_positions: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_interval_frames: 60,
            print_positions: false,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        }
    }

    /// Path of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "cycler").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the per-user configuration file, using defaults for anything missing
    pub fn load_from_user_config() -> Self {
        let Some(path) = Self::user_config_path() else {
            debug!("No home directory found. Using default configuration.");
            return Self::default();
        };

        let loaded = ::config::Config::builder()
            .add_source(::config::File::from(path.as_path()).required(false))
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>());

        match loaded {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
