use bevy::prelude::*;

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Running,
    Paused,
    /// The state stopped being finite; only a restart or scenario load resumes
    Halted,
}
