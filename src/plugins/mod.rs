pub mod run_control;
pub mod simulation;
pub mod telemetry;
