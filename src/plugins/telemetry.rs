//! Telemetry plugin
//!
//! Stand-in consumer for the renderer events: logs positions at a fixed frame
//! interval, optionally prints every frame to stdout as CSV, and reports
//! display metrics and halts.

use crate::display::DisplayScale;
use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;
use crate::utils::format::humanize_time;

pub struct TelemetryPlugin;

impl Plugin for TelemetryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, print_csv_header);
        app.add_systems(
            Update,
            (log_display_metrics, log_frames, log_halts).after(SimulationSet::Advance),
        );
    }
}

fn csv_header(body_count: usize) -> String {
    let mut header = String::from("frame,elapsed");
    for body in 0..body_count {
        header.push_str(&format!(",x{body},y{body}"));
    }
    header
}

fn csv_row(frame: &FrameAdvanced) -> String {
    let mut row = format!("{},{:e}", frame.frame, frame.elapsed);
    for position in &frame.positions {
        row.push_str(&format!(",{:e},{:e}", position.x, position.y));
    }
    row
}

fn print_csv_header(config: Res<SimulationConfig>, session: Res<SimulationSession>) {
    if config.telemetry.print_positions {
        println!("{}", csv_header(session.initial_conditions().body_count()));
    }
}

fn log_frames(
    mut frames: EventReader<FrameAdvanced>,
    config: Res<SimulationConfig>,
    session: Res<SimulationSession>,
) {
    let interval = config.telemetry.log_interval_frames;

    for frame in frames.read() {
        if config.telemetry.print_positions {
            println!("{}", csv_row(frame));
        }

        if interval == 0 || frame.frame % interval != 0 {
            continue;
        }

        let elapsed = humanize_time(frame.elapsed);
        info!(
            "Frame {}: {:.2} {} simulated",
            frame.frame, elapsed.value, elapsed.unit
        );
        for (body, position) in frame.positions.iter().enumerate() {
            debug!(
                "  {}: ({:.4e}, {:.4e})",
                session.initial_conditions().body_name(body),
                position.x,
                position.y
            );
        }
    }
}

fn log_display_metrics(
    mut metrics: EventReader<DisplayMetricsChanged>,
    config: Res<SimulationConfig>,
) {
    let rendering = &config.rendering;

    for metric in metrics.read() {
        match DisplayScale::fit(
            metric.largest_distance_meters,
            rendering.viewport_pixels,
            rendering,
        ) {
            Some(scale) => debug!(
                "Display scale {:.4e} m/px, body sizes {:?} px",
                scale.meters_per_pixel,
                scale.body_sizes_pixels(&metric.diameters)
            ),
            None => warn!(
                "Cannot fit largest distance {} m into {} px",
                metric.largest_distance_meters, rendering.viewport_pixels
            ),
        }
    }
}

fn log_halts(mut halts: EventReader<SimulationHalted>) {
    for halt in halts.read() {
        error!("Simulation halted: {}", halt.reason);
    }
}
