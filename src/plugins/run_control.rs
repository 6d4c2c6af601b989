//! Exits a headless run after a number of frames or when the simulation halts

use crate::plugins::simulation::SimulationSet;
use crate::prelude::*;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct RunLimit {
    pub max_frames: Option<u64>,
    pub exit_on_halt: bool,
}

pub struct RunControlPlugin {
    limit: RunLimit,
}

impl RunControlPlugin {
    pub fn new(max_frames: Option<u64>, exit_on_halt: bool) -> Self {
        Self {
            limit: RunLimit {
                max_frames,
                exit_on_halt,
            },
        }
    }
}

impl Plugin for RunControlPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.limit);
        app.add_systems(
            Update,
            (exit_after_frames, exit_on_halt).after(SimulationSet::Advance),
        );
    }
}

fn exit_after_frames(
    mut frames: EventReader<FrameAdvanced>,
    limit: Res<RunLimit>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(max_frames) = limit.max_frames else {
        return;
    };

    if frames.read().any(|frame| frame.frame >= max_frames) {
        info!("Reached {max_frames} frames, exiting");
        exit.write(AppExit::Success);
    }
}

fn exit_on_halt(
    mut halts: EventReader<SimulationHalted>,
    limit: Res<RunLimit>,
    mut exit: EventWriter<AppExit>,
) {
    if halts.read().count() > 0 && limit.exit_on_halt {
        exit.write(AppExit::error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::simulation::SimulationPlugin;
    use crate::test_utils::{create_test_app, drain_events};

    fn app_with_limit(max_frames: Option<u64>) -> App {
        let mut app = create_test_app();
        app.add_plugins((
            SimulationPlugin::new(
                SimulationConfig::default(),
                ScenarioCatalog::get("figure_eight").unwrap(),
            )
            .unwrap(),
            RunControlPlugin::new(max_frames, true),
        ));
        app
    }

    #[test]
    fn test_exit_after_frames() {
        let mut app = app_with_limit(Some(3));

        app.update();
        app.update();
        assert!(drain_events::<AppExit>(&mut app).is_empty());

        app.update();
        assert_eq!(drain_events::<AppExit>(&mut app), [AppExit::Success]);
    }

    #[test]
    fn test_no_limit_never_exits() {
        let mut app = app_with_limit(None);

        for _ in 0..5 {
            app.update();
        }

        assert!(drain_events::<AppExit>(&mut app).is_empty());
    }
}
