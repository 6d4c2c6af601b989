//! Test utilities for plugin testing

use bevy::prelude::*;

/// Creates a minimal headless app with the core Bevy plugins the simulation needs
pub fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins((MinimalPlugins, bevy::state::app::StatesPlugin));

    app
}

/// Removes and returns every pending event of type `E`
pub fn drain_events<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Event, Debug, PartialEq)]
    struct Ping(u32);

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert!(app.world().contains_resource::<Time>());
    }

    #[test]
    fn test_drain_events() {
        let mut app = create_test_app();
        app.add_event::<Ping>();

        app.world_mut().send_event(Ping(1));
        app.world_mut().send_event(Ping(2));

        assert_eq!(drain_events::<Ping>(&mut app), [Ping(1), Ping(2)]);
        assert!(drain_events::<Ping>(&mut app).is_empty());
    }
}
