//! OVERLAND - first-person exploration over a procedural highland arena.
//!
//! The `sim` crate owns the movement controller and terrain height field;
//! this binary wires it to input, the pointer-capture boundary, the camera,
//! chunk streaming, and the HUD.

mod camera;
mod capture;
mod input;
mod player;
mod props;
mod settings;
mod states;
mod terrain;
mod ui;
mod world;

use bevy::prelude::*;
use bevy::window::WindowResolution;

use settings::Settings;
use states::GameState;

fn main() {
    let settings = Settings::load_or_default();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "OVERLAND".to_string(),
            resolution: WindowResolution::new(settings.window_width, settings.window_height),
            ..default()
        }),
        ..default()
    }));

    app.init_state::<GameState>();

    app.insert_resource(settings);
    app.init_resource::<input::InputState>();
    app.init_resource::<sim::Metrics>();

    // Terrain streaming and props run in both states so the scene is visible
    // behind the start/pause overlay.
    app.add_plugins(terrain::TerrainPlugin);
    app.add_plugins(props::PropsPlugin);

    app.add_plugins(capture::CapturePlugin);
    app.add_plugins(ui::HudPlugin);
    app.add_plugins(ui::PauseMenuPlugin);

    app.add_systems(Startup, (world::spawn_world, player::spawn_player));

    // Input -> simulation -> camera, in order, only while the view is
    // captured. While released, nothing here runs and the kinematic state is
    // frozen exactly as-is.
    app.add_systems(
        Update,
        (
            input::handle_keyboard_input,
            input::handle_mouse_input,
            player::tick_player,
            camera::sync_camera,
        )
            .chain()
            .run_if(in_state(GameState::Roaming)),
    );

    app.run();
}
