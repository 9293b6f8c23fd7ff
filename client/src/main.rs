//! Platformer client - third-person character on a small test level
//!
//! Frame schedule: read input, feed the motor, tick jump timers, push animator speed,
//! move the camera. Fixed schedule: sample ground, write body velocity, then rapier steps.

mod camera;
mod config;
mod hud;
mod input;
mod player;
mod world;

use bevy::prelude::*;
use bevy::asset::AssetPlugin;
use bevy::window::WindowResolution;
use bevy_rapier3d::prelude::*;
use shared::{ControlInput, FIXED_TIMESTEP_HZ};

fn main() {
    let asset_path = config::get_asset_path();

    let mut app = App::new();

    app.add_plugins(DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "Platformer".to_string(),
                resolution: WindowResolution::new(1280, 720),
                ..default()
            }),
            ..default()
        })
        .set(AssetPlugin {
            file_path: asset_path.to_string_lossy().to_string(),
            ..default()
        })
    );

    // Physics steps in the fixed schedule, after our velocity writes in FixedUpdate
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_TIMESTEP_HZ));

    app.insert_resource(config::AssetDir(asset_path));
    app.add_message::<ControlInput>();
    app.init_resource::<camera::CameraYaw>();

    // Config must exist before anything is spawned from it
    app.add_systems(PreStartup, config::load_controller_config);

    app.add_systems(Startup, (
        world::setup_world,
        (player::spawn_player, camera::spawn_camera).chain(),
        hud::spawn_hud,
    ));

    // ORDER MATTERS: input -> motor -> look -> camera (publishes yaw) -> hud
    app.add_systems(
        Update,
        (
            input::read_player_input,
            (
                player::read_motor_input,
                player::tick_jump_timers,
                player::update_animator,
            )
                .chain(),
            camera::handle_look_input,
            camera::update_camera,
            hud::update_hud,
        )
            .chain(),
    );

    app.add_systems(
        FixedUpdate,
        (player::sample_ground, player::apply_motor).chain(),
    );

    // The look suppression window lasts until the end of the frame that opened it
    app.add_systems(Last, camera::end_look_frame);

    info!("Starting platformer at {} Hz fixed tick", FIXED_TIMESTEP_HZ);
    app.run();
}
