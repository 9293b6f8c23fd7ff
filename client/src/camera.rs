//! Third-person free-look camera
//!
//! An orbit rig around the player. Look messages go through the [`LookController`] gate and
//! land in the rig's [`CameraAxes`]; the rig integrates the axes into yaw/pitch every frame.
//! The resulting camera yaw is published for camera-relative movement.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use shared::{CameraAxes, ControlInput, ControllerConfig, LookController, PointerState, PLAYER_HEIGHT};

use crate::player::Player;

/// Orbit radius from pivot
const ORBIT_DISTANCE: f32 = 6.0;
/// Height of the pivot above the player origin
const PIVOT_HEIGHT: f32 = PLAYER_HEIGHT * 0.5;
/// Default orbit angle (slightly above)
const DEFAULT_PITCH: f32 = 0.35;
/// Orbit pitch limits (radians)
const PITCH_LIMITS: (f32, f32) = (-0.2, 1.3);
/// Horizontal axis speed, 300 deg/s at full input
const X_AXIS_SPEED: f32 = 300.0 * std::f32::consts::PI / 180.0;
/// Vertical axis speed (rad/s at full input)
const Y_AXIS_SPEED: f32 = 2.0;
/// Follow smoothing rate
const FOLLOW_RATE: f32 = 20.0;

// =============================================================================
// COMPONENTS & RESOURCES
// =============================================================================

/// Orbit rig following `target`
#[derive(Component, Debug)]
#[require(Camera3d, CameraAxes)]
pub struct FreeLookCamera {
    pub target: Entity,
    pub yaw: f32,
    pub pitch: f32,
}

impl FreeLookCamera {
    pub fn new(target: Entity) -> Self {
        Self {
            target,
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
        }
    }

    /// Integrate axis input for one frame
    pub fn apply_axes(&mut self, axes: CameraAxes, dt: f32) {
        // Positive x turns the view right, positive y tilts it up (orbiting down)
        self.yaw -= axes.x * X_AXIS_SPEED * dt;
        self.pitch = (self.pitch - axes.y * Y_AXIS_SPEED * dt).clamp(PITCH_LIMITS.0, PITCH_LIMITS.1);
    }
}

/// Yaw of the active camera (radians about +Y), read by the fixed-tick motor
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CameraYaw(pub f32);

// =============================================================================
// SETUP
// =============================================================================

/// Spawn the rig on the player. Fails at startup if there is no player to follow.
pub fn spawn_camera(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    players: Query<(Entity, &Transform), With<Player>>,
) -> Result {
    let (player, player_transform) = players.single()?;
    let rig = FreeLookCamera::new(player);

    let pivot = player_transform.translation + Vec3::Y * PIVOT_HEIGHT;
    let eye = orbit_position(pivot, rig.yaw, rig.pitch, ORBIT_DISTANCE);

    commands.spawn((
        Name::new("FreeLookCamera"),
        rig,
        LookController::new(&config.look),
        Transform::from_translation(eye).looking_at(pivot, Vec3::Y),
    ));
    Ok(())
}

// =============================================================================
// LOOK INPUT
// =============================================================================

fn apply_pointer(pointer: PointerState, cursor: &mut CursorOptions) {
    match pointer {
        PointerState::Locked => {
            cursor.grab_mode = CursorGrabMode::Locked;
            cursor.visible = false;
        }
        PointerState::Free => {
            cursor.grab_mode = CursorGrabMode::None;
            cursor.visible = true;
        }
    }
}

/// Gate look messages and write the camera axes; lock or free the pointer on
/// enable/disable
pub fn handle_look_input(
    mut messages: MessageReader<ControlInput>,
    time: Res<Time>,
    fixed_time: Res<Time<Fixed>>,
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut cameras: Query<(&mut LookController, &mut CameraAxes)>,
) {
    let Ok((mut look, mut axes)) = cameras.single_mut() else {
        return;
    };
    let window = windows.single().ok();
    let fixed_dt = fixed_time.timestep().as_secs_f32();
    let frame_dt = time.delta_secs();

    let mut set_pointer = |pointer: PointerState| {
        if let Some(mut cursor) = window.and_then(|w| cursor_opts.get_mut(w).ok()) {
            apply_pointer(pointer, &mut cursor);
        }
    };

    for message in messages.read() {
        match *message {
            ControlInput::EnableMouseLook => {
                set_pointer(look.enable_mouse_look());
                debug!("Mouse look enabled");
            }
            ControlInput::DisableMouseLook => {
                let (pointer, reset) = look.disable_mouse_look();
                set_pointer(pointer);
                *axes = reset;
                debug!("Mouse look disabled");
            }
            ControlInput::Look { delta, device } => {
                if let Some(value) = look.look(delta, device, fixed_dt, frame_dt) {
                    *axes = value;
                }
            }
            _ => {}
        }
    }
}

/// Close the one-frame suppression window opened by enabling mouse look
pub fn end_look_frame(mut looks: Query<&mut LookController>) {
    for mut look in looks.iter_mut() {
        if look.is_suppressed() {
            look.end_frame();
        }
    }
}

// =============================================================================
// ORBIT
// =============================================================================

/// Move the rig around its target and publish the camera yaw
pub fn update_camera(
    time: Res<Time>,
    targets: Query<&Transform, (With<Player>, Without<FreeLookCamera>)>,
    mut cameras: Query<(&mut FreeLookCamera, &CameraAxes, &mut Transform)>,
    mut camera_yaw: ResMut<CameraYaw>,
) {
    let Ok((mut rig, axes, mut camera_transform)) = cameras.single_mut() else {
        return;
    };
    let Ok(target) = targets.get(rig.target) else {
        return;
    };

    let dt = time.delta_secs();
    rig.apply_axes(*axes, dt);

    let pivot = target.translation + Vec3::Y * PIVOT_HEIGHT;
    let eye = orbit_position(pivot, rig.yaw, rig.pitch, ORBIT_DISTANCE);

    // Mild follow smoothing on position only; the orbit angle itself is never lagged
    let t = 1.0 - (-FOLLOW_RATE * dt).exp();
    camera_transform.translation = camera_transform.translation.lerp(eye, t);
    camera_transform.look_at(pivot, Vec3::Y);

    let (yaw, _, _) = camera_transform.rotation.to_euler(EulerRot::YXZ);
    camera_yaw.0 = yaw;
}

/// Calculate camera position orbiting around a pivot point
fn orbit_position(pivot: Vec3, yaw: f32, pitch: f32, distance: f32) -> Vec3 {
    // yaw rotates around Y, pitch lifts the camera (0 = level behind, positive = above)
    let horizontal_dist = distance * pitch.cos();
    let behind_dir = Vec3::new(yaw.sin(), 0.0, yaw.cos());
    let vertical_offset = distance * pitch.sin();

    pivot + behind_dir * horizontal_dist + Vec3::new(0.0, vertical_offset, 0.0)
}
