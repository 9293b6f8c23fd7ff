//! Character control logic shared by the client app and its tests.
//!
//! Nothing in here schedules systems or talks to a physics backend: the client feeds
//! input, ground contact and camera yaw in, and writes the resulting velocity and
//! rotation to its rigid body.

pub mod animator;
pub mod config;
pub mod ground;
pub mod input;
pub mod jump;
pub mod locomotion;
pub mod look;
pub mod motor;
pub mod timer;

pub use animator::{AnimatorParams, SPEED_PARAM};
pub use config::{
    ConfigError, ControllerConfig, GroundConfig, JumpConfig, LookConfig, MovementConfig,
    FIXED_TIMESTEP_HZ,
};
pub use ground::{Grounded, GroundSensor, SurfaceBox, SurfaceQuery};
pub use input::ControlInput;
pub use jump::{JumpController, JumpPhase, LAUNCH_THRESHOLD};
pub use locomotion::Locomotion;
pub use look::{CameraAxes, LookController, LookDevice, PointerState};
pub use motor::{FixedTickInput, PlayerMotor};
pub use timer::CountdownTimer;

/// Player capsule height
pub const PLAYER_HEIGHT: f32 = 1.8;

/// Player capsule radius
pub const PLAYER_RADIUS: f32 = 0.3;

/// Spawn position for the player (above the start platform)
pub const SPAWN_POSITION: [f32; 3] = [0.0, 2.0, 0.0];
