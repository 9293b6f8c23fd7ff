//! Player motor: jump state machine + locomotion behind one frame/fixed-tick interface.
//!
//! The host calls the frame methods from its variable-rate update and
//! [`PlayerMotor::fixed_tick`] from its fixed-rate physics update. The two never overlap.

use bevy::prelude::*;

use crate::config::{ConfigError, ControllerConfig};
use crate::jump::{JumpController, JumpPhase};
use crate::locomotion::Locomotion;

/// Everything the fixed step needs from the outside world.
#[derive(Clone, Copy, Debug)]
pub struct FixedTickInput {
    pub grounded: bool,
    /// Camera yaw in radians about +Y
    pub camera_yaw: f32,
    pub gravity_y: f32,
    pub dt: f32,
}

#[derive(Component, Debug)]
pub struct PlayerMotor {
    jump: JumpController,
    locomotion: Locomotion,
}

impl PlayerMotor {
    pub fn new(config: &ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            jump: JumpController::new(&config.jump),
            locomotion: Locomotion::new(&config.movement),
        })
    }

    pub fn set_move_input(&mut self, direction: Vec2) {
        self.locomotion.set_input(direction);
    }

    /// Returns `true` if a new jump started.
    pub fn on_jump(&mut self, pressed: bool, grounded: bool) -> bool {
        self.jump.on_jump(pressed, grounded)
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.jump.tick_timers(dt);
    }

    /// Step one fixed tick, writing into the rigid body's velocity and the transform rotation.
    pub fn fixed_tick(&mut self, input: &FixedTickInput, velocity: &mut Vec3, rotation: &mut Quat) {
        if let Some(vertical) = self.jump.fixed_tick(input.grounded, input.gravity_y, input.dt) {
            velocity.y = vertical;
        }
        self.locomotion
            .fixed_tick(input.camera_yaw, input.dt, velocity, rotation);
    }

    pub fn current_speed(&self) -> f32 {
        self.locomotion.current_speed()
    }

    pub fn jump_phase(&self, grounded: bool) -> JumpPhase {
        self.jump.phase(grounded)
    }

    pub fn jump(&self) -> &JumpController {
        &self.jump
    }

    pub fn locomotion(&self) -> &Locomotion {
        &self.locomotion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jump::launch_velocity;

    const DT: f32 = 0.02;

    fn tick(grounded: bool, camera_yaw: f32) -> FixedTickInput {
        FixedTickInput {
            grounded,
            camera_yaw,
            gravity_y: -9.81,
            dt: DT,
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = ControllerConfig::default();
        config.gravity_y = f32::INFINITY;
        assert!(PlayerMotor::new(&config).is_err());
    }

    #[test]
    fn test_resting_leaves_vertical_velocity_alone() {
        let mut motor = PlayerMotor::new(&ControllerConfig::default()).unwrap();
        let mut velocity = Vec3::new(1.0, -0.3, 1.0);
        let mut rotation = Quat::IDENTITY;

        motor.fixed_tick(&tick(true, 0.0), &mut velocity, &mut rotation);
        assert_eq!(velocity, Vec3::new(0.0, -0.3, 0.0));
    }

    #[test]
    fn test_running_jump_keeps_horizontal_motion() {
        let mut motor = PlayerMotor::new(&ControllerConfig::default()).unwrap();
        let mut velocity = Vec3::ZERO;
        let mut rotation = Quat::IDENTITY;

        motor.set_move_input(Vec2::Y);
        assert!(motor.on_jump(true, true));

        let mut peak: f32 = f32::MIN;
        for _ in 0..30 {
            motor.tick_timers(DT);
            motor.fixed_tick(&tick(true, 0.0), &mut velocity, &mut rotation);
            peak = peak.max(velocity.y);
            assert!((velocity.z + 5.0).abs() < 1e-5);
            assert_eq!(velocity.x, 0.0);
        }
        assert!((peak - launch_velocity(2.0, -9.81)).abs() < 1e-4);
    }

    #[test]
    fn test_airborne_falls_with_gravity_multiplier() {
        let mut motor = PlayerMotor::new(&ControllerConfig::default()).unwrap();
        let mut velocity = Vec3::ZERO;
        let mut rotation = Quat::IDENTITY;

        for _ in 0..10 {
            motor.fixed_tick(&tick(false, 0.0), &mut velocity, &mut rotation);
        }
        assert!((velocity.y - (-9.81 * 2.5 * DT * 10.0)).abs() < 1e-4);
        assert_eq!(motor.jump_phase(false), JumpPhase::Falling);
    }

    #[test]
    fn test_speed_rises_then_falls() {
        let mut motor = PlayerMotor::new(&ControllerConfig::default()).unwrap();
        let mut velocity = Vec3::ZERO;
        let mut rotation = Quat::IDENTITY;

        motor.set_move_input(Vec2::X);
        for _ in 0..50 {
            motor.fixed_tick(&tick(true, 0.0), &mut velocity, &mut rotation);
        }
        let moving = motor.current_speed();
        assert!(moving > 0.9);

        motor.set_move_input(Vec2::ZERO);
        motor.fixed_tick(&tick(true, 0.0), &mut velocity, &mut rotation);
        assert!(motor.current_speed() < moving);
        assert_eq!(velocity.x, 0.0);
    }
}
