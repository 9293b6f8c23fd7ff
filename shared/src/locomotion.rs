//! Camera-relative locomotion.
//!
//! Input is sampled every frame into a flat intent vector. Each fixed tick the intent is
//! rotated by the camera yaw, the character turns toward it at a capped rate, and the
//! horizontal velocity is written directly (no acceleration ramp, snappy stop).
//! The smoothed speed only drives animation.
//!
//! In Bevy: +X is right, +Y is up, -Z is forward.

use bevy::prelude::*;

use crate::config::MovementConfig;

/// Minimum smoothing time constant, avoids dividing by zero.
const MIN_SMOOTH_TIME: f32 = 1e-4;

/// Flat intent vector from a 2D input: +Y on the stick is forward (-Z).
pub fn intent_from_input(direction: Vec2) -> Vec3 {
    Vec3::new(direction.x, 0.0, -direction.y)
}

/// Rotate a movement intent about +Y by the camera yaw (radians).
pub fn camera_relative(intent: Vec3, camera_yaw: f32) -> Vec3 {
    Quat::from_rotation_y(camera_yaw) * intent
}

/// Rotation whose forward (-Z) points along the horizontal part of `direction`.
pub fn facing(direction: Vec3) -> Quat {
    Quat::from_rotation_y((-direction.x).atan2(-direction.z))
}

/// Rotate `from` toward `to` by at most `max_angle` radians.
pub fn rotate_towards(from: Quat, to: Quat, max_angle: f32) -> Quat {
    let angle = from.angle_between(to);
    if angle <= f32::EPSILON || angle <= max_angle {
        return to;
    }
    from.slerp(to, max_angle.max(0.0) / angle)
}

/// Critically damped approach of `current` toward `target`.
///
/// `velocity` carries the filter state between calls. The result never overshoots the target.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let mut output = target + (change + temp) * decay;

    // Clamp overshoot
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = 0.0;
    }

    output
}

#[derive(Clone, Debug)]
pub struct Locomotion {
    intent: Vec3,
    current_speed: f32,
    speed_velocity: f32,
    move_speed: f32,
    rotation_speed: f32,
    smooth_time: f32,
}

impl Locomotion {
    pub fn new(config: &MovementConfig) -> Self {
        Self {
            intent: Vec3::ZERO,
            current_speed: 0.0,
            speed_velocity: 0.0,
            move_speed: config.move_speed,
            rotation_speed: config.rotation_speed,
            smooth_time: config.smooth_time,
        }
    }

    /// Per-frame input sample.
    pub fn set_input(&mut self, direction: Vec2) {
        self.intent = intent_from_input(direction);
    }

    /// One fixed step: turn, write horizontal velocity, feed the speed filter.
    ///
    /// Only `velocity.x` and `velocity.z` are written.
    pub fn fixed_tick(&mut self, camera_yaw: f32, dt: f32, velocity: &mut Vec3, rotation: &mut Quat) {
        let adjust_direction = camera_relative(self.intent, camera_yaw);
        let magnitude = adjust_direction.length();

        if magnitude > 0.0 {
            *rotation = rotate_towards(*rotation, facing(adjust_direction), self.rotation_speed * dt);

            let horizontal = adjust_direction * self.move_speed;
            velocity.x = horizontal.x;
            velocity.z = horizontal.z;

            self.smooth_speed(magnitude, dt);
        } else {
            self.smooth_speed(0.0, dt);

            // Snappy stop
            velocity.x = 0.0;
            velocity.z = 0.0;
        }
    }

    fn smooth_speed(&mut self, target: f32, dt: f32) {
        self.current_speed = smooth_damp(
            self.current_speed,
            target,
            &mut self.speed_velocity,
            self.smooth_time,
            dt,
        );
    }

    pub fn intent(&self) -> Vec3 {
        self.intent
    }

    /// Smoothed speed for the animator.
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }
}
