//! Jump state machine.
//!
//! The jump timer is the single source of truth for the jump phase:
//! - pressing jump while grounded (and off cooldown) starts the jump window
//! - during the first 90% of the window velocity winds up gradually
//! - past [`LAUNCH_THRESHOLD`] velocity is set to the closed-form apex velocity
//! - releasing jump early stops the window (variable jump height)
//! - when the window runs out the cooldown starts and gravity takes over

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::config::JumpConfig;
use crate::timer::CountdownTimer;

/// Jump progress after which the launch burst is applied.
pub const LAUNCH_THRESHOLD: f32 = 0.9;

/// Jump phase derived from the timer state and ground contact. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JumpPhase {
    Grounded,
    AscendingEarly,
    AscendingLaunch,
    Falling,
}

/// Upward speed needed to reach `max_height` under gravity `gravity_y` (v = sqrt(2gh)).
pub fn launch_velocity(max_height: f32, gravity_y: f32) -> f32 {
    (2.0 * max_height * gravity_y.abs()).max(0.0).sqrt()
}

#[derive(Debug)]
pub struct JumpController {
    jump_timer: CountdownTimer,
    cooldown_timer: CountdownTimer,
    /// Set by the jump timer's expiry callback, consumed when the timers are ticked.
    window_expired: Arc<AtomicBool>,
    velocity: f32,
    force: f32,
    max_height: f32,
    gravity_multiplier: f32,
}

impl JumpController {
    pub fn new(config: &JumpConfig) -> Self {
        let window_expired = Arc::new(AtomicBool::new(false));
        let flag = window_expired.clone();
        let jump_timer = CountdownTimer::new(config.duration)
            .with_on_expire(move || flag.store(true, Ordering::Release));

        Self {
            jump_timer,
            cooldown_timer: CountdownTimer::new(config.cooldown),
            window_expired,
            velocity: 0.0,
            force: config.force,
            max_height: config.max_height,
            gravity_multiplier: config.gravity_multiplier,
        }
    }

    /// Handle a jump press (`pressed = true`) or release.
    ///
    /// Returns `true` if a press started a new jump. Presses that are not accepted are dropped.
    pub fn on_jump(&mut self, pressed: bool, grounded: bool) -> bool {
        if pressed
            && !self.jump_timer.is_running()
            && !self.cooldown_timer.is_running()
            && grounded
        {
            self.jump_timer.start();
            return true;
        }

        if !pressed && self.jump_timer.is_running() {
            self.jump_timer.stop();
        }
        false
    }

    /// Advance both timers. The jump window's expiry callback starts the cooldown;
    /// stopping the window early does not.
    pub fn tick_timers(&mut self, dt: f32) {
        self.jump_timer.tick(dt);
        if self.window_expired.swap(false, Ordering::AcqRel) {
            self.cooldown_timer.start();
        }
        self.cooldown_timer.tick(dt);
    }

    /// One fixed physics step of the vertical velocity.
    ///
    /// Returns `None` at rest on the ground (the rigid body is left alone), otherwise the
    /// vertical velocity to write into the body.
    pub fn fixed_tick(&mut self, grounded: bool, gravity_y: f32, dt: f32) -> Option<f32> {
        if !self.jump_timer.is_running() && grounded {
            self.velocity = 0.0;
            self.jump_timer.stop();
            return None;
        }

        if self.jump_timer.is_running() {
            let progress = self.jump_timer.progress();
            if progress > LAUNCH_THRESHOLD {
                self.velocity = launch_velocity(self.max_height, gravity_y);
            } else {
                // Wind-up grows stronger as the window advances
                self.velocity += (-1.0 - progress) * self.force * dt;
            }
        } else {
            self.velocity += gravity_y * self.gravity_multiplier * dt;
        }

        Some(self.velocity)
    }

    pub fn phase(&self, grounded: bool) -> JumpPhase {
        if self.jump_timer.is_running() {
            if self.jump_timer.progress() > LAUNCH_THRESHOLD {
                JumpPhase::AscendingLaunch
            } else {
                JumpPhase::AscendingEarly
            }
        } else if grounded {
            JumpPhase::Grounded
        } else {
            JumpPhase::Falling
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn jump_timer(&self) -> &CountdownTimer {
        &self.jump_timer
    }

    pub fn cooldown_timer(&self) -> &CountdownTimer {
        &self.cooldown_timer
    }
}
