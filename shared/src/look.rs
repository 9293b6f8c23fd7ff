//! Camera look gating.
//!
//! Mouse look only applies while the look button is held. Enabling mouse look locks the
//! pointer and discards the next frame's delta, which would otherwise contain the jump
//! caused by re-centering the pointer. Disabling it frees the pointer and zeroes the axes.

use bevy::prelude::*;

use crate::config::{LookConfig, LOOK_SPEED_RANGE};

/// Which device produced a look delta. Mouse deltas are scaled by the fixed timestep,
/// stick deltas by the frame time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookDevice {
    Mouse,
    Gamepad,
}

/// Pointer lock/visibility requested by the look controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerState {
    /// Locked to the window center and hidden
    Locked,
    /// Free and visible
    Free,
}

/// Input values for the camera's horizontal (x) and vertical (y) orbit axes.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraAxes {
    pub x: f32,
    pub y: f32,
}

impl CameraAxes {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

#[derive(Component, Clone, Debug)]
pub struct LookController {
    button_held: bool,
    suppress_next: bool,
    speed_multiplier: f32,
}

impl LookController {
    pub fn new(config: &LookConfig) -> Self {
        let (min, max) = LOOK_SPEED_RANGE;
        Self {
            button_held: false,
            suppress_next: false,
            speed_multiplier: config.speed_multiplier.clamp(min, max),
        }
    }

    pub fn enable_mouse_look(&mut self) -> PointerState {
        self.button_held = true;
        self.suppress_next = true;
        PointerState::Locked
    }

    pub fn disable_mouse_look(&mut self) -> (PointerState, CameraAxes) {
        self.button_held = false;
        (PointerState::Free, CameraAxes::ZERO)
    }

    /// Scale a look delta into axis input, or `None` if it must be ignored.
    pub fn look(&self, delta: Vec2, device: LookDevice, fixed_dt: f32, frame_dt: f32) -> Option<CameraAxes> {
        if self.suppress_next {
            return None;
        }
        if device == LookDevice::Mouse && !self.button_held {
            return None;
        }

        let device_scale = match device {
            LookDevice::Mouse => fixed_dt,
            LookDevice::Gamepad => frame_dt,
        };
        let scale = self.speed_multiplier * device_scale;
        Some(CameraAxes {
            x: delta.x * scale,
            y: delta.y * scale,
        })
    }

    /// Close the suppression window at the end of the frame it was opened in.
    pub fn end_frame(&mut self) {
        self.suppress_next = false;
    }

    pub fn is_mouse_look_enabled(&self) -> bool {
        self.button_held
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppress_next
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }
}
