//! Author-time tuning for the character controller.
//!
//! Values are loaded from a RON file by the client (see `assets/controller.ron`).
//! Every section falls back to its defaults, so a file only needs the fields it overrides.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed physics tick rate (Hz).
pub const FIXED_TIMESTEP_HZ: f64 = 50.0;

/// Bounds for the look speed multiplier.
pub const LOOK_SPEED_RANGE: (f32, f32) = (0.5, 3.0);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read controller config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse controller config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid controller config `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal speed in m/s at full stick deflection
    pub move_speed: f32,
    /// Maximum turn rate in radians per second
    pub rotation_speed: f32,
    /// Time constant of the animation speed filter (seconds)
    pub smooth_time: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            rotation_speed: 15.0,
            smooth_time: 0.2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Wind-up acceleration scale before the launch burst
    pub force: f32,
    /// Length of the jump window in seconds
    pub duration: f32,
    /// Delay after a jump window before the next press is accepted
    pub cooldown: f32,
    /// Apex height reached by the launch burst (meters)
    pub max_height: f32,
    /// Extra gravity applied while falling
    pub gravity_multiplier: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            force: 10.0,
            duration: 0.5,
            cooldown: 0.0,
            max_height: 2.0,
            gravity_multiplier: 2.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Radius of the ground probe sphere
    pub distance: f32,
    /// Probe center relative to the player origin
    pub probe_offset: [f32; 3],
    /// Surface layer bits that count as ground
    pub layers: u32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            distance: 0.1,
            probe_offset: [0.0, -0.9, 0.0],
            layers: 0b1,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    pub speed_multiplier: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            speed_multiplier: 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, bevy::prelude::Resource)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementConfig,
    pub jump: JumpConfig,
    pub ground: GroundConfig,
    pub look: LookConfig,
    /// World gravity along Y (m/s^2, negative is down)
    pub gravity_y: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            jump: JumpConfig::default(),
            ground: GroundConfig::default(),
            look: LookConfig::default(),
            gravity_y: -9.81,
        }
    }
}

impl ControllerConfig {
    /// Parse and validate a RON document.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the controller cannot run with.
    ///
    /// Zero or negative durations and zero speeds are accepted: timers expire on their
    /// first tick and zero speed moves nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("movement.move_speed", self.movement.move_speed),
            ("movement.rotation_speed", self.movement.rotation_speed),
            ("movement.smooth_time", self.movement.smooth_time),
            ("jump.force", self.jump.force),
            ("jump.duration", self.jump.duration),
            ("jump.cooldown", self.jump.cooldown),
            ("jump.max_height", self.jump.max_height),
            ("jump.gravity_multiplier", self.jump.gravity_multiplier),
            ("ground.distance", self.ground.distance),
            ("look.speed_multiplier", self.look.speed_multiplier),
            ("gravity_y", self.gravity_y),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite number, got {value}"),
                });
            }
        }

        if self.ground.probe_offset.iter().any(|v| !v.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "ground.probe_offset",
                reason: "expected finite components".to_string(),
            });
        }

        if self.ground.distance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "ground.distance",
                reason: format!("probe radius must not be negative, got {}", self.ground.distance),
            });
        }

        Ok(())
    }
}
