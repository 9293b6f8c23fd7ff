//! Input messages produced by the client's input reader and consumed by the controllers.

use bevy::prelude::*;

use crate::look::LookDevice;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum ControlInput {
    /// Movement direction, length at most 1. Sent every frame.
    Move(Vec2),
    /// Jump button pressed (`true`) or released (`false`)
    Jump { pressed: bool },
    Look { delta: Vec2, device: LookDevice },
    /// Look button went down
    EnableMouseLook,
    /// Look button went up
    DisableMouseLook,
}
