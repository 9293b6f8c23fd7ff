//! Player input handling
//!
//! Turns keyboard, mouse and gamepad state into [`ControlInput`] messages once per frame.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use shared::{ControlInput, LookDevice};

/// Right stick below this length is treated as centered
const STICK_DEADZONE: f32 = 0.1;

/// Keyboard movement axis (WASD / arrows), +Y is forward
fn keyboard_direction(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut direction = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        direction.y += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        direction.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        direction.x += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        direction.x -= 1.0;
    }
    direction
}

/// Read devices and emit this frame's input messages
pub fn read_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
    mut input: MessageWriter<ControlInput>,
) {
    let gamepad = gamepads.iter().next();

    // --- Movement ---
    let mut direction = keyboard_direction(&keyboard);
    if let Some(stick) = gamepad.map(Gamepad::left_stick) {
        if stick.length_squared() > direction.length_squared() {
            direction = stick;
        }
    }
    input.write(ControlInput::Move(direction.clamp_length_max(1.0)));

    // --- Jump ---
    let jump_pressed = keyboard.just_pressed(KeyCode::Space)
        || gamepad.is_some_and(|g| g.just_pressed(GamepadButton::South));
    let jump_released = keyboard.just_released(KeyCode::Space)
        || gamepad.is_some_and(|g| g.just_released(GamepadButton::South));
    if jump_pressed {
        input.write(ControlInput::Jump { pressed: true });
    }
    if jump_released {
        input.write(ControlInput::Jump { pressed: false });
    }

    // --- Mouse look button ---
    if mouse_button.just_pressed(MouseButton::Right) {
        input.write(ControlInput::EnableMouseLook);
    }
    if mouse_button.just_released(MouseButton::Right) {
        input.write(ControlInput::DisableMouseLook);
    }

    // --- Look ---
    let right_stick = gamepad.map(Gamepad::right_stick);
    let mut mouse_delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        mouse_delta += motion.delta;
    }
    for message in look_messages(right_stick, mouse_delta) {
        input.write(message);
    }
}

/// Look messages for one frame.
///
/// An active right stick wins. Otherwise a connected gamepad reports a centered stick
/// (so the camera stops once the stick is released) followed by the mouse delta, which
/// only counts while mouse look is held.
pub(crate) fn look_messages(right_stick: Option<Vec2>, mouse_delta: Vec2) -> Vec<ControlInput> {
    if let Some(stick) = right_stick.filter(|s| s.length() > STICK_DEADZONE) {
        return vec![ControlInput::Look {
            delta: stick,
            device: LookDevice::Gamepad,
        }];
    }

    let mut messages = Vec::with_capacity(2);
    if right_stick.is_some() {
        messages.push(ControlInput::Look {
            delta: Vec2::ZERO,
            device: LookDevice::Gamepad,
        });
    }
    // Screen Y grows downward; look input treats +Y as up
    messages.push(ControlInput::Look {
        delta: Vec2::new(mouse_delta.x, -mouse_delta.y),
        device: LookDevice::Mouse,
    });
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyboard_direction() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        assert_eq!(keyboard_direction(&keyboard), Vec2::ZERO);

        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyD);
        assert_eq!(keyboard_direction(&keyboard), Vec2::new(1.0, 1.0));

        // Opposite keys cancel
        keyboard.press(KeyCode::ArrowLeft);
        assert_eq!(keyboard_direction(&keyboard), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_look_messages_center_stick_before_mouse() {
        let active = look_messages(Some(Vec2::new(0.8, 0.0)), Vec2::new(4.0, 2.0));
        assert_eq!(
            active,
            vec![ControlInput::Look {
                delta: Vec2::new(0.8, 0.0),
                device: LookDevice::Gamepad,
            }]
        );

        // Stick inside the deadzone still reports a centered gamepad stick
        let released = look_messages(Some(Vec2::new(0.05, 0.0)), Vec2::new(4.0, 2.0));
        assert_eq!(
            released,
            vec![
                ControlInput::Look {
                    delta: Vec2::ZERO,
                    device: LookDevice::Gamepad,
                },
                ControlInput::Look {
                    delta: Vec2::new(4.0, -2.0),
                    device: LookDevice::Mouse,
                },
            ]
        );

        let no_gamepad = look_messages(None, Vec2::ZERO);
        assert_eq!(
            no_gamepad,
            vec![ControlInput::Look {
                delta: Vec2::ZERO,
                device: LookDevice::Mouse,
            }]
        );
    }
}
