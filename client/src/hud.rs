//! Debug overlay: animator speed, jump phase and ground contact of the player.

use bevy::prelude::*;
use shared::{AnimatorParams, Grounded, PlayerMotor, SPEED_PARAM};

use crate::player::Player;

/// Marker for the debug overlay text
#[derive(Component)]
pub struct DebugText;

pub fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        ))
        .with_children(|parent| {
            parent.spawn((
                DebugText,
                Text::new("Speed: --"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
            ));
        });
}

pub fn update_hud(
    players: Query<(&PlayerMotor, &AnimatorParams, &Grounded), With<Player>>,
    mut texts: Query<&mut Text, With<DebugText>>,
) {
    let Ok((motor, params, grounded)) = players.single() else {
        return;
    };
    let Ok(mut text) = texts.single_mut() else {
        return;
    };

    let speed = params.get_float(SPEED_PARAM).unwrap_or(0.0);
    text.0 = format!(
        "Speed: {:.2}\nJump: {:?} (v = {:.2})\nGrounded: {}\nRMB: look  Space: jump",
        speed,
        motor.jump_phase(grounded.0),
        motor.jump().velocity(),
        grounded.0,
    );
}
