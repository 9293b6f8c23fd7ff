//! Player character systems
//!
//! Spawns the player rigid body and drives its [`PlayerMotor`]:
//! - frame: read move/jump input, tick the jump timers, push the animator speed
//! - fixed tick: sample the ground probe, then write velocity and rotation

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::{
    AnimatorParams, ControlInput, ControllerConfig, FixedTickInput, GroundSensor, Grounded,
    PlayerMotor, SurfaceQuery, PLAYER_HEIGHT, PLAYER_RADIUS, SPAWN_POSITION, SPEED_PARAM,
};

use crate::camera::CameraYaw;
use crate::world::{PLAYER_GROUP, PROBE_GROUP};

// =============================================================================
// COMPONENTS
// =============================================================================

/// The controlled character. Spawning it brings along the velocity sink, the ground flag
/// and the animator parameters.
#[derive(Component)]
#[require(
    Velocity,
    Grounded,
    AnimatorParams,
    RigidBody = RigidBody::Dynamic,
    LockedAxes = LockedAxes::ROTATION_LOCKED
)]
pub struct Player;

/// Sensor ball child of the player, shaped after its [`GroundSensor`].
#[derive(Component)]
pub struct GroundProbe;

/// Overlap set of the rapier ground probe.
///
/// The sensor collider is built from the same sphere and layer mask as the
/// [`GroundSensor`], so its contact set already answers the overlap query.
struct SensorContacts<'a>(&'a CollidingEntities);

impl SurfaceQuery for SensorContacts<'_> {
    fn overlaps_sphere(&self, _center: Vec3, _radius: f32, _layers: u32) -> bool {
        !self.0.is_empty()
    }
}

// =============================================================================
// SPAWNING
// =============================================================================

pub fn spawn_player(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) -> Result {
    let motor = PlayerMotor::new(&config)?;
    let sensor = GroundSensor::from_config(&config.ground);
    let half_height = PLAYER_HEIGHT * 0.5 - PLAYER_RADIUS;
    let spawn = Vec3::from_array(SPAWN_POSITION);

    let player = commands
        .spawn((
            Name::new("Player"),
            Player,
            motor,
            sensor,
            Transform::from_translation(spawn),
            Collider::capsule_y(half_height, PLAYER_RADIUS),
            CollisionGroups::new(PLAYER_GROUP, Group::ALL),
            // No wall friction, otherwise the body sticks to platform sides mid-jump
            Friction {
                coefficient: 0.0,
                combine_rule: CoefficientCombineRule::Min,
            },
            Mesh3d(meshes.add(Capsule3d::new(PLAYER_RADIUS, half_height * 2.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.85, 0.45, 0.2))),
        ))
        .with_children(|parent| {
            parent.spawn((
                GroundProbe,
                Transform::from_translation(sensor.offset),
                Collider::ball(sensor.radius),
                Sensor,
                ActiveEvents::COLLISION_EVENTS,
                CollidingEntities::default(),
                CollisionGroups::new(PROBE_GROUP, Group::from_bits_truncate(sensor.layers)),
            ));
        })
        .id();

    info!("Spawned player {:?} at {:?}", player, spawn);
    Ok(())
}

// =============================================================================
// FRAME SYSTEMS
// =============================================================================

/// Feed movement and jump messages into the motor
pub fn read_motor_input(
    mut messages: MessageReader<ControlInput>,
    mut players: Query<(&mut PlayerMotor, &Grounded), With<Player>>,
) {
    let Ok((mut motor, grounded)) = players.single_mut() else {
        return;
    };

    for message in messages.read() {
        match *message {
            ControlInput::Move(direction) => motor.set_move_input(direction),
            ControlInput::Jump { pressed } => {
                if motor.on_jump(pressed, grounded.0) {
                    debug!("Jump started");
                } else if !pressed {
                    debug!("Jump released");
                }
            }
            _ => {}
        }
    }
}

pub fn tick_jump_timers(time: Res<Time>, mut motors: Query<&mut PlayerMotor, With<Player>>) {
    let dt = time.delta_secs();
    for mut motor in motors.iter_mut() {
        motor.tick_timers(dt);
    }
}

/// Push the smoothed speed to the animator every frame
pub fn update_animator(mut players: Query<(&PlayerMotor, &mut AnimatorParams), With<Player>>) {
    for (motor, mut params) in players.iter_mut() {
        params.set_float(SPEED_PARAM, motor.current_speed());
    }
}

// =============================================================================
// FIXED TICK SYSTEMS
// =============================================================================

/// Sample each player's ground probe once per fixed tick
pub fn sample_ground(
    probes: Query<(&ChildOf, &CollidingEntities), With<GroundProbe>>,
    mut players: Query<(&GlobalTransform, &GroundSensor, &mut Grounded), With<Player>>,
) {
    for (child_of, contacts) in probes.iter() {
        let Ok((transform, sensor, mut grounded)) = players.get_mut(child_of.parent()) else {
            continue;
        };
        let now = sensor.sample(transform.translation(), &SensorContacts(contacts));
        if grounded.0 != now {
            grounded.0 = now;
        }
    }
}

/// Step the motor: jump first, then locomotion, written into the rigid body
pub fn apply_motor(
    time: Res<Time>,
    camera_yaw: Res<CameraYaw>,
    config: Res<ControllerConfig>,
    mut players: Query<(&mut PlayerMotor, &Grounded, &mut Velocity, &mut Transform), With<Player>>,
) {
    for (mut motor, grounded, mut velocity, mut transform) in players.iter_mut() {
        let input = FixedTickInput {
            grounded: grounded.0,
            camera_yaw: camera_yaw.0,
            gravity_y: config.gravity_y,
            dt: time.delta_secs(),
        };

        let mut linvel = velocity.linvel;
        let mut rotation = transform.rotation;
        motor.fixed_tick(&input, &mut linvel, &mut rotation);

        velocity.linvel = linvel;
        // Only touch the transform when turning, so rapier does not resync an idle body
        if rotation != transform.rotation {
            transform.rotation = rotation;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<ControlInput>();
        app.insert_resource(ControllerConfig::default());
        app.insert_resource(CameraYaw(0.0));
        app.add_systems(Update, (read_motor_input, update_animator).chain());
        app
    }

    fn spawn_test_player(app: &mut App, grounded: bool) -> Entity {
        let motor = PlayerMotor::new(&ControllerConfig::default()).unwrap();
        app.world_mut()
            .spawn((Player, motor, Grounded(grounded), Transform::default()))
            .id()
    }

    fn send(app: &mut App, input: ControlInput) {
        app.world_mut()
            .resource_mut::<Messages<ControlInput>>()
            .write(input);
    }

    #[test]
    fn test_ground_probe_contacts_drive_grounded() {
        use bevy_rapier3d::plugin::systems::update_colliding_entities;
        use bevy_rapier3d::rapier::geometry::CollisionEventFlags;

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<CollisionEvent>();
        app.add_systems(Update, (update_colliding_entities, sample_ground).chain());

        let sensor = GroundSensor::from_config(&ControllerConfig::default().ground);
        let player = app
            .world_mut()
            .spawn((Player, sensor, GlobalTransform::default()))
            .id();
        let probe = app
            .world_mut()
            .spawn((GroundProbe, ChildOf(player), CollidingEntities::default()))
            .id();
        let ground = app.world_mut().spawn_empty().id();

        app.update();
        assert_eq!(app.world().get::<Grounded>(player), Some(&Grounded(false)));

        app.world_mut()
            .resource_mut::<Messages<CollisionEvent>>()
            .write(CollisionEvent::Started(probe, ground, CollisionEventFlags::SENSOR));
        app.update();
        assert_eq!(app.world().get::<Grounded>(player), Some(&Grounded(true)));

        app.world_mut()
            .resource_mut::<Messages<CollisionEvent>>()
            .write(CollisionEvent::Stopped(probe, ground, CollisionEventFlags::SENSOR));
        app.update();
        assert_eq!(app.world().get::<Grounded>(player), Some(&Grounded(false)));
    }

    #[test]
    fn test_required_components_are_present() {
        let mut app = test_app();
        let player = spawn_test_player(&mut app, true);
        let entity = app.world().entity(player);
        assert!(entity.contains::<Velocity>());
        assert!(entity.contains::<AnimatorParams>());
        assert_eq!(entity.get::<LockedAxes>(), Some(&LockedAxes::ROTATION_LOCKED));
    }

    #[test]
    fn test_jump_message_starts_jump_when_grounded() {
        let mut app = test_app();
        let player = spawn_test_player(&mut app, true);

        send(&mut app, ControlInput::Jump { pressed: true });
        app.update();

        let motor = app.world().get::<PlayerMotor>(player).unwrap();
        assert!(motor.jump().jump_timer().is_running());
    }

    #[test]
    fn test_jump_message_ignored_in_air() {
        let mut app = test_app();
        let player = spawn_test_player(&mut app, false);

        send(&mut app, ControlInput::Jump { pressed: true });
        app.update();

        let motor = app.world().get::<PlayerMotor>(player).unwrap();
        assert!(!motor.jump().jump_timer().is_running());
    }

    #[test]
    fn test_move_message_sets_intent_and_animator() {
        let mut app = test_app();
        let player = spawn_test_player(&mut app, true);

        send(&mut app, ControlInput::Move(Vec2::Y));
        app.update();

        let world = app.world();
        let motor = world.get::<PlayerMotor>(player).unwrap();
        assert_eq!(motor.locomotion().intent(), Vec3::new(0.0, 0.0, -1.0));
        let params = world.get::<AnimatorParams>(player).unwrap();
        assert_eq!(params.get_float(SPEED_PARAM), Some(0.0));
    }
}
