//! Test level: light, ground slab and a staircase of static platforms.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Collision group for walkable level geometry. Matches the default ground layer bits.
pub const GROUND_GROUP: Group = Group::GROUP_1;
/// Collision group of the player's capsule
pub const PLAYER_GROUP: Group = Group::GROUP_2;
/// Collision group of the ground probe sensor
pub const PROBE_GROUP: Group = Group::GROUP_3;

/// Static platforms: (center, size)
const PLATFORMS: [(Vec3, Vec3); 5] = [
    (Vec3::new(4.0, 0.5, -4.0), Vec3::new(3.0, 1.0, 3.0)),
    (Vec3::new(8.0, 1.25, -8.0), Vec3::new(3.0, 0.5, 3.0)),
    (Vec3::new(4.0, 2.25, -12.0), Vec3::new(3.0, 0.5, 3.0)),
    (Vec3::new(-1.0, 3.25, -14.0), Vec3::new(3.0, 0.5, 3.0)),
    (Vec3::new(-6.0, 4.0, -10.0), Vec3::new(4.0, 0.5, 4.0)),
];

/// Marker for level geometry
#[derive(Component)]
pub struct LevelGeometry;

fn spawn_block(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    center: Vec3,
    size: Vec3,
) {
    let half = size * 0.5;
    commands.spawn((
        LevelGeometry,
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y, half.z),
        CollisionGroups::new(GROUND_GROUP, Group::ALL),
        Transform::from_translation(center),
        Mesh3d(meshes.add(Cuboid::from_size(size))),
        MeshMaterial3d(material),
    ));
}

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(6.0, 12.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // 40x1x40 slab, top face at y = 0
    let ground = materials.add(Color::srgb(0.35, 0.5, 0.3));
    spawn_block(
        &mut commands,
        &mut meshes,
        ground,
        Vec3::new(0.0, -0.5, 0.0),
        Vec3::new(40.0, 1.0, 40.0),
    );

    let platform = materials.add(Color::srgb(0.6, 0.6, 0.65));
    for (center, size) in PLATFORMS {
        spawn_block(&mut commands, &mut meshes, platform.clone(), center, size);
    }

    info!("Level ready: ground + {} platforms", PLATFORMS.len());
}
