//! Spawn helpers: платформа и персонаж с Rapier компонентами

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::components::{OneWayPlatform, PlatformCharacter, ShapeBounds};

/// Spawn helper для односторонней платформы
///
/// Создает entity с полным набором компонентов:
/// - Transform
/// - OneWayPlatform (controller) + ShapeBounds
/// - Rapier: RigidBody::Fixed + Collider (cuboid)
/// - ActiveEvents (CollisionEvent для bridge) + ActiveHooks (pair filter)
///
/// `size`: полный размер box (не half extents).
pub fn spawn_one_way_platform(
    commands: &mut Commands,
    position: Vec3,
    size: Vec3,
    platform: OneWayPlatform,
) -> Entity {
    let bounds = ShapeBounds::from_size(size);
    let half = bounds.half_extents;

    commands
        .spawn((
            Transform::from_translation(position),
            platform,
            bounds,
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y, half.z),
            ActiveEvents::COLLISION_EVENTS,
            ActiveHooks::FILTER_CONTACT_PAIRS,
        ))
        .id()
}

/// Spawn helper для персонажа (player)
///
/// Dynamic body с заблокированным вращением: kinematic тела не дают
/// контактов с Fixed платформами без ActiveCollisionTypes.
pub fn spawn_platform_character(commands: &mut Commands, position: Vec3, size: Vec3) -> Entity {
    let bounds = ShapeBounds::from_size(size);
    let half = bounds.half_extents;

    commands
        .spawn((
            Transform::from_translation(position),
            PlatformCharacter::default(),
            bounds,
            RigidBody::Dynamic,
            LockedAxes::ROTATION_LOCKED,
            Collider::cuboid(half.x, half.y, half.z),
            Velocity::default(),
            ActiveEvents::COLLISION_EVENTS,
        ))
        .id()
}
