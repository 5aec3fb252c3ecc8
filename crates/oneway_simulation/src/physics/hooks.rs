//! Rapier physics hooks: collision response для ignored пар
//!
//! Contact detection остаётся (CollisionEvent продолжают приходить,
//! collision-stay работает), выключаются только impulses.
//!
//! CollisionEvent::Started rapier отдаёт после step'а, в котором solver
//! уже отработал контакт. Поэтому подход снизу hooks проверяют сами:
//! иначе первый же контакт гасит скорость прыжка раньше, чем ECS
//! успеет поставить пару в ignore.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_rapier3d::rapier::geometry::SolverFlags;

use crate::components::{OneWayPlatform, PlatformFault, ShapeBounds};
use crate::platform::{evaluate_begin, IgnoredCollisionPairs};

/// Hooks для `RapierPhysicsPlugin::<PlatformCollisionHooks>`
///
/// Вызываются только для collider'ов с `ActiveHooks::FILTER_CONTACT_PAIRS`
/// (spawn_one_way_platform добавляет его платформам).
#[derive(SystemParam)]
pub struct PlatformCollisionHooks<'w, 's> {
    ignored: Res<'w, IgnoredCollisionPairs>,
    platforms: Query<
        'w,
        's,
        (
            &'static OneWayPlatform,
            &'static Transform,
            &'static GlobalTransform,
            Has<ChildOf>,
            &'static ShapeBounds,
        ),
        Without<PlatformFault>,
    >,
    colliders: Query<
        'w,
        's,
        (
            &'static Transform,
            &'static GlobalTransform,
            Has<ChildOf>,
            &'static ShapeBounds,
        ),
    >,
}

impl PlatformCollisionHooks<'_, '_> {
    /// Tracked персонаж касается платформы снизу и режим это разрешает
    fn passes_from_below(&self, platform: Entity, other: Entity) -> bool {
        let Ok((controller, local, global, is_child, bounds)) = self.platforms.get(platform) else {
            return false;
        };
        if !controller.tracks(other) {
            return false;
        }
        let Ok((other_local, other_global, other_is_child, other_bounds)) = self.colliders.get(other)
        else {
            return false;
        };

        evaluate_begin(
            controller.mode(),
            &other_bounds.collider_aabb(other_local, other_global, other_is_child),
            &bounds.collider_aabb(local, global, is_child),
        )
        .is_some()
    }
}

impl BevyPhysicsHooks for PlatformCollisionHooks<'_, '_> {
    fn filter_contact_pair(&self, context: PairFilterContextView) -> Option<SolverFlags> {
        let first = context.collider1();
        let second = context.collider2();

        if self.passes_from_below(first, second) || self.passes_from_below(second, first) {
            return Some(SolverFlags::empty());
        }

        Some(solver_flags_for(&self.ignored, first, second))
    }
}

/// Ignored пара → контакт считается, но без collision response
pub fn solver_flags_for(ignored: &IgnoredCollisionPairs, first: Entity, second: Entity) -> SolverFlags {
    if ignored.is_ignored(first, second) {
        SolverFlags::empty()
    } else {
        SolverFlags::COMPUTE_IMPULSES
    }
}

/// Rapier plugin с platform hooks (добавляет host вместе с RapierPlatformBridgePlugin)
pub fn platform_physics_plugin() -> RapierPhysicsPlugin<PlatformCollisionHooks<'static, 'static>> {
    RapierPhysicsPlugin::<PlatformCollisionHooks<'static, 'static>>::default()
}
