//! Physics bridge module (bevy_rapier3d)
//!
//! Rapier для коллизий: CollisionEvent → PlatformContact,
//! IgnoredCollisionPairs + подход снизу → pair filter hooks (без collision response).
//! Side-scroller в плоскости XY, Y вверх.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use crate::platform::{IgnoredCollisionPairs, PassThroughSet, PlatformContact};

pub mod bridge;
pub mod hooks;
pub mod spawn;

// Re-export основных типов
pub use bridge::{forward_rapier_collisions, ActivePlatformContacts};
pub use hooks::{platform_physics_plugin, solver_flags_for, PlatformCollisionHooks};
pub use spawn::{spawn_one_way_platform, spawn_platform_character};

/// Plugin моста Rapier → platform controller
///
/// Сам RapierPhysicsPlugin не добавляет (host решает, в каком schedule
/// гонять физику): используйте `platform_physics_plugin()`.
pub struct RapierPlatformBridgePlugin;

impl Plugin for RapierPlatformBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActivePlatformContacts>()
            .init_resource::<IgnoredCollisionPairs>()
            .add_event::<CollisionEvent>()
            .add_event::<PlatformContact>();

        // Контакты пишем ДО pass-through логики того же шага
        app.add_systems(FixedUpdate, forward_rapier_collisions.before(PassThroughSet));
    }
}
