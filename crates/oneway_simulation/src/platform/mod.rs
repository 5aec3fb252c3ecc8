//! One-way platform module
//!
//! ECS ответственность:
//! - решение о проходе (сторона подхода + PlatformMode + drop input)
//! - ignore-связь пары collider'ов и таймер восстановления
//! - флаг passing-through персонажа
//!
//! Physics ответственность (host / rapier bridge):
//! - PlatformContact события (Began / Persisted) каждый fixed step
//! - пропуск collision response для IgnoredCollisionPairs

use bevy::ecs::component::Mutable;
use bevy::prelude::*;
use std::marker::PhantomData;

use crate::components::{PassThroughSignal, PlatformCharacter};

pub mod binding;
pub mod controller;
pub mod error;
pub mod events;
pub mod pairs;
pub mod systems;


// Re-export основных типов
pub use binding::{bind_platform_controllers, locate_tracked_character};
pub use controller::{evaluate_begin, evaluate_contact, evaluate_stay};
pub use error::PlatformError;
pub use events::{
    CollisionIgnoreChanged, ContactPhase, PassThroughEnded, PassThroughStarted, PlatformContact,
};
pub use pairs::{ColliderPair, IgnoredCollisionPairs};
pub use systems::{handle_platform_contacts, release_despawned_colliders, tick_pass_through_timers};

/// SystemSet pass-through логики (physics bridge пишет контакты ДО него)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PassThroughSet;

/// Platform Plugin
///
/// `C`: компонент персонажа с capability PassThroughSignal
/// (по умолчанию PlatformCharacter).
///
/// Порядок выполнения (FixedUpdate, chain):
/// 1. bind_platform_controllers: валидация новых платформ
/// 2. tick_pass_through_timers: restore истёкших пар
/// 3. handle_platform_contacts: Began/Persisted → suppress
/// 4. release_despawned_colliders: cleanup
pub struct PlatformPlugin<C = PlatformCharacter> {
    _character: PhantomData<fn() -> C>,
}

impl<C> Default for PlatformPlugin<C> {
    fn default() -> Self {
        Self {
            _character: PhantomData,
        }
    }
}

impl<C> Plugin for PlatformPlugin<C>
where
    C: Component<Mutability = Mutable> + PassThroughSignal,
{
    fn build(&self, app: &mut App) {
        app.init_resource::<IgnoredCollisionPairs>();

        // Регистрация событий
        app.add_event::<PlatformContact>()
            .add_event::<CollisionIgnoreChanged>()
            .add_event::<PassThroughStarted>()
            .add_event::<PassThroughEnded>();

        app.add_systems(
            FixedUpdate,
            (
                bind_platform_controllers::<C>,
                tick_pass_through_timers::<C>,
                handle_platform_contacts::<C>,
                release_despawned_colliders::<C>,
            )
                .chain() // Последовательное выполнение
                .in_set(PassThroughSet),
        );
    }
}
