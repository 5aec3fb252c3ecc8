//! Platform events (physics → ECS, ECS → physics, gameplay notifications)

use bevy::prelude::*;
use crate::components::PassThroughDirection;

/// Фаза контакта (как host physics её сообщает)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    /// Новый контакт (один раз на начало)
    Began,
    /// Контакт продолжается (каждый fixed step)
    Persisted,
}

/// Событие: physics сообщает контакт платформы с другим collider
///
/// Порядок событий внутри шага задаёт host physics, controller его не меняет.
#[derive(Event, Debug, Clone)]
pub struct PlatformContact {
    pub platform: Entity,
    pub other: Entity,
    pub phase: ContactPhase,
}

impl PlatformContact {
    pub fn began(platform: Entity, other: Entity) -> Self {
        Self {
            platform,
            other,
            phase: ContactPhase::Began,
        }
    }

    pub fn persisted(platform: Entity, other: Entity) -> Self {
        Self {
            platform,
            other,
            phase: ContactPhase::Persisted,
        }
    }
}

/// Событие: изменилась ignore-связь пары collider'ов
///
/// Для host physics без доступа к `IgnoredCollisionPairs` (внешний движок).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CollisionIgnoreChanged {
    pub collider_a: Entity,
    pub collider_b: Entity,
    pub ignored: bool,
}

/// Событие: персонаж начал проход сквозь платформу
#[derive(Event, Debug, Clone)]
pub struct PassThroughStarted {
    pub platform: Entity,
    pub character: Entity,
    pub direction: PassThroughDirection,
}

/// Событие: коллизия восстановлена после delay
#[derive(Event, Debug, Clone)]
pub struct PassThroughEnded {
    pub platform: Entity,
    pub character: Entity,
}
