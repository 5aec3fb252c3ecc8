//! Platform компоненты: OneWayPlatform, PlatformMode, PassThroughTimer

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::platform::PlatformError;

/// Delay по умолчанию до восстановления коллизии (секунды)
pub const DEFAULT_PASS_THROUGH_DELAY: f32 = 0.5;

/// В каком направлении персонаж может пройти сквозь платформу
///
/// Задаётся level designer'ом, не меняется в runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformMode {
    /// Запрыгнуть снизу (drop-through запрещён)
    AllowUpward,
    /// Спрыгнуть вниз по drop input (снизу платформа твёрдая)
    AllowDownward,
    /// Оба направления, решает сторона подхода
    #[default]
    AllowBoth,
}

impl PlatformMode {
    pub fn allows_upward(self) -> bool {
        self != PlatformMode::AllowDownward
    }

    pub fn allows_downward(self) -> bool {
        self != PlatformMode::AllowUpward
    }
}

/// Односторонняя платформа (controller живёт на entity платформы)
///
/// Collider платформы = сама entity. Персонаж передаётся явно при создании
/// (один tracked персонаж на платформу).
///
/// Инвариант: `delay` конечный и ≥ 0 (проверяется в `new`).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct OneWayPlatform {
    mode: PlatformMode,
    delay: f32,
    character: Entity,
}

impl OneWayPlatform {
    pub fn new(mode: PlatformMode, delay: f32, character: Entity) -> Result<Self, PlatformError> {
        if !delay.is_finite() || delay < 0.0 {
            return Err(PlatformError::InvalidConfiguration { delay });
        }

        Ok(Self {
            mode,
            delay,
            character,
        })
    }

    /// Платформа с delay по умолчанию (0.5 sec)
    pub fn with_default_delay(mode: PlatformMode, character: Entity) -> Self {
        Self {
            mode,
            delay: DEFAULT_PASS_THROUGH_DELAY,
            character,
        }
    }

    pub fn mode(&self) -> PlatformMode {
        self.mode
    }

    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Tracked персонаж
    pub fn character(&self) -> Entity {
        self.character
    }

    pub fn tracks(&self, entity: Entity) -> bool {
        self.character == entity
    }
}

/// Направление прохода сквозь платформу
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PassThroughDirection {
    Upward,
    Downward,
}

/// Pending восстановление коллизии (один таймер на пару platform ↔ character)
///
/// Новый запрос прохода перезапускает таймер на полный delay,
/// а не создаёт второй независимый.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PassThroughTimer {
    /// Время до восстановления (секунды)
    pub remaining: f32,
    pub character: Entity,
    pub direction: PassThroughDirection,
}

impl PassThroughTimer {
    pub fn new(delay: f32, character: Entity, direction: PassThroughDirection) -> Self {
        Self {
            remaining: delay,
            character,
            direction,
        }
    }

    /// Уменьшает таймер, возвращает true когда delay истёк
    pub fn tick(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        self.is_expired()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Маркер: платформа не смогла привязаться к персонажу
///
/// Faulted платформа ведёт себя как обычная твёрдая (никогда не пропускает).
#[derive(Component, Debug, Clone)]
pub struct PlatformFault(pub PlatformError);
