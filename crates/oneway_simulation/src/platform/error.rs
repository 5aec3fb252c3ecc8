//! Ошибки конфигурации/привязки платформ

use bevy::prelude::Entity;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PlatformError {
    /// Tracked персонаж не существует (или без capability PassThroughSignal)
    MissingCharacter { platform: Option<Entity> },
    /// У collider'а нет ShapeBounds (не с чем сравнивать высоту)
    MissingShapeBounds { entity: Entity },
    /// Поиск "единственного персонажа" нашёл несколько
    AmbiguousCharacter { count: usize },
    /// Отрицательный или не конечный delay
    InvalidConfiguration { delay: f32 },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::MissingCharacter { platform: Some(platform) } => {
                write!(f, "platform {:?}: tracked character not found", platform)
            }
            PlatformError::MissingCharacter { platform: None } => {
                write!(f, "no tracked character exists in the world")
            }
            PlatformError::MissingShapeBounds { entity } => {
                write!(f, "entity {:?} has no ShapeBounds", entity)
            }
            PlatformError::AmbiguousCharacter { count } => {
                write!(f, "expected exactly one tracked character, found {}", count)
            }
            PlatformError::InvalidConfiguration { delay } => {
                write!(f, "invalid pass-through delay {} (must be finite and >= 0)", delay)
            }
        }
    }
}

impl std::error::Error for PlatformError {}
