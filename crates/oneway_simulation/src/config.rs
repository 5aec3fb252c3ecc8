//! Конфигурация платформ (level data → компоненты)
//!
//! Level designer задаёт два поля на платформу: mode и delay.
//! Всё остальное (персонаж, collider) приходит из мира.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{OneWayPlatform, PlatformMode, DEFAULT_PASS_THROUGH_DELAY};
use crate::platform::PlatformError;

/// Сериализуемая конфигурация одной платформы
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub mode: PlatformMode,
    /// Секунды до восстановления коллизии (≥ 0)
    pub delay: f32,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            mode: PlatformMode::AllowBoth,
            delay: DEFAULT_PASS_THROUGH_DELAY,
        }
    }
}

impl PlatformConfig {
    pub fn new(mode: PlatformMode) -> Self {
        Self {
            mode,
            ..default()
        }
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn validate(&self) -> Result<(), PlatformError> {
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(PlatformError::InvalidConfiguration { delay: self.delay });
        }
        Ok(())
    }

    /// Собрать controller для конкретного персонажа
    pub fn build(&self, character: Entity) -> Result<OneWayPlatform, PlatformError> {
        OneWayPlatform::new(self.mode, self.delay, character)
    }
}

/// Глобальные настройки платформ (resource)
///
/// `default_delay` используется, когда level data не задаёт delay явно.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PlatformSettings {
    pub default_mode: PlatformMode,
    pub default_delay: f32,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            default_mode: PlatformMode::AllowBoth,
            default_delay: DEFAULT_PASS_THROUGH_DELAY,
        }
    }
}

impl PlatformSettings {
    pub fn config(&self) -> PlatformConfig {
        PlatformConfig {
            mode: self.default_mode,
            delay: self.default_delay,
        }
    }
}
