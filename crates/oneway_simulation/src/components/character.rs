//! Character компоненты: PassThroughSignal capability + PlatformCharacter

use bevy::prelude::*;

/// Capability персонажа, нужная платформе
///
/// Платформа не знает конкретный тип персонажа: только этот интерфейс.
/// Movement логика персонажа читает `is_passing_through` и не переходит
/// в grounded state, пока флаг поднят.
pub trait PassThroughSignal {
    /// Игрок держит drop-through input
    fn requested_downward(&self) -> bool;

    fn is_passing_through(&self) -> bool;

    fn set_passing_through(&mut self, passing: bool);
}

/// Персонаж по умолчанию (player)
///
/// `drop_requested` заполняется из input (или mock в headless тестах).
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlatformCharacter {
    pub drop_requested: bool,
    pub passing_through: bool,
}

impl PlatformCharacter {
    /// Можно ли переходить в grounded state (не во время прохода)
    pub fn can_ground(&self) -> bool {
        !self.passing_through
    }
}

impl PassThroughSignal for PlatformCharacter {
    fn requested_downward(&self) -> bool {
        self.drop_requested
    }

    fn is_passing_through(&self) -> bool {
        self.passing_through
    }

    fn set_passing_through(&mut self, passing: bool) {
        self.passing_through = passing;
    }
}
