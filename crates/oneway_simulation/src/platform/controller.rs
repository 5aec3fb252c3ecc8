//! Решение controller'а: пропускать ли персонажа сквозь платформу
//!
//! Чистые функции без ECS доступа (тестируются напрямую).
//! Сравнение всегда: нижняя граница персонажа vs центр платформы по Y.

use crate::components::{PassThroughDirection, PlatformMode, WorldAabb};
use crate::platform::events::ContactPhase;

/// Collision-begin: персонаж подошёл снизу (нижняя граница ниже центра платформы)
///
/// Обычное приземление сверху не трогаем: physics отвечает сама.
pub fn evaluate_begin(
    mode: PlatformMode,
    character: &WorldAabb,
    platform: &WorldAabb,
) -> Option<PassThroughDirection> {
    let below_center = character.min_y() < platform.center_y();

    (below_center && mode.allows_upward()).then_some(PassThroughDirection::Upward)
}

/// Collision-stay: персонаж стоит сверху и держит drop input
pub fn evaluate_stay(
    mode: PlatformMode,
    drop_requested: bool,
    character: &WorldAabb,
    platform: &WorldAabb,
) -> Option<PassThroughDirection> {
    let above_center = character.min_y() > platform.center_y();

    (drop_requested && above_center && mode.allows_downward())
        .then_some(PassThroughDirection::Downward)
}

/// Dispatch по фазе контакта
pub fn evaluate_contact(
    phase: ContactPhase,
    mode: PlatformMode,
    drop_requested: bool,
    character: &WorldAabb,
    platform: &WorldAabb,
) -> Option<PassThroughDirection> {
    match phase {
        ContactPhase::Began => evaluate_begin(mode, character, platform),
        ContactPhase::Persisted => evaluate_stay(mode, drop_requested, character, platform),
    }
}
