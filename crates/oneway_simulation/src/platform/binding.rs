//! Привязка платформы к tracked персонажу

use bevy::prelude::*;

use crate::components::{OneWayPlatform, PassThroughSignal, PlatformFault, ShapeBounds};
use crate::platform::PlatformError;

/// Система: проверка новых платформ (первый fixed step после spawn)
///
/// Персонаж передан явно в `OneWayPlatform`, тут только валидация:
/// - у платформы есть ShapeBounds
/// - персонаж существует, имеет capability `C` и ShapeBounds
///
/// Ошибка → `PlatformFault` + error log. Faulted платформа не пропускает никого.
pub fn bind_platform_controllers<C>(
    mut commands: Commands,
    added: Query<(Entity, &OneWayPlatform, Has<ShapeBounds>), Added<OneWayPlatform>>,
    characters: Query<Has<ShapeBounds>, With<C>>,
) where
    C: Component + PassThroughSignal,
{
    for (platform_entity, platform, platform_has_bounds) in added.iter() {
        let result = if !platform_has_bounds {
            Err(PlatformError::MissingShapeBounds {
                entity: platform_entity,
            })
        } else {
            match characters.get(platform.character()) {
                Ok(true) => Ok(()),
                Ok(false) => Err(PlatformError::MissingShapeBounds {
                    entity: platform.character(),
                }),
                Err(_) => Err(PlatformError::MissingCharacter {
                    platform: Some(platform_entity),
                }),
            }
        };

        match result {
            Ok(()) => {
                crate::log(&format!(
                    "🪜 Platform {:?} bound to character {:?} (mode: {:?}, delay: {:.2}s)",
                    platform_entity,
                    platform.character(),
                    platform.mode(),
                    platform.delay()
                ));
            }
            Err(error) => {
                crate::log_error(&format!("Platform {:?} disabled: {}", platform_entity, error));
                commands.entity(platform_entity).insert(PlatformFault(error));
            }
        }
    }
}

/// Найти единственного персонажа с capability `C`
///
/// Для загрузки уровня, когда level data не знает entity персонажа.
/// Ноль персонажей → MissingCharacter, больше одного → AmbiguousCharacter.
pub fn locate_tracked_character<C>(world: &mut World) -> Result<Entity, PlatformError>
where
    C: Component,
{
    let mut query = world.query_filtered::<Entity, With<C>>();
    let found: Vec<Entity> = query.iter(world).collect();

    match found.as_slice() {
        [character] => Ok(*character),
        [] => Err(PlatformError::MissingCharacter { platform: None }),
        _ => Err(PlatformError::AmbiguousCharacter { count: found.len() }),
    }
}
