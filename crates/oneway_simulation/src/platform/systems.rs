//! Pass-through системы (FixedUpdate)
//!
//! Порядок внутри шага (см. PlatformPlugin):
//! 1. tick_pass_through_timers: восстановление истёкших пар
//! 2. handle_platform_contacts: новые запросы прохода
//! 3. release_despawned_colliders: cleanup пар удалённых entity
//!
//! Таймеры тикают ДО обработки контактов: запрос этого шага начинает
//! отсчёт со следующего, restore не раньше чем через полный delay.

use bevy::ecs::component::Mutable;
use bevy::prelude::*;

use crate::components::{
    OneWayPlatform, PassThroughSignal, PassThroughTimer, PlatformFault, ShapeBounds,
};
use crate::platform::controller::evaluate_contact;
use crate::platform::events::{
    CollisionIgnoreChanged, PassThroughEnded, PassThroughStarted, PlatformContact,
};
use crate::platform::pairs::IgnoredCollisionPairs;

/// Система: обработка контактов платформ от physics
///
/// Для каждого PlatformContact с tracked персонажем:
/// 1. Считаем AABB обоих collider'ов (child: через GlobalTransform)
/// 2. Begin → проход снизу, Persisted → drop-through сверху
/// 3. Suppress: ignore пары + флаг персонажа + (пере)запуск таймера
///
/// Повторный запрос при активном таймере перезапускает его на полный delay.
pub fn handle_platform_contacts<C>(
    mut commands: Commands,
    mut contacts: EventReader<PlatformContact>,
    platforms: Query<
        (&OneWayPlatform, &Transform, &GlobalTransform, Has<ChildOf>, &ShapeBounds),
        Without<PlatformFault>,
    >,
    mut characters: Query<
        (&mut C, &Transform, &GlobalTransform, Has<ChildOf>, &ShapeBounds),
        Without<OneWayPlatform>,
    >,
    mut ignored: ResMut<IgnoredCollisionPairs>,
    mut ignore_events: EventWriter<CollisionIgnoreChanged>,
    mut started_events: EventWriter<PassThroughStarted>,
) where
    C: Component<Mutability = Mutable> + PassThroughSignal,
{
    for contact in contacts.read() {
        let Ok((platform, platform_local, platform_global, platform_is_child, platform_bounds)) =
            platforms.get(contact.platform)
        else {
            continue;
        };

        // Контакт с кем-то кроме tracked персонажа: не наше дело
        if !platform.tracks(contact.other) {
            continue;
        }

        let Ok((mut signal, character_local, character_global, character_is_child, character_bounds)) =
            characters.get_mut(contact.other)
        else {
            continue;
        };

        let Some(direction) = evaluate_contact(
            contact.phase,
            platform.mode(),
            signal.requested_downward(),
            &character_bounds.collider_aabb(character_local, character_global, character_is_child),
            &platform_bounds.collider_aabb(platform_local, platform_global, platform_is_child),
        ) else {
            continue;
        };

        if ignored.ignore(contact.platform, contact.other) {
            ignore_events.write(CollisionIgnoreChanged {
                collider_a: contact.platform,
                collider_b: contact.other,
                ignored: true,
            });
        }

        signal.set_passing_through(true);

        // insert поверх существующего таймера = reset на полный delay
        commands.entity(contact.platform).insert(PassThroughTimer::new(
            platform.delay(),
            contact.other,
            direction,
        ));

        started_events.write(PassThroughStarted {
            platform: contact.platform,
            character: contact.other,
            direction,
        });

        crate::log(&format!(
            "⬍ Pass-through {:?}: character {:?} ↔ platform {:?} (restore in {:.2}s)",
            direction,
            contact.other,
            contact.platform,
            platform.delay()
        ));
    }
}

/// Система: tick таймеров восстановления коллизии
///
/// Истёкший таймер:
/// - снимает ignore с пары (platform, character)
/// - сбрасывает флаг персонажа, если он не проходит сквозь другую платформу
/// - удаляет PassThroughTimer
///
/// Если персонажа уже нет: restore для него no-op.
pub fn tick_pass_through_timers<C>(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut timers: Query<(Entity, &mut PassThroughTimer)>,
    mut characters: Query<&mut C, Without<PassThroughTimer>>,
    mut ignored: ResMut<IgnoredCollisionPairs>,
    mut ignore_events: EventWriter<CollisionIgnoreChanged>,
    mut ended_events: EventWriter<PassThroughEnded>,
) where
    C: Component<Mutability = Mutable> + PassThroughSignal,
{
    let delta = time.delta_secs();

    for (platform, mut timer) in timers.iter_mut() {
        if !timer.tick(delta) {
            continue;
        }

        commands.entity(platform).remove::<PassThroughTimer>();

        if ignored.restore(platform, timer.character) {
            ignore_events.write(CollisionIgnoreChanged {
                collider_a: platform,
                collider_b: timer.character,
                ignored: false,
            });
        }

        let Ok(mut signal) = characters.get_mut(timer.character) else {
            crate::log_warning(&format!(
                "Platform {:?}: character {:?} gone before restore, skipping",
                platform, timer.character
            ));
            continue;
        };

        if !ignored.involves(timer.character) {
            signal.set_passing_through(false);
        }

        ended_events.write(PassThroughEnded {
            platform,
            character: timer.character,
        });

        crate::log(&format!(
            "⏰ Collision restored: character {:?} ↔ platform {:?}",
            timer.character, platform
        ));
    }
}

/// Система: cleanup ignore пар для удалённых платформ/персонажей
///
/// Каждый шаг проверяем все ignored пары: пара живая, только пока одна
/// сторона ещё платформа, а другая ещё персонаж `C`. RemovedComponents
/// тут не годится: между fixed шагами может пройти несколько кадров,
/// и removal события успевают пропасть.
///
/// Платформа удалена посреди прохода → её таймер исчез вместе с ней,
/// поэтому пару снимаем здесь и сбрасываем флаг персонажа.
pub fn release_despawned_colliders<C>(
    platforms: Query<(), With<OneWayPlatform>>,
    mut characters: Query<&mut C>,
    mut ignored: ResMut<IgnoredCollisionPairs>,
    mut ignore_events: EventWriter<CollisionIgnoreChanged>,
) where
    C: Component<Mutability = Mutable> + PassThroughSignal,
{
    if ignored.is_empty() {
        return;
    }

    let stale = ignored.release_where(|pair| {
        let (a, b) = pair.entities();
        let live = (platforms.contains(a) && characters.contains(b))
            || (platforms.contains(b) && characters.contains(a));
        !live
    });

    for pair in stale {
        let (a, b) = pair.entities();
        ignore_events.write(CollisionIgnoreChanged {
            collider_a: a,
            collider_b: b,
            ignored: false,
        });

        crate::log(&format!("Released stale ignore pair {:?} ↔ {:?}", a, b));

        for entity in [a, b] {
            if ignored.involves(entity) {
                continue;
            }
            if let Ok(mut signal) = characters.get_mut(entity) {
                signal.set_passing_through(false);
            }
        }
    }
}
