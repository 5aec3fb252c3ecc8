//! Pass-through integration test
//!
//! Полный цикл через ECS: PlatformContact → suppress → таймер → restore.
//!
//! Проверяем:
//! - begin/stay решения для всех PlatformMode
//! - restore ровно через delay (не раньше)
//! - повторный запрос перезапускает таймер (один таймер на пару)
//! - faulted платформы, удалённые entity (и при кадрах короче fixed шага)
//! - несколько платформ, platform-child

mod common;

use bevy::prelude::*;
use common::*;
use oneway_simulation::*;

/// Test: контакт снизу → проход вверх для AllowUpward и AllowBoth
#[test]
fn test_begin_from_below_suppresses_unless_downward_only() {
    for mode in [PlatformMode::AllowUpward, PlatformMode::AllowDownward, PlatformMode::AllowBoth] {
        let mut app = create_platform_app();
        let character = spawn_character(&mut app, 1.6);
        let platform = spawn_platform(&mut app, mode, 0.5, character);

        send_contact(&mut app, PlatformContact::began(platform, character));
        step(&mut app);

        let expected = mode != PlatformMode::AllowDownward;
        assert_eq!(is_ignored(&app, platform, character), expected, "mode {:?}", mode);
        assert_eq!(is_passing(&app, character), expected, "mode {:?}", mode);
    }
}

/// Test: стоим сверху + drop → проход вниз для AllowDownward и AllowBoth
#[test]
fn test_stay_with_drop_suppresses_unless_upward_only() {
    for mode in [PlatformMode::AllowUpward, PlatformMode::AllowDownward, PlatformMode::AllowBoth] {
        let mut app = create_platform_app();
        let character = spawn_character(&mut app, PLATFORM_TOP);
        let platform = spawn_platform(&mut app, mode, 0.5, character);

        // Приземлились: Began сверху ничего не делает
        send_contact(&mut app, PlatformContact::began(platform, character));
        step(&mut app);
        assert!(!is_ignored(&app, platform, character));

        set_drop(&mut app, character, true);
        send_contact(&mut app, PlatformContact::persisted(platform, character));
        step(&mut app);

        let expected = mode != PlatformMode::AllowUpward;
        assert_eq!(is_ignored(&app, platform, character), expected, "mode {:?}", mode);
        assert_eq!(is_passing(&app, character), expected, "mode {:?}", mode);
    }
}

/// Test: AllowUpward, стоим сверху, жмём drop: прохода нет
#[test]
fn test_upward_only_platform_ignores_drop_input() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, PLATFORM_TOP);
    let platform = spawn_platform(&mut app, PlatformMode::AllowUpward, 0.5, character);

    set_drop(&mut app, character, true);
    for _ in 0..4 {
        send_contact(&mut app, PlatformContact::persisted(platform, character));
        step(&mut app);
    }

    assert!(!is_ignored(&app, platform, character));
    assert!(!is_passing(&app, character));
    assert!(recorded(&app).started.is_empty());
}

/// Test: stay без drop input: обычное стояние на платформе
#[test]
fn test_stay_without_drop_keeps_collision() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, PLATFORM_TOP);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    send_contact(&mut app, PlatformContact::persisted(platform, character));
    step(&mut app);

    assert!(!is_ignored(&app, platform, character));
}

/// Test: AllowBoth, delay=0.5: подход снизу в t=0, в t=0.375 ещё ignored, в t=0.5 restored
#[test]
fn test_restore_after_exact_delay() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    // t=0: suppression
    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);
    assert!(is_ignored(&app, platform, character));
    assert!(is_passing(&app, character));

    // t=0.125 .. t=0.375: всё ещё проходим
    for _ in 0..3 {
        step(&mut app);
        assert!(is_ignored(&app, platform, character));
        assert!(is_passing(&app, character));
    }

    // t=0.5: коллизия восстановлена
    step(&mut app);
    assert!(!is_ignored(&app, platform, character));
    assert!(!is_passing(&app, character));
    assert!(app.world().get::<PassThroughTimer>(platform).is_none());

    let recorded = recorded(&app);
    assert_eq!(
        recorded.ignore_changes,
        vec![
            CollisionIgnoreChanged { collider_a: platform, collider_b: character, ignored: true },
            CollisionIgnoreChanged { collider_a: platform, collider_b: character, ignored: false },
        ]
    );
    assert_eq!(recorded.started.len(), 1);
    assert_eq!(recorded.ended.len(), 1);
}

/// Test: повторный запрос перезапускает таймер: restore через delay от ПОСЛЕДНЕГО запроса
#[test]
fn test_retrigger_extends_pending_restore() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app); // t=0
    step(&mut app); // t=0.125

    // t=0.25: второй запрос (персонаж всё ещё ниже центра)
    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);

    // Первый таймер истёк бы в t=0.5: пара всё ещё ignored
    steps(&mut app, 2); // t=0.5
    assert!(is_ignored(&app, platform, character));
    step(&mut app); // t=0.625
    assert!(is_ignored(&app, platform, character));

    // t=0.75 = 0.25 + delay
    step(&mut app);
    assert!(!is_ignored(&app, platform, character));
    assert!(!is_passing(&app, character));

    // Ignore включался один раз, restore тоже один
    let recorded = recorded(&app);
    assert_eq!(recorded.ignore_changes.len(), 2);
    assert_eq!(recorded.started.len(), 2);
    assert_eq!(recorded.ended.len(), 1);
}

/// Test: delay=0: restore на следующем шаге
#[test]
fn test_zero_delay_restores_next_step() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let platform = spawn_platform(&mut app, PlatformMode::AllowUpward, 0.0, character);

    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);
    assert!(is_ignored(&app, platform, character));

    step(&mut app);
    assert!(!is_ignored(&app, platform, character));
}

/// Test: контакт с чужой entity (не tracked персонаж) игнорируется
#[test]
fn test_contact_with_other_entity_ignored() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 5.0);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);
    // Второй "персонаж" ниже платформы, но платформа его не трекает
    let stranger = spawn_character(&mut app, 1.0);

    send_contact(&mut app, PlatformContact::began(platform, stranger));
    step(&mut app);

    assert!(!is_ignored(&app, platform, stranger));
    assert!(!is_passing(&app, stranger));
}

/// Test: платформа с несуществующим персонажем → PlatformFault, проходов нет
#[test]
fn test_missing_character_marks_platform_faulted() {
    let mut app = create_platform_app();
    let not_a_character = app.world_mut().spawn(Transform::default()).id();
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, not_a_character);

    step(&mut app);

    let fault = app
        .world()
        .get::<PlatformFault>(platform)
        .expect("platform must be faulted");
    assert_eq!(
        fault.0,
        PlatformError::MissingCharacter { platform: Some(platform) }
    );

    send_contact(&mut app, PlatformContact::began(platform, not_a_character));
    step(&mut app);
    assert!(app.world().resource::<IgnoredCollisionPairs>().is_empty());
}

/// Test: персонаж без ShapeBounds → PlatformFault(MissingShapeBounds)
#[test]
fn test_character_without_bounds_marks_platform_faulted() {
    let mut app = create_platform_app();
    let character = app
        .world_mut()
        .spawn((Transform::default(), PlatformCharacter::default()))
        .id();
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    step(&mut app);

    let fault = app.world().get::<PlatformFault>(platform).expect("platform must be faulted");
    assert_eq!(fault.0, PlatformError::MissingShapeBounds { entity: character });
}

/// Test: платформа удалена посреди прохода: пара снята, флаг сброшен
#[test]
fn test_platform_despawn_releases_pair() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);
    assert!(is_passing(&app, character));

    app.world_mut().despawn(platform);
    step(&mut app);

    assert!(!is_ignored(&app, platform, character));
    assert!(!is_passing(&app, character));
}

/// Test: персонаж удалён до restore: таймер истекает без паники, restore no-op
#[test]
fn test_character_despawn_before_restore() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);

    app.world_mut().despawn(character);
    steps(&mut app, 6);

    assert!(app.world().resource::<IgnoredCollisionPairs>().is_empty());
    assert!(app.world().get::<PassThroughTimer>(platform).is_none());
    assert!(recorded(&app).ended.is_empty());
}

/// Test: две платформы: флаг держится, пока проходим хотя бы одну
#[test]
fn test_flag_held_while_any_platform_ignored() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let short = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.25, character);
    let long = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    send_contact(&mut app, PlatformContact::began(short, character));
    send_contact(&mut app, PlatformContact::began(long, character));
    step(&mut app);
    assert!(is_ignored(&app, short, character));
    assert!(is_ignored(&app, long, character));

    // t=0.25: короткая восстановлена, длинная ещё нет
    steps(&mut app, 2);
    assert!(!is_ignored(&app, short, character));
    assert!(is_ignored(&app, long, character));
    assert!(is_passing(&app, character));

    // t=0.5: обе восстановлены
    steps(&mut app, 2);
    assert!(!is_ignored(&app, long, character));
    assert!(!is_passing(&app, character));
}

/// Test: поиск единственного персонажа для level data
#[test]
fn test_locate_tracked_character() {
    let mut app = create_platform_app();
    assert_eq!(
        locate_tracked_character::<PlatformCharacter>(app.world_mut()),
        Err(PlatformError::MissingCharacter { platform: None })
    );

    let character = spawn_character(&mut app, 0.0);
    assert_eq!(
        locate_tracked_character::<PlatformCharacter>(app.world_mut()),
        Ok(character)
    );

    spawn_character(&mut app, 3.0);
    assert_eq!(
        locate_tracked_character::<PlatformCharacter>(app.world_mut()),
        Err(PlatformError::AmbiguousCharacter { count: 2 })
    );
}

/// Test: кадры короче fixed шага: удалённая платформа всё равно отпускает персонажа
#[test]
fn test_platform_despawn_between_fixed_steps_releases_pair() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 0.5, character);

    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);
    assert!(is_passing(&app, character));

    // 0.04 sec кадры: между fixed шагами по 3-4 update
    set_frame_duration(&mut app, 0.04);
    app.world_mut().despawn(platform);
    steps(&mut app, 100);

    assert!(app.world().resource::<IgnoredCollisionPairs>().is_empty());
    assert!(!is_passing(&app, character));

    let last_change = recorded(&app).ignore_changes.last().cloned();
    assert_eq!(last_change.map(|change| change.ignored), Some(false));
}

/// Test: кадры короче fixed шага: удалённый персонаж не оставляет ignore пар
#[test]
fn test_character_despawn_between_fixed_steps_releases_pair() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);
    let platform = spawn_platform(&mut app, PlatformMode::AllowBoth, 5.0, character);

    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);

    set_frame_duration(&mut app, 0.04);
    app.world_mut().despawn(character);
    steps(&mut app, 20);

    // Таймер (5 sec) ещё не истёк, но пара уже снята
    assert!(app.world().get::<PassThroughTimer>(platform).is_some());
    assert!(!is_ignored(&app, platform, character));
}

/// Test: платформа-child: решение по мировой позиции, а не по локальной
#[test]
fn test_child_platform_uses_world_position() {
    let mut app = create_platform_app();
    let character = spawn_character(&mut app, 1.6);

    // Локально y=1.0 (ноги 1.6 выше центра), в мире y=2.0 (ноги ниже центра)
    let anchor = app.world_mut().spawn(Transform::from_xyz(0.0, 1.0, 0.0)).id();
    let controller = OneWayPlatform::new(PlatformMode::AllowUpward, 0.5, character)
        .expect("valid platform config");
    let platform = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 1.0, 0.0),
            controller,
            ShapeBounds::new(Vec3::new(2.0, 0.25, 0.5)),
            ChildOf(anchor),
        ))
        .id();

    // Propagation в PostUpdate: GlobalTransform готов после первого шага
    step(&mut app);
    assert_eq!(
        app.world().get::<GlobalTransform>(platform).map(|global| global.translation().y),
        Some(PLATFORM_Y)
    );

    send_contact(&mut app, PlatformContact::began(platform, character));
    step(&mut app);

    assert!(is_ignored(&app, platform, character));
    assert!(is_passing(&app, character));
}
