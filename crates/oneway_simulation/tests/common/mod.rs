//! Общие helpers для integration тестов
//!
//! Fixed step 0.125 sec (точная двоичная дробь) + ManualDuration:
//! после warm-up каждый `app.update()` = ровно один FixedUpdate шаг.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use std::time::Duration;

use oneway_simulation::*;

pub const STEP_SECS: f64 = 0.125;

/// Платформа 4×0.5, центр на y=2.0 (верх 2.25)
pub const PLATFORM_Y: f32 = 2.0;
pub const PLATFORM_TOP: f32 = 2.25;

/// Записанные outbound события (для проверки количества/порядка)
#[derive(Resource, Default)]
pub struct Recorded {
    pub ignore_changes: Vec<CollisionIgnoreChanged>,
    pub started: Vec<PassThroughStarted>,
    pub ended: Vec<PassThroughEnded>,
}

fn record_events(
    mut recorded: ResMut<Recorded>,
    mut ignore_changes: EventReader<CollisionIgnoreChanged>,
    mut started: EventReader<PassThroughStarted>,
    mut ended: EventReader<PassThroughEnded>,
) {
    recorded.ignore_changes.extend(ignore_changes.read().cloned());
    recorded.started.extend(started.read().cloned());
    recorded.ended.extend(ended.read().cloned());
}

/// Helper: headless App с SimulationPlugin и детерминированным временем
pub fn create_platform_app() -> App {
    let mut app = create_headless_app(42);

    // TransformPlugin: GlobalTransform для child collider'ов
    app.add_plugins((TransformPlugin, SimulationPlugin))
        .insert_resource(Time::<Fixed>::from_seconds(STEP_SECS))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(STEP_SECS)))
        .init_resource::<Recorded>()
        .add_systems(
            FixedUpdate,
            record_events.after(oneway_simulation::platform::PassThroughSet),
        );

    // Warm-up: первый update только запускает часы (delta = 0, без fixed шага)
    app.update();

    app
}

/// Helper: персонаж 1×1 с нижней границей на `feet_y`
pub fn spawn_character(app: &mut App, feet_y: f32) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(0.0, feet_y + 0.5, 0.0),
            PlatformCharacter::default(),
            ShapeBounds::new(Vec3::splat(0.5)),
        ))
        .id()
}

/// Helper: платформа на y=PLATFORM_Y
pub fn spawn_platform(app: &mut App, mode: PlatformMode, delay: f32, character: Entity) -> Entity {
    let platform = OneWayPlatform::new(mode, delay, character).expect("valid platform config");

    app.world_mut()
        .spawn((
            Transform::from_xyz(0.0, PLATFORM_Y, 0.0),
            platform,
            ShapeBounds::new(Vec3::new(2.0, 0.25, 0.5)),
        ))
        .id()
}

pub fn move_feet_to(app: &mut App, character: Entity, feet_y: f32) {
    if let Some(mut transform) = app.world_mut().get_mut::<Transform>(character) {
        transform.translation.y = feet_y + 0.5;
    }
}

pub fn set_drop(app: &mut App, character: Entity, pressed: bool) {
    if let Some(mut state) = app.world_mut().get_mut::<PlatformCharacter>(character) {
        state.drop_requested = pressed;
    }
}

pub fn send_contact(app: &mut App, contact: PlatformContact) {
    app.world_mut().send_event(contact);
}

/// Длина кадра: короче STEP_SECS → fixed шаг не на каждом update
pub fn set_frame_duration(app: &mut App, secs: f64) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(secs)));
}

/// Один fixed шаг
pub fn step(app: &mut App) {
    app.update();
}

pub fn steps(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

pub fn is_ignored(app: &App, platform: Entity, character: Entity) -> bool {
    app.world()
        .resource::<IgnoredCollisionPairs>()
        .is_ignored(platform, character)
}

pub fn is_passing(app: &App, character: Entity) -> bool {
    app.world()
        .get::<PlatformCharacter>(character)
        .map(|state| state.passing_through)
        .unwrap_or(false)
}

pub fn recorded(app: &App) -> &Recorded {
    app.world().resource::<Recorded>()
}
