//! Headless симуляция ONEWAY
//!
//! Запускает Bevy App без рендера: персонаж прыгает сквозь платформы
//! разных режимов и случайно (seeded) жмёт drop. Rapier narrow phase
//! заменён AABB overlap'ом, который пишет те же CollisionEvent.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;
use bevy_rapier3d::rapier::geometry::CollisionEventFlags;
use rand::Rng;
use std::collections::BTreeSet;

use oneway_simulation::{
    create_headless_app, locate_tracked_character, log_info, DeterministicRng, IgnoredCollisionPairs,
    OneWayPlatform, PassThroughEnded, PassThroughStarted, PlatformCharacter, PlatformConfig,
    PlatformMode, ShapeBounds, SimulationPlugin,
};

const GRAVITY: f32 = -20.0;
const JUMP_SPEED: f32 = 11.0;
const JUMP_INTERVAL_TICKS: u64 = 90;
/// Допуск: стоящий на платформе персонаж считается в контакте
const CONTACT_EPSILON: f32 = 0.01;

#[derive(Component, Default)]
struct ScriptedBody {
    velocity_y: f32,
    grounded: bool,
    ticks: u64,
}

/// Текущие overlap'ы (замена rapier narrow phase)
#[derive(Resource, Default)]
struct Overlaps(BTreeSet<(Entity, Entity)>);

fn main() {
    let seed = 42;
    println!("Starting ONEWAY headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .init_resource::<Overlaps>()
        .add_systems(
            FixedUpdate,
            (scripted_motion, scripted_contacts)
                .chain()
                .before(oneway_simulation::physics::forward_rapier_collisions),
        )
        .add_systems(Update, report_pass_through);

    let character = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 0.5, 0.0),
            PlatformCharacter::default(),
            ShapeBounds::from_size(Vec3::ONE),
            ScriptedBody::default(),
        ))
        .id();

    // Level data: один персонаж в мире → находим его как при загрузке уровня
    let tracked = match locate_tracked_character::<PlatformCharacter>(app.world_mut()) {
        Ok(entity) => entity,
        Err(error) => {
            eprintln!("Level setup failed: {}", error);
            return;
        }
    };
    debug_assert_eq!(tracked, character);

    let level = [
        (2.0, PlatformConfig::new(PlatformMode::AllowBoth)),
        (4.0, PlatformConfig::new(PlatformMode::AllowUpward).with_delay(0.4)),
        (6.0, PlatformConfig::new(PlatformMode::AllowDownward)),
    ];

    for (height, config) in level {
        let platform = match config.build(tracked) {
            Ok(platform) => platform,
            Err(error) => {
                eprintln!("Level setup failed: {}", error);
                return;
            }
        };
        app.world_mut().spawn((
            Transform::from_xyz(0.0, height, 0.0),
            platform,
            ShapeBounds::from_size(Vec3::new(6.0, 0.5, 1.0)),
        ));
    }

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let world = app.world();
            let height = world.get::<Transform>(character).map(|t| t.translation.y).unwrap_or_default();
            let ignored = world.resource::<IgnoredCollisionPairs>().len();
            println!("Tick {}: character y={:.2}, ignored pairs={}", tick, height, ignored);
        }
    }

    println!("Simulation complete!");
}

/// Вертикальное движение: gravity + прыжок по расписанию + seeded drop input
fn scripted_motion(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    ignored: Res<IgnoredCollisionPairs>,
    platforms: Query<(Entity, &Transform, &ShapeBounds), With<OneWayPlatform>>,
    mut bodies: Query<
        (Entity, &mut Transform, &ShapeBounds, &mut ScriptedBody, &mut PlatformCharacter),
        Without<OneWayPlatform>,
    >,
) {
    let delta = time.delta_secs();

    for (entity, mut transform, bounds, mut body, mut character) in bodies.iter_mut() {
        body.ticks += 1;

        if body.grounded && body.ticks % JUMP_INTERVAL_TICKS == 0 {
            body.velocity_y = JUMP_SPEED;
            body.grounded = false;
        }
        character.drop_requested = body.grounded && rng.rng.gen_bool(0.02);

        let feet_before = bounds.world_aabb(&transform).min_y();
        body.velocity_y += GRAVITY * delta;
        transform.translation.y += body.velocity_y * delta;
        let feet_after = bounds.world_aabb(&transform).min_y();

        // Приземление на пол (y=0) или на платформу сверху (если пара не ignored)
        let mut landing = (feet_after <= 0.0).then_some(0.0);
        if body.velocity_y <= 0.0 && character.can_ground() {
            for (platform, platform_transform, platform_bounds) in platforms.iter() {
                let top = platform_bounds.world_aabb(platform_transform).max.y;
                if feet_before >= top && feet_after < top && !ignored.is_ignored(platform, entity) {
                    landing = Some(landing.map_or(top, |current: f32| current.max(top)));
                }
            }
        }

        match landing {
            Some(ground) => {
                transform.translation.y += ground - feet_after;
                body.velocity_y = 0.0;
                body.grounded = true;
            }
            None => body.grounded = false,
        }
    }
}

/// AABB overlap → CollisionEvent::Started/Stopped
fn scripted_contacts(
    mut overlaps: ResMut<Overlaps>,
    mut collision_events: EventWriter<CollisionEvent>,
    platforms: Query<(Entity, &Transform, &ShapeBounds), With<OneWayPlatform>>,
    bodies: Query<(Entity, &Transform, &ShapeBounds), With<ScriptedBody>>,
) {
    for (body, body_transform, body_bounds) in bodies.iter() {
        let body_aabb = body_bounds.world_aabb(body_transform);

        for (platform, platform_transform, platform_bounds) in platforms.iter() {
            let platform_aabb = platform_bounds.world_aabb(platform_transform);
            let touching = body_aabb.min.y <= platform_aabb.max.y + CONTACT_EPSILON
                && body_aabb.max.y >= platform_aabb.min.y - CONTACT_EPSILON
                && body_aabb.min.x <= platform_aabb.max.x
                && body_aabb.max.x >= platform_aabb.min.x;

            let key = (platform, body);
            if touching && overlaps.0.insert(key) {
                collision_events.write(CollisionEvent::Started(platform, body, CollisionEventFlags::empty()));
            } else if !touching && overlaps.0.remove(&key) {
                collision_events.write(CollisionEvent::Stopped(platform, body, CollisionEventFlags::empty()));
            }
        }
    }
}

fn report_pass_through(
    mut started: EventReader<PassThroughStarted>,
    mut ended: EventReader<PassThroughEnded>,
) {
    for event in started.read() {
        log_info(&format!("Pass-through {:?} through {:?}", event.direction, event.platform));
    }
    for event in ended.read() {
        log_info(&format!("Collision restored with {:?}", event.platform));
    }
}
