//! ONEWAY Simulation Core
//!
//! ECS-симуляция односторонних платформ на Bevy 0.16.
//!
//! Архитектура:
//! - ECS = правила прохода (controller платформы, таймеры, флаги персонажа)
//! - Physics (Rapier или внешний host) = контакты и collision response
//!
//! Связь через события: PlatformContact (physics → ECS),
//! CollisionIgnoreChanged + IgnoredCollisionPairs (ECS → physics).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod platform;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::{PlatformConfig, PlatformSettings};
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use physics::{spawn_one_way_platform, spawn_platform_character, RapierPlatformBridgePlugin};
pub use platform::{
    locate_tracked_character, CollisionIgnoreChanged, ContactPhase, IgnoredCollisionPairs,
    PassThroughEnded, PassThroughStarted, PlatformContact, PlatformError, PlatformPlugin,
};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<PlatformSettings>()
            // Подсистемы
            .add_plugins((PlatformPlugin::<PlatformCharacter>::default(), RapierPlatformBridgePlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
