//! Rapier → PlatformContact мост
//!
//! Rapier даёт только Started/Stopped. Collision-stay собираем сами:
//! каждый fixed step шлём Persisted для всех контактов платформ,
//! активных с прошлого шага.

use bevy::ecs::entity::Entities;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::collections::BTreeSet;

use crate::components::OneWayPlatform;
use crate::platform::PlatformContact;

/// Активные контакты платформ: (platform, other)
#[derive(Resource, Debug, Default, Clone)]
pub struct ActivePlatformContacts {
    contacts: BTreeSet<(Entity, Entity)>,
}

impl ActivePlatformContacts {
    pub fn is_active(&self, platform: Entity, other: Entity) -> bool {
        self.contacts.contains(&(platform, other))
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

/// (platform, other) если одна из entity: платформа
fn orient(
    platforms: &Query<(), With<OneWayPlatform>>,
    first: Entity,
    second: Entity,
) -> Option<(Entity, Entity)> {
    if platforms.contains(first) {
        Some((first, second))
    } else if platforms.contains(second) {
        Some((second, first))
    } else {
        None
    }
}

/// Система: CollisionEvent → PlatformContact (Began / Persisted)
///
/// 0. Контакты удалённых платформ и collider'ов снимаются
/// 1. Started/Stopped обновляют набор активных контактов
/// 2. Новые контакты → Began
/// 3. Контакты, активные и до этого шага → Persisted
pub fn forward_rapier_collisions(
    mut collision_events: EventReader<CollisionEvent>,
    platforms: Query<(), With<OneWayPlatform>>,
    entities: &Entities,
    mut active: ResMut<ActivePlatformContacts>,
    mut contacts: EventWriter<PlatformContact>,
) {
    // Despawn не всегда даёт Stopped: выкидываем контакты мёртвых entity
    active
        .contacts
        .retain(|&(platform, other)| platforms.contains(platform) && entities.contains(other));

    let previous = active.contacts.clone();
    let mut began = Vec::new();

    for event in collision_events.read() {
        match event {
            CollisionEvent::Started(first, second, _) => {
                if let Some(pair) = orient(&platforms, *first, *second) {
                    if active.contacts.insert(pair) {
                        began.push(pair);
                    }
                }
            }
            CollisionEvent::Stopped(first, second, _) => {
                // Платформа могла уже исчезнуть: чистим оба порядка
                active.contacts.remove(&(*first, *second));
                active.contacts.remove(&(*second, *first));
            }
        }
    }

    for (platform, other) in began {
        contacts.write(PlatformContact::began(platform, other));
    }

    for &(platform, other) in active.contacts.intersection(&previous) {
        contacts.write(PlatformContact::persisted(platform, other));
    }
}
