//! Collision-ignore связи между парами collider'ов

use bevy::prelude::*;
use std::collections::BTreeSet;

/// Неупорядоченная пара collider'ов (нормализована: a ≤ b)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColliderPair {
    a: Entity,
    b: Entity,
}

impl ColliderPair {
    pub fn new(first: Entity, second: Entity) -> Self {
        if first <= second {
            Self { a: first, b: second }
        } else {
            Self { a: second, b: first }
        }
    }

    pub fn entities(&self) -> (Entity, Entity) {
        (self.a, self.b)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.a == entity || self.b == entity
    }

    /// Вторая entity пары (None если `entity` не в паре)
    pub fn other(&self, entity: Entity) -> Option<Entity> {
        if self.a == entity {
            Some(self.b)
        } else if self.b == entity {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Пары, для которых physics пропускает collision response
///
/// Связь бинарная и симметричная: пара либо полностью игнорируется, либо нет.
/// BTreeSet: детерминированный порядок итерации (snapshots, логи).
#[derive(Resource, Debug, Default, Clone)]
pub struct IgnoredCollisionPairs {
    pairs: BTreeSet<ColliderPair>,
}

impl IgnoredCollisionPairs {
    /// Возвращает true если пара только что стала ignored
    pub fn ignore(&mut self, first: Entity, second: Entity) -> bool {
        self.pairs.insert(ColliderPair::new(first, second))
    }

    /// Возвращает true если пара была ignored
    pub fn restore(&mut self, first: Entity, second: Entity) -> bool {
        self.pairs.remove(&ColliderPair::new(first, second))
    }

    pub fn is_ignored(&self, first: Entity, second: Entity) -> bool {
        self.pairs.contains(&ColliderPair::new(first, second))
    }

    /// Участвует ли entity хоть в одной ignored паре
    pub fn involves(&self, entity: Entity) -> bool {
        self.pairs.iter().any(|pair| pair.contains(entity))
    }

    /// Удаляет все пары с entity, возвращает вторые entity удалённых пар
    pub fn release(&mut self, entity: Entity) -> Vec<Entity> {
        let released: Vec<ColliderPair> = self
            .pairs
            .iter()
            .filter(|pair| pair.contains(entity))
            .copied()
            .collect();

        released
            .into_iter()
            .filter_map(|pair| {
                self.pairs.remove(&pair);
                pair.other(entity)
            })
            .collect()
    }

    /// Удаляет пары, для которых `stale` вернул true, возвращает их
    pub fn release_where(&mut self, mut stale: impl FnMut(&ColliderPair) -> bool) -> Vec<ColliderPair> {
        let released: Vec<ColliderPair> = self.pairs.iter().filter(|pair| stale(pair)).copied().collect();
        for pair in &released {
            self.pairs.remove(pair);
        }
        released
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ColliderPair> {
        self.pairs.iter()
    }
}
