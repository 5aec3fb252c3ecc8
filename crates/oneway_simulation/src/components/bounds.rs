//! ShapeBounds: AABB collision shape (Y вверх)

use bevy::prelude::*;

/// Half extents collision shape в локальных координатах
///
/// World AABB считается из transform'а (translation + |scale|).
/// Rotation игнорируется: платформы и персонаж axis-aligned.
///
/// Для child entity нужен GlobalTransform: Rapier ставит collider туда же.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ShapeBounds {
    pub half_extents: Vec3,
}

impl ShapeBounds {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents: half_extents.abs(),
        }
    }

    /// Box по полным размерам (`Collider::cuboid` принимает half extents, тут full size)
    pub fn from_size(size: Vec3) -> Self {
        Self::new(size * 0.5)
    }

    pub fn world_aabb(&self, transform: &Transform) -> WorldAabb {
        self.aabb_at(transform.translation, transform.scale)
    }

    pub fn global_aabb(&self, transform: &GlobalTransform) -> WorldAabb {
        let (scale, _, translation) = transform.to_scale_rotation_translation();
        self.aabb_at(translation, scale)
    }

    /// AABB collider'а так, как его видит physics
    ///
    /// Root entity: локальный Transform (внутри FixedUpdate он свежее,
    /// propagation в GlobalTransform случится только в PostUpdate).
    /// Child entity: GlobalTransform с учётом всех родителей.
    pub fn collider_aabb(
        &self,
        local: &Transform,
        global: &GlobalTransform,
        has_parent: bool,
    ) -> WorldAabb {
        if has_parent {
            self.global_aabb(global)
        } else {
            self.world_aabb(local)
        }
    }

    fn aabb_at(&self, translation: Vec3, scale: Vec3) -> WorldAabb {
        let half = self.half_extents * scale.abs();
        WorldAabb {
            min: translation - half,
            max: translation + half,
        }
    }
}

/// AABB в world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldAabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldAabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn min_y(&self) -> f32 {
        self.min.y
    }

    pub fn center_y(&self) -> f32 {
        self.center().y
    }
}
