//! Collision Prober
//!
//! Ray-based obstacle detection for the character. Obstacles live in an
//! explicit [`ColliderRegistry`]; probing casts eight horizontal rays from a
//! candidate position and reports a hit when anything is closer than the
//! character's radius.

use std::collections::BTreeMap;
use std::f32::consts::FRAC_1_SQRT_2;
use serde::Serialize;

use crate::core::{Aabb, Vec3};

/// Character collision radius.
pub const CHARACTER_RADIUS: f32 = 0.4;

/// Slack added to the radius before a hit counts as blocking.
pub const COLLISION_EPSILON: f32 = 0.1;

/// Probe directions: the four cardinals, then the four diagonals.
pub const PROBE_DIRECTIONS: [Vec3; 8] = [
    Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, -1.0),
    Vec3::new(FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    Vec3::new(FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
    Vec3::new(-FRAC_1_SQRT_2, 0.0, FRAC_1_SQRT_2),
    Vec3::new(-FRAC_1_SQRT_2, 0.0, -FRAC_1_SQRT_2),
];

/// Handle for a registered collider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColliderId(pub u32);

/// What a collider represents. Probing treats all kinds alike.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ColliderKind {
    /// Invisible wall at the edge of the world
    Boundary,
    /// Building footprint
    Building,
    /// Hill or other ground feature
    Terrain,
    /// Small scenery (gate posts, monuments)
    Prop,
}

/// A solid volume.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Collider {
    /// Registry handle
    pub id: ColliderId,
    /// Kind tag
    pub kind: ColliderKind,
    /// World-space bounds
    pub bounds: Aabb,
}

/// Registered obstacle volumes.
///
/// Iteration is in registration order (BTreeMap keyed by monotonically
/// increasing id).
#[derive(Clone, Debug, Default)]
pub struct ColliderRegistry {
    colliders: BTreeMap<ColliderId, Collider>,
    next_id: u32,
}

impl ColliderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a volume and return its handle.
    pub fn register(&mut self, kind: ColliderKind, bounds: Aabb) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.insert(id, Collider { id, kind, bounds });
        id
    }

    /// Remove a volume.
    pub fn remove(&mut self, id: ColliderId) -> Option<Collider> {
        self.colliders.remove(&id)
    }

    /// Drop every volume. Handles are not reused.
    pub fn clear(&mut self) {
        self.colliders.clear();
    }

    /// Number of registered volumes.
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Iterate registered volumes.
    pub fn iter(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.values()
    }

    /// Nearest hit distance along a ray across all volumes.
    pub fn nearest_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        self.colliders
            .values()
            .filter_map(|c| c.bounds.ray_distance(origin, dir))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Check whether a character standing at `position` would overlap
    /// anything.
    ///
    /// Fails open: with no volumes registered (scene still loading) every
    /// position is free.
    pub fn probe(&self, position: Vec3) -> bool {
        if self.colliders.is_empty() {
            return false;
        }

        let reach = CHARACTER_RADIUS + COLLISION_EPSILON;
        PROBE_DIRECTIONS.iter().any(|dir| {
            self.nearest_hit(position, *dir)
                .map_or(false, |distance| distance < reach)
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
