//! Axis-Aligned Bounding Boxes
//!
//! Obstacle volumes for the village and the ray test the collision prober
//! casts against them.

use serde::{Deserialize, Serialize};

use super::vec3::Vec3;

/// Axis-aligned box defined by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from its corners. Corners are re-ordered per axis, so
    /// callers may pass them in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: Vec3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Vec3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create a box from a center point and full extents, matching the way
    /// scene boxes are declared (`position` + `boxGeometry(w, h, d)`).
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.scale(0.5);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Center point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max).scale(0.5)
    }

    /// Check if a point lies inside or on the box.
    #[inline]
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Distance along `dir` from `origin` to the first hit, if any.
    ///
    /// Slab test. `dir` should be normalized so the result is a distance.
    /// A ray starting inside the box hits at distance 0.
    pub fn ray_distance(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        if self.contains(origin) {
            return Some(0.0);
        }

        let mut t_min = 0.0f32;
        let mut t_max = f32::INFINITY;

        let axes = [
            (origin.x, dir.x, self.min.x, self.max.x),
            (origin.y, dir.y, self.min.y, self.max.y),
            (origin.z, dir.z, self.min.z, self.max.z),
        ];

        for (o, d, lo, hi) in axes {
            if d.abs() < f32::EPSILON {
                // Parallel to this slab: miss unless already between the planes
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box_at(x: f32, z: f32) -> Aabb {
        Aabb::from_center_size(Vec3::new(x, 1.0, z), Vec3::new(2.0, 2.0, 2.0))
    }

    #[test]
    fn test_new_orders_corners() {
        let b = Aabb::new(Vec3::new(1.0, 5.0, -2.0), Vec3::new(-1.0, 0.0, 2.0));
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(b.max, Vec3::new(1.0, 5.0, 2.0));
        assert_eq!(b.center(), Vec3::new(0.0, 2.5, 0.0));
    }

    #[test]
    fn test_ray_hits_box_ahead() {
        let b = unit_box_at(5.0, 0.0);
        let d = b.ray_distance(Vec3::new(0.0, 1.0, 0.0), Vec3::X).unwrap();
        assert!((d - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_misses_box_behind() {
        let b = unit_box_at(5.0, 0.0);
        assert!(b.ray_distance(Vec3::new(0.0, 1.0, 0.0), -Vec3::X).is_none());
    }

    #[test]
    fn test_ray_parallel_outside_slab_misses() {
        let b = unit_box_at(5.0, 0.0);
        // Travelling along +X but offset 3 units in Z
        assert!(b.ray_distance(Vec3::new(0.0, 1.0, 3.0), Vec3::X).is_none());
    }

    #[test]
    fn test_ray_diagonal_hit() {
        let b = unit_box_at(3.0, 3.0);
        let dir = Vec3::new(1.0, 0.0, 1.0).normalize();
        let d = b.ray_distance(Vec3::new(0.0, 1.0, 0.0), dir).unwrap();
        // Enters at the (2, 2) corner
        assert!((d - 8.0f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_ray_from_inside_is_zero() {
        let b = unit_box_at(0.0, 0.0);
        assert_eq!(b.ray_distance(Vec3::new(0.0, 1.0, 0.0), Vec3::Z), Some(0.0));
    }
}
