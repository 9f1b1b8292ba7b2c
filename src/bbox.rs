//! Axis-aligned bounding box over a set of [`Located`] points.

use crate::vector::{Located, Vec3};

/// A box described by its min/max corners, with a cached edge-length
/// vector (mirrors the original engine's `Box`, which caches `_length`
/// alongside the six boundary scalars to avoid recomputing it on every
/// query).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
    length: Vec3,
}

impl BoundingBox {
    /// Builds a box directly from its corners. Panics if `min` is not
    /// component-wise less than or equal to `max`.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "min corner must not exceed max corner"
        );
        Self {
            min,
            max,
            length: max - min,
        }
    }

    /// Builds the smallest box enclosing every point. Panics if `points`
    /// is empty.
    pub fn from_points<T: Located>(points: &[T]) -> Self {
        assert!(!points.is_empty(), "cannot bound an empty point set");
        let mut min = points[0].position();
        let mut max = min;
        for p in &points[1..] {
            let pos = p.position();
            min = min.zip_map(&pos, f32::min);
            max = max.zip_map(&pos, f32::max);
        }
        Self::new(min, max)
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn length(&self) -> Vec3 {
        self.length
    }

    /// Grows the box by `margin` on every side.
    pub fn grow_uniformly(&mut self, margin: f32) {
        let m = Vec3::new(margin, margin, margin);
        self.min -= m;
        self.max += m;
        self.length = self.max - self.min;
    }

    /// Whether `point` lies within `[min, max)` on every axis.
    pub fn contains(&self, point: Vec3) -> bool {
        (0..3).all(|i| point[i] >= self.min[i] && point[i] < self.max[i])
    }
}
