//! Vector algebra and measurement primitives shared by the whole engine.
//!
//! `Vec3` is a thin alias over [`nalgebra::Vector3<f32>`]; the engine works
//! in single precision throughout, per the force-field unit contract.

use nalgebra::Vector3;

/// The engine's vector type. Single precision everywhere: positions,
/// energies, and forces are all `f32`.
pub type Vec3 = Vector3<f32>;

/// Below this squared norm a vector is treated as the zero vector by
/// [`safe_normalize`] instead of blowing up to `NaN`/`inf`.
const SAFE_NORMALIZE_THRESHOLD: f32 = 1e-40;

/// Epsilon used by [`approx_eq`] to compare vectors component-wise, and
/// by callers elsewhere in the engine that need the same "is this
/// effectively zero" threshold (e.g. `Particle::is_charged`).
pub const VECTOR_EPSILON: f32 = 1e-6;

/// Normalizes `v`, returning the zero vector instead of `NaN` when `v`'s
/// norm falls below [`SAFE_NORMALIZE_THRESHOLD`].
pub fn safe_normalize(v: Vec3) -> Vec3 {
    let norm_sq = v.norm_squared();
    if norm_sq < SAFE_NORMALIZE_THRESHOLD {
        Vec3::zeros()
    } else {
        v / norm_sq.sqrt()
    }
}

/// Component-wise equality within [`VECTOR_EPSILON`].
pub fn approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).iter().all(|d| d.abs() < VECTOR_EPSILON)
}

/// Anything that can report its own position, the way every force-field
/// kernel and neighbor search needs to locate its subject. Mirrors the
/// original engine's `getX/getY/getZ` accessor trio.
pub trait Located {
    fn position(&self) -> Vec3;

    fn x(&self) -> f32 {
        self.position().x
    }
    fn y(&self) -> f32 {
        self.position().y
    }
    fn z(&self) -> f32 {
        self.position().z
    }
}

impl Located for Vec3 {
    fn position(&self) -> Vec3 {
        *self
    }
}

/// Euclidean distance between anything [`Located`].
pub fn distance<A: Located, B: Located>(a: &A, b: &B) -> f32 {
    (a.position() - b.position()).norm()
}

/// Centroid (arithmetic mean of positions) of a non-empty collection of
/// [`Located`] elements.
pub fn centroid<T: Located>(elements: &[T]) -> Vec3 {
    debug_assert!(!elements.is_empty(), "centroid of an empty collection");
    let sum = elements
        .iter()
        .fold(Vec3::zeros(), |acc, e| acc + e.position());
    sum / (elements.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_normalize_zeroes_tiny_vectors() {
        let v = Vec3::new(1e-25, 0.0, 0.0);
        assert_eq!(safe_normalize(v), Vec3::zeros());
    }

    #[test]
    fn safe_normalize_unit_length() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        let n = safe_normalize(v);
        assert!((n.norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn distance_between_points() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 0.0, 0.0);
        assert!((distance(&a, &b) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn centroid_of_square() {
        let pts = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(2.0, 2.0, 0.0),
        ];
        let c = centroid(&pts);
        assert!(approx_eq(c, Vec3::new(1.0, 1.0, 0.0)));
    }
}
