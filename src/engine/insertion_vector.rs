//! The insertion-vector observer: the directed vector between two
//! user-chosen particles, and its orientation relative to the membrane
//! normal.

use crate::topology::ParticleCollection;
use crate::vector::Vec3;

/// One step's insertion-vector reading.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InsertionVectorReading {
    pub vector: Vec3,
    /// Angle (radians) between `vector` and the membrane normal `(0,0,1)`.
    pub angle_to_normal: f32,
    /// Rotation (radians) of `vector`'s projection onto the membrane
    /// plane, measured from the x-axis.
    pub roll_angle: f32,
    /// Mean z of the two endpoints, i.e. how deep the vector sits in
    /// the membrane.
    pub insertion_depth: f32,
}

/// Tracks which two particles (by index into the engine's
/// `ParticleCollection`) define the insertion vector.
#[derive(Clone, Copy, Debug)]
pub struct InsertionVectorObserver {
    pub first_index: usize,
    pub second_index: usize,
}

impl InsertionVectorObserver {
    pub fn new(first_index: usize, second_index: usize) -> Self {
        Self { first_index, second_index }
    }

    pub fn observe(&self, particles: &ParticleCollection) -> InsertionVectorReading {
        let first = particles.by_index(self.first_index).position;
        let second = particles.by_index(self.second_index).position;
        let vector = second - first;

        let normal = Vec3::new(0.0, 0.0, 1.0);
        let cos_angle = (vector.dot(&normal) / vector.norm()).clamp(-1.0, 1.0);
        let angle_to_normal = cos_angle.acos();

        let roll_angle = vector.y.atan2(vector.x);
        let insertion_depth = (first.z + second.z) * 0.5;

        InsertionVectorReading {
            vector,
            angle_to_normal,
            roll_angle,
            insertion_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3 as V;

    #[test]
    fn vertical_vector_has_zero_angle_to_normal() {
        let mut particles = ParticleCollection::new();
        particles.create("A", V::new(0.0, 0.0, 0.0));
        particles.create("B", V::new(0.0, 0.0, 5.0));
        let observer = InsertionVectorObserver::new(0, 1);
        let reading = observer.observe(&particles);
        assert!(reading.angle_to_normal.abs() < 1e-5);
    }

    #[test]
    fn horizontal_vector_has_right_angle_to_normal() {
        let mut particles = ParticleCollection::new();
        particles.create("A", V::new(0.0, 0.0, 0.0));
        particles.create("B", V::new(5.0, 0.0, 0.0));
        let observer = InsertionVectorObserver::new(0, 1);
        let reading = observer.observe(&particles);
        assert!((reading.angle_to_normal - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }
}
