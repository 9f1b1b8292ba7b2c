//! Constant-modulus centroid-to-centroid constraints between two named
//! particle selections.

use crate::topology::ParticleCollection;
use crate::vector::{centroid, Vec3};

/// A named, ordered list of particle indices (into the engine's
/// `ParticleCollection`) whose centroid a [`Constraint`] pulls toward.
#[derive(Clone, Debug)]
pub struct Selection {
    pub name: String,
    pub indices: Vec<usize>,
}

impl Selection {
    pub fn new(name: impl Into<String>, indices: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            indices,
        }
    }

    fn centroid(&self, particles: &ParticleCollection) -> Vec3 {
        debug_assert!(!self.indices.is_empty(), "selection {} is empty", self.name);
        let members: Vec<Vec3> = self.indices.iter().map(|&i| particles.by_index(i).position).collect();
        centroid(&members)
    }
}

/// Pulls `a`'s centroid toward `b`'s centroid (and vice versa) with a
/// fixed force magnitude, independent of the separation distance.
#[derive(Clone, Debug)]
pub struct Constraint {
    pub a: Selection,
    pub b: Selection,
    pub force_modulus: f32,
}

impl Constraint {
    /// Returns the force applied to every member of `a` (uniformly
    /// divided across its members) and the opposite force applied to
    /// every member of `b`.
    pub fn member_forces(&self, particles: &ParticleCollection) -> (Vec3, Vec3) {
        let centroid_a = self.a.centroid(particles);
        let centroid_b = self.b.centroid(particles);
        let direction = crate::vector::safe_normalize(centroid_b - centroid_a);
        let force_on_a = direction * self.force_modulus;
        (force_on_a, -force_on_a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3 as V;

    fn two_groups() -> ParticleCollection {
        let mut particles = ParticleCollection::new();
        particles.create("A", V::new(0.0, 0.0, 0.0));
        particles.create("B", V::new(10.0, 0.0, 0.0));
        particles
    }

    #[test]
    fn force_pulls_a_toward_b() {
        let particles = two_groups();
        let constraint = Constraint {
            a: Selection::new("a", vec![0]),
            b: Selection::new("b", vec![1]),
            force_modulus: 5.0,
        };
        let (force_a, force_b) = constraint.member_forces(&particles);
        assert!(force_a.x > 0.0);
        assert!((force_a + force_b).norm() < 1e-6);
    }
}
