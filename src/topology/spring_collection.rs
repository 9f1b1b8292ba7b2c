//! An ordered sequence of springs over a fixed [`ParticleCollection`].

use crate::{new_map, MapType};

use super::particle_collection::ParticleCollection;
use super::spring::Spring;
use super::TopologyError;

#[derive(Clone, Debug, Default)]
pub struct SpringCollection {
    springs: Vec<Spring>,
    keys: MapType<(u64, u64), ()>,
}

impl SpringCollection {
    pub fn new() -> Self {
        Self {
            springs: Vec::new(),
            keys: new_map(),
        }
    }

    /// Adds a spring between `first_uid` and `second_uid`, rejecting
    /// self-springs, duplicates, and references to particles absent
    /// from `particles`.
    pub fn add(
        &mut self,
        particles: &ParticleCollection,
        first_uid: u64,
        second_uid: u64,
        stiffness: f32,
        equilibrium: Option<f32>,
    ) -> Result<(), TopologyError> {
        if first_uid == second_uid {
            return Err(TopologyError::SelfSpring { uid: first_uid });
        }
        if particles.get(first_uid).is_none() {
            return Err(TopologyError::UnknownParticle { uid: first_uid });
        }
        if particles.get(second_uid).is_none() {
            return Err(TopologyError::UnknownParticle { uid: second_uid });
        }

        let spring = Spring::new(first_uid, second_uid, stiffness, equilibrium, particles);
        let key = spring.key();
        if self.keys.contains_key(&key) {
            return Err(TopologyError::DuplicateSpring { first: key.0, second: key.1 });
        }

        self.keys.insert(key, ());
        self.springs.push(spring);
        Ok(())
    }

    /// Adds an `(i,j)` spring, equilibrium at current distance, for
    /// every unordered pair within `cutoff`. Returns the number added.
    pub fn add_from_cutoff(
        &mut self,
        particles: &ParticleCollection,
        cutoff: f32,
        stiffness: f32,
    ) -> usize {
        let mut added = 0;
        let slice = particles.as_slice();
        for i in 0..slice.len() {
            for j in (i + 1)..slice.len() {
                if crate::vector::distance(&slice[i], &slice[j]) <= cutoff
                    && self
                        .add(particles, slice[i].uid(), slice[j].uid(), stiffness, None)
                        .is_ok()
                {
                    added += 1;
                }
            }
        }
        added
    }

    /// Like [`Self::add_from_cutoff`], but only adds springs whose
    /// endpoints belong to different topology ids (used after a merge,
    /// to stitch two previously independent topologies together).
    pub fn add_between_topologies_from_cutoff(
        &mut self,
        particles: &ParticleCollection,
        cutoff: f32,
        stiffness: f32,
    ) -> usize {
        let mut added = 0;
        let slice = particles.as_slice();
        for i in 0..slice.len() {
            for j in (i + 1)..slice.len() {
                if slice[i].topology_id != slice[j].topology_id
                    && crate::vector::distance(&slice[i], &slice[j]) <= cutoff
                    && self
                        .add(particles, slice[i].uid(), slice[j].uid(), stiffness, None)
                        .is_ok()
                {
                    added += 1;
                }
            }
        }
        added
    }

    pub fn len(&self) -> usize {
        self.springs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.springs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Spring> {
        self.springs.iter()
    }

    pub fn as_slice(&self) -> &[Spring] {
        &self.springs
    }

    /// Merges `other` into `self`. Both must range over the *same*
    /// particle collection (checked by the caller, normally
    /// [`super::topology::Topology::merge`]); springs already present
    /// (by key) are skipped rather than duplicated.
    pub fn extend(&mut self, other: SpringCollection) {
        for spring in other.springs {
            let key = spring.key();
            if !self.keys.contains_key(&key) {
                self.keys.insert(key, ());
                self.springs.push(spring);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;

    fn grid_particles(n: usize) -> ParticleCollection {
        let mut c = ParticleCollection::new();
        for i in 0..n {
            c.create(format!("P{i}"), Vec3::new(i as f32, 0.0, 0.0));
        }
        c
    }

    #[test]
    fn rejects_self_spring() {
        let particles = grid_particles(1);
        let mut springs = SpringCollection::new();
        assert!(springs.add(&particles, 0, 0, 1.0, Some(1.0)).is_err());
    }

    #[test]
    fn rejects_duplicate_spring() {
        let particles = grid_particles(2);
        let mut springs = SpringCollection::new();
        springs.add(&particles, 0, 1, 1.0, Some(1.0)).unwrap();
        assert!(springs.add(&particles, 1, 0, 1.0, Some(1.0)).is_err());
    }

    #[test]
    fn cutoff_on_ten_particle_unit_grid_makes_forty_five_springs() {
        let particles = grid_particles(10);
        let mut springs = SpringCollection::new();
        let added = springs.add_from_cutoff(&particles, 100.0, 1.0);
        assert_eq!(added, 45);
        assert_eq!(springs.len(), 45);
    }
}
