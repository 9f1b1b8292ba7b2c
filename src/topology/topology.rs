//! The build-time bundle of particles and springs, with the
//! combinator operations used to assemble a system before it is handed
//! to the engine.

use super::particle_collection::ParticleCollection;
use super::spring_collection::SpringCollection;
use super::{SpringNetwork, TopologyError};

/// A build-time system: a [`ParticleCollection`] plus the
/// [`SpringCollection`] over it. Projected once, at setup, into the
/// engine's runtime [`SpringNetwork`] via [`Topology::to_spring_network`].
#[derive(Clone, Debug)]
pub struct Topology {
    pub particles: ParticleCollection,
    pub springs: SpringCollection,
    topology_id: usize,
}

impl Topology {
    pub fn new(topology_id: usize) -> Self {
        Self {
            particles: ParticleCollection::new(),
            springs: SpringCollection::new(),
            topology_id,
        }
    }

    pub fn topology_id(&self) -> usize {
        self.topology_id
    }

    /// Appends a particle with a fresh uid, tagged with this
    /// topology's id, and returns the uid.
    pub fn add_particle(&mut self, name: impl Into<String>, position: crate::vector::Vec3) -> u64 {
        let uid = self.particles.create(name, position);
        self.particles.get_mut(uid).unwrap().topology_id = self.topology_id;
        uid
    }

    pub fn add_spring(
        &mut self,
        first_uid: u64,
        second_uid: u64,
        equilibrium: Option<f32>,
        stiffness: f32,
    ) -> Result<(), TopologyError> {
        self.springs.add(&self.particles, first_uid, second_uid, stiffness, equilibrium)
    }

    /// Adds an `(i,j)` spring with equilibrium at current distance
    /// whenever `distance(i,j) <= cutoff`. Returns the number added.
    pub fn add_springs_from_cutoff(&mut self, cutoff: f32, stiffness: f32) -> usize {
        self.springs.add_from_cutoff(&self.particles, cutoff, stiffness)
    }

    /// Adds springs only between particles that differ in topology id
    /// (meaningful once two topologies have been `merge`d into one).
    pub fn add_springs_between_topologies_from_cutoff(&mut self, cutoff: f32, stiffness: f32) -> usize {
        self.springs
            .add_between_topologies_from_cutoff(&self.particles, cutoff, stiffness)
    }

    /// Concatenates `other`'s particles and springs into `self`,
    /// remapping `other`'s particle uids (which may collide with
    /// `self`'s) to fresh ones and rewriting `other`'s springs to match.
    /// `other`'s particles keep their original topology id.
    pub fn merge(&mut self, other: Topology) -> Result<(), TopologyError> {
        let mut uid_remap = crate::new_map();
        for particle in other.particles.iter() {
            let new_uid = self.particles.create(particle.name.clone(), particle.position);
            let remapped = self.particles.get_mut(new_uid).unwrap();
            let old_uid = particle.uid();
            *remapped = particle.copy_with_uid(new_uid);
            uid_remap.insert(old_uid, new_uid);
        }

        for spring in other.springs.iter() {
            let first = uid_remap[&spring.first_uid()];
            let second = uid_remap[&spring.second_uid()];
            // Already validated by `other`; re-adding only fails if a
            // spring with the same remapped key already exists in `self`.
            let _ = self
                .springs
                .add(&self.particles, first, second, spring.stiffness, Some(spring.equilibrium));
        }

        Ok(())
    }

    /// Projects this build-time topology into the engine's runtime
    /// representation: particles and springs move in as-is, and the
    /// maintained index sets (static/dynamic/charged/hydrophobic) are
    /// computed once from the current particle attributes.
    pub fn to_spring_network(self) -> SpringNetwork {
        SpringNetwork::from_topology(self)
    }
}
