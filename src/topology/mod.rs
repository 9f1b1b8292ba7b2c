//! The particle/spring data model: build-time [`Topology`] plus its
//! runtime projection, [`SpringNetwork`].

pub mod particle;
pub mod particle_collection;
pub mod spring;
pub mod spring_collection;
#[allow(clippy::module_inception)]
pub mod topology;

pub use particle::{ImpalaRecord, Particle};
pub use particle_collection::ParticleCollection;
pub use spring::Spring;
pub use spring_collection::SpringCollection;
pub use topology::Topology;

/// Errors raised by the particle/spring data model's own invariants,
/// independent of anything engine- or configuration-related.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    #[error("spring: particle {uid} cannot be connected to itself")]
    SelfSpring { uid: u64 },
    #[error("spring: a spring between particles {first} and {second} already exists")]
    DuplicateSpring { first: u64, second: u64 },
    #[error("spring: particle uid {uid} is not present in this topology")]
    UnknownParticle { uid: u64 },
    #[error("bulk update: expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },
}

/// The engine's runtime view of a [`Topology`]: the same particle and
/// spring data, plus the index sets the per-step pipeline walks
/// directly instead of re-filtering every step.
#[derive(Clone, Debug)]
pub struct SpringNetwork {
    pub particles: ParticleCollection,
    pub springs: SpringCollection,
    pub static_indices: Vec<usize>,
    pub dynamic_indices: Vec<usize>,
    pub charged_indices: Vec<usize>,
    pub hydrophobic_indices: Vec<usize>,
}

impl SpringNetwork {
    pub fn from_topology(topology: Topology) -> Self {
        let particles = topology.particles;
        let springs = topology.springs;

        let mut static_indices = Vec::new();
        let mut dynamic_indices = Vec::new();
        let mut charged_indices = Vec::new();
        let mut hydrophobic_indices = Vec::new();

        for (index, particle) in particles.iter().enumerate() {
            if particle.is_static {
                static_indices.push(index);
            } else {
                dynamic_indices.push(index);
            }
            if particle.is_charged() {
                charged_indices.push(index);
            }
            if particle.is_hydrophobic() {
                hydrophobic_indices.push(index);
            }
        }

        Self {
            particles,
            springs,
            static_indices,
            dynamic_indices,
            charged_indices,
            hydrophobic_indices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;

    #[test]
    fn projection_sorts_particles_into_index_sets() {
        let mut t = Topology::new(0);
        let static_uid = t.add_particle("S", Vec3::zeros());
        let dynamic_uid = t.add_particle("D", Vec3::zeros());
        t.particles.get_mut(static_uid).unwrap().is_static = true;
        t.particles.get_mut(dynamic_uid).unwrap().set_charge(1.0);

        let network = t.to_spring_network();
        assert_eq!(network.static_indices.len(), 1);
        assert_eq!(network.dynamic_indices.len(), 1);
        assert_eq!(network.charged_indices.len(), 1);
    }
}
