//! A single point mass and its bag of physical attributes.

use crate::vector::{Located, Vec3, VECTOR_EPSILON};

/// IMPALA-specific per-particle quantities, kept as their own record
/// since only the membrane kernel reads them.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImpalaRecord {
    pub solvent_accessible_surface: f32,
    pub transfer_energy_per_surface: f32,
}

/// Per-channel energy accumulated on this particle during one step, for
/// interactor observability. Reset to zero at the start of every step
/// alongside the engine-level totals; the engine itself only reports
/// channel *sums* to the trajectory sampler.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParticleEnergies {
    pub electrostatic: f32,
    pub steric: f32,
    pub impala: f32,
    pub hydrophobic: f32,
    pub kinetic: f32,
}

impl ParticleEnergies {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A point mass with position, velocity, and every physical attribute
/// the force field or trajectory writers can read.
#[derive(Clone, Debug)]
pub struct Particle {
    uid: u64,

    pub position: Vec3,
    pub velocity: Vec3,
    pub force: Vec3,
    pub previous_position: Vec3,
    pub previous_force: Vec3,

    mass: f32,
    charge: f32,
    hydrophobicity: f32,
    is_charged: bool,
    is_hydrophobic: bool,

    pub radius: f32,
    pub epsilon: f32,
    pub occupancy: f32,
    pub temperature_factor: f32,
    pub burying: f32,
    pub impala: ImpalaRecord,
    pub energies: ParticleEnergies,

    pub name: String,
    pub residue_name: String,
    pub chain_name: String,
    pub element_name: String,
    pub residue_id: i64,
    pub external_atom_id: i64,

    pub is_static: bool,
    pub is_rigid: bool,

    pub topology_id: usize,
    pub rigid_body_id: Option<usize>,
    pub internal_structure_id: Option<usize>,
}

impl Particle {
    /// Builds a particle with the given `uid` and `position`; every
    /// other field takes a physically sane default (`mass = 1`,
    /// `radius = 1`, everything else zero/empty/dynamic).
    pub fn new(uid: u64, name: impl Into<String>, position: Vec3) -> Self {
        Self {
            uid,
            position,
            velocity: Vec3::zeros(),
            force: Vec3::zeros(),
            previous_position: position,
            previous_force: Vec3::zeros(),
            mass: 1.0,
            charge: 0.0,
            hydrophobicity: 0.0,
            is_charged: false,
            is_hydrophobic: false,
            radius: 1.0,
            epsilon: 0.0,
            occupancy: 1.0,
            temperature_factor: 0.0,
            burying: 0.0,
            impala: ImpalaRecord::default(),
            energies: ParticleEnergies::default(),
            name: name.into(),
            residue_name: String::new(),
            chain_name: String::new(),
            element_name: String::new(),
            residue_id: 0,
            external_atom_id: 0,
            is_static: false,
            is_rigid: false,
            topology_id: 0,
            rigid_body_id: None,
            internal_structure_id: None,
        }
    }

    pub fn uid(&self) -> u64 {
        self.uid
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// A read of zero or negative mass is coerced to `1.0` with a
    /// warning rather than rejected outright.
    pub fn set_mass(&mut self, mass: f32) {
        if mass <= 0.0 {
            log::warn!("particle {}: non-positive mass {mass}, coercing to 1.0", self.uid);
            self.mass = 1.0;
        } else {
            self.mass = mass;
        }
    }

    pub fn charge(&self) -> f32 {
        self.charge
    }

    /// Sets the charge and recomputes the cached `is_charged` flag the
    /// engine's index sets rely on.
    pub fn set_charge(&mut self, charge: f32) {
        self.charge = charge;
        self.is_charged = charge.abs() > VECTOR_EPSILON;
    }

    pub fn hydrophobicity(&self) -> f32 {
        self.hydrophobicity
    }

    /// Sets the hydrophobicity and recomputes the cached
    /// `is_hydrophobic` flag.
    pub fn set_hydrophobicity(&mut self, hydrophobicity: f32) {
        self.hydrophobicity = hydrophobicity;
        self.is_hydrophobic = hydrophobicity.abs() > VECTOR_EPSILON;
    }

    /// Returns a copy of this particle carrying a freshly assigned
    /// `uid`; the caller (normally a [`super::particle_collection::ParticleCollection`])
    /// supplies it so that uid allocation stays centralized.
    pub fn copy_with_uid(&self, new_uid: u64) -> Self {
        Self {
            uid: new_uid,
            ..self.clone()
        }
    }

    pub fn is_charged(&self) -> bool {
        self.is_charged
    }

    pub fn is_hydrophobic(&self) -> bool {
        self.is_hydrophobic
    }

    pub fn is_dynamic(&self) -> bool {
        !self.is_static
    }
}

impl Located for Particle {
    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_mass_is_coerced_with_warning() {
        let mut p = Particle::new(0, "CA", Vec3::zeros());
        p.set_mass(0.0);
        assert_eq!(p.mass(), 1.0);
    }

    #[test]
    fn copy_keeps_data_but_assigns_new_uid() {
        let p = Particle::new(1, "CA", Vec3::new(1.0, 2.0, 3.0));
        let copy = p.copy_with_uid(42);
        assert_eq!(copy.uid(), 42);
        assert_eq!(copy.position, p.position);
    }

    #[test]
    fn charge_setter_updates_cached_flag() {
        let mut p = Particle::new(0, "CA", Vec3::zeros());
        assert!(!p.is_charged());
        p.set_charge(1.0);
        assert!(p.is_charged());
        assert!(p.is_dynamic());
        p.is_static = true;
        assert!(!p.is_dynamic());
    }

    #[test]
    fn hydrophobicity_setter_updates_cached_flag() {
        let mut p = Particle::new(0, "CA", Vec3::zeros());
        assert!(!p.is_hydrophobic());
        p.set_hydrophobicity(0.5);
        assert!(p.is_hydrophobic());
    }
}
