//! Force-field kernels: every pairwise and field potential BioSpring
//! evaluates, plus the unit-conversion table they share.
//!
//! Each kernel module exposes a pair of free functions, `*_energy` and
//! `*_force_module` (or a full `Vec3` force for field potentials, where
//! the direction isn't simply "along the separation"). `crate::engine`
//! is the only place these get summed into per-particle totals.

pub mod combination_rules;
pub mod constants;
pub mod electrostatic;
pub mod electrostatic_field;
pub mod hydrophobic;
pub mod impala;
pub mod spring;
pub mod steric;

pub use impala::{Leaflet, Membrane};
pub use steric::{StericMode, StericParticle};

/// Which optional kernels are active for a run. Every field defaults to
/// off; `Configuration` flips them on from the parsed parameter file.
#[derive(Clone, Copy, Debug, Default)]
pub struct ActiveKernels {
    pub springs: bool,
    pub steric: bool,
    pub electrostatic: bool,
    pub electrostatic_field: bool,
    pub impala: bool,
    pub hydrophobic: bool,
}
