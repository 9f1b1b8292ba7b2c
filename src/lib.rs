//!
//! Interactive elastic-network molecular simulation engine. Particles
//! connected by Hookean springs, coupled to steric, electrostatic,
//! hydrophobic, and IMPALA membrane-insertion force fields, driven
//! through a per-step pipeline ([`engine::Engine`]) that interactors
//! and trajectory writers can observe and steer.
//!

/// Re-export the version of nalgebra used by this crate
pub use nalgebra;

/// Axis-aligned bounding box over particle positions
pub mod bbox;
/// Configuration: parameter groups, `group.key = value` entries, validation
pub mod config;
/// The simulation engine: runtime network, per-step pipeline, rigid-body solves
pub mod engine;
/// The engine's single error type
pub mod error;
/// Pairwise and field force-field kernels (spring, steric, electrostatic, hydrophobic, IMPALA)
pub mod forcefield;
/// Dense/sparse/infinite lattice storage and the grid-sampled electrostatic potential
pub mod grid;
/// External force/observation hooks synchronized with the engine each step
pub mod interactor;
/// Neighbor search accelerators shared by every pairwise force field
pub mod neighbor_search;
/// Rigid-body grouping, integration, and Monte-Carlo/IMPALA-sampling moves
pub mod rigidbody;
/// Build-time topology (particles, springs, selections) and its runtime projection
pub mod topology;
/// Trajectory writers polled each step at their own frequency
pub mod trajectory;
/// 3-D vector type and the `Located` trait shared across the crate
pub mod vector;

pub use config::Configuration;
pub use engine::Engine;
pub use error::EngineError;
pub use topology::Topology;

pub(crate) type HashState = fxhash::FxBuildHasher;
pub(crate) type MapType<K, V> = std::collections::HashMap<K, V, HashState>;
pub(crate) fn new_map<K, V>() -> MapType<K, V> {
    MapType::with_hasher(HashState::default())
}
