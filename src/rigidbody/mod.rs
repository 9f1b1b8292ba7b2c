//! Rigid-body group integration and the Monte-Carlo/IMPALA-sampling
//! alternatives to ordinary dynamics.

pub mod impala_sampling;
pub mod montecarlo;
pub mod rigid_body;

pub use impala_sampling::{sweep_insertion_angles, SamplingRow};
pub use montecarlo::{accept_move, acceptance_probability, propose_move, RigidMove};
pub use rigid_body::RigidBody;

/// Which alternative to ordinary per-step integration a rigid body's
/// group is running under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RigidBodyMode {
    #[default]
    Integrated,
    MonteCarlo,
    ImpalaSampling,
}
