//! The individual parameter groups that make up a [`super::Configuration`].

use crate::forcefield::StericMode;

#[derive(Clone, Copy, Debug)]
pub struct SimulationConfig {
    /// Negative means "run until `end` is set some other way".
    pub nbsteps: i64,
    pub timestep: f32,
    pub samplerate: usize,
    /// Whether the dynamic-particle force loop runs via `rayon`.
    pub enable_parallel_forces: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nbsteps: -1,
            timestep: 0.001,
            samplerate: 1000,
            enable_parallel_forces: num_cpus_hint() > 1,
        }
    }
}

fn num_cpus_hint() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StericConfig {
    pub enable: bool,
    pub scale: f32,
    pub cutoff: f32,
    pub mode: StericMode,
}

impl Default for StericConfig {
    fn default() -> Self {
        Self {
            enable: false,
            scale: 1.0,
            cutoff: 8.0,
            mode: StericMode::Linear,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct HydrophobicityConfig {
    pub enable: bool,
    pub scale: f32,
    pub cutoff: f32,
}

impl Default for HydrophobicityConfig {
    fn default() -> Self {
        Self {
            enable: false,
            scale: 1.0,
            cutoff: 8.0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CoulombConfig {
    pub enable: bool,
    pub scale: f32,
    pub cutoff: f32,
    pub dielectric: f32,
}

impl Default for CoulombConfig {
    fn default() -> Self {
        Self {
            enable: false,
            scale: 1.0,
            cutoff: 12.0,
            dielectric: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ImpalaConfig {
    pub enable: bool,
    pub scale: f32,
    pub upper_offset: f32,
    pub upper_curvature: f32,
    pub lower_offset: f32,
    pub lower_curvature: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InsertionVectorConfig {
    pub enable: bool,
    pub first_particle_id: i64,
    pub second_particle_id: i64,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ViscosityConfig {
    pub enable: bool,
    pub value: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ProbeConfig {
    pub enable: bool,
    pub enable_electrostatic: bool,
    pub enable_steric: bool,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub mass: f32,
    pub epsilon: f32,
    pub radius: f32,
    pub charge: f32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RigidBodyConfig {
    pub enable: bool,
    pub enable_sampling: bool,
    pub enable_montecarlo: bool,
    pub montecarlo_translation_norm: f32,
    pub montecarlo_rotation_norm: f32,
    pub montecarlo_temperature: f32,
}

#[derive(Clone, Debug, Default)]
pub struct TrajectoryOutputConfig {
    pub enable: bool,
    pub path: String,
    pub frequency: usize,
}
