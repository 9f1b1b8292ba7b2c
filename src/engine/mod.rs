//! The simulation engine: owns the runtime particle/spring network and
//! drives it through the per-step force-field pipeline.

pub mod constraint;
pub mod energy;
pub mod insertion_vector;
mod pipeline;
pub mod probe;

pub use constraint::{Constraint, Selection};
pub use energy::EnergyTotals;
pub use insertion_vector::{InsertionVectorObserver, InsertionVectorReading};
pub use probe::Probe;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Configuration;
use crate::error::EngineError;
use crate::forcefield::{Leaflet, Membrane};
use crate::grid::PotentialGrid;
use crate::interactor::{InteractorRegistry, ParticleSnapshot, SystemStateSnapshot};
use crate::neighbor_search::{CellListSearchDynamic, NeighborFinder};
use crate::rigidbody::{accept_move, acceptance_probability, propose_move, sweep_insertion_angles, RigidBody, RigidBodyMode, SamplingRow};
use crate::topology::{Particle, SpringNetwork, Topology};
use crate::trajectory::TrajectoryManager;
use crate::vector::Vec3;

/// The engine's runtime state: the particle/spring network plus every
/// optional subsystem (grids, probe, rigid bodies, constraints,
/// interactors, trajectory writers) a configuration may enable.
pub struct Engine {
    config: Configuration,
    network: SpringNetwork,

    steric_searcher: Option<Box<dyn NeighborFinder<Particle> + Send + Sync>>,
    electrostatic_searcher: Option<Box<dyn NeighborFinder<Particle> + Send + Sync>>,
    hydrophobic_searcher: Option<Box<dyn NeighborFinder<Particle> + Send + Sync>>,

    potential_grid: Option<PotentialGrid>,
    density_grid: Option<PotentialGrid>,

    membrane: Membrane,
    probe: Option<Probe>,

    rigid_bodies: Vec<RigidBody>,
    rigid_body_mode: RigidBodyMode,
    rng: StdRng,

    constraints: Vec<Constraint>,
    insertion_vector: Option<InsertionVectorObserver>,
    last_insertion_reading: Option<InsertionVectorReading>,

    trajectory: TrajectoryManager,
    interactors: InteractorRegistry,

    step: u64,
    paused: bool,
    end: bool,
    energies: EnergyTotals,
}

impl Engine {
    /// Builds an `Engine` from a validated `config` and a build-time
    /// `topology`, projecting the topology into its runtime
    /// [`SpringNetwork`] and constructing every optional subsystem the
    /// configuration enables.
    ///
    /// Grid samples are injected directly rather than loaded from
    /// `config.{potential,density}_grid.path` (file I/O is out of
    /// scope); if a grid kernel is enabled but no grid was supplied,
    /// setup fails rather than silently running without it.
    pub fn setup(
        config: Configuration,
        topology: Topology,
        potential_grid: Option<PotentialGrid>,
        density_grid: Option<PotentialGrid>,
    ) -> Result<Self, EngineError> {
        if config.potential_grid.enable && potential_grid.is_none() {
            return Err(EngineError::resource(
                "Engine::setup",
                "potentialgrid.enable is true but no potential grid was supplied",
            ));
        }
        if config.density_grid.enable && density_grid.is_none() {
            return Err(EngineError::resource(
                "Engine::setup",
                "densitygrid.enable is true but no density grid was supplied",
            ));
        }

        let network = topology.to_spring_network();
        let slice = network.particles.as_slice();

        let steric_searcher = if config.steric.enable {
            Some(Box::new(CellListSearchDynamic::new(slice, config.steric.cutoff)?)
                as Box<dyn NeighborFinder<Particle> + Send + Sync>)
        } else {
            None
        };
        let electrostatic_searcher = if config.coulomb.enable {
            Some(Box::new(CellListSearchDynamic::new(slice, config.coulomb.cutoff)?)
                as Box<dyn NeighborFinder<Particle> + Send + Sync>)
        } else {
            None
        };
        let hydrophobic_searcher = if config.hydrophobicity.enable {
            Some(Box::new(CellListSearchDynamic::new(slice, config.hydrophobicity.cutoff)?)
                as Box<dyn NeighborFinder<Particle> + Send + Sync>)
        } else {
            None
        };

        let membrane = Membrane {
            upper: Leaflet {
                offset: config.impala.upper_offset,
                tube_curvature: config.impala.upper_curvature,
            },
            lower: Leaflet {
                offset: config.impala.lower_offset,
                tube_curvature: config.impala.lower_curvature,
            },
        };

        let probe = if config.probe.enable {
            Some(Probe::from_config(&config.probe))
        } else {
            None
        };

        let rigid_bodies = Self::group_rigid_bodies(&network);
        let rigid_body_mode = if !config.rigid_body.enable {
            RigidBodyMode::Integrated
        } else if config.rigid_body.enable_sampling {
            RigidBodyMode::ImpalaSampling
        } else if config.rigid_body.enable_montecarlo {
            RigidBodyMode::MonteCarlo
        } else {
            RigidBodyMode::Integrated
        };

        let insertion_vector = if config.insertion_vector.enable {
            let first = network.particles.as_slice().iter().position(|p| p.external_atom_id == config.insertion_vector.first_particle_id);
            let second = network.particles.as_slice().iter().position(|p| p.external_atom_id == config.insertion_vector.second_particle_id);
            match (first, second) {
                (Some(first), Some(second)) => Some(InsertionVectorObserver::new(first, second)),
                _ => {
                    return Err(EngineError::configuration(
                        "Engine::setup",
                        "insertionvector.vector references a particle id absent from the topology",
                    ))
                }
            }
        } else {
            None
        };

        Ok(Self {
            config,
            network,
            steric_searcher,
            electrostatic_searcher,
            hydrophobic_searcher,
            potential_grid,
            density_grid,
            membrane,
            probe,
            rigid_bodies,
            rigid_body_mode,
            rng: StdRng::seed_from_u64(0),
            constraints: Vec::new(),
            insertion_vector,
            last_insertion_reading: None,
            trajectory: TrajectoryManager::new(),
            interactors: InteractorRegistry::new(),
            step: 0,
            paused: false,
            end: false,
            energies: EnergyTotals::default(),
        })
    }

    fn group_rigid_bodies(network: &SpringNetwork) -> Vec<RigidBody> {
        let mut groups: std::collections::BTreeMap<usize, Vec<usize>> = std::collections::BTreeMap::new();
        for (index, particle) in network.particles.iter().enumerate() {
            if let Some(id) = particle.rigid_body_id {
                groups.entry(id).or_default().push(index);
            }
        }
        groups
            .into_iter()
            .map(|(id, members)| RigidBody::new(id, members, &network.particles))
            .collect()
    }

    /// Re-seeds the Monte-Carlo / rigid-body-move RNG; without a call
    /// to this the engine is deterministic across runs (seed `0`).
    pub fn seed_rng(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn attach_interactor(&mut self, interactor: Box<dyn crate::interactor::Interactor>) {
        self.interactors.register(interactor);
    }

    pub fn attach_trajectory_writer(
        &mut self,
        writer: Box<dyn crate::trajectory::TrajectoryWriter>,
        sink: Box<dyn std::io::Write + Send>,
    ) {
        self.trajectory.add(writer, sink);
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn energies(&self) -> &EnergyTotals {
        &self.energies
    }

    pub fn last_insertion_reading(&self) -> Option<InsertionVectorReading> {
        self.last_insertion_reading
    }

    pub fn particles(&self) -> &crate::topology::ParticleCollection {
        &self.network.particles
    }

    pub fn set_pause(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_end(&mut self) {
        self.end = true;
    }

    pub fn is_end(&self) -> bool {
        self.end || (self.config.simulation.nbsteps >= 0 && self.step as i64 >= self.config.simulation.nbsteps)
    }

    /// Runs [`Self::compute_step`] until [`Self::is_end`].
    pub fn run(&mut self) -> Result<(), EngineError> {
        while !self.is_end() {
            self.compute_step()?;
        }
        self.interactors.shutdown();
        Ok(())
    }

    fn snapshot(&self) -> SystemStateSnapshot {
        SystemStateSnapshot {
            step: self.step,
            particles: self
                .network
                .particles
                .iter()
                .map(|p| ParticleSnapshot {
                    uid: p.uid(),
                    position: p.position,
                    force: p.force,
                })
                .collect(),
        }
    }

    /// Runs one full step of the pipeline: interactor sync, spring
    /// forces, neighbor-list rebuild, the
    /// per-particle force sweep (parallel or serial per
    /// `simulation.enable_parallel_forces`), probe/rigid-body
    /// accumulation, constraints, rigid-body integration, position
    /// integration, the insertion-vector reading, and trajectory
    /// emission.
    pub fn compute_step(&mut self) -> Result<(), EngineError> {
        const PAUSE_POLL_INTERVAL: std::time::Duration = std::time::Duration::from_millis(10);
        while self.paused {
            std::thread::sleep(PAUSE_POLL_INTERVAL);
        }

        if !self.interactors.is_empty() {
            let snapshot = self.snapshot();
            let staged = self.interactors.sync(&snapshot);
            for force in staged {
                if let Some(particle) = self.network.particles.get_mut(force.uid) {
                    particle.force += force.force;
                }
            }
        }

        self.energies.reset();
        self.network.particles.set_all(|p| p.energies.reset());
        self.step += 1;

        self.apply_spring_forces();
        self.rebuild_neighbor_lists();

        if self.config.simulation.enable_parallel_forces {
            self.accumulate_particle_forces_parallel();
        } else {
            self.accumulate_particle_forces_serial();
        }

        self.couple_probe();
        self.accumulate_rigid_bodies();
        self.stash_previous_forces();

        self.apply_constraints();
        self.solve_rigid_bodies();
        self.integrate_positions()?;

        if let Some(observer) = &self.insertion_vector {
            self.last_insertion_reading = Some(observer.observe(&self.network.particles));
        }

        self.trajectory.emit(self.step, self.network.particles.as_slice())?;

        if self.config.simulation.samplerate > 0 && self.step % self.config.simulation.samplerate as u64 == 0 {
            log::info!(
                "step {}: total energy {:.3} kJ/mol, kinetic {:.3} kJ/mol",
                self.step,
                self.energies.total(),
                self.energies.kinetic
            );
        }

        Ok(())
    }

    /// Runs one Metropolis Monte-Carlo move per rigid body, accepting
    /// or rejecting based on the total IMPALA energy before and after.
    /// Only meaningful when `rigid_body_mode` is
    /// [`RigidBodyMode::MonteCarlo`].
    pub fn run_montecarlo_step(&mut self) {
        let translation_norm = self.config.rigid_body.montecarlo_translation_norm;
        let rotation_norm = self.config.rigid_body.montecarlo_rotation_norm;
        let temperature = self.config.rigid_body.montecarlo_temperature;

        for body_index in 0..self.rigid_bodies.len() {
            let member_indices: Vec<usize> = self.rigid_bodies[body_index].member_indices().to_vec();
            let membrane = self.membrane;

            let energy_before = self.rigid_body_impala_energy(&member_indices, &membrane);
            let previous_positions: Vec<Vec3> = member_indices
                .iter()
                .map(|&i| self.network.particles.by_index(i).position)
                .collect();
            let reference_point = self.rigid_bodies[body_index].reference_point;

            let rigid_move = propose_move(&mut self.rng, translation_norm, rotation_norm);
            for (&index, &previous_position) in member_indices.iter().zip(previous_positions.iter()) {
                let local = previous_position - reference_point;
                let rotated = reference_point + rigid_move.rotation * local + rigid_move.translation;
                self.network.particles.by_index_mut(index).position = rotated;
            }

            let energy_after = self.rigid_body_impala_energy(&member_indices, &membrane);
            let delta_e = energy_after - energy_before;

            if accept_move(&mut self.rng, delta_e, temperature) {
                self.rigid_bodies[body_index].reference_point = reference_point + rigid_move.translation;
            } else {
                for (&index, &previous_position) in member_indices.iter().zip(previous_positions.iter()) {
                    self.network.particles.by_index_mut(index).position = previous_position;
                }
            }
        }
    }

    fn rigid_body_impala_energy(&self, member_indices: &[usize], membrane: &Membrane) -> f32 {
        member_indices
            .iter()
            .map(|&i| {
                let particle = self.network.particles.by_index(i);
                let impala_particle = crate::forcefield::impala::ImpalaParticle {
                    surface: particle.impala.solvent_accessible_surface,
                    transfer: particle.impala.transfer_energy_per_surface,
                };
                crate::forcefield::impala::impala_energy(particle.position, impala_particle, membrane)
            })
            .sum()
    }

    /// Runs the automatic insertion-angle sweep for rigid body `body_index`
    /// about `axis`; routes results only to the caller, not through the
    /// ordinary trajectory writers (the sweep is an offline scoring
    /// pass, not a step of the dynamics).
    pub fn run_impala_sweep(&self, body_index: usize, axis: Vec3, steps: usize) -> Vec<SamplingRow> {
        let body = &self.rigid_bodies[body_index];
        let members: Vec<Particle> = body
            .member_indices()
            .iter()
            .map(|&i| self.network.particles.by_index(i).clone())
            .collect();
        sweep_insertion_angles(&members, &self.membrane, axis, steps)
    }

    pub fn acceptance_probability_of(&self, delta_e: f32) -> f32 {
        acceptance_probability(delta_e, self.config.rigid_body.montecarlo_temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3 as V;

    fn two_particle_topology() -> Topology {
        let mut topology = Topology::new(0);
        let a = topology.add_particle("A", V::new(0.0, 0.0, 0.0));
        let b = topology.add_particle("B", V::new(2.0, 0.0, 0.0));
        topology.add_spring(a, b, Some(1.0), 10.0).unwrap();
        topology
    }

    #[test]
    fn spring_relaxes_toward_equilibrium() {
        let mut config = Configuration::default();
        config.simulation.enable_parallel_forces = false;
        config.simulation.timestep = 0.001;
        let mut engine = Engine::setup(config, two_particle_topology(), None, None).unwrap();

        let initial_distance = {
            let p = engine.particles();
            crate::vector::distance(p.by_index(0), p.by_index(1))
        };
        for _ in 0..500 {
            engine.compute_step().unwrap();
        }
        let final_distance = {
            let p = engine.particles();
            crate::vector::distance(p.by_index(0), p.by_index(1))
        };
        assert!((final_distance - 1.0).abs() < (initial_distance - 1.0).abs());
    }

    #[test]
    fn step_counter_advances_once_per_compute_step() {
        let mut config = Configuration::default();
        config.simulation.enable_parallel_forces = false;
        let mut engine = Engine::setup(config, two_particle_topology(), None, None).unwrap();
        engine.compute_step().unwrap();
        engine.compute_step().unwrap();
        assert_eq!(engine.step(), 2);
    }

    #[test]
    fn is_end_true_once_nbsteps_reached() {
        let mut config = Configuration::default();
        config.simulation.nbsteps = 2;
        config.simulation.enable_parallel_forces = false;
        let mut engine = Engine::setup(config, two_particle_topology(), None, None).unwrap();
        assert!(!engine.is_end());
        engine.compute_step().unwrap();
        engine.compute_step().unwrap();
        assert!(engine.is_end());
    }

    #[test]
    fn setup_rejects_enabled_grid_without_samples() {
        let mut config = Configuration::default();
        config.potential_grid.enable = true;
        assert!(Engine::setup(config, two_particle_topology(), None, None).is_err());
    }
}
