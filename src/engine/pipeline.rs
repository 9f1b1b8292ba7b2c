//! The per-step force-field pipeline: spring forces, the per-particle
//! kernel sweep, constraints, rigid-body solve, and integration.

use std::cell::RefCell;
use std::collections::HashSet;

use thread_local::ThreadLocal;

use crate::config::Configuration;
use crate::forcefield::electrostatic::{electrostatic_energy, electrostatic_force_module};
use crate::forcefield::electrostatic_field::electrostatic_field_energy;
use crate::forcefield::hydrophobic::{hydrophobic_energy, hydrophobic_force_module};
use crate::forcefield::impala::{impala_energy, impala_force, ImpalaParticle};
use crate::forcefield::spring::{spring_energy, spring_force_module};
use crate::forcefield::steric::{steric_energy, steric_force_module};
use crate::forcefield::{Membrane, StericParticle};
use crate::grid::PotentialGrid;
use crate::neighbor_search::NeighborFinder;
use crate::rigidbody::RigidBodyMode;
use crate::topology::particle::{Particle, ParticleEnergies};
use crate::vector::{distance, safe_normalize, Vec3};

use super::energy::EnergyTotals;
use super::Engine;
use crate::error::EngineError;

/// One dynamic particle's kernel-sweep result: the force to add, the
/// per-particle energy breakdown (for interactor observability), and
/// the engine-level channel totals it contributes (half the pairwise
/// energy per directed traversal, see module docs on `Engine`).
struct KernelResult {
    index: usize,
    force: Vec3,
    particle_energy: ParticleEnergies,
    totals: EnergyTotals,
}

/// A `Sync` snapshot of the references the per-particle kernel sweep
/// needs. Building this once up front (rather than capturing `&Engine`
/// itself in the `rayon` closure) keeps the parallel sweep from
/// requiring `Engine: Sync` — fields like the trajectory writers and
/// interactor registry hold trait objects that are only `Send`.
struct KernelContext<'a> {
    particles: &'a [Particle],
    electrostatic_searcher: Option<&'a (dyn NeighborFinder<Particle> + Send + Sync)>,
    steric_searcher: Option<&'a (dyn NeighborFinder<Particle> + Send + Sync)>,
    hydrophobic_searcher: Option<&'a (dyn NeighborFinder<Particle> + Send + Sync)>,
    potential_grid: Option<&'a PotentialGrid>,
    density_grid: Option<&'a PotentialGrid>,
    membrane: &'a Membrane,
    config: &'a Configuration,
}

impl Engine {
    pub(super) fn apply_spring_forces(&mut self) {
        if !self.config.spring.enable {
            return;
        }
        for spring in self.network.springs.iter() {
            if spring.is_inert(&self.network.particles) {
                continue;
            }
            let first_uid = spring.first_uid();
            let second_uid = spring.second_uid();
            let (pos_a, pos_b) = {
                let a = self.network.particles.get(first_uid).expect("spring endpoint must exist");
                let b = self.network.particles.get(second_uid).expect("spring endpoint must exist");
                (a.position, b.position)
            };
            let dist = (pos_b - pos_a).norm();
            let direction = safe_normalize(pos_b - pos_a);
            let force_module = spring_force_module(dist, spring.stiffness, spring.equilibrium) * self.config.spring.scale;
            let energy = spring_energy(dist, spring.stiffness, spring.equilibrium) * self.config.spring.scale;
            self.energies.spring += energy;

            if let Some(a) = self.network.particles.get_mut(first_uid) {
                if a.is_dynamic() {
                    a.force += direction * force_module;
                }
            }
            if let Some(b) = self.network.particles.get_mut(second_uid) {
                if b.is_dynamic() {
                    b.force -= direction * force_module;
                }
            }
        }
    }

    pub(super) fn rebuild_neighbor_lists(&mut self) {
        let slice = self.network.particles.as_slice();
        if let Some(searcher) = &mut self.steric_searcher {
            searcher.update(slice);
        }
        if let Some(searcher) = &mut self.electrostatic_searcher {
            searcher.update(slice);
        }
        if let Some(searcher) = &mut self.hydrophobic_searcher {
            searcher.update(slice);
        }
    }

    /// Builds the `Sync` snapshot of shared state the kernel sweep reads.
    fn kernel_context(&self) -> KernelContext<'_> {
        KernelContext {
            particles: self.network.particles.as_slice(),
            electrostatic_searcher: self.electrostatic_searcher.as_deref(),
            steric_searcher: self.steric_searcher.as_deref(),
            hydrophobic_searcher: self.hydrophobic_searcher.as_deref(),
            potential_grid: self.potential_grid.as_ref(),
            density_grid: self.density_grid.as_ref(),
            membrane: &self.membrane,
            config: &self.config,
        }
    }

    pub(super) fn accumulate_particle_forces_serial(&mut self) {
        let results: Vec<KernelResult> = {
            let ctx = self.kernel_context();
            self.network
                .dynamic_indices
                .iter()
                .map(|&index| compute_particle_kernels(&ctx, index))
                .collect()
        };
        for result in &results {
            self.energies.add(&result.totals);
        }
        self.apply_kernel_results(results);
    }

    pub(super) fn accumulate_particle_forces_parallel(&mut self) {
        use rayon::prelude::*;

        let thread_totals: ThreadLocal<RefCell<EnergyTotals>> = ThreadLocal::new();
        let results: Vec<KernelResult> = {
            let ctx = self.kernel_context();
            self.network
                .dynamic_indices
                .par_iter()
                .map(|&index| {
                    let result = compute_particle_kernels(&ctx, index);
                    thread_totals
                        .get_or(|| RefCell::new(EnergyTotals::default()))
                        .borrow_mut()
                        .add(&result.totals);
                    result
                })
                .collect()
        };

        for cell in thread_totals {
            self.energies.add(&cell.into_inner());
        }
        self.apply_kernel_results(results);
    }

    fn apply_kernel_results(&mut self, results: Vec<KernelResult>) {
        for result in results {
            let particle = self.network.particles.by_index_mut(result.index);
            particle.force += result.force;
            particle.energies.electrostatic += result.particle_energy.electrostatic;
            particle.energies.steric += result.particle_energy.steric;
            particle.energies.impala += result.particle_energy.impala;
            particle.energies.hydrophobic += result.particle_energy.hydrophobic;
        }
    }

    /// Serial probe-coupling pass: the probe mutates shared state
    /// (itself), so it runs after the embarrassingly-parallel kernel
    /// sweep rather than inside it.
    pub(super) fn couple_probe(&mut self) {
        let Some(probe) = &mut self.probe else { return };
        probe.reset_force();
        for &index in &self.network.dynamic_indices {
            let particle = self.network.particles.by_index_mut(index);
            let e = probe.couple(particle, self.config.coulomb.dielectric, self.config.steric.scale);
            self.energies.probe += e;
        }
        probe.integrate(self.config.simulation.timestep);
    }

    /// Serial rigid-body force/torque accumulation: reads each rigid
    /// particle's now-final force, so it runs after the kernel sweep.
    pub(super) fn accumulate_rigid_bodies(&mut self) {
        if self.rigid_body_mode != RigidBodyMode::Integrated {
            return;
        }
        for body in &mut self.rigid_bodies {
            body.reset_accumulators();
            for &index in body.member_indices() {
                let particle = self.network.particles.by_index(index);
                body.accumulate(particle.position, particle.force);
            }
        }
    }

    pub(super) fn stash_previous_forces(&mut self) {
        for &index in &self.network.dynamic_indices {
            let particle = self.network.particles.by_index_mut(index);
            particle.previous_force = particle.force;
        }
    }

    pub(super) fn apply_constraints(&mut self) {
        for constraint in &self.constraints {
            let (force_a, force_b) = constraint.member_forces(&self.network.particles);
            let share_a = force_a / constraint.a.indices.len() as f32;
            for &index in &constraint.a.indices {
                let particle = self.network.particles.by_index_mut(index);
                if particle.is_dynamic() {
                    particle.force += share_a;
                }
            }
            let share_b = force_b / constraint.b.indices.len() as f32;
            for &index in &constraint.b.indices {
                let particle = self.network.particles.by_index_mut(index);
                if particle.is_dynamic() {
                    particle.force += share_b;
                }
            }
        }
    }

    pub(super) fn solve_rigid_bodies(&mut self) {
        if self.rigid_body_mode != RigidBodyMode::Integrated {
            // Monte Carlo / IMPALA-sampling rigid-body solves are driven
            // by `Engine::run_montecarlo_step` / `run_impala_sweep`
            // instead of the per-step integrator.
            return;
        }

        let timestep = self.config.simulation.timestep;
        for body in &mut self.rigid_bodies {
            let previous_reference_point = body.reference_point;
            let previous_positions: Vec<(usize, Vec3)> = body
                .member_indices()
                .iter()
                .map(|&i| (i, self.network.particles.by_index(i).position))
                .collect();

            body.integrate(timestep);

            for (index, previous_position) in previous_positions {
                let velocity = body.member_velocity(previous_position);
                let new_position = body.propagate_position(previous_position, previous_reference_point);
                let particle = self.network.particles.by_index_mut(index);
                particle.position = new_position;
                particle.velocity = velocity;
            }
        }
    }

    pub(super) fn integrate_positions(&mut self) -> Result<(), EngineError> {
        let timestep = self.config.simulation.timestep;
        let rigid_indices: HashSet<usize> = self
            .rigid_bodies
            .iter()
            .flat_map(|b| b.member_indices().iter().copied())
            .collect();

        for &index in &self.network.dynamic_indices {
            let particle = self.network.particles.by_index_mut(index);

            if !rigid_indices.contains(&index) {
                particle.velocity += particle.force * (timestep / particle.mass());
                particle.position += particle.velocity * timestep;
            }

            if !particle.position.iter().all(|c| c.is_finite()) {
                return Err(EngineError::domain_precondition(
                    "Engine::integrate_positions",
                    format!("particle {} integrated to a non-finite position", particle.uid()),
                ));
            }

            let kinetic = 0.5 * particle.mass() * particle.velocity.norm_squared();
            particle.energies.kinetic += kinetic;
            self.energies.kinetic += kinetic;
            particle.force = Vec3::zeros();
        }

        Ok(())
    }
}

/// Computes every neighbor-list/grid/viscosity/IMPALA kernel
/// contribution for the dynamic particle at `index`. Takes a
/// [`KernelContext`] snapshot rather than `&Engine` so it can be called
/// from multiple `rayon` threads at once without requiring the whole
/// engine to be `Sync`.
fn compute_particle_kernels(ctx: &KernelContext<'_>, index: usize) -> KernelResult {
    let particles = ctx.particles;
    let particle = &particles[index];

    let mut force = Vec3::zeros();
    let mut particle_energy = ParticleEnergies::default();
    let mut totals = EnergyTotals::default();

    if ctx.config.coulomb.enable && particle.is_charged() {
        if let Some(searcher) = ctx.electrostatic_searcher {
            for j in searcher.neighbors_of(particles, index) {
                let neighbor = &particles[j];
                if !neighbor.is_charged() {
                    continue;
                }
                let d = distance(particle, neighbor);
                let direction = safe_normalize(neighbor.position - particle.position);
                let force_module = electrostatic_force_module(particle.charge(), neighbor.charge(), d, ctx.config.coulomb.dielectric)
                    * ctx.config.coulomb.scale;
                force += direction * force_module;
                let e = 0.5
                    * electrostatic_energy(particle.charge(), neighbor.charge(), d, ctx.config.coulomb.dielectric)
                    * ctx.config.coulomb.scale;
                particle_energy.electrostatic += e;
                totals.electrostatic += e;
            }
        }
    }

    if let Some(grid) = ctx.potential_grid {
        if particle.is_charged() {
            let cell = grid.coordinate_system().cell_coordinates(particle.position);
            if let (Ok(potential), Ok(grid_force)) = (grid.potential_at(cell), grid.force_at(cell, particle.charge())) {
                force += grid_force;
                totals.electrostatic_field += electrostatic_field_energy(potential, particle.charge());
            }
        }
    }

    if let Some(grid) = ctx.density_grid {
        let cell = grid.coordinate_system().cell_coordinates(particle.position);
        let scale = ctx.config.density_grid.scale.unwrap_or(1.0);
        if let Ok(grid_force) = grid.scaled_gradient_force_at(cell, scale) {
            force += grid_force;
        }
    }

    if ctx.config.steric.enable {
        if let Some(searcher) = ctx.steric_searcher {
            let a = StericParticle {
                radius: particle.radius,
                epsilon: particle.epsilon,
            };
            for j in searcher.neighbors_of(particles, index) {
                let neighbor = &particles[j];
                let b = StericParticle {
                    radius: neighbor.radius,
                    epsilon: neighbor.epsilon,
                };
                let d = distance(particle, neighbor);
                let direction = safe_normalize(neighbor.position - particle.position);
                let force_module = steric_force_module(ctx.config.steric.mode, d, a, b, ctx.config.steric.scale);
                force += direction * force_module;
                let e = 0.5 * steric_energy(ctx.config.steric.mode, d, a, b, ctx.config.steric.scale);
                particle_energy.steric += e;
                totals.steric += e;
            }
        }
    }

    if ctx.config.viscosity.enable {
        force -= particle.velocity * ctx.config.viscosity.value;
    }

    if ctx.config.impala.enable {
        let impala_particle = ImpalaParticle {
            surface: particle.impala.solvent_accessible_surface,
            transfer: particle.impala.transfer_energy_per_surface,
        };
        let e = impala_energy(particle.position, impala_particle, ctx.membrane) * ctx.config.impala.scale;
        let f = impala_force(particle.position, impala_particle, ctx.membrane) * ctx.config.impala.scale;
        force += f;
        particle_energy.impala += e;
        totals.impala += e;
    }

    if ctx.config.hydrophobicity.enable && particle.is_hydrophobic() {
        if let Some(searcher) = ctx.hydrophobic_searcher {
            for j in searcher.neighbors_of(particles, index) {
                let neighbor = &particles[j];
                if !neighbor.is_hydrophobic() {
                    continue;
                }
                let d = distance(particle, neighbor);
                let direction = safe_normalize(neighbor.position - particle.position);
                let force_module = hydrophobic_force_module(particle.hydrophobicity(), neighbor.hydrophobicity(), d)
                    * ctx.config.hydrophobicity.scale;
                force += direction * force_module;
                let e = 0.5 * hydrophobic_energy(particle.hydrophobicity(), neighbor.hydrophobicity(), d)
                    * ctx.config.hydrophobicity.scale;
                particle_energy.hydrophobic += e;
                totals.hydrophobic += e;
            }
        }
    }

    KernelResult {
        index,
        force,
        particle_energy,
        totals,
    }
}
