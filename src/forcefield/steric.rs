//! Short-range steric repulsion: a linear penalty mode, and three
//! Lennard-Jones 8-6 variants differing only in their combining rules.

use super::combination_rules as rules;
use super::constants::{GLOBAL_SPRING_FORCE_CONVERT, MINIMAL_DISTANCE_STERIC_CUTOFF};

/// Selects which steric formula the force field uses. Chosen once per
/// run from `Configuration`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StericMode {
    Linear,
    LennardJones86Lewitt,
    LennardJones86Zacharias,
    LennardJones86Amber,
}

/// Per-particle steric parameters needed by every mode.
#[derive(Clone, Copy, Debug)]
pub struct StericParticle {
    pub radius: f32,
    pub epsilon: f32,
}

/// `E = 0.5*k*Delta^2` if `Delta = d - (r_i+r_j) < 0`, else `0`.
fn linear_energy(distance: f32, radius_i: f32, radius_j: f32, stiffness: f32) -> f32 {
    let delta = distance - (radius_i + radius_j);
    if delta < 0.0 {
        0.5 * stiffness * delta * delta
    } else {
        0.0
    }
}

/// `F = k*Delta` along the separation, zero when particles don't overlap.
fn linear_force_module(distance: f32, radius_i: f32, radius_j: f32, stiffness: f32) -> f32 {
    let delta = distance - (radius_i + radius_j);
    if delta < 0.0 {
        stiffness * delta * GLOBAL_SPRING_FORCE_CONVERT
    } else {
        0.0
    }
}

/// 8-6 Lennard-Jones form: `E = eps * (sigma/d)^8 - 2*eps*(sigma/d)^6`,
/// the same "repulsive minus attractive" shape as the classic 12-6 form
/// but with softer exponents.
fn lj86_energy(distance: f32, epsilon: f32, sigma: f32) -> f32 {
    if distance < MINIMAL_DISTANCE_STERIC_CUTOFF {
        return 0.0;
    }
    let ratio = sigma / distance;
    let r8 = ratio.powi(8);
    let r6 = ratio.powi(6);
    epsilon * (r8 - 2.0 * r6)
}

/// `F = -dE/dd`, converted to the engine's native force unit.
fn lj86_force_module(distance: f32, epsilon: f32, sigma: f32) -> f32 {
    if distance < MINIMAL_DISTANCE_STERIC_CUTOFF {
        return 0.0;
    }
    let ratio = sigma / distance;
    let r8 = ratio.powi(8);
    let r6 = ratio.powi(6);
    let force_module = epsilon * (8.0 * r8 - 12.0 * r6) / distance;
    force_module * GLOBAL_SPRING_FORCE_CONVERT
}

/// Combines two particles' parameters into an (epsilon, sigma) pair
/// according to `mode`. `Linear` ignores epsilon/sigma entirely (it
/// uses radii directly) and is handled by the caller before reaching
/// this function.
fn combine(mode: StericMode, a: StericParticle, b: StericParticle) -> (f32, f32) {
    match mode {
        StericMode::Linear => unreachable!("linear mode does not combine epsilon/sigma"),
        StericMode::LennardJones86Lewitt => (
            rules::lorentz_berthelot_epsilon(a.epsilon, b.epsilon),
            rules::good_hope_sigma(a.radius, b.radius),
        ),
        StericMode::LennardJones86Zacharias => (
            rules::zacharias_epsilon(a.epsilon, b.epsilon),
            rules::zacharias_sigma(a.radius, b.radius),
        ),
        StericMode::LennardJones86Amber => (
            rules::amber_epsilon(a.epsilon, b.epsilon),
            rules::amber_sigma(a.radius, b.radius),
        ),
    }
}

/// Steric energy between two particles at `distance`, per `mode`.
pub fn steric_energy(mode: StericMode, distance: f32, a: StericParticle, b: StericParticle, stiffness: f32) -> f32 {
    match mode {
        StericMode::Linear => linear_energy(distance, a.radius, b.radius, stiffness),
        _ => {
            let (epsilon, sigma) = combine(mode, a, b);
            lj86_energy(distance, epsilon, sigma)
        }
    }
}

/// Steric force module between two particles at `distance`, per `mode`.
pub fn steric_force_module(mode: StericMode, distance: f32, a: StericParticle, b: StericParticle, stiffness: f32) -> f32 {
    match mode {
        StericMode::Linear => linear_force_module(distance, a.radius, b.radius, stiffness),
        _ => {
            let (epsilon, sigma) = combine(mode, a, b);
            lj86_force_module(distance, epsilon, sigma)
        }
    }
}
