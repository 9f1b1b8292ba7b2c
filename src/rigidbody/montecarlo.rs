//! Metropolis Monte-Carlo rigid-body move proposal and acceptance.

use nalgebra::UnitQuaternion;
use rand::Rng;

use crate::forcefield::constants::BOLTZMANN_J_PER_K;
use crate::vector::Vec3;

/// A proposed rigid move: a random-direction translation of fixed norm,
/// composed with a random-axis rotation of fixed angle.
#[derive(Clone, Copy, Debug)]
pub struct RigidMove {
    pub translation: Vec3,
    pub rotation: UnitQuaternion<f32>,
}

/// Draws a uniformly random unit vector scaled by `translation_norm`,
/// and a uniformly random rotation axis with a fixed `rotation_norm`
/// angle (in radians).
pub fn propose_move<R: Rng + ?Sized>(rng: &mut R, translation_norm: f32, rotation_norm: f32) -> RigidMove {
    let direction = random_unit_vector(rng);
    let axis = random_unit_vector(rng);
    let axis_unit = nalgebra::Unit::new_normalize(axis);
    RigidMove {
        translation: direction * translation_norm,
        rotation: UnitQuaternion::from_axis_angle(&axis_unit, rotation_norm),
    }
}

fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        let norm_sq = v.norm_squared();
        if norm_sq > 1e-6 && norm_sq <= 1.0 {
            return v / norm_sq.sqrt();
        }
    }
}

/// Metropolis acceptance probability `min(1, exp(-delta_e/(k_B*T)))`.
/// `delta_e` is in kJ/mol, `temperature` in Kelvin.
pub fn acceptance_probability(delta_e: f32, temperature: f32) -> f32 {
    if delta_e <= 0.0 {
        return 1.0;
    }
    let k_b_kj_per_mol = (BOLTZMANN_J_PER_K * crate::forcefield::constants::AVOGADRO_NUMBER * 1e-3) as f32;
    (-delta_e / (k_b_kj_per_mol * temperature)).exp().min(1.0)
}

/// Whether a proposed move is accepted, drawing one uniform sample from
/// `rng` and comparing against [`acceptance_probability`].
pub fn accept_move<R: Rng + ?Sized>(rng: &mut R, delta_e: f32, temperature: f32) -> bool {
    rng.gen::<f32>() < acceptance_probability(delta_e, temperature)
}
