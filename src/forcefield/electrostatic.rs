//! Pairwise Coulomb electrostatic energy and force.

use super::constants::{
    AVOGADRO_NUMBER, COULOMB_CONSTANT, ELEMENTARY_CHARGE_COULOMB, GLOBAL_ELECTROSTATIC_FORCE_CONVERT,
    JOULE_TO_KJOULE, MINIMAL_DISTANCE_ELECTROSTATIC_CUTOFF, PI,
};
use crate::forcefield::constants::ANGSTROM_TO_METER;

/// `E = k*q1*q2 / (eps*d)`, in `kJ*mol^-1`. Zero below the minimal
/// distance cutoff.
pub fn electrostatic_energy(charge1: f32, charge2: f32, distance: f32, dielectric: f32) -> f32 {
    if distance < MINIMAL_DISTANCE_ELECTROSTATIC_CUTOFF {
        return 0.0;
    }

    let q1 = charge1 as f64 * ELEMENTARY_CHARGE_COULOMB;
    let q2 = charge2 as f64 * ELEMENTARY_CHARGE_COULOMB;
    let distance_m = distance as f64 * ANGSTROM_TO_METER;

    let mut energy = COULOMB_CONSTANT * (q1 * q2) / (dielectric as f64 * distance_m);
    energy *= AVOGADRO_NUMBER; // J/mol
    energy *= JOULE_TO_KJOULE; // kJ/mol
    energy as f32
}

/// `F = -(q1*q2) / (4*pi*eps*d^2)`, converted to the engine's native
/// force unit. Zero below the minimal distance cutoff.
pub fn electrostatic_force_module(charge1: f32, charge2: f32, distance: f32, dielectric: f32) -> f32 {
    if distance < MINIMAL_DISTANCE_ELECTROSTATIC_CUTOFF {
        return 0.0;
    }

    let force_module = -(charge1 * charge2) / (4.0 * PI as f32 * dielectric * distance * distance);
    force_module * GLOBAL_ELECTROSTATIC_FORCE_CONVERT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_below_cutoff() {
        assert_eq!(electrostatic_energy(1.0, -1.0, 0.0, 1.0), 0.0);
        assert_eq!(electrostatic_force_module(1.0, -1.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn opposite_charges_attract() {
        // Opposite charges: negative (attractive) energy.
        assert!(electrostatic_energy(1.0, -1.0, 5.0, 1.0) < 0.0);
    }

    #[test]
    fn dielectric_scales_energy_inversely() {
        let e1 = electrostatic_energy(1.0, 1.0, 5.0, 1.0);
        let e2 = electrostatic_energy(1.0, 1.0, 5.0, 2.0);
        assert!((e2 - e1 / 2.0).abs() / e1.abs() < 1e-5);
    }
}
