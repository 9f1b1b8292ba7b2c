//! Electrostatic energy of a particle against a grid-sampled potential.

use super::constants::{AVOGADRO_NUMBER, BOLTZMANN_J_PER_K, JOULE_TO_KJOULE};

/// `E = phi * q * k_B`, converted to `kJ*mol^-1`. The force contribution
/// is the grid's precomputed gradient field, applied directly by the
/// engine — there is no separate force formula here.
pub fn electrostatic_field_energy(potential: f32, charge: f32) -> f32 {
    let mut energy = (potential * charge) as f64; // q.K (potential carries K/e units)
    energy *= BOLTZMANN_J_PER_K; // J
    energy *= JOULE_TO_KJOULE; // kJ
    energy *= AVOGADRO_NUMBER; // kJ/mol
    energy as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_potential_or_charge_gives_zero_energy() {
        assert_eq!(electrostatic_field_energy(0.0, 5.0), 0.0);
        assert_eq!(electrostatic_field_energy(5.0, 0.0), 0.0);
    }

    #[test]
    fn energy_scales_linearly_with_charge() {
        let e1 = electrostatic_field_energy(3.0, 1.0);
        let e2 = electrostatic_field_energy(3.0, 2.0);
        assert!((e2 - 2.0 * e1).abs() < 1e-6);
    }
}
