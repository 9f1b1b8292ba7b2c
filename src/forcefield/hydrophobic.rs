//! Hydrophobic coupling between two particles: a simple exponential
//! decay in their hydrophobicity product.

use super::constants::{AVOGADRO_NUMBER, JOULE_TO_KJOULE};

/// `E = -h1*h2*exp(-d)`, converted to `kJ*mol^-1`.
pub fn hydrophobic_energy(hydrophobicity1: f32, hydrophobicity2: f32, distance: f32) -> f32 {
    let mut energy = -(hydrophobicity1 as f64 * hydrophobicity2 as f64) * (-distance as f64).exp();
    energy *= AVOGADRO_NUMBER;
    energy *= JOULE_TO_KJOULE;
    energy as f32
}

/// `F = h1*h2*exp(-d)`, converted to `kJ*mol^-1` (same conversion as
/// the energy — the quantity is a force *module* expressed in the same
/// energy-per-unit-distance unit the rest of the kernel table uses).
pub fn hydrophobic_force_module(hydrophobicity1: f32, hydrophobicity2: f32, distance: f32) -> f32 {
    let mut force_module = (hydrophobicity1 as f64 * hydrophobicity2 as f64) * (-distance as f64).exp();
    force_module *= AVOGADRO_NUMBER;
    force_module *= JOULE_TO_KJOULE;
    force_module as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn energy_is_negative_for_like_hydrophobicity() {
        assert!(hydrophobic_energy(1.0, 1.0, 2.0) < 0.0);
    }

    #[test]
    fn force_and_energy_have_opposite_sign() {
        let e = hydrophobic_energy(1.0, 1.0, 2.0);
        let f = hydrophobic_force_module(1.0, 1.0, 2.0);
        assert!(e < 0.0 && f > 0.0);
    }

    #[test]
    fn decays_with_distance() {
        let f_near = hydrophobic_force_module(1.0, 1.0, 1.0);
        let f_far = hydrophobic_force_module(1.0, 1.0, 5.0);
        assert!(f_near > f_far);
    }
}
