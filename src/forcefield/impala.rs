//! IMPALA implicit-membrane potential, including the double tubular
//! membrane extension (two offset, independently curved leaflets).
//!
//! Ported from `original_source/src/forcefield/energy/imp.hpp`, cleaned
//! up to operate on [`Vec3`] instead of raw `x, y, z` triples.

use super::constants::GLOBAL_IMP_FORCE_CONVERT;
use crate::vector::Vec3;

/// Steepness of the burial-fraction sigmoid, in `A^-1`.
const ALPHA: f32 = 1.99;
/// Half-width of the membrane core, in `A`.
const Z0: f32 = 15.75;
/// Lipid-phase energy density, in `kJ*mol^-1`.
const A_LIP: f32 = -0.018;

/// Per-particle properties consumed by the IMPALA kernel.
#[derive(Clone, Copy, Debug)]
pub struct ImpalaParticle {
    /// Solvent-accessible surface of the particle.
    pub surface: f32,
    /// Transfer energy per unit accessible surface.
    pub transfer: f32,
}

/// One leaflet's geometry: a z-offset from the coordinate origin and an
/// optional tube curvature (`0.0` means a flat membrane).
#[derive(Clone, Copy, Debug, Default)]
pub struct Leaflet {
    pub offset: f32,
    pub tube_curvature: f32,
}

impl Leaflet {
    pub fn flat() -> Self {
        Self {
            offset: 0.0,
            tube_curvature: 0.0,
        }
    }

    fn is_flat(&self) -> bool {
        self.offset == 0.0 && self.tube_curvature == 0.0
    }

    fn radius(&self) -> f32 {
        if self.tube_curvature == 0.0 {
            1_000_000.0
        } else {
            (1.0 / self.tube_curvature).abs()
        }
    }

    fn curv_sign(&self) -> f32 {
        if self.tube_curvature > 0.0 {
            1.0
        } else if self.tube_curvature < 0.0 {
            -1.0
        } else {
            0.0
        }
    }
}

/// A full double tubular membrane: an upper and a lower leaflet. A
/// single flat membrane is `{ upper: Leaflet::flat(), lower: Leaflet::flat() }`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Membrane {
    pub upper: Leaflet,
    pub lower: Leaflet,
}

impl Membrane {
    pub fn flat() -> Self {
        Self {
            upper: Leaflet::flat(),
            lower: Leaflet::flat(),
        }
    }

    fn is_flat(&self) -> bool {
        self.upper.is_flat() && self.lower.is_flat()
    }
}

/// Effective z-coordinate (and the vector from the particle to the
/// leaflet's local curvature center, used for the force direction) of
/// `position` with respect to `leaflet`, with `sign` flipping the role
/// of upper (`+1`) vs. lower (`-1`) leaflets as in the original.
fn effective(position: Vec3, leaflet: &Leaflet, sign: f32) -> (f32, Vec3) {
    let curv_sign = leaflet.curv_sign();
    let radius = leaflet.radius();
    let center = Vec3::new(0.0, position.y, sign * leaflet.offset - curv_sign * radius);
    let v = position - center;

    if curv_sign == 0.0 {
        return (position.z, Vec3::new(0.0, 0.0, 1.0));
    }

    let z_eff = if position.z > center.z {
        curv_sign * v.norm() + sign * leaflet.offset - radius
    } else {
        -curv_sign * v.norm() + sign * leaflet.offset - radius
    };
    (z_eff, v)
}

fn burial_fraction(z_eff: f32, offset: f32) -> f64 {
    let arg = ALPHA as f64 * ((z_eff as f64 - offset as f64).abs() - Z0 as f64);
    0.5 - 1.0 / (1.0 + arg.exp())
}

fn burial_derivative(z_eff: f32, offset: f32) -> f64 {
    let diff = z_eff as f64 - offset as f64;
    let expo = (ALPHA as f64 * (diff.abs() - Z0 as f64)).exp();
    let d = (ALPHA as f64 * diff * expo) / ((expo + 1.0).powi(2) * diff.abs());
    if d.is_nan() || !d.is_finite() {
        0.0
    } else {
        d
    }
}

fn leaflet_energy(position: Vec3, particle: ImpalaParticle, leaflet: &Leaflet, sign: f32) -> f64 {
    let (z_eff, _) = effective(position, leaflet, sign);
    let c = burial_fraction(z_eff, sign * leaflet.offset);
    let hydro = -(particle.surface as f64) * (particle.transfer as f64) * c;
    let lipid = A_LIP as f64 * particle.surface as f64 * c;
    hydro + lipid
}

fn leaflet_force(position: Vec3, particle: ImpalaParticle, leaflet: &Leaflet, sign: f32) -> Vec3 {
    let (z_eff, v) = effective(position, leaflet, sign);
    let dcz = burial_derivative(z_eff, sign * leaflet.offset);
    let hydro = -(particle.surface as f64) * (particle.transfer as f64) * dcz;
    let lipid = A_LIP as f64 * particle.surface as f64 * dcz;

    let direction = if leaflet.curv_sign() == 0.0 {
        Vec3::new(0.0, 0.0, 1.0)
    } else {
        crate::vector::safe_normalize(v)
    };

    direction * (((hydro + lipid) as f32) * GLOBAL_IMP_FORCE_CONVERT)
}

/// IMPALA energy of a particle at `position`, in `kJ*mol^-1`.
pub fn impala_energy(position: Vec3, particle: ImpalaParticle, membrane: &Membrane) -> f32 {
    if membrane.is_flat() {
        leaflet_energy(position, particle, &membrane.upper, 1.0) as f32
    } else {
        (leaflet_energy(position, particle, &membrane.upper, 1.0)
            + leaflet_energy(position, particle, &membrane.lower, -1.0)) as f32
    }
}

/// IMPALA force on a particle at `position`, in `Da*A*fs^-2`.
pub fn impala_force(position: Vec3, particle: ImpalaParticle, membrane: &Membrane) -> Vec3 {
    if membrane.is_flat() {
        leaflet_force(position, particle, &membrane.upper, 1.0)
    } else {
        leaflet_force(position, particle, &membrane.upper, 1.0)
            + leaflet_force(position, particle, &membrane.lower, -1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deeply_buried_particle_has_negative_hydrophobic_energy() {
        let p = ImpalaParticle {
            surface: 10.0,
            transfer: 1.0,
        };
        let e = impala_energy(Vec3::new(0.0, 0.0, 0.0), p, &Membrane::flat());
        assert!(e < 0.0);
    }

    #[test]
    fn far_from_membrane_energy_vanishes() {
        let p = ImpalaParticle {
            surface: 10.0,
            transfer: 1.0,
        };
        let e = impala_energy(Vec3::new(0.0, 0.0, 200.0), p, &Membrane::flat());
        assert!(e.abs() < 1e-3);
    }

    #[test]
    fn double_membrane_sums_both_leaflets() {
        let p = ImpalaParticle {
            surface: 10.0,
            transfer: 1.0,
        };
        let membrane = Membrane {
            upper: Leaflet {
                offset: 20.0,
                tube_curvature: 0.0,
            },
            lower: Leaflet {
                offset: 20.0,
                tube_curvature: 0.0,
            },
        };
        // At z=0, symmetric double membrane: both leaflets contribute identically.
        let e = impala_energy(Vec3::new(0.0, 0.0, 0.0), p, &membrane);
        let single = leaflet_energy(Vec3::new(0.0, 0.0, 0.0), p, &membrane.upper, 1.0) as f32;
        assert!((e - 2.0 * single).abs() < 1e-3);
    }

    #[test]
    fn force_has_no_nan_even_at_singular_points() {
        let p = ImpalaParticle {
            surface: 10.0,
            transfer: 1.0,
        };
        let membrane = Membrane {
            upper: Leaflet {
                offset: 0.0,
                tube_curvature: 0.1,
            },
            lower: Leaflet::flat(),
        };
        let f = impala_force(Vec3::new(0.0, 0.0, 0.0), p, &membrane);
        assert!(f.iter().all(|c| c.is_finite()));
    }
}
