//! The probe: a single point particle, independent of the topology,
//! symmetrically Coulomb/steric-coupled against every dynamic particle.

use crate::config::ProbeConfig;
use crate::forcefield::{electrostatic, steric, StericParticle};
use crate::topology::Particle;
use crate::vector::{distance, safe_normalize, Located, Vec3};

/// The probe's own dynamical state, integrated the same way a regular
/// dynamic particle is (Euler, no rigid-body/membrane coupling).
#[derive(Clone, Debug)]
pub struct Probe {
    pub position: Vec3,
    pub velocity: Vec3,
    pub force: Vec3,
    pub mass: f32,
    pub epsilon: f32,
    pub radius: f32,
    pub charge: f32,
    pub enable_electrostatic: bool,
    pub enable_steric: bool,
}

impl Located for Probe {
    fn position(&self) -> Vec3 {
        self.position
    }
}

impl Probe {
    pub fn from_config(config: &ProbeConfig) -> Self {
        Self {
            position: Vec3::new(config.x, config.y, config.z),
            velocity: Vec3::zeros(),
            force: Vec3::zeros(),
            mass: if config.mass > 0.0 { config.mass } else { 1.0 },
            epsilon: config.epsilon,
            radius: config.radius,
            charge: config.charge,
            enable_electrostatic: config.enable_electrostatic,
            enable_steric: config.enable_steric,
        }
    }

    pub fn reset_force(&mut self) {
        self.force = Vec3::zeros();
    }

    /// Couples `self` against `particle`, adding the pairwise force to
    /// both `self.force` and `particle.force` (equal and opposite), and
    /// returning the energy contributed (for observability only).
    pub fn couple(&mut self, particle: &mut Particle, dielectric: f32, steric_stiffness: f32) -> f32 {
        let d = distance(self, particle);
        let direction = safe_normalize(particle.position - self.position);
        let mut energy = 0.0;

        if self.enable_electrostatic && particle.is_charged() {
            energy += electrostatic::electrostatic_energy(self.charge, particle.charge(), d, dielectric);
            let force_module = electrostatic::electrostatic_force_module(self.charge, particle.charge(), d, dielectric);
            self.force += direction * force_module;
            particle.force -= direction * force_module;
        }

        if self.enable_steric {
            let mode = crate::forcefield::StericMode::Linear;
            let a = StericParticle {
                radius: self.radius,
                epsilon: self.epsilon,
            };
            let b = StericParticle {
                radius: particle.radius,
                epsilon: particle.epsilon,
            };
            energy += steric::steric_energy(mode, d, a, b, steric_stiffness);
            let force_module = steric::steric_force_module(mode, d, a, b, steric_stiffness);
            self.force += direction * force_module;
            particle.force -= direction * force_module;
        }

        energy
    }

    pub fn integrate(&mut self, timestep: f32) {
        self.velocity += self.force * (timestep / self.mass);
        self.position += self.velocity * timestep;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Particle;

    #[test]
    fn disabled_probe_contributes_nothing() {
        let mut probe = Probe::from_config(&ProbeConfig {
            enable: true,
            enable_electrostatic: false,
            enable_steric: false,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            mass: 1.0,
            epsilon: 1.0,
            radius: 1.0,
            charge: 1.0,
        });
        let mut particle = Particle::new(0, "CA", Vec3::new(3.0, 0.0, 0.0));
        particle.set_charge(1.0);
        let energy = probe.couple(&mut particle, 1.0, 1.0);
        assert_eq!(energy, 0.0);
        assert_eq!(probe.force, Vec3::zeros());
    }

    #[test]
    fn coupled_forces_are_equal_and_opposite() {
        let mut probe = Probe::from_config(&ProbeConfig {
            enable: true,
            enable_electrostatic: true,
            enable_steric: true,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            mass: 1.0,
            epsilon: 1.0,
            radius: 1.0,
            charge: 1.0,
        });
        let mut particle = Particle::new(0, "CA", Vec3::new(3.0, 0.0, 0.0));
        particle.set_charge(-1.0);
        probe.couple(&mut particle, 1.0, 1.0);
        assert!((probe.force + particle.force).norm() < 1e-6);
    }
}
