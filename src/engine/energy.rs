//! Per-channel energy totals accumulated during one step.

/// Sum of every force-field channel's energy contribution over one
/// `compute_step`, reset at the start of each step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EnergyTotals {
    pub spring: f32,
    pub steric: f32,
    pub electrostatic: f32,
    pub electrostatic_field: f32,
    pub density_field: f32,
    pub impala: f32,
    pub hydrophobic: f32,
    pub probe: f32,
    pub kinetic: f32,
}

impl EnergyTotals {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn add(&mut self, other: &EnergyTotals) {
        self.spring += other.spring;
        self.steric += other.steric;
        self.electrostatic += other.electrostatic;
        self.electrostatic_field += other.electrostatic_field;
        self.density_field += other.density_field;
        self.impala += other.impala;
        self.hydrophobic += other.hydrophobic;
        self.probe += other.probe;
        self.kinetic += other.kinetic;
    }

    pub fn total(&self) -> f32 {
        self.spring
            + self.steric
            + self.electrostatic
            + self.electrostatic_field
            + self.density_field
            + self.impala
            + self.hydrophobic
            + self.probe
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_each_channel() {
        let mut total = EnergyTotals::default();
        total.add(&EnergyTotals {
            spring: 1.0,
            steric: 2.0,
            ..Default::default()
        });
        total.add(&EnergyTotals {
            spring: 1.0,
            ..Default::default()
        });
        assert_eq!(total.spring, 2.0);
        assert_eq!(total.steric, 2.0);
    }

    #[test]
    fn reset_zeroes_every_channel() {
        let mut total = EnergyTotals {
            spring: 5.0,
            ..Default::default()
        };
        total.reset();
        assert_eq!(total, EnergyTotals::default());
    }
}
