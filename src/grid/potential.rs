//! Grid-sampled electrostatic potential, with a central-difference
//! gradient used to drive the electrostatic-field force.

use super::coordinate_system::{Cell, CoordinateSystem, GridError};
use super::dense::DenseGrid;
use crate::forcefield::constants::POTENTIAL_GRID_GRADIENT_SCALE;
use crate::vector::Vec3;

/// A dense potential field (in `K/e`, i.e. Kelvin per elementary
/// charge) plus its precomputed gradient, which the engine applies
/// directly as a force on every charged particle it covers.
#[derive(Clone, Debug)]
pub struct PotentialGrid {
    potential: DenseGrid<f32>,
    gradient: DenseGrid<Vec3>,
}

impl PotentialGrid {
    /// Builds the grid from raw potential samples, computing the
    /// gradient by central differences (one-sided at the boundary).
    pub fn from_samples(coords: CoordinateSystem, samples: DenseGrid<f32>) -> Self {
        let shape = samples.coordinate_system().shape().expect("potential grid must be bounded");
        let mut gradient = DenseGrid::<Vec3>::new(coords);

        for x in 0..shape.0 as i64 {
            for y in 0..shape.1 as i64 {
                for z in 0..shape.2 as i64 {
                    let cell = (x, y, z);
                    let g = Self::central_difference(&samples, cell, shape);
                    gradient.set(cell, g).expect("gradient shape matches potential shape");
                }
            }
        }

        Self {
            potential: samples,
            gradient,
        }
    }

    fn central_difference(samples: &DenseGrid<f32>, cell: Cell, shape: (usize, usize, usize)) -> Vec3 {
        let cell_size = samples.coordinate_system().cell_size();
        let axis_gradient = |axis: usize, extent: usize| -> f32 {
            let (lo, hi) = match axis {
                0 => ((cell.0 - 1, cell.1, cell.2), (cell.0 + 1, cell.1, cell.2)),
                1 => ((cell.0, cell.1 - 1, cell.2), (cell.0, cell.1 + 1, cell.2)),
                _ => ((cell.0, cell.1, cell.2 - 1), (cell.0, cell.1, cell.2 + 1)),
            };
            let h = cell_size[axis];
            let coord = match axis {
                0 => cell.0,
                1 => cell.1,
                _ => cell.2,
            };

            if coord == 0 {
                let center = *samples.at(cell).unwrap();
                let above = *samples.at(hi).unwrap();
                (above - center) / h
            } else if coord as usize == extent - 1 {
                let center = *samples.at(cell).unwrap();
                let below = *samples.at(lo).unwrap();
                (center - below) / h
            } else {
                let above = *samples.at(hi).unwrap();
                let below = *samples.at(lo).unwrap();
                (above - below) / (2.0 * h)
            }
        };

        Vec3::new(
            axis_gradient(0, shape.0),
            axis_gradient(1, shape.1),
            axis_gradient(2, shape.2),
        )
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        self.potential.coordinate_system()
    }

    /// Raw sampled potential at `cell`, in `K/e`.
    pub fn potential_at(&self, cell: Cell) -> Result<f32, GridError> {
        self.potential.at(cell).copied()
    }

    /// Force contribution on a particle of `charge` sitting in `cell`:
    /// `-charge * grad(potential) * POTENTIAL_GRID_GRADIENT_SCALE`.
    pub fn force_at(&self, cell: Cell, charge: f32) -> Result<Vec3, GridError> {
        let grad = *self.gradient.at(cell)?;
        Ok(grad * (-charge * POTENTIAL_GRID_GRADIENT_SCALE as f32))
    }

    /// Raw gradient force at `cell`, scaled by `scale` rather than the
    /// fixed electrostatic constant: used by the density grid, which
    /// contributes a force with no accompanying energy term.
    pub fn scaled_gradient_force_at(&self, cell: Cell, scale: f32) -> Result<Vec3, GridError> {
        let grad = *self.gradient.at(cell)?;
        Ok(grad * scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BoundingBox;

    fn flat_samples() -> (CoordinateSystem, DenseGrid<f32>) {
        let cs = CoordinateSystem::bounded(
            BoundingBox::new(Vec3::zeros(), Vec3::new(3.0, 3.0, 3.0)),
            Vec3::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        let grid = DenseGrid::<f32>::new(cs);
        (cs, grid)
    }

    #[test]
    fn flat_potential_has_zero_gradient() {
        let (cs, samples) = flat_samples();
        let potential = PotentialGrid::from_samples(cs, samples);
        let f = potential.force_at((1, 1, 1), 1.0).unwrap();
        assert!(f.norm() < 1e-6);
    }

    #[test]
    fn linear_ramp_has_constant_gradient() {
        let (cs, mut samples) = flat_samples();
        for x in 0..3i64 {
            for y in 0..3i64 {
                for z in 0..3i64 {
                    samples.set((x, y, z), x as f32).unwrap();
                }
            }
        }
        let potential = PotentialGrid::from_samples(cs, samples);
        let interior = potential.potential_at((1, 1, 1)).unwrap();
        assert_eq!(interior, 1.0);
    }
}
