//! Regular 3-D lattice indexing shared by the dense/sparse/infinite grids
//! and the neighbor search accelerator.

use smallvec::SmallVec;

use crate::bbox::BoundingBox;
use crate::vector::Vec3;

/// Discrete cell coordinates on a [`CoordinateSystem`] lattice.
pub type Cell = (i64, i64, i64);

/// A shared error type for out-of-bounds cell access on bounded grids.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error("grid[{stage}]: cell {cell:?} is out of range {shape:?}")]
    OutOfRange {
        stage: &'static str,
        cell: Cell,
        shape: (usize, usize, usize),
    },
    #[error("grid[{stage}]: cannot construct a grid with zero-sized cells")]
    ZeroCellSize { stage: &'static str },
}

/// Geometry shared by every grid storage variant: an origin, a per-axis
/// cell size, and (for bounded grids) a derived shape.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateSystem {
    origin: Vec3,
    cell_size: Vec3,
    /// `None` for the infinite variant, which has no shape.
    shape: Option<(usize, usize, usize)>,
}

impl CoordinateSystem {
    /// A coordinate system with no bounds: used by the infinite grid.
    pub fn unbounded(origin: Vec3, cell_size: Vec3) -> Result<Self, GridError> {
        if cell_size.x <= 0.0 || cell_size.y <= 0.0 || cell_size.z <= 0.0 {
            return Err(GridError::ZeroCellSize {
                stage: "CoordinateSystem::unbounded",
            });
        }
        Ok(Self {
            origin,
            cell_size,
            shape: None,
        })
    }

    /// A coordinate system bounded by `boundaries`, with shape derived as
    /// `ceil(length / cell_size)` per axis.
    pub fn bounded(boundaries: BoundingBox, cell_size: Vec3) -> Result<Self, GridError> {
        if cell_size.x <= 0.0 || cell_size.y <= 0.0 || cell_size.z <= 0.0 {
            return Err(GridError::ZeroCellSize {
                stage: "CoordinateSystem::bounded",
            });
        }
        let length = boundaries.length();
        let shape = (
            (length.x / cell_size.x).ceil().max(1.0) as usize,
            (length.y / cell_size.y).ceil().max(1.0) as usize,
            (length.z / cell_size.z).ceil().max(1.0) as usize,
        );
        Ok(Self {
            origin: boundaries.min(),
            cell_size,
            shape: Some(shape),
        })
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    /// `None` for the unbounded (infinite) variant.
    pub fn shape(&self) -> Option<(usize, usize, usize)> {
        self.shape
    }

    /// `cell_coordinates(position) = floor((position - origin) / cell_size)`.
    pub fn cell_coordinates(&self, position: Vec3) -> Cell {
        let rel = position - self.origin;
        (
            (rel.x / self.cell_size.x).floor() as i64,
            (rel.y / self.cell_size.y).floor() as i64,
            (rel.z / self.cell_size.z).floor() as i64,
        )
    }

    /// Raises [`GridError::OutOfRange`] if `cell` falls outside the shape
    /// of a bounded coordinate system. Always `Ok` for the unbounded
    /// variant.
    pub fn check_in_range(&self, cell: Cell) -> Result<(), GridError> {
        let Some(shape) = self.shape else {
            return Ok(());
        };
        let in_range = cell.0 >= 0
            && cell.1 >= 0
            && cell.2 >= 0
            && (cell.0 as usize) < shape.0
            && (cell.1 as usize) < shape.1
            && (cell.2 as usize) < shape.2;
        if in_range {
            Ok(())
        } else {
            Err(GridError::OutOfRange {
                stage: "CoordinateSystem::check_in_range",
                cell,
                shape,
            })
        }
    }

    /// Enumerates the `(2*ox+1)*(2*oy+1)*(2*oz+1)` cube of cells centered
    /// on `cell`, z-fastest then y then x. Clipped to bounds when the
    /// coordinate system is bounded.
    pub fn cells_within_offset(&self, cell: Cell, offset: (i64, i64, i64)) -> Vec<Cell> {
        let (ox, oy, oz) = offset;
        let mut cells = Vec::with_capacity(
            ((2 * ox + 1) * (2 * oy + 1) * (2 * oz + 1)).max(0) as usize,
        );
        for dx in -ox..=ox {
            for dy in -oy..=oy {
                for dz in -oz..=oz {
                    let candidate = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                    if self.check_in_range(candidate).is_ok() {
                        cells.push(candidate);
                    }
                }
            }
        }
        cells
    }

    /// Cells within radius `r` of `cell`, taking `ceil(r / cell_size)`
    /// cells on each axis.
    pub fn cells_within_radius(&self, cell: Cell, r: f32) -> Vec<Cell> {
        let ox = (r / self.cell_size.x).ceil() as i64;
        let oy = (r / self.cell_size.y).ceil() as i64;
        let oz = (r / self.cell_size.z).ceil() as i64;
        self.cells_within_offset(cell, (ox, oy, oz))
    }

    /// Up to 27 immediate neighbor cells (including `cell` itself),
    /// z-fastest then y then x, clipped to bounds when bounded.
    pub fn neighbor_cells_27(&self, cell: Cell) -> SmallVec<[Cell; 27]> {
        let mut cells = SmallVec::new();
        for dx in -1..=1i64 {
            for dy in -1..=1i64 {
                for dz in -1..=1i64 {
                    let candidate = (cell.0 + dx, cell.1 + dy, cell.2 + dz);
                    if self.check_in_range(candidate).is_ok() {
                        cells.push(candidate);
                    }
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 10.0, 10.0))
    }

    #[test]
    fn cell_coordinates_floor_correctly() {
        let cs = CoordinateSystem::bounded(unit_box(), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        assert_eq!(cs.cell_coordinates(Vec3::new(3.5, 0.1, 9.9)), (3, 0, 9));
    }

    #[test]
    fn bounded_rejects_out_of_range() {
        let cs = CoordinateSystem::bounded(unit_box(), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        assert!(cs.check_in_range((10, 0, 0)).is_err());
        assert!(cs.check_in_range((-1, 0, 0)).is_err());
        assert!(cs.check_in_range((9, 9, 9)).is_ok());
    }

    #[test]
    fn unbounded_never_raises() {
        let cs = CoordinateSystem::unbounded(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        assert!(cs.check_in_range((-1000, 1000, -1)).is_ok());
    }

    #[test]
    fn cells_within_offset_cube_size() {
        let cs = CoordinateSystem::unbounded(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)).unwrap();
        let cells = cs.cells_within_offset((0, 0, 0), (1, 1, 1));
        assert_eq!(cells.len(), 27);
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        assert!(CoordinateSystem::unbounded(Vec3::zeros(), Vec3::new(0.0, 1.0, 1.0)).is_err());
    }
}
