//! Dense grid storage: a contiguous, preallocated three-axis array over a
//! [`CoordinateSystem`].

use super::coordinate_system::{Cell, CoordinateSystem, GridError};

/// Dense storage of one `T` per cell of a bounded [`CoordinateSystem`].
#[derive(Clone, Debug)]
pub struct DenseGrid<T> {
    coords: CoordinateSystem,
    shape: (usize, usize, usize),
    data: Vec<T>,
}

impl<T: Clone + Default> DenseGrid<T> {
    /// Allocates a dense grid over `coords`, which must be bounded.
    pub fn new(coords: CoordinateSystem) -> Self {
        let shape = coords
            .shape()
            .expect("DenseGrid requires a bounded coordinate system");
        let len = shape.0 * shape.1 * shape.2;
        Self {
            coords,
            shape,
            data: vec![T::default(); len],
        }
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coords
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.shape
    }

    fn flat_index(&self, cell: Cell) -> usize {
        let (x, y, z) = (cell.0 as usize, cell.1 as usize, cell.2 as usize);
        x + y * self.shape.0 + z * self.shape.0 * self.shape.1
    }

    /// Returns the value stored at `cell`, or an error if `cell` is out
    /// of range.
    pub fn at(&self, cell: Cell) -> Result<&T, GridError> {
        self.coords.check_in_range(cell)?;
        Ok(&self.data[self.flat_index(cell)])
    }

    /// Returns a mutable reference to the value stored at `cell`, or an
    /// error if `cell` is out of range.
    pub fn at_mut(&mut self, cell: Cell) -> Result<&mut T, GridError> {
        self.coords.check_in_range(cell)?;
        let idx = self.flat_index(cell);
        Ok(&mut self.data[idx])
    }

    /// Sets the value stored at `cell`.
    pub fn set(&mut self, cell: Cell, value: T) -> Result<(), GridError> {
        *self.at_mut(cell)? = value;
        Ok(())
    }

    /// Resets every cell to `T::default()`, keeping the geometry.
    pub fn clear(&mut self) {
        self.data.iter_mut().for_each(|v| *v = T::default());
    }

    /// Iterates over every `(cell, &value)` pair, z-fastest then y then x.
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        let (sx, sy, _sz) = self.shape;
        self.data.iter().enumerate().map(move |(idx, v)| {
            let x = idx % sx;
            let y = (idx / sx) % sy;
            let z = idx / (sx * sy);
            ((x as i64, y as i64, z as i64), v)
        })
    }
}

impl<T: Clone + Default> DenseGrid<Vec<T>> {
    /// `DenseGridOfContainers::add`: appends `value` to the container
    /// stored at `cell`.
    pub fn add(&mut self, cell: Cell, value: T) -> Result<(), GridError> {
        self.at_mut(cell)?.push(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::BoundingBox;
    use crate::vector::Vec3;

    fn grid() -> DenseGrid<f32> {
        let cs = CoordinateSystem::bounded(
            BoundingBox::new(Vec3::zeros(), Vec3::new(3.0, 3.0, 3.0)),
            Vec3::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        DenseGrid::new(cs)
    }

    #[test]
    fn set_and_at_round_trip() {
        let mut g = grid();
        g.set((1, 1, 1), 42.0).unwrap();
        assert_eq!(*g.at((1, 1, 1)).unwrap(), 42.0);
    }

    #[test]
    fn at_out_of_range_errors() {
        let g = grid();
        assert!(g.at((3, 0, 0)).is_err());
    }

    #[test]
    fn clear_resets_but_keeps_shape() {
        let mut g = grid();
        g.set((0, 0, 0), 5.0).unwrap();
        g.clear();
        assert_eq!(*g.at((0, 0, 0)).unwrap(), 0.0);
        assert_eq!(g.shape(), (3, 3, 3));
    }

    #[test]
    fn container_add_appends() {
        let cs = CoordinateSystem::bounded(
            BoundingBox::new(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0)),
            Vec3::new(1.0, 1.0, 1.0),
        )
        .unwrap();
        let mut g: DenseGrid<Vec<usize>> = DenseGrid::new(cs);
        g.add((0, 0, 0), 1).unwrap();
        g.add((0, 0, 0), 2).unwrap();
        assert_eq!(g.at((0, 0, 0)).unwrap(), &vec![1, 2]);
    }
}
