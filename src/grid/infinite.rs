//! Infinite grid storage: sparse and unbounded, with no shape and
//! therefore no out-of-range check.

use crate::{new_map, MapType};

use super::coordinate_system::{Cell, CoordinateSystem};
use crate::vector::Vec3;

/// Unbounded sparse storage. Used by the neighbor search accelerator to
/// bucket particles by cell without needing to know the overall extent
/// of the system up front.
#[derive(Clone, Debug)]
pub struct InfiniteGrid<T> {
    coords: CoordinateSystem,
    data: MapType<Cell, T>,
}

impl<T: Clone + Default> InfiniteGrid<T> {
    pub fn new(origin: Vec3, cell_size: Vec3) -> Self {
        let coords =
            CoordinateSystem::unbounded(origin, cell_size).expect("cell size must be positive");
        Self {
            coords,
            data: new_map(),
        }
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coords
    }

    pub fn cell_of(&self, position: Vec3) -> Cell {
        self.coords.cell_coordinates(position)
    }

    pub fn has_cell(&self, cell: Cell) -> bool {
        self.data.contains_key(&cell)
    }

    pub fn at(&self, cell: Cell) -> T {
        self.data.get(&cell).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, cell: Cell, value: T) {
        self.data.insert(cell, value);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &T)> {
        self.data.iter()
    }
}

impl<T: Clone + Default> InfiniteGrid<Vec<T>> {
    pub fn add(&mut self, position: Vec3, value: T) {
        let cell = self.cell_of(position);
        self.data.entry(cell).or_default().push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_lookup_far_from_origin() {
        let mut g: InfiniteGrid<Vec<usize>> = InfiniteGrid::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        g.add(Vec3::new(-1000.5, 2000.1, -3.2), 7);
        let cell = g.cell_of(Vec3::new(-1000.5, 2000.1, -3.2));
        assert!(g.has_cell(cell));
        assert_eq!(g.at(cell), vec![7]);
    }

    #[test]
    fn missing_cell_is_default() {
        let g: InfiniteGrid<Vec<usize>> = InfiniteGrid::new(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        assert!(g.at((5, 5, 5)).is_empty());
    }
}
