//! Sparse grid storage: only occupied cells are kept, in a hash map keyed
//! by discrete cell coordinates.

use crate::{new_map, MapType};

use super::coordinate_system::{Cell, CoordinateSystem, GridError};

/// Sparse storage over a bounded [`CoordinateSystem`]: absent cells read
/// as `T::default()` but are not materialized until written.
#[derive(Clone, Debug)]
pub struct SparseGrid<T> {
    coords: CoordinateSystem,
    data: MapType<Cell, T>,
}

impl<T: Clone + Default> SparseGrid<T> {
    pub fn new(coords: CoordinateSystem) -> Self {
        Self {
            coords,
            data: new_map(),
        }
    }

    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.coords
    }

    pub fn has_cell(&self, cell: Cell) -> bool {
        self.data.contains_key(&cell)
    }

    /// Returns the value at `cell` (defaulted if unset), or an error if
    /// `cell` is out of the coordinate system's bounds.
    pub fn at(&self, cell: Cell) -> Result<T, GridError> {
        self.coords.check_in_range(cell)?;
        Ok(self.data.get(&cell).cloned().unwrap_or_default())
    }

    pub fn set(&mut self, cell: Cell, value: T) -> Result<(), GridError> {
        self.coords.check_in_range(cell)?;
        self.data.insert(cell, value);
        Ok(())
    }

    /// Keeps the geometry, drops every occupied key.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Cell, &T)> {
        self.data.iter()
    }
}

impl<T: Clone + Default> SparseGrid<Vec<T>> {
    pub fn add(&mut self, cell: Cell, value: T) -> Result<(), GridError> {
        self.coords.check_in_range(cell)?;
        self.data.entry(cell).or_default().push(value);
        Ok(())
    }
}
