//! Cell-list neighbor search accelerators, both built on an
//! [`InfiniteGrid`] of cell side length equal to the cutoff distance.

use crate::grid::InfiniteGrid;
use crate::vector::{distance, Located};

use super::{check_preconditions, NeighborFinder, NeighborSearchError};

fn populate<T: Located>(system: &[T], cutoff: f32) -> InfiniteGrid<Vec<usize>> {
    let cell_size = crate::vector::Vec3::new(cutoff, cutoff, cutoff);
    let mut grid = InfiniteGrid::new(crate::vector::Vec3::zeros(), cell_size);
    for (i, element) in system.iter().enumerate() {
        grid.add(element.position(), i);
    }
    grid
}

/// Cell list rebuilt from scratch every time [`NeighborFinder::update`]
/// is called; cheap to build, but every `neighbors_of` call walks the
/// 27-cell neighborhood of the queried element fresh.
#[derive(Clone, Debug)]
pub struct CellListSearch {
    cutoff: f32,
    grid: InfiniteGrid<Vec<usize>>,
}

impl CellListSearch {
    pub fn new<T: Located>(system: &[T], cutoff: f32) -> Result<Self, NeighborSearchError> {
        check_preconditions(system, cutoff)?;
        Ok(Self {
            cutoff,
            grid: populate(system, cutoff),
        })
    }

    fn neighbors_in_grid<T: Located>(&self, system: &[T], index: usize) -> Vec<usize> {
        let element = &system[index];
        let cell = self.grid.cell_of(element.position());
        let mut neighbors = Vec::new();
        for candidate_cell in self.grid.coordinate_system().neighbor_cells_27(cell) {
            if !self.grid.has_cell(candidate_cell) {
                continue;
            }
            for &candidate_index in &self.grid.at(candidate_cell) {
                if candidate_index != index
                    && distance(element, &system[candidate_index]) < self.cutoff
                {
                    neighbors.push(candidate_index);
                }
            }
        }
        neighbors
    }
}

impl<T: Located> NeighborFinder<T> for CellListSearch {
    fn neighbors_of(&self, system: &[T], index: usize) -> Vec<usize> {
        self.neighbors_in_grid(system, index)
    }

    fn update(&mut self, system: &[T]) {
        self.grid.clear();
        self.grid = populate(system, self.cutoff);
    }
}

/// Cell list that additionally caches the 27-cell neighborhood of every
/// occupied cell, so repeated [`NeighborFinder::neighbors_of`] calls
/// between rebuilds skip recomputing it. Intended for repeated queries
/// against the same neighbor list between rebuilds.
#[derive(Clone, Debug)]
pub struct CellListSearchDynamic {
    inner: CellListSearch,
    neighbor_cells: std::collections::HashMap<(i64, i64, i64), Vec<(i64, i64, i64)>>,
}

impl CellListSearchDynamic {
    pub fn new<T: Located>(system: &[T], cutoff: f32) -> Result<Self, NeighborSearchError> {
        let inner = CellListSearch::new(system, cutoff)?;
        let mut dynamic = Self {
            inner,
            neighbor_cells: std::collections::HashMap::new(),
        };
        dynamic.cache_neighbor_cells();
        Ok(dynamic)
    }

    fn cache_neighbor_cells(&mut self) {
        self.neighbor_cells.clear();
        let cells: Vec<_> = self.inner.grid.iter().map(|(cell, _)| *cell).collect();
        for cell in cells {
            let neighborhood = self.inner.grid.coordinate_system().neighbor_cells_27(cell).into_vec();
            self.neighbor_cells.insert(cell, neighborhood);
        }
    }
}

impl<T: Located> NeighborFinder<T> for CellListSearchDynamic {
    fn neighbors_of(&self, system: &[T], index: usize) -> Vec<usize> {
        let element = &system[index];
        let cell = self.inner.grid.cell_of(element.position());
        let Some(neighborhood) = self.neighbor_cells.get(&cell) else {
            return Vec::new();
        };

        let mut neighbors = Vec::new();
        for &candidate_cell in neighborhood {
            if !self.inner.grid.has_cell(candidate_cell) {
                continue;
            }
            for &candidate_index in &self.inner.grid.at(candidate_cell) {
                if candidate_index != index
                    && distance(element, &system[candidate_index]) < self.inner.cutoff
                {
                    neighbors.push(candidate_index);
                }
            }
        }
        neighbors
    }

    fn update(&mut self, system: &[T]) {
        self.inner.update(system);
        self.cache_neighbor_cells();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::Vec3;

    fn sample_system() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn static_cell_list_matches_brute_force() {
        let system = sample_system();
        let search = CellListSearch::new(&system, 2.0).unwrap();
        let mut neighbors = search.neighbors_of(&system, 0);
        neighbors.sort();
        assert_eq!(neighbors, vec![1]);
    }

    #[test]
    fn dynamic_cell_list_matches_brute_force() {
        let system = sample_system();
        let search = CellListSearchDynamic::new(&system, 2.0).unwrap();
        let mut neighbors = search.neighbors_of(&system, 0);
        neighbors.sort();
        assert_eq!(neighbors, vec![1]);
    }

    #[test]
    fn update_rebuilds_after_particles_move() {
        let mut system = sample_system();
        let mut search = CellListSearch::new(&system, 2.0).unwrap();
        system[2] = Vec3::new(0.5, 0.0, 0.0);
        search.update(&system);
        let mut neighbors = search.neighbors_of(&system, 0);
        neighbors.sort();
        assert_eq!(neighbors, vec![1, 2]);
    }
}
