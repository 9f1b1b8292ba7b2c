//! `O(N^2)` neighbor search: the reference implementation other
//! accelerators are tested against.

use super::{check_preconditions, NeighborFinder, NeighborSearchError};
use crate::vector::{distance, Located};

#[derive(Clone, Debug)]
pub struct BruteForceSearch {
    cutoff: f32,
}

impl BruteForceSearch {
    pub fn new<T: Located>(system: &[T], cutoff: f32) -> Result<Self, NeighborSearchError> {
        check_preconditions(system, cutoff)?;
        Ok(Self { cutoff })
    }
}

impl<T: Located> NeighborFinder<T> for BruteForceSearch {
    fn neighbors_of(&self, system: &[T], index: usize) -> Vec<usize> {
        let element = &system[index];
        system
            .iter()
            .enumerate()
            .filter(|(i, candidate)| *i != index && distance(element, *candidate) < self.cutoff)
            .map(|(i, _)| i)
            .collect()
    }

    fn update(&mut self, _system: &[T]) {
        // No acceleration structure to rebuild.
    }
}
