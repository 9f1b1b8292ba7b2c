//! Neighbor search: given a cutoff distance and a set of located
//! particles, find which pairs are within range of each other.
//!
//! Three implementations share one contract ([`NeighborFinder`]):
//! [`brute_force::BruteForceSearch`] (the `O(N^2)` reference), and two
//! cell-list accelerators, [`cell_list::CellListSearch`] (rebuilt from
//! scratch on every `update`) and [`cell_list::CellListSearchDynamic`]
//! (which additionally caches each cell's 27-cell neighborhood so
//! repeated lookups skip recomputing it).

pub mod brute_force;
pub mod cell_list;

pub use brute_force::BruteForceSearch;
pub use cell_list::{CellListSearch, CellListSearchDynamic};

use crate::vector::Located;

/// Error returned when a neighbor search is asked to operate on an
/// invalid configuration.
#[derive(Debug, thiserror::Error)]
pub enum NeighborSearchError {
    #[error("neighbor search: the particle list is empty")]
    EmptySystem,
    #[error("neighbor search: cutoff distance must be positive, got {cutoff}")]
    NonPositiveCutoff { cutoff: f32 },
}

fn check_preconditions<T>(system: &[T], cutoff: f32) -> Result<(), NeighborSearchError> {
    if system.is_empty() {
        return Err(NeighborSearchError::EmptySystem);
    }
    if cutoff < 1e-6 {
        return Err(NeighborSearchError::NonPositiveCutoff { cutoff });
    }
    Ok(())
}

/// Common contract for every neighbor search accelerator: given the
/// index of an element in the backing system, return the indices of
/// every other element within the cutoff distance.
pub trait NeighborFinder<T: Located> {
    /// Returns the neighbors of `system[index]`.
    fn neighbors_of(&self, system: &[T], index: usize) -> Vec<usize>;

    /// Rebuilds any internal acceleration structure from the current
    /// positions in `system`. Must be called whenever particles move.
    fn update(&mut self, system: &[T]);
}
