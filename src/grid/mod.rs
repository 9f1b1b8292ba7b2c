//! Regular 3-D lattice storage: a shared [`coordinate_system::CoordinateSystem`]
//! geometry over three storage variants (dense, sparse, infinite), plus
//! the grid-sampled electrostatic [`potential::PotentialGrid`].

pub mod coordinate_system;
pub mod dense;
pub mod infinite;
pub mod potential;
pub mod sparse;

pub use coordinate_system::{Cell, CoordinateSystem, GridError};
pub use dense::DenseGrid;
pub use infinite::InfiniteGrid;
pub use potential::PotentialGrid;
pub use sparse::SparseGrid;
