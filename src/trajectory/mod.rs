//! Trajectory sampling and emission: the writer capability contract
//! plus three named trajectory format stand-ins.

pub mod formats;
pub mod writer;

pub use formats::{CsvSamplingWriter, PdbTrajectoryWriter, XtcTrajectoryWriter};
pub use writer::{Frame, TrajectoryManager, TrajectoryWriter};
