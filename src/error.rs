//! The engine's single error type. Every fallible boundary — configuration
//! parsing, grid lookups, neighbor search, topology construction, and the
//! per-step pipeline itself — eventually surfaces through `EngineError`.

use thiserror::Error as ThisError;

/// Error type returned by the simulation engine.
///
/// The four named variants cover the boundaries this crate validates
/// itself; anything else (a panic-free but otherwise unanticipated
/// failure bubbled up through `anyhow`) lands in [`EngineError::Other`].
#[non_exhaustive]
#[derive(Debug, ThisError)]
pub enum EngineError {
    /// A `group.key = value` entry was unknown, duplicated, or malformed.
    #[error("configuration error in {stage}: {detail}")]
    Configuration { stage: &'static str, detail: String },

    /// Structured input (coordinates, grid samples, trajectory records)
    /// did not match the shape the reader expected.
    #[error("input format error in {stage}: {detail}")]
    InputFormat { stage: &'static str, detail: String },

    /// A precondition of the simulated domain was violated (e.g. an
    /// empty particle system handed to neighbor search, a non-positive
    /// cutoff, a spring between a particle and itself).
    #[error("domain precondition violated in {stage}: {detail}")]
    DomainPrecondition { stage: &'static str, detail: String },

    /// A resource (file, grid, trajectory sink) could not be acquired
    /// or written.
    #[error("resource error in {stage}: {detail}")]
    Resource { stage: &'static str, detail: String },

    /// Any error not represented by one of the explicit variants above.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn configuration(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::Configuration {
            stage,
            detail: detail.into(),
        }
    }

    pub fn input_format(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::InputFormat {
            stage,
            detail: detail.into(),
        }
    }

    pub fn domain_precondition(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::DomainPrecondition {
            stage,
            detail: detail.into(),
        }
    }

    pub fn resource(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::Resource {
            stage,
            detail: detail.into(),
        }
    }
}

impl From<crate::grid::GridError> for EngineError {
    fn from(error: crate::grid::GridError) -> Self {
        EngineError::domain_precondition("grid", error.to_string())
    }
}

impl From<crate::neighbor_search::NeighborSearchError> for EngineError {
    fn from(error: crate::neighbor_search::NeighborSearchError) -> Self {
        EngineError::domain_precondition("neighbor_search", error.to_string())
    }
}

impl From<crate::topology::TopologyError> for EngineError {
    fn from(error: crate::topology::TopologyError) -> Self {
        EngineError::domain_precondition("topology", error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_constructor_formats_stage_and_detail() {
        let err = EngineError::configuration("stage", "detail");
        assert_eq!(err.to_string(), "configuration error in stage: detail");
    }

    #[test]
    fn topology_error_converts_into_engine_error() {
        let topo_err = crate::topology::TopologyError::SelfSpring { uid: 7 };
        let engine_err: EngineError = topo_err.into();
        assert!(matches!(engine_err, EngineError::DomainPrecondition { .. }));
    }
}
