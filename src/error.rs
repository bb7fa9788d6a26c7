use thiserror::Error;

/// Top-level error type for the Muralis wall kernel.
///
/// Degenerate geometry never surfaces here: the math layer clamps it
/// (offset bounds, sine floors) and the authoring layer reports user
/// mistakes as feedback, so errors are reserved for store misuse.
#[derive(Debug, Error)]
pub enum MuralisError {
    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Errors related to the wall/point topology store.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wall endpoints coincide")]
    CoincidentEndpoints,

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to mesh generation.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("invalid mesh parameters: {0}")]
    InvalidParameters(String),

    #[error("wall is not completed")]
    WallNotCompleted,
}

/// Convenience type alias for results using [`MuralisError`].
pub type Result<T> = std::result::Result<T, MuralisError>;
