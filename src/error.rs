use thiserror::Error;

/// Top-level error type for the Bezix kernel.
#[derive(Debug, Error)]
pub enum BezixError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),
}

/// Errors related to geometric construction and computation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("invalid node shape: {0}")]
    InvalidShape(String),

    #[error("expected ambient dimension {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("{0} computation not yet implemented")]
    NotImplemented(&'static str),
}

/// Errors related to boundary topology.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("a curved polygon requires at least two sides, got {0}")]
    TooFewSides(usize),

    #[error("edges at junction {index} do not share a common endpoint")]
    EndpointMismatch { index: usize },
}

/// Convenience type alias for results using [`BezixError`].
pub type Result<T> = std::result::Result<T, BezixError>;
