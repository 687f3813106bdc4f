use remesh_core::ElementId;
use thiserror::Error;

/// Error returned when spatial matching has no candidates to match against.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("candidate point cloud is empty")]
pub struct EmptySourceSetError;

/// Errors that can occur while matching two point clouds.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    #[error(transparent)]
    EmptySourceSet(#[from] EmptySourceSetError),

    /// A centroid coordinate is NaN or infinite and cannot be indexed.
    #[error("element {0} has a non-finite centroid")]
    NonFiniteCentroid(ElementId),
}
