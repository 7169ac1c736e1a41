//! Error types for graph construction and routing.
//!
//! An unreachable target is not an error — `shortest_time` reports it as
//! `Ok(None)`. The only failure class is a structurally invalid input,
//! rejected before any search runs.

use thiserror::Error;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Structural validation failures for graph inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A segment endpoint, source, or target is not a valid node index.
    #[error("node index {index} out of range (graph has {node_count} nodes)")]
    NodeOutOfRange { index: usize, node_count: usize },

    /// A segment duration is negative or not finite.
    #[error("segment {from} -> {to} has invalid duration {duration}")]
    InvalidDuration {
        from: usize,
        to: usize,
        duration: f64,
    },
}
