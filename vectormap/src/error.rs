//! Error types used by the crate.

use thiserror::Error;
use vectormap_types::{GeometryError, ObjectId};

/// Vector map error type.
#[derive(Debug, Error)]
pub enum VectorMapError {
    /// Positional access outside of a list.
    #[error("index {index} is out of range for a list of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Length of the list at the moment of the request.
        len: usize,
    },
    /// Object with the given id is not part of the layer.
    #[error("object {0} not found")]
    ObjectNotFound(ObjectId),
    /// Invalid geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
