//! Error type used by the crate.

use thiserror::Error;

/// Error enum.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Latitude is outside of `[-90, 90]` and is not the unknown-position sentinel.
    #[error("latitude {0} is out of range [-90, 90]")]
    LatitudeOutOfRange(f32),
    /// Two lines are parallel or collinear, so there is no single intersection point.
    #[error("lines are parallel or collinear")]
    ParallelLines,
    /// Chord used for perpendicular distance is vertical (`p1.x == p2.x`).
    #[error("chord is vertical")]
    VerticalChord,
}
