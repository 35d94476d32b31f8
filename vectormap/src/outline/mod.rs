//! Styled outlines of polygons.
//!
//! The outline of a polygon is drawn as a sequence of [`OutlineSegment`]s. Each segment is a run of consecutive
//! ring vertices drawn with one color and stroke, chosen by what lies on the other side of that part of the border.
//! See [`segment_outline`] for how the ring is split.

mod segmentation;

pub use segmentation::{segment_outline, ShapeResolver};

use crate::list::CoordinateList;
use crate::style::{BorderPaint, StrokeType};
use crate::Color;

/// Part of a polygon outline drawn with a single paint.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSegment {
    /// Vertices of the segment. The last vertex of a segment is the first vertex of the next one.
    pub coordinates: CoordinateList,
    /// Line color.
    pub color: Color,
    /// Line stroke.
    pub stroke: StrokeType,
}

impl OutlineSegment {
    /// Creates a new segment.
    pub fn new(coordinates: CoordinateList, color: Color, stroke: StrokeType) -> Self {
        Self {
            coordinates,
            color,
            stroke,
        }
    }

    /// Creates a new segment drawn with the given paint.
    pub fn with_paint(coordinates: CoordinateList, paint: BorderPaint) -> Self {
        Self::new(coordinates, paint.color, paint.stroke)
    }

    /// Color and stroke of the segment.
    pub fn paint(&self) -> BorderPaint {
        BorderPaint::new(self.color, self.stroke)
    }
}
