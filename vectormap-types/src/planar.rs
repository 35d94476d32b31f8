//! Flat `x/y` view of points, used by the planar algorithms of the crate (segment intersection, perpendicular
//! distance, simplification).
//!
//! Geographic coordinates are treated as plane points with `x = longitude` and `y = latitude`. This is only valid
//! for small areas far from the poles, which is what the editing tools that use these algorithms operate on.

use nalgebra::{Point2, Scalar};
use num_traits::Float;

/// A point on a plane.
pub trait PlanarPoint {
    /// Numeric type of the coordinates.
    type Num: Float + Scalar;

    /// X coordinate.
    fn x(&self) -> Self::Num;
    /// Y coordinate.
    fn y(&self) -> Self::Num;

    /// Returns true if both coordinates of the points are exactly equal.
    fn equal(&self, other: &impl PlanarPoint<Num = Self::Num>) -> bool {
        self.x() == other.x() && self.y() == other.y()
    }

    /// Converts the point into `nalgebra` point.
    fn to_point2(&self) -> Point2<Self::Num> {
        Point2::new(self.x(), self.y())
    }
}

impl<N: Float + Scalar> PlanarPoint for Point2<N> {
    type Num = N;

    fn x(&self) -> N {
        self.x
    }

    fn y(&self) -> N {
        self.y
    }
}
