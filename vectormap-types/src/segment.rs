//! Planar line algorithms: intersection of two lines and distance from a point to a line.

use crate::error::GeometryError;
use crate::planar::PlanarPoint;
use nalgebra::Point2;

/// Intersection point of the line through `a1` and `a2` with the line through `b1` and `b2`.
///
/// If the segments share an endpoint, that endpoint is returned without further computation. Parallel and collinear
/// lines have no single intersection point, for them [`GeometryError::ParallelLines`] is returned.
pub fn line_intersection<N: num_traits::Float + nalgebra::Scalar>(
    a1: &impl PlanarPoint<Num = N>,
    a2: &impl PlanarPoint<Num = N>,
    b1: &impl PlanarPoint<Num = N>,
    b2: &impl PlanarPoint<Num = N>,
) -> Result<Point2<N>, GeometryError> {
    if a1.equal(b1) || a1.equal(b2) {
        return Ok(a1.to_point2());
    }
    if a2.equal(b1) || a2.equal(b2) {
        return Ok(a2.to_point2());
    }

    let (x1, y1, x2, y2) = (a1.x(), a1.y(), a2.x(), a2.y());
    let (x3, y3, x4, y4) = (b1.x(), b1.y(), b2.x(), b2.y());

    let denominator = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
    if denominator == N::zero() {
        return Err(GeometryError::ParallelLines);
    }

    let a = x1 * y2 - y1 * x2;
    let b = x3 * y4 - y3 * x4;

    Ok(Point2::new(
        (a * (x3 - x4) - (x1 - x2) * b) / denominator,
        (a * (y3 - y4) - (y1 - y2) * b) / denominator,
    ))
}

/// Distance from `point` to the infinite line through `p1` and `p2`.
///
/// The line is described by its slope, so a vertical chord (`p1.x == p2.x`) has no defined distance and
/// [`GeometryError::VerticalChord`] is returned.
pub fn perpendicular_distance<N: num_traits::Float + nalgebra::Scalar>(
    point: &impl PlanarPoint<Num = N>,
    p1: &impl PlanarPoint<Num = N>,
    p2: &impl PlanarPoint<Num = N>,
) -> Result<N, GeometryError> {
    if p1.x() == p2.x() {
        return Err(GeometryError::VerticalChord);
    }

    let slope = (p2.y() - p1.y()) / (p2.x() - p1.x());
    let intercept = p1.y() - slope * p1.x();

    Ok((slope * point.x() - point.y() + intercept).abs() / (slope * slope + N::one()).sqrt())
}
