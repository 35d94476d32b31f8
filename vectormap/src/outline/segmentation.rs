use crate::list::{CoordinateList, VectorObjectList};
use crate::object::{Polygon, VectorObject, VectorShape};
use crate::outline::OutlineSegment;
use crate::style::{BorderPaint, PolygonStyle, StyleLookup};
use vectormap_types::{ObjectId, SharedCoordinate};

/// Access to the shapes that may share vertices with a polygon.
pub trait ShapeResolver {
    /// Shape with the given id.
    fn resolve(&self, id: ObjectId) -> Option<&VectorObject>;
}

impl ShapeResolver for VectorObjectList {
    fn resolve(&self, id: ObjectId) -> Option<&VectorObject> {
        self.find(id)
    }
}

/// What lies on the other side of one edge of a polygon ring.
#[derive(Debug, Copy, Clone, PartialEq)]
enum EdgeBorder {
    /// Both ends of the edge are on the antimeridian.
    Dateline,
    /// No other shape uses the edge.
    Exterior,
    /// Exactly one other shape uses the edge.
    Shared(ObjectId),
    /// Several other shapes use the edge, or a shape using it cannot be resolved.
    Ambiguous,
}

/// Splits the outline of the polygon into styled segments.
///
/// If the style of the polygon does not depend on neighbors (see [`PolygonStyle::uniform_paint`]), the result is a
/// single segment covering the whole closed ring. Otherwise every edge of the ring is classified by the shapes that
/// own both of its vertices (other than the polygon itself):
///
/// * an edge with both vertices at longitude ±180 runs along the antimeridian and is drawn with the dateline paint;
/// * an edge used by no other shape is drawn with the [`NONE_CONDITION`](crate::style::NONE_CONDITION) paint;
/// * an edge used by one other shape is drawn with the paint of the border condition matching that shape;
/// * an edge used by several shapes, or by a shape that cannot be resolved, is drawn with the polygon's outline
///   paint, and a warning is logged.
///
/// A shape owns an edge only if the two vertices are neighbors in that shape's own vertex list. A shape that touches
/// both vertices at non-adjacent positions (a gulf) does not count.
///
/// Runs of edges with the same classification become segments. Runs whose paint cannot be resolved are not drawn.
/// A segment is merged into the segment emitted right before it if they have the same paint and follow each other
/// without a gap. Segments are never reordered.
pub fn segment_outline(
    polygon: &Polygon,
    styles: &dyn StyleLookup,
    shapes: &dyn ShapeResolver,
) -> Vec<OutlineSegment> {
    let style = styles.polygon_style(&polygon.data().class);
    let vertices = closed_ring(polygon.ring());
    if vertices.len() < 2 {
        return vec![];
    }

    if let Some(paint) = style.uniform_paint() {
        return vec![OutlineSegment::with_paint(
            vertices.into_iter().collect(),
            paint,
        )];
    }

    let id = polygon.data().id;
    let borders: Vec<EdgeBorder> = vertices
        .windows(2)
        .enumerate()
        .map(|(index, edge)| classify_edge(id, index, &edge[0], &edge[1], shapes))
        .collect();

    let mut segments: Vec<OutlineSegment> = vec![];
    let mut previous_emitted = false;
    let mut start = 0;
    while start < borders.len() {
        let border = borders[start];
        let mut end = start;
        while end + 1 < borders.len() && borders[end + 1] == border {
            end += 1;
        }

        let run = &vertices[start..=end + 1];
        match resolve_paint(border, style, styles, shapes) {
            Some(paint) => {
                let merge = previous_emitted && segments.last().is_some_and(|last| last.paint() == paint);
                match segments.last_mut() {
                    Some(last) if merge => last.coordinates.extend(run[1..].iter().cloned()),
                    _ => segments.push(OutlineSegment::with_paint(
                        run.iter().cloned().collect(),
                        paint,
                    )),
                }
                previous_emitted = true;
            }
            None => {
                log::trace!(
                    "Edges {start}..={end} of polygon {id} match no border condition and are not drawn"
                );
                previous_emitted = false;
            }
        }

        start = end + 1;
    }

    segments
}

/// Ring vertices with the first vertex repeated at the end, unless the ring already ends with it.
fn closed_ring(ring: &CoordinateList) -> Vec<SharedCoordinate> {
    let mut vertices: Vec<SharedCoordinate> = ring.iter().cloned().collect();
    let open = match (vertices.first(), vertices.last()) {
        (Some(first), Some(last)) => vertices.len() > 1 && first != last,
        _ => false,
    };
    if open {
        vertices.push(vertices[0].clone());
    }

    vertices
}

fn classify_edge(
    polygon_id: ObjectId,
    index: usize,
    a: &SharedCoordinate,
    b: &SharedCoordinate,
    shapes: &dyn ShapeResolver,
) -> EdgeBorder {
    if a.borrow().longitude().abs() == 180.0 && b.borrow().longitude().abs() == 180.0 {
        return EdgeBorder::Dateline;
    }

    let b_owners = b.borrow().owners().to_vec();
    let candidates: Vec<ObjectId> = a
        .borrow()
        .owners()
        .iter()
        .copied()
        .filter(|owner| *owner != polygon_id && b_owners.contains(owner))
        .collect();

    let mut neighbors = vec![];
    let mut unresolved = false;
    for owner in candidates {
        let Some(shape) = shapes.resolve(owner) else {
            log::warn!("Shape {owner} sharing edge {index} of polygon {polygon_id} is not found");
            unresolved = true;
            continue;
        };

        if uses_edge(shape, a, b) {
            neighbors.push(owner);
        } else {
            log::trace!("Shape {owner} touches edge {index} of polygon {polygon_id} across a gulf");
        }
    }

    match neighbors.as_slice() {
        [] if unresolved => EdgeBorder::Ambiguous,
        [] => EdgeBorder::Exterior,
        [owner] if !unresolved => EdgeBorder::Shared(*owner),
        _ => {
            log::warn!(
                "Edge {index} of polygon {polygon_id} is shared by {} shapes, using the outline color",
                neighbors.len() + usize::from(unresolved)
            );
            EdgeBorder::Ambiguous
        }
    }
}

/// Returns true if `a` and `b` are neighbors in the vertex list of the shape.
fn uses_edge(shape: &VectorObject, a: &SharedCoordinate, b: &SharedCoordinate) -> bool {
    let coordinates = &shape.data().coordinates;
    let is_edge = |p: &SharedCoordinate, q: &SharedCoordinate| {
        (p.ptr_eq(a) && q.ptr_eq(b)) || (p.ptr_eq(b) && q.ptr_eq(a))
    };

    let consecutive = coordinates
        .iter()
        .zip(coordinates.iter().skip(1))
        .any(|(p, q)| is_edge(p, q));
    if consecutive {
        return true;
    }

    let wraps = match shape {
        VectorObject::Polygon(_) => true,
        VectorObject::Line(line) => line.is_linear_ring(),
        _ => false,
    };

    match (coordinates.first(), coordinates.last()) {
        (Some(first), Some(last)) if wraps && coordinates.len() > 2 => is_edge(last, first),
        _ => false,
    }
}

fn resolve_paint(
    border: EdgeBorder,
    style: &PolygonStyle,
    styles: &dyn StyleLookup,
    shapes: &dyn ShapeResolver,
) -> Option<BorderPaint> {
    match border {
        EdgeBorder::Dateline => Some(styles.dateline_paint()),
        EdgeBorder::Exterior => style.border_paint(None),
        EdgeBorder::Shared(owner) => {
            let neighbor = shapes.resolve(owner)?;
            style.border_paint(Some((neighbor.class(), neighbor.kind())))
        }
        EdgeBorder::Ambiguous => Some(style.outline_paint()),
    }
}
