use crate::list::CoordinateList;
use crate::object::{ObjectData, ShapeKind, VectorShape};
use vectormap_types::simplify::douglas_peucker;
use vectormap_types::Coordinate;

/// Path through a sequence of vertices.
///
/// A line string created with [`LineString::linear_ring`] is a closed ring: its last vertex is the same instance as
/// the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    data: ObjectData,
    closed: bool,
}

impl LineString {
    /// Creates an open path.
    pub fn new(class: impl Into<String>, coordinates: CoordinateList) -> Self {
        Self {
            data: ObjectData::with_coordinates(class, coordinates),
            closed: false,
        }
    }

    /// Creates a closed ring. If the last vertex does not equal the first one, the first vertex is appended.
    pub fn linear_ring(class: impl Into<String>, coordinates: CoordinateList) -> Self {
        let mut ring = Self::new(class, coordinates);
        ring.close();
        ring
    }

    /// Returns true if the line is a closed ring.
    pub fn is_linear_ring(&self) -> bool {
        self.closed
    }

    /// Turns the path into a closed ring.
    pub fn close(&mut self) {
        self.closed = true;

        let coordinates = &mut self.data.coordinates;
        if coordinates.len() < 2 || coordinates.is_closed_ring() {
            return;
        }

        if let Some(first) = coordinates.first().cloned() {
            coordinates.push_back(first);
        }
    }

    /// Length of the path in meters.
    pub fn length(&self) -> f64 {
        self.data.coordinates.length()
    }

    /// Vertices of the path after Douglas–Peucker simplification with the given tolerance in degrees.
    pub fn simplified(&self, epsilon: f64) -> Vec<Coordinate> {
        douglas_peucker(&self.data.coordinates.values(), epsilon)
    }
}

impl VectorShape for LineString {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Line
    }

    fn data(&self) -> &ObjectData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ObjectData {
        &mut self.data
    }

    fn write_xml(&self, out: &mut String) {
        let tag = if self.closed { "LinearRing" } else { "LineString" };

        self.data.write_xml_header(out);
        out.push('<');
        out.push_str(tag);
        out.push('>');
        self.data.write_xml_coordinates(out);
        out.push_str("</");
        out.push_str(tag);
        out.push_str("></Placemark>");
    }
}
