use crate::list::CoordinateList;
use crate::object::{ObjectData, ShapeKind, VectorShape};
use vectormap_types::{Coordinate, SharedCoordinate};

/// Shape consisting of a single vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPoint {
    data: ObjectData,
}

impl MapPoint {
    /// Creates a new point of the given style class.
    pub fn new(class: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            data: ObjectData::with_coordinates(class, CoordinateList::from_coordinates([coordinate])),
        }
    }

    /// The vertex of the point.
    pub fn coordinate(&self) -> Option<&SharedCoordinate> {
        self.data.coordinates.first()
    }
}

impl VectorShape for MapPoint {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn data(&self) -> &ObjectData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ObjectData {
        &mut self.data
    }

    fn write_xml(&self, out: &mut String) {
        self.data.write_xml_header(out);
        out.push_str("<Point>");
        self.data.write_xml_coordinates(out);
        out.push_str("</Point></Placemark>");
    }
}
