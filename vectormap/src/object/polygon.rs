use crate::list::CoordinateList;
use crate::object::{ObjectData, ShapeKind, VectorShape};
use crate::outline::OutlineSegment;
use vectormap_types::geodesy;

/// Filled area bounded by a ring of vertices.
///
/// The ring may or may not repeat the first vertex at the end. The outline of the polygon is split into styled
/// segments by [`crate::outline::segment_outline`] and cached in the polygon until the next update.
#[derive(Debug, Clone)]
pub struct Polygon {
    data: ObjectData,
    outline: Vec<OutlineSegment>,
}

/// The cached outline is not part of the value.
impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Polygon {
    /// Creates a new polygon of the given style class.
    pub fn new(class: impl Into<String>, ring: CoordinateList) -> Self {
        Self {
            data: ObjectData::with_coordinates(class, ring),
            outline: Vec::new(),
        }
    }

    /// Boundary ring of the polygon.
    pub fn ring(&self) -> &CoordinateList {
        &self.data.coordinates
    }

    /// Area of the polygon in square meters.
    pub fn area(&self) -> f64 {
        geodesy::area(self.data.coordinates.iter().map(|c| c.borrow()))
    }

    /// Styled outline segments computed by the last outline update.
    pub fn outline(&self) -> &[OutlineSegment] {
        &self.outline
    }

    /// Replaces the outline segments.
    pub fn set_outline(&mut self, outline: Vec<OutlineSegment>) {
        self.outline = outline;
    }
}

impl VectorShape for Polygon {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Polygon
    }

    fn data(&self) -> &ObjectData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ObjectData {
        &mut self.data
    }

    fn write_xml(&self, out: &mut String) {
        self.data.write_xml_header(out);
        out.push_str("<Polygon><outerBoundaryIs><LinearRing><coordinates>");

        let ring = &self.data.coordinates;
        ring.write_kml(out);
        if !ring.is_closed_ring() {
            if let Some(first) = ring.first() {
                out.push(' ');
                first.borrow().write_kml(out);
            }
        }

        out.push_str("</coordinates></LinearRing></outerBoundaryIs></Polygon></Placemark>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use vectormap_types::Coordinate;

    fn square() -> CoordinateList {
        CoordinateList::from(vec![
            Coordinate::latlon(0.0, 0.0).unwrap(),
            Coordinate::latlon(0.0, 1.0).unwrap(),
            Coordinate::latlon(1.0, 1.0).unwrap(),
            Coordinate::latlon(1.0, 0.0).unwrap(),
        ])
    }

    #[test]
    fn area_of_square_degree() {
        let polygon = Polygon::new("land", square());
        assert_abs_diff_eq!(polygon.area() / 1e6, 12_391.0, epsilon = 5.0);
    }

    #[test]
    fn xml_closes_the_ring() {
        let polygon = Polygon::new("land", square());
        let xml = polygon.to_xml();
        assert!(xml.contains("<coordinates>0,0,0 1,0,0 1,1,0 0,1,0 0,0,0</coordinates>"));
        assert!(xml.contains("<styleUrl>#land</styleUrl>"));
    }

    #[test]
    fn outline_starts_empty() {
        let mut polygon = Polygon::new("land", square());
        assert!(polygon.outline().is_empty());
        polygon.set_outline(vec![OutlineSegment::new(
            polygon.ring().clone(),
            crate::Color::BLACK,
            Default::default(),
        )]);
        assert_eq!(polygon.outline().len(), 1);
    }
}
