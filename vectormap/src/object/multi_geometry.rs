use crate::list::VectorObjectList;
use crate::object::{ObjectData, ShapeKind, VectorObject, VectorShape};
use vectormap_types::LatLonAltBox;

/// Group of shapes that are handled as one object.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiGeometry {
    data: ObjectData,
    children: VectorObjectList,
}

impl MultiGeometry {
    /// Creates an empty group of the given style class.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            data: ObjectData::new(class),
            children: VectorObjectList::new(),
        }
    }

    /// Creates a group containing the given shapes.
    pub fn with_children(class: impl Into<String>, children: impl IntoIterator<Item = VectorObject>) -> Self {
        let mut group = Self::new(class);
        for child in children {
            group.children.force_add(child);
        }
        group
    }

    /// Shapes in the group.
    pub fn children(&self) -> &VectorObjectList {
        &self.children
    }

    /// Mutable shapes in the group.
    pub fn children_mut(&mut self) -> &mut VectorObjectList {
        &mut self.children
    }
}

impl VectorShape for MultiGeometry {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Group
    }

    fn data(&self) -> &ObjectData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut ObjectData {
        &mut self.data
    }

    fn boundary(&self) -> Option<LatLonAltBox> {
        let own = self.data.coordinates.boundary();
        match (own, self.children.known_boundary()) {
            (Some(own), Some(children)) => Some(own.combine(&children)),
            (own, children) => own.or(children),
        }
    }

    fn write_xml(&self, out: &mut String) {
        self.data.write_xml_header(out);
        out.push_str("<MultiGeometry>");
        for child in self.children.iter() {
            child.write_xml(out);
        }
        out.push_str("</MultiGeometry></Placemark>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::CoordinateList;
    use crate::object::{LineString, MapPoint};
    use vectormap_types::Coordinate;

    #[test]
    fn boundary_covers_children() {
        let group = MultiGeometry::with_children(
            "route",
            [
                MapPoint::new("start", Coordinate::latlon(-1.0, -2.0).unwrap()).into(),
                LineString::new(
                    "path",
                    CoordinateList::from(vec![
                        Coordinate::latlon(0.0, 0.0).unwrap(),
                        Coordinate::latlon(3.0, 4.0).unwrap(),
                    ]),
                )
                .into(),
            ],
        );

        let boundary = group.boundary().unwrap();
        assert_eq!(boundary.north, 3.0);
        assert_eq!(boundary.south, -1.0);
        assert_eq!(boundary.east, 4.0);
        assert_eq!(boundary.west, -2.0);

        assert_eq!(group.children().len(), 2);
        assert_eq!(MultiGeometry::new("empty").boundary(), None);
    }

    #[test]
    fn xml_nests_children() {
        let group = MultiGeometry::with_children(
            "pois",
            [MapPoint::new("poi", Coordinate::latlon(1.0, 1.0).unwrap()).into()],
        );
        let xml = group.to_xml();
        assert!(xml.starts_with("<Placemark><styleUrl>#pois</styleUrl><MultiGeometry><Placemark>"));
        assert!(xml.ends_with("</Placemark></MultiGeometry></Placemark>"));
    }
}
