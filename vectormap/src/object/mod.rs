//! Shapes that can be placed on a vector map.
//!
//! There are four kinds of shapes: [`MapPoint`], [`LineString`] (which also covers closed linear rings),
//! [`Polygon`] and [`MultiGeometry`], a group of other shapes. All of them carry the same [`ObjectData`] and
//! implement [`VectorShape`]. A heterogeneous collection stores them as [`VectorObject`] values.

mod line_string;
mod map_point;
mod multi_geometry;
mod polygon;

pub use line_string::LineString;
pub use map_point::MapPoint;
pub use multi_geometry::MultiGeometry;
pub use polygon::Polygon;

use crate::list::CoordinateList;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use vectormap_types::{LatLonAltBox, LatLonBox, ObjectId};

/// Kind of a shape.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// A single point.
    Point,
    /// A path or a closed ring.
    Line,
    /// A filled area.
    Polygon,
    /// A group of shapes.
    Group,
}

impl ShapeKind {
    /// Feature type name of the kind, as used in border conditions.
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Point => "MapPoint",
            ShapeKind::Line => "LineString",
            ShapeKind::Polygon => "Polygon",
            ShapeKind::Group => "MultiGeometry",
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Properties common to every shape.
#[derive(Debug, Clone, Default)]
pub struct ObjectData {
    /// Identifier of the shape in its layer. `ObjectId(0)` until the shape is added to a layer.
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Free form description.
    pub description: String,
    /// Style class of the shape. Theme styles are looked up by this value.
    pub class: String,
    /// Vertices of the shape.
    pub coordinates: CoordinateList,
}

impl ObjectData {
    /// Creates data of the given class without vertices.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            ..Default::default()
        }
    }

    /// Creates data of the given class with vertices.
    pub fn with_coordinates(class: impl Into<String>, coordinates: CoordinateList) -> Self {
        Self {
            class: class.into(),
            coordinates,
            ..Default::default()
        }
    }

    fn write_xml_header(&self, out: &mut String) {
        out.push_str("<Placemark>");
        if !self.name.is_empty() {
            out.push_str("<name>");
            escape_xml(&self.name, out);
            out.push_str("</name>");
        }
        if !self.description.is_empty() {
            out.push_str("<description>");
            escape_xml(&self.description, out);
            out.push_str("</description>");
        }
        if !self.class.is_empty() {
            out.push_str("<styleUrl>#");
            escape_xml(&self.class, out);
            out.push_str("</styleUrl>");
        }
    }

    fn write_xml_coordinates(&self, out: &mut String) {
        out.push_str("<coordinates>");
        self.coordinates.write_kml(out);
        out.push_str("</coordinates>");
    }
}

/// Two shape data values are equal if everything except the id is equal.
impl PartialEq for ObjectData {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.class == other.class
            && self.coordinates == other.coordinates
    }
}

/// Capabilities shared by all shapes.
pub trait VectorShape {
    /// Kind of the shape.
    fn kind(&self) -> ShapeKind;

    /// Common shape properties.
    fn data(&self) -> &ObjectData;

    /// Mutable common shape properties.
    fn data_mut(&mut self) -> &mut ObjectData;

    /// Bounding box of the shape. `None` if the shape has no known vertices.
    fn boundary(&self) -> Option<LatLonAltBox> {
        self.data().coordinates.boundary()
    }

    /// Returns true if any part of the shape's bounding box falls within the given box.
    fn fits_within(&self, bbox: &LatLonBox) -> bool {
        self.boundary()
            .map(|boundary| boundary.lat_lon().overlaps(bbox))
            .unwrap_or(false)
    }

    /// Writes the shape as a KML placemark.
    fn write_xml(&self, out: &mut String);

    /// Returns the shape as a KML placemark.
    fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }
}

/// Any shape.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorObject {
    /// Point shape.
    Point(MapPoint),
    /// Line or ring shape.
    Line(LineString),
    /// Polygon shape.
    Polygon(Polygon),
    /// Group of shapes.
    Group(MultiGeometry),
}

impl VectorObject {
    /// Identifier of the shape.
    pub fn id(&self) -> ObjectId {
        self.data().id
    }

    /// Style class of the shape.
    pub fn class(&self) -> &str {
        &self.data().class
    }

    /// The shape as a point.
    pub fn as_point(&self) -> Option<&MapPoint> {
        match self {
            VectorObject::Point(v) => Some(v),
            _ => None,
        }
    }

    /// The shape as a line.
    pub fn as_line(&self) -> Option<&LineString> {
        match self {
            VectorObject::Line(v) => Some(v),
            _ => None,
        }
    }

    /// The shape as a polygon.
    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            VectorObject::Polygon(v) => Some(v),
            _ => None,
        }
    }

    /// The shape as a mutable polygon.
    pub fn as_polygon_mut(&mut self) -> Option<&mut Polygon> {
        match self {
            VectorObject::Polygon(v) => Some(v),
            _ => None,
        }
    }

    /// The shape as a group.
    pub fn as_group(&self) -> Option<&MultiGeometry> {
        match self {
            VectorObject::Group(v) => Some(v),
            _ => None,
        }
    }

    /// The shape as a mutable group.
    pub fn as_group_mut(&mut self) -> Option<&mut MultiGeometry> {
        match self {
            VectorObject::Group(v) => Some(v),
            _ => None,
        }
    }

    /// Mutable access to the shape that cannot change its kind.
    pub fn as_object_mut(&mut self) -> ObjectMut<'_> {
        match self {
            VectorObject::Point(v) => ObjectMut::Point(v),
            VectorObject::Line(v) => ObjectMut::Line(v),
            VectorObject::Polygon(v) => ObjectMut::Polygon(v),
            VectorObject::Group(v) => ObjectMut::Group(v),
        }
    }
}

/// Mutable reference to a shape stored in a collection.
///
/// Collections hand out this type instead of `&mut VectorObject`, so a stored shape can be modified but cannot be
/// replaced by a shape of another kind.
#[derive(Debug)]
pub enum ObjectMut<'a> {
    /// Point shape.
    Point(&'a mut MapPoint),
    /// Line or ring shape.
    Line(&'a mut LineString),
    /// Polygon shape.
    Polygon(&'a mut Polygon),
    /// Group of shapes.
    Group(&'a mut MultiGeometry),
}

impl<'a> ObjectMut<'a> {
    /// Kind of the shape.
    pub fn kind(&self) -> ShapeKind {
        match self {
            ObjectMut::Point(_) => ShapeKind::Point,
            ObjectMut::Line(_) => ShapeKind::Line,
            ObjectMut::Polygon(_) => ShapeKind::Polygon,
            ObjectMut::Group(_) => ShapeKind::Group,
        }
    }

    /// Common shape properties.
    pub fn data(&self) -> &ObjectData {
        match self {
            ObjectMut::Point(v) => v.data(),
            ObjectMut::Line(v) => v.data(),
            ObjectMut::Polygon(v) => v.data(),
            ObjectMut::Group(v) => v.data(),
        }
    }

    /// Mutable common shape properties.
    pub fn data_mut(&mut self) -> &mut ObjectData {
        match self {
            ObjectMut::Point(v) => v.data_mut(),
            ObjectMut::Line(v) => v.data_mut(),
            ObjectMut::Polygon(v) => v.data_mut(),
            ObjectMut::Group(v) => v.data_mut(),
        }
    }

    /// The shape as a polygon.
    pub fn into_polygon(self) -> Option<&'a mut Polygon> {
        match self {
            ObjectMut::Polygon(v) => Some(v),
            _ => None,
        }
    }

    /// The shape as a line.
    pub fn into_line(self) -> Option<&'a mut LineString> {
        match self {
            ObjectMut::Line(v) => Some(v),
            _ => None,
        }
    }
}

impl VectorShape for VectorObject {
    fn kind(&self) -> ShapeKind {
        match self {
            VectorObject::Point(v) => v.kind(),
            VectorObject::Line(v) => v.kind(),
            VectorObject::Polygon(v) => v.kind(),
            VectorObject::Group(v) => v.kind(),
        }
    }

    fn data(&self) -> &ObjectData {
        match self {
            VectorObject::Point(v) => v.data(),
            VectorObject::Line(v) => v.data(),
            VectorObject::Polygon(v) => v.data(),
            VectorObject::Group(v) => v.data(),
        }
    }

    fn data_mut(&mut self) -> &mut ObjectData {
        match self {
            VectorObject::Point(v) => v.data_mut(),
            VectorObject::Line(v) => v.data_mut(),
            VectorObject::Polygon(v) => v.data_mut(),
            VectorObject::Group(v) => v.data_mut(),
        }
    }

    fn boundary(&self) -> Option<LatLonAltBox> {
        match self {
            VectorObject::Point(v) => v.boundary(),
            VectorObject::Line(v) => v.boundary(),
            VectorObject::Polygon(v) => v.boundary(),
            VectorObject::Group(v) => v.boundary(),
        }
    }

    fn write_xml(&self, out: &mut String) {
        match self {
            VectorObject::Point(v) => v.write_xml(out),
            VectorObject::Line(v) => v.write_xml(out),
            VectorObject::Polygon(v) => v.write_xml(out),
            VectorObject::Group(v) => v.write_xml(out),
        }
    }
}

impl From<MapPoint> for VectorObject {
    fn from(value: MapPoint) -> Self {
        Self::Point(value)
    }
}

impl From<LineString> for VectorObject {
    fn from(value: LineString) -> Self {
        Self::Line(value)
    }
}

impl From<Polygon> for VectorObject {
    fn from(value: Polygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<MultiGeometry> for VectorObject {
    fn from(value: MultiGeometry) -> Self {
        Self::Group(value)
    }
}

fn escape_xml(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}
