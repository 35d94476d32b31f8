//! Vectormap is the vector data model of an interactive map editor: shapes placed on a map, the vertices they share,
//! and the styled outlines of polygons that depend on what lies on the other side of each border.
//!
//! # Quick start
//!
//! ```
//! use vectormap::{CoordinateList, Polygon, Theme, VectorLayer, VectorObject};
//! use vectormap::vectormap_types::Coordinate;
//!
//! let square = |lon: f32| {
//!     CoordinateList::from(vec![
//!         Coordinate::latlon(0.0, lon).unwrap(),
//!         Coordinate::latlon(0.0, lon + 1.0).unwrap(),
//!         Coordinate::latlon(1.0, lon + 1.0).unwrap(),
//!         Coordinate::latlon(1.0, lon).unwrap(),
//!     ])
//! };
//!
//! let mut layer = VectorLayer::new("parcels");
//! let west = layer.add_object(Polygon::new("field", square(0.0))).unwrap();
//! let east = layer.add_object(Polygon::new("field", square(1.0))).unwrap();
//!
//! // The two squares share two vertices, so the layer stores six of them.
//! assert_eq!(layer.node_map().len(), 6);
//!
//! layer.update_outlines(&Theme::default());
//! let polygon = layer.get(west).and_then(VectorObject::as_polygon).unwrap();
//! assert_eq!(polygon.outline().len(), 1);
//! # let _ = east;
//! ```
//!
//! # Main components
//!
//! * [`VectorLayer`] owns the shapes of one map layer and the [`NodeMap`] that interns their vertices. Shapes that
//!   touch each other hold the same [`SharedCoordinate`](vectormap_types::SharedCoordinate) instances at their
//!   common vertices, and every vertex knows the ids of the shapes that use it.
//! * [`DequeVec`], [`CoordinateList`] and [`VectorObjectList`] are the ordered collections that shapes and layers
//!   are built of.
//! * [`object`] contains the four shape kinds: [`MapPoint`], [`LineString`], [`Polygon`] and [`MultiGeometry`].
//! * [`outline::segment_outline`] splits the outline of a polygon into segments styled by the
//!   [`BorderCondition`](style::BorderCondition)s of its [`PolygonStyle`](style::PolygonStyle).
//!
//! Geometry primitives (coordinates, bounding boxes, geodesic and planar functions) live in the
//! [`vectormap_types`] crate, which is re-exported.
//!
//! All the types of the crate are single threaded.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
pub mod error;
mod layer;
pub mod list;
mod node_map;
pub mod object;
pub mod outline;
pub mod style;

pub use color::Color;
pub use error::VectorMapError;
pub use layer::VectorLayer;
pub use list::{CoordinateList, DequeVec, VectorObjectList};
pub use node_map::{NodeMap, GROWTH_INCREMENT};
pub use object::{
    LineString, MapPoint, MultiGeometry, ObjectData, ObjectMut, Polygon, ShapeKind, VectorObject, VectorShape,
};
pub use outline::OutlineSegment;
pub use style::{StyleLookup, Theme};

// Reexport vectormap_types
pub use vectormap_types;
