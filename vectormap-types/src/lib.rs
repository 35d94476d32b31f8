//! Geographic primitives of the vector map data model.
//!
//! * [`Coordinate`] is a single geographic point. Shapes that share vertices hold [`SharedCoordinate`] handles to
//!   the same instance.
//! * [`LatLonBox`] and [`LatLonAltBox`] are bounding boxes that handle the antimeridian.
//! * [`geodesy`] contains distance, azimuth, slope and area functions on a spherical Earth.
//! * [`segment`], [`simplify`] and [`PlanarPoint`] provide planar algorithms on `lon/lat` treated as `x/y`.

pub mod bbox;
pub mod coordinate;
pub mod error;
pub mod geodesy;
pub mod segment;
pub mod simplify;

mod datum;
mod object_id;
mod planar;
mod timestamp;

pub use bbox::{LatLonAltBox, LatLonBox};
pub use coordinate::{normalize_longitude, Coordinate, ScreenPoints, SharedCoordinate, UNKNOWN_LATITUDE};
pub use datum::Datum;
pub use error::GeometryError;
pub use object_id::ObjectId;
pub use planar::PlanarPoint;
pub use timestamp::parse_timestamp;
