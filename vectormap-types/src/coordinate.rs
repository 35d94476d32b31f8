//! Geographic point with identity and shared-ownership bookkeeping.
//!
//! A [`Coordinate`] is a plain value: latitude, longitude, altitude and timestamp plus the id under which it is
//! registered in a node map and the list of shapes that use it. Shapes that share a vertex hold the same
//! [`SharedCoordinate`] handle, so an in-place [`Coordinate::update`] is observed by every one of them.
//!
//! Two coordinates are equal if their altitude, latitude and longitude are equal. Timestamp, id, owners and cached
//! screen points do not take part in comparison or hashing.

use crate::error::GeometryError;
use crate::object_id::ObjectId;
use crate::planar::PlanarPoint;
use crate::timestamp::parse_timestamp;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell, RefMut};
use std::fmt::Write;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Latitude value that marks a coordinate with unknown position.
pub const UNKNOWN_LATITUDE: f32 = -999.0;

/// Screen-space positions of a coordinate.
///
/// These are written by the renderer before a drawing pass and are not derived from the geographic values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoints {
    /// Position of the vertex itself.
    pub center: Option<Point2<f32>>,
    /// Left offset point of the outline passing through the vertex.
    pub left: Option<Point2<f32>>,
    /// Right offset point of the outline passing through the vertex.
    pub right: Option<Point2<f32>>,
}

/// A single geographic point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "CoordinateRecord")]
pub struct Coordinate {
    latitude: f32,
    longitude: f32,
    altitude: f32,
    timestamp: i64,
    id: i64,
    #[serde(skip)]
    shared_count: u8,
    #[serde(skip)]
    owners: Vec<ObjectId>,
    #[serde(skip)]
    screen: ScreenPoints,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// Latitude must be in `[-90, 90]`. Longitude is not validated and is expected to be normalized by the caller
    /// (see [`normalize_longitude`]) before being used in bounding box arithmetic.
    pub fn new(latitude: f32, longitude: f32, altitude: f32) -> Result<Self, GeometryError> {
        validate_latitude(latitude)?;
        Ok(Self::from_raw(latitude, longitude, altitude))
    }

    /// Creates a coordinate with zero altitude.
    pub fn latlon(latitude: f32, longitude: f32) -> Result<Self, GeometryError> {
        Self::new(latitude, longitude, 0.0)
    }

    /// Creates a coordinate with unknown position. Such coordinate is used as a placeholder by node maps.
    pub fn unknown() -> Self {
        Self::from_raw(UNKNOWN_LATITUDE, 0.0, 0.0)
    }

    pub(crate) fn from_raw(latitude: f32, longitude: f32, altitude: f32) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
            ..Default::default()
        }
    }

    /// Returns a copy of the coordinate with the given timestamp.
    pub fn with_timestamp(self, timestamp: i64) -> Self {
        Self { timestamp, ..self }
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f32 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f32 {
        self.longitude
    }

    /// Altitude in meters.
    pub fn altitude(&self) -> f32 {
        self.altitude
    }

    /// Timestamp in milliseconds since the Unix epoch. `0` means the timestamp is not set.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Key of the coordinate in the node map. `0` if the coordinate is not registered.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns true if the position of the coordinate is not known.
    pub fn is_unknown(&self) -> bool {
        self.latitude == UNKNOWN_LATITUDE
    }

    /// Sets latitude. Fails if the value is outside of `[-90, 90]`, unless it is the unknown sentinel.
    pub fn set_latitude(&mut self, latitude: f32) -> Result<(), GeometryError> {
        validate_latitude(latitude)?;
        self.latitude = latitude;
        Ok(())
    }

    /// Sets longitude. Any value is accepted.
    pub fn set_longitude(&mut self, longitude: f32) {
        self.longitude = longitude;
    }

    /// Sets altitude.
    pub fn set_altitude(&mut self, altitude: f32) {
        self.altitude = altitude;
    }

    /// Sets timestamp in milliseconds since the Unix epoch.
    pub fn set_timestamp(&mut self, timestamp: i64) {
        self.timestamp = timestamp;
    }

    /// Sets timestamp from its text representation. If the text cannot be parsed, the timestamp is reset to `0`.
    pub fn set_timestamp_str(&mut self, value: &str) {
        self.timestamp = match parse_timestamp(value) {
            Some(timestamp) => timestamp,
            None => {
                log::warn!("Cannot parse timestamp '{value}', timestamp is left unset");
                0
            }
        };
    }

    /// Sets the node map key of the coordinate.
    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    /// Copies altitude, latitude, longitude and timestamp from `other`. Id and owners are kept.
    pub fn update(&mut self, other: &Coordinate) {
        self.altitude = other.altitude;
        self.latitude = other.latitude;
        self.longitude = other.longitude;
        self.timestamp = other.timestamp;
    }

    /// Number of shapes that use this coordinate, saturated at `u8::MAX`.
    pub fn shared_count(&self) -> u8 {
        self.shared_count
    }

    /// Returns true if more than one shape uses this coordinate.
    pub fn is_shared(&self) -> bool {
        self.owners.len() > 1
    }

    /// Shapes that use this coordinate, in the order they were added.
    pub fn owners(&self) -> &[ObjectId] {
        &self.owners
    }

    /// Returns true if the given shape uses this coordinate.
    pub fn has_owner(&self, owner: ObjectId) -> bool {
        self.owners.contains(&owner)
    }

    /// Registers a shape as an owner. Returns false if it was already registered.
    pub fn add_owner(&mut self, owner: ObjectId) -> bool {
        if self.has_owner(owner) {
            return false;
        }

        self.owners.push(owner);
        self.shared_count = self.shared_count.saturating_add(1);
        true
    }

    /// Unregisters a shape. Returns false if the shape was not an owner.
    pub fn remove_owner(&mut self, owner: ObjectId) -> bool {
        let Some(index) = self.owners.iter().position(|id| *id == owner) else {
            return false;
        };

        self.owners.remove(index);
        self.shared_count = self.shared_count.saturating_sub(1);
        true
    }

    /// Cached screen positions.
    pub fn screen_points(&self) -> &ScreenPoints {
        &self.screen
    }

    /// Stores screen positions computed by the renderer.
    pub fn set_screen_points(&mut self, screen: ScreenPoints) {
        self.screen = screen;
    }

    /// Writes the coordinate in `lon,lat,alt` form.
    pub fn write_kml(&self, out: &mut String) {
        // Writing into a String cannot fail.
        let _ = write!(out, "{},{},{}", self.longitude, self.latitude, self.altitude);
    }

    /// Returns the coordinate in `lon,lat,alt` form.
    pub fn to_kml_string(&self) -> String {
        let mut out = String::new();
        self.write_kml(&mut out);
        out
    }
}

/// Serialized form of a coordinate, validated on the way in.
#[derive(Deserialize)]
struct CoordinateRecord {
    latitude: f32,
    longitude: f32,
    #[serde(default)]
    altitude: f32,
    #[serde(default)]
    timestamp: i64,
    #[serde(default)]
    id: i64,
}

impl TryFrom<CoordinateRecord> for Coordinate {
    type Error = GeometryError;

    fn try_from(record: CoordinateRecord) -> Result<Self, Self::Error> {
        validate_latitude(record.latitude)?;
        let mut coordinate = Self::from_raw(record.latitude, record.longitude, record.altitude);
        coordinate.timestamp = record.timestamp;
        coordinate.id = record.id;
        Ok(coordinate)
    }
}

fn validate_latitude(latitude: f32) -> Result<(), GeometryError> {
    if latitude == UNKNOWN_LATITUDE || (-90.0..=90.0).contains(&latitude) {
        Ok(())
    } else {
        Err(GeometryError::LatitudeOutOfRange(latitude))
    }
}

/// Wraps longitude into `[-180, 180]`.
pub fn normalize_longitude(longitude: f32) -> f32 {
    if (-180.0..=180.0).contains(&longitude) || !longitude.is_finite() {
        return longitude;
    }

    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && longitude > 0.0 {
        180.0
    } else {
        wrapped
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.altitude == other.altitude
            && self.latitude == other.latitude
            && self.longitude == other.longitude
    }
}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // `+ 0.0` folds negative zero into positive zero so that equal values hash equally.
        (self.altitude + 0.0).to_bits().hash(state);
        (self.latitude + 0.0).to_bits().hash(state);
        (self.longitude + 0.0).to_bits().hash(state);
    }
}

impl PlanarPoint for Coordinate {
    type Num = f64;

    fn x(&self) -> f64 {
        self.longitude as f64
    }

    fn y(&self) -> f64 {
        self.latitude as f64
    }
}

/// Handle to a coordinate shared between several shapes.
///
/// Cloning the handle does not clone the coordinate. Comparison and hashing use the coordinate value, use
/// [`SharedCoordinate::ptr_eq`] to check identity.
#[derive(Debug, Clone, Default)]
pub struct SharedCoordinate(Rc<RefCell<Coordinate>>);

impl SharedCoordinate {
    /// Wraps a coordinate into a new handle.
    pub fn new(coordinate: Coordinate) -> Self {
        Self(Rc::new(RefCell::new(coordinate)))
    }

    /// Immutable access to the coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is currently borrowed mutably.
    pub fn borrow(&self) -> Ref<'_, Coordinate> {
        self.0.borrow()
    }

    /// Mutable access to the coordinate.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is currently borrowed.
    pub fn borrow_mut(&self) -> RefMut<'_, Coordinate> {
        self.0.borrow_mut()
    }

    /// Copy of the current coordinate value.
    pub fn get(&self) -> Coordinate {
        self.0.borrow().clone()
    }

    /// Returns true if both handles point to the same coordinate instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of live handles to this coordinate.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl From<Coordinate> for SharedCoordinate {
    fn from(value: Coordinate) -> Self {
        Self::new(value)
    }
}

impl PartialEq for SharedCoordinate {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl PartialEq<Coordinate> for SharedCoordinate {
    fn eq(&self, other: &Coordinate) -> bool {
        *self.0.borrow() == *other
    }
}

impl Hash for SharedCoordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.borrow().hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(value: &impl Hash) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equality_ignores_timestamp_and_id() {
        let c1 = Coordinate::new(10.0, 20.0, 5.0).unwrap().with_timestamp(100);
        let mut c2 = Coordinate::new(10.0, 20.0, 5.0).unwrap().with_timestamp(200);
        c2.set_id(7);

        assert_eq!(c1, c2);
        assert_eq!(hash_of(&c1), hash_of(&c2));

        let c3 = Coordinate::new(10.0, 20.0, 6.0).unwrap();
        assert_ne!(c1, c3);
    }

    #[test]
    fn negative_zero_hashes_as_zero() {
        let c1 = Coordinate::latlon(0.0, -0.0).unwrap();
        let c2 = Coordinate::latlon(0.0, 0.0).unwrap();
        assert_eq!(c1, c2);
        assert_eq!(hash_of(&c1), hash_of(&c2));
    }

    #[test]
    fn latitude_validation() {
        assert_matches!(
            Coordinate::latlon(91.0, 0.0),
            Err(GeometryError::LatitudeOutOfRange(_))
        );
        assert!(Coordinate::latlon(-90.0, 0.0).is_ok());

        let mut c = Coordinate::latlon(0.0, 0.0).unwrap();
        assert!(c.set_latitude(-90.5).is_err());
        assert_eq!(c.latitude(), 0.0);
        assert!(c.set_latitude(UNKNOWN_LATITUDE).is_ok());
        assert!(c.is_unknown());
    }

    #[test]
    fn longitude_is_not_validated() {
        let mut c = Coordinate::latlon(0.0, 400.0).unwrap();
        assert_eq!(c.longitude(), 400.0);
        c.set_longitude(-500.0);
        assert_eq!(c.longitude(), -500.0);
    }

    #[test]
    fn malformed_timestamp_resets_to_zero() {
        let mut c = Coordinate::latlon(0.0, 0.0).unwrap().with_timestamp(42);
        c.set_timestamp_str("1970-01-01T00:00:02Z");
        assert_eq!(c.timestamp(), 2000);

        c.set_timestamp_str("not a date");
        assert_eq!(c.timestamp(), 0);
    }

    #[test]
    fn update_keeps_id_and_owners() {
        let mut c = Coordinate::latlon(1.0, 2.0).unwrap();
        c.set_id(3);
        c.add_owner(ObjectId(1));

        c.update(&Coordinate::new(4.0, 5.0, 6.0).unwrap().with_timestamp(9));
        assert_eq!(c, Coordinate::new(4.0, 5.0, 6.0).unwrap());
        assert_eq!(c.timestamp(), 9);
        assert_eq!(c.id(), 3);
        assert_eq!(c.owners(), &[ObjectId(1)]);
    }

    #[test]
    fn owners() {
        let mut c = Coordinate::latlon(0.0, 0.0).unwrap();
        assert!(c.add_owner(ObjectId(2)));
        assert!(c.add_owner(ObjectId(1)));
        assert!(!c.add_owner(ObjectId(2)));
        assert_eq!(c.owners(), &[ObjectId(2), ObjectId(1)]);
        assert_eq!(c.shared_count(), 2);
        assert!(c.is_shared());

        assert!(c.remove_owner(ObjectId(2)));
        assert!(!c.remove_owner(ObjectId(2)));
        assert_eq!(c.shared_count(), 1);
        assert!(!c.is_shared());
    }

    #[test]
    fn shared_handle_observes_updates() {
        let first = SharedCoordinate::new(Coordinate::latlon(0.0, 0.0).unwrap());
        let second = first.clone();

        first
            .borrow_mut()
            .update(&Coordinate::latlon(1.0, 1.0).unwrap());
        assert_eq!(second.borrow().latitude(), 1.0);
        assert!(first.ptr_eq(&second));

        let other = SharedCoordinate::new(Coordinate::latlon(1.0, 1.0).unwrap());
        assert_eq!(first, other);
        assert!(!first.ptr_eq(&other));
    }

    #[test]
    fn longitude_normalization() {
        assert_eq!(normalize_longitude(10.0), 10.0);
        assert_eq!(normalize_longitude(190.0), -170.0);
        assert_eq!(normalize_longitude(-190.0), 170.0);
        assert_eq!(normalize_longitude(540.0), 180.0);
        assert_eq!(normalize_longitude(-180.0), -180.0);
    }

    #[test]
    fn kml_text() {
        let c = Coordinate::new(1.5, -2.0, 3.0).unwrap();
        assert_eq!(c.to_kml_string(), "-2,1.5,3");
    }

    #[test]
    fn deserialization_validates_latitude() {
        let c: Coordinate =
            serde_json::from_str(r#"{"latitude":10.0,"longitude":20.0,"timestamp":5,"id":3}"#).unwrap();
        assert_eq!(c, Coordinate::latlon(10.0, 20.0).unwrap());
        assert_eq!(c.timestamp(), 5);
        assert_eq!(c.id(), 3);

        assert!(serde_json::from_str::<Coordinate>(r#"{"latitude":500.0,"longitude":0.0}"#).is_err());
        let unknown: Coordinate = serde_json::from_str(r#"{"latitude":-999.0,"longitude":0.0}"#).unwrap();
        assert!(unknown.is_unknown());
    }
}
