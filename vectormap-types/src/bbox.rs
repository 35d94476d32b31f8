//! Geographic bounding boxes.
//!
//! Boxes are described by their four edges in degrees. There is no requirement that `north > south` or
//! `east > west`: a box whose western edge is in the eastern hemisphere and whose eastern edge is in the western
//! hemisphere (`west > 0 && east < 0`) spans the antimeridian. Containment and overlap checks account for that, so
//! they are expressed through the directional predicates of this module rather than plain range checks.

use crate::coordinate::{normalize_longitude, Coordinate};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Longitude gap above which two longitudes of different sign are considered to be neighbors across the antimeridian
/// rather than across the prime meridian.
pub const WRAP_THRESHOLD: f32 = 90.0;

/// Returns true if `longitude` is east of (or at) `reference`.
///
/// If the two longitudes have different signs and the gap between them is larger than `threshold`, the shorter way
/// between them is across the antimeridian, and the answer is flipped accordingly.
pub fn is_east_of(longitude: f32, reference: f32, threshold: f32) -> bool {
    if longitude >= 0.0 && reference < 0.0 && longitude - reference > threshold {
        return false;
    }
    if longitude < 0.0 && reference >= 0.0 && reference - longitude > threshold {
        return true;
    }

    longitude >= reference
}

/// Returns true if `longitude` is west of (or at) `reference`. See [`is_east_of`] for the meaning of `threshold`.
pub fn is_west_of(longitude: f32, reference: f32, threshold: f32) -> bool {
    if longitude < 0.0 && reference >= 0.0 && reference - longitude > threshold {
        return false;
    }
    if longitude >= 0.0 && reference < 0.0 && longitude - reference > threshold {
        return true;
    }

    longitude <= reference
}

/// Returns true if `latitude` is north of (or at) `reference`.
pub fn is_north_of(latitude: f32, reference: f32) -> bool {
    latitude >= reference
}

/// Returns true if `latitude` is south of (or at) `reference`.
pub fn is_south_of(latitude: f32, reference: f32) -> bool {
    latitude <= reference
}

/// Two dimensional geographic bounding box.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLonBox {
    /// Northern edge latitude.
    pub north: f32,
    /// Southern edge latitude.
    pub south: f32,
    /// Eastern edge longitude.
    pub east: f32,
    /// Western edge longitude.
    pub west: f32,
}

impl LatLonBox {
    /// Creates a new box.
    pub fn new(north: f32, south: f32, east: f32, west: f32) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Smallest box containing all the given coordinates. Coordinates with unknown position are skipped.
    ///
    /// Returns `None` if there are no known coordinates.
    pub fn from_coordinates<C>(coordinates: impl IntoIterator<Item = C>) -> Option<Self>
    where
        C: Deref<Target = Coordinate>,
    {
        let mut result: Option<Self> = None;
        for c in coordinates {
            if c.is_unknown() {
                continue;
            }

            let (lat, lon) = (c.latitude(), c.longitude());
            result = Some(match result {
                None => Self::new(lat, lat, lon, lon),
                Some(b) => Self {
                    north: b.north.max(lat),
                    south: b.south.min(lat),
                    east: b.east.max(lon),
                    west: b.west.min(lon),
                },
            });
        }

        result
    }

    /// Returns true if the box spans the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > 0.0 && self.east < 0.0
    }

    /// Extent of the box from west to east in degrees.
    pub fn width(&self) -> f32 {
        if self.crosses_antimeridian() {
            (180.0 - self.west) + (180.0 + self.east).abs()
        } else {
            self.east - self.west
        }
    }

    /// Extent of the box from south to north in degrees.
    pub fn height(&self) -> f32 {
        self.north - self.south
    }

    /// Center of the box as `(latitude, longitude)`.
    pub fn center(&self) -> (f32, f32) {
        (
            (self.north + self.south) / 2.0,
            normalize_longitude(self.west + self.width() / 2.0),
        )
    }

    /// Returns true if the longitude lies between the western and eastern edges of the box.
    ///
    /// The edges of the box already tell which way around the globe it goes, so no wrap correction is applied to the
    /// individual comparisons.
    pub fn contains_longitude(&self, longitude: f32) -> bool {
        if self.crosses_antimeridian() {
            is_east_of(longitude, self.west, f32::INFINITY)
                || is_west_of(longitude, self.east, f32::INFINITY)
        } else {
            is_east_of(longitude, self.west, f32::INFINITY)
                && is_west_of(longitude, self.east, f32::INFINITY)
        }
    }

    /// Returns true if the latitude lies between the southern and northern edges of the box.
    pub fn contains_latitude(&self, latitude: f32) -> bool {
        is_north_of(latitude, self.south) && is_south_of(latitude, self.north)
    }

    /// Returns true if the coordinate is inside the box or on its edge.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.contains_latitude(coordinate.latitude()) && self.contains_longitude(coordinate.longitude())
    }

    /// Returns true if `other` lies completely inside this box.
    pub fn contains_box(&self, other: &LatLonBox) -> bool {
        self.contains_latitude(other.north)
            && self.contains_latitude(other.south)
            && self.contains_longitude(other.west)
            && self.contains_longitude(other.east)
            && other.width() <= self.width()
    }

    /// Returns true if the boxes have at least one common point.
    pub fn overlaps(&self, other: &LatLonBox) -> bool {
        let north_south = is_south_of(other.south, self.north) && is_north_of(other.north, self.south);
        let east_west = self.contains_longitude(other.west)
            || self.contains_longitude(other.east)
            || other.contains_longitude(self.west)
            || other.contains_longitude(self.east);

        north_south && east_west
    }

    /// Box covering both boxes. Edges are combined numerically.
    pub fn combine(&self, other: &LatLonBox) -> Self {
        Self {
            north: self.north.max(other.north),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            west: self.west.min(other.west),
        }
    }

    /// Box grown by `margin` degrees in every direction. Latitudes are clamped to the poles.
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            north: (self.north + margin).min(90.0),
            south: (self.south - margin).max(-90.0),
            east: normalize_longitude(self.east + margin),
            west: normalize_longitude(self.west - margin),
        }
    }
}

/// Geographic bounding box with altitude range.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLonAltBox {
    /// Northern edge latitude.
    pub north: f32,
    /// Southern edge latitude.
    pub south: f32,
    /// Eastern edge longitude.
    pub east: f32,
    /// Western edge longitude.
    pub west: f32,
    /// Lowest altitude.
    pub min_altitude: f32,
    /// Highest altitude.
    pub max_altitude: f32,
}

impl LatLonAltBox {
    /// Creates a new box.
    pub fn new(north: f32, south: f32, east: f32, west: f32, min_altitude: f32, max_altitude: f32) -> Self {
        Self {
            north,
            south,
            east,
            west,
            min_altitude,
            max_altitude,
        }
    }

    /// Creates a box with zero altitude range from a two dimensional one.
    pub fn from_lat_lon(lat_lon: LatLonBox) -> Self {
        Self::new(lat_lon.north, lat_lon.south, lat_lon.east, lat_lon.west, 0.0, 0.0)
    }

    /// Smallest box containing all the given coordinates including their altitudes. Coordinates with unknown position
    /// are skipped.
    pub fn from_coordinates<C>(coordinates: impl IntoIterator<Item = C>) -> Option<Self>
    where
        C: Deref<Target = Coordinate>,
    {
        let mut altitude: Option<(f32, f32)> = None;
        let lat_lon = LatLonBox::from_coordinates(coordinates.into_iter().inspect(|c| {
            if c.is_unknown() {
                return;
            }
            let alt = c.altitude();
            altitude = Some(match altitude {
                None => (alt, alt),
                Some((min, max)) => (min.min(alt), max.max(alt)),
            });
        }))?;

        let (min_altitude, max_altitude) = altitude.unwrap_or_default();
        Some(Self {
            min_altitude,
            max_altitude,
            ..Self::from_lat_lon(lat_lon)
        })
    }

    /// Two dimensional part of the box.
    pub fn lat_lon(&self) -> LatLonBox {
        LatLonBox::new(self.north, self.south, self.east, self.west)
    }

    /// Extent of the box from west to east in degrees.
    pub fn width(&self) -> f32 {
        self.lat_lon().width()
    }

    /// Extent of the box from south to north in degrees.
    pub fn height(&self) -> f32 {
        self.lat_lon().height()
    }

    /// Returns true if the horizontal position of the coordinate is inside the box. Altitude is not checked.
    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.lat_lon().contains(coordinate)
    }

    /// Returns true if the horizontal extents of the boxes overlap. Altitude is not checked.
    pub fn overlaps(&self, other: &LatLonAltBox) -> bool {
        self.lat_lon().overlaps(&other.lat_lon())
    }

    /// Box covering both boxes.
    pub fn combine(&self, other: &LatLonAltBox) -> Self {
        let lat_lon = self.lat_lon().combine(&other.lat_lon());
        Self {
            min_altitude: self.min_altitude.min(other.min_altitude),
            max_altitude: self.max_altitude.max(other.max_altitude),
            ..Self::from_lat_lon(lat_lon)
        }
    }
}

impl From<LatLonBox> for LatLonAltBox {
    fn from(value: LatLonBox) -> Self {
        Self::from_lat_lon(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn c(lat: f32, lon: f32) -> Coordinate {
        Coordinate::latlon(lat, lon).unwrap()
    }

    #[test]
    fn directional_predicates() {
        assert!(is_east_of(10.0, 5.0, WRAP_THRESHOLD));
        assert!(!is_east_of(5.0, 10.0, WRAP_THRESHOLD));
        assert!(is_east_of(5.0, -5.0, WRAP_THRESHOLD));

        // Across the antimeridian -179 is just east of 179.
        assert!(is_east_of(-179.0, 179.0, WRAP_THRESHOLD));
        assert!(!is_east_of(179.0, -179.0, WRAP_THRESHOLD));
        assert!(is_west_of(179.0, -179.0, WRAP_THRESHOLD));
        assert!(!is_west_of(-179.0, 179.0, WRAP_THRESHOLD));

        assert!(is_north_of(10.0, 10.0));
        assert!(is_south_of(-10.0, 0.0));
    }

    #[test]
    fn contains_simple() {
        let b = LatLonBox::new(10.0, 0.0, 10.0, 0.0);
        assert!(b.contains(&c(5.0, 5.0)));
        assert!(b.contains(&c(10.0, 0.0)));
        assert!(!b.contains(&c(11.0, 5.0)));
        assert!(!b.contains(&c(5.0, -1.0)));
    }

    #[test]
    fn contains_across_antimeridian() {
        let b = LatLonBox::new(10.0, -10.0, -170.0, 170.0);
        assert!(b.crosses_antimeridian());
        assert!(b.contains(&c(0.0, 179.0)));
        assert!(b.contains(&c(0.0, -179.0)));
        assert!(b.contains(&c(0.0, 180.0)));
        assert!(!b.contains(&c(0.0, 0.0)));
        assert!(!b.contains(&c(0.0, -100.0)));
        assert!(!b.contains(&c(0.0, 100.0)));
    }

    #[test]
    fn wide_box_across_antimeridian() {
        let b = LatLonBox::new(10.0, -10.0, -10.0, 10.0);
        assert!(b.contains(&c(0.0, -50.0)));
        assert!(b.contains(&c(0.0, 100.0)));
        assert!(!b.contains(&c(0.0, 0.0)));
        assert!(!b.contains(&c(0.0, -5.0)));
        assert_eq!(b.width(), 340.0);
    }

    #[test]
    fn width_and_center() {
        let b = LatLonBox::new(10.0, -10.0, -170.0, 170.0);
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.center(), (0.0, 180.0));

        let b = LatLonBox::new(20.0, 0.0, 30.0, 10.0);
        assert_eq!(b.width(), 20.0);
        assert_eq!(b.height(), 20.0);
        assert_eq!(b.center(), (10.0, 20.0));
    }

    #[test]
    fn overlaps() {
        let a = LatLonBox::new(10.0, 0.0, 10.0, 0.0);
        assert!(a.overlaps(&LatLonBox::new(15.0, 5.0, 15.0, 5.0)));
        assert!(a.overlaps(&LatLonBox::new(5.0, 4.0, 6.0, 4.0)));
        assert!(a.overlaps(&LatLonBox::new(20.0, -20.0, 20.0, -20.0)));
        assert!(!a.overlaps(&LatLonBox::new(30.0, 20.0, 10.0, 0.0)));
        assert!(!a.overlaps(&LatLonBox::new(10.0, 0.0, 30.0, 20.0)));

        let wrapping = LatLonBox::new(10.0, 0.0, -170.0, 170.0);
        assert!(wrapping.overlaps(&LatLonBox::new(5.0, 0.0, -175.0, -178.0)));
        assert!(LatLonBox::new(5.0, 0.0, 178.0, 175.0).overlaps(&wrapping));
        assert!(!wrapping.overlaps(&a));
    }

    #[test]
    fn contains_box() {
        let outer = LatLonBox::new(10.0, -10.0, 10.0, -10.0);
        assert!(outer.contains_box(&LatLonBox::new(5.0, -5.0, 5.0, -5.0)));
        assert!(!outer.contains_box(&LatLonBox::new(15.0, -5.0, 5.0, -5.0)));
    }

    #[test]
    fn combine() {
        let a = LatLonAltBox::new(10.0, 0.0, 10.0, 0.0, 0.0, 100.0);
        let b = LatLonAltBox::new(20.0, 5.0, 5.0, -5.0, -10.0, 50.0);
        assert_eq!(
            a.combine(&b),
            LatLonAltBox::new(20.0, 0.0, 10.0, -5.0, -10.0, 100.0)
        );
    }

    #[test]
    fn from_coordinates() {
        let coords = [
            Coordinate::new(1.0, 2.0, 30.0).unwrap(),
            Coordinate::unknown(),
            Coordinate::new(-1.0, 5.0, -3.0).unwrap(),
        ];
        let b = LatLonAltBox::from_coordinates(coords.iter()).unwrap();
        assert_eq!(b, LatLonAltBox::new(1.0, -1.0, 5.0, 2.0, -3.0, 30.0));

        assert_eq!(LatLonBox::from_coordinates(Vec::<&Coordinate>::new()), None);
        assert_eq!(LatLonAltBox::from_coordinates([Coordinate::unknown()].iter()), None);
    }

    #[test]
    fn expand() {
        let b = LatLonBox::new(89.5, 0.0, 179.5, 0.0).expand(1.0);
        assert_eq!(b.north, 90.0);
        assert_eq!(b.south, -1.0);
        assert_abs_diff_eq!(b.east, -179.5);
        assert_eq!(b.west, -1.0);
    }
}
