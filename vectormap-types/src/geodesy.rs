//! Distances, directions and areas on the surface of the Earth.
//!
//! All functions use a spherical model of the Earth. Distances are computed with the haversine formula on a sphere
//! with radius [`EARTH_RADIUS_KM`], areas use the spherical excess approximation on the WGS84 semi-major axis.

use crate::coordinate::{normalize_longitude, Coordinate};
use crate::datum::Datum;
use std::ops::Deref;

/// Mean radius of the Earth in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const EARTH_RADIUS_M: f64 = EARTH_RADIUS_KM * 1000.0;

/// Great circle distance between two coordinates in meters.
///
/// Returns `0` for equal coordinates.
pub fn distance(c1: &Coordinate, c2: &Coordinate) -> f64 {
    if c1 == c2 {
        return 0.0;
    }

    let lat1 = (c1.latitude() as f64).to_radians();
    let lat2 = (c2.latitude() as f64).to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (c2.longitude() as f64 - c1.longitude() as f64).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Initial bearing from `c1` to `c2` in degrees, in range `[0, 360)`.
///
/// Points on the same meridian get exact `0` (north) or `180` (south) bearing.
pub fn azimuth(c1: &Coordinate, c2: &Coordinate) -> f64 {
    if c1.longitude() == c2.longitude() {
        return if c1.latitude() > c2.latitude() {
            180.0
        } else {
            0.0
        };
    }

    let lat1 = (c1.latitude() as f64).to_radians();
    let lat2 = (c2.latitude() as f64).to_radians();
    let d_lon = (c2.longitude() as f64 - c1.longitude() as f64).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    if bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// Slope between two coordinates in degrees. Positive if `c2` is higher than `c1`.
///
/// Returns `0` if the coordinates have the same horizontal position.
pub fn slope(c1: &Coordinate, c2: &Coordinate) -> f64 {
    let run = distance(
        &Coordinate::from_raw(c1.latitude(), c1.longitude(), 0.0),
        &Coordinate::from_raw(c2.latitude(), c2.longitude(), 0.0),
    );
    if run == 0.0 {
        return 0.0;
    }

    let rise = c2.altitude() as f64 - c1.altitude() as f64;
    (rise / run).atan().to_degrees()
}

/// Total length of a path in meters.
pub fn length<C>(path: impl IntoIterator<Item = C>) -> f64
where
    C: Deref<Target = Coordinate>,
{
    let mut total = 0.0;
    let mut prev: Option<C> = None;
    for c in path {
        if let Some(p) = &prev {
            total += distance(p, &c);
        }
        prev = Some(c);
    }

    total
}

/// Approximate area enclosed by a ring of coordinates in square meters.
///
/// The ring is closed implicitly: the last point does not need to repeat the first one. Rings with less than three
/// points have zero area.
pub fn area<C>(ring: impl IntoIterator<Item = C>) -> f64
where
    C: Deref<Target = Coordinate>,
{
    let points: Vec<(f64, f64)> = ring
        .into_iter()
        .map(|c| {
            (
                (c.latitude() as f64).to_radians(),
                (c.longitude() as f64).to_radians(),
            )
        })
        .collect();

    if points.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    for i in 0..points.len() {
        let (lat1, lon1) = points[i];
        let (lat2, lon2) = points[(i + 1) % points.len()];
        sum += (lon2 - lon1) * (2.0 + lat1.sin() + lat2.sin());
    }

    let radius = Datum::WGS84.semimajor();
    (sum * radius * radius / 2.0).abs()
}

/// Coordinate reached by travelling `distance_m` meters from `start` along the great circle with the given initial
/// `bearing` (degrees). Altitude and timestamp are copied from `start`.
pub fn destination(start: &Coordinate, bearing: f64, distance_m: f64) -> Coordinate {
    let lat1 = (start.latitude() as f64).to_radians();
    let lon1 = (start.longitude() as f64).to_radians();
    let bearing = bearing.to_radians();
    let angular = distance_m / EARTH_RADIUS_M;

    let lat2 = (lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos())
        .clamp(-1.0, 1.0)
        .asin();
    let lon2 = lon1
        + (bearing.sin() * angular.sin() * lat1.cos()).atan2(angular.cos() - lat1.sin() * lat2.sin());

    let latitude = (lat2.to_degrees() as f32).clamp(-90.0, 90.0);
    let longitude = normalize_longitude(lon2.to_degrees() as f32);

    Coordinate::from_raw(latitude, longitude, start.altitude()).with_timestamp(start.timestamp())
}
