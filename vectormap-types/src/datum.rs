/// Parameters of the reference ellipsoid.
///
/// The semi-major axis is used by the area approximation. All other geodesic functions of the crate work on a
/// sphere with [`EARTH_RADIUS_KM`](crate::geodesy::EARTH_RADIUS_KM) radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
}

impl Datum {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
    };

    /// Semi-major axis in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
