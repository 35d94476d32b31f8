use crate::list::DequeVec;
use std::ops::{Deref, DerefMut};
use vectormap_types::{geodesy, Coordinate, LatLonAltBox, SharedCoordinate};

/// Ordered list of vertices of a shape.
///
/// Vertices are [`SharedCoordinate`] handles, so a list can hold the same coordinate instance as the lists of other
/// shapes. Equality of elements (used by [`DequeVec::add`]) is value equality of the coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoordinateList(DequeVec<SharedCoordinate>);

impl CoordinateList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self(DequeVec::new())
    }

    /// Creates a list of new (not shared) handles to the given coordinates.
    pub fn from_coordinates(coordinates: impl IntoIterator<Item = Coordinate>) -> Self {
        coordinates.into_iter().map(SharedCoordinate::new).collect()
    }

    /// Copies of the current coordinate values.
    pub fn values(&self) -> Vec<Coordinate> {
        self.iter().map(SharedCoordinate::get).collect()
    }

    /// Position of the given coordinate instance in the list.
    ///
    /// Unlike [`DequeVec::index_of`] this compares identity, not value.
    pub fn position_of(&self, coordinate: &SharedCoordinate) -> Option<usize> {
        self.iter().position(|c| c.ptr_eq(coordinate))
    }

    /// Bounding box of all the known coordinates in the list.
    pub fn boundary(&self) -> Option<LatLonAltBox> {
        LatLonAltBox::from_coordinates(self.iter().map(|c| c.borrow()))
    }

    /// Length of the path through all the vertices in meters.
    pub fn length(&self) -> f64 {
        geodesy::length(self.iter().map(|c| c.borrow()))
    }

    /// Returns true if the list has at least four vertices and the last one equals the first.
    pub fn is_closed_ring(&self) -> bool {
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => self.len() >= 4 && first == last,
            _ => false,
        }
    }

    /// List with the same handles in reverse order.
    pub fn reversed(&self) -> Self {
        self.iter().rev().cloned().collect()
    }

    /// Writes the coordinates as a space separated KML coordinate string.
    pub fn write_kml(&self, out: &mut String) {
        for (index, coordinate) in self.iter().enumerate() {
            if index > 0 {
                out.push(' ');
            }
            coordinate.borrow().write_kml(out);
        }
    }
}

impl Deref for CoordinateList {
    type Target = DequeVec<SharedCoordinate>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for CoordinateList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromIterator<SharedCoordinate> for CoordinateList {
    fn from_iter<I: IntoIterator<Item = SharedCoordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Coordinate>> for CoordinateList {
    fn from(value: Vec<Coordinate>) -> Self {
        Self::from_coordinates(value)
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
    fn add_compares_values() {
        let mut list = CoordinateList::new();
        assert!(list.add(SharedCoordinate::new(c(1.0, 1.0))));
        assert!(!list.add(SharedCoordinate::new(c(1.0, 1.0).with_timestamp(10))));
        assert!(list.add(SharedCoordinate::new(c(1.0, 2.0))));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn position_of_uses_identity() {
        let shared = SharedCoordinate::new(c(1.0, 1.0));
        let list: CoordinateList = vec![SharedCoordinate::new(c(1.0, 1.0)), shared.clone()]
            .into_iter()
            .collect();
        assert_eq!(list.index_of(&shared), Some(0));
        assert_eq!(list.position_of(&shared), Some(1));
    }

    #[test]
    fn closed_ring() {
        let mut list = CoordinateList::from(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);
        assert!(!list.is_closed_ring());
        list.push_back(SharedCoordinate::new(c(0.0, 0.0)));
        assert!(list.is_closed_ring());
    }

    #[test]
    fn boundary_and_length() {
        let list = CoordinateList::from(vec![c(0.0, 0.0), c(0.0, 1.0), c(2.0, 1.0)]);
        let boundary = list.boundary().unwrap();
        assert_eq!(boundary.north, 2.0);
        assert_eq!(boundary.south, 0.0);
        assert_eq!(boundary.east, 1.0);
        assert_eq!(boundary.west, 0.0);
        assert_abs_diff_eq!(list.length(), 3.0 * 111_195.0, epsilon = 5.0);

        assert_eq!(CoordinateList::new().boundary(), None);
    }

    #[test]
    fn kml_text() {
        let list = CoordinateList::from(vec![c(1.0, 2.0), c(3.0, 4.0)]);
        let mut out = String::new();
        list.reversed().write_kml(&mut out);
        assert_eq!(out, "4,3,0 2,1,0");
    }
}
