use crate::error::VectorMapError;
use crate::list::{CoordinateList, DequeVec};
use crate::object::{
    LineString, MapPoint, MultiGeometry, ObjectMut, Polygon, ShapeKind, VectorObject, VectorShape,
};
use vectormap_types::{geodesy, LatLonAltBox, ObjectId, SharedCoordinate};

/// Ordered collection of shapes of any kind.
///
/// Besides the main sequence the list keeps the positions of the shapes of every kind, so the points, lines,
/// polygons and groups of the list can be iterated without checking every element. The positions are updated by
/// every operation that changes the sequence, and shapes are modified through [`ObjectMut`], which cannot change the
/// kind of a stored shape.
#[derive(Debug, Clone, Default)]
pub struct VectorObjectList {
    objects: DequeVec<VectorObject>,
    points: Vec<usize>,
    lines: Vec<usize>,
    polygons: Vec<usize>,
    groups: Vec<usize>,
}

impl VectorObjectList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes in the list. Shapes inside groups are not counted.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the list has no shapes.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Shape at `index`.
    pub fn get(&self, index: usize) -> Result<&VectorObject, VectorMapError> {
        self.objects.get(index)
    }

    /// Mutable shape at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<ObjectMut<'_>, VectorMapError> {
        self.objects.get_mut(index).map(VectorObject::as_object_mut)
    }

    /// Iterates over the shapes in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &VectorObject> + '_ {
        self.objects.iter()
    }

    /// Iterates over mutable shapes in order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = ObjectMut<'_>> + '_ {
        self.objects.iter_mut().map(VectorObject::as_object_mut)
    }

    /// Appends a shape unless an equal shape is already in the list. Returns true if the shape was added.
    pub fn add(&mut self, object: impl Into<VectorObject>) -> bool {
        let object = object.into();
        if self.objects.contains(&object) {
            return false;
        }

        self.force_add(object);
        true
    }

    /// Appends a shape without checking for duplicates.
    pub fn force_add(&mut self, object: impl Into<VectorObject>) {
        let object = object.into();
        let index = self.objects.len();
        let kind = object.kind();
        self.objects.push_back(object);
        self.partition_mut(kind).push(index);
    }

    /// Inserts a shape at `index` without checking for duplicates.
    pub fn insert(&mut self, index: usize, object: impl Into<VectorObject>) -> Result<(), VectorMapError> {
        let object = object.into();
        let kind = object.kind();
        self.objects.insert(index, object)?;

        for partition in self.partitions_mut() {
            for position in partition.iter_mut().filter(|p| **p >= index) {
                *position += 1;
            }
        }

        let partition = self.partition_mut(kind);
        let at = partition.partition_point(|p| *p < index);
        partition.insert(at, index);

        Ok(())
    }

    /// Removes the shape at `index`.
    pub fn remove(&mut self, index: usize) -> Result<VectorObject, VectorMapError> {
        let object = self.objects.remove(index)?;

        let partition = self.partition_mut(object.kind());
        if let Ok(at) = partition.binary_search(&index) {
            partition.remove(at);
        }

        for partition in self.partitions_mut() {
            for position in partition.iter_mut().filter(|p| **p > index) {
                *position -= 1;
            }
        }

        Ok(object)
    }

    /// Removes the shape with the given id from the list or from any group in it.
    pub fn remove_by_id(&mut self, id: ObjectId) -> Option<VectorObject> {
        let found = self.objects.iter().position(|o| o.id() == id);
        if let Some(index) = found {
            return self.remove(index).ok();
        }

        let groups = self.groups.clone();
        for index in groups {
            let Ok(VectorObject::Group(group)) = self.objects.get_mut(index) else {
                continue;
            };

            if let Some(removed) = group.children_mut().remove_by_id(id) {
                return Some(removed);
            }
        }

        None
    }

    /// Removes all the shapes.
    pub fn clear(&mut self) {
        self.objects.clear();
        for partition in self.partitions_mut() {
            partition.clear();
        }
    }

    /// Shape with the given id, searched in the list and in all the groups in it.
    pub fn find(&self, id: ObjectId) -> Option<&VectorObject> {
        for object in self.objects.iter() {
            if object.id() == id {
                return Some(object);
            }

            if let VectorObject::Group(group) = object {
                if let Some(found) = group.children().find(id) {
                    return Some(found);
                }
            }
        }

        None
    }

    /// Mutable shape with the given id, searched in the list and in all the groups in it.
    pub fn find_mut(&mut self, id: ObjectId) -> Option<ObjectMut<'_>> {
        for object in self.objects.iter_mut() {
            if object.id() == id {
                return Some(object.as_object_mut());
            }

            if let VectorObject::Group(group) = object {
                if let Some(found) = group.children_mut().find_mut(id) {
                    return Some(found);
                }
            }
        }

        None
    }

    /// Points of the list.
    pub fn map_points(&self) -> KindView<'_, MapPoint> {
        KindView {
            objects: &self.objects,
            positions: &self.points,
            extract: VectorObject::as_point,
        }
    }

    /// Lines of the list.
    pub fn line_strings(&self) -> KindView<'_, LineString> {
        KindView {
            objects: &self.objects,
            positions: &self.lines,
            extract: VectorObject::as_line,
        }
    }

    /// Polygons of the list.
    pub fn polygons(&self) -> KindView<'_, Polygon> {
        KindView {
            objects: &self.objects,
            positions: &self.polygons,
            extract: VectorObject::as_polygon,
        }
    }

    /// Groups of the list.
    pub fn multi_geometries(&self) -> KindView<'_, MultiGeometry> {
        KindView {
            objects: &self.objects,
            positions: &self.groups,
            extract: VectorObject::as_group,
        }
    }

    /// Bounding box of all the shapes in the list.
    ///
    /// An empty list, or a list of shapes without known vertices, gives an all-zero box.
    pub fn boundary(&self) -> LatLonAltBox {
        self.known_boundary().unwrap_or_default()
    }

    /// Bounding box of all the shapes that have known vertices.
    pub(crate) fn known_boundary(&self) -> Option<LatLonAltBox> {
        self.objects
            .iter()
            .filter_map(VectorShape::boundary)
            .reduce(|acc, b| acc.combine(&b))
    }

    /// Joins the vertices of all the shapes into one path.
    ///
    /// Starting with the first shape, the shape whose end is closest to either end of the path built so far is
    /// attached to it, reversed if needed, until all the shapes are used. A vertex equal to the end of the path it
    /// is attached to is not repeated.
    pub fn coordinates_for_merge(&self) -> CoordinateList {
        let mut remaining: Vec<&CoordinateList> = self
            .objects
            .iter()
            .map(|o| &o.data().coordinates)
            .filter(|c| !c.is_empty())
            .collect();

        let mut chain = CoordinateList::new();
        if remaining.is_empty() {
            return chain;
        }

        let first = remaining.remove(0);
        chain.extend(first.iter().cloned());

        while !remaining.is_empty() {
            let (Some(chain_first), Some(chain_last)) = (chain.first().cloned(), chain.last().cloned()) else {
                break;
            };

            let mut best: Option<(usize, Junction, f64)> = None;
            for (index, candidate) in remaining.iter().enumerate() {
                let (Some(candidate_first), Some(candidate_last)) = (candidate.first(), candidate.last()) else {
                    continue;
                };

                let options = [
                    (Junction::FirstFirst, &chain_first, candidate_first),
                    (Junction::FirstLast, &chain_first, candidate_last),
                    (Junction::LastFirst, &chain_last, candidate_first),
                    (Junction::LastLast, &chain_last, candidate_last),
                ];

                for (junction, end, candidate_end) in options {
                    let distance = geodesy::distance(&end.borrow(), &candidate_end.borrow());
                    if best.map_or(true, |(_, _, d)| distance < d) {
                        best = Some((index, junction, distance));
                    }
                }
            }

            let Some((index, junction, _)) = best else {
                break;
            };

            let candidate = remaining.remove(index);
            match junction {
                Junction::FirstFirst => prepend(&mut chain, candidate.iter()),
                Junction::FirstLast => prepend(&mut chain, candidate.iter().rev()),
                Junction::LastFirst => append(&mut chain, candidate.iter()),
                Junction::LastLast => append(&mut chain, candidate.iter().rev()),
            }
        }

        chain
    }

    fn partition_mut(&mut self, kind: ShapeKind) -> &mut Vec<usize> {
        match kind {
            ShapeKind::Point => &mut self.points,
            ShapeKind::Line => &mut self.lines,
            ShapeKind::Polygon => &mut self.polygons,
            ShapeKind::Group => &mut self.groups,
        }
    }

    fn partitions_mut(&mut self) -> [&mut Vec<usize>; 4] {
        [
            &mut self.points,
            &mut self.lines,
            &mut self.polygons,
            &mut self.groups,
        ]
    }
}

impl PartialEq for VectorObjectList {
    fn eq(&self, other: &Self) -> bool {
        self.objects == other.objects
    }
}

impl FromIterator<VectorObject> for VectorObjectList {
    fn from_iter<I: IntoIterator<Item = VectorObject>>(iter: I) -> Self {
        let mut list = Self::new();
        for object in iter {
            list.force_add(object);
        }
        list
    }
}

#[derive(Debug, Copy, Clone)]
enum Junction {
    FirstFirst,
    FirstLast,
    LastFirst,
    LastLast,
}

/// Pushes the vertices to the front of the chain one by one, so the last pushed vertex becomes the first one.
///
/// The first vertex is skipped if it repeats the junction vertex of the chain.
fn prepend<'a>(chain: &mut CoordinateList, mut vertices: impl Iterator<Item = &'a SharedCoordinate>) {
    if let Some(vertex) = vertices.next() {
        if chain.first() != Some(vertex) {
            chain.push_front(vertex.clone());
        }
    }

    for vertex in vertices {
        chain.push_front(vertex.clone());
    }
}

fn append<'a>(chain: &mut CoordinateList, mut vertices: impl Iterator<Item = &'a SharedCoordinate>) {
    if let Some(vertex) = vertices.next() {
        if chain.last() != Some(vertex) {
            chain.push_back(vertex.clone());
        }
    }

    for vertex in vertices {
        chain.push_back(vertex.clone());
    }
}

/// Shapes of one kind in a [`VectorObjectList`].
pub struct KindView<'a, T> {
    objects: &'a DequeVec<VectorObject>,
    positions: &'a [usize],
    extract: fn(&VectorObject) -> Option<&T>,
}

impl<'a, T: 'a> KindView<'a, T> {
    /// Number of shapes of this kind.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no shapes of this kind.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The `index`-th shape of this kind.
    pub fn get(&self, index: usize) -> Option<&'a T> {
        let position = *self.positions.get(index)?;
        self.objects.get(position).ok().and_then(self.extract)
    }

    /// Positions of the shapes of this kind in the main list.
    pub fn positions(&self) -> &'a [usize] {
        self.positions
    }

    /// Iterates over the shapes of this kind in list order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + 'a {
        let objects = self.objects;
        let extract = self.extract;
        self.positions
            .iter()
            .filter_map(move |position| objects.get(*position).ok().and_then(extract))
    }
}
