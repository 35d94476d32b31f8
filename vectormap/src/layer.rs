//! Map layer that owns shapes and the vertices they share.

use crate::error::VectorMapError;
use crate::list::{CoordinateList, VectorObjectList};
use crate::node_map::NodeMap;
use crate::object::{ObjectMut, VectorObject, VectorShape};
use crate::outline::{segment_outline, OutlineSegment};
use crate::style::StyleLookup;
use ahash::AHashMap;
use vectormap_types::{Coordinate, LatLonAltBox, LatLonBox, ObjectId, SharedCoordinate};

/// Collection of shapes with a common vertex store.
///
/// Every vertex of a shape added to the layer is interned in the layer's [`NodeMap`]: a vertex with a positive id is
/// stored under that id, a vertex equal in value to an already stored one is replaced by the stored instance, and
/// any other vertex is stored under a new key. As a result, shapes that touch each other hold the very same
/// coordinate instances at their common vertices, and every coordinate knows the ids of the shapes that use it.
///
/// When a shape is removed, it is unregistered from its vertices, and the vertices no other shape uses are dropped
/// from the store.
#[derive(Debug)]
pub struct VectorLayer {
    name: String,
    node_map: NodeMap,
    objects: VectorObjectList,
    next_id: u64,
}

impl VectorLayer {
    /// Creates an empty layer.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            node_map: NodeMap::new(),
            objects: VectorObjectList::new(),
            next_id: 1,
        }
    }

    /// Name of the layer.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vertex store of the layer.
    pub fn node_map(&self) -> &NodeMap {
        &self.node_map
    }

    /// Shapes of the layer.
    pub fn objects(&self) -> &VectorObjectList {
        &self.objects
    }

    /// Shape with the given id, including shapes inside groups.
    pub fn get(&self, id: ObjectId) -> Option<&VectorObject> {
        self.objects.find(id)
    }

    /// Adds a shape to the layer.
    ///
    /// The shape and every shape inside it get new ids, and their vertices are interned. Returns the id of the shape,
    /// or `None` if an equal shape is already in the layer.
    pub fn add_object(&mut self, object: impl Into<VectorObject>) -> Option<ObjectId> {
        let mut object = object.into();
        if self.objects.iter().any(|o| *o == object) {
            log::debug!("Layer '{}' already contains an equal {} shape", self.name, object.kind());
            return None;
        }

        let id = self.register(object.as_object_mut());
        self.objects.force_add(object);
        Some(id)
    }

    /// Appends a vertex to the shape with the given id. Returns the interned vertex.
    pub fn push_coordinate(
        &mut self,
        id: ObjectId,
        coordinate: Coordinate,
    ) -> Result<SharedCoordinate, VectorMapError> {
        if self.objects.find(id).is_none() {
            return Err(VectorMapError::ObjectNotFound(id));
        }

        let vertex = self.intern(&SharedCoordinate::new(coordinate));
        let mut shape = self
            .objects
            .find_mut(id)
            .ok_or(VectorMapError::ObjectNotFound(id))?;

        vertex.borrow_mut().add_owner(id);
        shape.data_mut().coordinates.push_back(vertex.clone());
        Ok(vertex)
    }

    /// Removes the shape with the given id from the layer.
    ///
    /// The shape and the shapes inside it stop being owners of their vertices. Vertices left without owners are
    /// removed from the vertex store.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<VectorObject, VectorMapError> {
        let object = self
            .objects
            .remove_by_id(id)
            .ok_or(VectorMapError::ObjectNotFound(id))?;

        let released = self.release(&object);
        log::debug!("Removed shape {id} from layer '{}', {released} vertices released", self.name);

        Ok(object)
    }

    /// Bounding box of all the shapes of the layer. All-zero if the layer has no vertices.
    pub fn boundary(&self) -> LatLonAltBox {
        self.objects.boundary()
    }

    /// Top level shapes whose bounding boxes overlap the given box.
    pub fn objects_in<'a>(&'a self, bbox: &'a LatLonBox) -> impl Iterator<Item = &'a VectorObject> + 'a {
        self.objects.iter().filter(move |o| o.fits_within(bbox))
    }

    /// Recomputes the outline segments of all the polygons of the layer, including polygons inside groups.
    pub fn update_outlines(&mut self, styles: &dyn StyleLookup) {
        let mut outlines = AHashMap::new();
        collect_outlines(&self.objects, styles, &self.objects, &mut outlines);
        log::debug!("Updating outlines of {} polygons in layer '{}'", outlines.len(), self.name);

        for (id, outline) in outlines {
            if let Some(polygon) = self.objects.find_mut(id).and_then(ObjectMut::into_polygon) {
                polygon.set_outline(outline);
            }
        }
    }

    fn register(&mut self, mut shape: ObjectMut<'_>) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;

        let data = shape.data_mut();
        data.id = id;
        self.intern_all(id, &mut data.coordinates);

        if let ObjectMut::Group(group) = shape {
            for child in group.children_mut().iter_mut() {
                self.register(child);
            }
        }

        id
    }

    fn intern_all(&mut self, owner: ObjectId, coordinates: &mut CoordinateList) {
        for index in 0..coordinates.len() {
            let Ok(vertex) = coordinates.get(index) else {
                continue;
            };

            let interned = self.intern(vertex);
            interned.borrow_mut().add_owner(owner);
            if !interned.ptr_eq(vertex) {
                // The index is in range, so replacing the handle cannot fail.
                let _ = coordinates.set(index, interned);
            }
        }
    }

    fn intern(&mut self, vertex: &SharedCoordinate) -> SharedCoordinate {
        let id = vertex.borrow().id();
        if id > 0 {
            return self.node_map.put_with_key(id, vertex.clone());
        }

        let existing = self
            .node_map
            .find_key(&vertex.borrow())
            .and_then(|key| self.node_map.get(key));

        match existing {
            Some(existing) => existing,
            None => self.node_map.put(vertex.clone()),
        }
    }

    fn release(&mut self, object: &VectorObject) -> usize {
        let id = object.id();
        let mut released = 0;
        for vertex in object.data().coordinates.iter() {
            vertex.borrow_mut().remove_owner(id);
            if vertex.borrow().owners().is_empty() && self.node_map.release(vertex) {
                released += 1;
            }
        }

        if let VectorObject::Group(group) = object {
            for child in group.children().iter() {
                released += self.release(child);
            }
        }

        released
    }
}

impl Default for VectorLayer {
    fn default() -> Self {
        Self::new("")
    }
}

fn collect_outlines(
    list: &VectorObjectList,
    styles: &dyn StyleLookup,
    shapes: &VectorObjectList,
    outlines: &mut AHashMap<ObjectId, Vec<OutlineSegment>>,
) {
    for polygon in list.polygons().iter() {
        outlines.insert(polygon.data().id, segment_outline(polygon, styles, shapes));
    }

    for group in list.multi_geometries().iter() {
        collect_outlines(group.children(), styles, shapes, outlines);
    }
}
