use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifier of a shape on the map.
///
/// Coordinates refer to the shapes that own them by id rather than by pointer, so a shape can be dropped without
/// leaving dangling references in the vertices it used to share.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
