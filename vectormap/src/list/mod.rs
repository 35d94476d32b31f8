//! Growable ordered collections of vertices and shapes.

mod coordinate_list;
mod deque;
mod object_list;

pub use coordinate_list::CoordinateList;
pub use deque::DequeVec;
pub use object_list::{KindView, VectorObjectList};
