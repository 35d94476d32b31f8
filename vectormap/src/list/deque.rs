use crate::error::VectorMapError;
use std::fmt::{Debug, Formatter};
use std::ops::Index;

/// Minimal number of slots added when the backing storage is reallocated.
const MIN_GROWTH: usize = 12;

/// Growable ordered collection with cheap insertion at both ends.
///
/// Elements are stored in a backing array between two cursors, `first_index` and `last_index`. Slots before
/// `first_index` and after `last_index` are free capacity. Insertion into the middle shifts whichever side of the
/// list is shorter if that side has free capacity, and reallocates the storage otherwise.
///
/// The following always holds: `first_index <= last_index <= capacity` and `len == last_index - first_index`.
pub struct DequeVec<T> {
    slots: Vec<Option<T>>,
    first: usize,
    last: usize,
}

impl<T> DequeVec<T> {
    /// Creates an empty list without allocating.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            first: 0,
            last: 0,
        }
    }

    /// Creates an empty list with the given number of free slots after the cursors.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity),
            first: 0,
            last: 0,
        }
    }

    /// Number of elements in the list.
    pub fn len(&self) -> usize {
        self.last - self.first
    }

    /// Returns true if the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.first == self.last
    }

    /// Size of the backing storage.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Position of the first element in the backing storage.
    pub fn first_index(&self) -> usize {
        self.first
    }

    /// Position after the last element in the backing storage.
    pub fn last_index(&self) -> usize {
        self.last
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, VectorMapError> {
        let len = self.len();
        if index >= len {
            return Err(VectorMapError::IndexOutOfRange { index, len });
        }

        self.slots[self.first + index]
            .as_ref()
            .ok_or(VectorMapError::IndexOutOfRange { index, len })
    }

    /// Returns the mutable element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, VectorMapError> {
        let len = self.len();
        if index >= len {
            return Err(VectorMapError::IndexOutOfRange { index, len });
        }

        self.slots[self.first + index]
            .as_mut()
            .ok_or(VectorMapError::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, VectorMapError> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// First element of the list.
    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    /// Last element of the list.
    pub fn last(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|index| self.get(index).ok())
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.slots[self.first..self.last].iter().filter_map(Option::as_ref)
    }

    /// Iterates over mutable elements in order.
    pub fn iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut T> + '_ {
        self.slots[self.first..self.last]
            .iter_mut()
            .filter_map(Option::as_mut)
    }

    /// Appends an element without checking for duplicates.
    pub fn push_back(&mut self, value: T) {
        if self.last == self.slots.len() {
            self.reallocate(self.len(), value);
        } else {
            self.slots[self.last] = Some(value);
            self.last += 1;
        }
    }

    /// Prepends an element without checking for duplicates.
    pub fn push_front(&mut self, value: T) {
        if self.first == 0 {
            self.reallocate(0, value);
        } else {
            self.first -= 1;
            self.slots[self.first] = Some(value);
        }
    }

    /// Inserts an element at `index`, shifting the elements after it. Duplicates are not checked.
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), VectorMapError> {
        let len = self.len();
        if index > len {
            return Err(VectorMapError::IndexOutOfRange { index, len });
        }

        if index == len {
            self.push_back(value);
            return Ok(());
        }

        if index == 0 {
            self.push_front(value);
            return Ok(());
        }

        let nearer_front = index < len / 2;
        if nearer_front && self.first > 0 {
            self.slots[self.first - 1..self.first + index].rotate_left(1);
            self.first -= 1;
            self.slots[self.first + index] = Some(value);
        } else if !nearer_front && self.last < self.slots.len() {
            self.slots[self.first + index..=self.last].rotate_right(1);
            self.slots[self.first + index] = Some(value);
            self.last += 1;
        } else {
            self.reallocate(index, value);
        }

        Ok(())
    }

    /// Removes the element at `index`, compacting the shorter side of the list.
    pub fn remove(&mut self, index: usize) -> Result<T, VectorMapError> {
        let len = self.len();
        if index >= len {
            return Err(VectorMapError::IndexOutOfRange { index, len });
        }

        let position = self.first + index;
        let value = self.slots[position]
            .take()
            .ok_or(VectorMapError::IndexOutOfRange { index, len })?;

        if index < len / 2 {
            self.slots[self.first..=position].rotate_right(1);
            self.first += 1;
        } else {
            self.slots[position..self.last].rotate_left(1);
            self.last -= 1;
        }

        if self.first == self.last {
            self.first = 0;
            self.last = 0;
        }

        Ok(value)
    }

    /// Removes all the elements. Capacity is kept.
    pub fn clear(&mut self) {
        for slot in &mut self.slots[self.first..self.last] {
            *slot = None;
        }
        self.first = 0;
        self.last = 0;
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        self.slots[self.first..self.last].reverse();
    }

    /// Moves the elements into new storage with free space around them and puts `value` at `index`.
    ///
    /// Free space goes to the side the insertion happened at: all of it to the back for appends, all of it to the
    /// front for prepends, and half to each side otherwise.
    fn reallocate(&mut self, index: usize, value: T) {
        let len = self.len();
        let growth = (len / 2).max(MIN_GROWTH);
        let front_gap = if index == 0 && len > 0 {
            growth
        } else if index == len {
            0
        } else {
            growth / 2
        };

        let old = std::mem::take(&mut self.slots);
        let mut elements = old.into_iter().skip(self.first).take(len).flatten();

        let mut slots = empty_slots(front_gap);
        slots.reserve_exact(len + 1 + growth - front_gap);
        slots.extend(elements.by_ref().take(index).map(Some));
        slots.push(Some(value));
        slots.extend(elements.map(Some));
        slots.resize_with(front_gap + len + 1 + growth - front_gap, || None);

        self.slots = slots;
        self.first = front_gap;
        self.last = front_gap + len + 1;
    }
}

impl<T: PartialEq> DequeVec<T> {
    /// Appends an element if the list does not contain an equal one yet. Returns true if the element was added.
    pub fn add(&mut self, value: T) -> bool {
        if self.contains(&value) {
            return false;
        }

        self.push_back(value);
        true
    }

    /// Returns true if the list contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool {
        self.iter().any(|v| v == value)
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.iter().position(|v| v == value)
    }
}

fn empty_slots<T>(count: usize) -> Vec<Option<T>> {
    let mut slots = Vec::with_capacity(count);
    slots.resize_with(count, || None);
    slots
}

impl<T> Default for DequeVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DequeVec<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: Debug> Debug for DequeVec<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DequeVec<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T> Index<usize> for DequeVec<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> FromIterator<T> for DequeVec<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let slots: Vec<Option<T>> = iter.into_iter().map(Some).collect();
        let last = slots.len();
        Self {
            slots,
            first: 0,
            last,
        }
    }
}

impl<T> Extend<T> for DequeVec<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}
