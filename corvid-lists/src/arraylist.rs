/*
   Corvid Lists: linked and array-backed sequence containers with
   constant-time end operations, positional access, and fail-fast
   cursor and splitting traversal over a preallocated node arena.

   Copyright 2026 The Corvid Project Developers

   Licensed under the Apache License, Version 2.0 (the "License");
   you may not use this file except in compliance with the License.
   You may obtain a copy of the License at

       http://www.apache.org/licenses/LICENSE-2.0

   Unless required by applicable law or agreed to in writing, software
   distributed under the License is distributed on an "AS IS" BASIS,
   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
   See the License for the specific language governing permissions and
   limitations under the License.
*/

//! The array-backed sibling of the linked list: the same sequence
//! surface and error taxonomy over contiguous storage with shift
//! semantics. Indexed access is O(1), insertion and removal away
//! from the back are O(n). It exposes no detached traversal objects,
//! so nothing can go stale; borrowed iteration is policed by the
//! compiler.

use crate::error::ListError;
use core::iter::FromIterator;
use core::mem;
use std::slice;

/// A growable array offering the same sequence contract as
/// [`LinkedList`](crate::linkedlist::list::LinkedList): positional
/// access, value search, and the dual sentinel/raising end
/// conventions.
///
/// # Examples
///
/// ```
/// use corvid::lists::ArrayList;
///
/// let mut list = ArrayList::new();
/// list.push_back("a");
/// list.push_back("c");
/// list.insert(1, "b").unwrap();
/// assert_eq!(list.index_of(&"c"), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrayList<T> {
    buf: Vec<T>,
}

impl<T> ArrayList<T> {
    /// Creates an empty list.
    pub fn new() -> ArrayList<T> {
        ArrayList { buf: Vec::new() }
    }

    /// Creates an empty list with room for `capacity` elements
    /// before reallocating.
    pub fn with_capacity(capacity: usize) -> ArrayList<T> {
        ArrayList {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns a reference to the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        self.buf.get(index).ok_or(ListError::IndexOutOfRange {
            index,
            len: self.buf.len(),
        })
    }

    /// Returns a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        let len = self.buf.len();
        self.buf
            .get_mut(index)
            .ok_or(ListError::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index` and returns the previous
    /// value.
    pub fn set(&mut self, index: usize, elem: T) -> Result<T, ListError> {
        let slot = self.get_mut(index)?;
        Ok(mem::replace(slot, elem))
    }

    /// Inserts before the element at `index`, shifting everything
    /// after it right by one. `index == len` appends.
    pub fn insert(&mut self, index: usize, elem: T) -> Result<(), ListError> {
        if index > self.buf.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.buf.len(),
            });
        }
        self.buf.insert(index, elem);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting
    /// everything after it left by one.
    pub fn remove_at(&mut self, index: usize) -> Result<T, ListError> {
        if index >= self.buf.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.buf.len(),
            });
        }
        Ok(self.buf.remove(index))
    }

    /// Prepends an element, shifting the whole buffer. O(n); the
    /// linked list is the right container when this is hot.
    pub fn push_front(&mut self, elem: T) {
        self.buf.insert(0, elem);
    }

    /// Appends an element. Amortized O(1).
    pub fn push_back(&mut self, elem: T) {
        self.buf.push(elem);
    }

    /// Removes and returns the first element, or `None` when empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.buf.is_empty() {
            return None;
        }
        Some(self.buf.remove(0))
    }

    /// Removes and returns the last element, or `None` when empty.
    pub fn pop_back(&mut self) -> Option<T> {
        self.buf.pop()
    }

    pub fn front(&self) -> Option<&T> {
        self.buf.first()
    }

    pub fn back(&self) -> Option<&T> {
        self.buf.last()
    }

    /// Raising counterpart of [`front`](#method.front).
    pub fn first(&self) -> Result<&T, ListError> {
        self.front().ok_or(ListError::Empty)
    }

    /// Raising counterpart of [`back`](#method.back).
    pub fn last(&self) -> Result<&T, ListError> {
        self.back().ok_or(ListError::Empty)
    }

    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.buf.contains(x)
    }

    /// Index of the first element equal to `x`, or `None` if absent.
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.buf.iter().position(|e| e == x)
    }

    /// Index of the last element equal to `x`, or `None` if absent.
    pub fn last_index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.buf.iter().rposition(|e| e == x)
    }

    /// Removes the first element equal to `x`; returns whether one
    /// was removed.
    pub fn remove(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        match self.index_of(x) {
            Some(i) => {
                self.buf.remove(i);
                true
            }
            None => false,
        }
    }

    /// Removes the last element equal to `x`; returns whether one
    /// was removed.
    pub fn remove_last_occurrence(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        match self.last_index_of(x) {
            Some(i) => {
                self.buf.remove(i);
                true
            }
            None => false,
        }
    }

    /// Splices every value yielded by `values` before position
    /// `index`. Returns `Ok(false)` when the input is empty.
    pub fn insert_all<I>(&mut self, index: usize, values: I) -> Result<bool, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        if index > self.buf.len() {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.buf.len(),
            });
        }
        let before = self.buf.len();
        self.buf.splice(index..index, values);
        Ok(self.buf.len() > before)
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Ordered snapshot of all elements.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.buf.clone()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buf.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }
}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.buf.extend(iter);
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ArrayList {
            buf: Vec::from_iter(iter),
        }
    }
}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter_mut()
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}
