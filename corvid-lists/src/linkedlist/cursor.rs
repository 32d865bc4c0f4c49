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

use crate::error::ListError;
use crate::linkedlist::{list::LinkedList, node::ChainNode};
use core::ptr;

/// A bidirectional, position-tracking traversal over a
/// [`LinkedList`].
///
/// A cursor sits *between* elements: position `k` is the gap before
/// the element at index `k`, so a list of `n` elements has `n + 1`
/// cursor positions. [`next`](#method.next) and
/// [`previous`](#method.previous) move the cursor one gap and return
/// the element crossed; alternating the two returns the same element
/// repeatedly. The cursor can also [`remove`](#method.remove) or
/// [`set`](#method.set) the element it last crossed, and
/// [`insert`](#method.insert) a new one at its position.
///
/// The cursor is detached from the list: it holds no borrow, only the
/// list's container id and a structural version snapshot. Every call
/// takes the list by reference and validates the snapshot first; if
/// the list was structurally modified by anything other than this
/// cursor (or a different list is passed), the call fails with
/// [`ListError::StructuralChange`]. Mutations made through the cursor
/// re-synchronize it, so a single cursor can interleave traversal and
/// editing freely.
///
/// # Examples
///
/// Removing every odd element in one pass:
///
/// ```
/// use corvid::lists::LinkedList;
///
/// let mut list: LinkedList<i32> = (0..6).collect();
/// let mut cur = list.cursor();
/// while let Some(&e) = cur.next(&list).unwrap() {
///     if e % 2 == 1 {
///         cur.remove(&mut list).unwrap();
///     }
/// }
/// assert_eq!(list.to_vec(), vec![0, 2, 4]);
/// ```
#[derive(Debug)]
pub struct Cursor<T> {
    cid: usize,
    /// The node after the cursor's gap; null when the cursor sits
    /// past the last element.
    next: *mut ChainNode<T>,
    next_index: usize,
    /// The node most recently returned by `next` or `previous`; null
    /// until the first move and after `remove` or `insert`.
    last_returned: *mut ChainNode<T>,
    version: u64,
}

impl<T> Cursor<T> {
    /// `index` must already be position-checked (`0..=len`).
    pub(super) fn new(list: &LinkedList<T>, index: usize) -> Cursor<T> {
        let next = if index == list.len {
            ptr::null_mut()
        } else {
            list.node_at(index)
        };
        Cursor {
            cid: list.cid,
            next,
            next_index: index,
            last_returned: ptr::null_mut(),
            version: list.version,
        }
    }

    /// The version snapshot must match before any stored pointer is
    /// dereferenced: a match means the chain has not changed since
    /// the snapshot, so the pointers are still live nodes of `list`.
    fn check_sync(&self, list: &LinkedList<T>) -> Result<(), ListError> {
        if self.cid != list.cid || self.version != list.version {
            return Err(ListError::StructuralChange);
        }
        Ok(())
    }

    /// Returns true if a forward move would cross an element. Never
    /// fails; staleness is reported by the move itself.
    pub fn has_next(&self, list: &LinkedList<T>) -> bool {
        self.next_index < list.len
    }

    /// Returns true if a backward move would cross an element.
    pub fn has_previous(&self) -> bool {
        self.next_index > 0
    }

    /// The index of the element a forward move would return; equals
    /// the list length when the cursor is past the end.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// The index of the element a backward move would return, or
    /// `None` at the front of the list.
    pub fn previous_index(&self) -> Option<usize> {
        self.next_index.checked_sub(1)
    }

    /// Moves forward over one element and returns it, or `Ok(None)`
    /// at the end of the list.
    pub fn next<'a>(&mut self, list: &'a LinkedList<T>) -> Result<Option<&'a T>, ListError> {
        self.check_sync(list)?;
        if self.next_index >= list.len {
            return Ok(None);
        }
        unsafe {
            self.last_returned = self.next;
            self.next = (*self.next).next;
            self.next_index += 1;
            Ok(Some(&(*self.last_returned).val))
        }
    }

    /// Moves backward over one element and returns it, or `Ok(None)`
    /// at the front of the list.
    pub fn previous<'a>(&mut self, list: &'a LinkedList<T>) -> Result<Option<&'a T>, ListError> {
        self.check_sync(list)?;
        if self.next_index == 0 {
            return Ok(None);
        }
        unsafe {
            self.next = if self.next.is_null() {
                list.tail
            } else {
                (*self.next).prev
            };
            self.last_returned = self.next;
            self.next_index -= 1;
            Ok(Some(&(*self.last_returned).val))
        }
    }

    /// Removes the element last crossed by `next` or `previous` and
    /// returns it. Fails with [`ListError::IllegalCursorState`] if no
    /// element has been crossed since the cursor was created or since
    /// the last `remove` or `insert`. The cursor re-synchronizes to
    /// the mutated list and the traversal continues from the removal
    /// point.
    pub fn remove(&mut self, list: &mut LinkedList<T>) -> Result<T, ListError> {
        self.check_sync(list)?;
        if self.last_returned.is_null() {
            return Err(ListError::IllegalCursorState);
        }
        let last_next = unsafe { (*self.last_returned).next };
        let val = list.unlink_ptr(self.last_returned);
        if self.next == self.last_returned {
            // removed after `previous`: the gap slides onto the
            // removed node's successor
            self.next = last_next;
        } else {
            self.next_index -= 1;
        }
        self.last_returned = ptr::null_mut();
        self.version = list.version;
        Ok(val)
    }

    /// Replaces the element last crossed by `next` or `previous`.
    /// Payload-only: the list's structural version does not change
    /// and other traversals stay valid.
    pub fn set(&mut self, list: &mut LinkedList<T>, val: T) -> Result<(), ListError> {
        self.check_sync(list)?;
        if self.last_returned.is_null() {
            return Err(ListError::IllegalCursorState);
        }
        unsafe {
            (*self.last_returned).val = val;
        }
        Ok(())
    }

    /// Inserts an element at the cursor's position. The cursor ends
    /// up after the new element, so repeated inserts preserve input
    /// order; an immediately following `previous` returns the new
    /// element. Clears the crossed-element state, so `remove`/`set`
    /// need a fresh move first.
    pub fn insert(&mut self, list: &mut LinkedList<T>, val: T) -> Result<(), ListError> {
        self.check_sync(list)?;
        self.last_returned = ptr::null_mut();
        if self.next.is_null() {
            list.link_tail(val);
        } else {
            list.link_before(val, self.next);
        }
        self.next_index += 1;
        self.version = list.version;
        Ok(())
    }
}

/// Renders tail-to-head traversal of a [`LinkedList`] as forward
/// `next` calls. A thin adapter over a [`Cursor`] parked past the
/// last element; shares its fail-fast behavior.
///
/// # Examples
/// ```
/// use corvid::lists::LinkedList;
///
/// let list: LinkedList<i32> = (1..=3).collect();
/// let mut desc = list.descending_cursor();
/// assert_eq!(desc.next(&list), Ok(Some(&3)));
/// assert_eq!(desc.next(&list), Ok(Some(&2)));
/// assert_eq!(desc.next(&list), Ok(Some(&1)));
/// assert_eq!(desc.next(&list), Ok(None));
/// ```
#[derive(Debug)]
pub struct DescendingCursor<T> {
    inner: Cursor<T>,
}

impl<T> DescendingCursor<T> {
    pub(super) fn new(list: &LinkedList<T>) -> DescendingCursor<T> {
        DescendingCursor {
            inner: Cursor::new(list, list.len),
        }
    }

    /// Returns true if another element remains toward the head.
    pub fn has_next(&self) -> bool {
        self.inner.has_previous()
    }

    /// Returns the next element walking toward the head, or
    /// `Ok(None)` when the walk is done.
    pub fn next<'a>(&mut self, list: &'a LinkedList<T>) -> Result<Option<&'a T>, ListError> {
        self.inner.previous(list)
    }

    /// Removes the element last returned by `next`.
    pub fn remove(&mut self, list: &mut LinkedList<T>) -> Result<T, ListError> {
        self.inner.remove(list)
    }
}
