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
use crate::linkedlist::{
    cursor::{Cursor, DescendingCursor},
    fl,
    iter::{IntoIter, Iter, IterMut},
    node::ChainNode,
    split::Splitter,
};
use core::fmt;
use core::iter::FromIterator;
use core::mem;
use core::ptr;
use core::sync::atomic::{AtomicUsize, Ordering};

static NEXT_CID: AtomicUsize = AtomicUsize::new(1);

/// Process-unique container id. Detached cursors and splitters carry
/// it so they cannot be replayed against a different list.
fn next_cid() -> usize {
    NEXT_CID.fetch_add(1, Ordering::Relaxed)
}

/// A doubly linked list that owns its nodes in a preallocated arena
/// and can push and pop elements at either end in constant time.
///
/// Beyond the `std::collections::LinkedList` surface this list offers
/// indexed access (`get`, `set`, `insert`, `remove_at`) that walks
/// from the nearer end, value search (`index_of`, `remove`), queue
/// and stack shortcuts, and two traversal objects:
///
/// * a [`Cursor`] — a bidirectional, position-tracking traversal that
///   can insert and remove at its position, and
/// * a [`Splitter`] — a lazy producer of prefix batches for chunked
///   consumption.
///
/// Both are detached from the list (they hold no borrow) and validate
/// a structural version snapshot on every call, so a traversal that
/// races a structural change fails with
/// [`ListError::StructuralChange`] instead of walking a stale chain.
/// Mutations made *through* a cursor re-synchronize that cursor.
///
/// Payload-only writes (`set`, `get_mut`, `iter_mut`, cursor `set`)
/// are not structural changes and do not invalidate traversals.
///
/// The list is not internally synchronized; it assumes a single
/// writer and non-concurrent mutation.
///
/// # Getting Started
///
/// ```
/// use corvid::lists::LinkedList;
///
/// let mut list = LinkedList::with_capacity(10);
/// for i in 0..10 {
///     list.push_back(i);
/// }
///
/// assert_eq!(list.get(3), Ok(&3));
/// assert_eq!(list.index_of(&7), Some(7));
/// ```
pub struct LinkedList<T> {
    pub(super) cid: usize,
    pub(super) head: *mut ChainNode<T>,
    pub(super) tail: *mut ChainNode<T>,
    pub(super) len: usize,
    pub(super) version: u64,
    fl: fl::FreeList<T>,
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LinkedList<T> {
    /// Creates an empty list with a default capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use corvid::lists::LinkedList;
    /// let list = LinkedList::<u8>::new();
    /// assert!(list.is_empty());
    /// ```
    pub fn new() -> LinkedList<T> {
        LinkedList::with_capacity(8)
    }

    /// Creates an empty list with the specified capacity. The arena
    /// doubles whenever it is exhausted and never shrinks on removal;
    /// all memory is returned when the list is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::<u8>::with_capacity(10);
    /// for i in 0..10 {
    ///     // no allocation happens here
    ///     list.push_back(i);
    /// }
    /// assert_eq!(list.capacity(), 10);
    ///
    /// list.push_back(10);
    /// assert_eq!(list.capacity(), 20);
    /// ```
    pub fn with_capacity(capacity: usize) -> LinkedList<T> {
        LinkedList {
            cid: next_cid(),
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
            len: 0,
            version: 0,
            fl: fl::FreeList::new(capacity),
        }
    }

    /// Returns the number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the list can hold before new
    /// memory is allocated.
    pub fn capacity(&self) -> usize {
        self.len + self.fl.len()
    }

    ////////////////////
    // End operations
    ////////////////////

    /// Adds an element to the front (head) of the list.
    ///
    /// This operation completes in *O*(*1*) time.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_front(1);
    /// list.push_front(2);
    /// assert_eq!(list.front(), Some(&2));
    /// ```
    pub fn push_front(&mut self, elem: T) {
        self.link_head(elem);
    }

    /// Adds an element to the back (tail) of the list.
    ///
    /// This operation completes in *O*(*1*) time.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    pub fn push_back(&mut self, elem: T) {
        self.link_tail(elem);
    }

    /// Removes and returns the front element, or `None` if the list
    /// is empty.
    ///
    /// This operation completes in *O*(*1*) time.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.pop_front(), Some(1));
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        if self.head.is_null() {
            return None;
        }
        Some(self.unlink_ptr(self.head))
    }

    /// Removes and returns the back element, or `None` if the list is
    /// empty.
    ///
    /// This operation completes in *O*(*1*) time.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.pop_back(), Some(2));
    /// assert_eq!(list.pop_back(), Some(1));
    /// assert_eq!(list.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        if self.tail.is_null() {
            return None;
        }
        Some(self.unlink_ptr(self.tail))
    }

    /// Returns a reference to the front element, or `None` if the
    /// list is empty.
    pub fn front(&self) -> Option<&T> {
        if self.head.is_null() {
            return None;
        }
        unsafe { Some(&(*self.head).val) }
    }

    /// Returns a mutable reference to the front element, or `None` if
    /// the list is empty. Writing through it is a payload-only
    /// mutation, not a structural change.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        if self.head.is_null() {
            return None;
        }
        unsafe { Some(&mut (*self.head).val) }
    }

    /// Returns a reference to the back element, or `None` if the list
    /// is empty.
    pub fn back(&self) -> Option<&T> {
        if self.tail.is_null() {
            return None;
        }
        unsafe { Some(&(*self.tail).val) }
    }

    /// Returns a mutable reference to the back element, or `None` if
    /// the list is empty.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        if self.tail.is_null() {
            return None;
        }
        unsafe { Some(&mut (*self.tail).val) }
    }

    /// Returns a reference to the front element, failing with
    /// [`ListError::Empty`] on an empty list. This is the raising
    /// counterpart of [`front`](#method.front).
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::{LinkedList, ListError};
    /// let mut list = LinkedList::new();
    /// assert_eq!(list.first(), Err(ListError::Empty));
    /// list.push_back("a");
    /// assert_eq!(list.first(), Ok(&"a"));
    /// ```
    pub fn first(&self) -> Result<&T, ListError> {
        self.front().ok_or(ListError::Empty)
    }

    /// Returns a reference to the back element, failing with
    /// [`ListError::Empty`] on an empty list.
    pub fn last(&self) -> Result<&T, ListError> {
        self.back().ok_or(ListError::Empty)
    }

    /// Removes and returns the front element, failing with
    /// [`ListError::Empty`] on an empty list. This is the raising
    /// counterpart of [`pop_front`](#method.pop_front).
    pub fn remove_first(&mut self) -> Result<T, ListError> {
        self.pop_front().ok_or(ListError::Empty)
    }

    /// Removes and returns the back element, failing with
    /// [`ListError::Empty`] on an empty list.
    pub fn remove_last(&mut self) -> Result<T, ListError> {
        self.pop_back().ok_or(ListError::Empty)
    }

    ////////////////////
    // Positional access
    ////////////////////

    /// Returns a reference to the element at `index`.
    ///
    /// Walks from the head when `index` is in the front half of the
    /// list and backward from the tail otherwise, so the walk never
    /// exceeds `len / 2` steps.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::{LinkedList, ListError};
    /// let mut list = LinkedList::new();
    /// list.push_back("a");
    /// list.push_back("b");
    ///
    /// assert_eq!(list.get(0), Ok(&"a"));
    /// assert_eq!(
    ///     list.get(5),
    ///     Err(ListError::IndexOutOfRange { index: 5, len: 2 })
    /// );
    /// ```
    pub fn get(&self, index: usize) -> Result<&T, ListError> {
        self.check_element_index(index)?;
        unsafe { Ok(&(*self.node_at(index)).val) }
    }

    /// Returns a mutable reference to the element at `index`.
    /// Payload-only; does not bump the structural version.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, ListError> {
        self.check_element_index(index)?;
        unsafe { Ok(&mut (*self.node_at(index)).val) }
    }

    /// Replaces the element at `index` and returns the previous
    /// value. Payload-only; does not bump the structural version.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// assert_eq!(list.set(0, 9), Ok(1));
    /// assert_eq!(list.get(0), Ok(&9));
    /// ```
    pub fn set(&mut self, index: usize, elem: T) -> Result<T, ListError> {
        self.check_element_index(index)?;
        unsafe { Ok(mem::replace(&mut (*self.node_at(index)).val, elem)) }
    }

    /// Inserts an element before the current element at `index`,
    /// shifting the logical index of everything after it by one.
    /// `index == len` appends at the tail.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back("a");
    /// list.push_back("c");
    /// list.insert(1, "b").unwrap();
    /// assert_eq!(list.to_vec(), vec!["a", "b", "c"]);
    /// ```
    pub fn insert(&mut self, index: usize, elem: T) -> Result<(), ListError> {
        self.check_position_index(index)?;
        if index == self.len {
            self.link_tail(elem);
        } else {
            let succ = self.node_at(index);
            self.link_before(elem, succ);
        }
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back("1");
    /// list.push_back("2");
    /// list.push_back("3");
    /// assert_eq!(list.remove_at(1), Ok("2"));
    /// assert_eq!(list.to_vec(), vec!["1", "3"]);
    /// ```
    pub fn remove_at(&mut self, index: usize) -> Result<T, ListError> {
        self.check_element_index(index)?;
        let ptr = self.node_at(index);
        Ok(self.unlink_ptr(ptr))
    }

    ////////////////////
    // Search
    ////////////////////

    /// Returns true if the list contains an element equal to the
    /// given value.
    ///
    /// This operation completes in *O*(*n*) time.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        self.index_of(x).is_some()
    }

    /// Returns the index of the first element equal to the given
    /// value, or `None` if the list contains no such element.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back("a");
    /// list.push_back("b");
    /// assert_eq!(list.index_of(&"b"), Some(1));
    /// assert_eq!(list.index_of(&"z"), None);
    /// ```
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        self.iter().position(|e| e == x)
    }

    /// Returns the index of the last element equal to the given
    /// value, scanning backward from the tail, or `None` if absent.
    pub fn last_index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq<T>,
    {
        let mut index = self.len;
        let mut cur = self.tail;
        while !cur.is_null() {
            index -= 1;
            unsafe {
                if (*cur).val == *x {
                    return Some(index);
                }
                cur = (*cur).prev;
            }
        }
        None
    }

    /// Removes the first element equal to the given value, scanning
    /// forward from the head. Returns whether an element was removed;
    /// the list is unchanged when it returns false.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    /// list.push_back(1);
    /// assert!(list.remove(&1));
    /// assert_eq!(list.to_vec(), vec![2, 1]);
    /// ```
    pub fn remove(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        let mut cur = self.head;
        while !cur.is_null() {
            unsafe {
                if (*cur).val == *x {
                    self.unlink_ptr(cur);
                    return true;
                }
                cur = (*cur).next;
            }
        }
        false
    }

    /// Removes the last element equal to the given value, scanning
    /// backward from the tail. Returns whether an element was
    /// removed.
    pub fn remove_last_occurrence(&mut self, x: &T) -> bool
    where
        T: PartialEq<T>,
    {
        let mut cur = self.tail;
        while !cur.is_null() {
            unsafe {
                if (*cur).val == *x {
                    self.unlink_ptr(cur);
                    return true;
                }
                cur = (*cur).prev;
            }
        }
        false
    }

    ////////////////////
    // Bulk operations
    ////////////////////

    /// Splices every value yielded by `values`, in order, before the
    /// element at position `index` (`index == len` appends). The
    /// whole splice is a single structural change: one version bump.
    /// An empty input leaves the list untouched and returns
    /// `Ok(false)`.
    ///
    /// The input is consumed by value, so it cannot be mutated by
    /// another party while the splice runs.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// list.push_back(4);
    /// assert_eq!(list.insert_all(1, vec![2, 3]), Ok(true));
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn insert_all<I>(&mut self, index: usize, values: I) -> Result<bool, ListError>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_position_index(index)?;

        let mut values = values.into_iter().peekable();
        if values.peek().is_none() {
            return Ok(false);
        }

        let (mut pred, succ) = if index == self.len {
            (self.tail, ptr::null_mut())
        } else {
            let succ = self.node_at(index);
            unsafe { ((*succ).prev, succ) }
        };

        let mut added = 0;
        for val in values {
            let raw = self.fl.acquire(val);
            unsafe {
                (*raw).prev = pred;
                if pred.is_null() {
                    self.head = raw;
                } else {
                    (*pred).next = raw;
                }
            }
            pred = raw;
            added += 1;
        }

        unsafe {
            if succ.is_null() {
                self.tail = pred;
            } else {
                (*pred).next = succ;
                (*succ).prev = pred;
            }
        }

        self.len += added;
        self.version += 1;
        Ok(true)
    }

    /// Moves all nodes from `other` to the end of this list in
    /// constant time, leaving `other` empty but usable. Counts as a
    /// structural change for both lists. Neither list's allocated
    /// capacity changes.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut a = LinkedList::new();
    /// a.push_back(0);
    /// let mut b = LinkedList::new();
    /// b.push_back(1);
    /// b.push_back(2);
    ///
    /// a.append(&mut b);
    /// assert_eq!(a.to_vec(), vec![0, 1, 2]);
    /// assert!(b.is_empty());
    /// ```
    pub fn append(&mut self, other: &mut Self) {
        if other.head.is_null() {
            return;
        }
        unsafe {
            if self.tail.is_null() {
                self.head = other.head;
            } else {
                (*self.tail).next = other.head;
                (*other.head).prev = self.tail;
            }
        }
        self.tail = other.tail;
        self.len += other.len;
        self.version += 1;

        other.head = ptr::null_mut();
        other.tail = ptr::null_mut();
        other.len = 0;
        other.version += 1;
    }

    /// Removes and drops every element, resetting the list to empty
    /// with a single version bump. Allocated capacity is unaffected.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::with_capacity(10);
    /// list.push_back(1);
    /// list.push_back(2);
    /// list.clear();
    /// assert!(list.is_empty());
    /// assert_eq!(list.capacity(), 10);
    /// ```
    pub fn clear(&mut self) {
        let mut cur = self.head;
        while !cur.is_null() {
            unsafe {
                let next = (*cur).next;
                drop(self.fl.release(cur));
                cur = next;
            }
        }
        self.head = ptr::null_mut();
        self.tail = ptr::null_mut();
        self.len = 0;
        self.version += 1;
    }

    /// Produces an ordered snapshot of all elements at this instant,
    /// independent of any further mutation of the list.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        for val in self.iter() {
            out.push(val.clone());
        }
        out
    }

    ////////////////////
    // Queue / stack shortcuts
    ////////////////////

    /// Appends at the tail (queue convention). Equivalent to
    /// [`push_back`](#method.push_back).
    pub fn offer(&mut self, elem: T) {
        self.push_back(elem);
    }

    /// Removes and returns the head, or `None` if the list is empty
    /// (queue convention). Equivalent to
    /// [`pop_front`](#method.pop_front).
    pub fn poll(&mut self) -> Option<T> {
        self.pop_front()
    }

    /// Returns the head without removing it, or `None` if the list is
    /// empty. Equivalent to [`front`](#method.front).
    pub fn peek(&self) -> Option<&T> {
        self.front()
    }

    /// Returns the head without removing it, failing with
    /// [`ListError::Empty`] on an empty list. Equivalent to
    /// [`first`](#method.first).
    pub fn element(&self) -> Result<&T, ListError> {
        self.first()
    }

    /// Pushes onto the front (stack convention). Equivalent to
    /// [`push_front`](#method.push_front).
    pub fn push(&mut self, elem: T) {
        self.push_front(elem);
    }

    /// Pops from the front (stack convention), failing with
    /// [`ListError::Empty`] on an empty list. Equivalent to
    /// [`remove_first`](#method.remove_first).
    pub fn pop(&mut self) -> Result<T, ListError> {
        self.remove_first()
    }

    ////////////////////
    // Traversal
    ////////////////////

    /// Returns a borrowed double-ended iterator over the list.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next_back(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns a borrowed double-ended iterator with mutable
    /// references. Writes through it are payload-only.
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// for e in list.iter_mut() {
    ///     *e += 100;
    /// }
    /// assert_eq!(list.to_vec(), vec![101, 102]);
    /// ```
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Returns a cursor positioned before the first element.
    ///
    /// The cursor is detached: it holds no borrow, and every cursor
    /// call takes the list by reference and first validates the
    /// cursor's version snapshot. See [`Cursor`].
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::LinkedList;
    /// let mut list = LinkedList::new();
    /// list.push_back("a");
    /// list.push_back("b");
    ///
    /// let mut cur = list.cursor();
    /// assert_eq!(cur.next(&list), Ok(Some(&"a")));
    /// assert_eq!(cur.next(&list), Ok(Some(&"b")));
    /// assert_eq!(cur.next(&list), Ok(None));
    /// ```
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::new(self, 0)
    }

    /// Returns a cursor positioned before the element at `index`
    /// (`index == len` positions it past the end).
    pub fn cursor_at(&self, index: usize) -> Result<Cursor<T>, ListError> {
        self.check_position_index(index)?;
        Ok(Cursor::new(self, index))
    }

    /// Returns a descending adapter that renders tail-to-head
    /// traversal as forward `next` calls.
    pub fn descending_cursor(&self) -> DescendingCursor<T> {
        DescendingCursor::new(self)
    }

    /// Returns a splitting traversal over the list for batch or
    /// chunked consumption. See [`Splitter`].
    pub fn splitter(&self) -> Splitter<T> {
        Splitter::new(self)
    }

    ////////////////////
    // Chain primitives
    ////////////////////

    /// Splices a new node at the head. O(1); bumps len and version.
    fn link_head(&mut self, elem: T) -> *mut ChainNode<T> {
        let raw = self.fl.acquire(elem);
        unsafe {
            if !self.head.is_null() {
                (*self.head).prev = raw;
                (*raw).next = self.head;
            }
        }
        if self.tail.is_null() {
            self.tail = raw;
        }
        self.head = raw;
        self.len += 1;
        self.version += 1;
        raw
    }

    /// Splices a new node at the tail. O(1); bumps len and version.
    pub(super) fn link_tail(&mut self, elem: T) -> *mut ChainNode<T> {
        let raw = self.fl.acquire(elem);
        unsafe {
            if !self.tail.is_null() {
                (*self.tail).next = raw;
                (*raw).prev = self.tail;
            }
        }
        if self.head.is_null() {
            self.head = raw;
        }
        self.tail = raw;
        self.len += 1;
        self.version += 1;
        raw
    }

    /// Splices a new node immediately before `succ`, which must be
    /// non-null and on this chain.
    pub(super) fn link_before(&mut self, elem: T, succ: *mut ChainNode<T>) -> *mut ChainNode<T> {
        let raw = self.fl.acquire(elem);
        unsafe {
            let pred = (*succ).prev;
            (*raw).prev = pred;
            (*raw).next = succ;
            (*succ).prev = raw;
            if pred.is_null() {
                self.head = raw;
            } else {
                (*pred).next = raw;
            }
        }
        self.len += 1;
        self.version += 1;
        raw
    }

    /// Unlinks the node wherever it sits, repairing neighbor links,
    /// and returns its payload. The node must be non-null and on this
    /// chain. The slot goes back to the arena.
    pub(super) fn unlink_ptr(&mut self, ptr: *mut ChainNode<T>) -> T {
        debug_assert!(!ptr.is_null());
        unsafe {
            if !(*ptr).next.is_null() {
                (*(*ptr).next).prev = (*ptr).prev;
            }
            if !(*ptr).prev.is_null() {
                (*(*ptr).prev).next = (*ptr).next;
            }
            if self.head == ptr {
                self.head = (*ptr).next;
            }
            if self.tail == ptr {
                self.tail = (*ptr).prev;
            }
            self.len -= 1;
            self.version += 1;
            self.fl.release(ptr)
        }
    }

    /// Returns the node at the given element index, walking from the
    /// head for the front half and backward from the tail otherwise.
    /// Callers must have bounds-checked `index`.
    pub(super) fn node_at(&self, index: usize) -> *mut ChainNode<T> {
        debug_assert!(index < self.len);
        unsafe {
            if index < self.len / 2 {
                let mut x = self.head;
                for _ in 0..index {
                    x = (*x).next;
                }
                x
            } else {
                let mut x = self.tail;
                for _ in index + 1..self.len {
                    x = (*x).prev;
                }
                x
            }
        }
    }

    fn check_element_index(&self, index: usize) -> Result<(), ListError> {
        if index >= self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_position_index(&self, index: usize) -> Result<(), ListError> {
        if index > self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    /// Shallow copy: a new list with its own chain and its own
    /// version baseline, holding clones of the elements in order.
    fn clone(&self) -> Self {
        let mut out = LinkedList::with_capacity(self.len);
        out.extend(self.iter().cloned());
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Extend<T> for LinkedList<T> {
    /// Splices at the tail in one pass; a single structural change
    /// regardless of how many elements the iterator yields.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let at = self.len;
        // position `len` is always valid
        let _ = self.insert_all(at, iter);
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        list.extend(iter);
        list
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Walks the raw chain and asserts every §3-style link invariant:
    /// emptiness agreement, prev/next symmetry, node count, and
    /// termination at the tail.
    fn assert_chain<T>(ll: &LinkedList<T>) {
        if ll.len == 0 {
            assert!(ll.head.is_null());
            assert!(ll.tail.is_null());
            return;
        }
        assert!(!ll.head.is_null());
        assert!(!ll.tail.is_null());
        unsafe {
            let mut count = 0;
            let mut prev: *mut ChainNode<T> = ptr::null_mut();
            let mut cur = ll.head;
            while !cur.is_null() {
                assert_eq!((*cur).prev, prev);
                prev = cur;
                cur = (*cur).next;
                count += 1;
            }
            assert_eq!(count, ll.len);
            assert_eq!(prev, ll.tail);
        }
    }

    fn list_of(vals: &[i32]) -> LinkedList<i32> {
        vals.iter().cloned().collect()
    }

    #[test]
    fn test_new() {
        let ll1 = LinkedList::<u8>::new();
        let ll2 = LinkedList::<u8>::new();
        assert!(ll1.cid < ll2.cid);
        assert_chain(&ll1);
    }

    #[test]
    fn test_push_pop_ends() {
        let mut ll = LinkedList::new();
        ll.push_back(2);
        assert_chain(&ll);
        ll.push_front(1);
        assert_chain(&ll);
        ll.push_back(3);
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![1, 2, 3]);

        assert_eq!(ll.pop_front(), Some(1));
        assert_chain(&ll);
        assert_eq!(ll.pop_back(), Some(3));
        assert_chain(&ll);
        assert_eq!(ll.pop_back(), Some(2));
        assert_chain(&ll);
        assert_eq!(ll.pop_back(), None);
        assert_eq!(ll.pop_front(), None);
        assert_chain(&ll);
    }

    #[test]
    fn test_get_set() {
        let mut ll = list_of(&[10, 20, 30]);
        assert_eq!(ll.get(0), Ok(&10));
        assert_eq!(ll.get(2), Ok(&30));
        assert_eq!(ll.get(3), Err(ListError::IndexOutOfRange { index: 3, len: 3 }));

        let v_before = ll.version;
        assert_eq!(ll.set(1, 21), Ok(20));
        assert_eq!(ll.get(1), Ok(&21));
        // payload-only write is not a structural change
        assert_eq!(ll.version, v_before);
        assert_chain(&ll);

        *ll.get_mut(0).unwrap() = 11;
        assert_eq!(ll.get(0), Ok(&11));
        assert_eq!(ll.version, v_before);
    }

    #[test]
    fn test_insert() {
        let mut ll = list_of(&[1, 3]);
        ll.insert(1, 2).unwrap();
        assert_chain(&ll);
        ll.insert(0, 0).unwrap();
        assert_chain(&ll);
        ll.insert(4, 4).unwrap();
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![0, 1, 2, 3, 4]);

        assert_eq!(
            ll.insert(6, 9),
            Err(ListError::IndexOutOfRange { index: 6, len: 5 })
        );
        assert_eq!(ll.len(), 5);
    }

    #[test]
    fn test_remove_at() {
        let mut ll = list_of(&[1, 2, 3]);
        assert_eq!(ll.remove_at(1), Ok(2));
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![1, 3]);
        assert_eq!(ll.remove_at(1), Ok(3));
        assert_chain(&ll);
        assert_eq!(ll.remove_at(0), Ok(1));
        assert_chain(&ll);
        assert_eq!(
            ll.remove_at(0),
            Err(ListError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_search() {
        let ll = list_of(&[5, 6, 5, 7]);
        assert_eq!(ll.index_of(&5), Some(0));
        assert_eq!(ll.last_index_of(&5), Some(2));
        assert_eq!(ll.index_of(&7), Some(3));
        assert_eq!(ll.index_of(&9), None);
        assert_eq!(ll.last_index_of(&9), None);
        assert!(ll.contains(&6));
        assert!(!ll.contains(&9));
    }

    #[test]
    fn test_index_of_then_get_agree() {
        let ll = list_of(&[4, 8, 15, 16, 23, 42]);
        for v in &[4, 8, 15, 16, 23, 42] {
            let i = ll.index_of(v).unwrap();
            assert_eq!(ll.get(i), Ok(v));
        }
    }

    #[test]
    fn test_remove_occurrences() {
        let mut ll = list_of(&[1, 2, 1, 3, 1]);
        assert!(ll.remove(&1));
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![2, 1, 3, 1]);

        assert!(ll.remove_last_occurrence(&1));
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![2, 1, 3]);

        assert!(!ll.remove(&9));
        assert_eq!(ll.len(), 3);
    }

    #[test]
    fn test_insert_all() {
        let mut ll = list_of(&[1, 5]);
        let v_before = ll.version;
        assert_eq!(ll.insert_all(1, vec![2, 3, 4]), Ok(true));
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![1, 2, 3, 4, 5]);
        // one bump for the whole splice
        assert_eq!(ll.version, v_before + 1);

        // at the head and at the tail
        assert_eq!(ll.insert_all(0, vec![0]), Ok(true));
        assert_eq!(ll.insert_all(6, vec![6]), Ok(true));
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![0, 1, 2, 3, 4, 5, 6]);

        // empty input: no structural change, no bump
        let v_before = ll.version;
        assert_eq!(ll.insert_all(3, Vec::new()), Ok(false));
        assert_eq!(ll.version, v_before);
        assert_eq!(ll.len(), 7);

        assert_eq!(
            ll.insert_all(9, vec![9]),
            Err(ListError::IndexOutOfRange { index: 9, len: 7 })
        );
    }

    #[test]
    fn test_insert_all_into_empty() {
        let mut ll = LinkedList::new();
        assert_eq!(ll.insert_all(0, vec![1, 2, 3]), Ok(true));
        assert_chain(&ll);
        assert_eq!(ll.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_round_trip_snapshot() {
        let mut ll = list_of(&[3, 1, 4, 1, 5]);
        let snap = ll.to_vec();
        ll.clear();
        assert!(ll.is_empty());
        assert_eq!(ll.insert_all(0, snap), Ok(true));
        assert_eq!(ll.to_vec(), vec![3, 1, 4, 1, 5]);
        assert_chain(&ll);
    }

    #[test]
    fn test_clear() {
        let mut ll = LinkedList::with_capacity(10);
        ll.push_back(1);
        ll.push_back(2);
        ll.push_back(3);
        let v_before = ll.version;
        ll.clear();
        assert_chain(&ll);
        assert_eq!(ll.len(), 0);
        assert_eq!(ll.capacity(), 10);
        assert_eq!(ll.version, v_before + 1);
    }

    #[test]
    fn test_append() {
        let mut a = list_of(&[0]);
        let mut b = list_of(&[1, 2]);
        a.append(&mut b);
        assert_chain(&a);
        assert_chain(&b);
        assert_eq!(a.to_vec(), vec![0, 1, 2]);
        assert!(b.is_empty());

        // appending an empty list changes nothing
        let v_before = a.version;
        a.append(&mut b);
        assert_eq!(a.version, v_before);

        // the emptied list stays usable
        b.push_back(7);
        assert_eq!(b.to_vec(), vec![7]);

        // into an empty destination
        let mut c = LinkedList::new();
        c.append(&mut a);
        assert_chain(&c);
        assert_eq!(c.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_first_last_conventions() {
        let mut ll = LinkedList::<&str>::new();
        // raising convention
        assert_eq!(ll.first(), Err(ListError::Empty));
        assert_eq!(ll.last(), Err(ListError::Empty));
        assert_eq!(ll.remove_first(), Err(ListError::Empty));
        assert_eq!(ll.remove_last(), Err(ListError::Empty));
        assert_eq!(ll.element(), Err(ListError::Empty));
        assert_eq!(ll.pop(), Err(ListError::Empty));
        // sentinel convention
        assert_eq!(ll.front(), None);
        assert_eq!(ll.back(), None);
        assert_eq!(ll.pop_front(), None);
        assert_eq!(ll.poll(), None);
        assert_eq!(ll.peek(), None);

        ll.push_back("a");
        ll.push_back("b");
        assert_eq!(ll.first(), Ok(&"a"));
        assert_eq!(ll.last(), Ok(&"b"));
        assert_eq!(ll.remove_last(), Ok("b"));
        assert_eq!(ll.remove_first(), Ok("a"));
        assert!(ll.is_empty());
    }

    #[test]
    fn test_queue_and_stack_shortcuts() {
        let mut q = LinkedList::new();
        q.offer(1);
        q.offer(2);
        assert_eq!(q.peek(), Some(&1));
        assert_eq!(q.element(), Ok(&1));
        assert_eq!(q.poll(), Some(1));
        assert_eq!(q.poll(), Some(2));
        assert_eq!(q.poll(), None);

        let mut s = LinkedList::new();
        s.push(1);
        s.push(2);
        assert_eq!(s.pop(), Ok(2));
        assert_eq!(s.pop(), Ok(1));
        assert_eq!(s.pop(), Err(ListError::Empty));
    }

    #[test]
    fn test_scenario_add_then_search() {
        let mut ll = LinkedList::new();
        ll.push_back("a");
        ll.push_back("b");
        ll.push_back("c");
        assert_eq!(ll.index_of(&"b"), Some(1));
        assert_eq!(ll.get(0), Ok(&"a"));
    }

    #[test]
    fn test_scenario_push_front_then_remove_last() {
        let mut ll = LinkedList::new();
        ll.push_back("a");
        ll.push_back("b");
        ll.push_front("x");
        assert_eq!(ll.remove_last(), Ok("b"));
        assert_eq!(ll.to_vec(), vec!["x", "a"]);
        assert_chain(&ll);
    }

    #[test]
    fn test_version_bumps_once_per_structural_change() {
        let mut ll = LinkedList::new();
        let mut expected = ll.version;
        ll.push_back(1);
        expected += 1;
        assert_eq!(ll.version, expected);
        ll.push_front(0);
        expected += 1;
        assert_eq!(ll.version, expected);
        ll.insert(1, 9).unwrap();
        expected += 1;
        assert_eq!(ll.version, expected);
        ll.remove_at(1).unwrap();
        expected += 1;
        assert_eq!(ll.version, expected);
        // reads leave the version alone
        let _ = ll.get(0);
        let _ = ll.index_of(&1);
        let _ = ll.to_vec();
        assert_eq!(ll.version, expected);
        // a failed bounds check mutates nothing
        assert!(ll.insert(9, 9).is_err());
        assert_eq!(ll.version, expected);
    }

    #[test]
    fn test_clone_is_independent() {
        let ll = list_of(&[1, 2, 3]);
        let mut copy = ll.clone();
        assert_eq!(copy.to_vec(), vec![1, 2, 3]);
        assert_ne!(copy.cid, ll.cid);
        copy.push_back(4);
        assert_eq!(ll.to_vec(), vec![1, 2, 3]);
        assert_chain(&copy);
        assert_chain(&ll);
    }

    #[test]
    fn test_capacity_reuse() {
        let mut ll = LinkedList::with_capacity(4);
        assert_eq!(ll.capacity(), 4);
        for i in 0..4 {
            ll.push_back(i);
        }
        assert_eq!(ll.capacity(), 4);
        // freed slots are reused, not deallocated
        ll.pop_front();
        ll.push_back(9);
        assert_eq!(ll.capacity(), 4);
        // exceeding capacity doubles it
        ll.push_back(10);
        assert_eq!(ll.capacity(), 8);
    }

    #[test]
    fn test_capacity_zero() {
        let mut ll = LinkedList::with_capacity(0);
        assert_eq!(ll.capacity(), 0);
        for i in 0..5 {
            ll.push_front(i);
        }
        assert_eq!(ll.len(), 5);
        assert_eq!(ll.capacity(), 5);
    }

    #[test]
    fn test_debug_format() {
        let ll = list_of(&[1, 2]);
        assert_eq!(format!("{:?}", ll), "[1, 2]");
    }

    #[test]
    fn test_node_at_walks_from_nearer_end() {
        // exercises both walk directions across the midpoint
        let ll = list_of(&[0, 1, 2, 3, 4, 5, 6]);
        for i in 0..7 {
            assert_eq!(ll.get(i), Ok(&(i as i32)));
        }
    }

    #[test]
    fn test_drop_owned_payloads() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct Counted(Rc<Cell<usize>>);
        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        {
            let mut ll = LinkedList::new();
            for _ in 0..3 {
                ll.push_back(Counted(Rc::clone(&drops)));
            }
            ll.pop_front();
            assert_eq!(drops.get(), 1);
        }
        assert_eq!(drops.get(), 3);
    }
}
