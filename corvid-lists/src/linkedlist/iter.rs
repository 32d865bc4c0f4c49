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

use crate::linkedlist::{list::LinkedList, node::ChainNode};
use core::marker::PhantomData;

/// A borrowed iterator over the elements of a [`LinkedList`], front
/// to back. Double-ended and exactly sized. The borrow it holds
/// makes staleness impossible, unlike the detached cursor.
#[derive(Debug)]
pub struct Iter<'a, T> {
    head: *mut ChainNode<T>,
    tail: *mut ChainNode<T>,
    len: usize,
    marker: PhantomData<&'a ChainNode<T>>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(list: &'a LinkedList<T>) -> Iter<'a, T> {
        Iter {
            head: list.head,
            tail: list.tail,
            len: list.len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        unsafe {
            let node = self.head;
            self.head = (*node).next;
            self.len -= 1;
            Some(&(*node).val)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        unsafe {
            let node = self.tail;
            self.tail = (*node).prev;
            self.len -= 1;
            Some(&(*node).val)
        }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

/// A borrowed iterator yielding mutable references, front to back.
/// Writes through it are payload-only and do not count as structural
/// changes.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    head: *mut ChainNode<T>,
    tail: *mut ChainNode<T>,
    len: usize,
    marker: PhantomData<&'a mut ChainNode<T>>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(list: &'a mut LinkedList<T>) -> IterMut<'a, T> {
        IterMut {
            head: list.head,
            tail: list.tail,
            len: list.len,
            marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        unsafe {
            let node = self.head;
            self.head = (*node).next;
            self.len -= 1;
            Some(&mut (*node).val)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        unsafe {
            let node = self.tail;
            self.tail = (*node).prev;
            self.len -= 1;
            Some(&mut (*node).val)
        }
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

/// An owning iterator over a consumed [`LinkedList`]. Elements are
/// popped off the front (or the back, through `next_back`); whatever
/// is left when the iterator drops is dropped with the list.
#[derive(Debug)]
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

impl<T> IntoIter<T> {
    pub(super) fn new(list: LinkedList<T>) -> IntoIter<T> {
        IntoIter { list }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
