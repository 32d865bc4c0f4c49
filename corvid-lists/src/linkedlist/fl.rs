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

use crate::linkedlist::node::ChainNode;

use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};
use std::ptr;

/// The node arena. Slots are preallocated up front and chained
/// through the same `next`/`prev` fields the live list uses. A slot
/// on the freelist holds no live `T`; `acquire` writes a fresh node
/// into it and `release` moves the payload out before returning the
/// slot.
#[derive(Debug)]
pub(super) struct FreeList<T> {
    capacity: usize,
    len: usize,
    head: *mut ChainNode<T>,
    tail: *mut ChainNode<T>,
}

impl<T> Drop for FreeList<T> {
    fn drop(&mut self) {
        let layout = Layout::new::<ChainNode<T>>();
        let mut cur = self.pop_tail();
        while !cur.is_null() {
            unsafe {
                dealloc(cur as *mut u8, layout);
            }
            cur = self.pop_tail();
        }
    }
}

impl<T> FreeList<T> {
    pub(super) fn new(capacity: usize) -> FreeList<T> {
        let mut fl = FreeList {
            capacity,
            len: 0,
            head: ptr::null_mut(),
            tail: ptr::null_mut(),
        };
        fl.alloc(capacity);
        fl
    }

    pub(super) fn len(&self) -> usize {
        self.len
    }

    fn alloc(&mut self, size: usize) {
        let layout = Layout::new::<ChainNode<T>>();

        let mut count: usize = 0;
        unsafe {
            while count < size {
                let ptr: *mut ChainNode<T> = alloc(layout) as *mut ChainNode<T>;
                if ptr.is_null() {
                    handle_alloc_error(layout);
                }
                self.push_head(ptr);
                count += 1;
            }
        }
    }

    fn push_head(&mut self, ptr: *mut ChainNode<T>) {
        unsafe {
            (*ptr).prev = ptr::null_mut();
            if self.head.is_null() {
                (*ptr).next = ptr::null_mut();
            } else {
                (*self.head).prev = ptr;
                (*ptr).next = self.head;
            }
            if self.tail.is_null() {
                self.tail = ptr;
            }

            self.len += 1;
            self.head = ptr;
        }
    }

    fn pop_tail(&mut self) -> *mut ChainNode<T> {
        if self.tail.is_null() {
            return ptr::null_mut();
        }
        unsafe {
            let ptr = self.tail;
            if !(*ptr).prev.is_null() {
                (*(*ptr).prev).next = ptr::null_mut();
            }
            if self.head == ptr {
                self.head = ptr::null_mut();
            }
            self.tail = (*ptr).prev;
            (*ptr).next = ptr::null_mut();
            (*ptr).prev = ptr::null_mut();
            self.len -= 1;
            ptr
        }
    }

    /// Returns the slot to the freelist, moving the payload out. The
    /// slot's memory stays allocated until the freelist is dropped.
    pub(super) fn release(&mut self, ptr: *mut ChainNode<T>) -> T {
        unsafe {
            let node = ptr::read(ptr);
            self.push_head(ptr);
            node.val
        }
    }

    pub(super) fn acquire(&mut self, val: T) -> *mut ChainNode<T> {
        let mut ptr = self.pop_tail();
        if ptr.is_null() {
            self.grow();
            ptr = self.pop_tail();
            if ptr.is_null() {
                panic!("alloc failed on acquire");
            }
        }

        unsafe {
            ptr::write(ptr, ChainNode::new(val));
        }
        ptr
    }

    fn grow(&mut self) {
        if self.capacity == 0 {
            // a zero-capacity list allocates one node per push
            self.alloc(1);
        } else {
            self.alloc(self.capacity);
            self.capacity *= 2;
        }
    }
}
