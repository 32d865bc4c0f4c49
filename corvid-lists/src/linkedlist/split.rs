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

/// Element count of the first split batch; each further batch grows
/// by this amount.
pub const BATCH_UNIT: usize = 1 << 10;

/// Ceiling on the size of any single batch.
pub const MAX_BATCH: usize = 1 << 25;

/// A splitting traversal over a [`LinkedList`] for chunked
/// consumption.
///
/// Each call to [`try_split`](#method.try_split) detaches a prefix of
/// the remaining elements into an indexable [`Batch`]; batch sizes
/// grow arithmetically ([`BATCH_UNIT`], then twice that, and so on up
/// to [`MAX_BATCH`]) so that short lists pay one cheap batch while
/// long lists amortize the per-batch cost. What `try_split` has not
/// taken can be drained element-wise with
/// [`try_advance`](#method.try_advance) or in bulk with
/// [`for_each_remaining`](#method.for_each_remaining).
///
/// The size estimate and start position are captured lazily, on the
/// first traversal call rather than at construction, so a splitter
/// created early binds to the list as it is when traversal begins.
///
/// Like [`Cursor`](crate::linkedlist::cursor::Cursor), a splitter is
/// detached and fail-fast: every call takes the list by reference,
/// and a structural change since the lazy bind fails the call with
/// [`ListError::StructuralChange`].
///
/// # Examples
///
/// ```
/// use corvid::lists::LinkedList;
///
/// let list: LinkedList<i32> = (0..10).collect();
/// let mut sp = list.splitter();
/// let mut total = 0;
/// sp.for_each_remaining(&list, |e| total += e).unwrap();
/// assert_eq!(total, 45);
/// ```
#[derive(Debug)]
pub struct Splitter<T> {
    cid: usize,
    /// Next node to hand out; null once drained (or before binding).
    current: *mut ChainNode<T>,
    /// Remaining element count; `None` until the lazy bind.
    est: Option<usize>,
    version: u64,
    batch: usize,
}

impl<T> Splitter<T> {
    pub(super) fn new(list: &LinkedList<T>) -> Splitter<T> {
        Splitter {
            cid: list.cid,
            current: ptr::null_mut(),
            est: None,
            version: 0,
            batch: 0,
        }
    }

    /// Binds the traversal to the list's current state, first call
    /// only. Returns the remaining-element estimate.
    fn bind(&mut self, list: &LinkedList<T>) -> usize {
        match self.est {
            Some(est) => est,
            None => {
                self.version = list.version;
                self.current = list.head;
                self.est = Some(list.len);
                list.len
            }
        }
    }

    fn check_sync(&self, list: &LinkedList<T>) -> Result<(), ListError> {
        if self.cid != list.cid || self.version != list.version {
            return Err(ListError::StructuralChange);
        }
        Ok(())
    }

    /// Returns how many elements remain, binding the traversal to the
    /// list if this is the first call.
    pub fn estimate_remaining(&mut self, list: &LinkedList<T>) -> usize {
        self.bind(list)
    }

    /// Detaches a prefix of the remaining elements into a [`Batch`],
    /// or `Ok(None)` when at most one element remains (the tail of a
    /// split is left for element-wise draining).
    ///
    /// # Examples
    /// ```
    /// use corvid::lists::{LinkedList, linkedlist::BATCH_UNIT};
    ///
    /// let list: LinkedList<usize> = (0..BATCH_UNIT * 2).collect();
    /// let mut sp = list.splitter();
    ///
    /// let batch = sp.try_split(&list).unwrap().unwrap();
    /// assert_eq!(batch.len(), BATCH_UNIT);
    /// assert_eq!(sp.estimate_remaining(&list), BATCH_UNIT);
    /// ```
    pub fn try_split<'a>(
        &mut self,
        list: &'a LinkedList<T>,
    ) -> Result<Option<Batch<'a, T>>, ListError> {
        let est = self.bind(list);
        self.check_sync(list)?;
        if est <= 1 || self.current.is_null() {
            return Ok(None);
        }

        let mut n = self.batch + BATCH_UNIT;
        if n > est {
            n = est;
        }
        if n > MAX_BATCH {
            n = MAX_BATCH;
        }

        let mut items = Vec::with_capacity(n);
        let mut p = self.current;
        while !p.is_null() && items.len() < n {
            unsafe {
                items.push(&(*p).val);
                p = (*p).next;
            }
        }
        self.current = p;
        self.batch = items.len();
        self.est = Some(est - items.len());
        Ok(Some(Batch {
            inner: items.into_iter(),
        }))
    }

    /// Applies `f` to the next remaining element. Returns `Ok(false)`
    /// once the traversal is exhausted.
    pub fn try_advance<F>(&mut self, list: &LinkedList<T>, f: F) -> Result<bool, ListError>
    where
        F: FnOnce(&T),
    {
        let est = self.bind(list);
        self.check_sync(list)?;
        if est == 0 || self.current.is_null() {
            return Ok(false);
        }
        unsafe {
            f(&(*self.current).val);
            self.current = (*self.current).next;
        }
        self.est = Some(est - 1);
        Ok(true)
    }

    /// Applies `f` to every remaining element in order and exhausts
    /// the traversal.
    pub fn for_each_remaining<F>(&mut self, list: &LinkedList<T>, mut f: F) -> Result<(), ListError>
    where
        F: FnMut(&T),
    {
        self.bind(list);
        self.check_sync(list)?;
        let mut p = self.current;
        while !p.is_null() {
            unsafe {
                f(&(*p).val);
                p = (*p).next;
            }
        }
        self.current = ptr::null_mut();
        self.est = Some(0);
        Ok(())
    }
}

/// An ordered batch of borrowed elements detached by
/// [`Splitter::try_split`]. Indexable and exactly sized; iterating it
/// never touches the source list again, so it stays valid however the
/// list is mutated afterward.
#[derive(Debug)]
pub struct Batch<'a, T> {
    inner: std::vec::IntoIter<&'a T>,
}

impl<'a, T> Iterator for Batch<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, T> ExactSizeIterator for Batch<'a, T> {}

#[cfg(test)]
mod test {
    use super::*;

    fn list_of(n: usize) -> LinkedList<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_batches_grow_arithmetically() {
        let list = list_of(BATCH_UNIT * 4);
        let mut sp = list.splitter();

        let b1 = sp.try_split(&list).unwrap().unwrap();
        assert_eq!(b1.len(), BATCH_UNIT);
        let b2 = sp.try_split(&list).unwrap().unwrap();
        assert_eq!(b2.len(), BATCH_UNIT * 2);
        // the remainder is smaller than the next step would be
        let b3 = sp.try_split(&list).unwrap().unwrap();
        assert_eq!(b3.len(), BATCH_UNIT);
        assert!(sp.try_split(&list).unwrap().is_none());
    }

    #[test]
    fn test_batches_cover_every_element_in_order() {
        let list = list_of(3000);
        let mut sp = list.splitter();
        let mut seen = Vec::new();
        while let Some(batch) = sp.try_split(&list).unwrap() {
            seen.extend(batch.cloned());
        }
        sp.for_each_remaining(&list, |&e| seen.push(e)).unwrap();
        let expected: Vec<usize> = (0..3000).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_short_list_never_splits() {
        let list = list_of(1);
        let mut sp = list.splitter();
        assert!(sp.try_split(&list).unwrap().is_none());
        // the single element is still there for draining
        let mut seen = Vec::new();
        sp.for_each_remaining(&list, |&e| seen.push(e)).unwrap();
        assert_eq!(seen, vec![0]);
    }

    #[test]
    fn test_try_advance() {
        let list = list_of(3);
        let mut sp = list.splitter();
        let mut seen = Vec::new();
        while sp.try_advance(&list, |&e| seen.push(e)).unwrap() {}
        assert_eq!(seen, vec![0, 1, 2]);
        assert_eq!(sp.estimate_remaining(&list), 0);
        assert_eq!(sp.try_advance(&list, |_| {}), Ok(false));
    }

    #[test]
    fn test_split_then_drain_mixed() {
        let list = list_of(BATCH_UNIT + 2);
        let mut sp = list.splitter();
        let batch = sp.try_split(&list).unwrap().unwrap();
        assert_eq!(batch.len(), BATCH_UNIT);

        let mut seen = Vec::new();
        assert_eq!(sp.try_advance(&list, |&e| seen.push(e)), Ok(true));
        sp.for_each_remaining(&list, |&e| seen.push(e)).unwrap();
        assert_eq!(seen, vec![BATCH_UNIT, BATCH_UNIT + 1]);
        assert_eq!(sp.estimate_remaining(&list), 0);
    }

    #[test]
    fn test_estimate_binds_lazily() {
        let mut list = list_of(2);
        let mut sp = list.splitter();
        // mutation before the first traversal call is fine
        list.push_back(2);
        assert_eq!(sp.estimate_remaining(&list), 3);

        let mut seen = Vec::new();
        sp.for_each_remaining(&list, |&e| seen.push(e)).unwrap();
        assert_eq!(seen, vec![0, 1, 2]);
    }

    #[test]
    fn test_fail_fast_after_bind() {
        let mut list = list_of(10);
        let mut sp = list.splitter();
        sp.try_advance(&list, |_| {}).unwrap();

        list.push_back(10);
        assert_eq!(sp.try_advance(&list, |_| {}), Err(ListError::StructuralChange));
        assert!(sp.try_split(&list).is_err());
        assert!(sp.for_each_remaining(&list, |_| {}).is_err());
    }

    #[test]
    fn test_payload_writes_do_not_invalidate() {
        let mut list = list_of(3);
        let mut sp = list.splitter();
        sp.try_advance(&list, |_| {}).unwrap();

        list.set(1, 100).unwrap();
        let mut seen = Vec::new();
        sp.for_each_remaining(&list, |&e| seen.push(e)).unwrap();
        assert_eq!(seen, vec![100, 2]);
    }

    #[test]
    fn test_wrong_list_is_rejected() {
        let list_a = list_of(2);
        let list_b = list_of(2);
        let mut sp = list_a.splitter();
        sp.estimate_remaining(&list_a);
        assert_eq!(
            sp.try_advance(&list_b, |_| {}),
            Err(ListError::StructuralChange)
        );
    }

    #[test]
    fn test_batch_outlives_source_mutation() {
        let mut list = list_of(BATCH_UNIT * 2);
        let mut sp = list.splitter();
        let batch = sp.try_split(&list).unwrap().unwrap();
        let collected: Vec<usize> = batch.cloned().collect();
        // the detached batch was snapshotted by reference walk, so
        // the splitter (not the batch) is what staleness invalidates
        list.push_back(0);
        assert!(sp.try_split(&list).is_err());
        assert_eq!(collected.len(), BATCH_UNIT);
        assert_eq!(collected[0], 0);
    }
}
