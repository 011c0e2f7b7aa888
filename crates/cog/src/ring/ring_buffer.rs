use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use super::cursor::{IndexPosition, RingBufferCursor};
use crate::collection::{Collection, Container, Deque, Iterable, List, Queue, Sortable};
use crate::error::{check_item_index, check_size_index, or_panic, CogError};
use crate::sorter::{self, Indexed};

const NAME: &str = "RingBuffer";

/// Smallest capacity a [`RingBuffer`] ever has.
pub const MIN_CAPACITY: usize = 16;

/// Doubles `cap` (starting from at least [`MIN_CAPACITY`]) until it holds `need`.
pub fn double_up(cap: usize, need: usize) -> usize {
    let mut cap = cap.max(MIN_CAPACITY);
    while cap < need {
        cap <<= 1;
    }
    cap
}

/// Growable circular deque with O(1) indexed access.
///
/// Capacity is a power of two, never below [`MIN_CAPACITY`]. It doubles when
/// an insert needs room and, after a removal drops occupancy to a quarter or
/// less, shrinks to fit. Interior inserts and removals shift whichever side
/// of the index is shorter.
///
/// ```
/// use cog::RingBuffer;
///
/// let mut rb: RingBuffer<i32> = [1, 2, 3].into_iter().collect();
/// assert_eq!(rb.poll_head(), Some(1));
/// assert_eq!(rb.values(), vec![2, 3]);
/// rb.push_head(0);
/// assert_eq!(*rb.get(-1), 3);
/// assert_eq!(rb.capacity(), 16);
/// ```
#[derive(Clone)]
pub struct RingBuffer<T> {
    data: Vec<Option<T>>,
    head: usize,
    len: usize,
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RingBuffer<T> {
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Empty buffer able to hold `capacity` values, rounded up to a power of
    /// two of at least [`MIN_CAPACITY`].
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = double_up(MIN_CAPACITY, capacity);
        let mut data = Vec::with_capacity(cap);
        data.resize_with(cap, || None);
        Self {
            data,
            head: 0,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Drops every value and returns to [`MIN_CAPACITY`].
    pub fn clear(&mut self) {
        self.data.clear();
        self.data.resize_with(MIN_CAPACITY, || None);
        self.head = 0;
        self.len = 0;
    }

    // ----------------------------------------------------------- slot math

    /// Physical slot of logical index `i`.
    fn slot(&self, i: usize) -> usize {
        (self.head + i) & (self.data.len() - 1)
    }

    fn at(&self, i: usize) -> &T {
        self.data[self.slot(i)]
            .as_ref()
            .expect("slot within len is occupied")
    }

    fn at_mut(&mut self, i: usize) -> &mut T {
        let s = self.slot(i);
        self.data[s].as_mut().expect("slot within len is occupied")
    }

    fn take(&mut self, i: usize) -> Option<T> {
        let s = self.slot(i);
        self.data[s].take()
    }

    fn put(&mut self, i: usize, value: Option<T>) {
        let s = self.slot(i);
        self.data[s] = value;
    }

    /// Re-linearizes into `cap` slots, head moved to 0.
    fn resize(&mut self, cap: usize) {
        log::trace!("ring buffer: resize {} -> {cap} (len {})", self.data.len(), self.len);
        let mut data = Vec::with_capacity(cap);
        for i in 0..self.len {
            data.push(self.take(i));
        }
        data.resize_with(cap, || None);
        self.data = data;
        self.head = 0;
    }

    fn grow_for(&mut self, extra: usize) {
        let need = self.len + extra;
        if need > self.data.len() {
            self.resize(double_up(self.data.len(), need));
        }
    }

    fn shrink(&mut self) {
        let cap = self.data.len();
        if cap > MIN_CAPACITY && self.len * 4 <= cap {
            self.resize(self.len.next_power_of_two().max(MIN_CAPACITY));
        }
    }

    /// Opens a gap of `n` slots at logical index `at` by shifting the shorter
    /// side. Capacity must already fit.
    fn open_gap(&mut self, at: usize, n: usize) {
        let mask = self.data.len() - 1;
        if self.len - at <= at {
            for i in (at..self.len).rev() {
                let v = self.take(i);
                self.put(i + n, v);
            }
        } else {
            self.head = (self.head + self.data.len() - n) & mask;
            for i in 0..at {
                let v = self.take(i + n);
                self.put(i, v);
            }
        }
        self.len += n;
    }

    /// Removes logical index `at`, closing the gap from the shorter side.
    fn close_gap(&mut self, at: usize) -> T {
        let removed = self.take(at).expect("slot within len is occupied");
        let mask = self.data.len() - 1;
        if at < self.len - 1 - at {
            for i in (0..at).rev() {
                let v = self.take(i);
                self.put(i + 1, v);
            }
            self.head = (self.head + 1) & mask;
        } else {
            for i in at + 1..self.len {
                let v = self.take(i);
                self.put(i - 1, v);
            }
        }
        self.len -= 1;
        if self.len == 0 {
            self.head = 0;
        }
        removed
    }

    // ----------------------------------------------------------------- list

    pub fn try_get(&self, index: isize) -> Result<&T, CogError> {
        let i = check_item_index(NAME, index, self.len)?;
        Ok(self.at(i))
    }

    /// # Panics
    ///
    /// When `index` is outside `[-len, len)`.
    #[track_caller]
    pub fn get(&self, index: isize) -> &T {
        or_panic(self.try_get(index))
    }

    pub fn try_get_mut(&mut self, index: isize) -> Result<&mut T, CogError> {
        let i = check_item_index(NAME, index, self.len)?;
        Ok(self.at_mut(i))
    }

    pub fn try_set(&mut self, index: isize, value: T) -> Result<T, CogError> {
        Ok(mem::replace(self.try_get_mut(index)?, value))
    }

    #[track_caller]
    pub fn set(&mut self, index: isize, value: T) -> T {
        or_panic(self.try_set(index, value))
    }

    pub fn try_insert(&mut self, index: isize, value: T) -> Result<(), CogError> {
        self.try_insert_all(index, [value])
    }

    /// Inserts before `index`; `index == len` appends.
    #[track_caller]
    pub fn insert(&mut self, index: isize, value: T) {
        or_panic(self.try_insert(index, value))
    }

    pub fn try_insert_all<I>(&mut self, index: isize, values: I) -> Result<(), CogError>
    where
        I: IntoIterator<Item = T>,
    {
        let at = check_size_index(NAME, index, self.len)?;
        let values: Vec<T> = values.into_iter().collect();
        let n = values.len();
        if n == 0 {
            return Ok(());
        }

        self.grow_for(n);
        self.open_gap(at, n);
        for (k, v) in values.into_iter().enumerate() {
            self.put(at + k, Some(v));
        }
        Ok(())
    }

    #[track_caller]
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, index: isize, values: I) {
        or_panic(self.try_insert_all(index, values))
    }

    pub fn try_remove_at(&mut self, index: isize) -> Result<T, CogError> {
        let at = check_item_index(NAME, index, self.len)?;
        let v = self.close_gap(at);
        self.shrink();
        Ok(v)
    }

    #[track_caller]
    pub fn remove_at(&mut self, index: isize) -> T {
        or_panic(self.try_remove_at(index))
    }

    pub fn try_swap(&mut self, i: isize, j: isize) -> Result<(), CogError> {
        let i = check_item_index(NAME, i, self.len)?;
        let j = check_item_index(NAME, j, self.len)?;
        let (a, b) = (self.slot(i), self.slot(j));
        self.data.swap(a, b);
        Ok(())
    }

    #[track_caller]
    pub fn swap(&mut self, i: isize, j: isize) {
        or_panic(self.try_swap(i, j))
    }

    // ---------------------------------------------------------------- deque

    pub fn peek_head(&self) -> Option<&T> {
        (self.len > 0).then(|| self.at(0))
    }

    pub fn peek_tail(&self) -> Option<&T> {
        (self.len > 0).then(|| self.at(self.len - 1))
    }

    pub fn poll_head(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let v = self.close_gap(0);
        self.shrink();
        Some(v)
    }

    pub fn poll_tail(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let v = self.close_gap(self.len - 1);
        self.shrink();
        Some(v)
    }

    pub fn push_head(&mut self, value: T) {
        self.push_head_all([value]);
    }

    /// Prepends `values`, keeping their order.
    pub fn push_head_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        or_panic(self.try_insert_all(0, values))
    }

    pub fn push_tail(&mut self, value: T) {
        self.push_tail_all([value]);
    }

    pub fn push_tail_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        let at = self.len as isize;
        or_panic(self.try_insert_all(at, values))
    }

    // ----------------------------------------------------------- collection

    /// Appends `value`.
    pub fn add(&mut self, value: T) {
        self.push_tail(value);
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.push_tail_all(values);
    }

    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Removes every occurrence of `value`. Returns how many were removed.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let before = self.len;
        self.retain(|v| v != value);
        before - self.len
    }

    pub fn remove_if<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        self.retain(|v| !f(v));
    }

    /// Keeps only the values for which `f` returns `true`, preserving order.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        let mut kept = 0;
        for i in 0..self.len {
            let v = self.take(i);
            if v.as_ref().is_some_and(&mut f) {
                self.put(kept, v);
                kept += 1;
            }
        }
        if kept == self.len {
            return;
        }
        self.len = kept;
        if kept == 0 {
            self.head = 0;
        }
        self.shrink();
    }

    /// Sorts by `less`. Stable.
    pub fn sort_by<F: Fn(&T, &T) -> bool>(&mut self, less: F) {
        sorter::sort(self, less);
    }

    // ------------------------------------------------------------ traversal

    /// Calls `f(index, value)` from head to tail until it returns `false`.
    pub fn each<F: FnMut(usize, &T) -> bool>(&self, mut f: F) {
        for (i, v) in self.iter().enumerate() {
            if !f(i, v) {
                return;
            }
        }
    }

    pub fn reverse_each<F: FnMut(usize, &T) -> bool>(&self, mut f: F) {
        for (i, v) in self.iter().enumerate().rev() {
            if !f(i, v) {
                return;
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            ring: self,
            front: 0,
            back: self.len,
        }
    }

    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn cursor(&mut self) -> RingBufferCursor<'_, T> {
        RingBufferCursor::new(self, IndexPosition::Reset)
    }
}

impl<T> Indexed<T> for RingBuffer<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn at(&self, i: usize) -> &T {
        RingBuffer::at(self, i)
    }

    fn swap(&mut self, i: usize, j: usize) {
        let (a, b) = (self.slot(i), self.slot(j));
        self.data.swap(a, b);
    }
}

// ------------------------------------------------------------------ Iter

/// Head-to-tail iterator over a [`RingBuffer`]. Double-ended.
pub struct Iter<'a, T> {
    ring: &'a RingBuffer<T>,
    front: usize,
    back: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            ring: self.ring,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.front == self.back {
            return None;
        }
        let v = self.ring.at(self.front);
        self.front += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.ring.at(self.back))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ---------------------------------------------------------------- std glue

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let values: Vec<T> = iter.into_iter().collect();
        let mut rb = RingBuffer::with_capacity(values.len());
        rb.push_tail_all(values);
        rb
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_tail_all(iter);
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuffer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

// --------------------------------------------------------------- capability

impl<T> Container for RingBuffer<T> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        RingBuffer::clear(self)
    }
}

impl<T: PartialEq> Collection<T> for RingBuffer<T> {
    /// Always appends; returns `true`.
    fn add(&mut self, value: T) -> bool {
        self.push_tail(value);
        true
    }

    fn remove(&mut self, value: &T) -> bool {
        RingBuffer::remove(self, value) > 0
    }

    fn contains(&self, value: &T) -> bool {
        RingBuffer::contains(self, value)
    }

    fn retain(&mut self, f: &mut dyn FnMut(&T) -> bool) {
        RingBuffer::retain(self, f)
    }

    fn each(&self, f: &mut dyn FnMut(usize, &T) -> bool) {
        RingBuffer::each(self, f)
    }
}

impl<T: PartialEq> List<T> for RingBuffer<T> {
    fn get(&self, index: isize) -> &T {
        RingBuffer::get(self, index)
    }

    fn set(&mut self, index: isize, value: T) -> T {
        RingBuffer::set(self, index, value)
    }

    fn insert(&mut self, index: isize, value: T) {
        RingBuffer::insert(self, index, value)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        RingBuffer::index_of(self, value)
    }

    fn remove_at(&mut self, index: isize) -> T {
        RingBuffer::remove_at(self, index)
    }

    fn swap(&mut self, i: isize, j: isize) {
        RingBuffer::swap(self, i, j)
    }
}

impl<T> Queue<T> for RingBuffer<T> {
    fn peek(&self) -> Option<&T> {
        self.peek_head()
    }

    fn poll(&mut self) -> Option<T> {
        self.poll_head()
    }

    fn push(&mut self, value: T) {
        self.push_tail(value)
    }
}

impl<T> Deque<T> for RingBuffer<T> {
    fn peek_head(&self) -> Option<&T> {
        RingBuffer::peek_head(self)
    }

    fn poll_head(&mut self) -> Option<T> {
        RingBuffer::poll_head(self)
    }

    fn push_head(&mut self, value: T) {
        RingBuffer::push_head(self, value)
    }

    fn peek_tail(&self) -> Option<&T> {
        RingBuffer::peek_tail(self)
    }

    fn poll_tail(&mut self) -> Option<T> {
        RingBuffer::poll_tail(self)
    }

    fn push_tail(&mut self, value: T) {
        RingBuffer::push_tail(self, value)
    }
}

impl<T> Sortable<T> for RingBuffer<T> {
    fn sort_by<F>(&mut self, less: F)
    where
        F: Fn(&T, &T) -> bool,
    {
        RingBuffer::sort_by(self, less)
    }
}

impl<T> Iterable for RingBuffer<T> {
    type Cursor<'a>
        = RingBufferCursor<'a, T>
    where
        Self: 'a;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        RingBuffer::cursor(self)
    }
}
