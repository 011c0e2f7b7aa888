use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use super::cursor::LinkedHashSetCursor;
use super::table::{self, LinkedTable};
use crate::collection::{Collection, Container, Deque, Iterable, List, Queue, Sortable};
use crate::cursor::NodePosition;
use crate::error::{check_item_index, check_size_index, or_panic, CogError};

const NAME: &str = "LinkedHashSet";

/// Hash set that remembers insertion order and doubles as a list.
///
/// Re-adding a present value leaves it where it is. Positional operations
/// (`get`, `set`, `insert`, `remove_at`) walk the list from whichever end is
/// closer to the index.
///
/// ```
/// use cog::LinkedHashSet;
///
/// let mut set: LinkedHashSet<i32> = [3, 1, 2].into_iter().collect();
/// set.add(3);
/// assert_eq!(set.values(), vec![3, 1, 2]);
/// set.insert(1, 7);
/// assert_eq!(set.values(), vec![3, 7, 1, 2]);
/// ```
#[derive(Clone)]
pub struct LinkedHashSet<T, S = RandomState> {
    table: LinkedTable<T, (), S>,
}

impl<T> LinkedHashSet<T> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<T> Default for LinkedHashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> LinkedHashSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            table: LinkedTable::with_hasher(hasher),
        }
    }

    pub fn hasher(&self) -> &S {
        self.table.hasher()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// First value in insertion order.
    pub fn head(&self) -> Option<&T> {
        self.table.head().map(|n| &self.table.node(n).key)
    }

    /// Last value in insertion order.
    pub fn tail(&self) -> Option<&T> {
        self.table.tail().map(|n| &self.table.node(n).key)
    }

    pub fn poll_head(&mut self) -> Option<T> {
        let n = self.table.head()?;
        Some(self.table.unlink(n).0)
    }

    pub fn poll_tail(&mut self) -> Option<T> {
        let n = self.table.tail()?;
        Some(self.table.unlink(n).0)
    }

    pub fn try_get(&self, index: isize) -> Result<&T, CogError> {
        let i = check_item_index(NAME, index, self.len())?;
        Ok(&self.table.node(self.table.node_at(i)).key)
    }

    /// # Panics
    ///
    /// When `index` is outside `[-len, len)`.
    #[track_caller]
    pub fn get(&self, index: isize) -> &T {
        or_panic(self.try_get(index))
    }

    pub fn try_remove_at(&mut self, index: isize) -> Result<T, CogError> {
        let i = check_item_index(NAME, index, self.len())?;
        let n = self.table.node_at(i);
        Ok(self.table.unlink(n).0)
    }

    #[track_caller]
    pub fn remove_at(&mut self, index: isize) -> T {
        or_panic(self.try_remove_at(index))
    }

    /// Exchanges the values at positions `i` and `j`.
    pub fn try_swap(&mut self, i: isize, j: isize) -> Result<(), CogError> {
        let i = check_item_index(NAME, i, self.len())?;
        let j = check_item_index(NAME, j, self.len())?;
        if i != j {
            let (a, b) = (self.table.node_at(i), self.table.node_at(j));
            self.table.swap_entries(a, b);
        }
        Ok(())
    }

    #[track_caller]
    pub fn swap(&mut self, i: isize, j: isize) {
        or_panic(self.try_swap(i, j))
    }

    /// Sorts the values by `less`. Stable.
    pub fn sort_by<F: Fn(&T, &T) -> bool>(&mut self, less: F) {
        self.table.sort_by(|a, b| less(&a.key, &b.key));
    }

    /// Calls `f(index, value)` in insertion order until it returns `false`.
    pub fn each<F: FnMut(usize, &T) -> bool>(&self, mut f: F) {
        for (i, v) in self.iter().enumerate() {
            if !f(i, v) {
                return;
            }
        }
    }

    /// Calls `f(index, value)` from the last value back until it returns `false`.
    pub fn reverse_each<F: FnMut(usize, &T) -> bool>(&self, mut f: F) {
        let len = self.len();
        for (i, v) in self.iter().rev().enumerate() {
            if !f(len - 1 - i, v) {
                return;
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }

    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn cursor(&mut self) -> LinkedHashSetCursor<'_, T, S> {
        LinkedHashSetCursor::new(&mut self.table, NodePosition::Reset)
    }
}

impl<T, S> LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Appends `value`. Returns `false`, leaving its position untouched, when
    /// it is already present.
    pub fn add(&mut self, value: T) -> bool {
        if self.table.find(&value).is_some() {
            return false;
        }
        self.table.link(value, (), None);
        true
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for v in values {
            self.add(v);
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.table.find(value).is_some()
    }

    pub fn contains_all<'v, I>(&self, values: I) -> bool
    where
        T: 'v,
        I: IntoIterator<Item = &'v T>,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    pub fn remove(&mut self, value: &T) -> Option<T> {
        let n = self.table.find(value)?;
        Some(self.table.unlink(n).0)
    }

    pub fn remove_all<'v, I>(&mut self, values: I)
    where
        T: 'v,
        I: IntoIterator<Item = &'v T>,
    {
        for v in values {
            if self.is_empty() {
                return;
            }
            self.remove(v);
        }
    }

    pub fn remove_if<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        self.retain(|v| !f(v));
    }

    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        let mut curr = self.table.head();
        while let Some(n) = curr {
            curr = self.table.next(n);
            if !f(&self.table.node(n).key) {
                self.table.unlink(n);
            }
        }
    }

    /// Position of `value` in insertion order.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.table.find(value).map(|n| self.table.position(n))
    }

    /// Replaces the value at `index` in place and returns the old one. If
    /// `value` already lives at another position, that entry is removed.
    pub fn try_set(&mut self, index: isize, value: T) -> Result<T, CogError> {
        let i = check_item_index(NAME, index, self.len())?;
        let n = self.table.node_at(i);
        Ok(self.table.rekey(n, value))
    }

    #[track_caller]
    pub fn set(&mut self, index: isize, value: T) -> T {
        or_panic(self.try_set(index, value))
    }

    /// Inserts `value` before position `index`; `index == len` appends.
    /// A value already present keeps its position.
    pub fn try_insert(&mut self, index: isize, value: T) -> Result<(), CogError> {
        self.try_insert_all(index, [value])
    }

    #[track_caller]
    pub fn insert(&mut self, index: isize, value: T) {
        or_panic(self.try_insert(index, value))
    }

    /// Inserts `values` in order before position `index`, skipping those
    /// already present.
    pub fn try_insert_all<I>(&mut self, index: isize, values: I) -> Result<(), CogError>
    where
        I: IntoIterator<Item = T>,
    {
        let i = check_size_index(NAME, index, self.len())?;
        let before = if i == self.len() {
            None
        } else {
            Some(self.table.node_at(i))
        };
        for v in values {
            if self.table.find(&v).is_none() {
                self.table.link(v, (), before);
            }
        }
        Ok(())
    }

    #[track_caller]
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, index: isize, values: I) {
        or_panic(self.try_insert_all(index, values))
    }

    /// Prepends `value` unless already present.
    pub fn push_head(&mut self, value: T) {
        self.insert(0, value);
    }

    pub fn push_head_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.insert_all(0, values);
    }

    /// Appends `value` unless already present.
    pub fn push_tail(&mut self, value: T) {
        self.add(value);
    }

    pub fn push_tail_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        self.add_all(values);
    }
}

// ------------------------------------------------------------------ Iter

/// Insertion-order iterator over a [`LinkedHashSet`]. Double-ended.
pub struct Iter<'a, T> {
    inner: table::Iter<'a, T, ()>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, S> IntoIterator for &'a LinkedHashSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ---------------------------------------------------------------- std glue

impl<T: Hash + Eq> FromIterator<T> for LinkedHashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = LinkedHashSet::new();
        set.add_all(iter);
        set
    }
}

impl<T, S> Extend<T> for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: fmt::Debug, S> fmt::Debug for LinkedHashSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Equal when both hold the same values in the same order.
impl<T: PartialEq, S> PartialEq for LinkedHashSet<T, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

// --------------------------------------------------------------- capability

impl<T, S> Container for LinkedHashSet<T, S> {
    fn len(&self) -> usize {
        LinkedHashSet::len(self)
    }

    fn clear(&mut self) {
        LinkedHashSet::clear(self)
    }
}

impl<T, S> Collection<T> for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn add(&mut self, value: T) -> bool {
        LinkedHashSet::add(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        LinkedHashSet::remove(self, value).is_some()
    }

    fn contains(&self, value: &T) -> bool {
        LinkedHashSet::contains(self, value)
    }

    fn retain(&mut self, f: &mut dyn FnMut(&T) -> bool) {
        LinkedHashSet::retain(self, f)
    }

    fn each(&self, f: &mut dyn FnMut(usize, &T) -> bool) {
        LinkedHashSet::each(self, f)
    }
}

impl<T, S> List<T> for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn get(&self, index: isize) -> &T {
        LinkedHashSet::get(self, index)
    }

    fn set(&mut self, index: isize, value: T) -> T {
        LinkedHashSet::set(self, index, value)
    }

    fn insert(&mut self, index: isize, value: T) {
        LinkedHashSet::insert(self, index, value)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        LinkedHashSet::index_of(self, value)
    }

    fn remove_at(&mut self, index: isize) -> T {
        LinkedHashSet::remove_at(self, index)
    }

    fn swap(&mut self, i: isize, j: isize) {
        LinkedHashSet::swap(self, i, j)
    }
}

impl<T, S> Queue<T> for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn peek(&self) -> Option<&T> {
        self.head()
    }

    fn poll(&mut self) -> Option<T> {
        self.poll_head()
    }

    fn push(&mut self, value: T) {
        self.push_tail(value)
    }
}

impl<T, S> Deque<T> for LinkedHashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn peek_head(&self) -> Option<&T> {
        self.head()
    }

    fn poll_head(&mut self) -> Option<T> {
        LinkedHashSet::poll_head(self)
    }

    fn push_head(&mut self, value: T) {
        LinkedHashSet::push_head(self, value)
    }

    fn peek_tail(&self) -> Option<&T> {
        self.tail()
    }

    fn poll_tail(&mut self) -> Option<T> {
        LinkedHashSet::poll_tail(self)
    }

    fn push_tail(&mut self, value: T) {
        LinkedHashSet::push_tail(self, value)
    }
}

impl<T, S> Sortable<T> for LinkedHashSet<T, S> {
    fn sort_by<F>(&mut self, less: F)
    where
        F: Fn(&T, &T) -> bool,
    {
        LinkedHashSet::sort_by(self, less)
    }
}

impl<T, S> Iterable for LinkedHashSet<T, S> {
    type Cursor<'a>
        = LinkedHashSetCursor<'a, T, S>
    where
        Self: 'a;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        LinkedHashSet::cursor(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Cursor;

    fn set_of(values: &[i32]) -> LinkedHashSet<i32> {
        values.iter().copied().collect()
    }

    // --- add ---

    #[test]
    fn readd_keeps_position() {
        let mut set = set_of(&[1, 2, 3]);
        assert!(!set.add(1));
        set.add_all([2, 3, 4]);
        assert_eq!(set.values(), vec![1, 2, 3, 4]);
        set.table.assert_linked();
    }

    // --- list ---

    #[test]
    fn get_negative_and_set() {
        let mut set = set_of(&[10, 20, 30]);
        assert_eq!(*set.get(-1), 30);
        assert_eq!(*set.get(1), 20);
        assert_eq!(set.set(0, 11), 10);
        assert_eq!(set.values(), vec![11, 20, 30]);
        assert!(set.try_get(3).is_err());
    }

    #[test]
    fn set_to_existing_value_drops_other() {
        let mut set = set_of(&[1, 2, 3, 4]);
        assert_eq!(set.set(0, 3), 1);
        assert_eq!(set.values(), vec![3, 2, 4]);
        assert_eq!(set.index_of(&4), Some(2));
        set.table.assert_linked();
    }

    #[test]
    fn insert_all_skips_present() {
        let mut set = set_of(&[1, 5]);
        set.insert_all(1, [2, 5, 3, 4]);
        assert_eq!(set.values(), vec![1, 2, 3, 4, 5]);
        set.insert(-5, 0);
        set.insert(6, 6);
        assert_eq!(set.values(), vec![0, 1, 2, 3, 4, 5, 6]);
    }

    #[test]
    #[should_panic(expected = "LinkedHashSet out of bounds: index=4, len=2")]
    fn insert_past_len_panics() {
        let mut set = set_of(&[1, 2]);
        set.insert(4, 9);
    }

    #[test]
    fn remove_at_and_swap() {
        let mut set = set_of(&[1, 2, 3, 4]);
        assert_eq!(set.remove_at(-2), 3);
        set.swap(0, -1);
        assert_eq!(set.values(), vec![4, 2, 1]);
        assert!(set.contains(&4));
        assert_eq!(set.index_of(&1), Some(2));
        assert_eq!(set.index_of(&3), None);
    }

    #[test]
    fn sort_by_is_stable_on_ties() {
        let mut set = set_of(&[31, 12, 21, 42, 11]);
        set.sort_by(|a, b| a % 10 < b % 10);
        assert_eq!(set.values(), vec![31, 21, 11, 12, 42]);
        set.table.assert_linked();
    }

    // --- deque ---

    #[test]
    fn ends() {
        let mut set = set_of(&[2, 3]);
        set.push_head(1);
        set.push_head(3);
        set.push_tail(4);
        assert_eq!(set.head(), Some(&1));
        assert_eq!(set.tail(), Some(&4));
        assert_eq!(set.poll_head(), Some(1));
        assert_eq!(set.poll_tail(), Some(4));
        assert_eq!(set.values(), vec![2, 3]);
    }

    // --- cursor ---

    #[test]
    fn cursor_set_value_swallows_next() {
        let mut set = set_of(&(1..=10).collect::<Vec<_>>());
        let mut it = set.cursor();
        while it.next() {
            let v = *it.value().unwrap() + 1;
            it.set_value(v);
        }
        drop(it);
        assert_eq!(set.values(), vec![2, 4, 6, 8, 10]);
    }

    #[test]
    fn cursor_removes_while_walking_back() {
        let mut set = set_of(&[1, 2, 3, 4, 5]);
        let mut it = set.cursor();
        while it.prev() {
            if it.value().is_some_and(|v| v % 2 == 1) {
                it.remove();
            }
        }
        drop(it);
        assert_eq!(set.values(), vec![2, 4]);
        set.table.assert_linked();
    }

    #[test]
    #[should_panic(expected = "LinkedHashSet can't remove an unlinked item")]
    fn cursor_double_remove_panics() {
        let mut set = set_of(&[1]);
        let mut it = set.cursor();
        it.next();
        it.remove();
        it.remove();
    }
}
