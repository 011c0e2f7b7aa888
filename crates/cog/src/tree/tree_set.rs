use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use super::cursor::TreeSetCursor;
use super::iter::Walk;
use super::red_black::{Inserted, RbTree};
use crate::collection::{Collection, Container, Iterable};
use crate::compare::{natural, Compare};
use crate::cursor::NodePosition;

/// Sorted set backed by a red-black tree.
///
/// Values are ordered by the comparator `C`; two values comparing
/// [`Ordering::Equal`] are the same element, so a second `add` is a no-op.
///
/// ```
/// use cog::TreeSet;
///
/// let mut set = TreeSet::new();
/// set.add(3);
/// set.add(1);
/// set.add(2);
/// set.add(1);
/// assert_eq!(set.values(), vec![1, 2, 3]);
/// assert_eq!(set.ceiling(&2), Some(&2));
/// assert_eq!(set.higher(&2), Some(&3));
/// ```
#[derive(Clone)]
pub struct TreeSet<T, C = Compare<T>> {
    tree: RbTree<T, (), C>,
}

impl<T: Ord> TreeSet<T> {
    /// Empty set ordered by `T`'s `Ord` implementation.
    pub fn new() -> Self {
        Self::with_comparator(natural)
    }
}

impl<T: Ord> Default for TreeSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            tree: RbTree::new(comparator),
        }
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Adds `value`. Returns `false`, leaving the set untouched, when an equal
    /// value is already present.
    pub fn add(&mut self, value: T) -> bool {
        matches!(self.tree.insert(value, ()), Inserted::New(_))
    }

    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for v in values {
            self.add(v);
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        self.tree.find(value).is_some()
    }

    pub fn contains_all<'v, I>(&self, values: I) -> bool
    where
        T: 'v,
        I: IntoIterator<Item = &'v T>,
    {
        values.into_iter().all(|v| self.contains(v))
    }

    /// Stored value equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.tree.find(value).map(|n| self.tree.key(n))
    }

    /// Removes the element equal to `value` and returns it.
    pub fn remove(&mut self, value: &T) -> Option<T> {
        let n = self.tree.find(value)?;
        let (_, k, _) = self.tree.unlink(n);
        Some(k)
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

    /// Removes every element for which `f` returns `true`.
    pub fn remove_if<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        self.retain(|v| !f(v));
    }

    /// Keeps only the elements for which `f` returns `true`.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut f: F) {
        let mut curr = self.tree.first();
        while let Some(n) = curr {
            if f(self.tree.key(n)) {
                curr = self.tree.next(n);
                continue;
            }
            let next = self.tree.next(n);
            let (freed, ..) = self.tree.unlink(n);
            curr = if freed != n { Some(n) } else { next };
        }
    }

    // ------------------------------------------------------------------- ends

    /// Smallest element.
    pub fn head(&self) -> Option<&T> {
        self.tree.first().map(|n| self.tree.key(n))
    }

    /// Largest element.
    pub fn tail(&self) -> Option<&T> {
        self.tree.last().map(|n| self.tree.key(n))
    }

    pub fn poll_head(&mut self) -> Option<T> {
        let n = self.tree.first()?;
        Some(self.tree.unlink(n).1)
    }

    pub fn poll_tail(&mut self) -> Option<T> {
        let n = self.tree.last()?;
        Some(self.tree.unlink(n).1)
    }

    // ------------------------------------------------------------- navigation

    /// Greatest element `<= value`.
    pub fn floor(&self, value: &T) -> Option<&T> {
        self.tree.floor(value).map(|n| self.tree.key(n))
    }

    /// Least element `>= value`.
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        self.tree.ceiling(value).map(|n| self.tree.key(n))
    }

    /// Least element `> value`.
    pub fn higher(&self, value: &T) -> Option<&T> {
        self.tree.higher(value).map(|n| self.tree.key(n))
    }

    /// Greatest element `< value`.
    pub fn lower(&self, value: &T) -> Option<&T> {
        self.tree.lower(value).map(|n| self.tree.key(n))
    }

    // -------------------------------------------------------------- traversal

    /// Calls `f(index, value)` in ascending order until it returns `false`.
    pub fn each<F: FnMut(usize, &T) -> bool>(&self, mut f: F) {
        for (i, v) in self.iter().enumerate() {
            if !f(i, v) {
                return;
            }
        }
    }

    /// Calls `f(index, value)` in descending order until it returns `false`.
    /// `index` counts down from `len - 1`.
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
            walk: Walk::new(&self.tree.arena, self.tree.root),
        }
    }

    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Cursor in the reset state.
    pub fn cursor(&mut self) -> TreeSetCursor<'_, T, C> {
        TreeSetCursor::new(&mut self.tree, NodePosition::Reset)
    }

    /// Cursor positioned on the element equal to `value`, if present.
    pub fn cursor_at(&mut self, value: &T) -> Option<TreeSetCursor<'_, T, C>> {
        let n = self.tree.find(value)?;
        Some(TreeSetCursor::new(&mut self.tree, NodePosition::At(n)))
    }

    // ------------------------------------------------------------ diagnostics

    /// Tree shape with node colours, for debugging.
    pub fn graph(&self) -> String
    where
        T: fmt::Debug,
    {
        self.tree.graph(&|k, _| format!("{k:?}"))
    }

    /// Validates ordering, parent links and the red-black rules.
    pub fn check_invariants(&self) -> Result<(), String> {
        self.tree.check_invariants()
    }
}

// ------------------------------------------------------------------ Iter

/// Ascending iterator over a [`TreeSet`]. Double-ended.
pub struct Iter<'a, T> {
    walk: Walk<'a, T, ()>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.walk.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back().map(|(k, _)| k)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T, C> IntoIterator for &'a TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// ---------------------------------------------------------------- std glue

impl<T: Ord> FromIterator<T> for TreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = TreeSet::new();
        set.add_all(iter);
        set
    }
}

impl<T, C> Extend<T> for TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T: fmt::Debug, C> fmt::Debug for TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, C> PartialEq for TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

// --------------------------------------------------------------- capability

impl<T, C> Container for TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn len(&self) -> usize {
        TreeSet::len(self)
    }

    fn clear(&mut self) {
        TreeSet::clear(self)
    }
}

impl<T, C> Collection<T> for TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn add(&mut self, value: T) -> bool {
        TreeSet::add(self, value)
    }

    fn remove(&mut self, value: &T) -> bool {
        TreeSet::remove(self, value).is_some()
    }

    fn contains(&self, value: &T) -> bool {
        TreeSet::contains(self, value)
    }

    fn retain(&mut self, f: &mut dyn FnMut(&T) -> bool) {
        TreeSet::retain(self, f)
    }

    fn each(&self, f: &mut dyn FnMut(usize, &T) -> bool) {
        TreeSet::each(self, f)
    }
}

impl<T, C> Iterable for TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Cursor<'a>
        = TreeSetCursor<'a, T, C>
    where
        Self: 'a;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        TreeSet::cursor(self)
    }
}
