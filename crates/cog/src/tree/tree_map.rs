use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use super::cursor::TreeMapCursor;
use super::iter::Walk;
use super::red_black::{Inserted, RbTree};
use crate::collection::{Container, Iterable, Map};
use crate::compare::{natural, Compare};
use crate::cursor::NodePosition;

/// Sorted map backed by a red-black tree, keys ordered by the comparator `C`.
#[derive(Clone)]
pub struct TreeMap<K, V, C = Compare<K>> {
    tree: RbTree<K, V, C>,
}

impl<K: Ord, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self::with_comparator(natural)
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
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

    pub fn get(&self, key: &K) -> Option<&V> {
        self.tree.find(key).map(|n| self.tree.value(n))
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let n = self.tree.find(key)?;
        Some(self.tree.value_mut(n))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.tree.find(key).is_some()
    }

    pub fn contains_any<'k, I>(&self, keys: I) -> bool
    where
        K: 'k,
        I: IntoIterator<Item = &'k K>,
    {
        keys.into_iter().any(|k| self.contains_key(k))
    }

    pub fn contains_all<'k, I>(&self, keys: I) -> bool
    where
        K: 'k,
        I: IntoIterator<Item = &'k K>,
    {
        keys.into_iter().all(|k| self.contains_key(k))
    }

    /// Sets `key` to `value`. An existing key keeps its node; only the value
    /// is replaced and the previous one returned.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.tree.insert(key, value) {
            Inserted::New(_) => None,
            Inserted::Exists(n, _, value) => {
                Some(std::mem::replace(self.tree.value_mut(n), value))
            }
        }
    }

    /// Inserts only when `key` is absent. Returns the value already stored
    /// under `key` otherwise, leaving it untouched.
    pub fn set_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        match self.tree.insert(key, value) {
            Inserted::New(_) => None,
            Inserted::Exists(n, ..) => Some(self.tree.value(n)),
        }
    }

    pub fn set_entries<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (k, v) in entries {
            self.set(k, v);
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let n = self.tree.find(key)?;
        let (_, _, v) = self.tree.unlink(n);
        Some(v)
    }

    pub fn remove_all<'k, I>(&mut self, keys: I)
    where
        K: 'k,
        I: IntoIterator<Item = &'k K>,
    {
        for k in keys {
            if self.is_empty() {
                return;
            }
            self.remove(k);
        }
    }

    // ------------------------------------------------------------------- ends

    /// Entry with the smallest key.
    pub fn head(&self) -> Option<(&K, &V)> {
        self.tree.first().map(|n| self.tree.entry(n))
    }

    /// Entry with the largest key.
    pub fn tail(&self) -> Option<(&K, &V)> {
        self.tree.last().map(|n| self.tree.entry(n))
    }

    pub fn poll_head(&mut self) -> Option<(K, V)> {
        let n = self.tree.first()?;
        let (_, k, v) = self.tree.unlink(n);
        Some((k, v))
    }

    pub fn poll_tail(&mut self) -> Option<(K, V)> {
        let n = self.tree.last()?;
        let (_, k, v) = self.tree.unlink(n);
        Some((k, v))
    }

    // ------------------------------------------------------------- navigation

    /// Entry with the greatest key `<= key`.
    pub fn floor(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.floor(key).map(|n| self.tree.entry(n))
    }

    /// Entry with the least key `>= key`.
    pub fn ceiling(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.ceiling(key).map(|n| self.tree.entry(n))
    }

    pub fn higher(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.higher(key).map(|n| self.tree.entry(n))
    }

    pub fn lower(&self, key: &K) -> Option<(&K, &V)> {
        self.tree.lower(key).map(|n| self.tree.entry(n))
    }

    // -------------------------------------------------------------- traversal

    /// Calls `f(key, value)` in ascending key order until it returns `false`.
    pub fn each<F: FnMut(&K, &V) -> bool>(&self, mut f: F) {
        for (k, v) in self.iter() {
            if !f(k, v) {
                return;
            }
        }
    }

    pub fn reverse_each<F: FnMut(&K, &V) -> bool>(&self, mut f: F) {
        for (k, v) in self.iter().rev() {
            if !f(k, v) {
                return;
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            walk: Walk::new(&self.tree.arena, self.tree.root),
        }
    }

    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.iter().map(|(_, v)| v.clone()).collect()
    }

    pub fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn cursor(&mut self) -> TreeMapCursor<'_, K, V, C> {
        TreeMapCursor::new(&mut self.tree, NodePosition::Reset)
    }

    /// Cursor positioned on `key`, if present.
    pub fn cursor_at(&mut self, key: &K) -> Option<TreeMapCursor<'_, K, V, C>> {
        let n = self.tree.find(key)?;
        Some(TreeMapCursor::new(&mut self.tree, NodePosition::At(n)))
    }

    // ------------------------------------------------------------ diagnostics

    /// Tree shape with node colours. Values are included when `with_values`.
    pub fn graph(&self, with_values: bool) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        if with_values {
            self.tree.graph(&|k, v| format!("{k:?} => {v:?}"))
        } else {
            self.tree.graph(&|k, _| format!("{k:?}"))
        }
    }

    pub fn check_invariants(&self) -> Result<(), String> {
        self.tree.check_invariants()
    }
}

// ------------------------------------------------------------------ Iter

/// Ascending `(key, value)` iterator over a [`TreeMap`]. Double-ended.
pub struct Iter<'a, K, V> {
    walk: Walk<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            walk: self.walk.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.walk.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.walk.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.walk.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

// ---------------------------------------------------------------- std glue

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = TreeMap::new();
        map.set_entries(iter);
        map
    }
}

impl<K, V, C> Extend<(K, V)> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.set_entries(iter);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

// --------------------------------------------------------------- capability

impl<K, V, C> Container for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn len(&self) -> usize {
        TreeMap::len(self)
    }

    fn clear(&mut self) {
        TreeMap::clear(self)
    }
}

impl<K, V, C> Map<K, V> for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn get(&self, key: &K) -> Option<&V> {
        TreeMap::get(self, key)
    }

    fn set(&mut self, key: K, value: V) -> Option<V> {
        TreeMap::set(self, key, value)
    }

    fn set_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        TreeMap::set_if_absent(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        TreeMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        TreeMap::contains_key(self, key)
    }

    fn each(&self, f: &mut dyn FnMut(&K, &V) -> bool) {
        TreeMap::each(self, f)
    }
}

impl<K, V, C> Iterable for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Cursor<'a>
        = TreeMapCursor<'a, K, V, C>
    where
        Self: 'a;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        TreeMap::cursor(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapCursor;

    fn sample() -> TreeMap<i32, &'static str> {
        [(3, "c"), (1, "a"), (2, "b")].into_iter().collect()
    }

    // --- set / get ---

    #[test]
    fn set_replaces_value_in_place() {
        let mut map = sample();
        assert_eq!(map.set(2, "B"), Some("b"));
        assert_eq!(map.set(4, "d"), None);
        assert_eq!(map.get(&2), Some(&"B"));
        assert_eq!(map.keys(), vec![1, 2, 3, 4]);
        map.check_invariants().unwrap();
    }

    #[test]
    fn set_if_absent_keeps_existing() {
        let mut map = sample();
        assert_eq!(map.set_if_absent(1, "z"), Some(&"a"));
        assert_eq!(map.set_if_absent(0, "z"), None);
        assert_eq!(map.values(), vec!["z", "a", "b", "c"]);
    }

    #[test]
    fn get_mut_updates() {
        let mut map = sample();
        if let Some(v) = map.get_mut(&3) {
            *v = "C";
        }
        assert_eq!(map.get(&3), Some(&"C"));
        assert_eq!(map.get_mut(&9), None);
    }

    // --- remove ---

    #[test]
    fn remove_and_remove_all() {
        let mut map = sample();
        assert_eq!(map.remove(&2), Some("b"));
        assert_eq!(map.remove(&2), None);
        map.remove_all(&[1, 7]);
        assert_eq!(map.entries(), vec![(3, "c")]);
    }

    // --- navigation ---

    #[test]
    fn ends_and_neighbours() {
        let mut map: TreeMap<i32, i32> = (0..10).map(|i| (i * 10, i)).collect();
        assert_eq!(map.head(), Some((&0, &0)));
        assert_eq!(map.tail(), Some((&90, &9)));
        assert_eq!(map.floor(&35), Some((&30, &3)));
        assert_eq!(map.ceiling(&35), Some((&40, &4)));
        assert_eq!(map.higher(&40), Some((&50, &5)));
        assert_eq!(map.lower(&40), Some((&30, &3)));
        assert_eq!(map.poll_head(), Some((0, 0)));
        assert_eq!(map.poll_tail(), Some((90, 9)));
        assert_eq!(map.len(), 8);
    }

    #[test]
    fn contains_any_all() {
        let map = sample();
        assert!(map.contains_any(&[9, 2]));
        assert!(!map.contains_any(&[9]));
        assert!(map.contains_all(&[1, 3]));
        assert!(!map.contains_all(&[1, 4]));
    }

    // --- traversal ---

    #[test]
    fn reverse_each_descends() {
        let map = sample();
        let mut keys = vec![];
        map.reverse_each(|k, _| {
            keys.push(*k);
            true
        });
        assert_eq!(keys, vec![3, 2, 1]);
        assert_eq!(format!("{map:?}"), r#"{1: "a", 2: "b", 3: "c"}"#);
    }

    // --- cursor ---

    #[test]
    fn cursor_edits_values_and_removes() {
        let mut map = sample();
        let mut it = map.cursor();
        while it.next() {
            if it.key() == Some(&2) {
                assert_eq!(it.remove(), Some((2, "b")));
            } else if let Some(v) = it.value_mut() {
                *v = "x";
            }
        }
        drop(it);
        assert_eq!(map.entries(), vec![(1, "x"), (3, "x")]);
    }

    #[test]
    fn cursor_at_then_prev() {
        let mut map = sample();
        let mut it = map.cursor_at(&2).unwrap();
        assert_eq!(it.set_value("two"), Some("b"));
        assert!(it.prev());
        assert_eq!(it.key(), Some(&1));
        assert!(!it.prev());
        assert_eq!(it.key(), Some(&1));
    }

    #[test]
    #[should_panic(expected = "TreeMap can't remove an unlinked item")]
    fn cursor_double_remove_panics() {
        let mut map = sample();
        let mut it = map.cursor();
        it.prev();
        it.remove();
        it.remove();
    }

    // --- diagnostics ---

    #[test]
    fn graph_with_values() {
        let map = sample();
        assert_eq!(
            map.graph(true),
            "[b] 2 => \"b\"\n← [r] 1 => \"a\"\n→ [r] 3 => \"c\""
        );
        assert_eq!(map.graph(false), "[b] 2\n← [r] 1\n→ [r] 3");
    }
}
