use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;
use std::mem;

use super::cursor::LinkedHashMapCursor;
use super::table::{self, LinkedTable};
use crate::collection::{Container, Iterable, Map};
use crate::cursor::NodePosition;

/// Hash map that iterates in key insertion order.
///
/// Setting an existing key replaces its value without moving the entry; only
/// new keys are appended.
///
/// ```
/// use cog::LinkedHashMap;
///
/// let mut map = LinkedHashMap::new();
/// map.set("b", 1);
/// map.set("a", 2);
/// map.set("b", 3);
/// assert_eq!(map.keys(), vec!["b", "a"]);
/// assert_eq!(map.values(), vec![3, 2]);
/// ```
#[derive(Clone)]
pub struct LinkedHashMap<K, V, S = RandomState> {
    table: LinkedTable<K, V, S>,
}

impl<K, V> LinkedHashMap<K, V> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl<K, V> Default for LinkedHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> LinkedHashMap<K, V, S> {
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

    /// Oldest entry.
    pub fn head(&self) -> Option<(&K, &V)> {
        self.table.head().map(|n| self.entry(n))
    }

    /// Newest entry.
    pub fn tail(&self) -> Option<(&K, &V)> {
        self.table.tail().map(|n| self.entry(n))
    }

    pub fn poll_head(&mut self) -> Option<(K, V)> {
        let n = self.table.head()?;
        Some(self.table.unlink(n))
    }

    pub fn poll_tail(&mut self) -> Option<(K, V)> {
        let n = self.table.tail()?;
        Some(self.table.unlink(n))
    }

    fn entry(&self, n: u32) -> (&K, &V) {
        let node = self.table.node(n);
        (&node.key, &node.value)
    }

    /// Calls `f(key, value)` in insertion order until it returns `false`.
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
            inner: self.table.iter(),
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

    pub fn cursor(&mut self) -> LinkedHashMapCursor<'_, K, V, S> {
        LinkedHashMapCursor::new(&mut self.table, NodePosition::Reset)
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.find(key).map(|n| &self.table.node(n).value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let n = self.table.find(key)?;
        Some(&mut self.table.node_mut(n).value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.table.find(key).is_some()
    }

    pub fn contains_all<'k, I>(&self, keys: I) -> bool
    where
        K: 'k,
        I: IntoIterator<Item = &'k K>,
    {
        keys.into_iter().all(|k| self.contains_key(k))
    }

    /// Sets `key` to `value`, returning the previous value. An existing key
    /// keeps its position.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        match self.table.find(&key) {
            Some(n) => Some(mem::replace(&mut self.table.node_mut(n).value, value)),
            None => {
                self.table.link(key, value, None);
                None
            }
        }
    }

    /// Appends `key` only when absent. Returns the value already stored
    /// otherwise.
    pub fn set_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        match self.table.find(&key) {
            Some(n) => Some(&self.table.node(n).value),
            None => {
                self.table.link(key, value, None);
                None
            }
        }
    }

    pub fn set_entries<I: IntoIterator<Item = (K, V)>>(&mut self, entries: I) {
        for (k, v) in entries {
            self.set(k, v);
        }
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        let n = self.table.find(key)?;
        Some(self.table.unlink(n).1)
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

    /// Cursor positioned on `key`, if present.
    pub fn cursor_at(&mut self, key: &K) -> Option<LinkedHashMapCursor<'_, K, V, S>> {
        let n = self.table.find(key)?;
        Some(LinkedHashMapCursor::new(
            &mut self.table,
            NodePosition::At(n),
        ))
    }
}

// ------------------------------------------------------------------ Iter

/// Insertion-order `(key, value)` iterator over a [`LinkedHashMap`].
pub struct Iter<'a, K, V> {
    inner: table::Iter<'a, K, V>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

// ---------------------------------------------------------------- std glue

impl<K: Hash + Eq, V> FromIterator<(K, V)> for LinkedHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = LinkedHashMap::new();
        map.set_entries(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.set_entries(iter);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for LinkedHashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, S> PartialEq for LinkedHashMap<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

// --------------------------------------------------------------- capability

impl<K, V, S> Container for LinkedHashMap<K, V, S> {
    fn len(&self) -> usize {
        LinkedHashMap::len(self)
    }

    fn clear(&mut self) {
        LinkedHashMap::clear(self)
    }
}

impl<K, V, S> Map<K, V> for LinkedHashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn get(&self, key: &K) -> Option<&V> {
        LinkedHashMap::get(self, key)
    }

    fn set(&mut self, key: K, value: V) -> Option<V> {
        LinkedHashMap::set(self, key, value)
    }

    fn set_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        LinkedHashMap::set_if_absent(self, key, value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        LinkedHashMap::remove(self, key)
    }

    fn contains_key(&self, key: &K) -> bool {
        LinkedHashMap::contains_key(self, key)
    }

    fn each(&self, f: &mut dyn FnMut(&K, &V) -> bool) {
        LinkedHashMap::each(self, f)
    }
}

impl<K, V, S> Iterable for LinkedHashMap<K, V, S> {
    type Cursor<'a>
        = LinkedHashMapCursor<'a, K, V, S>
    where
        Self: 'a;

    fn cursor(&mut self) -> Self::Cursor<'_> {
        LinkedHashMap::cursor(self)
    }
}
