use std::hash::{BuildHasher, Hash};
use std::iter::FusedIterator;

use hashbrown::HashTable;
use slab::Slab;

use crate::sorter::{self, Indexed};

#[derive(Clone, Debug)]
pub(crate) struct LinkedNode<K, V> {
    pub key: K,
    pub value: V,
    hash: u64,
    prev: Option<u32>,
    next: Option<u32>,
}

/// Hash index over a doubly linked list of entries.
///
/// Entries live in a slab and are chained through `prev`/`next` slot links;
/// the hash table stores slots only. Both always hold the same entry set.
#[derive(Clone)]
pub(crate) struct LinkedTable<K, V, S> {
    head: Option<u32>,
    tail: Option<u32>,
    nodes: Slab<LinkedNode<K, V>>,
    table: HashTable<u32>,
    hasher: S,
}

impl<K, V, S> LinkedTable<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            head: None,
            tail: None,
            nodes: Slab::new(),
            table: HashTable::new(),
            hasher,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.nodes.clear();
        self.table.clear();
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    pub fn head(&self) -> Option<u32> {
        self.head
    }

    pub fn tail(&self) -> Option<u32> {
        self.tail
    }

    pub fn next(&self, n: u32) -> Option<u32> {
        self.nodes[n as usize].next
    }

    pub fn prev(&self, n: u32) -> Option<u32> {
        self.nodes[n as usize].prev
    }

    pub fn node(&self, n: u32) -> &LinkedNode<K, V> {
        &self.nodes[n as usize]
    }

    pub fn node_mut(&mut self, n: u32) -> &mut LinkedNode<K, V> {
        &mut self.nodes[n as usize]
    }

    /// Slot at list position `index` (`index < len`), walking from whichever
    /// end is closer.
    pub fn node_at(&self, index: usize) -> u32 {
        let len = self.len();
        debug_assert!(index < len);
        if index < len / 2 {
            let mut curr = self.head.expect("non-empty list has a head");
            for _ in 0..index {
                curr = self.nodes[curr as usize].next.expect("index within list");
            }
            curr
        } else {
            let mut curr = self.tail.expect("non-empty list has a tail");
            for _ in index + 1..len {
                curr = self.nodes[curr as usize].prev.expect("index within list");
            }
            curr
        }
    }

    /// List position of slot `n`.
    pub fn position(&self, n: u32) -> usize {
        let mut index = 0;
        let mut curr = self.nodes[n as usize].prev;
        while let Some(p) = curr {
            index += 1;
            curr = self.nodes[p as usize].prev;
        }
        index
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.head,
            back: self.tail,
            remaining: self.nodes.len(),
        }
    }

    /// Removes slot `n` from both the list and the hash index.
    pub fn unlink(&mut self, n: u32) -> (K, V) {
        let node = self.nodes.remove(n as usize);
        if let Ok(occupied) = self.table.find_entry(node.hash, |&slot| slot == n) {
            occupied.remove();
        }
        self.splice_out(node.prev, node.next);
        (node.key, node.value)
    }

    fn splice_out(&mut self, prev: Option<u32>, next: Option<u32>) {
        match prev {
            Some(p) => self.nodes[p as usize].next = next,
            None => self.head = next,
        }
        match next {
            Some(nx) => self.nodes[nx as usize].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Swaps the entries stored at slots `a` and `b`, keeping both slots in
    /// place in the list.
    pub fn swap_entries(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        let (ha, hb) = (self.nodes[a as usize].hash, self.nodes[b as usize].hash);
        for (hash, n) in [(ha, a), (hb, b)] {
            if let Ok(occupied) = self.table.find_entry(hash, |&slot| slot == n) {
                occupied.remove();
            }
        }
        if let Some((x, y)) = self.nodes.get2_mut(a as usize, b as usize) {
            std::mem::swap(&mut x.key, &mut y.key);
            std::mem::swap(&mut x.value, &mut y.value);
            std::mem::swap(&mut x.hash, &mut y.hash);
        }
        let nodes = &self.nodes;
        self.table
            .insert_unique(hb, a, |&slot| nodes[slot as usize].hash);
        self.table
            .insert_unique(ha, b, |&slot| nodes[slot as usize].hash);
    }

    /// Rebuilds the list so that it follows `order`, a permutation of every
    /// live slot.
    pub fn relink(&mut self, order: &[u32]) {
        log::trace!("linked table: relinking {} entries", order.len());
        self.head = order.first().copied();
        self.tail = order.last().copied();
        for (i, &n) in order.iter().enumerate() {
            let node = &mut self.nodes[n as usize];
            node.prev = i.checked_sub(1).map(|p| order[p]);
            node.next = order.get(i + 1).copied();
        }
    }

    /// Sorts the list by `less` on entries. Stable.
    pub fn sort_by<F>(&mut self, less: F)
    where
        F: Fn(&LinkedNode<K, V>, &LinkedNode<K, V>) -> bool,
    {
        if self.len() < 2 {
            return;
        }
        let mut view = SlotOrder {
            nodes: &self.nodes,
            order: self.iter_slots().collect(),
        };
        sorter::sort(&mut view, less);
        let order = view.order;
        self.relink(&order);
    }

    fn iter_slots(&self) -> impl Iterator<Item = u32> + '_ {
        let mut curr = self.head;
        std::iter::from_fn(move || {
            let n = curr?;
            curr = self.nodes[n as usize].next;
            Some(n)
        })
    }

    #[cfg(test)]
    pub fn assert_linked(&self) {
        let mut count = 0;
        let mut prev = None;
        let mut curr = self.head;
        while let Some(n) = curr {
            let node = &self.nodes[n as usize];
            assert_eq!(node.prev, prev, "broken prev link at slot {n}");
            assert!(
                self.table.find(node.hash, |&slot| slot == n).is_some(),
                "slot {n} missing from hash index"
            );
            count += 1;
            prev = curr;
            curr = node.next;
        }
        assert_eq!(self.tail, prev);
        assert_eq!(count, self.nodes.len());
        assert_eq!(self.table.len(), self.nodes.len());
    }
}

impl<K, V, S> LinkedTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    pub fn find(&self, key: &K) -> Option<u32> {
        let hash = self.hasher.hash_one(key);
        self.table
            .find(hash, |&slot| self.nodes[slot as usize].key == *key)
            .copied()
    }

    /// Links a new entry right before `before` (`None` appends). The key must
    /// not be present yet.
    pub fn link(&mut self, key: K, value: V, before: Option<u32>) -> u32 {
        let hash = self.hasher.hash_one(&key);
        let prev = match before {
            Some(b) => self.nodes[b as usize].prev,
            None => self.tail,
        };
        let n = self.nodes.insert(LinkedNode {
            key,
            value,
            hash,
            prev,
            next: before,
        }) as u32;

        match prev {
            Some(p) => self.nodes[p as usize].next = Some(n),
            None => self.head = Some(n),
        }
        match before {
            Some(b) => self.nodes[b as usize].prev = Some(n),
            None => self.tail = Some(n),
        }

        let nodes = &self.nodes;
        self.table
            .insert_unique(hash, n, |&slot| nodes[slot as usize].hash);
        n
    }

    /// Gives slot `n` a new key in place. Any other entry already holding
    /// `key` is unlinked first. Returns the old key.
    pub fn rekey(&mut self, n: u32, key: K) -> K {
        if let Some(dup) = self.find(&key) {
            if dup != n {
                self.unlink(dup);
            }
        }

        let old_hash = self.nodes[n as usize].hash;
        if let Ok(occupied) = self.table.find_entry(old_hash, |&slot| slot == n) {
            occupied.remove();
        }

        let hash = self.hasher.hash_one(&key);
        let node = &mut self.nodes[n as usize];
        node.hash = hash;
        let old = std::mem::replace(&mut node.key, key);

        let nodes = &self.nodes;
        self.table
            .insert_unique(hash, n, |&slot| nodes[slot as usize].hash);
        old
    }
}

/// List order as a slot vector, sortable through [`Indexed`].
struct SlotOrder<'a, K, V> {
    nodes: &'a Slab<LinkedNode<K, V>>,
    order: Vec<u32>,
}

impl<K, V> Indexed<LinkedNode<K, V>> for SlotOrder<'_, K, V> {
    fn len(&self) -> usize {
        self.order.len()
    }

    fn at(&self, i: usize) -> &LinkedNode<K, V> {
        &self.nodes[self.order[i] as usize]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.order.swap(i, j);
    }
}

/// Double-ended walk over the list.
pub(crate) struct Iter<'a, K, V> {
    nodes: &'a Slab<LinkedNode<K, V>>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.front? as usize];
        self.remaining -= 1;
        self.front = node.next;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = &self.nodes[self.back? as usize];
        self.remaining -= 1;
        self.back = node.prev;
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::RandomState;

    type Table = LinkedTable<&'static str, i32, RandomState>;

    fn table(keys: &[&'static str]) -> Table {
        let mut t = LinkedTable::with_hasher(RandomState::new());
        for (i, k) in keys.iter().enumerate() {
            t.link(*k, i as i32, None);
        }
        t
    }

    fn keys(t: &Table) -> Vec<&'static str> {
        t.iter().map(|(k, _)| *k).collect()
    }

    // --- link / unlink ---

    #[test]
    fn link_before_and_append() {
        let mut t = table(&["a", "c"]);
        let c = t.find(&"c").unwrap();
        t.link("b", 9, Some(c));
        let a = t.find(&"a").unwrap();
        t.link("_", 9, Some(a));
        assert_eq!(keys(&t), vec!["_", "a", "b", "c"]);
        t.assert_linked();
    }

    #[test]
    fn unlink_ends_and_middle() {
        let mut t = table(&["a", "b", "c", "d"]);
        for k in ["a", "c", "d"] {
            let n = t.find(&k).unwrap();
            t.unlink(n);
            t.assert_linked();
        }
        assert_eq!(keys(&t), vec!["b"]);
        let b = t.find(&"b").unwrap();
        assert_eq!(t.unlink(b), ("b", 1));
        assert_eq!(t.head(), None);
        assert_eq!(t.tail(), None);
        assert_eq!(t.find(&"b"), None);
    }

    // --- positions ---

    #[test]
    fn node_at_from_both_ends() {
        let t = table(&["a", "b", "c", "d", "e"]);
        for (i, k) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            let n = t.node_at(i);
            assert_eq!(t.node(n).key, *k);
            assert_eq!(t.position(n), i);
        }
    }

    // --- rekey / swap ---

    #[test]
    fn rekey_drops_duplicate() {
        let mut t = table(&["a", "b", "c"]);
        let a = t.find(&"a").unwrap();
        assert_eq!(t.rekey(a, "c"), "a");
        assert_eq!(keys(&t), vec!["c", "b"]);
        assert_eq!(t.find(&"c"), Some(a));
        assert_eq!(t.find(&"a"), None);
        t.assert_linked();
    }

    #[test]
    fn swap_entries_updates_index() {
        let mut t = table(&["a", "b", "c"]);
        let (a, c) = (t.find(&"a").unwrap(), t.find(&"c").unwrap());
        t.swap_entries(a, c);
        assert_eq!(keys(&t), vec!["c", "b", "a"]);
        assert_eq!(t.find(&"c"), Some(a));
        assert_eq!(t.find(&"a"), Some(c));
        t.assert_linked();
    }

    // --- sort ---

    #[test]
    fn sort_relinks_by_value() {
        let mut t = table(&["x", "y", "z"]);
        for (n, v) in [("x", 3), ("y", 1), ("z", 2)] {
            let slot = t.find(&n).unwrap();
            t.node_mut(slot).value = v;
        }
        t.sort_by(|a, b| a.value < b.value);
        assert_eq!(keys(&t), vec!["y", "z", "x"]);
        t.assert_linked();
    }
}
