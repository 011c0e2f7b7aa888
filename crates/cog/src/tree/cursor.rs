use std::cmp::Ordering;
use std::fmt;
use std::mem;

use super::red_black::{Inserted, RbTree};
use crate::cursor::{throw_unlinked_remove, Cursor, MapCursor, NodePosition};

/// Position bookkeeping shared by the set and map cursors.
struct Walker<'a, K, V, C> {
    tree: &'a mut RbTree<K, V, C>,
    pos: NodePosition,
}

impl<'a, K, V, C> Walker<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn next(&mut self) -> bool {
        let target = match self.pos {
            NodePosition::Reset => self.tree.first(),
            NodePosition::At(n) => self.tree.next(n),
            NodePosition::Removed { next, .. } => next,
        };
        self.move_to(target)
    }

    fn prev(&mut self) -> bool {
        let target = match self.pos {
            NodePosition::Reset => self.tree.last(),
            NodePosition::At(n) => self.tree.prev(n),
            NodePosition::Removed { prev, .. } => prev,
        };
        self.move_to(target)
    }

    /// Running off either end leaves the position untouched.
    fn move_to(&mut self, target: Option<u32>) -> bool {
        match target {
            Some(n) => {
                self.pos = NodePosition::At(n);
                true
            }
            None => false,
        }
    }

    fn remove(&mut self, container: &'static str) -> Option<(K, V)> {
        let n = match self.pos {
            NodePosition::Reset => return None,
            NodePosition::Removed { .. } => throw_unlinked_remove(container),
            NodePosition::At(n) => n,
        };

        // Neighbours must be captured before unlinking: a node with two
        // children keeps its slot and takes over its successor's entry.
        let prev = self.tree.prev(n);
        let mut next = self.tree.next(n);
        let (freed, k, v) = self.tree.unlink(n);
        if freed != n {
            next = Some(n);
        }

        self.pos = NodePosition::Removed { prev, next };
        Some((k, v))
    }
}

// ----------------------------------------------------------------- TreeSet

/// Cursor over a [`TreeSet`](crate::TreeSet), in ascending order.
pub struct TreeSetCursor<'a, T, C> {
    walker: Walker<'a, T, (), C>,
}

impl<'a, T, C> TreeSetCursor<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub(crate) fn new(tree: &'a mut RbTree<T, (), C>, pos: NodePosition) -> Self {
        Self {
            walker: Walker { tree, pos },
        }
    }
}

impl<T, C> Cursor for TreeSetCursor<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    type Item = T;

    fn prev(&mut self) -> bool {
        self.walker.prev()
    }

    fn next(&mut self) -> bool {
        self.walker.next()
    }

    fn value(&self) -> Option<&T> {
        let n = self.walker.pos.current()?;
        Some(self.walker.tree.key(n))
    }

    /// A value comparing equal to the current one replaces it in place.
    /// Any other value is re-inserted at its sorted position and the cursor
    /// follows it there; if the set already holds an equal value, the cursor
    /// moves onto that one instead.
    fn set_value(&mut self, value: T) -> Option<T> {
        let n = self.walker.pos.current()?;
        let tree = &mut *self.walker.tree;

        if (tree.comparator)(&value, tree.key(n)) == Ordering::Equal {
            return Some(mem::replace(&mut tree.arena[n as usize].k, value));
        }

        let (_, old, _) = tree.unlink(n);
        let slot = match tree.insert(value, ()) {
            Inserted::New(slot) => slot,
            Inserted::Exists(slot, ..) => slot,
        };
        self.walker.pos = NodePosition::At(slot);
        Some(old)
    }

    fn remove(&mut self) -> Option<T> {
        self.walker.remove("TreeSet").map(|(k, _)| k)
    }

    fn reset(&mut self) {
        self.walker.pos = NodePosition::Reset;
    }
}

impl<T, C> fmt::Debug for TreeSetCursor<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeSetCursor")
            .field("pos", &self.walker.pos)
            .finish()
    }
}

// ----------------------------------------------------------------- TreeMap

/// Cursor over a [`TreeMap`](crate::TreeMap), in ascending key order.
pub struct TreeMapCursor<'a, K, V, C> {
    walker: Walker<'a, K, V, C>,
}

impl<'a, K, V, C> TreeMapCursor<'a, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub(crate) fn new(tree: &'a mut RbTree<K, V, C>, pos: NodePosition) -> Self {
        Self {
            walker: Walker { tree, pos },
        }
    }
}

impl<K, V, C> MapCursor for TreeMapCursor<'_, K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    type Key = K;
    type Value = V;

    fn prev(&mut self) -> bool {
        self.walker.prev()
    }

    fn next(&mut self) -> bool {
        self.walker.next()
    }

    fn key(&self) -> Option<&K> {
        let n = self.walker.pos.current()?;
        Some(self.walker.tree.key(n))
    }

    fn value(&self) -> Option<&V> {
        let n = self.walker.pos.current()?;
        Some(self.walker.tree.value(n))
    }

    fn value_mut(&mut self) -> Option<&mut V> {
        let n = self.walker.pos.current()?;
        Some(self.walker.tree.value_mut(n))
    }

    fn set_value(&mut self, value: V) -> Option<V> {
        let n = self.walker.pos.current()?;
        Some(mem::replace(self.walker.tree.value_mut(n), value))
    }

    fn remove(&mut self) -> Option<(K, V)> {
        self.walker.remove("TreeMap")
    }

    fn reset(&mut self) {
        self.walker.pos = NodePosition::Reset;
    }
}

impl<K, V, C> fmt::Debug for TreeMapCursor<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeMapCursor")
            .field("pos", &self.walker.pos)
            .finish()
    }
}
