use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::mem;

use super::table::LinkedTable;
use crate::cursor::{throw_unlinked_remove, Cursor, MapCursor, NodePosition};

struct Walker<'a, K, V, S> {
    table: &'a mut LinkedTable<K, V, S>,
    pos: NodePosition,
}

impl<K, V, S> Walker<'_, K, V, S> {
    fn next(&mut self) -> bool {
        let target = match self.pos {
            NodePosition::Reset => self.table.head(),
            NodePosition::At(n) => self.table.next(n),
            NodePosition::Removed { next, .. } => next,
        };
        self.move_to(target)
    }

    fn prev(&mut self) -> bool {
        let target = match self.pos {
            NodePosition::Reset => self.table.tail(),
            NodePosition::At(n) => self.table.prev(n),
            NodePosition::Removed { prev, .. } => prev,
        };
        self.move_to(target)
    }

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
        let prev = self.table.prev(n);
        let next = self.table.next(n);
        let entry = self.table.unlink(n);
        self.pos = NodePosition::Removed { prev, next };
        Some(entry)
    }
}

// ----------------------------------------------------------- LinkedHashSet

/// Cursor over a [`LinkedHashSet`](crate::LinkedHashSet), in insertion order.
pub struct LinkedHashSetCursor<'a, T, S> {
    walker: Walker<'a, T, (), S>,
}

impl<'a, T, S> LinkedHashSetCursor<'a, T, S> {
    pub(crate) fn new(table: &'a mut LinkedTable<T, (), S>, pos: NodePosition) -> Self {
        Self {
            walker: Walker { table, pos },
        }
    }
}

impl<T, S> Cursor for LinkedHashSetCursor<'_, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
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
        Some(&self.walker.table.node(n).key)
    }

    /// Replaces the current value without moving it. If the set already holds
    /// `value` elsewhere, that other entry is removed.
    fn set_value(&mut self, value: T) -> Option<T> {
        let n = self.walker.pos.current()?;
        Some(self.walker.table.rekey(n, value))
    }

    fn remove(&mut self) -> Option<T> {
        self.walker.remove("LinkedHashSet").map(|(k, _)| k)
    }

    fn reset(&mut self) {
        self.walker.pos = NodePosition::Reset;
    }
}

impl<T, S> fmt::Debug for LinkedHashSetCursor<'_, T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedHashSetCursor")
            .field("pos", &self.walker.pos)
            .finish()
    }
}

// ----------------------------------------------------------- LinkedHashMap

/// Cursor over a [`LinkedHashMap`](crate::LinkedHashMap), in insertion order.
pub struct LinkedHashMapCursor<'a, K, V, S> {
    walker: Walker<'a, K, V, S>,
}

impl<'a, K, V, S> LinkedHashMapCursor<'a, K, V, S> {
    pub(crate) fn new(table: &'a mut LinkedTable<K, V, S>, pos: NodePosition) -> Self {
        Self {
            walker: Walker { table, pos },
        }
    }
}

impl<K, V, S> MapCursor for LinkedHashMapCursor<'_, K, V, S> {
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
        Some(&self.walker.table.node(n).key)
    }

    fn value(&self) -> Option<&V> {
        let n = self.walker.pos.current()?;
        Some(&self.walker.table.node(n).value)
    }

    fn value_mut(&mut self) -> Option<&mut V> {
        let n = self.walker.pos.current()?;
        Some(&mut self.walker.table.node_mut(n).value)
    }

    fn set_value(&mut self, value: V) -> Option<V> {
        let n = self.walker.pos.current()?;
        Some(mem::replace(&mut self.walker.table.node_mut(n).value, value))
    }

    fn remove(&mut self) -> Option<(K, V)> {
        self.walker.remove("LinkedHashMap")
    }

    fn reset(&mut self) {
        self.walker.pos = NodePosition::Reset;
    }
}

impl<K, V, S> fmt::Debug for LinkedHashMapCursor<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedHashMapCursor")
            .field("pos", &self.walker.pos)
            .finish()
    }
}
