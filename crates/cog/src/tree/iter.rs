use std::iter::FusedIterator;

use slab::Slab;

use super::node::{self, RbNode};

/// Double-ended in-order walk over a borrowed tree.
///
/// `remaining` bounds the walk so the two ends never cross.
pub(crate) struct Walk<'a, K, V> {
    arena: &'a Slab<RbNode<K, V>>,
    front: Option<u32>,
    back: Option<u32>,
    remaining: usize,
}

impl<'a, K, V> Walk<'a, K, V> {
    pub fn new(arena: &'a Slab<RbNode<K, V>>, root: Option<u32>) -> Self {
        Self {
            arena,
            front: node::first(arena, root),
            back: node::last(arena, root),
            remaining: arena.len(),
        }
    }
}

impl<K, V> Clone for Walk<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Walk<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.front?;
        self.remaining -= 1;
        self.front = node::next(self.arena, n);
        let node = &self.arena[n as usize];
        Some((&node.k, &node.v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Walk<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let n = self.back?;
        self.remaining -= 1;
        self.back = node::prev(self.arena, n);
        let node = &self.arena[n as usize];
        Some((&node.k, &node.v))
    }
}

impl<K, V> ExactSizeIterator for Walk<'_, K, V> {}

impl<K, V> FusedIterator for Walk<'_, K, V> {}
