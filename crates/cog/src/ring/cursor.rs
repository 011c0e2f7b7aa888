use super::ring_buffer::RingBuffer;
use crate::cursor::{throw_unlinked_remove, Cursor};

/// Cursor position as a logical index.
///
/// `Removed(i)`: the element at `i` was removed, so its successor now sits at
/// `i` and its predecessor at `i - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum IndexPosition {
    Reset,
    At(usize),
    Removed(usize),
}

/// Cursor over a [`RingBuffer`], head to tail.
#[derive(Debug)]
pub struct RingBufferCursor<'a, T> {
    ring: &'a mut RingBuffer<T>,
    pos: IndexPosition,
}

impl<'a, T> RingBufferCursor<'a, T> {
    pub(crate) fn new(ring: &'a mut RingBuffer<T>, pos: IndexPosition) -> Self {
        Self { ring, pos }
    }

    /// Logical index of the current element.
    pub fn index(&self) -> Option<usize> {
        match self.pos {
            IndexPosition::At(i) => Some(i),
            _ => None,
        }
    }

    fn move_to(&mut self, i: Option<usize>) -> bool {
        match i {
            Some(i) if i < self.ring.len() => {
                self.pos = IndexPosition::At(i);
                true
            }
            _ => false,
        }
    }
}

impl<T> Cursor for RingBufferCursor<'_, T> {
    type Item = T;

    fn prev(&mut self) -> bool {
        let target = match self.pos {
            IndexPosition::Reset => self.ring.len().checked_sub(1),
            IndexPosition::At(i) | IndexPosition::Removed(i) => i.checked_sub(1),
        };
        self.move_to(target)
    }

    fn next(&mut self) -> bool {
        let target = match self.pos {
            IndexPosition::Reset => Some(0),
            IndexPosition::At(i) => Some(i + 1),
            IndexPosition::Removed(i) => Some(i),
        };
        self.move_to(target)
    }

    fn value(&self) -> Option<&T> {
        let i = self.index()?;
        Some(self.ring.get(i as isize))
    }

    fn set_value(&mut self, value: T) -> Option<T> {
        let i = self.index()?;
        Some(self.ring.set(i as isize, value))
    }

    fn remove(&mut self) -> Option<T> {
        let i = match self.pos {
            IndexPosition::Reset => return None,
            IndexPosition::Removed(_) => throw_unlinked_remove("RingBuffer"),
            IndexPosition::At(i) => i,
        };
        let v = self.ring.remove_at(i as isize);
        self.pos = IndexPosition::Removed(i);
        Some(v)
    }

    fn reset(&mut self) {
        self.pos = IndexPosition::Reset;
    }
}
