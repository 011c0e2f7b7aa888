//! Stateful, bidirectional cursors with live removal.
//!
//! A cursor is in one of three states:
//!
//! - **reset**: before the first / after the last element. `next()` moves to the
//!   first element, `prev()` to the last.
//! - **positioned**: `value()`, `set_value()` and `remove()` act on the current
//!   element.
//! - **removed**: the current element was deleted through this cursor. Only its
//!   neighbours are remembered, so `next()`/`prev()` resume from the element that
//!   followed/preceded it. A second `remove()` in this state panics.
//!
//! Cursors hold the container's `&mut` borrow, so the container cannot be
//! changed behind a live cursor's back.
//!
//! ```
//! use cog::{Cursor, TreeSet};
//!
//! let mut set: TreeSet<i32> = [5, 1, 4, 2, 3].into_iter().collect();
//! let mut it = set.cursor();
//! while it.next() {
//!     if it.value().is_some_and(|v| v % 2 == 0) {
//!         it.remove();
//!     }
//! }
//! assert_eq!(set.values(), vec![1, 3, 5]);
//! ```

/// Cursor over a single-valued container (sets, lists, buffers).
pub trait Cursor {
    type Item;

    /// Moves to the previous element. Returns `false` when there is none.
    fn prev(&mut self) -> bool;

    /// Moves to the next element. Returns `false` when there is none.
    #[allow(clippy::should_implement_trait)]
    fn next(&mut self) -> bool;

    /// Current element; `None` in the reset and removed states.
    fn value(&self) -> Option<&Self::Item>;

    /// Replaces the current element, returning the old one.
    /// Does nothing (and returns `None`) unless positioned.
    fn set_value(&mut self, value: Self::Item) -> Option<Self::Item>;

    /// Removes the current element and returns it.
    ///
    /// # Panics
    ///
    /// When the current element was already removed through this cursor.
    fn remove(&mut self) -> Option<Self::Item>;

    /// Back to the reset state.
    fn reset(&mut self);
}

/// Cursor over a key/value container.
pub trait MapCursor {
    type Key;
    type Value;

    fn prev(&mut self) -> bool;

    #[allow(clippy::should_implement_trait)]
    fn next(&mut self) -> bool;

    fn key(&self) -> Option<&Self::Key>;

    fn value(&self) -> Option<&Self::Value>;

    fn value_mut(&mut self) -> Option<&mut Self::Value>;

    /// Replaces the current value in place. Keys never move.
    fn set_value(&mut self, value: Self::Value) -> Option<Self::Value>;

    /// # Panics
    ///
    /// When the current entry was already removed through this cursor.
    fn remove(&mut self) -> Option<(Self::Key, Self::Value)>;

    fn reset(&mut self);
}

/// Cursor position over a node-linked container (tree or linked list).
///
/// Node ids are arena indices; `Removed` keeps the neighbours of the deleted
/// node, captured before it was unlinked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NodePosition {
    Reset,
    At(u32),
    Removed { prev: Option<u32>, next: Option<u32> },
}

impl NodePosition {
    pub(crate) fn current(&self) -> Option<u32> {
        match *self {
            NodePosition::At(n) => Some(n),
            _ => None,
        }
    }
}

#[track_caller]
pub(crate) fn throw_unlinked_remove(container: &'static str) -> ! {
    panic!("{}", crate::CogError::UnlinkedRemove { container })
}
