//! In-memory containers with stateful, bidirectional cursors.
//!
//! - [`TreeSet`] / [`TreeMap`]: red-black tree, ordered by an injected comparator.
//! - [`LinkedHashSet`] / [`LinkedHashMap`]: hash lookup, insertion order iteration.
//! - [`RingBuffer`]: growable circular deque with indexed access.
//!
//! Every container hands out a cursor (see [`Cursor`] and [`MapCursor`]) that
//! can walk in both directions and remove the current element without losing
//! its place.
//!
//! ```
//! use cog::{LinkedHashSet, RingBuffer, TreeSet};
//!
//! let tree: TreeSet<i32> = [3, 1, 2].into_iter().collect();
//! assert_eq!(tree.values(), vec![1, 2, 3]);
//!
//! let linked: LinkedHashSet<i32> = [3, 1, 2].into_iter().collect();
//! assert_eq!(linked.values(), vec![3, 1, 2]);
//!
//! let mut ring: RingBuffer<i32> = [1, 2, 3].into_iter().collect();
//! assert_eq!(ring.poll_head(), Some(1));
//! assert_eq!(ring.values(), vec![2, 3]);
//! ```
//!
//! Containers are single-threaded; none of them lock internally.

mod collection;
pub mod compare;
mod cursor;
mod error;
#[cfg(feature = "serde")]
mod json;
pub mod linked;
mod print;
pub mod ring;
pub mod sorter;
pub mod tree;

pub use collection::{Collection, Container, Deque, Iterable, List, Map, Queue, Sortable};
pub use cursor::{Cursor, MapCursor};
pub use error::CogError;
pub use linked::{LinkedHashMap, LinkedHashMapCursor, LinkedHashSet, LinkedHashSetCursor};
pub use ring::{double_up, RingBuffer, RingBufferCursor, MIN_CAPACITY};
pub use tree::{TreeMap, TreeMapCursor, TreeSet, TreeSetCursor};
