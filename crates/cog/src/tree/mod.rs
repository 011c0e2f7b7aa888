//! Red-black tree containers: [`TreeSet`] and [`TreeMap`].
//!
//! Both share one arena-backed red-black tree; nodes are slab slots with
//! `u32` links, parents included.

mod cursor;
mod iter;
mod node;
mod red_black;
mod tree_map;
mod tree_set;

pub use cursor::{TreeMapCursor, TreeSetCursor};
pub use tree_map::{Iter as TreeMapIter, TreeMap};
pub use tree_set::{Iter as TreeSetIter, TreeSet};
