//! Insertion-ordered hash containers: [`LinkedHashSet`] and [`LinkedHashMap`].

mod cursor;
mod linked_hash_map;
mod linked_hash_set;
mod table;

pub use cursor::{LinkedHashMapCursor, LinkedHashSetCursor};
pub use linked_hash_map::{Iter as LinkedHashMapIter, LinkedHashMap};
pub use linked_hash_set::{Iter as LinkedHashSetIter, LinkedHashSet};
