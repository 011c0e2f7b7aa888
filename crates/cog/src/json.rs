//! serde integration: sets and buffers as sequences, maps as maps, always in
//! iteration order.
//!
//! Deserialization rebuilds through each container's own `add`/`set` path, so
//! duplicates collapse the same way they would at runtime (first position wins
//! in the linked containers, last value wins for map keys).

use std::cmp::Ordering;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::linked::{LinkedHashMap, LinkedHashSet};
use crate::ring::RingBuffer;
use crate::tree::{TreeMap, TreeSet};

fn serialize_seq<'a, S, T, I>(serializer: S, len: usize, values: I) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut seq = serializer.serialize_seq(Some(len))?;
    for v in values {
        seq.serialize_element(v)?;
    }
    seq.end()
}

fn serialize_map<'a, S, K, V, I>(serializer: S, len: usize, entries: I) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    K: Serialize + 'a,
    V: Serialize + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    let mut map = serializer.serialize_map(Some(len))?;
    for (k, v) in entries {
        map.serialize_entry(k, v)?;
    }
    map.end()
}

impl<T: Serialize, C> Serialize for TreeSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_seq(serializer, self.len(), self.iter())
    }
}

impl<T: Serialize, S> Serialize for LinkedHashSet<T, S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serialize_seq(serializer, self.len(), self.iter())
    }
}

impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_seq(serializer, self.len(), self.iter())
    }
}

impl<K: Serialize, V: Serialize, C> Serialize for TreeMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_map(serializer, self.len(), self.iter())
    }
}

impl<K: Serialize, V: Serialize, S> Serialize for LinkedHashMap<K, V, S> {
    fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
        serialize_map(serializer, self.len(), self.iter())
    }
}

/// Fills an empty container from a sequence.
struct SeqVisitor<C, T> {
    empty: C,
    kind: &'static str,
    marker: PhantomData<fn() -> T>,
}

impl<C, T> SeqVisitor<C, T> {
    fn new(empty: C, kind: &'static str) -> Self {
        Self {
            empty,
            kind,
            marker: PhantomData,
        }
    }
}

impl<'de, C, T> Visitor<'de> for SeqVisitor<C, T>
where
    C: Extend<T>,
    T: Deserialize<'de>,
{
    type Value = C;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a sequence of {} values", self.kind)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<C, A::Error> {
        let mut out = self.empty;
        while let Some(v) = seq.next_element()? {
            out.extend(Some(v));
        }
        Ok(out)
    }
}

/// Fills an empty container from a map.
struct MapVisitor<M, K, V> {
    empty: M,
    kind: &'static str,
    marker: PhantomData<fn() -> (K, V)>,
}

impl<M, K, V> MapVisitor<M, K, V> {
    fn new(empty: M, kind: &'static str) -> Self {
        Self {
            empty,
            kind,
            marker: PhantomData,
        }
    }
}

impl<'de, M, K, V> Visitor<'de> for MapVisitor<M, K, V>
where
    M: Extend<(K, V)>,
    K: Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = M;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a {} object", self.kind)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<M, A::Error> {
        let mut out = self.empty;
        while let Some(entry) = access.next_entry()? {
            out.extend(Some(entry));
        }
        Ok(out)
    }
}

impl<'de, T> Deserialize<'de> for TreeSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor::new(TreeSet::new(), "TreeSet"))
    }
}

impl<'de, T, S> Deserialize<'de> for LinkedHashSet<T, S>
where
    T: Deserialize<'de> + Hash + Eq,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let empty = LinkedHashSet::with_hasher(S::default());
        deserializer.deserialize_seq(SeqVisitor::new(empty, "LinkedHashSet"))
    }
}

impl<'de, T> Deserialize<'de> for RingBuffer<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SeqVisitor::new(RingBuffer::new(), "RingBuffer"))
    }
}

impl<'de, K, V> Deserialize<'de> for TreeMap<K, V>
where
    K: Deserialize<'de> + Ord,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor::new(TreeMap::new(), "TreeMap"))
    }
}

impl<'de, K, V, S> Deserialize<'de> for LinkedHashMap<K, V, S>
where
    K: Deserialize<'de> + Hash + Eq,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let empty = LinkedHashMap::with_hasher(S::default());
        deserializer.deserialize_map(MapVisitor::new(empty, "LinkedHashMap"))
    }
}
