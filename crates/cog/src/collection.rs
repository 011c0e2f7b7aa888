//! Capability traits implemented by the containers.
//!
//! Every container also exposes the same operations as inherent methods; the
//! traits exist for code that is generic over containers, and for the bulk
//! `*_col` operations that take "any other collection" as an argument.

/// Base of every container.
pub trait Container {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);
}

/// A group of values that can be traversed in a defined order.
pub trait Collection<T>: Container {
    /// Adds `value`. Returns `false` when a set already holds it.
    fn add(&mut self, value: T) -> bool;

    /// Removes `value`. Returns `false` when it was not present.
    fn remove(&mut self, value: &T) -> bool;

    fn contains(&self, value: &T) -> bool;

    /// Keeps only the values for which `f` returns `true`.
    fn retain(&mut self, f: &mut dyn FnMut(&T) -> bool);

    /// Calls `f(index, value)` in iteration order until it returns `false`.
    fn each(&self, f: &mut dyn FnMut(usize, &T) -> bool);

    fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.each(&mut |_, v| {
            out.push(v.clone());
            true
        });
        out
    }

    /// Adds every value of `other`.
    fn add_col(&mut self, other: &dyn Collection<T>)
    where
        T: Clone,
    {
        other.each(&mut |_, v| {
            self.add(v.clone());
            true
        });
    }

    /// Removes every value that `other` contains.
    fn remove_col(&mut self, other: &dyn Collection<T>) {
        if self.is_empty() || other.is_empty() {
            return;
        }
        other.each(&mut |_, v| {
            self.remove(v);
            true
        });
    }

    /// Tests whether every value of `other` is contained in `self`.
    fn contains_col(&self, other: &dyn Collection<T>) -> bool {
        if other.is_empty() {
            return true;
        }
        if self.is_empty() {
            return false;
        }
        let mut all = true;
        other.each(&mut |_, v| {
            all = self.contains(v);
            all
        });
        all
    }

    /// Keeps only the values that `other` contains.
    fn retain_col(&mut self, other: &dyn Collection<T>) {
        if self.is_empty() {
            return;
        }
        if other.is_empty() {
            self.clear();
            return;
        }
        self.retain(&mut |v| other.contains(v));
    }
}

/// An ordered collection with positional access.
///
/// Indices are `isize`: negative values count from the end, `-1` being the last
/// element. Out-of-range indices panic.
pub trait List<T>: Collection<T> {
    fn get(&self, index: isize) -> &T;

    /// Replaces the value at `index`, returning the old one.
    fn set(&mut self, index: isize, value: T) -> T;

    /// Inserts at `index`; `index == len` appends.
    fn insert(&mut self, index: isize, value: T);

    fn index_of(&self, value: &T) -> Option<usize>;

    fn remove_at(&mut self, index: isize) -> T;

    fn swap(&mut self, i: isize, j: isize);
}

/// Key/value associations.
pub trait Map<K, V>: Container {
    fn get(&self, key: &K) -> Option<&V>;

    /// Sets `key` to `value`, returning the previous value.
    fn set(&mut self, key: K, value: V) -> Option<V>;

    /// Inserts only when `key` is absent. Returns the existing value otherwise.
    fn set_if_absent(&mut self, key: K, value: V) -> Option<&V>;

    fn remove(&mut self, key: &K) -> Option<V>;

    fn contains_key(&self, key: &K) -> bool;

    /// Calls `f(key, value)` in iteration order until it returns `false`.
    fn each(&self, f: &mut dyn FnMut(&K, &V) -> bool);

    fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.each(&mut |k, _| {
            out.push(k.clone());
            true
        });
        out
    }

    fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.each(&mut |_, v| {
            out.push(v.clone());
            true
        });
        out
    }
}

pub trait Queue<T> {
    /// Head of the queue without removing it.
    fn peek(&self) -> Option<&T>;

    /// Removes and returns the head of the queue.
    fn poll(&mut self) -> Option<T>;

    /// Appends at the tail.
    fn push(&mut self, value: T);
}

/// Insertion and removal at both ends.
pub trait Deque<T> {
    fn peek_head(&self) -> Option<&T>;

    fn poll_head(&mut self) -> Option<T>;

    fn push_head(&mut self, value: T);

    fn peek_tail(&self) -> Option<&T>;

    fn poll_tail(&mut self) -> Option<T>;

    fn push_tail(&mut self, value: T);
}

pub trait Sortable<T> {
    /// Sorts by `less`. Equal elements keep their relative order.
    fn sort_by<F>(&mut self, less: F)
    where
        F: Fn(&T, &T) -> bool;
}

/// Containers that hand out a [`Cursor`](crate::Cursor) or
/// [`MapCursor`](crate::MapCursor).
pub trait Iterable {
    type Cursor<'a>
    where
        Self: 'a;

    fn cursor(&mut self) -> Self::Cursor<'_>;
}
