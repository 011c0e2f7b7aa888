//! Sort adapter over anything exposing `len`/`at`/`swap`.
//!
//! The comparison sort itself is `slice::sort_by` run over a permutation of
//! positions; the container is then rearranged with `swap` calls only, so any
//! positional container can share one `sort_by` implementation.

use crate::compare::ordering_of;

/// Random access plus element swapping, the minimum a container needs to be sorted.
pub trait Indexed<T> {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at logical position `i` (`i < len`).
    fn at(&self, i: usize) -> &T;

    fn swap(&mut self, i: usize, j: usize);
}

/// Sorts `items` by `less`. Stable: equal elements keep their relative order.
pub fn sort<T, S, F>(items: &mut S, less: F)
where
    S: Indexed<T> + ?Sized,
    F: Fn(&T, &T) -> bool,
{
    let n = items.len();
    if n < 2 {
        return;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| ordering_of(&less, items.at(a), items.at(b)));
    log::trace!("sorter: permuting {n} elements");
    apply_permutation(items, &order);
}

/// Rearranges `items` so that position `k` holds what was at `order[k]`.
fn apply_permutation<T, S>(items: &mut S, order: &[usize])
where
    S: Indexed<T> + ?Sized,
{
    let mut done = vec![false; order.len()];
    for start in 0..order.len() {
        if done[start] {
            continue;
        }
        let mut k = start;
        loop {
            done[k] = true;
            let src = order[k];
            if src == start {
                break;
            }
            items.swap(k, src);
            k = src;
        }
    }
}
