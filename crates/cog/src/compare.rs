//! Comparator and less-function contracts used by the ordered containers.

use std::cmp::Ordering;

/// Total order over `T`, as consumed by `TreeSet`/`TreeMap`.
pub type Compare<T> = fn(&T, &T) -> Ordering;

/// Strict weak "less than", as consumed by `sort_by`.
pub type Less<T> = fn(&T, &T) -> bool;

/// The type's own `Ord` order. Default comparator of the tree containers.
pub fn natural<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// The reverse of the type's `Ord` order.
pub fn reverse<T: Ord>(a: &T, b: &T) -> Ordering {
    b.cmp(a)
}

/// Float comparison where values that are neither greater nor less compare equal (NaN included).
pub fn compare_f64(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

pub fn compare_f32(a: &f32, b: &f32) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Derives a less-function from a comparator.
pub fn less_of<T>(compare: impl Fn(&T, &T) -> Ordering) -> impl Fn(&T, &T) -> bool {
    move |a, b| compare(a, b) == Ordering::Less
}

/// Turns a less-function back into an `Ordering` for `slice::sort_by`-style APIs.
pub(crate) fn ordering_of<T>(less: &impl Fn(&T, &T) -> bool, a: &T, b: &T) -> Ordering {
    if less(a, b) {
        Ordering::Less
    } else if less(b, a) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_and_reverse() {
        assert_eq!(natural(&1, &2), Ordering::Less);
        assert_eq!(reverse(&1, &2), Ordering::Greater);
        assert_eq!(natural(&"b", &"b"), Ordering::Equal);
    }

    #[test]
    fn float_nan_compares_equal() {
        assert_eq!(compare_f64(&f64::NAN, &1.0), Ordering::Equal);
        assert_eq!(compare_f64(&0.5, &1.0), Ordering::Less);
        assert_eq!(compare_f32(&2.0, &1.0), Ordering::Greater);
    }

    #[test]
    fn less_round_trip() {
        let less = less_of(natural::<i32>);
        assert!(less(&1, &2));
        assert!(!less(&2, &2));
        assert_eq!(ordering_of(&less, &3, &1), Ordering::Greater);
        assert_eq!(ordering_of(&less, &1, &1), Ordering::Equal);
    }
}
