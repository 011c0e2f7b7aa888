use cog::{CogError, Cursor, Deque, LinkedHashSet, List, Queue, Sortable};

fn set(values: &[&'static str]) -> LinkedHashSet<&'static str> {
    values.iter().copied().collect()
}

// ---------------------------------------------------------------------------
// Insertion order
// ---------------------------------------------------------------------------

#[test]
fn keeps_insertion_order() {
    let s: LinkedHashSet<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(s.values(), vec![3, 1, 2]);

    let mut s = set(&["a", "b", "c"]);
    assert!(!s.add("a"));
    assert_eq!(s.values(), vec!["a", "b", "c"]);
    assert!(s.add("d"));
    assert_eq!(s.tail(), Some(&"d"));
}

#[test]
fn insert_at_positions() {
    let mut s = set(&["a", "d"]);
    s.insert(1, "b");
    s.insert_all(2, ["c", "a", "x"]);
    assert_eq!(s.values(), vec!["a", "b", "c", "x", "d"]);
    s.insert(-1, "y");
    assert_eq!(s.values(), vec!["a", "b", "c", "x", "y", "d"]);
    s.insert(6, "z");
    assert_eq!(s.get(-1), &"z");
    s.push_head("0");
    s.push_head_all(["-2", "-1", "0"]);
    assert_eq!(s.values()[..4], ["-2", "-1", "0", "a"]);
}

#[test]
fn bad_indices_report_bounds() {
    let mut s = set(&["a", "b"]);
    assert_eq!(
        s.try_insert(3, "c"),
        Err(CogError::OutOfBounds {
            container: "LinkedHashSet",
            index: 3,
            len: 2
        })
    );
    assert!(s.try_get(-3).is_err());
    assert!(s.try_remove_at(2).is_err());
    assert!(s.try_set(5, "z").is_err());
    assert!(s.try_swap(0, -3).is_err());
    assert_eq!(s.try_get(-2), Ok(&"a"));
}

#[test]
#[should_panic(expected = "LinkedHashSet out of bounds: index=2, len=2")]
fn get_out_of_bounds_panics() {
    set(&["a", "b"]).get(2);
}

// ---------------------------------------------------------------------------
// Positional edits
// ---------------------------------------------------------------------------

#[test]
fn set_replaces_in_place_and_drops_duplicate() {
    let mut s = set(&["a", "b", "c", "d"]);
    assert_eq!(s.set(1, "x"), "b");
    assert_eq!(s.values(), vec!["a", "x", "c", "d"]);
    assert_eq!(s.set(0, "d"), "a");
    assert_eq!(s.values(), vec!["d", "x", "c"]);
    assert!(!s.contains(&"a"));
    assert_eq!(s.index_of(&"c"), Some(2));
}

#[test]
fn remove_at_and_swap() {
    let mut s = set(&["a", "b", "c", "d", "e"]);
    assert_eq!(s.remove_at(-1), "e");
    assert_eq!(s.remove_at(1), "b");
    s.swap(0, -1);
    assert_eq!(s.values(), vec!["d", "c", "a"]);
    assert_eq!(s.index_of(&"a"), Some(2));
    assert!(s.contains(&"d"));
}

#[test]
fn remove_variants() {
    let mut s: LinkedHashSet<i32> = (0..10).collect();
    assert_eq!(s.remove(&3), Some(3));
    assert_eq!(s.remove(&3), None);
    s.remove_all(&[0, 9, 42]);
    s.remove_if(|v| v % 2 == 0);
    assert_eq!(s.values(), vec![1, 5, 7]);
    s.retain(|v| *v > 1);
    assert_eq!(s.values(), vec![5, 7]);
    assert!(s.contains_all(&[5, 7]));
}

#[test]
fn sort_by_less() {
    let mut s: LinkedHashSet<i32> = [5, 3, 9, 1, 7].into_iter().collect();
    s.sort_by(|a, b| a < b);
    assert_eq!(s.values(), vec![1, 3, 5, 7, 9]);
    s.sort_by(|a, b| a > b);
    assert_eq!(s.values(), vec![9, 7, 5, 3, 1]);
    assert_eq!(s.index_of(&9), Some(0));
    assert!(s.contains(&3));
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

#[test]
fn cursor_set_value_keeps_position() {
    let mut s = set(&["a", "b", "c"]);
    let mut it = s.cursor();
    it.next();
    it.next();
    assert_eq!(it.set_value("z"), Some("b"));
    assert!(it.next());
    assert_eq!(it.value(), Some(&"c"));
    drop(it);
    assert_eq!(s.values(), vec!["a", "z", "c"]);
    assert_eq!(s.index_of(&"z"), Some(1));
}

// ---------------------------------------------------------------------------
// Capability traits
// ---------------------------------------------------------------------------

#[test]
fn usable_as_list_queue_and_deque() {
    fn rotate<D: Deque<i32>>(d: &mut D) {
        if let Some(v) = d.poll_head() {
            d.push_tail(v);
        }
    }

    let mut s: LinkedHashSet<i32> = (1..=4).collect();
    rotate(&mut s);
    assert_eq!(s.values(), vec![2, 3, 4, 1]);

    assert_eq!(Queue::peek(&s), Some(&2));
    assert_eq!(Queue::poll(&mut s), Some(2));
    Queue::push(&mut s, 2);
    assert_eq!(List::get(&s, 0), &3);
    assert_eq!(List::remove_at(&mut s, 0), 3);
    Sortable::sort_by(&mut s, |a: &i32, b: &i32| a < b);
    assert_eq!(s.values(), vec![1, 2, 4]);
}

#[test]
fn debug_and_equality() {
    let s = set(&["x", "y"]);
    assert_eq!(format!("{s:?}"), r#"{"x", "y"}"#);
    assert_eq!(s, set(&["x", "y"]));
    assert_ne!(s, set(&["y", "x"]));
}
