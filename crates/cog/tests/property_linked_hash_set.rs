//! `LinkedHashSet` against a de-duplicated `Vec` model.

use cog::{Cursor, LinkedHashSet};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Add(u8),
    Remove(u8),
    Insert(usize, u8),
    RemoveAt(usize),
    Set(usize, u8),
    PushHead(u8),
    PollTail,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..48).prop_map(Op::Add),
        2 => (0u8..48).prop_map(Op::Remove),
        2 => (any::<usize>(), 0u8..48).prop_map(|(i, v)| Op::Insert(i, v)),
        1 => any::<usize>().prop_map(Op::RemoveAt),
        1 => (any::<usize>(), 0u8..48).prop_map(|(i, v)| Op::Set(i, v)),
        1 => (0u8..48).prop_map(Op::PushHead),
        1 => Just(Op::PollTail),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn matches_vec_model(ops in prop::collection::vec(op(), 1..300)) {
        let mut set = LinkedHashSet::new();
        let mut model: Vec<u8> = Vec::new();

        for op in ops {
            match op {
                Op::Add(v) => {
                    let absent = !model.contains(&v);
                    if absent {
                        model.push(v);
                    }
                    prop_assert_eq!(set.add(v), absent);
                }
                Op::Remove(v) => {
                    let pos = model.iter().position(|x| *x == v);
                    let expected = pos.map(|p| model.remove(p));
                    prop_assert_eq!(set.remove(&v), expected);
                }
                Op::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    if !model.contains(&v) {
                        model.insert(i, v);
                    }
                    set.insert(i as isize, v);
                }
                Op::RemoveAt(i) => {
                    if model.is_empty() {
                        continue;
                    }
                    let i = i % model.len();
                    prop_assert_eq!(set.remove_at(i as isize), model.remove(i));
                }
                Op::Set(i, v) => {
                    if model.is_empty() {
                        continue;
                    }
                    let i = i % model.len();
                    let old = std::mem::replace(&mut model[i], v);
                    if let Some(dup) = model.iter().enumerate().position(|(k, x)| k != i && *x == v) {
                        model.remove(dup);
                    }
                    prop_assert_eq!(set.set(i as isize, v), old);
                }
                Op::PushHead(v) => {
                    if !model.contains(&v) {
                        model.insert(0, v);
                    }
                    set.push_head(v);
                }
                Op::PollTail => prop_assert_eq!(set.poll_tail(), model.pop()),
            }
            prop_assert_eq!(set.values(), model.clone());
        }

        for (i, v) in model.iter().enumerate() {
            prop_assert_eq!(set.index_of(v), Some(i));
            prop_assert!(set.contains(v));
        }
    }

    #[test]
    fn reinsert_never_moves(values in prop::collection::vec(any::<u16>(), 1..100)) {
        let mut set: LinkedHashSet<u16> = values.iter().copied().collect();
        let before = set.values();
        for v in values.iter().rev() {
            prop_assert!(!set.add(*v));
        }
        prop_assert_eq!(set.values(), before);
    }

    #[test]
    fn sort_then_cursor_walk(values in prop::collection::hash_set(any::<i32>(), 0..150)) {
        let mut set: LinkedHashSet<i32> = values.iter().copied().collect();
        set.sort_by(|a, b| a < b);
        let mut sorted: Vec<i32> = values.into_iter().collect();
        sorted.sort();

        let mut walked = vec![];
        let mut it = set.cursor();
        while it.next() {
            walked.push(*it.value().unwrap());
        }
        drop(it);
        prop_assert_eq!(&walked, &sorted);
        for (i, v) in sorted.iter().enumerate() {
            prop_assert_eq!(set.index_of(v), Some(i));
        }
    }
}
