#![cfg(feature = "serde")]

use cog::{LinkedHashMap, LinkedHashSet, RingBuffer, TreeMap, TreeSet};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
struct Ticket {
    id: u32,
    subject: String,
}

fn ticket(id: u32, subject: &str) -> Ticket {
    Ticket {
        id,
        subject: subject.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

#[test]
fn containers_serialize_in_iteration_order() {
    let tree: TreeSet<i32> = [3, 1, 2].into_iter().collect();
    let linked: LinkedHashSet<i32> = [3, 1, 2].into_iter().collect();
    let mut ring: RingBuffer<i32> = [1, 2, 3].into_iter().collect();
    ring.poll_head();

    assert_eq!(serde_json::to_value(&tree).unwrap(), json!([1, 2, 3]));
    assert_eq!(serde_json::to_value(&linked).unwrap(), json!([3, 1, 2]));
    assert_eq!(serde_json::to_value(&ring).unwrap(), json!([2, 3]));
}

#[test]
fn maps_serialize_as_objects_in_order() {
    let mut linked = LinkedHashMap::new();
    linked.set("zeta".to_string(), 1);
    linked.set("alpha".to_string(), 2);
    assert_eq!(
        serde_json::to_string(&linked).unwrap(),
        r#"{"zeta":1,"alpha":2}"#
    );

    let tree: TreeMap<String, i32> = linked.entries().into_iter().collect();
    assert_eq!(
        serde_json::to_string(&tree).unwrap(),
        r#"{"alpha":2,"zeta":1}"#
    );
}

#[test]
fn empty_containers() {
    assert_eq!(serde_json::to_string(&TreeSet::<i32>::new()).unwrap(), "[]");
    assert_eq!(serde_json::to_string(&RingBuffer::<i32>::new()).unwrap(), "[]");
    assert_eq!(
        serde_json::to_string(&LinkedHashMap::<String, i32>::new()).unwrap(),
        "{}"
    );
    let back: TreeMap<String, i32> = serde_json::from_str("{}").unwrap();
    assert!(back.is_empty());
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn struct_values_round_trip() {
    let tickets = [ticket(7, "login"), ticket(2, "billing"), ticket(5, "export")];

    let tree: TreeSet<Ticket> = tickets.iter().cloned().collect();
    let text = serde_json::to_string(&tree).unwrap();
    let back: TreeSet<Ticket> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, tree);
    assert_eq!(back.head().map(|t| t.id), Some(2));

    let linked: LinkedHashSet<Ticket> = tickets.iter().cloned().collect();
    let back: LinkedHashSet<Ticket> =
        serde_json::from_str(&serde_json::to_string(&linked).unwrap()).unwrap();
    assert_eq!(back, linked);
    assert_eq!(back.get(0).id, 7);

    let ring: RingBuffer<Ticket> = tickets.iter().cloned().collect();
    let back: RingBuffer<Ticket> =
        serde_json::from_str(&serde_json::to_string(&ring).unwrap()).unwrap();
    assert_eq!(back, ring);
}

#[test]
fn maps_round_trip_with_integer_keys() {
    let tree: TreeMap<u32, Ticket> = [(9, ticket(9, "a")), (1, ticket(1, "b"))]
        .into_iter()
        .collect();
    let text = serde_json::to_string(&tree).unwrap();
    assert!(text.starts_with(r#"{"1":"#));
    let back: TreeMap<u32, Ticket> = serde_json::from_str(&text).unwrap();
    assert_eq!(back, tree);

    let linked: LinkedHashMap<u32, String> =
        [(9, "nine".to_string()), (1, "one".to_string())].into_iter().collect();
    let back: LinkedHashMap<u32, String> =
        serde_json::from_str(&serde_json::to_string(&linked).unwrap()).unwrap();
    assert_eq!(back.keys(), vec![9, 1]);
    assert_eq!(back, linked);
}

#[test]
fn nested_containers() {
    let mut outer: LinkedHashMap<String, TreeSet<i32>> = LinkedHashMap::new();
    outer.set("odd".to_string(), [5, 1, 3].into_iter().collect());
    outer.set("even".to_string(), [4, 2].into_iter().collect());

    let text = serde_json::to_string(&outer).unwrap();
    assert_eq!(text, r#"{"odd":[1,3,5],"even":[2,4]}"#);

    let back: LinkedHashMap<String, TreeSet<i32>> = serde_json::from_str(&text).unwrap();
    assert_eq!(back.keys(), vec!["odd".to_string(), "even".to_string()]);
    assert_eq!(back.get(&"odd".to_string()).map(|s| s.values()), Some(vec![1, 3, 5]));
}

#[test]
fn rejects_mismatched_json() {
    assert!(serde_json::from_str::<TreeSet<i32>>(r#"{"a":1}"#).is_err());
    assert!(serde_json::from_str::<LinkedHashMap<String, i32>>("[1,2]").is_err());
    assert!(serde_json::from_str::<RingBuffer<i32>>(r#"["x"]"#).is_err());
}
