use std::cmp::Ordering;
use std::fmt;
use std::mem;

use slab::Slab;

use super::node::{self, RbNode};
use crate::print::{print_binary, PrintChild};

/// Result of [`RbTree::insert`].
pub(crate) enum Inserted<K, V> {
    /// A new node was linked at this slot.
    New(u32),
    /// A node with an equal key already lives at this slot; the rejected
    /// key/value pair is handed back untouched.
    Exists(u32, K, V),
}

/// Arena-backed red-black tree shared by `TreeSet` and `TreeMap`.
///
/// Nodes are addressed by their slab slot. Deleting a node with two children
/// moves its in-order successor's entry into it and frees the successor's slot
/// instead, so callers holding slots across a delete must go through
/// [`RbTree::unlink`]'s return value.
#[derive(Clone)]
pub(crate) struct RbTree<K, V, C> {
    pub root: Option<u32>,
    pub arena: Slab<RbNode<K, V>>,
    pub comparator: C,
}

impl<K, V, C> RbTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn new(comparator: C) -> Self {
        Self {
            root: None,
            arena: Slab::new(),
            comparator,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
    }

    pub fn key(&self, n: u32) -> &K {
        &self.arena[n as usize].k
    }

    pub fn value(&self, n: u32) -> &V {
        &self.arena[n as usize].v
    }

    pub fn value_mut(&mut self, n: u32) -> &mut V {
        &mut self.arena[n as usize].v
    }

    pub fn entry(&self, n: u32) -> (&K, &V) {
        let node = &self.arena[n as usize];
        (&node.k, &node.v)
    }

    pub fn first(&self) -> Option<u32> {
        node::first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        node::last(&self.arena, self.root)
    }

    pub fn next(&self, n: u32) -> Option<u32> {
        node::next(&self.arena, n)
    }

    pub fn prev(&self, n: u32) -> Option<u32> {
        node::prev(&self.arena, n)
    }

    // ------------------------------------------------------------------ lookup

    pub fn find(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            curr = match (self.comparator)(key, &node.k) {
                Ordering::Less => node.l,
                Ordering::Greater => node.r,
                Ordering::Equal => return Some(i),
            };
        }
        None
    }

    /// Greatest node `<= key`.
    pub fn floor(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        let mut found = None;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            match (self.comparator)(key, &node.k) {
                Ordering::Less => curr = node.l,
                Ordering::Greater => {
                    found = Some(i);
                    curr = node.r;
                }
                Ordering::Equal => return Some(i),
            }
        }
        found
    }

    /// Least node `>= key`.
    pub fn ceiling(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        let mut found = None;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            match (self.comparator)(key, &node.k) {
                Ordering::Less => {
                    found = Some(i);
                    curr = node.l;
                }
                Ordering::Greater => curr = node.r,
                Ordering::Equal => return Some(i),
            }
        }
        found
    }

    /// Least node `> key`.
    pub fn higher(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        let mut found = None;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            if (self.comparator)(key, &node.k) == Ordering::Less {
                found = Some(i);
                curr = node.l;
            } else {
                curr = node.r;
            }
        }
        found
    }

    /// Greatest node `< key`.
    pub fn lower(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        let mut found = None;
        while let Some(i) = curr {
            let node = &self.arena[i as usize];
            if (self.comparator)(key, &node.k) == Ordering::Greater {
                found = Some(i);
                curr = node.r;
            } else {
                curr = node.l;
            }
        }
        found
    }

    // ------------------------------------------------------------------ insert

    pub fn insert(&mut self, key: K, value: V) -> Inserted<K, V> {
        let Some(mut curr) = self.root else {
            let n = self.arena.insert(RbNode::new(key, value, None)) as u32;
            self.arena[n as usize].b = true;
            self.root = Some(n);
            return Inserted::New(n);
        };

        loop {
            let node = &self.arena[curr as usize];
            match (self.comparator)(&key, &node.k) {
                Ordering::Less => match node.l {
                    Some(l) => curr = l,
                    None => {
                        let n = self.arena.insert(RbNode::new(key, value, Some(curr))) as u32;
                        self.arena[curr as usize].l = Some(n);
                        self.fix_after_insertion(n);
                        return Inserted::New(n);
                    }
                },
                Ordering::Greater => match node.r {
                    Some(r) => curr = r,
                    None => {
                        let n = self.arena.insert(RbNode::new(key, value, Some(curr))) as u32;
                        self.arena[curr as usize].r = Some(n);
                        self.fix_after_insertion(n);
                        return Inserted::New(n);
                    }
                },
                Ordering::Equal => return Inserted::Exists(curr, key, value),
            }
        }
    }

    // ------------------------------------------------------------------ delete

    /// Deletes the entry stored at slot `n` and returns it along with the slot
    /// that was actually freed.
    ///
    /// When `n` has two children the successor's entry is moved into `n` and
    /// the successor's slot is freed, so the returned slot differs from `n`.
    pub fn unlink(&mut self, n: u32) -> (u32, K, V) {
        let mut p = n;
        let node = &self.arena[p as usize];
        if let (Some(_), Some(r)) = (node.l, node.r) {
            let s = node::first(&self.arena, Some(r)).unwrap_or(r);
            self.swap_entries(p, s);
            p = s;
        }

        let node = &self.arena[p as usize];
        let (parent, black) = (node.p, node.b);
        let replacement = node.l.or(node.r);

        if let Some(rep) = replacement {
            self.arena[rep as usize].p = parent;
            self.replace_child(parent, p, Some(rep));
            if black {
                self.fix_after_deletion(rep);
            }
        } else if parent.is_none() {
            self.root = None;
        } else {
            if black {
                self.fix_after_deletion(p);
            }
            // Fixup may rotate, so re-read the parent.
            if let Some(pp) = self.arena[p as usize].p {
                self.replace_child(Some(pp), p, None);
            }
        }

        let removed = self.arena.remove(p as usize);
        (p, removed.k, removed.v)
    }

    fn swap_entries(&mut self, a: u32, b: u32) {
        if let Some((x, y)) = self.arena.get2_mut(a as usize, b as usize) {
            mem::swap(&mut x.k, &mut y.k);
            mem::swap(&mut x.v, &mut y.v);
        }
    }

    fn replace_child(&mut self, parent: Option<u32>, old: u32, new: Option<u32>) {
        match parent {
            None => self.root = new,
            Some(pp) => {
                let pn = &mut self.arena[pp as usize];
                if pn.l == Some(old) {
                    pn.l = new;
                } else if pn.r == Some(old) {
                    pn.r = new;
                }
            }
        }
    }

    // ----------------------------------------------------------- nil-safe links

    fn parent_of(&self, n: Option<u32>) -> Option<u32> {
        n.and_then(|i| self.arena[i as usize].p)
    }

    fn left_of(&self, n: Option<u32>) -> Option<u32> {
        n.and_then(|i| self.arena[i as usize].l)
    }

    fn right_of(&self, n: Option<u32>) -> Option<u32> {
        n.and_then(|i| self.arena[i as usize].r)
    }

    /// Missing nodes count as black leaves.
    fn is_black(&self, n: Option<u32>) -> bool {
        n.map_or(true, |i| self.arena[i as usize].b)
    }

    fn set_black(&mut self, n: Option<u32>, black: bool) {
        if let Some(i) = n {
            self.arena[i as usize].b = black;
        }
    }

    // ------------------------------------------------------------------- fixups

    fn fix_after_insertion(&mut self, n: u32) {
        let mut x = Some(n);
        self.set_black(x, false);

        while x.is_some() && x != self.root && !self.is_black(self.parent_of(x)) {
            let p = self.parent_of(x);
            let g = self.parent_of(p);
            if p == self.left_of(g) {
                let y = self.right_of(g);
                if !self.is_black(y) {
                    self.set_black(p, true);
                    self.set_black(y, true);
                    self.set_black(g, false);
                    x = g;
                } else {
                    if x == self.right_of(p) {
                        x = p;
                        self.rotate_left(x);
                    }
                    let p = self.parent_of(x);
                    let g = self.parent_of(p);
                    self.set_black(p, true);
                    self.set_black(g, false);
                    self.rotate_right(g);
                }
            } else {
                let y = self.left_of(g);
                if !self.is_black(y) {
                    self.set_black(p, true);
                    self.set_black(y, true);
                    self.set_black(g, false);
                    x = g;
                } else {
                    if x == self.left_of(p) {
                        x = p;
                        self.rotate_right(x);
                    }
                    let p = self.parent_of(x);
                    let g = self.parent_of(p);
                    self.set_black(p, true);
                    self.set_black(g, false);
                    self.rotate_left(g);
                }
            }
        }

        let root = self.root;
        self.set_black(root, true);
    }

    fn fix_after_deletion(&mut self, n: u32) {
        let mut x = Some(n);

        while x != self.root && self.is_black(x) {
            if x == self.left_of(self.parent_of(x)) {
                let mut sib = self.right_of(self.parent_of(x));
                if !self.is_black(sib) {
                    self.set_black(sib, true);
                    self.set_black(self.parent_of(x), false);
                    self.rotate_left(self.parent_of(x));
                    sib = self.right_of(self.parent_of(x));
                }

                if self.is_black(self.left_of(sib)) && self.is_black(self.right_of(sib)) {
                    self.set_black(sib, false);
                    x = self.parent_of(x);
                } else {
                    if self.is_black(self.right_of(sib)) {
                        self.set_black(self.left_of(sib), true);
                        self.set_black(sib, false);
                        self.rotate_right(sib);
                        sib = self.right_of(self.parent_of(x));
                    }
                    let parent_black = self.is_black(self.parent_of(x));
                    self.set_black(sib, parent_black);
                    self.set_black(self.parent_of(x), true);
                    self.set_black(self.right_of(sib), true);
                    self.rotate_left(self.parent_of(x));
                    x = self.root;
                }
            } else {
                let mut sib = self.left_of(self.parent_of(x));
                if !self.is_black(sib) {
                    self.set_black(sib, true);
                    self.set_black(self.parent_of(x), false);
                    self.rotate_right(self.parent_of(x));
                    sib = self.left_of(self.parent_of(x));
                }

                if self.is_black(self.right_of(sib)) && self.is_black(self.left_of(sib)) {
                    self.set_black(sib, false);
                    x = self.parent_of(x);
                } else {
                    if self.is_black(self.left_of(sib)) {
                        self.set_black(self.right_of(sib), true);
                        self.set_black(sib, false);
                        self.rotate_left(sib);
                        sib = self.left_of(self.parent_of(x));
                    }
                    let parent_black = self.is_black(self.parent_of(x));
                    self.set_black(sib, parent_black);
                    self.set_black(self.parent_of(x), true);
                    self.set_black(self.left_of(sib), true);
                    self.rotate_right(self.parent_of(x));
                    x = self.root;
                }
            }
        }

        self.set_black(x, true);
    }

    fn rotate_left(&mut self, p: Option<u32>) {
        let Some(p) = p else { return };
        let Some(r) = self.arena[p as usize].r else {
            return;
        };

        let rl = self.arena[r as usize].l;
        self.arena[p as usize].r = rl;
        if let Some(rl) = rl {
            self.arena[rl as usize].p = Some(p);
        }

        let pp = self.arena[p as usize].p;
        self.arena[r as usize].p = pp;
        self.replace_child(pp, p, Some(r));

        self.arena[r as usize].l = Some(p);
        self.arena[p as usize].p = Some(r);
    }

    fn rotate_right(&mut self, p: Option<u32>) {
        let Some(p) = p else { return };
        let Some(l) = self.arena[p as usize].l else {
            return;
        };

        let lr = self.arena[l as usize].r;
        self.arena[p as usize].l = lr;
        if let Some(lr) = lr {
            self.arena[lr as usize].p = Some(p);
        }

        let pp = self.arena[p as usize].p;
        self.arena[l as usize].p = pp;
        self.replace_child(pp, p, Some(l));

        self.arena[l as usize].r = Some(p);
        self.arena[p as usize].p = Some(l);
    }

    // -------------------------------------------------------------- diagnostics

    pub fn height(&self) -> usize {
        fn walk<K, V>(arena: &Slab<RbNode<K, V>>, n: Option<u32>) -> usize {
            match n {
                None => 0,
                Some(i) => {
                    let node = &arena[i as usize];
                    1 + walk(arena, node.l).max(walk(arena, node.r))
                }
            }
        }
        walk(&self.arena, self.root)
    }

    /// Checks ordering, parent links and the red-black rules. Returns the
    /// first violation found.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(root) = self.root else {
            if self.arena.is_empty() {
                return Ok(());
            }
            return Err(format!("empty root with {} nodes", self.arena.len()));
        };

        let node = &self.arena[root as usize];
        if node.p.is_some() {
            return Err("root has a parent".to_string());
        }
        if !node.b {
            return Err("root is red".to_string());
        }

        let mut count = 0;
        self.check_subtree(root, &mut count)?;
        if count != self.arena.len() {
            return Err(format!(
                "reachable nodes {count} != allocated nodes {}",
                self.arena.len()
            ));
        }
        Ok(())
    }

    /// Returns the subtree's black height.
    fn check_subtree(&self, n: u32, count: &mut usize) -> Result<usize, String> {
        *count += 1;
        let node = &self.arena[n as usize];

        let mut heights = [1usize; 2];
        for (side, child) in [node.l, node.r].into_iter().enumerate() {
            let Some(c) = child else { continue };
            let cn = &self.arena[c as usize];
            if cn.p != Some(n) {
                return Err(format!("node {c} has parent {:?}, expected {n}", cn.p));
            }
            if !node.b && !cn.b {
                return Err(format!("red node {n} has red child {c}"));
            }
            let expected = if side == 0 {
                Ordering::Less
            } else {
                Ordering::Greater
            };
            if (self.comparator)(&cn.k, &node.k) != expected {
                return Err(format!("node {c} is out of order under {n}"));
            }
            heights[side] = self.check_subtree(c, count)?;
        }

        // Ordering against the parent alone misses grand-ancestors; check
        // the in-order neighbours too.
        if let Some(next) = self.next(n) {
            if (self.comparator)(&node.k, &self.arena[next as usize].k) != Ordering::Less {
                return Err(format!("node {n} is not less than its successor {next}"));
            }
        }

        if heights[0] != heights[1] {
            return Err(format!(
                "black height mismatch under {n}: {} != {}",
                heights[0], heights[1]
            ));
        }
        Ok(heights[0] + usize::from(node.b))
    }

    /// Renders the tree shape, one node per line with its colour.
    pub fn graph(&self, fmt_node: &dyn Fn(&K, &V) -> String) -> String {
        match self.root {
            None => "∅".to_string(),
            Some(root) => self.graph_node(root, "", fmt_node),
        }
    }

    fn graph_node(&self, n: u32, tab: &str, fmt_node: &dyn Fn(&K, &V) -> String) -> String {
        let node = &self.arena[n as usize];
        let color = if node.b { "b" } else { "r" };
        let left = |tab: &str| match node.l {
            Some(l) => self.graph_node(l, tab, fmt_node),
            None => "∅".to_string(),
        };
        let right = |tab: &str| match node.r {
            Some(r) => self.graph_node(r, tab, fmt_node),
            None => "∅".to_string(),
        };
        let has_children = node.l.is_some() || node.r.is_some();
        let children: [Option<&PrintChild<'_>>; 2] = if has_children {
            [Some(&left), Some(&right)]
        } else {
            [None, None]
        };
        format!(
            "[{color}] {}{}",
            fmt_node(&node.k, &node.v),
            print_binary(tab, children)
        )
    }
}

impl<K: fmt::Debug, V, C> fmt::Debug for RbTree<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RbTree")
            .field("root", &self.root)
            .field("len", &self.arena.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::natural;

    type Tree = RbTree<i32, (), fn(&i32, &i32) -> Ordering>;

    fn tree() -> Tree {
        RbTree::new(natural)
    }

    fn keys(t: &Tree) -> Vec<i32> {
        let mut out = vec![];
        let mut curr = t.first();
        while let Some(n) = curr {
            out.push(*t.key(n));
            curr = t.next(n);
        }
        out
    }

    fn add(t: &mut Tree, k: i32) -> bool {
        matches!(t.insert(k, ()), Inserted::New(_))
    }

    fn delete(t: &mut Tree, k: i32) -> bool {
        match t.find(&k) {
            Some(n) => {
                t.unlink(n);
                true
            }
            None => false,
        }
    }

    // --- insert ---

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut t = tree();
        for k in 0..1000 {
            assert!(add(&mut t, k));
            t.check_invariants().unwrap();
        }
        assert_eq!(t.len(), 1000);
        // 2 * log2(1001) bound for red-black trees.
        assert!(t.height() <= 20, "height {}", t.height());
        assert_eq!(keys(&t), (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn duplicate_insert_hands_back_pair() {
        let mut t: RbTree<i32, &str, fn(&i32, &i32) -> Ordering> = RbTree::new(natural);
        t.insert(1, "a");
        match t.insert(1, "b") {
            Inserted::Exists(n, k, v) => {
                assert_eq!((k, v), (1, "b"));
                assert_eq!(*t.value(n), "a");
            }
            Inserted::New(_) => panic!("duplicate was linked"),
        }
        assert_eq!(t.len(), 1);
    }

    // --- delete ---

    #[test]
    fn delete_every_other_then_rest() {
        let mut t = tree();
        for k in [50, 20, 80, 10, 30, 70, 90, 5, 15, 25, 35, 60, 75, 85, 95] {
            add(&mut t, k);
        }
        for k in [20, 80, 5, 95, 50] {
            assert!(delete(&mut t, k));
            t.check_invariants().unwrap();
        }
        assert!(!delete(&mut t, 20));
        assert_eq!(keys(&t), vec![10, 15, 25, 30, 35, 60, 70, 75, 85, 90]);
        while let Some(n) = t.first() {
            t.unlink(n);
            t.check_invariants().unwrap();
        }
        assert_eq!(t.len(), 0);
        assert_eq!(t.root, None);
    }

    #[test]
    fn unlink_with_two_children_frees_successor_slot() {
        let mut t = tree();
        for k in [2, 1, 3] {
            add(&mut t, k);
        }
        let root = t.find(&2).unwrap();
        let successor = t.find(&3).unwrap();
        let (freed, k, _) = t.unlink(root);
        assert_eq!(k, 2);
        assert_eq!(freed, successor);
        assert_eq!(*t.key(root), 3);
        t.check_invariants().unwrap();
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut t = tree();
        for k in 0..8 {
            add(&mut t, k);
        }
        let n = t.find(&7).unwrap();
        t.unlink(n);
        add(&mut t, 100);
        assert_eq!(t.find(&100), Some(n));
    }

    // --- navigation ---

    #[test]
    fn floor_ceiling_higher_lower() {
        let mut t = tree();
        for k in [10, 20, 30, 40] {
            add(&mut t, k);
        }
        let key = |n: Option<u32>| n.map(|n| *t.key(n));
        assert_eq!(key(t.floor(&25)), Some(20));
        assert_eq!(key(t.floor(&20)), Some(20));
        assert_eq!(key(t.floor(&5)), None);
        assert_eq!(key(t.ceiling(&25)), Some(30));
        assert_eq!(key(t.ceiling(&30)), Some(30));
        assert_eq!(key(t.ceiling(&45)), None);
        assert_eq!(key(t.higher(&30)), Some(40));
        assert_eq!(key(t.higher(&40)), None);
        assert_eq!(key(t.lower(&10)), None);
        assert_eq!(key(t.lower(&11)), Some(10));
    }

    // --- diagnostics ---

    #[test]
    fn invariants_catch_red_root() {
        let mut t = tree();
        add(&mut t, 1);
        let root = t.root.unwrap();
        t.arena[root as usize].b = false;
        assert_eq!(t.check_invariants(), Err("root is red".to_string()));
    }

    #[test]
    fn invariants_catch_bad_order() {
        let mut t = tree();
        for k in [2, 1, 3] {
            add(&mut t, k);
        }
        let one = t.find(&1).unwrap();
        t.arena[one as usize].k = 9;
        assert!(t.check_invariants().is_err());
    }

    #[test]
    fn graph_shows_colours() {
        let mut t = tree();
        assert_eq!(t.graph(&|k, _| k.to_string()), "∅");
        for k in [2, 1, 3] {
            add(&mut t, k);
        }
        assert_eq!(
            t.graph(&|k, _| k.to_string()),
            "[b] 2\n← [r] 1\n→ [r] 3"
        );
    }
}
