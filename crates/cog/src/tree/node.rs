use slab::Slab;

/// Binary tree links stored as arena indices.
pub(crate) trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
}

/// Red-black tree node.
#[derive(Clone, Debug)]
pub(crate) struct RbNode<K, V> {
    pub p: Option<u32>,
    pub l: Option<u32>,
    pub r: Option<u32>,
    pub k: K,
    pub v: V,
    /// `false` = red, `true` = black.
    pub b: bool,
}

impl<K, V> RbNode<K, V> {
    pub fn new(k: K, v: V, p: Option<u32>) -> Self {
        Self {
            p,
            l: None,
            r: None,
            k,
            v,
            b: false,
        }
    }
}

impl<K, V> Node for RbNode<K, V> {
    fn p(&self) -> Option<u32> {
        self.p
    }

    fn l(&self) -> Option<u32> {
        self.l
    }

    fn r(&self) -> Option<u32> {
        self.r
    }
}

/// Leftmost node under `root`.
pub(crate) fn first<N: Node>(arena: &Slab<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(l) = arena[curr as usize].l() {
        curr = l;
    }
    Some(curr)
}

/// Rightmost node under `root`.
pub(crate) fn last<N: Node>(arena: &Slab<N>, root: Option<u32>) -> Option<u32> {
    let mut curr = root?;
    while let Some(r) = arena[curr as usize].r() {
        curr = r;
    }
    Some(curr)
}

/// In-order successor: leftmost of the right subtree, else the first ancestor
/// reached from a left child.
pub(crate) fn next<N: Node>(arena: &Slab<N>, mut curr: u32) -> Option<u32> {
    if let Some(r) = arena[curr as usize].r() {
        return first(arena, Some(r));
    }

    let mut p = arena[curr as usize].p();
    while let Some(pi) = p {
        if arena[pi as usize].r() == Some(curr) {
            curr = pi;
            p = arena[pi as usize].p();
        } else {
            return Some(pi);
        }
    }
    None
}

/// In-order predecessor, mirror of [`next`].
pub(crate) fn prev<N: Node>(arena: &Slab<N>, mut curr: u32) -> Option<u32> {
    if let Some(l) = arena[curr as usize].l() {
        return last(arena, Some(l));
    }

    let mut p = arena[curr as usize].p();
    while let Some(pi) = p {
        if arena[pi as usize].l() == Some(curr) {
            curr = pi;
            p = arena[pi as usize].p();
        } else {
            return Some(pi);
        }
    }
    None
}
