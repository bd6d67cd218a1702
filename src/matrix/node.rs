//! Link primitives for the toroidal mesh.
//!
//! Every link is an index into the node arena owned by the
//! [`Matrix`](super::Matrix). Index `0` is the header, the next
//! `num_columns` slots are the column heads, and data nodes follow.

/// Arena index of the header node.
pub(crate) const HEADER: usize = 0;

/// Row tag carried by the header and the column heads.
pub(crate) const NO_ROW: usize = usize::MAX;

/// A single slot of the mesh: either the header, a column head, or one
/// "1" entry of the matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Node {
    pub left: usize,
    pub right: usize,
    pub up: usize,
    pub down: usize,
    /// Arena index of the owning column head (the header owns itself).
    pub column: usize,
    pub row: usize,
}

impl Node {
    /// A node whose four links all point back at `index`.
    pub fn self_ref(index: usize, column: usize, row: usize) -> Self {
        Node {
            left: index,
            right: index,
            up: index,
            down: index,
            column,
            row,
        }
    }
}

// The unlink functions leave the removed node's own links untouched, which is
// what lets the matching relink put it back in place.

pub(crate) fn unlink_horizontal(nodes: &mut [Node], index: usize) {
    let Node { left, right, .. } = nodes[index];
    nodes[left].right = right;
    nodes[right].left = left;
}

pub(crate) fn relink_horizontal(nodes: &mut [Node], index: usize) {
    let Node { left, right, .. } = nodes[index];
    nodes[left].right = index;
    nodes[right].left = index;
}

pub(crate) fn unlink_vertical(nodes: &mut [Node], index: usize) {
    let Node { up, down, .. } = nodes[index];
    nodes[up].down = down;
    nodes[down].up = up;
}

pub(crate) fn relink_vertical(nodes: &mut [Node], index: usize) {
    let Node { up, down, .. } = nodes[index];
    nodes[up].down = index;
    nodes[down].up = index;
}

/// Splice `index` into the vertical list directly above `anchor`. With a
/// column head as the anchor this appends at the bottom of the column.
pub(crate) fn insert_above(nodes: &mut [Node], anchor: usize, index: usize) {
    let up = nodes[anchor].up;
    nodes[index].up = up;
    nodes[index].down = anchor;
    nodes[up].down = index;
    nodes[anchor].up = index;
}

/// Splice `index` into the horizontal list directly right of `anchor`.
pub(crate) fn insert_right(nodes: &mut [Node], anchor: usize, index: usize) {
    let right = nodes[anchor].right;
    nodes[index].left = anchor;
    nodes[index].right = right;
    nodes[right].left = index;
    nodes[anchor].right = index;
}

/// Direction of travel around one of the circular lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    #[inline]
    fn step(self, node: &Node) -> usize {
        match self {
            Direction::Left => node.left,
            Direction::Right => node.right,
            Direction::Up => node.up,
            Direction::Down => node.down,
        }
    }
}

/// Iterator that walks a circular list away from `origin`, yielding every
/// member except `origin` itself.
#[derive(Debug, Clone)]
pub(crate) struct Walk<'a> {
    nodes: &'a [Node],
    origin: usize,
    current: usize,
    direction: Direction,
}

impl<'a> Walk<'a> {
    pub fn new(nodes: &'a [Node], origin: usize, direction: Direction) -> Self {
        Walk {
            nodes,
            origin,
            current: origin,
            direction,
        }
    }
}

impl Iterator for Walk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.direction.step(&self.nodes[self.current]);
        if next == self.origin {
            None
        } else {
            self.current = next;
            Some(next)
        }
    }
}
