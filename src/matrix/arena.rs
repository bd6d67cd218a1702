//! Contiguous node storage with an explicit growth policy.

use super::node::Node;
use crate::error::Result;
use std::ops::{Deref, DerefMut};

/// Data node capacity used when the caller gives no estimate.
pub(crate) const DEFAULT_CAPACITY: usize = 1000;

/// Above this many data nodes the arena stops growing geometrically.
const LINEAR_GROWTH_THRESHOLD: usize = 1 << 20;

/// Step size once growth has gone linear.
const LINEAR_GROWTH_STEP: usize = 1 << 18;

/// Capacity the arena starts with for a given hint.
pub(crate) fn initial_capacity(hint: usize, num_columns: usize) -> usize {
    if hint == 0 {
        2 * num_columns
    } else {
        hint
    }
}

/// Capacity that follows `current` when the arena is full.
pub(crate) fn next_capacity(current: usize, num_columns: usize) -> usize {
    let next = if current == 0 {
        2 * num_columns
    } else if current < LINEAR_GROWTH_THRESHOLD {
        current + current / 2
    } else {
        current.saturating_add(LINEAR_GROWTH_STEP)
    };

    next.max(current.saturating_add(1))
}

/// All mesh nodes of one matrix: the header and column heads first, then
/// every data node in insertion order.
///
/// Data nodes are only ever appended. Links are indices, so growing the
/// buffer never invalidates them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
    heads: usize,
    num_columns: usize,
}

impl Arena {
    /// Create an arena holding `heads` head slots plus room for `capacity`
    /// data nodes.
    pub fn new(heads: usize, capacity: usize) -> Result<Self> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(heads.saturating_add(capacity))?;

        Ok(Arena {
            nodes,
            heads,
            num_columns: heads.saturating_sub(1),
        })
    }

    /// Number of data nodes stored, live or deleted.
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(self.heads)
    }

    /// Number of data nodes that fit without growing.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity().saturating_sub(self.heads)
    }

    /// Make room for `additional` more data nodes, growing by the arena's
    /// policy in a single reallocation.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = self.len().saturating_add(additional);
        let current = self.capacity();
        if needed <= current {
            return Ok(());
        }

        let mut target = current;
        while target < needed {
            target = next_capacity(target, self.num_columns);
        }

        let total = self.heads.saturating_add(target);
        self.nodes.try_reserve_exact(total - self.nodes.len())?;
        log::debug!(
            "Grew node arena from [{}] to [{}] data nodes.",
            current,
            self.capacity()
        );

        Ok(())
    }

    /// Push a self-linked node and return its index. Head slots are pushed
    /// the same way during construction.
    pub fn push_self_ref(&mut self, column: usize, row: usize) -> usize {
        let index = self.nodes.len();
        debug_assert!(index < self.nodes.capacity(), "arena push without reserve");
        self.nodes.push(Node::self_ref(index, column, row));
        index
    }
}

impl Deref for Arena {
    type Target = [Node];

    fn deref(&self) -> &Self::Target {
        &self.nodes
    }
}

impl DerefMut for Arena {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hint_falls_back_to_column_count() {
        assert_eq!(initial_capacity(0, 7), 14);
        assert_eq!(initial_capacity(64, 7), 64);
    }

    #[test]
    fn growth_is_geometric_then_linear() {
        assert_eq!(next_capacity(0, 5), 10);
        assert_eq!(next_capacity(0, 0), 1);
        assert_eq!(next_capacity(1, 5), 2);
        assert_eq!(next_capacity(100, 5), 150);

        let big = LINEAR_GROWTH_THRESHOLD + 10;
        assert_eq!(next_capacity(big, 5), big + LINEAR_GROWTH_STEP);
        assert_eq!(next_capacity(usize::MAX - 1, 5), usize::MAX);
    }

    #[test]
    fn reserve_grows_only_when_full() {
        let mut arena = Arena::new(3, 2).unwrap();
        for index in 0..3 {
            arena.push_self_ref(index, super::super::node::NO_ROW);
        }
        assert_eq!(arena.len(), 0);
        assert!(arena.capacity() >= 2);

        arena.reserve(2).unwrap();
        let before = arena.capacity();
        arena.push_self_ref(1, 0);
        arena.push_self_ref(2, 0);
        assert_eq!(arena.capacity(), before);

        arena.reserve(1).unwrap();
        assert!(arena.capacity() >= 3);
        assert_eq!(arena.len(), 2);
    }
}
