//! Open lists of generated but unexpanded nodes.
//!
//! Both frontiers hold [`NodeId`]s borrowed from a [`NodeTree`]; ownership of
//! the nodes stays with the tree. The next node to expand is always taken from
//! the back.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use crate::error::Result;
use crate::tree::{NodeId, NodeTree};

pub trait Frontier {
    /// Inserts a single node, used to seed the search with the root.
    fn push_front(&mut self, id: NodeId, tree: &NodeTree) -> Result<()>;

    /// Removes the next node to expand.
    fn pop_back(&mut self) -> Option<NodeId>;

    /// Moves every node of `batch` into the frontier according to its policy.
    fn merge(&mut self, batch: Vec<NodeId>, tree: &NodeTree) -> Result<()>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// FIFO queue for breadth-first search: enter at the front, leave at the back.
#[derive(Debug, Default)]
pub struct FifoFrontier {
    queue: VecDeque<NodeId>,
}

impl FifoFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the whole batch ahead of everything queued, so siblings leave in
    /// the order they were generated and after every older entry.
    pub fn merge_unordered(&mut self, batch: Vec<NodeId>) -> Result<()> {
        self.queue.try_reserve(batch.len())?;
        for id in batch {
            self.queue.push_front(id);
        }
        Ok(())
    }
}

impl Frontier for FifoFrontier {
    fn push_front(&mut self, id: NodeId, _tree: &NodeTree) -> Result<()> {
        self.queue.try_reserve(1)?;
        self.queue.push_front(id);
        Ok(())
    }

    fn pop_back(&mut self) -> Option<NodeId> {
        self.queue.pop_back()
    }

    fn merge(&mut self, batch: Vec<NodeId>, _tree: &NodeTree) -> Result<()> {
        self.merge_unordered(batch)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

/// Min-priority queue on f = g + h for A*.
///
/// Entries with equal cost leave in insertion order.
#[derive(Debug, Default)]
pub struct CostFrontier {
    heap: BinaryHeap<Reverse<(u32, u64, NodeId)>>,
    inserted: u64,
}

impl CostFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, id: NodeId, tree: &NodeTree) {
        let seq = self.inserted;
        self.inserted += 1;
        self.heap.push(Reverse((tree[id].cost(), seq, id)));
    }

    /// Inserts every node of `batch` at its cost-ordered position.
    pub fn merge_ordered(&mut self, batch: Vec<NodeId>, tree: &NodeTree) -> Result<()> {
        self.heap.try_reserve(batch.len())?;
        for id in batch {
            self.insert(id, tree);
        }
        Ok(())
    }

    /// Cost of the entry `pop_back` would return.
    pub fn peek_cost(&self) -> Option<u32> {
        self.heap.peek().map(|Reverse((cost, _, _))| *cost)
    }
}

impl Frontier for CostFrontier {
    fn push_front(&mut self, id: NodeId, tree: &NodeTree) -> Result<()> {
        self.heap.try_reserve(1)?;
        self.insert(id, tree);
        Ok(())
    }

    fn pop_back(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }

    fn merge(&mut self, batch: Vec<NodeId>, tree: &NodeTree) -> Result<()> {
        self.merge_ordered(batch, tree)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Board, State};

    /// Root plus its four children; child costs are 4, 2, 4, 4.
    fn sample() -> (NodeTree, NodeId, Vec<NodeId>) {
        let goal = State::new(Board::solved());
        let initial = State::new("123406758".parse().expect("valid board"));
        let mut tree = NodeTree::new();
        let root = tree
            .create_node(0, initial.heuristic(&goal), initial, None)
            .expect("root");
        let children = tree.expand(root, &goal).expect("expand");
        (tree, root, children)
    }

    fn drain(frontier: &mut impl Frontier) -> Vec<NodeId> {
        std::iter::from_fn(|| frontier.pop_back()).collect()
    }

    #[test]
    fn empty_frontiers_pop_nothing() {
        assert!(FifoFrontier::new().pop_back().is_none());
        assert!(CostFrontier::new().pop_back().is_none());
        assert!(FifoFrontier::new().is_empty());
    }

    #[test]
    fn fifo_keeps_sibling_order_behind_older_entries() {
        let (tree, root, children) = sample();
        let mut frontier = FifoFrontier::new();
        frontier.push_front(root, &tree).expect("push");
        frontier.merge(children.clone(), &tree).expect("merge");
        assert_eq!(frontier.len(), 5);

        let mut expected = vec![root];
        expected.extend(children);
        assert_eq!(drain(&mut frontier), expected);
    }

    #[test]
    fn merging_empty_batch_is_a_no_op() {
        let (tree, root, _) = sample();
        let mut fifo = FifoFrontier::new();
        fifo.push_front(root, &tree).expect("push");
        fifo.merge(Vec::new(), &tree).expect("merge");
        assert_eq!(fifo.len(), 1);

        let mut heap = CostFrontier::new();
        heap.merge(Vec::new(), &tree).expect("merge");
        assert!(heap.is_empty());
    }

    #[test]
    fn merging_into_empty_frontier_adopts_batch() {
        let (tree, _, children) = sample();
        let mut fifo = FifoFrontier::new();
        fifo.merge(children.clone(), &tree).expect("merge");
        assert_eq!(drain(&mut fifo), children);
    }

    #[test]
    fn cost_frontier_pops_cheapest_first_then_insertion_order() {
        let (tree, root, children) = sample();
        let mut frontier = CostFrontier::new();
        frontier.merge(children.clone(), &tree).expect("merge");
        frontier.push_front(root, &tree).expect("push");
        assert_eq!(frontier.peek_cost(), Some(2));

        // DOWN and root cost 2; DOWN was inserted first
        let order = drain(&mut frontier);
        assert_eq!(
            order,
            vec![children[1], root, children[0], children[2], children[3]]
        );
        let costs: Vec<_> = order.iter().map(|&id| tree[id].cost()).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
    }
}
