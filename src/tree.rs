//! Search tree stored in an index-addressed arena.
//!
//! Nodes refer to their parent and children by [`NodeId`]. The arena owns every
//! node; frontiers only ever hold ids. The whole tree is released at once.

use std::ops::Index;

use crate::error::Result;
use crate::puzzle::{Move, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub state: State,
    /// Path cost g from the root.
    pub depth: u32,
    /// Heuristic estimate h to the goal.
    pub h_cost: u32,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl Node {
    /// f = g + h
    pub fn cost(&self) -> u32 {
        self.depth + self.h_cost
    }
}

#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_node(
        &mut self,
        depth: u32,
        h_cost: u32,
        state: State,
        parent: Option<NodeId>,
    ) -> Result<NodeId> {
        self.nodes.try_reserve(1)?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            state,
            depth,
            h_cost,
            parent,
            children: Vec::new(),
        });
        Ok(id)
    }

    /// Creates the children of `id`, skipping the move that would undo the one
    /// that produced it. Children are attached to `id` and also returned, in
    /// generation order, for the frontier.
    pub fn expand(&mut self, id: NodeId, goal: &State) -> Result<Vec<NodeId>> {
        let (state, depth) = {
            let node = &self.nodes[id.0];
            (node.state, node.depth)
        };

        let mut batch = Vec::new();
        batch.try_reserve(Move::ALL.len())?;

        for dir in Move::ALL {
            if state.action == Some(dir.opposite()) {
                continue;
            }
            let Some(next) = state.apply_move(dir) else {
                continue;
            };
            let child = self.create_node(depth + 1, next.heuristic(goal), next, Some(id))?;
            batch.push(child);
        }

        let children = &mut self.nodes[id.0].children;
        children.try_reserve(batch.len())?;
        children.extend_from_slice(&batch);

        Ok(batch)
    }

    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Ids from `id` up to and including the root.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&cur| self.nodes[cur.0].parent)
    }

    pub fn nodes_generated(&self) -> usize {
        self.nodes.len()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Releases the whole tree and returns how many nodes were reachable from
    /// the root. Walks with an explicit stack so depth never touches the call stack.
    pub fn teardown(self) -> usize {
        let mut released = 0;
        let mut stack: Vec<NodeId> = self.root().into_iter().collect();

        while let Some(id) = stack.pop() {
            released += 1;
            stack.extend(self.nodes[id.0].children.iter().copied());
        }

        drop(self);
        released
    }
}

impl Index<NodeId> for NodeTree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
