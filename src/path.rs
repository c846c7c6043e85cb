use std::fmt;

use crate::puzzle::{Board, Move};
use crate::tree::{NodeId, NodeTree};

/// Moves of the blank from the initial board to the goal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolutionPath {
    moves: Vec<Move>,
}

impl SolutionPath {
    /// Follows parent links from `goal` back to the root, then releases the tree.
    ///
    /// The root has no originating move, so it contributes nothing to the path.
    pub fn extract(tree: NodeTree, goal: NodeId) -> Self {
        let mut moves: Vec<Move> = tree
            .ancestors(goal)
            .filter_map(|id| tree[id].state.action)
            .collect();
        moves.reverse();

        let released = tree.teardown();
        tracing::trace!(released, "search tree released");

        Self { moves }
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of edges from root to goal.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Boards visited after each move, starting from `initial`.
    ///
    /// Stops early if a move does not apply, which only happens when `initial`
    /// is not the board the path was found for.
    pub fn replay(&self, initial: Board) -> impl Iterator<Item = (Move, Board)> + '_ {
        let mut board = initial;
        self.moves.iter().map_while(move |&dir| {
            board = board.apply_move(dir)?;
            Some((dir, board))
        })
    }
}

impl From<Vec<Move>> for SolutionPath {
    fn from(moves: Vec<Move>) -> Self {
        Self { moves }
    }
}

impl fmt::Display for SolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for dir in &self.moves {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", dir)?;
            first = false;
        }
        Ok(())
    }
}
