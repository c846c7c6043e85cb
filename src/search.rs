//! Breadth-first and A* search over the 8-puzzle.
//!
//! Both algorithms run the same loop: pop the next node, test it against the
//! goal, otherwise expand it and merge the children into the frontier. They
//! differ only in the frontier they use.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, debug_span, trace};

use crate::error::Result;
use crate::frontier::{CostFrontier, FifoFrontier, Frontier};
use crate::path::SolutionPath;
use crate::puzzle::{Board, State};
use crate::tree::NodeTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    AStar,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => write!(f, "BFS"),
            Algorithm::AStar => write!(f, "A*"),
        }
    }
}

/// Counters for a single search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes_expanded: usize,
    pub nodes_generated: usize,
    pub solution_length: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(SolutionPath),
    /// Every reachable board was expanded without meeting the goal.
    Exhausted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl Solution {
    pub fn path(&self) -> Option<&SolutionPath> {
        match &self.outcome {
            Outcome::Solved(path) => Some(path),
            Outcome::Exhausted => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved(_))
    }
}

/// Searches for a sequence of blank moves turning `initial` into `goal`.
///
/// An unsolvable pair is not an error: it yields [`Outcome::Exhausted`] with an
/// empty solution length. Any originating move on `initial` is ignored.
pub fn search(initial: &State, goal: &State, algorithm: Algorithm) -> Result<Solution> {
    let span = debug_span!("search", %algorithm);
    let _enter = span.enter();

    match algorithm {
        Algorithm::Bfs => run(initial, goal, FifoFrontier::new()),
        Algorithm::AStar => run(initial, goal, CostFrontier::new()),
    }
}

fn run<F: Frontier>(initial: &State, goal: &State, mut frontier: F) -> Result<Solution> {
    let mut stats = SearchStats::default();
    let mut tree = NodeTree::new();
    // boards already expanded; reaching one again through a longer cycle is skipped
    let mut closed: HashSet<Board> = HashSet::new();

    let root_state = State::new(initial.board);
    let root = tree.create_node(0, root_state.heuristic(goal), root_state, None)?;
    frontier.push_front(root, &tree)?;

    while let Some(id) = frontier.pop_back() {
        let node = &tree[id];

        if node.state.matches(goal) {
            stats.nodes_generated = tree.nodes_generated();
            let path = SolutionPath::extract(tree, id);
            stats.solution_length = path.len();
            debug!(
                expanded = stats.nodes_expanded,
                generated = stats.nodes_generated,
                length = stats.solution_length,
                "goal found"
            );
            return Ok(Solution {
                outcome: Outcome::Solved(path),
                stats,
            });
        }

        closed.try_reserve(1)?;
        if !closed.insert(node.state.board) {
            continue;
        }

        trace!(depth = node.depth, cost = node.cost(), "expanding");
        let children = tree.expand(id, goal)?;
        stats.nodes_expanded += 1;
        frontier.merge(children, &tree)?;
    }

    stats.nodes_generated = tree.nodes_generated();
    tree.teardown();
    debug!(
        expanded = stats.nodes_expanded,
        generated = stats.nodes_generated,
        "frontier exhausted"
    );

    Ok(Solution {
        outcome: Outcome::Exhausted,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Move;

    fn state(s: &str) -> State {
        State::new(s.parse::<Board>().expect("valid board"))
    }

    #[test]
    fn already_at_goal_needs_no_expansion() {
        let goal = State::new(Board::solved());
        for algorithm in [Algorithm::Bfs, Algorithm::AStar] {
            let solution = search(&goal, &goal, algorithm).expect("search");
            assert!(solution.is_solved());
            assert_eq!(solution.path().map(|p| p.len()), Some(0));
            assert_eq!(solution.stats.nodes_expanded, 0);
            assert_eq!(solution.stats.nodes_generated, 1);
            assert_eq!(solution.stats.solution_length, 0);
        }
    }

    #[test]
    fn two_move_fixture_expansion_counts() {
        let initial = state("123406758");
        let goal = State::new(Board::solved());

        let bfs = search(&initial, &goal, Algorithm::Bfs).expect("bfs");
        let astar = search(&initial, &goal, Algorithm::AStar).expect("astar");

        let expected = SolutionPath::from(vec![Move::Down, Move::Right]);
        assert_eq!(bfs.path(), Some(&expected));
        assert_eq!(astar.path(), Some(&expected));

        // root, its four children, then UP-LEFT, UP-RIGHT, DOWN-LEFT before DOWN-RIGHT
        assert_eq!(bfs.stats.nodes_expanded, 8);
        // root, then DOWN
        assert_eq!(astar.stats.nodes_expanded, 2);
        assert_eq!(astar.stats.nodes_generated, 1 + 4 + 2);
    }

    #[test]
    fn root_move_on_input_is_ignored() {
        let goal = State::new(Board::solved());
        let mut initial = state("123456708");
        initial.action = Some(Move::Left);

        // RIGHT would undo LEFT, but the root has no originating move
        let solution = search(&initial, &goal, Algorithm::Bfs).expect("search");
        assert_eq!(solution.stats.solution_length, 1);
    }

    #[test]
    fn algorithm_display() {
        assert_eq!(Algorithm::Bfs.to_string(), "BFS");
        assert_eq!(Algorithm::AStar.to_string(), "A*");
    }
}
