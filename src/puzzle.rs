use rand::{seq::SliceRandom, Rng};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

pub const SIZE: usize = 3;
pub const BLANK: u8 = 0;

/// Direction the blank travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "UP",
            Move::Down => "DOWN",
            Move::Left => "LEFT",
            Move::Right => "RIGHT",
        };
        write!(f, "{}", s)
    }
}

/// A 3x3 grid holding the symbols 0..=8 exactly once, 0 being the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[u8; SIZE]; SIZE],
}

impl Board {
    pub fn new(cells: [[u8; SIZE]; SIZE]) -> Result<Self> {
        let mut used = [false; SIZE * SIZE];
        for (i, &value) in cells.iter().flatten().enumerate() {
            if value as usize >= SIZE * SIZE {
                return Err(Error::InvalidSymbol {
                    symbol: char::from_digit(value as u32, 36).unwrap_or('?'),
                    position: i,
                });
            }
            if used[value as usize] {
                return Err(Error::DuplicateSymbol { symbol: value });
            }
            used[value as usize] = true;
        }
        Ok(Self { cells })
    }

    /// The canonical goal: tiles in reading order, blank in the bottom-right corner.
    pub fn solved() -> Self {
        let mut cells = [[BLANK; SIZE]; SIZE];
        let mut value = 1;

        for (i, row) in cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                if i == SIZE - 1 && j == SIZE - 1 {
                    *cell = BLANK;
                } else {
                    *cell = value;
                    value += 1;
                }
            }
        }

        Self { cells }
    }

    pub fn cells(&self) -> &[[u8; SIZE]; SIZE] {
        &self.cells
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn blank_position(&self) -> (usize, usize) {
        self.position_of(BLANK)
    }

    fn position_of(&self, symbol: u8) -> (usize, usize) {
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value == symbol {
                    return (i, j);
                }
            }
        }
        unreachable!("board invariant: every symbol 0..=8 is present")
    }

    /// Slides the blank one cell, or `None` when that would leave the grid.
    pub fn apply_move(&self, movement: Move) -> Option<Self> {
        let (row, col) = self.blank_position();
        let (dr, dc) = movement.as_offset();

        let new_row = row as isize + dr;
        let new_col = col as isize + dc;

        if new_row < 0 || new_row >= SIZE as isize || new_col < 0 || new_col >= SIZE as isize {
            return None;
        }
        let (new_row, new_col) = (new_row as usize, new_col as usize);

        let mut next = *self;
        next.cells[row][col] = self.cells[new_row][new_col];
        next.cells[new_row][new_col] = BLANK;
        Some(next)
    }

    /// Sum of row and column offsets of every tile from its place in `goal`.
    pub fn manhattan_distance(&self, goal: &Board) -> u32 {
        let mut targets = [(0usize, 0usize); SIZE * SIZE];
        for (i, row) in goal.cells.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                targets[value as usize] = (i, j);
            }
        }

        let mut distance = 0;
        for (i, row) in self.cells.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value != BLANK {
                    let (ti, tj) = targets[value as usize];
                    distance += i.abs_diff(ti) + j.abs_diff(tj);
                }
            }
        }
        distance as u32
    }

    /// Random walk of `steps` blank moves, never undoing the previous one.
    ///
    /// The result is always reachable from `self`, so it can serve as an
    /// initial board for `self` as a goal.
    pub fn scramble<R: Rng + ?Sized>(&self, steps: usize, rng: &mut R) -> Self {
        let mut board = *self;
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let candidates: Vec<(Move, Board)> = Move::ALL
                .iter()
                .filter(|&&dir| last.map_or(true, |l| dir != l.opposite()))
                .filter_map(|&dir| board.apply_move(dir).map(|next| (dir, next)))
                .collect();

            // a corner blank always has two exits, so one survives the backtrack filter
            if let Some(&(dir, next)) = candidates.choose(rng) {
                board = next;
                last = Some(dir);
            }
        }

        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::solved()
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Accepts nine digits, ignoring whitespace, commas and brackets,
    /// e.g. `123406758` or `[[1,2,3],[4,0,6],[7,5,8]]`.
    fn from_str(input: &str) -> Result<Self> {
        let mut symbols = Vec::with_capacity(SIZE * SIZE);

        for c in input.chars() {
            if c.is_whitespace() || matches!(c, ',' | '[' | ']') {
                continue;
            }
            match c.to_digit(10) {
                Some(d) if (d as usize) < SIZE * SIZE => symbols.push(d as u8),
                _ => {
                    return Err(Error::InvalidSymbol {
                        symbol: c,
                        position: symbols.len(),
                    })
                }
            }
        }

        if symbols.len() != SIZE * SIZE {
            return Err(Error::InvalidBoardLength {
                got: symbols.len(),
                input: input.to_string(),
            });
        }

        let mut cells = [[BLANK; SIZE]; SIZE];
        for (k, value) in symbols.into_iter().enumerate() {
            cells[k / SIZE][k % SIZE] = value;
        }
        Board::new(cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A board snapshot together with the move that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct State {
    pub board: Board,
    pub action: Option<Move>,
}

impl State {
    /// A state with no originating move, as supplied by a caller.
    pub fn new(board: Board) -> Self {
        Self {
            board,
            action: None,
        }
    }

    pub fn apply_move(&self, movement: Move) -> Option<State> {
        self.board.apply_move(movement).map(|board| State {
            board,
            action: Some(movement),
        })
    }

    pub fn heuristic(&self, goal: &State) -> u32 {
        self.board.manhattan_distance(&goal.board)
    }

    /// Board equality; the originating move is ignored.
    pub fn matches(&self, goal: &State) -> bool {
        self.board == goal.board
    }
}

impl From<Board> for State {
    fn from(board: Board) -> Self {
        State::new(board)
    }
}
