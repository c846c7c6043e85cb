//! Error types for the solver

use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("allocation failed while growing the search: {0}")]
    AllocationFailure(#[from] TryReserveError),

    #[error("a board needs exactly 9 symbols, got {got} in '{input}'")]
    InvalidBoardLength { got: usize, input: String },

    #[error("invalid symbol '{symbol}' at position {position}: expected a digit from 0 to 8")]
    InvalidSymbol { symbol: char, position: usize },

    #[error("symbol {symbol} is used more than once")]
    DuplicateSymbol { symbol: u8 },
}

pub type Result<T> = std::result::Result<T, Error>;
