//! Error kinds for the rules engine, the game session, and the GTP layer.
//!
//! Every error here is recoverable: the operation that produced it has been
//! rejected and the engine state is exactly what it was before the call.

use thiserror::Error;

use crate::constants::{MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Why a stone could not be placed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The point lies outside the board
    #[error("point is off the board")]
    OutOfBounds,

    /// The point already holds a stone
    #[error("point is occupied")]
    Occupied,

    /// The placed group would have no liberties and captures nothing
    #[error("suicide")]
    Suicide,

    /// The move immediately retakes a ko
    #[error("retakes ko")]
    Ko,
}

/// Returned by `undo` when no move has been played.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("cannot undo")]
pub struct EmptyHistory;

/// A board size outside the supported range.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unacceptable size {0}, expected {min}..={max}", min = MIN_BOARD_SIZE, max = MAX_BOARD_SIZE)]
pub struct BoardSizeError(pub usize);

/// Malformed color or vertex text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid coordinate: {0}")]
    InvalidVertex(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Well-formed vertex that names a point outside the current board
    #[error("{0} is off the board")]
    OffBoard(String),
}

/// Everything a GTP command can fail with.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GtpError {
    #[error("illegal move: {0}")]
    IllegalMove(#[from] MoveError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Undo(#[from] EmptyHistory),

    #[error(transparent)]
    BoardSize(#[from] BoardSizeError),

    #[error("missing argument")]
    MissingArgument,

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),
}
