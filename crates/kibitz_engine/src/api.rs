//! Façade operations for the request/response layer.
//!
//! Every function takes and returns plain data (FEN strings, long
//! algebraic moves, serializable reports); the caller never holds engine
//! state between requests.

pub mod analysis;
pub mod position;

pub use analysis::{analyze, engine_move, EngineMoveReport};
pub use position::{apply_move, legal_moves, reset, PositionReport, Status};

use crate::board::Board;
use crate::error::EngineResult;

/// Parses a FEN string, rejecting anything structurally invalid.
pub fn parse_fen(fen: &str) -> EngineResult<Board> {
    Board::from_fen(fen)
}
