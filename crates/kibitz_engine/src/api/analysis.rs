//! Analysis operations: one-shot search and search-then-move.

use serde::{Deserialize, Serialize};

use super::position::{self, PositionReport};
use crate::board::Board;
use crate::error::EngineResult;
use crate::move_gen::generate_legal;
use crate::search::{run_search, SearchOptions, SearchReport};

/// Result of [`engine_move`]: the search report plus the position after
/// the best move was applied.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineMoveReport {
    #[serde(flatten)]
    pub search: SearchReport,
    pub applied: PositionReport,
}

/// Runs a search to completion on a fresh position and returns the final
/// report, the same payload a `complete` stream record carries.
pub fn analyze(fen: &str, options: &SearchOptions) -> EngineResult<SearchReport> {
    let mut board = Board::from_fen(fen)?;
    Ok(run_search(&mut board, options, None))
}

/// Runs a search, then applies the best move. On a position with no legal
/// moves the report carries no best move and the position is returned
/// unchanged.
pub fn engine_move(fen: &str, options: &SearchOptions) -> EngineResult<EngineMoveReport> {
    let mut board = Board::from_fen(fen)?;
    let search = run_search(&mut board, options, None);

    if let Some(best) = search.best_move.as_deref() {
        let legal = generate_legal(&mut board);
        if let Some(&mv) = legal.iter().find(|m| m.long_algebraic() == best) {
            board.make(mv);
        }
    }

    Ok(EngineMoveReport {
        search,
        applied: position::report(board),
    })
}
