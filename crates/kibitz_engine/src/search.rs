//! Iterative-deepening alpha-beta search.
//!
//! The driver deepens from depth 1 to `max_depth`, committing the results
//! of every fully completed depth. A timeout or cancellation unwinds the
//! in-flight depth through `Result` returns; the committed values from the
//! last finished depth become the answer. No panics are used for control
//! flow, and every `make` is paired with an `unmake` before the interrupt
//! propagates, so the caller's board comes back untouched.

mod control;
mod iterative;
mod negamax;
mod ordering;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::Status;
use crate::board::Board;
use crate::evaluation::PieceBreakdown;
use crate::stream::SnapshotPublisher;

pub use control::SearchOptions;

/// A progress snapshot published while the search runs. Depth-committed
/// fields (`depth`, `eval`, `pv`, `candidate_moves`) reflect the last fully
/// completed depth; the counters are live.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchSnapshot {
    pub depth: u32,
    pub eval: f64,
    pub eval_cp: i32,
    pub nodes: u64,
    pub nps: u64,
    pub cutoffs: u64,
    pub elapsed_ms: u64,
    pub current_move: Option<String>,
    pub pv: Vec<String>,
    pub candidate_moves: BTreeMap<String, i32>,
    pub piece_values: BTreeMap<String, i32>,
    pub piece_breakdown: BTreeMap<String, PieceBreakdown>,
    pub heatmap: BTreeMap<String, i32>,
}

/// The final search result, also the body of a `complete` stream record.
///
/// `eval_cp` and `eval` are from the side to move's perspective at the
/// root; `eval` is just `eval_cp / 100`. The evaluator artifacts describe
/// the root position.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub depth: u32,
    pub eval: f64,
    pub eval_cp: i32,
    pub nodes: u64,
    pub nps: u64,
    pub cutoffs: u64,
    pub elapsed_ms: u64,
    pub current_move: Option<String>,
    pub pv: Vec<String>,
    pub best_move: Option<String>,
    pub candidate_moves: BTreeMap<String, i32>,
    pub piece_values: BTreeMap<String, i32>,
    pub piece_breakdown: BTreeMap<String, PieceBreakdown>,
    pub heatmap: BTreeMap<String, i32>,
    pub status: Status,
}

/// Runs an iterative-deepening search on `board`, publishing throttled
/// snapshots when a publisher is attached. The board is returned in its
/// original state.
pub fn run_search(
    board: &mut Board,
    options: &SearchOptions,
    publisher: Option<&mut SnapshotPublisher>,
) -> SearchReport {
    iterative::Searcher::new(board, options, publisher).run(options.max_depth.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MATE, START_FEN};

    fn search(fen: &str, max_depth: u32) -> SearchReport {
        let mut board = Board::from_fen(fen).unwrap();
        let options = SearchOptions {
            max_depth,
            time_limit_ms: 30_000,
            snapshot_interval_ms: None,
        };
        run_search(&mut board, &options, None)
    }

    #[test]
    fn finds_a_supported_mate_in_one() {
        // Qg7 is covered by the king on h6, so it mates.
        let report = search("7k/8/7K/8/8/8/6Q1/8 w - - 0 1", 3);
        assert_eq!(report.best_move.as_deref(), Some("g2g7"));
        assert!(report.eval_cp >= MATE - 100);
        assert_eq!(report.status, Status::Ongoing);
        assert_eq!(report.pv.first().map(String::as_str), Some("g2g7"));
    }

    #[test]
    fn fools_mate_is_punished() {
        // After 1. f3 e5 2. g4 Black mates with Qh4.
        let report = search(
            "rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2",
            2,
        );
        assert_eq!(report.best_move.as_deref(), Some("d8h4"));
        assert!(report.eval_cp.abs() >= MATE - 100);
    }

    #[test]
    fn mated_root_reports_no_best_move() {
        let report = search(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
            3,
        );
        assert_eq!(report.best_move, None);
        assert_eq!(report.depth, 1);
        assert_eq!(report.eval_cp, -MATE);
        assert_eq!(report.status, Status::Checkmate);
        assert!(report.candidate_moves.is_empty());
    }

    #[test]
    fn stalemate_root_scores_zero() {
        let report = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 3);
        assert_eq!(report.best_move, None);
        assert_eq!(report.eval_cp, 0);
        assert_eq!(report.status, Status::Stalemate);
    }

    #[test]
    fn search_is_deterministic() {
        let first = search(START_FEN, 3);
        let second = search(START_FEN, 3);
        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.pv, second.pv);
        assert_eq!(first.candidate_moves, second.candidate_moves);
        assert_eq!(first.nodes, second.nodes);
    }

    #[test]
    fn report_counters_are_populated() {
        let report = search(START_FEN, 3);
        assert_eq!(report.depth, 3);
        assert!(report.nodes > 0);
        assert!(report.cutoffs > 0);
        assert_eq!(report.candidate_moves.len(), 20);
        assert!(!report.pv.is_empty());
        assert!(report.pv.len() <= 3);
        assert_eq!(report.piece_values.len(), 32);
        assert_eq!(report.eval, report.eval_cp as f64 / 100.0);
    }

    #[test]
    fn timeout_commits_the_last_finished_depth() {
        let mut board = Board::from_fen(START_FEN).unwrap();
        let options = SearchOptions {
            max_depth: 64,
            time_limit_ms: 300,
            snapshot_interval_ms: None,
        };
        let before = board.clone();
        let report = run_search(&mut board, &options, None);
        assert!(report.depth >= 1);
        assert!(report.best_move.is_some());
        assert_eq!(board, before);
    }

    #[test]
    fn hanging_queen_is_taken() {
        let report = search("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", 3);
        assert_eq!(report.best_move.as_deref(), Some("e4d5"));
        assert!(report.eval_cp > 0, "winning the queen should flip the score");
    }
}
