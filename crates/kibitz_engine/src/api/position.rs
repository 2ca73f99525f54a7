//! Position queries: legal move listings, move application, reset.

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::{EngineError, EngineResult};
use crate::evaluation::evaluate;
use crate::move_gen::{generate_legal, in_check};
use crate::types::Move;

/// Game status of a position.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ongoing,
    Checkmate,
    Stalemate,
}

/// Snapshot of a position for the façade: placement, movable set, status,
/// and the static evaluation from the side to move's perspective.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PositionReport {
    pub fen: String,
    pub side_to_move: String,
    pub legal_moves: Vec<String>,
    pub status: Status,
    pub position_eval_cp: i32,
    pub position_eval: f64,
}

/// Builds the report for an already validated position.
pub(crate) fn report(mut board: Board) -> PositionReport {
    let moves = generate_legal(&mut board);
    let status = if moves.is_empty() {
        if in_check(&board, board.side_to_move()) {
            Status::Checkmate
        } else {
            Status::Stalemate
        }
    } else {
        Status::Ongoing
    };
    let eval_cp = evaluate(&board);

    PositionReport {
        fen: board.to_fen(),
        side_to_move: board.side_to_move().letter().to_string(),
        legal_moves: moves.into_iter().map(Move::long_algebraic).collect(),
        status,
        position_eval_cp: eval_cp,
        position_eval: eval_cp as f64 / 100.0,
    }
}

/// Lists the legal moves of a position along with its status and static
/// evaluation.
pub fn legal_moves(fen: &str) -> EngineResult<PositionReport> {
    Ok(report(Board::from_fen(fen)?))
}

/// Applies one long-algebraic move to a position. The move must be in the
/// current legal set; anything else is rejected without touching state.
pub fn apply_move(fen: &str, mv: &str) -> EngineResult<PositionReport> {
    let mut board = Board::from_fen(fen)?;
    let legal = generate_legal(&mut board);
    let Some(&chosen) = legal.iter().find(|m| m.long_algebraic() == mv) else {
        return Err(EngineError::IllegalMove { mv: mv.to_string() });
    };
    board.make(chosen);
    Ok(report(board))
}

/// The report for the canonical starting position.
pub fn reset() -> PositionReport {
    report(Board::start_position())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::START_FEN;

    #[test]
    fn start_report_lists_twenty_moves() {
        let report = legal_moves(START_FEN).unwrap();
        assert_eq!(report.legal_moves.len(), 20);
        assert!(report.legal_moves.contains(&"e2e4".to_string()));
        assert!(report.legal_moves.contains(&"g1f3".to_string()));
        assert!(!report.legal_moves.contains(&"e2e5".to_string()));
        assert_eq!(report.status, Status::Ongoing);
        assert_eq!(report.side_to_move, "w");
        assert_eq!(report.position_eval_cp, 0);
        assert_eq!(report.position_eval, 0.0);
    }

    #[test]
    fn apply_move_advances_the_position() {
        let report = apply_move("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", "e2e4").unwrap();
        assert_eq!(report.side_to_move, "b");
        assert!(report.fen.contains(" b - e3 0 1"));
        assert_eq!(report.status, Status::Ongoing);
    }

    #[test]
    fn apply_move_rejects_moves_outside_the_legal_set() {
        for bad in ["e2e5", "e7e5", "e2", "zz99", "e2e4q"] {
            let result = apply_move(START_FEN, bad);
            assert!(
                matches!(result, Err(EngineError::IllegalMove { .. })),
                "expected IllegalMove for {bad}"
            );
        }
    }

    #[test]
    fn invalid_fen_is_reported_as_such() {
        assert!(matches!(
            legal_moves("only/seven/ranks w - - 0 1"),
            Err(EngineError::InvalidFen { .. })
        ));
    }

    #[test]
    fn reset_returns_the_start_position() {
        let report = reset();
        assert_eq!(report.fen, START_FEN);
        assert_eq!(report.legal_moves.len(), 20);
    }

    #[test]
    fn checkmate_and_stalemate_are_detected() {
        let mate = legal_moves(
            "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3",
        )
        .unwrap();
        assert_eq!(mate.status, Status::Checkmate);
        assert!(mate.legal_moves.is_empty());

        let stale = legal_moves("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(stale.status, Status::Stalemate);
        assert!(stale.legal_moves.is_empty());
    }

    #[test]
    fn promotion_moves_apply_by_suffix() {
        let report = apply_move("k7/4P3/8/8/8/8/8/4K3 w - - 0 1", "e7e8n").unwrap();
        assert!(report.fen.starts_with("k3N3/"));
    }
}
