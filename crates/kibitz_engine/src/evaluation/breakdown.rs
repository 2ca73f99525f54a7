//! Per-piece decomposition of the evaluation and the piece-values map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::types::{square_name, Piece, Side};

use super::piece_terms;

/// One piece's contribution to the White-minus-Black score, term by term.
/// All fields are signed: negative values belong to Black's pieces, and
/// `signed_total` is the sum of the other five.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceBreakdown {
    pub base: i32,
    pub pst: i32,
    pub mobility: i32,
    pub pawn_structure: i32,
    pub king_safety: i32,
    pub signed_total: i32,
}

/// Breakdown for every occupied square, keyed by algebraic square name.
///
/// The `signed_total` values sum exactly to
/// [`super::evaluate_white`] for the same position.
pub fn piece_breakdown(board: &Board) -> BTreeMap<String, PieceBreakdown> {
    let mut map = BTreeMap::new();
    for side in [Side::White, Side::Black] {
        let sign = match side {
            Side::White => 1,
            Side::Black => -1,
        };
        for piece in Piece::ALL {
            for sq in board.piece_bb(side, piece) {
                let terms = piece_terms(board, side, piece, sq);
                map.insert(
                    square_name(sq),
                    PieceBreakdown {
                        base: sign * terms.base,
                        pst: sign * terms.pst,
                        mobility: sign * terms.mobility,
                        pawn_structure: sign * terms.pawn_structure,
                        king_safety: sign * terms.king_safety,
                        signed_total: sign * terms.total(),
                    },
                );
            }
        }
    }
    map
}

/// The `signed_total` of every occupied square, for UI consumption.
pub fn piece_values(board: &Board) -> BTreeMap<String, i32> {
    piece_breakdown(board)
        .into_iter()
        .map(|(sq, breakdown)| (sq, breakdown.signed_total))
        .collect()
}
