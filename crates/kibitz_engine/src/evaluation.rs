//! Handcrafted centipawn evaluation.
//!
//! The score is a White-minus-Black sum of five terms per piece: base
//! material, piece-square bonus, mobility, pawn structure, and king safety.
//! Every term is computed as a per-piece contribution from the start, so
//! the decomposition in [`breakdown`] sums to the position score exactly,
//! with no residue to distribute afterwards.
//!
//! The single sign conversion to the search's side-to-move perspective
//! happens in [`evaluate`]; term code never flips signs itself.

pub mod breakdown;
mod heatmap;
mod king_safety;
mod mobility;
mod pawns;
mod pst;

pub use breakdown::{piece_breakdown, piece_values, PieceBreakdown};
pub use heatmap::heatmap;

use crate::board::Board;
use crate::constants::PIECE_VALUES;
use crate::types::{Piece, Side, Square};

/// The five per-piece terms, White-positive before signing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TermScores {
    pub base: i32,
    pub pst: i32,
    pub mobility: i32,
    pub pawn_structure: i32,
    pub king_safety: i32,
}

impl TermScores {
    pub fn total(self) -> i32 {
        self.base + self.pst + self.mobility + self.pawn_structure + self.king_safety
    }
}

/// Unsigned term values for one piece of `side` on `sq`.
pub(crate) fn piece_terms(board: &Board, side: Side, piece: Piece, sq: Square) -> TermScores {
    TermScores {
        base: PIECE_VALUES[piece.index()],
        pst: pst::bonus(piece, side, sq),
        mobility: mobility::bonus(board, side, piece, sq),
        pawn_structure: if piece == Piece::Pawn {
            pawns::bonus(board, side, sq)
        } else {
            0
        },
        king_safety: if piece == Piece::King {
            king_safety::bonus(board, side)
        } else {
            0
        },
    }
}

/// White-minus-Black score in centipawns.
pub fn evaluate_white(board: &Board) -> i32 {
    let mut total = 0;
    for side in [Side::White, Side::Black] {
        let sign = match side {
            Side::White => 1,
            Side::Black => -1,
        };
        for piece in Piece::ALL {
            for sq in board.piece_bb(side, piece) {
                total += sign * piece_terms(board, side, piece, sq).total();
            }
        }
    }
    total
}

/// Score from the side to move's perspective, the search's convention.
pub fn evaluate(board: &Board) -> i32 {
    let white = evaluate_white(board);
    match board.side_to_move() {
        Side::White => white,
        Side::Black => -white,
    }
}
