//! Deterministic move ordering.
//!
//! Four disjoint categories, tried in order: captures (including en
//! passant and capturing promotions), quiet promotions, castling, then
//! everything else. The sort is stable, so generator order is preserved
//! inside each category and repeated searches see identical move
//! sequences.

use crate::board::Board;
use crate::types::{Move, MoveKind};

pub(super) fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| category(board, mv));
}

/// True for any move that removes an enemy piece, however it is flagged.
pub(super) fn is_capture(board: &Board, mv: Move) -> bool {
    match mv.kind {
        MoveKind::Capture | MoveKind::EnPassant => true,
        MoveKind::Promotion(_) => board
            .occupancy(board.side_to_move().opponent())
            .contains(mv.to),
        _ => false,
    }
}

fn category(board: &Board, mv: Move) -> u8 {
    if is_capture(board, mv) {
        0
    } else if mv.promotion().is_some() {
        1
    } else if mv.is_castle() {
        2
    } else {
        3
    }
}
