//! Ordinary king moves. Castling lives in its own module and is generated
//! after all other moves.

use crate::bitboard::KING_ATTACKS;
use crate::board::Board;
use crate::types::{Move, MoveKind, Piece};

pub(super) fn generate(board: &Board, moves: &mut Vec<Move>) {
    let side = board.side_to_move();
    let own = board.occupancy(side);
    let enemy = board.occupancy(side.opponent());
    let from = board.king_square(side);

    for to in KING_ATTACKS[from as usize] & !own {
        let kind = if enemy.contains(to) {
            MoveKind::Capture
        } else {
            MoveKind::Quiet
        };
        moves.push(Move::new(from, to, kind));
    }
}
