//! Knight move generation from the precomputed attack table.

use crate::bitboard::KNIGHT_ATTACKS;
use crate::board::Board;
use crate::types::{Move, MoveKind, Piece};

pub(super) fn generate(board: &Board, moves: &mut Vec<Move>) {
    let side = board.side_to_move();
    let own = board.occupancy(side);
    let enemy = board.occupancy(side.opponent());

    for from in board.piece_bb(side, Piece::Knight) {
        for to in KNIGHT_ATTACKS[from as usize] & !own {
            let kind = if enemy.contains(to) {
                MoveKind::Capture
            } else {
                MoveKind::Quiet
            };
            moves.push(Move::new(from, to, kind));
        }
    }
}
