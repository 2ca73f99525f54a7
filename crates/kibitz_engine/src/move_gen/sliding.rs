//! Slider move generation for bishops, rooks, and queens via the classical
//! ray-scan attack sets.

use crate::bitboard::{bishop_attacks, queen_attacks, rook_attacks, Bitboard};
use crate::board::Board;
use crate::types::{Move, MoveKind, Piece, Square};

pub(super) fn generate(board: &Board, moves: &mut Vec<Move>) {
    generate_for(board, Piece::Bishop, bishop_attacks, moves);
    generate_for(board, Piece::Rook, rook_attacks, moves);
    generate_for(board, Piece::Queen, queen_attacks, moves);
}

fn generate_for(
    board: &Board,
    piece: Piece,
    attacks: fn(Square, Bitboard) -> Bitboard,
    moves: &mut Vec<Move>,
) {
    let side = board.side_to_move();
    let own = board.occupancy(side);
    let enemy = board.occupancy(side.opponent());
    let occupied = board.occupied();

    for from in board.piece_bb(side, piece) {
        for to in attacks(from, occupied) & !own {
            let kind = if enemy.contains(to) {
                MoveKind::Capture
            } else {
                MoveKind::Quiet
            };
            moves.push(Move::new(from, to, kind));
        }
    }
}
