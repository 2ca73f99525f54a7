//! Pawn move generation: pushes, double pushes, captures, en passant, and
//! promotions.

use crate::bitboard::pawn_attacks;
use crate::board::Board;
use crate::types::{square_rank, Move, MoveKind, Piece, Side, Square};

/// Promotion pieces in generation order.
const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

pub(super) fn generate(board: &Board, moves: &mut Vec<Move>) {
    let side = board.side_to_move();
    let enemy = board.occupancy(side.opponent());
    let occupied = board.occupied();
    let (start_rank, promotion_rank) = match side {
        Side::White => (1, 7),
        Side::Black => (6, 0),
    };

    for from in board.piece_bb(side, Piece::Pawn) {
        let one_up = (from as i8 + side.forward()) as Square;

        if !occupied.contains(one_up) {
            push_or_promote(moves, from, one_up, MoveKind::Quiet, promotion_rank);

            if square_rank(from) == start_rank {
                let two_up = (one_up as i8 + side.forward()) as Square;
                if !occupied.contains(two_up) {
                    moves.push(Move::new(from, two_up, MoveKind::DoublePush));
                }
            }
        }

        for to in pawn_attacks(side, from) {
            if enemy.contains(to) {
                push_or_promote(moves, from, to, MoveKind::Capture, promotion_rank);
            } else if board.en_passant() == Some(to) {
                moves.push(Move::new(from, to, MoveKind::EnPassant));
            }
        }
    }
}

fn push_or_promote(
    moves: &mut Vec<Move>,
    from: Square,
    to: Square,
    kind: MoveKind,
    promotion_rank: u8,
) {
    if square_rank(to) == promotion_rank {
        for piece in PROMOTIONS {
            moves.push(Move::new(from, to, MoveKind::Promotion(piece)));
        }
    } else {
        moves.push(Move::new(from, to, kind));
    }
}
