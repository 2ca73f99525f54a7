//! Attack detection shared by the legality filter, castling, the evaluator,
//! and the pressure heatmap.

use crate::bitboard::{
    bishop_attacks, pawn_attacks, rook_attacks, KING_ATTACKS, KNIGHT_ATTACKS,
};
use crate::board::Board;
use crate::types::{Piece, Side, Square};

/// True if any piece of `by` attacks `sq` under the current occupancy.
///
/// Pawn coverage is looked up through the opposite-colored attack table
/// from the target square: a white pawn attacks `sq` exactly when it sits
/// on a square a black pawn on `sq` would attack.
pub fn is_square_attacked(board: &Board, sq: Square, by: Side) -> bool {
    if !(pawn_attacks(by.opponent(), sq) & board.piece_bb(by, Piece::Pawn)).is_empty() {
        return true;
    }
    if !(KNIGHT_ATTACKS[sq as usize] & board.piece_bb(by, Piece::Knight)).is_empty() {
        return true;
    }
    if !(KING_ATTACKS[sq as usize] & board.piece_bb(by, Piece::King)).is_empty() {
        return true;
    }

    let occupied = board.occupied();
    let diagonal = board.piece_bb(by, Piece::Bishop) | board.piece_bb(by, Piece::Queen);
    if !(bishop_attacks(sq, occupied) & diagonal).is_empty() {
        return true;
    }
    let orthogonal = board.piece_bb(by, Piece::Rook) | board.piece_bb(by, Piece::Queen);
    !(rook_attacks(sq, occupied) & orthogonal).is_empty()
}

/// Number of pieces of `by` attacking `sq`. Same reach rules as
/// [`is_square_attacked`], counting instead of short-circuiting.
pub fn attackers_to(board: &Board, sq: Square, by: Side) -> u32 {
    let occupied = board.occupied();
    let diagonal = board.piece_bb(by, Piece::Bishop) | board.piece_bb(by, Piece::Queen);
    let orthogonal = board.piece_bb(by, Piece::Rook) | board.piece_bb(by, Piece::Queen);

    let mut count = (pawn_attacks(by.opponent(), sq) & board.piece_bb(by, Piece::Pawn))
        .count_ones();
    count += (KNIGHT_ATTACKS[sq as usize] & board.piece_bb(by, Piece::Knight)).count_ones();
    count += (KING_ATTACKS[sq as usize] & board.piece_bb(by, Piece::King)).count_ones();
    count += (bishop_attacks(sq, occupied) & diagonal).count_ones();
    count += (rook_attacks(sq, occupied) & orthogonal).count_ones();
    count
}

/// True if `side`'s king is attacked by the opponent.
#[inline]
pub fn in_check(board: &Board, side: Side) -> bool {
    is_square_attacked(board, board.king_square(side), side.opponent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parse_square;

    fn sq(name: &str) -> Square {
        parse_square(name).unwrap()
    }

    #[test]
    fn pawn_attack_direction_is_respected() {
        let board = Board::from_fen("4k3/8/8/3p4/8/8/4P3/4K3 w - - 0 1").unwrap();
        // The black d5 pawn attacks c4 and e4, not c6/e6.
        assert!(is_square_attacked(&board, sq("e4"), Side::Black));
        assert!(is_square_attacked(&board, sq("c4"), Side::Black));
        assert!(!is_square_attacked(&board, sq("e6"), Side::Black));
        // The white e2 pawn attacks d3 and f3.
        assert!(is_square_attacked(&board, sq("d3"), Side::White));
        assert!(!is_square_attacked(&board, sq("d1"), Side::White));
    }

    #[test]
    fn sliders_are_blocked_by_occupancy() {
        let board = Board::from_fen("4k3/8/8/8/8/4p3/8/4R1K1 w - - 0 1").unwrap();
        // The e1 rook sees up to the e3 pawn, nothing beyond it.
        assert!(is_square_attacked(&board, sq("e3"), Side::White));
        assert!(!is_square_attacked(&board, sq("e5"), Side::White));
        assert!(!is_square_attacked(&board, sq("e8"), Side::White));
    }

    #[test]
    fn queen_counts_once_per_reach() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        // a1 queen reaches a8 along the file.
        assert_eq!(attackers_to(&board, sq("a8"), Side::White), 1);
    }

    #[test]
    fn attacker_counts_accumulate() {
        let board = Board::from_fen("4k3/8/8/8/8/2N5/1P6/R3K3 w - - 0 1").unwrap();
        // a3 is hit by the a1 rook and the b2 pawn; the c3 knight misses it.
        assert_eq!(attackers_to(&board, sq("a3"), Side::White), 2);
    }

    #[test]
    fn in_check_sees_the_rook_on_the_file() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
        assert!(in_check(&board, Side::White));
        assert!(!in_check(&board, Side::Black));
    }
}
