//! King safety term: pawn shield minus ring pressure.
//!
//! The whole term is attributed to the king's own square in the per-piece
//! breakdown.

use crate::bitboard::KING_ATTACKS;
use crate::board::Board;
use crate::move_gen::attackers_to;
use crate::types::{make_square, square_file, square_rank, Piece, Side};

const SHIELD_BONUS: i32 = 8;
const RING_ATTACKER_PENALTY: i32 = 6;

/// Safety score for `side`'s king, before the White/Black sign.
pub(super) fn bonus(board: &Board, side: Side) -> i32 {
    let ksq = board.king_square(side);
    let own_pawns = board.piece_bb(side, Piece::Pawn);
    let enemy = side.opponent();

    // Shield: the three squares directly in front of the king.
    let mut shield = 0;
    let front_rank = square_rank(ksq) as i8 + if side == Side::White { 1 } else { -1 };
    if (0..8).contains(&front_rank) {
        let king_file = square_file(ksq) as i8;
        for file in (king_file - 1)..=(king_file + 1) {
            if !(0..8).contains(&file) {
                continue;
            }
            if own_pawns.contains(make_square(file as u8, front_rank as u8)) {
                shield += 1;
            }
        }
    }

    // Pressure: every enemy attack on a square of the king's ring.
    let mut pressure = 0;
    for ring_sq in KING_ATTACKS[ksq as usize] {
        pressure += attackers_to(board, ring_sq, enemy) as i32;
    }

    shield * SHIELD_BONUS - pressure * RING_ATTACKER_PENALTY
}
