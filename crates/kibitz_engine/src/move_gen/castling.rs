//! Castling generation.
//!
//! A castle is emitted when the right survives, the squares between king
//! and rook are empty, and neither the king's square nor the squares it
//! crosses or lands on are attacked. The rook itself may be attacked.

use crate::board::Board;
use crate::constants::{B1, B8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8};
use crate::move_gen::is_square_attacked;
use crate::types::{Move, MoveKind, Side, Square};

pub(super) fn generate(board: &Board, moves: &mut Vec<Move>) {
    let side = board.side_to_move();
    let rights = board.castling();
    let (short_right, long_right, home) = match side {
        Side::White => (rights.white_short, rights.white_long, E1),
        Side::Black => (rights.black_short, rights.black_long, E8),
    };
    if !short_right && !long_right {
        return;
    }

    let enemy = side.opponent();
    if is_square_attacked(board, home, enemy) {
        return;
    }

    if short_right {
        let (f, g) = match side {
            Side::White => (F1, G1),
            Side::Black => (F8, G8),
        };
        if path_is_clear(board, &[f, g])
            && !is_square_attacked(board, f, enemy)
            && !is_square_attacked(board, g, enemy)
        {
            moves.push(Move::new(home, g, MoveKind::CastleShort));
        }
    }

    if long_right {
        let (b, c, d) = match side {
            Side::White => (B1, C1, D1),
            Side::Black => (B8, C8, D8),
        };
        // b1/b8 only has to be empty; the king never crosses it.
        if path_is_clear(board, &[b, c, d])
            && !is_square_attacked(board, d, enemy)
            && !is_square_attacked(board, c, enemy)
        {
            moves.push(Move::new(home, c, MoveKind::CastleLong));
        }
    }
}

fn path_is_clear(board: &Board, squares: &[Square]) -> bool {
    squares.iter().all(|&sq| !board.occupied().contains(sq))
}
