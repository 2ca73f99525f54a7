//! Legal move generation.
//!
//! Generation is two-phase: each piece module produces pseudo-legal moves,
//! then the legality filter makes every candidate, rejects it if the mover's
//! own king is attacked, and unmakes. The same filtered path feeds the
//! search, the perft oracle, and the façade move listings.

mod attack;
mod castling;
mod king;
mod knight;
mod pawn;
mod sliding;

pub use attack::{attackers_to, in_check, is_square_attacked};

use crate::board::Board;
use crate::types::Move;

/// All pseudo-legal moves for the side to move, in deterministic generator
/// order: pawns, knights, bishops, rooks, queens, king, castling.
pub fn generate_pseudo_legal(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    pawn::generate(board, &mut moves);
    knight::generate(board, &mut moves);
    sliding::generate(board, &mut moves);
    king::generate(board, &mut moves);
    castling::generate(board, &mut moves);
    moves
}

/// The pseudo-legal moves whose maker does not leave their own king in
/// check.
pub fn generate_legal(board: &mut Board) -> Vec<Move> {
    let side = board.side_to_move();
    let mut legal = Vec::with_capacity(48);
    for mv in generate_pseudo_legal(board) {
        board.make(mv);
        if !in_check(board, side) {
            legal.push(mv);
        }
        board.unmake();
    }
    legal
}
