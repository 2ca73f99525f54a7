//! Reversible move execution.
//!
//! `make` pushes an [`Undo`] record onto the per-position history stack and
//! `unmake` pops it, reversing every field. Both are infallible for moves
//! produced by the legal generator; feeding anything else in is a bug.

use super::Board;
use crate::constants::{A1, A8, D1, D8, F1, F8, H1, H8};
use crate::types::{make_square, square_file, square_rank, Move, MoveKind, Piece, Side, Square};

/// Everything needed to restore the previous position after a move.
#[derive(Copy, Clone, Debug)]
pub struct Undo {
    mv: Move,
    moved: Piece,
    captured: Option<(Piece, Square)>,
    castling: super::CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
}

impl Board {
    fn piece_at(&self, side: Side, sq: Square) -> Piece {
        for piece in Piece::ALL {
            if self.pieces[side.index()][piece.index()].contains(sq) {
                return piece;
            }
        }
        debug_assert!(false, "no {side:?} piece on square {sq}");
        Piece::Pawn
    }

    fn side_piece_on(&self, side: Side, sq: Square) -> Option<Piece> {
        if !self.occupancies[side.index()].contains(sq) {
            return None;
        }
        Some(self.piece_at(side, sq))
    }

    /// Executes a legal move.
    pub fn make(&mut self, mv: Move) {
        let side = self.side_to_move;
        let moved = self.piece_at(side, mv.from);

        // En passant removes the pawn on the file of `to` and the rank of
        // `from`, not the piece on `to`.
        let captured = match mv.kind {
            MoveKind::EnPassant => {
                let sq = make_square(square_file(mv.to), square_rank(mv.from));
                Some((Piece::Pawn, sq))
            }
            _ => self
                .side_piece_on(side.opponent(), mv.to)
                .map(|piece| (piece, mv.to)),
        };

        self.history.push(Undo {
            mv,
            moved,
            captured,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
        });

        self.take_piece(side, moved, mv.from);
        if let Some((piece, sq)) = captured {
            self.take_piece(side.opponent(), piece, sq);
        }
        let placed = mv.promotion().unwrap_or(moved);
        self.put_piece(side, placed, mv.to);

        match mv.kind {
            MoveKind::CastleShort => self.move_castle_rook(side, true, false),
            MoveKind::CastleLong => self.move_castle_rook(side, false, false),
            _ => {}
        }

        self.update_castling_rights(side, moved, mv.from, captured);

        self.en_passant = if mv.kind == MoveKind::DoublePush {
            Some(make_square(
                square_file(mv.from),
                (square_rank(mv.from) + square_rank(mv.to)) / 2,
            ))
        } else {
            None
        };

        if moved == Piece::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if side == Side::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = side.opponent();
        self.refresh_occupancies();
    }

    /// Reverses the most recent `make`.
    pub fn unmake(&mut self) {
        let Some(undo) = self.history.pop() else {
            debug_assert!(false, "unmake without a matching make");
            return;
        };

        let mover = self.side_to_move.opponent();
        self.side_to_move = mover;
        if mover == Side::Black {
            self.fullmove_number -= 1;
        }

        let mv = undo.mv;
        match mv.kind {
            MoveKind::CastleShort => self.move_castle_rook(mover, true, true),
            MoveKind::CastleLong => self.move_castle_rook(mover, false, true),
            _ => {}
        }

        let placed = mv.promotion().unwrap_or(undo.moved);
        self.take_piece(mover, placed, mv.to);
        self.put_piece(mover, undo.moved, mv.from);
        if let Some((piece, sq)) = undo.captured {
            self.put_piece(mover.opponent(), piece, sq);
        }

        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.refresh_occupancies();
    }

    fn move_castle_rook(&mut self, side: Side, short: bool, reverse: bool) {
        let (home, beside) = match (side, short) {
            (Side::White, true) => (H1, F1),
            (Side::White, false) => (A1, D1),
            (Side::Black, true) => (H8, F8),
            (Side::Black, false) => (A8, D8),
        };
        let (from, to) = if reverse { (beside, home) } else { (home, beside) };
        self.take_piece(side, Piece::Rook, from);
        self.put_piece(side, Piece::Rook, to);
    }

    fn update_castling_rights(
        &mut self,
        side: Side,
        moved: Piece,
        from: Square,
        captured: Option<(Piece, Square)>,
    ) {
        match (moved, side) {
            (Piece::King, Side::White) => {
                self.castling.white_short = false;
                self.castling.white_long = false;
            }
            (Piece::King, Side::Black) => {
                self.castling.black_short = false;
                self.castling.black_long = false;
            }
            (Piece::Rook, Side::White) => {
                if from == H1 {
                    self.castling.white_short = false;
                } else if from == A1 {
                    self.castling.white_long = false;
                }
            }
            (Piece::Rook, Side::Black) => {
                if from == H8 {
                    self.castling.black_short = false;
                } else if from == A8 {
                    self.castling.black_long = false;
                }
            }
            _ => {}
        }

        if let Some((Piece::Rook, sq)) = captured {
            match sq {
                _ if sq == H1 => self.castling.white_short = false,
                _ if sq == A1 => self.castling.white_long = false,
                _ if sq == H8 => self.castling.black_short = false,
                _ if sq == A8 => self.castling.black_long = false,
                _ => {}
            }
        }
    }
}
