//! Board state: twelve piece bitboards, derived occupancies, game clocks,
//! and a reversible make/unmake history.

mod fen;
mod make_unmake;

use std::fmt;

use crate::bitboard::Bitboard;
use crate::constants::START_FEN;
use crate::error::{EngineError, EngineResult};
use crate::types::{square_name, Piece, Side, Square};

pub use make_unmake::Undo;

/// Castling rights as four independent flags.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct CastlingRights {
    pub white_short: bool,
    pub white_long: bool,
    pub black_short: bool,
    pub black_long: bool,
}

impl CastlingRights {
    pub fn any(self) -> bool {
        self.white_short || self.white_long || self.black_short || self.black_long
    }
}

/// The full mutable position.
///
/// Invariants, re-established by every make/unmake pair:
/// - the twelve piece bitboards are pairwise disjoint
/// - the side occupancies equal the union of that side's piece bitboards
/// - each side has exactly one king
/// - an en passant target implies the matching double-pushed pawn
#[derive(Clone)]
pub struct Board {
    pieces: [[Bitboard; Piece::COUNT]; Side::COUNT],
    occupancies: [Bitboard; Side::COUNT],
    occupied: Bitboard,
    side_to_move: Side,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    history: Vec<Undo>,
}

impl Board {
    fn empty() -> Board {
        Board {
            pieces: [[Bitboard::EMPTY; Piece::COUNT]; Side::COUNT],
            occupancies: [Bitboard::EMPTY; Side::COUNT],
            occupied: Bitboard::EMPTY,
            side_to_move: Side::White,
            castling: CastlingRights::default(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// The canonical starting position.
    pub fn start_position() -> Board {
        Board::from_fen(START_FEN).expect("start position FEN is valid")
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn piece_bb(&self, side: Side, piece: Piece) -> Bitboard {
        self.pieces[side.index()][piece.index()]
    }

    #[inline]
    pub fn occupancy(&self, side: Side) -> Bitboard {
        self.occupancies[side.index()]
    }

    /// Union of both side occupancies.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.occupied
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The piece on a square, if any.
    pub fn piece_on(&self, sq: Square) -> Option<(Side, Piece)> {
        for side in [Side::White, Side::Black] {
            if !self.occupancies[side.index()].contains(sq) {
                continue;
            }
            for piece in Piece::ALL {
                if self.pieces[side.index()][piece.index()].contains(sq) {
                    return Some((side, piece));
                }
            }
        }
        None
    }

    /// The king square of a side. Relies on the one-king invariant.
    #[inline]
    pub fn king_square(&self, side: Side) -> Square {
        debug_assert_eq!(self.pieces[side.index()][Piece::King.index()].count_ones(), 1);
        self.pieces[side.index()][Piece::King.index()].lsb()
    }

    fn put_piece(&mut self, side: Side, piece: Piece, sq: Square) {
        self.pieces[side.index()][piece.index()].insert(sq);
    }

    fn take_piece(&mut self, side: Side, piece: Piece, sq: Square) {
        self.pieces[side.index()][piece.index()].remove(sq);
    }

    fn refresh_occupancies(&mut self) {
        for side in [Side::White, Side::Black] {
            let mut occ = Bitboard::EMPTY;
            for piece in Piece::ALL {
                occ |= self.pieces[side.index()][piece.index()];
            }
            self.occupancies[side.index()] = occ;
        }
        self.occupied = self.occupancies[0] | self.occupancies[1];
    }

    /// Checks the structural invariants, reporting the first violation as an
    /// internal error.
    pub fn validate(&self) -> EngineResult<()> {
        let mut seen = Bitboard::EMPTY;
        for side in [Side::White, Side::Black] {
            for piece in Piece::ALL {
                let bb = self.pieces[side.index()][piece.index()];
                if !(seen & bb).is_empty() {
                    return Err(EngineError::InternalError {
                        message: "piece bitboards overlap".into(),
                    });
                }
                seen |= bb;
            }
            if self.pieces[side.index()][Piece::King.index()].count_ones() != 1 {
                return Err(EngineError::InternalError {
                    message: format!("{side:?} king count is not 1"),
                });
            }
        }
        if seen != self.occupied
            || (self.occupancies[0] | self.occupancies[1]) != self.occupied
        {
            return Err(EngineError::InternalError {
                message: "occupancies out of sync with piece bitboards".into(),
            });
        }
        Ok(())
    }
}

/// Observable-state equality: everything except the undo history.
impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.pieces == other.pieces
            && self.side_to_move == other.side_to_move
            && self.castling == other.castling
            && self.en_passant == other.en_passant
            && self.halfmove_clock == other.halfmove_clock
            && self.fullmove_number == other.fullmove_number
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    /// Renders the board rank 8 first with FEN piece letters, followed by a
    /// side/castling/en-passant trailer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let sq = rank * 8 + file;
                let ch = match self.piece_on(sq) {
                    Some((side, piece)) => piece.symbol(side),
                    None => '.',
                };
                write!(f, "{ch}")?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        let ep = match self.en_passant {
            Some(sq) => square_name(sq),
            None => "-".to_string(),
        };
        write!(
            f,
            "side={} castling={} ep={}",
            self.side_to_move.letter(),
            fen::castling_field(self.castling),
            ep
        )
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}
