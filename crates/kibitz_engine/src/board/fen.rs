//! FEN parsing and emission.
//!
//! Parsing accepts the four mandatory fields with the clock fields optional
//! (halfmove defaults to 0, fullmove to 1). Any structural error is reported
//! as `InvalidFen` and leaves no partially built state behind.

use super::{Board, CastlingRights};
use crate::constants::{A1, A8, E1, E8, H1, H8};
use crate::error::{EngineError, EngineResult};
use crate::types::{
    make_square, parse_square, square_name, square_rank, Piece, Side, Square,
};

impl Board {
    /// Parses a FEN string into a fresh position.
    pub fn from_fen(fen: &str) -> EngineResult<Board> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 6 {
            return Err(EngineError::invalid_fen(format!(
                "expected 4 to 6 fields, got {}",
                fields.len()
            )));
        }

        let mut board = Board::empty();
        parse_placement(&mut board, fields[0])?;

        board.side_to_move = match fields[1] {
            "w" => Side::White,
            "b" => Side::Black,
            other => {
                return Err(EngineError::invalid_fen(format!(
                    "invalid side to move: {other}"
                )))
            }
        };

        board.castling = parse_castling(fields[2])?;
        board.en_passant = parse_en_passant(fields[3], board.side_to_move)?;

        board.halfmove_clock = match fields.get(4) {
            Some(text) => text.parse::<u32>().map_err(|_| {
                EngineError::invalid_fen(format!("invalid halfmove clock: {text}"))
            })?,
            None => 0,
        };
        board.fullmove_number = match fields.get(5) {
            Some(text) => match text.parse::<u32>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(EngineError::invalid_fen(format!(
                        "invalid fullmove number: {text}"
                    )))
                }
            },
            None => 1,
        };

        board.refresh_occupancies();

        for side in [Side::White, Side::Black] {
            if board.piece_bb(side, Piece::King).count_ones() != 1 {
                return Err(EngineError::invalid_fen(format!(
                    "{} needs exactly one king",
                    side.letter()
                )));
            }
        }

        let pawns =
            board.piece_bb(Side::White, Piece::Pawn) | board.piece_bb(Side::Black, Piece::Pawn);
        let back_ranks = crate::bitboard::Bitboard(0xFF00_0000_0000_00FF);
        if !(pawns & back_ranks).is_empty() {
            return Err(EngineError::invalid_fen("pawn on a back rank"));
        }

        // A right whose king or rook already left home can never be
        // exercised; drop it here instead of carrying it around.
        clear_unusable_castling(&mut board);

        Ok(board)
    }

    /// Emits the canonical six-field FEN of the current position.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(64);

        for rank in (0..8u8).rev() {
            let mut empty_run = 0;
            for file in 0..8u8 {
                match self.piece_on(make_square(file, rank)) {
                    Some((side, piece)) => {
                        if empty_run > 0 {
                            fen.push(char::from_digit(empty_run, 10).unwrap_or('0'));
                            empty_run = 0;
                        }
                        fen.push(piece.symbol(side));
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                fen.push(char::from_digit(empty_run, 10).unwrap_or('0'));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(self.side_to_move.letter());
        fen.push(' ');
        fen.push_str(&castling_field(self.castling));
        fen.push(' ');
        match self.en_passant {
            Some(sq) => fen.push_str(&square_name(sq)),
            None => fen.push('-'),
        }
        fen.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        fen
    }
}

fn parse_placement(board: &mut Board, placement: &str) -> EngineResult<()> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(EngineError::invalid_fen(format!(
            "expected 8 ranks, got {}",
            rows.len()
        )));
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let rank = 7 - row_idx as u8;
        let mut file = 0u8;
        for ch in row.chars() {
            if let Some(run) = ch.to_digit(10) {
                if run == 0 || run > 8 {
                    return Err(EngineError::invalid_fen(format!(
                        "invalid empty run in rank: {row}"
                    )));
                }
                file += run as u8;
                continue;
            }
            let Some((side, piece)) = Piece::from_symbol(ch) else {
                return Err(EngineError::invalid_fen(format!(
                    "invalid piece symbol: {ch}"
                )));
            };
            if file >= 8 {
                return Err(EngineError::invalid_fen(format!("rank overflows: {row}")));
            }
            board.put_piece(side, piece, make_square(file, rank));
            file += 1;
        }
        if file != 8 {
            return Err(EngineError::invalid_fen(format!(
                "rank does not cover 8 files: {row}"
            )));
        }
    }
    Ok(())
}

fn parse_castling(field: &str) -> EngineResult<CastlingRights> {
    let mut rights = CastlingRights::default();
    if field == "-" {
        return Ok(rights);
    }
    for ch in field.chars() {
        match ch {
            'K' => rights.white_short = true,
            'Q' => rights.white_long = true,
            'k' => rights.black_short = true,
            'q' => rights.black_long = true,
            _ => {
                return Err(EngineError::invalid_fen(format!(
                    "invalid castling field: {field}"
                )))
            }
        }
    }
    Ok(rights)
}

fn parse_en_passant(field: &str, side_to_move: Side) -> EngineResult<Option<Square>> {
    if field == "-" {
        return Ok(None);
    }
    let Some(sq) = parse_square(field) else {
        return Err(EngineError::invalid_fen(format!(
            "invalid en passant square: {field}"
        )));
    };
    // The target sits behind a pawn that just advanced two, so its rank is
    // fixed by the side to move.
    let expected_rank = match side_to_move {
        Side::White => 5,
        Side::Black => 2,
    };
    if square_rank(sq) != expected_rank {
        return Err(EngineError::invalid_fen(format!(
            "en passant square {field} on the wrong rank"
        )));
    }
    Ok(Some(sq))
}

fn clear_unusable_castling(board: &mut Board) {
    let white_king_home = board.piece_bb(Side::White, Piece::King).contains(E1);
    let black_king_home = board.piece_bb(Side::Black, Piece::King).contains(E8);
    let white_rooks = board.piece_bb(Side::White, Piece::Rook);
    let black_rooks = board.piece_bb(Side::Black, Piece::Rook);

    board.castling.white_short &= white_king_home && white_rooks.contains(H1);
    board.castling.white_long &= white_king_home && white_rooks.contains(A1);
    board.castling.black_short &= black_king_home && black_rooks.contains(H8);
    board.castling.black_long &= black_king_home && black_rooks.contains(A8);
}

/// FEN castling field, `KQkq` subset or `-`.
pub(super) fn castling_field(rights: CastlingRights) -> String {
    if !rights.any() {
        return "-".to_string();
    }
    let mut field = String::with_capacity(4);
    if rights.white_short {
        field.push('K');
    }
    if rights.white_long {
        field.push('Q');
    }
    if rights.black_short {
        field.push('k');
    }
    if rights.black_long {
        field.push('q');
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::START_FEN;

    #[test]
    fn start_fen_round_trips() {
        let board = Board::from_fen(START_FEN).unwrap();
        assert_eq!(board.to_fen(), START_FEN);
    }

    #[test]
    fn kiwipete_round_trips() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let board = Board::from_fen(fen).unwrap();
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn optional_clock_fields_default() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - -").unwrap();
        assert_eq!(board.halfmove_clock(), 0);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn en_passant_square_is_parsed() {
        let board = Board::from_fen("8/8/8/3pP3/8/8/8/4K2k w - d6 0 1").unwrap();
        assert_eq!(board.en_passant(), parse_square("d6"));
    }

    #[test]
    fn en_passant_on_wrong_rank_is_rejected() {
        let result = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - d4 0 1");
        assert!(matches!(result, Err(EngineError::InvalidFen { .. })));
    }

    #[test]
    fn structural_errors_are_invalid_fen() {
        for fen in [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1", // 7 ranks
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", // bad side
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1", // bad castling
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", // bad run
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1", // bad clock
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0", // bad fullmove
            "8/8/8/8/8/8/8/8 w - - 0 1",                       // no kings
            "kK6/8/8/8/8/8/8/RNBQQBNR w KQkq - 0 1 extra junk x", // 8 fields
        ] {
            assert!(
                matches!(Board::from_fen(fen), Err(EngineError::InvalidFen { .. })),
                "expected InvalidFen for {fen:?}"
            );
        }
    }

    #[test]
    fn castling_rights_without_home_pieces_are_cleared() {
        // Rights claim full castling but only the white short rook is home.
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w KQkq - 0 1").unwrap();
        let rights = board.castling();
        assert!(rights.white_short);
        assert!(!rights.white_long);
        assert!(!rights.black_short);
        assert!(!rights.black_long);
    }

    #[test]
    fn emitted_digits_are_never_adjacent() {
        let board = Board::from_fen("4k3/8/2p2p2/8/8/8/8/4K3 b - - 3 9").unwrap();
        let fen = board.to_fen();
        assert_eq!(fen, "4k3/8/2p2p2/8/8/8/8/4K3 b - - 3 9");
        let placement = fen.split(' ').next().unwrap();
        let chars: Vec<char> = placement.chars().collect();
        for pair in chars.windows(2) {
            assert!(
                !(pair[0].is_ascii_digit() && pair[1].is_ascii_digit()),
                "adjacent digits in {fen}"
            );
        }
    }
}
