//! Standard algebraic notation, derived from a long move and a board
//! snapshot.
//!
//! SAN is never stored authoritatively because disambiguation depends on the
//! position: the same long move renders differently depending on which other
//! pieces could reach the destination. The check/mate suffix is computed by
//! simulating the move on a cloned board, exactly like the self-check rule.

use crate::board::board::Board;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::Square;
use crate::errors::EngineError;
use crate::notation::long_move::LongMove;
use crate::rules::apply::apply_long_move;
use crate::rules::castling::{castling_side_for, CastlingRights, CastlingSide};
use crate::rules::check::{is_check, is_checkmate, is_stalemate};
use crate::rules::reachability::square_is_reachable;

/// Renders `mv` for `color` in standard algebraic notation against the
/// board as it stands *before* the move.
///
/// Game-ending moves carry the trailing score marker: `#` plus `1-0`/`0-1`
/// on checkmate, ` 1/2-1/2` on stalemate.
pub fn calculate_algebraic(
    mv: &LongMove,
    color: Color,
    board: &Board,
    rights: &CastlingRights,
) -> Result<String, EngineError> {
    let mut san = base_notation(mv, color, board);
    san.push_str(&suffix(mv, color, board, rights)?);
    Ok(san)
}

fn base_notation(mv: &LongMove, color: Color, board: &Board) -> String {
    if mv.piece == PieceKind::King {
        if let Some(side) = castling_side_for(color, mv.from, mv.to) {
            return match side {
                CastlingSide::Kingside => "O-O".to_owned(),
                CastlingSide::Queenside => "O-O-O".to_owned(),
            };
        }
    }

    if mv.piece == PieceKind::Pawn {
        // Same-file advance renders as the destination alone; any file
        // change is a capture (an unmarked one is en passant) and renders
        // as "file x destination".
        let mut san = if mv.from.file() == mv.to.file() {
            mv.to.coordinate()
        } else {
            format!(
                "{}x{}",
                char::from(b'a' + mv.from.file()),
                mv.to.coordinate()
            )
        };
        if let Some(promotion) = mv.promotion {
            san.push('=');
            san.push(promotion.letter());
        }
        return san;
    }

    let mut san = String::new();
    san.push(mv.piece.letter());
    san.push_str(&disambiguation(mv, color, board));
    if mv.is_capture() || board.piece_at(mv.to).is_some() {
        san.push('x');
    }
    san.push_str(&mv.to.coordinate());
    san
}

/// The minimal disambiguation among the "trouble" pieces: other pieces of
/// the same kind and color that could also legally reach the destination.
/// Preference order: source file, then source rank, then both.
fn disambiguation(mv: &LongMove, color: Color, board: &Board) -> String {
    let troubles: Vec<Square> = board
        .squares_of(mv.piece, color)
        .into_iter()
        .filter(|candidate| *candidate != mv.from)
        .filter(|candidate| could_legally_reach(board, *candidate, mv.to, color))
        .collect();
    if troubles.is_empty() {
        return String::new();
    }

    let file_char = char::from(b'a' + mv.from.file());
    let rank_char = char::from(b'1' + mv.from.rank());
    if troubles.iter().all(|t| t.file() != mv.from.file()) {
        file_char.to_string()
    } else if troubles.iter().all(|t| t.rank() != mv.from.rank()) {
        rank_char.to_string()
    } else {
        format!("{file_char}{rank_char}")
    }
}

fn could_legally_reach(board: &Board, from: Square, to: Square, color: Color) -> bool {
    if !square_is_reachable(board, from, to) {
        return false;
    }
    // A pinned piece is no trouble: simulate the relocation and keep only
    // candidates whose king stays safe.
    let mut lookahead = board.clone();
    lookahead.move_piece(from, to);
    !is_check(&lookahead, color)
}

fn suffix(
    mv: &LongMove,
    color: Color,
    board: &Board,
    rights: &CastlingRights,
) -> Result<String, EngineError> {
    let mut lookahead = board.clone();
    let mut lookahead_rights = *rights;
    apply_long_move(&mut lookahead, &mut lookahead_rights, color, mv)?;

    let opponent = color.opposite();
    if is_check(&lookahead, opponent) {
        if is_checkmate(&lookahead, opponent) {
            let score = match color {
                Color::White => "1-0",
                Color::Black => "0-1",
            };
            Ok(format!("# {score}"))
        } else {
            Ok("+".to_owned())
        }
    } else if is_stalemate(&lookahead, opponent) {
        Ok(" 1/2-1/2".to_owned())
    } else {
        Ok(String::new())
    }
}
