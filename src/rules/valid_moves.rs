//! Legal destination enumeration per piece.
//!
//! Candidates come from the board's ray/offset generators and are filtered
//! through the quiet-move legality test. Captures are deliberately not
//! listed: their occupancy is validated by the game layer when a capture
//! move is submitted. Pawns additionally offer the en-passant destination
//! while the target is live.

use crate::board::board::Board;
use crate::board::piece::PieceKind;
use crate::board::square::Square;
use crate::rules::reachability::{move_is_ok, pawn_attacks};

/// All legal quiet destinations for the piece on `square`; empty when the
/// square is empty.
pub fn valid_moves(board: &Board, square: Square) -> Vec<Square> {
    let piece = match board.piece_at(square) {
        Some(piece) => piece,
        None => return Vec::new(),
    };

    let candidates: Vec<Square> = match piece.kind {
        PieceKind::Pawn => {
            let mut pawn_targets = Vec::new();
            let direction = piece.color.pawn_direction();
            if let Some(step) =
                Square::from_file_rank(square.file() as i8, square.rank() as i8 + direction)
            {
                pawn_targets.push(step);
            }
            if let Some(double) =
                Square::from_file_rank(square.file() as i8, square.rank() as i8 + 2 * direction)
            {
                pawn_targets.push(double);
            }
            pawn_targets
        }
        PieceKind::Knight => board.knight_move_squares(square),
        PieceKind::Bishop => board.diagonal_squares(square),
        PieceKind::Rook => board.rank_and_file_squares(square),
        PieceKind::Queen => {
            let mut all = board.diagonal_squares(square);
            all.extend(board.rank_and_file_squares(square));
            all
        }
        PieceKind::King => board.adjacent_squares(square),
    };

    let mut moves: Vec<Square> = candidates
        .into_iter()
        .filter(|to| move_is_ok(board, square, *to))
        .collect();

    // The en-passant destination is diagonal, so it bypasses the quiet-move
    // filter; it is live only while the target scalar is set.
    if piece.kind == PieceKind::Pawn {
        if let Some(en_passant) = board.en_passant_target() {
            if pawn_attacks(square, en_passant, piece.color) && board.is_empty(en_passant) {
                moves.push(en_passant);
            }
        }
    }

    moves
}
