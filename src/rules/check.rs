//! Check, checkmate and stalemate detection.
//!
//! The checkmate algorithm reproduces the original system's shape exactly:
//! first scan the king's neighborhood for an escape square, then resolve by
//! attacker count. More than one attacker is mate outright (capturing one
//! piece of a double check is not considered); a single attacker can be
//! captured or, when it slides, blocked by interposition.

use crate::board::board::Board;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::Square;
use crate::rules::reachability::{
    move_is_ok, piece_attacks, square_is_under_attack, squares_between,
};
use crate::rules::valid_moves::valid_moves;

/// Squares of `by_color` pieces currently attacking `target`.
pub fn attackers_of(board: &Board, target: Square, by_color: Color) -> Vec<Square> {
    board
        .squares_of_color(by_color)
        .into_iter()
        .filter(|attacker| piece_attacks(board, *attacker, target))
        .collect()
}

/// True when `color`'s king is attacked by the opponent.
pub fn is_check(board: &Board, color: Color) -> bool {
    let king = board.king_square(color);
    square_is_under_attack(board, king, color.opposite())
}

/// True when `color` is checkmated.
///
/// Returns false for a king that is not attacked at all; callers normally
/// gate on [`is_check`] first.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    let opponent = color.opposite();
    let king = board.king_square(color);

    // An adjacent square not holding an own piece and not attacked by the
    // opponent is an escape.
    for escape in board.adjacent_squares(king) {
        if let Some(occupant) = board.piece_at(escape) {
            if occupant.color == color {
                continue;
            }
        }
        if !square_is_under_attack(board, escape, opponent) {
            return false;
        }
    }

    let attackers = attackers_of(board, king, opponent);
    match attackers.len() {
        0 => false,
        1 => {
            let attacker = attackers[0];
            !can_capture_attacker(board, color, king, attacker)
                && !can_interpose(board, color, king, attacker)
        }
        // Double check with no king escape is mate.
        _ => true,
    }
}

/// Whether any piece of `color` can take the checking piece. The king itself
/// may only take an undefended attacker.
fn can_capture_attacker(board: &Board, color: Color, king: Square, attacker: Square) -> bool {
    for defender in board.squares_of_color(color) {
        if !piece_attacks(board, defender, attacker) {
            continue;
        }
        if defender == king {
            if !square_is_under_attack(board, attacker, color.opposite()) {
                return true;
            }
        } else {
            return true;
        }
    }
    false
}

/// Whether any piece of `color` can move onto a square strictly between a
/// sliding attacker and the king. Knights and pawns give contact-or-jump
/// checks with no squares between, so this naturally applies to sliders
/// only.
fn can_interpose(board: &Board, color: Color, king: Square, attacker: Square) -> bool {
    match board.piece_at(attacker).map(|piece| piece.kind) {
        Some(PieceKind::Bishop) | Some(PieceKind::Rook) | Some(PieceKind::Queen) => {}
        _ => return false,
    }
    for block in squares_between(attacker, king) {
        for own in board.squares_of_color(color) {
            if own == king {
                continue;
            }
            if move_is_ok(board, own, block) {
                return true;
            }
        }
    }
    false
}

/// True when `color` is not in check but has no legal destination square for
/// any of its pieces.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    if is_check(board, color) {
        return false;
    }
    board
        .squares_of_color(color)
        .iter()
        .all(|square| valid_moves(board, *square).is_empty())
}
