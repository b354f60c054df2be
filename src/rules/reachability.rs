//! Geometric reachability and attack tests.
//!
//! Reachability asks whether a piece could travel from one square to another
//! by its movement shape, ignoring occupancy of the destination but
//! respecting blockage along the path for sliding pieces. Attack asks
//! whether a piece bears on a square; for every kind but the pawn the two
//! coincide, pawns advance straight but attack diagonally.

use crate::board::board::Board;
use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::square::Square;
use crate::errors::IllegalMoveReason;
use crate::rules::check::is_check;

/// How a piece's shape relates `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Geometry {
    /// The shape does not connect the squares at all.
    No,
    /// The shape connects them and nothing stands in the way.
    Clear,
    /// The shape connects them but an intervening piece blocks the path.
    Blocked,
}

/// True when every square strictly between `from` and `to` is empty.
///
/// `from` and `to` must share a rank, file or diagonal; other inputs have no
/// strictly-between squares and trivially pass.
pub fn path_is_not_blocked(board: &Board, from: Square, to: Square) -> bool {
    squares_between(from, to)
        .iter()
        .all(|square| board.is_empty(*square))
}

/// Squares strictly between two aligned squares, nearest `from` first.
/// Empty when the squares are not on a shared rank, file or diagonal.
pub fn squares_between(from: Square, to: Square) -> Vec<Square> {
    let d_file = to.file() as i8 - from.file() as i8;
    let d_rank = to.rank() as i8 - from.rank() as i8;
    let aligned = d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs();
    if !aligned || (d_file == 0 && d_rank == 0) {
        return Vec::new();
    }

    let step_file = d_file.signum();
    let step_rank = d_rank.signum();
    let mut result = Vec::new();
    let mut file = from.file() as i8 + step_file;
    let mut rank = from.rank() as i8 + step_rank;
    while (file, rank) != (to.file() as i8, to.rank() as i8) {
        result.push(Square::from_file_rank(file, rank).expect("walk stays between endpoints"));
        file += step_file;
        rank += step_rank;
    }
    result
}

/// True when a pawn of `color` on `from` attacks `to`: one square forward
/// diagonally, direction by color.
pub fn pawn_attacks(from: Square, to: Square, color: Color) -> bool {
    let d_file = (to.file() as i8 - from.file() as i8).abs();
    let d_rank = to.rank() as i8 - from.rank() as i8;
    d_file == 1 && d_rank == color.pawn_direction()
}

fn geometry(board: &Board, from: Square, to: Square, piece: Piece) -> Geometry {
    if from == to {
        return Geometry::No;
    }
    let d_file = to.file() as i8 - from.file() as i8;
    let d_rank = to.rank() as i8 - from.rank() as i8;

    let sliding = |connects: bool| {
        if !connects {
            Geometry::No
        } else if path_is_not_blocked(board, from, to) {
            Geometry::Clear
        } else {
            Geometry::Blocked
        }
    };

    match piece.kind {
        PieceKind::Knight => {
            let shape = (d_file.abs() == 1 && d_rank.abs() == 2)
                || (d_file.abs() == 2 && d_rank.abs() == 1);
            if shape {
                Geometry::Clear
            } else {
                Geometry::No
            }
        }
        PieceKind::Bishop => sliding(d_file.abs() == d_rank.abs()),
        PieceKind::Rook => sliding(d_file == 0 || d_rank == 0),
        PieceKind::Queen => {
            sliding(d_file == 0 || d_rank == 0 || d_file.abs() == d_rank.abs())
        }
        PieceKind::King => {
            if from.king_distance(&to) != 1 {
                return Geometry::No;
            }
            // Two kings may never stand adjacent; this is a movement rule
            // distinct from check.
            let enemy_kings = board.squares_of(PieceKind::King, piece.color.opposite());
            if enemy_kings
                .iter()
                .any(|enemy| to.king_distance(enemy) <= 1)
            {
                return Geometry::No;
            }
            Geometry::Clear
        }
        PieceKind::Pawn => {
            // Forward non-capturing advance only; diagonal captures are
            // covered by `pawn_attacks`, which deliberately differs.
            if d_file != 0 {
                return Geometry::No;
            }
            let direction = piece.color.pawn_direction();
            if d_rank == direction {
                Geometry::Clear
            } else if d_rank == 2 * direction && from.rank() == piece.color.pawn_start_rank() {
                let intermediate = Square::from_file_rank(
                    from.file() as i8,
                    from.rank() as i8 + direction,
                )
                .expect("intermediate of a double step is on the board");
                if board.is_empty(intermediate) {
                    Geometry::Clear
                } else {
                    Geometry::Blocked
                }
            } else {
                Geometry::No
            }
        }
    }
}

/// Per-piece geometric reachability test, ignoring destination occupancy.
///
/// False when `from` is empty.
pub fn square_is_reachable(board: &Board, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some(piece) => geometry(board, from, to, piece) == Geometry::Clear,
        None => false,
    }
}

/// True when the piece on `from` attacks `to`: pawns by their capture
/// pattern, every other kind by reachability.
pub fn piece_attacks(board: &Board, from: Square, to: Square) -> bool {
    match board.piece_at(from) {
        Some(piece) if piece.kind == PieceKind::Pawn => {
            pawn_attacks(from, to, piece.color)
        }
        Some(_) => square_is_reachable(board, from, to),
        None => false,
    }
}

/// True when any piece of `by_color` attacks `target`.
pub fn square_is_under_attack(board: &Board, target: Square, by_color: Color) -> bool {
    board
        .squares_of_color(by_color)
        .iter()
        .any(|attacker| piece_attacks(board, *attacker, target))
}

/// Why a quiet (non-capturing) move fails, or `None` when it is fine.
///
/// The destination must be empty — capture occupancy is validated by the
/// game layer, not here. Non-pawn moves are additionally simulated on a
/// cloned board and rejected when they leave the mover's own king in check;
/// the game layer re-verifies that for every move after applying.
pub fn quiet_move_failure(board: &Board, from: Square, to: Square) -> Option<IllegalMoveReason> {
    let piece = match board.piece_at(from) {
        Some(piece) => piece,
        None => return Some(IllegalMoveReason::NoPieceAtSource),
    };
    if let Some(occupant) = board.piece_at(to) {
        return Some(if occupant.color == piece.color {
            IllegalMoveReason::OwnPieceOccupied
        } else {
            IllegalMoveReason::DestinationOccupied
        });
    }
    match geometry(board, from, to, piece) {
        Geometry::No => return Some(IllegalMoveReason::NotReachable),
        Geometry::Blocked => return Some(IllegalMoveReason::BlockedPath),
        Geometry::Clear => {}
    }
    if piece.kind != PieceKind::Pawn {
        let mut lookahead = board.clone();
        lookahead.move_piece(from, to);
        if is_check(&lookahead, piece.color) {
            return Some(IllegalMoveReason::KingLeftInCheck);
        }
    }
    None
}

/// Quiet-move legality as a plain yes/no.
pub fn move_is_ok(board: &Board, from: Square, to: Square) -> bool {
    quiet_move_failure(board, from, to).is_none()
}
