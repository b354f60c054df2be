//! Castling rights and the castling validator.
//!
//! Rights are four independent booleans, one per color and side, permanently
//! cleared once violated. Validation short-circuits in a fixed order: right
//! held, path between king and rook empty, king not currently attacked,
//! no square the king passes through (destination included) attacked.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::board::Board;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::Square;
use crate::errors::{EngineError, IllegalMoveReason};
use crate::rules::reachability::square_is_under_attack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

/// Per-color, per-side castling rights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::all()
    }
}

impl CastlingRights {
    /// Rights of a fresh game: everything still allowed.
    pub fn all() -> CastlingRights {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn allows(&self, color: Color, side: CastlingSide) -> bool {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => self.white_kingside,
            (Color::White, CastlingSide::Queenside) => self.white_queenside,
            (Color::Black, CastlingSide::Kingside) => self.black_kingside,
            (Color::Black, CastlingSide::Queenside) => self.black_queenside,
        }
    }

    /// Permanently clears one right.
    pub fn forfeit(&mut self, color: Color, side: CastlingSide) {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => self.white_kingside = false,
            (Color::White, CastlingSide::Queenside) => self.white_queenside = false,
            (Color::Black, CastlingSide::Kingside) => self.black_kingside = false,
            (Color::Black, CastlingSide::Queenside) => self.black_queenside = false,
        }
    }

    /// Clears both of a color's rights, e.g. after its king moves.
    pub fn forfeit_all(&mut self, color: Color) {
        self.forfeit(color, CastlingSide::Kingside);
        self.forfeit(color, CastlingSide::Queenside);
    }
}

/// Recognizes the four castling king moves (`e1-g1`, `e1-c1`, `e8-g8`,
/// `e8-c8`) for the given color.
pub fn castling_side_for(color: Color, from: Square, to: Square) -> Option<CastlingSide> {
    let home_rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    if from.rank() != home_rank || to.rank() != home_rank || from.file() != 4 {
        return None;
    }
    match to.file() {
        6 => Some(CastlingSide::Kingside),
        2 => Some(CastlingSide::Queenside),
        _ => None,
    }
}

struct CastlingGeometry {
    king_from: Square,
    king_to: Square,
    rook_from: Square,
    rook_to: Square,
    /// Squares strictly between king and rook.
    between: &'static [&'static str],
    /// Squares the king passes through, destination included.
    king_path: &'static [&'static str],
}

fn geometry(color: Color, side: CastlingSide) -> CastlingGeometry {
    let coord = |text: &str| Square::from_coordinate(text).expect("static coordinate");
    match (color, side) {
        (Color::White, CastlingSide::Kingside) => CastlingGeometry {
            king_from: coord("e1"),
            king_to: coord("g1"),
            rook_from: coord("h1"),
            rook_to: coord("f1"),
            between: &["f1", "g1"],
            king_path: &["f1", "g1"],
        },
        (Color::White, CastlingSide::Queenside) => CastlingGeometry {
            king_from: coord("e1"),
            king_to: coord("c1"),
            rook_from: coord("a1"),
            rook_to: coord("d1"),
            between: &["b1", "c1", "d1"],
            king_path: &["d1", "c1"],
        },
        (Color::Black, CastlingSide::Kingside) => CastlingGeometry {
            king_from: coord("e8"),
            king_to: coord("g8"),
            rook_from: coord("h8"),
            rook_to: coord("f8"),
            between: &["f8", "g8"],
            king_path: &["f8", "g8"],
        },
        (Color::Black, CastlingSide::Queenside) => CastlingGeometry {
            king_from: coord("e8"),
            king_to: coord("c8"),
            rook_from: coord("a8"),
            rook_to: coord("d8"),
            between: &["b8", "c8", "d8"],
            king_path: &["d8", "c8"],
        },
    }
}

/// Validates and performs castling for `color` on `side`.
///
/// On success the king and the corresponding rook relocate; the caller is
/// responsible for clearing the color's rights afterwards. On failure the
/// board is unchanged and the error names the violated rule.
pub fn perform_castling(
    board: &mut Board,
    rights: &CastlingRights,
    color: Color,
    side: CastlingSide,
) -> Result<(), EngineError> {
    let failure = |reason: IllegalMoveReason| {
        debug!(%color, ?side, %reason, "castling rejected");
        Err(EngineError::illegal(reason))
    };

    if !rights.allows(color, side) {
        return failure(IllegalMoveReason::CastlingRightForfeited);
    }

    let geometry = geometry(color, side);
    let coord = |text: &str| Square::from_coordinate(text).expect("static coordinate");

    // The rights imply king and rook have not moved; a board built from an
    // arbitrary position may still lack them.
    let king_ok = board.piece_at(geometry.king_from).is_some_and(|piece| {
        piece.kind == PieceKind::King && piece.color == color
    });
    let rook_ok = board.piece_at(geometry.rook_from).is_some_and(|piece| {
        piece.kind == PieceKind::Rook && piece.color == color
    });
    if !king_ok || !rook_ok {
        return failure(IllegalMoveReason::CastlingRightForfeited);
    }

    if geometry
        .between
        .iter()
        .any(|text| !board.is_empty(coord(text)))
    {
        return failure(IllegalMoveReason::CastlingPathBlocked);
    }

    let opponent = color.opposite();
    if square_is_under_attack(board, geometry.king_from, opponent) {
        return failure(IllegalMoveReason::CastlingThroughCheck);
    }
    if geometry
        .king_path
        .iter()
        .any(|text| square_is_under_attack(board, coord(text), opponent))
    {
        return failure(IllegalMoveReason::CastlingThroughCheck);
    }

    board.move_piece(geometry.king_from, geometry.king_to);
    board.move_piece(geometry.rook_from, geometry.rook_to);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(position: &str) -> Board {
        Board::from_position_string(position).expect("test position should parse")
    }

    fn sq(coordinate: &str) -> Square {
        Square::from_coordinate(coordinate).expect("test coordinate should parse")
    }

    #[test]
    fn recognizes_the_four_castling_king_moves() {
        assert_eq!(
            castling_side_for(Color::White, sq("e1"), sq("g1")),
            Some(CastlingSide::Kingside)
        );
        assert_eq!(
            castling_side_for(Color::White, sq("e1"), sq("c1")),
            Some(CastlingSide::Queenside)
        );
        assert_eq!(
            castling_side_for(Color::Black, sq("e8"), sq("g8")),
            Some(CastlingSide::Kingside)
        );
        assert_eq!(castling_side_for(Color::Black, sq("e8"), sq("f8")), None);
        assert_eq!(castling_side_for(Color::White, sq("e8"), sq("g8")), None);
    }

    #[test]
    fn successful_castling_moves_king_and_rook() {
        let mut dut = board("r3k2r/8/8/8/8/8/8/R3K2R");
        perform_castling(&mut dut, &CastlingRights::all(), Color::White, CastlingSide::Kingside)
            .expect("white O-O should be legal");
        assert_eq!(dut.piece_at(sq("g1")).unwrap().kind, PieceKind::King);
        assert_eq!(dut.piece_at(sq("f1")).unwrap().kind, PieceKind::Rook);
        assert!(dut.is_empty(sq("e1")));
        assert!(dut.is_empty(sq("h1")));

        perform_castling(&mut dut, &CastlingRights::all(), Color::Black, CastlingSide::Queenside)
            .expect("black O-O-O should be legal");
        assert_eq!(dut.piece_at(sq("c8")).unwrap().kind, PieceKind::King);
        assert_eq!(dut.piece_at(sq("d8")).unwrap().kind, PieceKind::Rook);
    }

    #[test]
    fn forfeited_rights_reject_before_anything_else() {
        let mut dut = board("r3k2r/8/8/8/8/8/8/R3K2R");
        let mut rights = CastlingRights::all();
        rights.forfeit(Color::White, CastlingSide::Kingside);
        let before = dut.clone();
        let result =
            perform_castling(&mut dut, &rights, Color::White, CastlingSide::Kingside);
        assert!(matches!(
            result,
            Err(EngineError::IllegalMove(IllegalMoveReason::CastlingRightForfeited))
        ));
        assert_eq!(dut, before);
    }

    #[test]
    fn blocked_path_rejects_castling() {
        let mut dut = board("r3k2r/8/8/8/8/8/8/R3KB1R");
        let result = perform_castling(
            &mut dut,
            &CastlingRights::all(),
            Color::White,
            CastlingSide::Kingside,
        );
        assert!(matches!(
            result,
            Err(EngineError::IllegalMove(IllegalMoveReason::CastlingPathBlocked))
        ));
    }

    #[test]
    fn castling_through_an_attacked_transit_square_is_rejected() {
        // The f8 rook attacks f1: neither e1 nor g1 is attacked, but the
        // king would pass through check.
        let mut dut = board("4kr2/8/8/8/8/8/8/4K2R");
        let before = dut.clone();
        let result = perform_castling(
            &mut dut,
            &CastlingRights::all(),
            Color::White,
            CastlingSide::Kingside,
        );
        assert!(matches!(
            result,
            Err(EngineError::IllegalMove(IllegalMoveReason::CastlingThroughCheck))
        ));
        assert_eq!(dut, before);
    }

    #[test]
    fn castling_out_of_check_is_rejected() {
        // The e8 rook attacks the e1 king directly.
        let mut dut = board("4k3/4r3/8/8/8/8/8/4K2R");
        let result = perform_castling(
            &mut dut,
            &CastlingRights::all(),
            Color::White,
            CastlingSide::Kingside,
        );
        assert!(matches!(
            result,
            Err(EngineError::IllegalMove(IllegalMoveReason::CastlingThroughCheck))
        ));
    }

    #[test]
    fn queenside_b_file_attack_does_not_block_castling() {
        // b1 is between king and rook but not on the king's path; an attack
        // on it alone must not prevent O-O-O.
        let mut dut = board("1r2k3/8/8/8/8/8/8/R3K3");
        perform_castling(&mut dut, &CastlingRights::all(), Color::White, CastlingSide::Queenside)
            .expect("white O-O-O should be legal despite the b-file rook");
        assert_eq!(dut.piece_at(sq("c1")).unwrap().kind, PieceKind::King);
    }
}
