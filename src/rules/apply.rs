//! Applies a parsed long move to a board, with full rule validation.
//!
//! This is the single pipeline behind both the game layer's move protocol
//! and the algebraic-notation check suffix simulation. The board passed in
//! is mutated; callers hand in a scratch clone and commit it only on
//! success, which is what makes "the whole move is rejected and the board is
//! left unmodified" cheap to guarantee.

use crate::board::board::Board;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::Square;
use crate::errors::{EngineError, IllegalMoveReason};
use crate::notation::long_move::LongMove;
use crate::rules::castling::{castling_side_for, perform_castling, CastlingRights, CastlingSide};
use crate::rules::check::is_check;
use crate::rules::reachability::{
    path_is_not_blocked, pawn_attacks, piece_attacks, quiet_move_failure,
};

/// What a validated move turned out to be, for logging and bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedKind {
    Quiet,
    Capture,
    EnPassantCapture,
    Castle(CastlingSide),
    Promotion,
}

/// Validates `mv` for `color` and applies it to `board`, maintaining
/// `rights` and the en-passant target.
///
/// On any error the move must be considered void; `board` and `rights` may
/// have been partially mutated, so callers always operate on clones.
pub fn apply_long_move(
    board: &mut Board,
    rights: &mut CastlingRights,
    color: Color,
    mv: &LongMove,
) -> Result<AppliedKind, EngineError> {
    let piece = board
        .piece_at(mv.from)
        .filter(|piece| piece.color == color && piece.kind == mv.piece)
        .ok_or(EngineError::IllegalMove(IllegalMoveReason::NoPieceAtSource))?;

    // The `=<P>` suffix is only meaningful on a pawn reaching the back
    // rank.
    let promotes =
        piece.kind == PieceKind::Pawn && mv.to.rank() == color.promotion_rank();
    if mv.promotion.is_some() && !promotes {
        return Err(EngineError::InvalidMoveFormat(mv.to_long_form()));
    }

    // Castling long-forms route to the dedicated validator.
    if piece.kind == PieceKind::King {
        if let Some(side) = castling_side_for(color, mv.from, mv.to) {
            perform_castling(board, rights, color, side)?;
            rights.forfeit_all(color);
            board.set_en_passant_target(None);
            return Ok(AppliedKind::Castle(side));
        }
    }

    let promotion_kind = mv.promotion.unwrap_or(PieceKind::Queen);

    let applied = if piece.kind == PieceKind::Pawn
        && board.en_passant_target() == Some(mv.to)
        && mv.from.file() != mv.to.file()
    {
        // A pawn stepping diagonally onto the live target is an en-passant
        // capture whether or not the capture marker was written.
        if !pawn_attacks(mv.from, mv.to, color) {
            return Err(EngineError::illegal(IllegalMoveReason::TargetNotAttacked));
        }
        board.perform_en_passant_capture(mv.from, mv.to);
        AppliedKind::EnPassantCapture
    } else if let Some(captured_kind) = mv.captured {
        let occupant = board
            .piece_at(mv.to)
            .ok_or(EngineError::IllegalMove(IllegalMoveReason::TargetNotAttacked))?;
        if occupant.color == color {
            return Err(EngineError::illegal(IllegalMoveReason::OwnPieceOccupied));
        }
        if occupant.kind != captured_kind {
            return Err(EngineError::illegal(IllegalMoveReason::TargetNotAttacked));
        }
        let attacks = if piece.kind == PieceKind::Pawn {
            pawn_attacks(mv.from, mv.to, color)
        } else {
            piece_attacks(board, mv.from, mv.to)
        };
        if !attacks {
            return Err(EngineError::illegal(
                if path_is_not_blocked(board, mv.from, mv.to) {
                    IllegalMoveReason::TargetNotAttacked
                } else {
                    IllegalMoveReason::BlockedPath
                },
            ));
        }
        if promotes {
            board.promote(mv.from, mv.to, promotion_kind);
            AppliedKind::Promotion
        } else {
            board.move_piece(mv.from, mv.to);
            AppliedKind::Capture
        }
    } else {
        if let Some(reason) = quiet_move_failure(board, mv.from, mv.to) {
            return Err(EngineError::illegal(reason));
        }
        if promotes {
            board.promote(mv.from, mv.to, promotion_kind);
            AppliedKind::Promotion
        } else {
            board.move_piece(mv.from, mv.to);
            AppliedKind::Quiet
        }
    };

    // Rights are forfeited permanently once the king or a rook leaves its
    // original square.
    match piece.kind {
        PieceKind::King => rights.forfeit_all(color),
        PieceKind::Rook => {
            let home_rank = match color {
                Color::White => 0,
                Color::Black => 7,
            };
            if mv.from.rank() == home_rank {
                if mv.from.file() == 0 {
                    rights.forfeit(color, CastlingSide::Queenside);
                } else if mv.from.file() == 7 {
                    rights.forfeit(color, CastlingSide::Kingside);
                }
            }
        }
        _ => {}
    }

    // The en-passant target is set only by a fresh two-square pawn advance
    // and cleared by everything else.
    let double_step = piece.kind == PieceKind::Pawn
        && mv.from.rank().abs_diff(mv.to.rank()) == 2;
    if double_step {
        let behind = Square::from_file_rank(
            mv.from.file() as i8,
            mv.from.rank() as i8 + color.pawn_direction(),
        )
        .expect("square behind a double-stepped pawn is on the board");
        board.set_en_passant_target(Some(behind));
    } else {
        board.set_en_passant_target(None);
    }

    // The mover may never leave their own king attacked.
    if is_check(board, color) {
        return Err(EngineError::illegal(IllegalMoveReason::KingLeftInCheck));
    }

    Ok(applied)
}
