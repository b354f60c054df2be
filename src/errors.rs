//! Errors used throughout the chess rules engine.
//!
//! This module defines the canonical error type returned by board queries,
//! move parsing, rule validation and game orchestration. `EngineError` is the
//! single error type across the crate; illegal moves additionally carry an
//! [`IllegalMoveReason`] so callers can show the player exactly which rule
//! rejected their move.
//!
//! All of these are locally recoverable: a failed move leaves the board and
//! game state untouched and the player may try again. The only unrecoverable
//! condition in the crate is asking for a king square on a board that has no
//! king of that color, which panics because it indicates a broken invariant
//! the surrounding system must never create.

use thiserror::Error;

/// Unified error type for the rules engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A square string was not exactly two characters in `a..h` / `1..8`.
    #[error("invalid coordinate: {0:?}")]
    InvalidCoordinate(String),

    /// A position string did not match the rank-by-rank FEN-subset grammar.
    #[error("invalid position string: {0}")]
    InvalidPosition(String),

    /// A long-form move string did not match the move grammar.
    #[error("invalid move: {0:?}")]
    InvalidMoveFormat(String),

    /// A move was attempted by a player who does not own the current turn.
    #[error("it is not your turn")]
    NotPlayersTurn,

    /// A move was attempted on a game that is awaiting players or finished.
    #[error("the game is not in progress")]
    GameNotInProgress,

    /// The acting user is not seated at this game.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// A draw response arrived without a matching open offer.
    #[error("no draw offer is pending")]
    NoPendingDrawOffer,

    /// The move parsed but violates the rules of movement.
    #[error("illegal move: {0}")]
    IllegalMove(IllegalMoveReason),

    /// Saving or loading a game record failed.
    #[error("storage error: {0}")]
    Storage(#[from] serde_json::Error),
}

/// Why an otherwise well-formed move was rejected.
///
/// The display strings are user-facing; the UI layer shows them verbatim and
/// leaves the board open for another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    #[error("there is no piece of yours on the source square")]
    NoPieceAtSource,

    #[error("that piece cannot reach the destination square")]
    NotReachable,

    #[error("the path to the destination is blocked")]
    BlockedPath,

    #[error("the destination square is occupied")]
    DestinationOccupied,

    #[error("one of your own pieces occupies the destination square")]
    OwnPieceOccupied,

    #[error("the capture target cannot be taken by that piece")]
    TargetNotAttacked,

    #[error("that move would leave your king in check")]
    KingLeftInCheck,

    #[error("castling rights on that side have been forfeited")]
    CastlingRightForfeited,

    #[error("the squares between king and rook are not empty")]
    CastlingPathBlocked,

    #[error("the king may not castle out of, through, or into check")]
    CastlingThroughCheck,
}

impl EngineError {
    /// Shorthand used by the rule validators.
    pub fn illegal(reason: IllegalMoveReason) -> Self {
        EngineError::IllegalMove(reason)
    }
}
