//! Game orchestration: seats, turn order, the move protocol and the result
//! state machine.
//!
//! A game starts awaiting players, runs while moves come in, and ends in one
//! of three terminal states. [`GamePlay::make_move`] is the never-failing
//! entry point: every rule violation is folded into a [`MoveOutcome`] whose
//! message is fit to show the player, and a rejected move leaves the game
//! exactly as it was. Time controls live outside this type; a loss on time
//! arrives here as a resignation.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::board::Board;
use crate::board::piece::Color;
use crate::errors::EngineError;
use crate::game::players::{Player, StatisticsSink};
use crate::game::scoresheet::{RecordedMove, Scoresheet};
use crate::game::store::GameRecord;
use crate::notation::algebraic::calculate_algebraic;
use crate::notation::long_move::LongMove;
use crate::rules::apply::apply_long_move;
use crate::rules::castling::CastlingRights;
use crate::rules::check::{is_check, is_checkmate, is_stalemate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    AwaitingPlayers,
    InProgress,
    WhiteWon,
    BlackWon,
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::WhiteWon | GameStatus::BlackWon | GameStatus::Drawn
        )
    }

    fn won_by(color: Color) -> GameStatus {
        match color {
            Color::White => GameStatus::WhiteWon,
            Color::Black => GameStatus::BlackWon,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            GameStatus::AwaitingPlayers => "awaiting players",
            GameStatus::InProgress => "in progress",
            GameStatus::WhiteWon => "1-0",
            GameStatus::BlackWon => "0-1",
            GameStatus::Drawn => "1/2-1/2",
        };
        write!(f, "{text}")
    }
}

/// The structured result of a move attempt. `make_move` never fails; a
/// rejection is an outcome with `accepted == false` and the reason in
/// `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub accepted: bool,
    pub message: String,
    /// The algebraic rendering of an accepted move.
    pub algebraic: Option<String>,
}

/// One game of chess between two seated players.
#[derive(Debug, Clone)]
pub struct GamePlay {
    id: String,
    board: Board,
    rights: CastlingRights,
    turn: Color,
    status: GameStatus,
    white: Option<Player>,
    black: Option<Player>,
    draw_offer: Option<Color>,
    scoresheet: Scoresheet,
}

impl GamePlay {
    /// A fresh game on the standard position, waiting for both seats.
    pub fn new(id: impl Into<String>) -> GamePlay {
        GamePlay {
            id: id.into(),
            board: Board::standard(),
            rights: CastlingRights::all(),
            turn: Color::White,
            status: GameStatus::AwaitingPlayers,
            white: None,
            black: None,
            draw_offer: None,
            scoresheet: Scoresheet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.rights
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn scoresheet(&self) -> &Scoresheet {
        &self.scoresheet
    }

    pub fn player(&self, color: Color) -> Option<&Player> {
        match color {
            Color::White => self.white.as_ref(),
            Color::Black => self.black.as_ref(),
        }
    }

    pub fn draw_offer(&self) -> Option<Color> {
        self.draw_offer
    }

    /// Seats a player; the game starts once both seats are filled.
    pub fn seat(&mut self, color: Color, player: Player) -> Result<(), EngineError> {
        if self.status != GameStatus::AwaitingPlayers {
            return Err(EngineError::GameNotInProgress);
        }
        match color {
            Color::White => self.white = Some(player),
            Color::Black => self.black = Some(player),
        }
        if self.white.is_some() && self.black.is_some() {
            self.status = GameStatus::InProgress;
            info!(game = %self.id, "both seats filled, game started");
        }
        Ok(())
    }

    fn color_of(&self, user_id: &str) -> Option<Color> {
        if self.white.as_ref().is_some_and(|p| p.id == user_id) {
            Some(Color::White)
        } else if self.black.as_ref().is_some_and(|p| p.id == user_id) {
            Some(Color::Black)
        } else {
            None
        }
    }

    /// Plays one long-form move for `user_id`.
    ///
    /// Rule violations of any kind come back as a rejected outcome with the
    /// game untouched. When the move ends the game, `statistics` is notified
    /// before returning.
    pub fn make_move(
        &mut self,
        user_id: &str,
        text: &str,
        statistics: &mut dyn StatisticsSink,
    ) -> MoveOutcome {
        match self.try_move(user_id, text) {
            Ok(algebraic) => {
                info!(game = %self.id, %algebraic, status = %self.status, "move accepted");
                if self.status.is_terminal() {
                    self.notify_statistics(statistics);
                }
                MoveOutcome {
                    accepted: true,
                    message: format!("played {algebraic}"),
                    algebraic: Some(algebraic),
                }
            }
            Err(error) => {
                debug!(game = %self.id, move_text = text, %error, "move rejected");
                MoveOutcome {
                    accepted: false,
                    message: format!("ERROR: {error}"),
                    algebraic: None,
                }
            }
        }
    }

    fn try_move(&mut self, user_id: &str, text: &str) -> Result<String, EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::GameNotInProgress);
        }
        let color = self
            .color_of(user_id)
            .ok_or_else(|| EngineError::UnknownPlayer(user_id.to_owned()))?;
        if color != self.turn {
            return Err(EngineError::NotPlayersTurn);
        }

        let mv = LongMove::from_long_form(text)?;

        // Validate and apply on scratch copies; commit only once both the
        // move and its notation went through.
        let mut board = self.board.clone();
        let mut rights = self.rights;
        apply_long_move(&mut board, &mut rights, color, &mv)?;
        let algebraic = calculate_algebraic(&mv, color, &self.board, &self.rights)?;
        self.board = board;
        self.rights = rights;

        self.scoresheet.append(RecordedMove {
            long: mv.to_long_form(),
            algebraic: algebraic.clone(),
            played_at: Utc::now(),
        });

        let opponent = color.opposite();
        if is_check(&self.board, opponent) && is_checkmate(&self.board, opponent) {
            self.status = GameStatus::won_by(color);
        } else if is_stalemate(&self.board, opponent) {
            self.status = GameStatus::Drawn;
        }
        self.turn = opponent;
        self.draw_offer = None;
        Ok(algebraic)
    }

    /// Records a draw offer by `user_id`. A later move by either side
    /// silently withdraws it.
    pub fn offer_draw(&mut self, user_id: &str) -> Result<(), EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::GameNotInProgress);
        }
        let color = self
            .color_of(user_id)
            .ok_or_else(|| EngineError::UnknownPlayer(user_id.to_owned()))?;
        self.draw_offer = Some(color);
        info!(game = %self.id, %color, "draw offered");
        Ok(())
    }

    /// Accepts or refuses the opponent's open draw offer.
    pub fn respond_to_draw(
        &mut self,
        user_id: &str,
        accept: bool,
        statistics: &mut dyn StatisticsSink,
    ) -> Result<(), EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::GameNotInProgress);
        }
        let color = self
            .color_of(user_id)
            .ok_or_else(|| EngineError::UnknownPlayer(user_id.to_owned()))?;
        if self.draw_offer != Some(color.opposite()) {
            return Err(EngineError::NoPendingDrawOffer);
        }
        self.draw_offer = None;
        if accept {
            self.status = GameStatus::Drawn;
            info!(game = %self.id, "draw agreed");
            self.notify_statistics(statistics);
        } else {
            info!(game = %self.id, %color, "draw refused");
        }
        Ok(())
    }

    /// Resigns the game for `user_id`. Losses on time also enter here, the
    /// time-tracking collaborator resigns on the flagged player's behalf.
    pub fn resign(
        &mut self,
        user_id: &str,
        statistics: &mut dyn StatisticsSink,
    ) -> Result<GameStatus, EngineError> {
        if self.status != GameStatus::InProgress {
            return Err(EngineError::GameNotInProgress);
        }
        let color = self
            .color_of(user_id)
            .ok_or_else(|| EngineError::UnknownPlayer(user_id.to_owned()))?;
        self.status = GameStatus::won_by(color.opposite());
        self.draw_offer = None;
        info!(game = %self.id, %color, status = %self.status, "resignation");
        self.notify_statistics(statistics);
        Ok(self.status)
    }

    fn notify_statistics(&self, statistics: &mut dyn StatisticsSink) {
        if let (Some(white), Some(black)) = (&self.white, &self.black) {
            statistics.record_result(white, black, self.status);
        }
    }

    /// Flattens the game into its persistable record.
    pub fn to_record(&self) -> GameRecord {
        GameRecord {
            id: self.id.clone(),
            white: self.white.clone(),
            black: self.black.clone(),
            position: self.board.position_string(),
            en_passant: self.board.en_passant_target(),
            castling: self.rights,
            turn: self.turn,
            status: self.status,
            draw_offer: self.draw_offer,
            scoresheet: self.scoresheet.clone(),
        }
    }

    /// Rebuilds a game from its record.
    pub fn from_record(record: GameRecord) -> Result<GamePlay, EngineError> {
        let mut board = Board::from_position_string(&record.position)?;
        board.set_en_passant_target(record.en_passant);
        Ok(GamePlay {
            id: record.id,
            board,
            rights: record.castling,
            turn: record.turn,
            status: record.status,
            white: record.white,
            black: record.black,
            draw_offer: record.draw_offer,
            scoresheet: record.scoresheet,
        })
    }
}
