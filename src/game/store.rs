//! Persistence of games through an injected repository.
//!
//! The engine itself never does I/O. A [`GameRecord`] is the flat,
//! serializable projection of a game; a [`GameStore`] implementation owns
//! where the JSON goes. [`InMemoryGameStore`] is the reference
//! implementation and what the tests use.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::piece::Color;
use crate::board::square::Square;
use crate::errors::EngineError;
use crate::game::play::GameStatus;
use crate::game::players::Player;
use crate::game::scoresheet::Scoresheet;
use crate::rules::castling::CastlingRights;

/// Everything needed to resume a game, keyed by an opaque id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: String,
    pub white: Option<Player>,
    pub black: Option<Player>,
    /// FEN-subset placement string.
    pub position: String,
    pub en_passant: Option<Square>,
    pub castling: CastlingRights,
    pub turn: Color,
    pub status: GameStatus,
    /// Color that has an open draw offer, if any.
    pub draw_offer: Option<Color>,
    pub scoresheet: Scoresheet,
}

/// Repository seam: load and save game records by id.
pub trait GameStore {
    fn save(&mut self, record: &GameRecord) -> Result<(), EngineError>;
    fn load(&self, id: &str) -> Result<Option<GameRecord>, EngineError>;
}

/// Keeps records as JSON strings in a map.
#[derive(Debug, Default)]
pub struct InMemoryGameStore {
    records: BTreeMap<String, String>,
}

impl InMemoryGameStore {
    pub fn new() -> InMemoryGameStore {
        InMemoryGameStore::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl GameStore for InMemoryGameStore {
    fn save(&mut self, record: &GameRecord) -> Result<(), EngineError> {
        let json = serde_json::to_string(record)?;
        self.records.insert(record.id.clone(), json);
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Option<GameRecord>, EngineError> {
        match self.records.get(id) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }
}
