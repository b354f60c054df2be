//! The move record of a single game.
//!
//! Each ply is stored twice: the canonical long form, which is what the
//! engine re-parses, and the algebraic form computed against the position
//! the move was played from. Algebraic text is position-dependent, so it is
//! rendered once at move time and kept verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One ply as recorded on the scoresheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMove {
    /// Canonical long form, e.g. `Pe2-e4`.
    pub long: String,
    /// Algebraic form including any check or score suffix, e.g. `e4`,
    /// `Qxf7# 1-0`.
    pub algebraic: String,
    pub played_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoresheet {
    moves: Vec<RecordedMove>,
}

impl Scoresheet {
    pub fn new() -> Scoresheet {
        Scoresheet::default()
    }

    pub fn append(&mut self, ply: RecordedMove) {
        self.moves.push(ply);
    }

    pub fn moves(&self) -> &[RecordedMove] {
        &self.moves
    }

    pub fn last(&self) -> Option<&RecordedMove> {
        self.moves.last()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// The full-move number of the *next* ply, starting at 1. White's and
    /// black's replies within a pair share a number: after white's half of
    /// a pair the value stays put, and it advances only once black replies.
    pub fn move_number(&self) -> usize {
        self.moves.len() / 2 + 1
    }

    /// Renders the numbered transcript, e.g. `1. e4 e5 2. Nf3 Nc6`.
    pub fn transcript(&self) -> String {
        let mut out = String::new();
        for (index, ply) in self.moves.iter().enumerate() {
            if index % 2 == 0 {
                if index > 0 {
                    out.push(' ');
                }
                out.push_str(&format!("{}. ", index / 2 + 1));
            } else {
                out.push(' ');
            }
            out.push_str(&ply.algebraic);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ply(long: &str, algebraic: &str) -> RecordedMove {
        RecordedMove {
            long: long.to_owned(),
            algebraic: algebraic.to_owned(),
            played_at: Utc::now(),
        }
    }

    #[test]
    fn move_numbers_advance_per_pair() {
        let mut dut = Scoresheet::new();
        assert_eq!(dut.move_number(), 1);
        dut.append(ply("Pe2-e4", "e4"));
        assert_eq!(dut.move_number(), 1);
        dut.append(ply("Pe7-e5", "e5"));
        assert_eq!(dut.move_number(), 2);
        dut.append(ply("Ng1-f3", "Nf3"));
        assert_eq!(dut.move_number(), 2);
    }

    #[test]
    fn transcript_numbers_white_moves_only() {
        let mut dut = Scoresheet::new();
        dut.append(ply("Pe2-e4", "e4"));
        dut.append(ply("Pe7-e5", "e5"));
        dut.append(ply("Ng1-f3", "Nf3"));
        assert_eq!(dut.transcript(), "1. e4 e5 2. Nf3");
    }

    #[test]
    fn serializes_through_json() {
        let mut dut = Scoresheet::new();
        dut.append(ply("Pe2-e4", "e4"));
        let json = serde_json::to_string(&dut).expect("scoresheet should serialize");
        let back: Scoresheet =
            serde_json::from_str(&json).expect("scoresheet should deserialize");
        assert_eq!(back, dut);
    }
}
