//! The long-form move encoding, the engine's canonical move string.
//!
//! Grammar:
//! - quiet move: `<P><from>-<to>`, e.g. `Pe2-e4`, `Ng1-f3`
//! - capture: `<P><from>x<C><to>`, e.g. `Bf5xPe4`
//! - promotion suffix on either: `=<P>`, e.g. `Pb7-b8=Q`, `Pb7xRa8=Q`
//! - castling: the literal king moves `Ke1-g1`, `Ke1-c1`, `Ke8-g8`, `Ke8-c8`,
//!   recognized downstream by the game layer.
//!
//! Piece letters are case-insensitive on input and canonicalized to
//! uppercase. Anything not matching the grammar fails with
//! `InvalidMoveFormat`. Algebraic notation is derived from a long move plus
//! a board snapshot, never stored authoritatively; see
//! [`crate::notation::algebraic`].

use crate::board::piece::PieceKind;
use crate::board::square::Square;
use crate::errors::EngineError;

/// One ply in long form: the squares, the moving piece's kind, the captured
/// kind when the `x` form was used, and the promotion kind when the `=`
/// suffix was present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongMove {
    pub from: Square,
    pub to: Square,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
}

impl LongMove {
    /// Parses the long-form grammar.
    pub fn from_long_form(text: &str) -> Result<LongMove, EngineError> {
        let bad = || EngineError::InvalidMoveFormat(text.to_owned());
        let trimmed = text.trim();
        // The grammar is ASCII only; the byte slicing below relies on it.
        if !trimmed.is_ascii() {
            return Err(bad());
        }
        let bytes = trimmed.as_bytes();
        if !matches!(bytes.len(), 6 | 7 | 8 | 9) {
            return Err(bad());
        }

        let piece = PieceKind::from_letter(bytes[0] as char).ok_or_else(bad)?;
        let from = Square::from_coordinate(&trimmed[1..3]).map_err(|_| bad())?;

        let (captured, to, rest) = match bytes[3] {
            b'-' => {
                let to = Square::from_coordinate(&trimmed[4..6]).map_err(|_| bad())?;
                (None, to, &trimmed[6..])
            }
            b'x' => {
                if bytes.len() < 7 {
                    return Err(bad());
                }
                let captured = PieceKind::from_letter(bytes[4] as char).ok_or_else(bad)?;
                let to = Square::from_coordinate(&trimmed[5..7]).map_err(|_| bad())?;
                (Some(captured), to, &trimmed[7..])
            }
            _ => return Err(bad()),
        };

        let promotion = match rest.as_bytes() {
            [] => None,
            [b'=', letter] => {
                let kind = PieceKind::from_letter(*letter as char).ok_or_else(bad)?;
                if matches!(kind, PieceKind::Pawn | PieceKind::King) {
                    return Err(bad());
                }
                Some(kind)
            }
            _ => return Err(bad()),
        };

        Ok(LongMove {
            from,
            to,
            piece,
            captured,
            promotion,
        })
    }

    /// Renders the canonical long-form string back.
    pub fn to_long_form(&self) -> String {
        let mut out = String::new();
        out.push(self.piece.letter());
        out.push_str(&self.from.coordinate());
        match self.captured {
            Some(captured) => {
                out.push('x');
                out.push(captured.letter());
            }
            None => out.push('-'),
        }
        out.push_str(&self.to.coordinate());
        if let Some(promotion) = self.promotion {
            out.push('=');
            out.push(promotion.letter());
        }
        out
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(coordinate: &str) -> Square {
        Square::from_coordinate(coordinate).expect("test coordinate should parse")
    }

    #[test]
    fn parses_quiet_moves() {
        let mv = LongMove::from_long_form("Pe2-e4").expect("should parse");
        assert_eq!(mv.piece, PieceKind::Pawn);
        assert_eq!(mv.from, sq("e2"));
        assert_eq!(mv.to, sq("e4"));
        assert_eq!(mv.captured, None);
        assert_eq!(mv.promotion, None);
        assert_eq!(mv.to_long_form(), "Pe2-e4");
    }

    #[test]
    fn parses_captures_with_the_captured_letter() {
        let mv = LongMove::from_long_form("Bf5xPe4").expect("should parse");
        assert_eq!(mv.piece, PieceKind::Bishop);
        assert_eq!(mv.captured, Some(PieceKind::Pawn));
        assert_eq!(mv.to, sq("e4"));
        assert_eq!(mv.to_long_form(), "Bf5xPe4");
    }

    #[test]
    fn parses_promotions_on_both_forms() {
        let quiet = LongMove::from_long_form("Pb7-b8=Q").expect("should parse");
        assert_eq!(quiet.promotion, Some(PieceKind::Queen));
        assert_eq!(quiet.to_long_form(), "Pb7-b8=Q");

        let capture = LongMove::from_long_form("Pb7xRa8=N").expect("should parse");
        assert_eq!(capture.captured, Some(PieceKind::Rook));
        assert_eq!(capture.promotion, Some(PieceKind::Knight));
        assert_eq!(capture.to_long_form(), "Pb7xRa8=N");
    }

    #[test]
    fn canonicalizes_lowercase_input() {
        let mv = LongMove::from_long_form("ng1-f3").expect("should parse");
        assert_eq!(mv.piece, PieceKind::Knight);
        assert_eq!(mv.to_long_form(), "Ng1-f3");
        let mv = LongMove::from_long_form("pb7-b8=q").expect("should parse");
        assert_eq!(mv.to_long_form(), "Pb7-b8=Q");
    }

    #[test]
    fn rejects_malformed_strings() {
        for bad in [
            "",
            "e2e4",
            "Pe2e4",
            "Xe2-e4",
            "Pe2-e9",
            "Pi2-e4",
            "Bf5x",
            "Bf5xe4",     // capture form without the captured letter
            "Pb7-b8=K",   // cannot promote to king
            "Pb7-b8=P",   // cannot promote to pawn
            "Pe2-e4=",
            "Pe2-e4extra",
        ] {
            assert!(
                matches!(
                    LongMove::from_long_form(bad),
                    Err(EngineError::InvalidMoveFormat(_))
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_multibyte_input_without_panicking() {
        // Byte lengths land in the accepted range, but the characters are
        // not ASCII; slicing by byte index must never be reached.
        for bad in ["Pぇ4-e4", "Pe2-ぇ4", "Pe2xQぇ4"] {
            assert!(
                matches!(
                    LongMove::from_long_form(bad),
                    Err(EngineError::InvalidMoveFormat(_))
                ),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
