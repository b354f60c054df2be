//! Piece and color value types.

use serde::{Deserialize, Serialize};

/// Side to move / piece ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank the pawns of this color start on, zero-based.
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank this color promotes on, zero-based.
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Forward rank delta for this color's pawns.
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Piece kind; color is carried alongside in [`Piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Uppercase type letter used by both the long-move grammar and the
    /// position encoding.
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parses a type letter, case-insensitively.
    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Display word for the kind.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        }
    }
}

/// An immutable chessman value. Many pieces of the same kind and color
/// coexist on a board; a piece has no identity beyond kind + color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { kind, color }
    }

    /// Display word for the piece's kind.
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// FEN-style letter: uppercase for white, lowercase for black.
    pub fn fen_letter(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    /// Parses a FEN-style letter, deriving the color from its case.
    pub fn from_fen_letter(letter: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(letter)?;
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { kind, color })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fen_letters_encode_color_by_case() {
        let white_knight = Piece::new(PieceKind::Knight, Color::White);
        let black_queen = Piece::new(PieceKind::Queen, Color::Black);
        assert_eq!(white_knight.fen_letter(), 'N');
        assert_eq!(black_queen.fen_letter(), 'q');
        assert_eq!(Piece::from_fen_letter('N'), Some(white_knight));
        assert_eq!(Piece::from_fen_letter('q'), Some(black_queen));
        assert_eq!(Piece::from_fen_letter('x'), None);
    }

    #[test]
    fn kind_letters_parse_case_insensitively() {
        assert_eq!(PieceKind::from_letter('n'), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_letter('K'), Some(PieceKind::King));
        assert_eq!(PieceKind::from_letter('z'), None);
        assert_eq!(PieceKind::Rook.name(), "Rook");
    }
}
