//! The board position: a sparse square-to-piece mapping plus the en-passant
//! target square.
//!
//! Absent map entries are empty squares. The board knows nothing about whose
//! turn it is or castling rights; those are scalar fields of the game layer.
//! Cloning a `Board` is the deep value copy used everywhere a speculative
//! "what if" evaluation is needed, e.g. testing whether a move would leave
//! the mover's own king in check.

use std::collections::BTreeMap;

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::square::{Direction, Square};
use crate::errors::EngineError;

/// Piece placement of the standard 32-piece starting position.
pub const STANDARD_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Board {
    squares: BTreeMap<Square, Piece>,
    en_passant: Option<Square>,
}

impl Board {
    /// An empty board with no en-passant target.
    pub fn new() -> Board {
        Board::default()
    }

    /// The standard starting position.
    pub fn standard() -> Board {
        Board::from_position_string(STANDARD_POSITION)
            .expect("standard position string must parse")
    }

    /// Parses the rank-by-rank position encoding: ranks 8 down to 1 separated
    /// by `/`, digits for runs of empty squares, letters for pieces with case
    /// encoding the color.
    pub fn from_position_string(position: &str) -> Result<Board, EngineError> {
        let ranks: Vec<&str> = position.split('/').collect();
        if ranks.len() != 8 {
            return Err(EngineError::InvalidPosition(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut board = Board::new();
        for (row, rank_text) in ranks.iter().enumerate() {
            let rank = 7 - row as i8;
            let mut file: i8 = 0;
            for c in rank_text.chars() {
                match c {
                    '1'..='8' => {
                        file += c.to_digit(10).expect("digit range checked") as i8;
                    }
                    _ => {
                        let piece = Piece::from_fen_letter(c).ok_or_else(|| {
                            EngineError::InvalidPosition(format!("unexpected character {c:?}"))
                        })?;
                        let square = Square::from_file_rank(file, rank).ok_or_else(|| {
                            EngineError::InvalidPosition(format!(
                                "rank {} overflows the board",
                                rank + 1
                            ))
                        })?;
                        board.squares.insert(square, piece);
                        file += 1;
                    }
                }
            }
            if file != 8 {
                return Err(EngineError::InvalidPosition(format!(
                    "rank {} covers {file} files",
                    rank + 1
                )));
            }
        }
        Ok(board)
    }

    /// Renders the exact inverse of [`Board::from_position_string`].
    pub fn position_string(&self) -> String {
        let mut result = String::new();
        for rank in (0..8).rev() {
            let mut empty_run: u8 = 0;
            for file in 0..8 {
                let square = Square::from_file_rank(file, rank)
                    .expect("loop bounds keep the square on the board");
                match self.squares.get(&square) {
                    Some(piece) => {
                        if empty_run > 0 {
                            result.push(char::from(b'0' + empty_run));
                            empty_run = 0;
                        }
                        result.push(piece.fen_letter());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                result.push(char::from(b'0' + empty_run));
            }
            if rank > 0 {
                result.push('/');
            }
        }
        result
    }

    pub fn is_empty(&self, square: Square) -> bool {
        !self.squares.contains_key(&square)
    }

    /// The piece on `square`, or `None` for an empty square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares.get(&square).copied()
    }

    /// Places a piece with no rule checking, overwriting any occupant.
    pub fn place(&mut self, square: Square, piece: Piece) {
        self.squares.insert(square, piece);
    }

    /// Removes and returns the piece on `square`, if any.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.squares.remove(&square)
    }

    /// Squares holding a piece of the given kind and color.
    pub fn squares_of(&self, kind: PieceKind, color: Color) -> Vec<Square> {
        self.squares
            .iter()
            .filter(|(_, piece)| piece.kind == kind && piece.color == color)
            .map(|(square, _)| *square)
            .collect()
    }

    /// Squares holding any piece of the given color.
    pub fn squares_of_color(&self, color: Color) -> Vec<Square> {
        self.squares
            .iter()
            .filter(|(_, piece)| piece.color == color)
            .map(|(square, _)| *square)
            .collect()
    }

    /// The square of the given color's king.
    ///
    /// # Panics
    ///
    /// Panics when the board holds no king of that color. Exactly one king
    /// per color is a documented precondition the surrounding system must
    /// uphold; a board without one is a broken invariant, not a recoverable
    /// state.
    pub fn king_square(&self, color: Color) -> Square {
        self.squares_of(PieceKind::King, color)
            .first()
            .copied()
            .unwrap_or_else(|| panic!("no {color} king on the board"))
    }

    /// The en-passant target square, if the previous ply was a two-square
    /// pawn advance.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant_target(&mut self, square: Option<Square>) {
        self.en_passant = square;
    }

    /// Squares along the four diagonals out to the board edge, nearest first
    /// per direction, excluding `square` itself. Blocking is not considered
    /// here; reachability filters handle occupancy.
    pub fn diagonal_squares(&self, square: Square) -> Vec<Square> {
        Board::ray_squares(square, &Direction::DIAGONALS)
    }

    /// Squares along the rank and file out to the board edge, nearest first
    /// per direction, excluding `square` itself.
    pub fn rank_and_file_squares(&self, square: Square) -> Vec<Square> {
        Board::ray_squares(square, &Direction::STRAIGHTS)
    }

    fn ray_squares(square: Square, directions: &[Direction]) -> Vec<Square> {
        let mut result = Vec::new();
        for direction in directions {
            let mut current = square;
            loop {
                let next = current.next_square(*direction, 1);
                if next == current {
                    break;
                }
                result.push(next);
                current = next;
            }
        }
        result
    }

    /// Up to eight knight-jump destinations from `square`, filtered to the
    /// board bounds.
    pub fn knight_move_squares(&self, square: Square) -> Vec<Square> {
        const JUMPS: [(i8, i8); 8] = [
            (1, 2),
            (2, 1),
            (2, -1),
            (1, -2),
            (-1, -2),
            (-2, -1),
            (-2, 1),
            (-1, 2),
        ];
        JUMPS
            .iter()
            .filter_map(|(d_file, d_rank)| square.offset(*d_file, *d_rank))
            .collect()
    }

    /// Up to eight king-step neighbors of `square`, filtered to the board
    /// bounds.
    pub fn adjacent_squares(&self, square: Square) -> Vec<Square> {
        Direction::ALL
            .iter()
            .filter_map(|direction| {
                let next = square.next_square(*direction, 1);
                (next != square).then_some(next)
            })
            .collect()
    }

    /// Relocates a piece with no validation; callers must have validated
    /// first. Any occupant of `to` is captured by overwrite.
    pub fn move_piece(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.squares.remove(&from) {
            self.squares.insert(to, piece);
        }
    }

    /// Executes an en-passant capture: the capturing pawn moves from `from`
    /// to `to` and the enemy pawn that just advanced two squares is removed.
    ///
    /// The captured pawn stands on `from`'s rank (rank 5 when white
    /// captures, rank 4 when black captures) in `to`'s file; this holds for
    /// both capture directions.
    pub fn perform_en_passant_capture(&mut self, from: Square, to: Square) {
        let captured = Square::from_file_rank(to.file() as i8, from.rank() as i8)
            .expect("both inputs are on the board");
        self.squares.remove(&captured);
        self.move_piece(from, to);
    }

    /// Moves a pawn and rewrites its kind, preserving its color.
    pub fn promote(&mut self, from: Square, to: Square, new_kind: PieceKind) {
        self.move_piece(from, to);
        if let Some(piece) = self.squares.get_mut(&to) {
            piece.kind = new_kind;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(coordinate: &str) -> Square {
        Square::from_coordinate(coordinate).expect("test coordinate should parse")
    }

    #[test]
    fn standard_position_round_trips() {
        let board = Board::standard();
        assert_eq!(board.position_string(), STANDARD_POSITION);
        assert_eq!(
            Board::from_position_string(&board.position_string()).unwrap(),
            board
        );
        assert_eq!(board.squares_of_color(Color::White).len(), 16);
        assert_eq!(board.squares_of_color(Color::Black).len(), 16);
        assert_eq!(board.king_square(Color::White), sq("e1"));
        assert_eq!(board.king_square(Color::Black), sq("e8"));
    }

    #[test]
    fn sparse_position_round_trips() {
        let position = "1r4k1/7p/3p1bp1/p1pP4/P1P1prP1/1N2R2P/1P1N1PK1/8";
        let board = Board::from_position_string(position).unwrap();
        assert_eq!(board.position_string(), position);
    }

    #[test]
    fn rejects_malformed_position_strings() {
        for bad in [
            "8/8/8/8/8/8/8",          // seven ranks
            "9/8/8/8/8/8/8/8",        // rank overflow
            "x7/8/8/8/8/8/8/8",       // unknown letter
            "ppppppppp/8/8/8/8/8/8/8", // nine files
        ] {
            assert!(matches!(
                Board::from_position_string(bad),
                Err(EngineError::InvalidPosition(_))
            ));
        }
    }

    #[test]
    fn ray_and_offset_generators_stay_on_the_board() {
        let board = Board::new();
        // Corner: one diagonal of seven squares.
        assert_eq!(board.diagonal_squares(sq("a1")).len(), 7);
        assert_eq!(board.rank_and_file_squares(sq("a1")).len(), 14);
        assert_eq!(board.knight_move_squares(sq("a1")).len(), 2);
        assert_eq!(board.adjacent_squares(sq("a1")).len(), 3);
        // Center.
        assert_eq!(board.diagonal_squares(sq("e4")).len(), 13);
        assert_eq!(board.rank_and_file_squares(sq("e4")).len(), 14);
        assert_eq!(board.knight_move_squares(sq("e4")).len(), 8);
        assert_eq!(board.adjacent_squares(sq("e4")).len(), 8);
    }

    #[test]
    fn en_passant_capture_removes_the_right_pawn_both_directions() {
        // White pawn on e5 captures the black d-pawn that just played d7-d5.
        let mut board = Board::from_position_string("4k3/8/8/3pP3/8/8/8/4K3").unwrap();
        board.perform_en_passant_capture(sq("e5"), sq("d6"));
        assert!(board.is_empty(sq("d5")));
        assert!(board.is_empty(sq("e5")));
        assert_eq!(
            board.piece_at(sq("d6")),
            Some(Piece::new(PieceKind::Pawn, Color::White))
        );

        // Black pawn on d4 captures the white e-pawn that just played e2-e4.
        let mut board = Board::from_position_string("4k3/8/8/8/3pP3/8/8/4K3").unwrap();
        board.perform_en_passant_capture(sq("d4"), sq("e3"));
        assert!(board.is_empty(sq("e4")));
        assert!(board.is_empty(sq("d4")));
        assert_eq!(
            board.piece_at(sq("e3")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
    }

    #[test]
    fn promote_rewrites_kind_and_preserves_color() {
        let mut board = Board::from_position_string("8/P7/8/8/8/8/8/k6K").unwrap();
        board.promote(sq("a7"), sq("a8"), PieceKind::Queen);
        assert_eq!(
            board.piece_at(sq("a8")),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
        assert!(board.is_empty(sq("a7")));
    }

    #[test]
    #[should_panic(expected = "no white king on the board")]
    fn king_square_panics_on_a_kingless_board() {
        Board::new().king_square(Color::White);
    }
}
