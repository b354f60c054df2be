//! Board squares and coordinate arithmetic.
//!
//! A [`Square`] identifies one of the 64 board positions and converts between
//! the human coordinate form (`"e4"`) and the linear index `0..=63` used
//! internally (`a1 == 0`, `h1 == 7`, `h8 == 63`). Offset arithmetic carries
//! explicit edge detection so that stepping "right" from the h-file can never
//! wrap onto the next rank's a-file.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;

/// The eight directions a piece can travel, from the mover's point of view
/// with white at the bottom. In index terms these are the classic offsets
/// up/down ±8, left/right ±1 and the diagonals ±7/±9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All eight directions, used by ray and king-step generators.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// The four diagonal directions.
    pub const DIAGONALS: [Direction; 4] = [
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// The four rank-and-file directions.
    pub const STRAIGHTS: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Per-step (file, rank) delta.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, 1),
            Direction::UpRight => (1, 1),
            Direction::DownLeft => (-1, -1),
            Direction::DownRight => (1, -1),
        }
    }
}

/// One of the 64 board positions.
///
/// Stored as zero-based file and rank; constructors enforce the bounds, so a
/// `Square` value is always on the board. Equality and ordering are by
/// coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Builds a square from zero-based file and rank indices.
    ///
    /// Returns `None` when either index falls outside `0..=7`; callers doing
    /// offset arithmetic use this as their off-board test.
    pub fn from_file_rank(file: i8, rank: i8) -> Option<Square> {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square {
                file: file as u8,
                rank: rank as u8,
            })
        } else {
            None
        }
    }

    /// Parses a coordinate such as `"e4"`.
    ///
    /// The string must be exactly two characters, file `a..=h` then rank
    /// `1..=8`, otherwise `InvalidCoordinate` is returned.
    pub fn from_coordinate(coordinate: &str) -> Result<Square, EngineError> {
        let bytes = coordinate.as_bytes();
        if bytes.len() != 2 {
            return Err(EngineError::InvalidCoordinate(coordinate.to_owned()));
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(EngineError::InvalidCoordinate(coordinate.to_owned()));
        }
        Ok(Square {
            file: file - b'a',
            rank: rank - b'1',
        })
    }

    /// Builds a square from its linear index `0..=63`.
    pub fn from_index(index: u8) -> Result<Square, EngineError> {
        if index > 63 {
            return Err(EngineError::InvalidCoordinate(format!(
                "square index out of bounds: {index}"
            )));
        }
        Ok(Square {
            file: index % 8,
            rank: index / 8,
        })
    }

    /// Zero-based file index (`a == 0`).
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Zero-based rank index (rank 1 == 0).
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Linear index `0..=63`.
    pub fn index(&self) -> u8 {
        self.rank * 8 + self.file
    }

    /// Renders the coordinate form, for example `"e4"`.
    pub fn coordinate(&self) -> String {
        let file_char = char::from(b'a' + self.file);
        let rank_char = char::from(b'1' + self.rank);
        format!("{file_char}{rank_char}")
    }

    /// Offsets this square by a (file, rank) delta, `None` when off-board.
    pub fn offset(&self, d_file: i8, d_rank: i8) -> Option<Square> {
        Square::from_file_rank(self.file as i8 + d_file, self.rank as i8 + d_rank)
    }

    /// Moves up to `steps` squares in `direction`, clamping at the board
    /// edge.
    ///
    /// Returns the furthest reachable square; when zero steps are possible
    /// this is the square itself. The clamp is deliberate saturating
    /// behavior, not an error, so ray generators can walk toward an edge
    /// without bounds bookkeeping.
    pub fn next_square(&self, direction: Direction, steps: u8) -> Square {
        let (d_file, d_rank) = direction.delta();
        let room_file = match d_file {
            1 => 7 - self.file,
            -1 => self.file,
            _ => 7,
        };
        let room_rank = match d_rank {
            1 => 7 - self.rank,
            -1 => self.rank,
            _ => 7,
        };
        let possible = steps.min(room_file).min(room_rank);
        Square {
            file: (self.file as i8 + d_file * possible as i8) as u8,
            rank: (self.rank as i8 + d_rank * possible as i8) as u8,
        }
    }

    /// Chebyshev distance, the number of king steps between two squares.
    pub fn king_distance(&self, other: &Square) -> u8 {
        let d_file = self.file.abs_diff(other.file);
        let d_rank = self.rank.abs_diff(other.rank);
        d_file.max(d_rank)
    }
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.coordinate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_round_trip_all_squares() {
        for index in 0u8..64 {
            let square = Square::from_index(index).expect("index should be valid");
            assert_eq!(square.index(), index);
            let parsed = Square::from_coordinate(&square.coordinate())
                .expect("coordinate should parse back");
            assert_eq!(parsed, square);
        }
    }

    #[test]
    fn rejects_malformed_coordinates() {
        for bad in ["", "e", "e44", "i4", "e9", "4e", "  "] {
            assert!(matches!(
                Square::from_coordinate(bad),
                Err(EngineError::InvalidCoordinate(_))
            ));
        }
        assert!(Square::from_index(64).is_err());
    }

    #[test]
    fn index_layout_matches_rank_major_order() {
        assert_eq!(Square::from_coordinate("a1").unwrap().index(), 0);
        assert_eq!(Square::from_coordinate("h1").unwrap().index(), 7);
        assert_eq!(Square::from_coordinate("e4").unwrap().index(), 28);
        assert_eq!(Square::from_coordinate("h8").unwrap().index(), 63);
    }

    #[test]
    fn next_square_clamps_at_edges_without_wrapping() {
        let h4 = Square::from_coordinate("h4").unwrap();
        // Moving right from the h-file saturates in place instead of
        // wrapping to the a-file of the next rank.
        assert_eq!(h4.next_square(Direction::Right, 1), h4);
        assert_eq!(h4.next_square(Direction::Right, 5), h4);

        let a1 = Square::from_coordinate("a1").unwrap();
        assert_eq!(a1.next_square(Direction::DownLeft, 3), a1);
        assert_eq!(
            a1.next_square(Direction::UpRight, 10).coordinate(),
            "h8"
        );

        let e4 = Square::from_coordinate("e4").unwrap();
        assert_eq!(e4.next_square(Direction::Up, 2).coordinate(), "e6");
        assert_eq!(e4.next_square(Direction::Left, 9).coordinate(), "a4");
    }
}
