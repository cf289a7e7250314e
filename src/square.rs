use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A square on the 8×8 board, stored as a (row, column) pair.
///
/// Rows follow the printed board top to bottom:
/// - row 0 = rank 8 (Black's home rank)
/// - row 7 = rank 1 (White's home rank)
///
/// Column 0 is file `a`, column 7 is file `h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a square if both indices are in `0..8`.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the file ('a'-'h') of this square.
    pub fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Returns the rank (1-8) of this square.
    pub fn rank(self) -> u8 {
        8 - self.row
    }

    /// All 64 squares, row by row starting at a8.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square { row, col }))
    }

    /// Square reached by stepping `d_row` rows and `d_col` columns, if still on the board.
    pub fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = u8::try_from(self.row as i8 + d_row).ok()?;
        let col = u8::try_from(self.col as i8 + d_col).ok()?;
        Square::new(row, col)
    }

    /// The same square seen from the other side of the board.
    pub const fn rotate180(self) -> Square {
        Square {
            row: 7 - self.row,
            col: 7 - self.col,
        }
    }
}

/// Parse algebraic notation like "e4" into a Square.
///
/// Only lowercase files are accepted.
///
/// # Examples
/// ```
/// # use dark_chess::Square;
/// let square: Square = "e2".parse().unwrap();
/// assert_eq!((square.row(), square.col()), (6, 4));
/// ```
impl FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let &[file, rank] = s.as_bytes() else {
            return Err(SquareParseError::WrongLength);
        };

        if !(b'a'..=b'h').contains(&file) {
            return Err(SquareParseError::BadFile);
        }
        if !(b'1'..=b'8').contains(&rank) {
            return Err(SquareParseError::BadRank);
        }

        Ok(Square {
            row: b'8' - rank,
            col: file - b'a',
        })
    }
}

/// Display square in algebraic notation (e.g., "e4").
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl From<Square> for shakmaty::Square {
    fn from(square: Square) -> Self {
        shakmaty::Square::from_coords(
            shakmaty::File::new(u32::from(square.col)),
            shakmaty::Rank::new(u32::from(7 - square.row)),
        )
    }
}

impl From<shakmaty::Square> for Square {
    fn from(square: shakmaty::Square) -> Self {
        let col = u8::from(square.file());
        let rank = u8::from(square.rank());
        Square { row: 7 - rank, col }
    }
}

/// Error type for parsing square notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SquareParseError {
    /// Square notation must be exactly 2 characters
    #[error("square must be 2 characters (e.g., 'e4')")]
    WrongLength,
    /// File must be a letter from a-h
    #[error("file must be a-h")]
    BadFile,
    /// Rank must be a digit from 1-8
    #[error("rank must be 1-8")]
    BadRank,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("a8", 0, 0)]
    #[test_case("h8", 0, 7)]
    #[test_case("a1", 7, 0)]
    #[test_case("h1", 7, 7)]
    #[test_case("e2", 6, 4)]
    #[test_case("d5", 3, 3)]
    fn test_square_from_str(text: &str, row: u8, col: u8) {
        let square: Square = text.parse().expect("valid square");
        assert_eq!((square.row(), square.col()), (row, col));
    }

    #[test_case("", SquareParseError::WrongLength; "empty")]
    #[test_case("a", SquareParseError::WrongLength; "too short")]
    #[test_case("abc", SquareParseError::WrongLength; "too long")]
    #[test_case("e22", SquareParseError::WrongLength; "three chars")]
    #[test_case("i1", SquareParseError::BadFile; "file past h")]
    #[test_case("E2", SquareParseError::BadFile; "uppercase file")]
    #[test_case("a9", SquareParseError::BadRank; "rank past 8")]
    #[test_case("a0", SquareParseError::BadRank; "rank zero")]
    #[test_case("aa", SquareParseError::BadRank; "letter rank")]
    #[test_case("é", SquareParseError::BadFile; "two byte char")]
    fn test_square_from_str_invalid(text: &str, expected: SquareParseError) {
        assert_eq!(text.parse::<Square>(), Err(expected));
    }

    #[test]
    fn test_square_new_bounds() {
        assert!(Square::new(0, 0).is_some());
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }

    #[test]
    fn test_square_roundtrip() {
        for square in Square::all() {
            let parsed: Square = square.to_string().parse().expect("displayed square parses");
            assert_eq!(square, parsed);
        }
        assert_eq!(Square::all().count(), 64);
    }

    #[test]
    fn test_square_offset() {
        let e2: Square = "e2".parse().unwrap();
        assert_eq!(e2.offset(-2, 0), "e4".parse().ok());
        assert_eq!(e2.offset(1, 1), "f1".parse().ok());
        assert_eq!(e2.offset(2, 0), None);
        assert_eq!(e2.offset(0, 4), None);
    }

    #[test]
    fn test_rotate180() {
        let a1: Square = "a1".parse().unwrap();
        assert_eq!(a1.rotate180(), "h8".parse().unwrap());
        for square in Square::all() {
            assert_eq!(square.rotate180().rotate180(), square);
        }
    }

    #[test]
    fn test_shakmaty_conversion() {
        assert_eq!(
            shakmaty::Square::from("e2".parse::<Square>().unwrap()),
            shakmaty::Square::E2
        );
        assert_eq!(Square::from(shakmaty::Square::A8), Square::new(0, 0).unwrap());
        for square in Square::all() {
            assert_eq!(Square::from(shakmaty::Square::from(square)), square);
        }
    }
}
