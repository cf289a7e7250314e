use std::fmt;

use shakmaty::{Color, Piece};

use crate::board::{Board, Occupant};
use crate::rules;
use crate::square::Square;

/// Who is looking at the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perspective {
    White,
    Black,
    /// Spectator view: every piece is shown.
    Neutral,
}

impl Perspective {
    /// The side whose pieces are always visible, `None` for a neutral observer.
    pub const fn side(self) -> Option<Color> {
        match self {
            Perspective::White => Some(Color::White),
            Perspective::Black => Some(Color::Black),
            Perspective::Neutral => None,
        }
    }
}

impl From<Color> for Perspective {
    fn from(color: Color) -> Self {
        match color {
            Color::White => Perspective::White,
            Color::Black => Perspective::Black,
        }
    }
}

/// What an observer sees on a single square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    /// An opponent piece the observer cannot currently capture.
    Hidden,
    Piece(Piece),
}

/// Display alphabet for a [`BoardView`].
///
/// Pieces always use FEN letters: uppercase for White, lowercase for Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbols {
    pub empty: char,
    pub hidden: char,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            empty: ' ',
            hidden: '*',
        }
    }
}

impl Symbols {
    pub fn cell(&self, cell: Cell) -> char {
        match cell {
            Cell::Empty => self.empty,
            Cell::Hidden => self.hidden,
            Cell::Piece(piece) => piece.char(),
        }
    }
}

/// The board as seen by one observer, rank 8 in row 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardView {
    perspective: Perspective,
    cells: [[Cell; 8]; 8],
}

impl BoardView {
    #[inline]
    pub fn perspective(&self) -> Perspective {
        self.perspective
    }

    #[inline]
    pub fn cell(&self, square: Square) -> Cell {
        self.cells[square.row() as usize][square.col() as usize]
    }

    /// Rows of cells, rank 8 first.
    pub fn rows(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }

    /// Symbol grid using the default alphabet.
    pub fn to_chars(&self) -> [[char; 8]; 8] {
        self.to_chars_with(&Symbols::default())
    }

    pub fn to_chars_with(&self, symbols: &Symbols) -> [[char; 8]; 8] {
        self.cells.map(|row| row.map(|cell| symbols.cell(cell)))
    }
}

/// Draws the view with rank and file labels. Empty squares show as `.` so the
/// grid stays readable in a terminal.
impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols = Symbols {
            empty: '.',
            ..Symbols::default()
        };
        for (row, chars) in self.to_chars_with(&symbols).iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for symbol in chars {
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

/// Projects the board into what `perspective` is allowed to see.
///
/// Opponent pieces stay hidden unless the observer could capture them on
/// its next move. Empty squares always render as empty.
pub fn render(board: &Board, perspective: Perspective) -> BoardView {
    let revealed = perspective
        .side()
        .map(|side| (side, rules::capturable_by(board, side)));

    let mut cells = [[Cell::Empty; 8]; 8];
    for square in Square::all() {
        let cell = match (board.occupant_at(square), revealed) {
            (Occupant::Empty, _) => Cell::Empty,
            (Occupant::Piece(piece), None) => Cell::Piece(piece),
            (Occupant::Piece(piece), Some((side, capturable))) => {
                if piece.color == side || capturable.contains(square.into()) {
                    Cell::Piece(piece)
                } else {
                    Cell::Hidden
                }
            }
        };
        cells[square.row() as usize][square.col() as usize] = cell;
    }

    BoardView { perspective, cells }
}
