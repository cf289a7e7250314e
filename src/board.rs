use std::fmt;

use shakmaty::{Color, Piece, Role};
use thiserror::Error;

use crate::square::Square;

/// Back rank arrangement from file a to file h.
const BACK_RANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// Contents of a single square. Every square always holds one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Piece(Piece),
}

impl Occupant {
    #[inline]
    pub const fn is_empty(self) -> bool {
        matches!(self, Occupant::Empty)
    }

    #[inline]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Occupant::Piece(piece) => Some(piece),
            Occupant::Empty => None,
        }
    }

    /// Side owning the occupant, `None` when empty.
    #[inline]
    pub fn color(self) -> Option<Color> {
        self.piece().map(|piece| piece.color)
    }
}

impl From<Piece> for Occupant {
    fn from(piece: Piece) -> Self {
        Occupant::Piece(piece)
    }
}

impl From<Option<Piece>> for Occupant {
    fn from(piece: Option<Piece>) -> Self {
        piece.map_or(Occupant::Empty, Occupant::Piece)
    }
}

/// Error when building a board from a custom placement.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid board FEN: {0}")]
    Fen(#[from] shakmaty::fen::ParseFenError),
    #[error("{color:?} may have at most one king, found {count}")]
    KingCount { color: Color, count: usize },
}

/// The 8×8 grid of occupants plus the side to move.
///
/// A passive store: it performs no validation of the moves applied to it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Occupant; 8]; 8],
    turn: Color,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard chess starting arrangement with White to move.
    pub fn new() -> Self {
        let mut board = Self::empty(Color::White);
        for (col, role) in BACK_RANK.into_iter().enumerate() {
            board.squares[0][col] = Occupant::Piece(Piece { color: Color::Black, role });
            board.squares[1][col] = Occupant::Piece(Color::Black.pawn());
            board.squares[6][col] = Occupant::Piece(Color::White.pawn());
            board.squares[7][col] = Occupant::Piece(Piece { color: Color::White, role });
        }
        board
    }

    /// A board with no pieces at all.
    pub fn empty(turn: Color) -> Self {
        Self {
            squares: [[Occupant::Empty; 8]; 8],
            turn,
        }
    }

    /// Builds a board from the piece placement field of a FEN string,
    /// e.g. `"4k3/8/8/3p4/4P3/8/8/4K3"`.
    ///
    /// Each side may have at most one king. A side without a king has already lost.
    pub fn from_board_fen(board_fen: &str, turn: Color) -> Result<Self, SetupError> {
        let placement: shakmaty::Board = board_fen.parse()?;

        let mut board = Self::empty(turn);
        for square in Square::all() {
            board.place(square, placement.piece_at(square.into()).into());
        }

        for color in Color::ALL {
            let count = board.pieces(color).filter(|(_, p)| p.role == Role::King).count();
            if count > 1 {
                return Err(SetupError::KingCount { color, count });
            }
        }

        Ok(board)
    }

    #[inline]
    pub fn occupant_at(&self, square: Square) -> Occupant {
        self.squares[square.row() as usize][square.col() as usize]
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.occupant_at(square).piece()
    }

    #[inline]
    pub(crate) fn place(&mut self, square: Square, occupant: Occupant) {
        self.squares[square.row() as usize][square.col() as usize] = occupant;
    }

    /// Clears `from` and puts its occupant on `to`, returning whatever `to` held before.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Occupant {
        let moving = self.occupant_at(from);
        let captured = self.occupant_at(to);
        self.place(from, Occupant::Empty);
        self.place(to, moving);
        captured
    }

    #[inline]
    pub fn current_turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub(crate) fn advance_turn(&mut self) {
        self.turn = self.turn.other();
    }

    /// All pieces belonging to `color`, with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.piece_at(square)
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }

    /// Whether `color` still has its king on the board.
    pub fn has_king(&self, color: Color) -> bool {
        self.pieces(color).any(|(_, piece)| piece.role == Role::King)
    }

    /// The position turned around: rotated by 180° with every piece and the
    /// side to move handed to the other color.
    pub fn rotate180(&self) -> Board {
        let mut rotated = Self::empty(self.turn.other());
        for square in Square::all() {
            let occupant = match self.occupant_at(square) {
                Occupant::Empty => Occupant::Empty,
                Occupant::Piece(piece) => Occupant::Piece(Piece {
                    color: piece.color.other(),
                    role: piece.role,
                }),
            };
            rotated.place(square.rotate180(), occupant);
        }
        rotated
    }

    /// Piece placement in FEN notation, rank 8 first.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(71);
        for (row, squares) in self.squares.iter().enumerate() {
            if row > 0 {
                fen.push('/');
            }
            let mut empty_run = 0u8;
            for occupant in squares {
                match occupant {
                    Occupant::Empty => empty_run += 1,
                    Occupant::Piece(piece) => {
                        if empty_run > 0 {
                            fen.push((b'0' + empty_run) as char);
                            empty_run = 0;
                        }
                        fen.push(piece.char());
                    }
                }
            }
            if empty_run > 0 {
                fen.push((b'0' + empty_run) as char);
            }
        }
        fen
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("placement", &self.board_fen())
            .field("turn", &self.turn)
            .finish()
    }
}

/// Plain board dump with rank and file labels, rank 8 on top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.squares.iter().enumerate() {
            write!(f, "{} ", 8 - row)?;
            for occupant in squares {
                let symbol = occupant.piece().map_or('.', Piece::char);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().expect("test square is valid")
    }

    #[test]
    fn test_standard_setup() {
        let board = Board::new();

        assert_eq!(board.current_turn(), Color::White);
        assert_eq!(board.piece_at(sq("e1")), Some(Color::White.king()));
        assert_eq!(board.piece_at(sq("d1")), Some(Color::White.queen()));
        assert_eq!(board.piece_at(sq("e8")), Some(Color::Black.king()));
        assert_eq!(board.piece_at(sq("d8")), Some(Color::Black.queen()));
        assert_eq!(board.piece_at(sq("a2")), Some(Color::White.pawn()));
        assert_eq!(board.piece_at(sq("h7")), Some(Color::Black.pawn()));
        assert_eq!(board.occupant_at(sq("e4")), Occupant::Empty);

        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
        assert_eq!(
            board.board_fen(),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
        );
    }

    #[test]
    fn test_relocate_captures() {
        let mut board = Board::new();

        let captured = board.relocate(sq("a1"), sq("a8"));

        assert_eq!(captured, Occupant::Piece(Color::Black.rook()));
        assert_eq!(board.occupant_at(sq("a1")), Occupant::Empty);
        assert_eq!(board.piece_at(sq("a8")), Some(Color::White.rook()));
        assert_eq!(board.pieces(Color::Black).count(), 15);
    }

    #[test]
    fn test_advance_turn_flips() {
        let mut board = Board::new();
        board.advance_turn();
        assert_eq!(board.current_turn(), Color::Black);
        board.advance_turn();
        assert_eq!(board.current_turn(), Color::White);
    }

    #[test]
    fn test_has_king() {
        let mut board = Board::new();
        assert!(board.has_king(Color::Black));

        board.place(sq("e8"), Occupant::Empty);
        assert!(!board.has_king(Color::Black));
        assert!(board.has_king(Color::White));
    }

    #[test]
    fn test_rotate180_of_start_is_start() {
        let board = Board::new();
        let rotated = board.rotate180();

        // Kings and queens trade files under rotation.
        assert_eq!(rotated.current_turn(), Color::Black);
        assert_eq!(rotated.piece_at(sq("d1")), Some(Color::White.king()));
        assert_eq!(rotated.piece_at(sq("e1")), Some(Color::White.queen()));
        assert_eq!(rotated.piece_at(sq("a2")), Some(Color::White.pawn()));
        assert_eq!(rotated.rotate180(), board);
    }

    #[test]
    fn test_from_board_fen() {
        let board = Board::from_board_fen("4k3/8/8/3p4/4P3/8/8/4K3", Color::Black)
            .expect("valid placement");

        assert_eq!(board.current_turn(), Color::Black);
        assert_eq!(board.piece_at(sq("d5")), Some(Color::Black.pawn()));
        assert_eq!(board.piece_at(sq("e4")), Some(Color::White.pawn()));
        assert_eq!(board.board_fen(), "4k3/8/8/3p4/4P3/8/8/4K3");
    }

    #[test]
    fn test_from_board_fen_accepts_missing_king() {
        let board = Board::from_board_fen("8/8/8/8/8/8/8/4K3", Color::White)
            .expect("a side without a king is a decided position");
        assert!(board.has_king(Color::White));
        assert!(!board.has_king(Color::Black));
    }

    #[test]
    fn test_from_board_fen_rejects_two_kings() {
        let result = Board::from_board_fen("k6k/8/8/8/8/8/8/4K3", Color::White);
        assert!(matches!(
            result,
            Err(SetupError::KingCount {
                color: Color::Black,
                count: 2
            })
        ));
    }

    #[test]
    fn test_from_board_fen_rejects_garbage() {
        let result = Board::from_board_fen("not a board", Color::White);
        assert!(matches!(result, Err(SetupError::Fen(_))));
    }

    #[test]
    fn test_display_labels() {
        let text = Board::new().to_string();
        let first = text.lines().next().expect("at least one line");
        assert_eq!(first, "8  r n b q k b n r");
        assert!(text.ends_with("a b c d e f g h"));
    }
}
