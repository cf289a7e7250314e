//! Rules engine for dark chess: each player sees only their own pieces plus
//! the opponent pieces they could capture on their next move. A game is won
//! by capturing the opposing king; there is no check or checkmate.

pub mod board;
pub mod game;
pub mod rules;
pub mod square;
pub mod terminal;
pub mod view;

pub use board::{Board, Occupant, SetupError};
pub use game::{Accepted, Game, MoveError, Outcome, RejectReason};
pub use square::{Square, SquareParseError};
pub use view::{BoardView, Cell, Perspective, Symbols};

pub use shakmaty::{Color, Piece, Role};
