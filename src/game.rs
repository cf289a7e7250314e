use shakmaty::{Color, Piece, Role};
use thiserror::Error;

use crate::board::{Board, Occupant, SetupError};
use crate::rules;
use crate::square::{Square, SquareParseError};
use crate::view::{self, BoardView, Perspective};

/// Game result, derived from which kings are still on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Unfinished,
    WhiteWon,
    BlackWon,
}

impl Outcome {
    #[inline]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Outcome::Unfinished)
    }

    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Unfinished => None,
            Outcome::WhiteWon => Some(Color::White),
            Outcome::BlackWon => Some(Color::Black),
        }
    }
}

/// Category of a rejected move, without the details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    GameOver,
    InvalidSquare,
    NoPieceAtOrigin,
    WrongSideToMove,
    IllegalMove,
}

/// Why a move was rejected. A rejected move never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("invalid square: {0}")]
    InvalidSquare(#[from] SquareParseError),
    #[error("no piece on {0}")]
    NoPieceAtOrigin(Square),
    #[error("it is {expected:?}'s turn, but the piece on {square} is {found:?}")]
    WrongSideToMove {
        square: Square,
        expected: Color,
        found: Color,
    },
    #[error("{:?} {:?} cannot move from {} to {}", .piece.color, .piece.role, .from, .to)]
    IllegalMove { piece: Piece, from: Square, to: Square },
}

impl MoveError {
    pub const fn kind(&self) -> RejectReason {
        match self {
            MoveError::GameOver => RejectReason::GameOver,
            MoveError::InvalidSquare(_) => RejectReason::InvalidSquare,
            MoveError::NoPieceAtOrigin(_) => RejectReason::NoPieceAtOrigin,
            MoveError::WrongSideToMove { .. } => RejectReason::WrongSideToMove,
            MoveError::IllegalMove { .. } => RejectReason::IllegalMove,
        }
    }
}

/// An accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Accepted {
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
}

/// One game of dark chess.
///
/// Owns its board exclusively; independent games share nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Game {
    board: Board,
}

impl Game {
    /// Standard starting position, White to move.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing board.
    pub fn from_board(board: Board) -> Self {
        Self { board }
    }

    /// Starts from a FEN piece placement, e.g. `"4k3/8/8/3p4/4P3/8/8/4K3"`.
    pub fn from_board_fen(board_fen: &str, turn: Color) -> Result<Self, SetupError> {
        Board::from_board_fen(board_fen, turn).map(Self::from_board)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to move. Meaningless once the game is over.
    #[inline]
    pub fn current_turn(&self) -> Color {
        self.board.current_turn()
    }

    /// Piece on the named square, `Ok(None)` when empty.
    pub fn piece_at(&self, square: &str) -> Result<Option<Piece>, SquareParseError> {
        Ok(self.board.piece_at(square.parse()?))
    }

    /// Current result. A side wins once the opposing king has been captured.
    pub fn outcome(&self) -> Outcome {
        match (
            self.board.has_king(Color::White),
            self.board.has_king(Color::Black),
        ) {
            (true, false) => Outcome::WhiteWon,
            (false, true) => Outcome::BlackWon,
            // Both kings gone cannot happen through play; never report it as a win.
            (true, true) | (false, false) => Outcome::Unfinished,
        }
    }

    /// The board as `perspective` is allowed to see it.
    pub fn render(&self, perspective: Perspective) -> BoardView {
        view::render(&self.board, perspective)
    }

    /// Tries to move the piece on `from` to `to`, both in algebraic notation.
    ///
    /// Checks run in a fixed order and stop at the first failure:
    /// game over, square syntax, empty origin, side to move, piece rules.
    /// On success the destination occupant (if any) is captured and the turn passes.
    pub fn attempt_move(&mut self, from: &str, to: &str) -> Result<Accepted, MoveError> {
        let result = self.try_move(from, to);
        match &result {
            Ok(accepted) => log::debug!(
                "{:?} {} -> {} accepted, captured {:?}",
                accepted.piece,
                accepted.from,
                accepted.to,
                accepted.captured
            ),
            Err(e) => log::trace!("move {from:?} -> {to:?} rejected: {e}"),
        }
        result
    }

    fn try_move(&mut self, from: &str, to: &str) -> Result<Accepted, MoveError> {
        if self.outcome().is_finished() {
            return Err(MoveError::GameOver);
        }

        let from: Square = from.parse()?;
        let to: Square = to.parse()?;

        let Occupant::Piece(piece) = self.board.occupant_at(from) else {
            return Err(MoveError::NoPieceAtOrigin(from));
        };

        let expected = self.board.current_turn();
        if piece.color != expected {
            return Err(MoveError::WrongSideToMove {
                square: from,
                expected,
                found: piece.color,
            });
        }

        if !rules::is_legal(&self.board, piece, from, to) {
            return Err(MoveError::IllegalMove { piece, from, to });
        }

        let captured = self.board.relocate(from, to).piece();
        self.board.advance_turn();

        if captured.is_some_and(|p| p.role == Role::King) {
            log::debug!("{:?} king captured on {to}: {:?}", piece.color.other(), self.outcome());
        }

        Ok(Accepted {
            piece,
            from,
            to,
            captured,
        })
    }
}
