//! Move legality for every piece kind.
//!
//! There is no check concept here: a move that leaves the mover's own king
//! capturable is still legal, since kings are won by capture.

use shakmaty::{Bitboard, Color, Piece, Role};

use crate::board::Board;
use crate::square::Square;

/// Decides whether `piece`, standing on `from`, may move to `to`.
///
/// The caller guarantees `piece` is the occupant of `from`. The destination
/// must be empty or hold an opposing piece; a friendly piece always blocks.
pub fn is_legal(board: &Board, piece: Piece, from: Square, to: Square) -> bool {
    if from == to || is_friendly_occupant(board, piece.color, to) {
        return false;
    }

    match piece.role {
        Role::Pawn => pawn_move(board, piece.color, from, to),
        Role::Knight => knight_move(from, to),
        Role::Bishop => diagonal_path_clear(board, from, to),
        Role::Rook => straight_path_clear(board, from, to),
        Role::Queen => {
            diagonal_path_clear(board, from, to) || straight_path_clear(board, from, to)
        }
        Role::King => king_move(from, to),
    }
}

/// True iff `square` holds a piece belonging to `side`.
pub fn is_friendly_occupant(board: &Board, side: Color, square: Square) -> bool {
    board.occupant_at(square).color() == Some(side)
}

/// True iff `square` holds a piece belonging to the opponent of `side`.
pub fn is_opposing_occupant(board: &Board, side: Color, square: Square) -> bool {
    board.occupant_at(square).color() == Some(side.other())
}

/// True iff `from` and `to` share a row or column and every square strictly
/// between them is empty.
pub fn straight_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = delta(from, to);
    if (d_row == 0) == (d_col == 0) {
        // Either the same square or neither row nor column is shared.
        return false;
    }
    path_clear(board, from, to, d_row.signum(), d_col.signum())
}

/// True iff `from` and `to` lie on a common diagonal and every square strictly
/// between them is empty.
pub fn diagonal_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = delta(from, to);
    if d_row == 0 || d_row.abs() != d_col.abs() {
        return false;
    }
    path_clear(board, from, to, d_row.signum(), d_col.signum())
}

/// Every square a piece on `from` could legally move to.
///
/// Empty if `from` is unoccupied.
pub fn legal_destinations(board: &Board, from: Square) -> Bitboard {
    let Some(piece) = board.piece_at(from) else {
        return Bitboard::EMPTY;
    };
    Square::all()
        .filter(|&to| is_legal(board, piece, from, to))
        .map(shakmaty::Square::from)
        .collect()
}

/// Opponent-occupied squares that `side` could capture on its next move.
pub fn capturable_by(board: &Board, side: Color) -> Bitboard {
    let attackers: Vec<(Square, Piece)> = board.pieces(side).collect();
    board
        .pieces(side.other())
        .map(|(target, _)| target)
        .filter(|&target| {
            attackers
                .iter()
                .any(|&(from, piece)| is_legal(board, piece, from, target))
        })
        .map(shakmaty::Square::from)
        .collect()
}

/// Row and column offsets from `from` to `to`.
#[inline]
fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.row() as i8 - from.row() as i8,
        to.col() as i8 - from.col() as i8,
    )
}

/// Walks from `from` towards `to` in unit steps, checking only the squares in between.
fn path_clear(board: &Board, from: Square, to: Square, step_row: i8, step_col: i8) -> bool {
    let mut current = from;
    loop {
        let Some(next) = current.offset(step_row, step_col) else {
            return false;
        };
        if next == to {
            return true;
        }
        if !board.occupant_at(next).is_empty() {
            return false;
        }
        current = next;
    }
}

/// Row delta of a single forward step. White moves toward row 0.
#[inline]
fn forward(side: Color) -> i8 {
    match side {
        Color::White => -1,
        Color::Black => 1,
    }
}

#[inline]
fn pawn_start_row(side: Color) -> u8 {
    match side {
        Color::White => 6,
        Color::Black => 1,
    }
}

fn pawn_move(board: &Board, side: Color, from: Square, to: Square) -> bool {
    let step = forward(side);
    let (d_row, d_col) = delta(from, to);
    let destination_empty = board.occupant_at(to).is_empty();

    match (d_row, d_col.abs()) {
        (r, 0) if r == step => destination_empty,
        (r, 0) if r == 2 * step => {
            from.row() == pawn_start_row(side)
                && destination_empty
                && from
                    .offset(step, 0)
                    .is_some_and(|between| board.occupant_at(between).is_empty())
        }
        // Diagonal steps are captures only.
        (r, 1) if r == step => is_opposing_occupant(board, side, to),
        _ => false,
    }
}

fn knight_move(from: Square, to: Square) -> bool {
    let (d_row, d_col) = delta(from, to);
    matches!((d_row.abs(), d_col.abs()), (2, 1) | (1, 2))
}

fn king_move(from: Square, to: Square) -> bool {
    let (d_row, d_col) = delta(from, to);
    d_row.abs() <= 1 && d_col.abs() <= 1 && (d_row, d_col) != (0, 0)
}
