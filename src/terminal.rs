use std::io::{self, BufRead, Write};

use crate::game::Game;
use crate::rules;
use crate::square::Square;
use crate::view::Perspective;

/// Whose view the terminal prints after each command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Fixed(Perspective),
    /// Follow the side to move, like two players sharing one screen.
    SideToMove,
}

impl Viewer {
    fn perspective(self, game: &Game) -> Perspective {
        match self {
            Viewer::Fixed(perspective) => perspective,
            Viewer::SideToMove => game.current_turn().into(),
        }
    }
}

/// Error type for terminal sessions.
#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("failed to access terminal: {0}")]
    Io(#[from] io::Error),
}

/// Runs a line-oriented session over stdin/stdout.
pub fn run_interactive_terminal(game: Game, viewer: Viewer) -> Result<(), TerminalError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(game, viewer, stdin.lock(), &mut stdout.lock())
}

/// Reads commands from `input` until EOF or `q`.
///
/// Commands:
/// - `e2 e4` or `e2e4` - move a piece
/// - `d e2` - list where the side to move's piece on a square can go
/// - `v white|black|neutral|turn` - switch the view
/// - `r` - restart from the standard position
/// - `q` - quit
pub fn run_session(
    mut game: Game,
    mut viewer: Viewer,
    input: impl BufRead,
    w: &mut impl Write,
) -> Result<(), TerminalError> {
    draw(w, &game, viewer)?;

    for line in input.lines() {
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [] => continue,
            ["q"] => break,
            ["r"] => {
                game = Game::new();
                writeln!(w, "Restarted")?;
            }
            ["d", square] => {
                report_destinations(w, &game, square)?;
                continue;
            }
            ["v", choice] => match parse_viewer(choice) {
                Some(v) => viewer = v,
                None => {
                    writeln!(w, "Unknown view '{choice}'")?;
                    continue;
                }
            },
            [from, to] => report_move(w, &mut game, from, to)?,
            [joined] if joined.len() == 4 && joined.is_char_boundary(2) => {
                let (from, to) = joined.split_at(2);
                report_move(w, &mut game, from, to)?;
            }
            _ => {
                writeln!(
                    w,
                    "Commands: <from> <to> | d <square> | v <white|black|neutral|turn> | r | q"
                )?;
                continue;
            }
        }

        draw(w, &game, viewer)?;
    }

    w.flush()?;
    Ok(())
}

fn report_move(w: &mut impl Write, game: &mut Game, from: &str, to: &str) -> io::Result<()> {
    match game.attempt_move(from, to) {
        Ok(accepted) => match accepted.captured {
            Some(captured) => writeln!(w, "{from}{to} captures {}", captured.char()),
            None => writeln!(w, "{from}{to}"),
        },
        Err(e) => writeln!(w, "Rejected: {e}"),
    }
}

/// Only the side to move may ask, so opponent pieces stay hidden.
fn report_destinations(w: &mut impl Write, game: &Game, square: &str) -> io::Result<()> {
    let from: Square = match square.parse() {
        Ok(from) => from,
        Err(e) => return writeln!(w, "Invalid square: {e}"),
    };
    let own = game
        .board()
        .piece_at(from)
        .filter(|piece| piece.color == game.current_turn());
    if own.is_none() || game.outcome().is_finished() {
        return writeln!(w, "No {:?} piece to move on {from}", game.current_turn());
    }

    let destinations: Vec<String> = rules::legal_destinations(game.board(), from)
        .into_iter()
        .map(|to| Square::from(to).to_string())
        .collect();
    if destinations.is_empty() {
        writeln!(w, "{from}: no moves")
    } else {
        writeln!(w, "{from}: {}", destinations.join(" "))
    }
}

fn parse_viewer(choice: &str) -> Option<Viewer> {
    match choice {
        "white" | "w" => Some(Viewer::Fixed(Perspective::White)),
        "black" | "b" => Some(Viewer::Fixed(Perspective::Black)),
        "neutral" | "n" => Some(Viewer::Fixed(Perspective::Neutral)),
        "turn" | "t" => Some(Viewer::SideToMove),
        _ => None,
    }
}

fn draw(w: &mut impl Write, game: &Game, viewer: Viewer) -> io::Result<()> {
    let perspective = viewer.perspective(game);
    writeln!(w)?;
    writeln!(w, "{}", game.render(perspective))?;

    let outcome = game.outcome();
    match outcome.winner() {
        Some(winner) => writeln!(w, "Game over: {winner:?} won")?,
        None => writeln!(w, "{:?} to move ({perspective:?} view)", game.current_turn())?,
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(game: Game, viewer: Viewer, script: &str) -> String {
        let mut buf = Vec::new();
        run_session(game, viewer, script.as_bytes(), &mut buf)
            .expect("session over in-memory buffers should succeed");
        String::from_utf8(buf).expect("output should be valid UTF-8")
    }

    #[test]
    fn test_moves_in_both_notations() {
        let output = session(Game::new(), Viewer::Fixed(Perspective::Neutral), "e2 e4\ne7e5\n");

        assert!(output.contains("e2e4\n"));
        assert!(output.contains("e7e5\n"));
        assert!(output.contains("4  . . . . P . . ."));
        assert!(output.contains("5  . . . . p . . ."));
    }

    #[test]
    fn test_rejection_reported() {
        let output = session(Game::new(), Viewer::SideToMove, "e2 e5\n");
        assert!(output.contains("Rejected: White Pawn cannot move from e2 to e5"));
        assert!(output.contains("White to move"));
    }

    #[test]
    fn test_side_to_move_view_switches() {
        let output = session(Game::new(), Viewer::SideToMove, "e2 e4\n");
        let last_board = output.rsplit("\n\n").next().expect("at least one board");

        assert!(last_board.contains("8  r n b q k b n r"));
        assert!(last_board.contains("1  * * * * * * * *"));
        assert!(last_board.contains("Black to move (Black view)"));
    }

    #[test]
    fn test_view_command_and_quit() {
        let output = session(Game::new(), Viewer::SideToMove, "v neutral\nq\ne2 e4\n");
        assert!(output.contains("(Neutral view)"));
        assert!(!output.contains("e2e4"));
    }

    #[test]
    fn test_destinations_listed_for_side_to_move() {
        let output = session(Game::new(), Viewer::SideToMove, "d g1\nd e1\nd e7\nd e4\nd k2\n");

        assert!(output.contains("g1: "));
        let knight = output
            .lines()
            .find(|line| line.starts_with("g1: "))
            .expect("knight destinations listed");
        let mut squares: Vec<&str> = knight["g1: ".len()..].split(' ').collect();
        squares.sort_unstable();
        assert_eq!(squares, ["f3", "h3"]);

        assert!(output.contains("e1: no moves"));
        assert!(output.contains("No White piece to move on e7"));
        assert!(output.contains("No White piece to move on e4"));
        assert!(output.contains("Invalid square: "));
    }

    #[test]
    fn test_game_over_reported() {
        let game = Game::from_board_fen("4k2R/8/8/8/8/8/8/4K3", shakmaty::Color::White)
            .expect("valid placement");
        let output = session(game, Viewer::Fixed(Perspective::White), "h8 e8\n");
        assert!(output.contains("h8e8 captures k"));
        assert!(output.contains("Game over: White won"));
    }
}
