use clap::{Parser, ValueEnum};
use dark_chess::terminal::{self, Viewer};
use dark_chess::{Color, Game, Perspective};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ViewArg {
    White,
    Black,
    Neutral,
    /// Show the board from the side to move
    Turn,
}

impl From<ViewArg> for Viewer {
    fn from(arg: ViewArg) -> Self {
        match arg {
            ViewArg::White => Viewer::Fixed(Perspective::White),
            ViewArg::Black => Viewer::Fixed(Perspective::Black),
            ViewArg::Neutral => Viewer::Fixed(Perspective::Neutral),
            ViewArg::Turn => Viewer::SideToMove,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play dark chess in the terminal", long_about = None)]
struct Args {
    /// Whose view of the board to print
    #[arg(long, value_enum, default_value_t = ViewArg::Turn)]
    perspective: ViewArg,

    /// Start from a FEN piece placement instead of the standard position
    #[arg(long)]
    fen: Option<String>,

    /// Give Black the first move (only with --fen)
    #[arg(long, requires = "fen")]
    black_to_move: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let game = match &args.fen {
        Some(fen) => {
            let turn = if args.black_to_move {
                Color::Black
            } else {
                Color::White
            };
            Game::from_board_fen(fen, turn)?
        }
        None => Game::new(),
    };

    log::info!("starting game, {:?} to move", game.current_turn());
    terminal::run_interactive_terminal(game, args.perspective.into())?;
    Ok(())
}
