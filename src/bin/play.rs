use std::io::{self, BufRead, Write};

use clap::Parser;
use clickchess::{ClickOutcome, Game, GameConfig};

/// Terminal board: type square names (e.g. `e2 e4`) to click them.
#[derive(Parser, Debug)]
#[command(
    name = "play",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_TIMESTAMP"), ")")
)]
struct Args {
    /// Print a JSON snapshot after each click instead of the text board.
    #[arg(long)]
    json: bool,

    /// Clicking another of your pieces while one is selected selects it.
    #[arg(long)]
    reselect: bool,
}

fn describe(outcome: ClickOutcome) -> String {
    match outcome {
        ClickOutcome::Ignored => "ignored".to_string(),
        ClickOutcome::Selected => "selected".to_string(),
        ClickOutcome::Deselected => "deselected".to_string(),
        ClickOutcome::Moved { mv, captured: None } => format!("moved {mv}"),
        ClickOutcome::Moved {
            mv,
            captured: Some(piece),
        } => format!("moved {mv}, captured {}", piece.code()),
    }
}

fn render(game: &Game, json: bool, out: &mut impl Write) -> io::Result<()> {
    if json {
        let text = game.snapshot().to_json().map_err(io::Error::other)?;
        return writeln!(out, "{text}");
    }

    writeln!(out, "{}", game.board())?;
    let candidates: Vec<String> = game.candidates().map(|sq| sq.to_string()).collect();
    match game.selected() {
        Some(sq) => writeln!(out, "{} to move, {sq} selected -> [{}]", game.turn(), candidates.join(" ")),
        None => writeln!(out, "{} to move", game.turn()),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let mut game = Game::new().with_config(GameConfig {
        reselect_own_piece: args.reselect,
    });

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&game, args.json, &mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        for token in line.split_whitespace() {
            match game.handle_square_str(token) {
                Ok(outcome) => {
                    eprintln!("{token}: {}", describe(outcome));
                    render(&game, args.json, &mut out)?;
                }
                Err(err) => eprintln!("skipping {token}: {err}"),
            }
        }
        out.flush()?;
    }

    Ok(())
}
