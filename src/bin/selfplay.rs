use clap::Parser;
use clickchess::{ClickOutcome, Game, Square};
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

/// Plays random clicks through the controller until enough moves are made.
#[derive(Parser, Debug)]
#[command(name = "selfplay")]
struct Args {
    /// Number of moves to play.
    #[arg(long, default_value_t = 60)]
    plies: u32,

    /// RNG seed; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = Game::new();
    let mut move_count = 0;
    let mut clicks = 0u64;

    while move_count < args.plies {
        let turn = game.turn();
        if game.board().pseudo_legal_moves(turn).is_empty() {
            eprintln!("{turn} has no moves left");
            break;
        }

        // Mostly click a candidate when one is selected; otherwise any square,
        // so misclicks exercise the ignore and deselect paths too.
        let aimed = if game.selected().is_some() && rng.gen_bool(0.8) {
            game.candidates().choose(&mut rng)
        } else {
            None
        };
        let Some(target) = aimed.or_else(|| Square::all().choose(&mut rng)) else {
            break;
        };

        clicks += 1;
        if let ClickOutcome::Moved { mv, captured } = game.handle_click(target) {
            move_count += 1;
            match captured {
                Some(piece) => println!("{move_count:>3}. {turn} {mv} x{}", piece.code()),
                None => println!("{move_count:>3}. {turn} {mv}"),
            }
        }
    }

    println!("{}", game.board());
    eprintln!("Played {move_count} moves in {clicks} clicks; {} to move", game.turn());
}
