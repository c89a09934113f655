//! Gobang engine CLI
//!
//! Plays one engine-vs-engine game and prints the final board.
//!
//! ```text
//! gobang [CONFIG.toml]
//! ```
//!
//! Without an argument `Gobang.toml` is read from the working directory,
//! falling back to the built-in defaults.

use std::env;
use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use log::info;

use gobang::{AIEngine, Config, GameMode, GameOutcome, GameState};

fn main() -> Result<(), Box<dyn Error>> {
    // Default to 'info' logging unless RUST_LOG says otherwise
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(&path)?,
        None => Config::load_or_default(),
    };
    let difficulty = config.game.difficulty;
    let engine = Arc::new(AIEngine::with_config(&config)?);
    info!(
        "self-play at {} (depth {}), parallel above {} root moves",
        difficulty,
        engine.depth_for(difficulty),
        config.search.parallel_threshold
    );

    // Hotseat mode: the engine moves for whichever side is to play
    let mut game = GameState::new(GameMode::PvP, difficulty, engine);
    let start = Instant::now();
    while !game.is_over() {
        let Some(pos) = game.request_suggestion() else {
            break;
        };
        game.try_place_stone(pos)?;
    }

    println!("{}", game.board());
    match game.outcome() {
        Some(GameOutcome::Win { winner, line }) => {
            print!("{:?} wins after {} moves", winner, game.move_history().len());
            if let Some(line) = line {
                let cells: Vec<String> = line.iter().map(ToString::to_string).collect();
                print!(" with {}", cells.join(" "));
            }
            println!();
        }
        Some(GameOutcome::Draw) => println!("Draw after {} moves", game.move_history().len()),
        None => println!("Game stopped after {} moves", game.move_history().len()),
    }
    println!("Total time: {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}
