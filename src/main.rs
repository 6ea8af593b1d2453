mod arena;
mod engine;
mod game;
mod sampler;
mod snake;
mod term;

use clap::Parser;
use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// A grid cell as `(row, col)`.
pub type Coords = (i16, i16);

/// A snake game for the terminal.
#[derive(Parser)]
#[command(name = "snakeses", version)]
struct Args {
    /// Milliseconds between two moves of the snake.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = 50,
        value_parser = clap::value_parser!(u64).range(1..=10_000)
    )]
    tick_ms: u64,
    /// Number of walls scattered inside the arena.
    #[arg(long, value_name = "COUNT", default_value_t = 25)]
    walls: usize,
    /// Number of food items on the board at any time.
    #[arg(
        long,
        value_name = "COUNT",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    food: u64,
    /// Seed for the board layout; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Draw with plain characters only.
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub tick_ms: u64,
    pub walls: usize,
    pub food: usize,
    pub color: bool,
}

fn main() -> color_eyre::Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let config = GameConfig {
        tick_ms: args.tick_ms,
        walls: args.walls,
        food: args.food as usize,
        color: !args.no_color,
    };

    let mut game = game::SnakeGame::new(config, StdRng::seed_from_u64(seed))?;
    let (width, height) = game.size();
    info!("starting with seed {} on a {}x{} arena", seed, width, height);

    game.run()
}
