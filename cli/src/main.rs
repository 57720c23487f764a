mod config;
mod terminal;

use std::io;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tictactoe_engine::tictactoe::{
    FirstPlayerMode, GameTree, TicTacToeSession, TicTacToeSessionSettings,
};
use tictactoe_engine::{SessionRng, log, logger};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FirstPlayerArg {
    Human,
    Computer,
    Random,
}

impl From<FirstPlayerArg> for FirstPlayerMode {
    fn from(arg: FirstPlayerArg) -> Self {
        match arg {
            FirstPlayerArg::Human => FirstPlayerMode::Human,
            FirstPlayerArg::Computer => FirstPlayerMode::Computer,
            FirstPlayerArg::Random => FirstPlayerMode::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_cli", version, about = "Play tic-tac-toe against an exhaustive minimax opponent")]
struct Args {
    #[arg(long, default_value = config::CONFIG_FILE)]
    config: PathBuf,

    /// Overrides `first_player` from the config file
    #[arg(long, value_enum)]
    first_player: Option<FirstPlayerArg>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,

    /// Print game tree statistics and exit
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = config::get_config_manager(&args.config).get_config()?;

    let prefix = if args.use_log_prefix {
        Some(config.log_prefix.clone().unwrap_or_else(|| "TicTacToe".to_string()))
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    log!("Program starting");
    let tree = GameTree::shared();

    if args.stats {
        let stats = tree.stats();
        println!("nodes:          {}", stats.node_count);
        println!("terminal nodes: {}", stats.terminal_count);
        println!("X wins:         {}", stats.x_wins);
        println!("O wins:         {}", stats.o_wins);
        println!("draws:          {}", stats.draws);
        println!("max depth:      {}", stats.max_depth);
        println!("root value:     {}", tree.node(tree.root()).value());
        return Ok(());
    }

    let mode = args
        .first_player
        .map(FirstPlayerMode::from)
        .unwrap_or(config.first_player);
    let mut rng = args.seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
    let settings = TicTacToeSessionSettings::from_first_player_mode(mode, &mut rng);
    log!(
        "New game: {:?} mode, computer plays {} (seed {})",
        mode,
        settings.ai_player,
        rng.seed()
    );

    let session = TicTacToeSession::new(tree, settings);
    let stdin = io::stdin();
    let result = terminal::run_game(session, config.show_evaluations, stdin.lock(), io::stdout())?;

    match result {
        Some(status) => log!("Game over: {}", status),
        None => log!("Game abandoned"),
    }

    Ok(())
}
