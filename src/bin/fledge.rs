//! fledge CLI - search and reinforcement-learning controllers for a
//! side-scrolling reflex game
//!
//! Three modes, one world model:
//! - `solve` searches for a plan reaching a target score and saves it
//! - `learn` trains (or resumes) the Q-learning agent
//! - `replay` steps a saved plan back through the model

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fledge")]
#[command(version, about = "Planner and Q-learner for a flap-or-fall game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a plan reaching a target score
    Solve(fledge::cli::commands::solve::SolveArgs),

    /// Train the Q-learning agent through simulated episodes
    Learn(fledge::cli::commands::learn::LearnArgs),

    /// Replay a saved plan through the world model
    Replay(fledge::cli::commands::replay::ReplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => fledge::cli::commands::solve::execute(args),
        Commands::Learn(args) => fledge::cli::commands::learn::execute(args),
        Commands::Replay(args) => fledge::cli::commands::replay::execute(args),
    }
}
