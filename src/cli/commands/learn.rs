//! Learn command - train or evaluate the Q-learning agent

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::JsonStore,
    cli::output::{format_number, print_kv, print_section},
    pipeline::{EpisodeRunner, LearnerController, MetricsObserver, ProgressObserver},
    ports::AgentRepository,
    q_learning::{LearnerConfig, QLearner, SavedAgent},
    world::WorldModel,
};

#[derive(Parser, Debug)]
#[command(about = "Train the Q-learning agent", allow_negative_numbers = true)]
pub struct LearnArgs {
    /// Stop after this many total episodes
    #[arg(long, short = 'e', default_value_t = 3000)]
    pub episodes: usize,

    /// Backward eligibility window λ
    #[arg(long, default_value_t = 0)]
    pub lambda: usize,

    /// Exploration rate ε (omit for pure greedy selection)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Learning rate α
    #[arg(long, default_value_t = 0.7)]
    pub alpha: f64,

    /// Discount factor γ
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Reward applied when the following frame crashed
    #[arg(long, default_value_t = -1000.0)]
    pub penalty: f64,

    /// Reward per surviving step
    #[arg(long, default_value_t = 1.0)]
    pub reward: f64,

    /// Resume from a previously saved table
    #[arg(long, short = 'i')]
    pub import_from: Option<PathBuf>,

    /// Where to snapshot the table
    #[arg(long, short = 'o', default_value = "q_values.json")]
    pub export_to: PathBuf,

    /// Snapshot the table every this many episodes
    #[arg(long, default_value_t = 200)]
    pub snapshot_interval: usize,

    /// Progress report line every this many episodes (0 disables)
    #[arg(long, default_value_t = 5)]
    pub report_interval: usize,

    /// Random seed for reproducible exploration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluation only: no table updates, no snapshots
    #[arg(long, default_value_t = false)]
    pub evaluate: bool,

    /// Show progress bar
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub progress: bool,
}

fn build_config(args: &LearnArgs) -> LearnerConfig {
    let mut config = LearnerConfig::new()
        .with_rates(args.alpha, args.gamma)
        .with_rewards(args.reward, args.penalty)
        .with_lambda(args.lambda)
        .with_epsilon(args.epsilon)
        .with_max_episodes(args.episodes)
        .with_snapshot_interval(args.snapshot_interval)
        .with_report_interval(args.report_interval)
        .with_training(!args.evaluate);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config
}

pub fn execute(args: LearnArgs) -> Result<()> {
    let config = build_config(&args);
    let store = JsonStore::new();

    // resume from a saved table when one is usable; a missing or malformed
    // snapshot degrades to a fresh start
    let agent = match &args.import_from {
        Some(path) => match store.load_agent(path) {
            Ok(saved) => {
                let agent = saved.into_agent_with(config.clone())?;
                println!(
                    "Resuming from {} ({} estimates, {} episodes played)",
                    path.display(),
                    format_number(agent.table_size()),
                    format_number(agent.episodes()),
                );
                agent
            }
            Err(e) => {
                eprintln!("Could not load {} ({e}); starting fresh.", path.display());
                QLearner::new(config.clone())?
            }
        },
        None => QLearner::new(config.clone())?,
    };

    if agent.episodes() >= config.max_episodes {
        println!(
            "Nothing to do: {} episodes already played (budget {}).",
            agent.episodes(),
            config.max_episodes
        );
        return Ok(());
    }

    let world = WorldModel::standard();
    let mut controller = LearnerController::new(agent);
    if !args.evaluate {
        controller =
            controller.with_snapshots(Box::new(JsonStore::new()), args.export_to.clone());
    }

    let mut runner = EpisodeRunner::new(&world);
    if args.progress {
        runner = runner.with_observer(Box::new(ProgressObserver::new()));
    }
    runner = runner.with_observer(Box::new(MetricsObserver::new(args.report_interval)));

    let report = runner.run(&mut controller)?;
    let agent = controller.into_agent();

    if !args.evaluate {
        store.save_agent(&SavedAgent::from_agent(&agent), &args.export_to)?;
    }

    print_section(if args.evaluate {
        "Evaluation complete"
    } else {
        "Training complete"
    });
    print_kv("episodes", &format_number(report.episodes));
    print_kv("best score", &report.best_score.to_string());
    print_kv("last score", &report.last_score.to_string());
    print_kv("estimates stored", &format_number(agent.table_size()));
    if !args.evaluate {
        print_kv("table saved to", &args.export_to.display().to_string());
    }

    Ok(())
}
