//! Replay command - step a saved plan through the world model

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::JsonStore,
    cli::output::{format_number, print_kv, print_section},
    pipeline::{EpisodeRunner, PlanController},
    ports::PlanRepository,
    world::WorldModel,
};

#[derive(Parser, Debug)]
#[command(about = "Replay a saved plan without re-searching")]
pub struct ReplayArgs {
    /// Plan file to replay
    #[arg(long, short = 'p', default_value = "plan.json")]
    pub plan: PathBuf,
}

pub fn execute(args: ReplayArgs) -> Result<()> {
    let store = JsonStore::new();

    let saved = match store.load_plan(&args.plan) {
        Ok(saved) => saved,
        Err(e) => {
            eprintln!(
                "No usable plan at {} ({e}); run `fledge solve` first.",
                args.plan.display()
            );
            return Ok(());
        }
    };

    let actions = saved.actions()?;
    let world = WorldModel::standard();
    let mut controller = PlanController::new(actions);
    let report = EpisodeRunner::new(&world).run(&mut controller)?;

    print_section("Replay complete");
    print_kv("plan file", &args.plan.display().to_string());
    print_kv("planned frames", &format_number(saved.len()));
    print_kv("target score", &saved.target_score.to_string());
    print_kv("final score", &report.last_score.to_string());
    if report.last_score >= saved.target_score {
        println!("\nThe plan reached its target.");
    } else {
        println!("\nThe plan fell short of its target.");
    }

    Ok(())
}
