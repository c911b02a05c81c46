//! Solve command - search for a target score and save the plan

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    adapters::JsonStore,
    cli::output::{format_number, print_kv, print_section},
    ports::PlanRepository,
    search::{FringeKind, Planner, SavedPlan, gap_heuristic},
    world::WorldModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Depth-first search (stack fringe)
    Dfs,
    /// Breadth-first search (queue fringe)
    Bfs,
    /// Uniform-cost search (priority fringe, unit costs)
    Ucs,
    /// A* with the gap-distance heuristic (priority fringe)
    Astar,
}

impl Strategy {
    fn fringe_kind(self) -> FringeKind {
        match self {
            Strategy::Dfs => FringeKind::Stack,
            Strategy::Bfs => FringeKind::Queue,
            Strategy::Ucs | Strategy::Astar => FringeKind::Priority,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Search for a plan reaching a target score")]
pub struct SolveArgs {
    /// Target score to solve for
    pub target: u32,

    /// Search strategy
    #[arg(long, short = 's', value_enum, default_value_t = Strategy::Astar)]
    pub strategy: Strategy,

    /// Output file for the solved plan
    #[arg(long, short = 'p', default_value = "plan.json")]
    pub plan: PathBuf,

    /// Print a previously saved plan instead of searching
    #[arg(long, default_value_t = false)]
    pub saved: bool,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let store = JsonStore::new();

    if args.saved {
        match store.load_plan(&args.plan) {
            Ok(saved) => {
                print_section("Saved plan");
                print_kv("file", &args.plan.display().to_string());
                print_kv("target score", &saved.target_score.to_string());
                print_kv("frames", &format_number(saved.len()));
                print_kv("expansions", &format_number(saved.expanded));
                return Ok(());
            }
            Err(e) => {
                eprintln!("No usable saved plan ({e}); searching instead.");
            }
        }
    }

    let world = WorldModel::standard();
    if args.target as usize > world.schedule().len() {
        eprintln!(
            "Warning: the deterministic schedule defines {} pipes; beyond that it repeats.",
            world.schedule().len()
        );
    }

    let planner = Planner::new(&world, args.strategy.fringe_kind());
    let solution = match args.strategy {
        Strategy::Astar => {
            planner.search_with(args.target, |node| gap_heuristic(&node.state).unwrap_or(0))?
        }
        _ => planner.search(args.target)?,
    };

    match solution {
        Some(solution) => {
            let saved = SavedPlan::new(args.target, solution.expanded, &solution.plan);
            store.save_plan(&saved, &args.plan)?;

            print_section("Solution found");
            print_kv("strategy", &format!("{:?}", args.strategy).to_lowercase());
            print_kv("target score", &args.target.to_string());
            print_kv("frames", &format_number(solution.plan.len()));
            print_kv("expansions", &format_number(solution.expanded));
            print_kv("plan saved to", &args.plan.display().to_string());
        }
        None => {
            print_section("No solution");
            println!(
                "The search exhausted the frontier without reaching score {}.",
                args.target
            );
        }
    }

    Ok(())
}
