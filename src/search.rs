//! Graph-search planner: fringe, cost functions, and the search procedure

pub mod fringe;
pub mod heuristic;
pub mod plan;
pub mod planner;

pub use fringe::{Fringe, FringeEntry, FringeKind};
pub use heuristic::gap_heuristic;
pub use plan::SavedPlan;
pub use planner::{Planner, Solution};
