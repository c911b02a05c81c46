//! Decision-making core for a side-scrolling flap-or-fall game
//!
//! This crate provides:
//! - A deterministic physics transition model of the game world
//! - A fringe-agnostic graph-search planner (DFS, BFS, UCS, A*) with an
//!   admissible distance-to-gap heuristic
//! - An online tabular Q-learning agent with backward TD(λ) credit
//!   assignment
//! - Human-readable JSON persistence for solved plans and learned tables
//!
//! Rendering, assets, audio, and input are external collaborators: the core
//! needs only a boolean collision query (a port) and a fixed ordered
//! sequence of pipe-gap positions.

pub mod adapters;
pub mod cli;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod q_learning;
pub mod search;
pub mod world;

pub use error::{Error, Result};
pub use pipeline::{EpisodeRunner, LearnerController, PlanController, RunReport};
pub use ports::{CollisionOracle, Controller, EpisodeVerdict, PixelMask, Rect};
pub use q_learning::{LearnerConfig, Observation, QLearner, SavedAgent};
pub use search::{FringeKind, Planner, SavedPlan, Solution, gap_heuristic};
pub use world::{Action, GameState, Node, PipeSchedule, SpriteMasks, WorldModel};
