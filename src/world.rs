//! Deterministic game world: state values, pipe schedule, transition model

pub mod model;
pub mod pipes;
pub mod state;

pub use model::{SpriteMasks, WorldModel};
pub use pipes::PipeSchedule;
pub use state::{Action, GameState, Node, Pipe};
