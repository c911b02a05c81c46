//! Game state representation and basic operations

use serde::{Deserialize, Serialize};

/// The binary per-frame control decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Fall,
    Flap,
}

impl Action {
    /// Both actions, in update order (flap branch first, matching the model)
    pub const ALL: [Action; 2] = [Action::Flap, Action::Fall];

    /// Encode as the persisted flap-per-frame boolean
    pub fn is_flap(self) -> bool {
        matches!(self, Action::Flap)
    }

    pub fn from_flap(flapped: bool) -> Self {
        if flapped { Action::Flap } else { Action::Fall }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Fall => write!(f, "fall"),
            Action::Flap => write!(f, "flap"),
        }
    }
}

/// One pipe sprite position (top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pipe {
    pub x: i32,
    pub y: i32,
}

/// Complete world state for one frame.
///
/// Integer physics throughout so the state is structurally comparable and
/// hashable; the planner uses it as a map key. States are logically immutable
/// once produced: successors are new values built from the parent's fields,
/// never in-place mutations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub score: u32,
    /// Horizontal position of the bird's left edge (constant during play)
    pub x: i32,
    /// Vertical position of the bird's top edge
    pub y: i32,
    pub vel_y: i32,
    /// Downward acceleration applied on a fall frame
    pub acc_y: i32,
    /// Animation frame, selects the bird pixel mask
    pub sprite_index: u8,
    /// Monotone pointer into the pipe-gap schedule
    pub pipe_cursor: usize,
    pub crashed: bool,
    /// Upper pipes, lead pipe first
    pub upper: Vec<Pipe>,
    /// Lower pipes, paired with `upper` by index
    pub lower: Vec<Pipe>,
}

impl GameState {
    /// Terminal states have no successors
    pub fn is_terminal(&self) -> bool {
        self.crashed
    }
}

/// A state plus the action that produced it and its edge cost.
///
/// The root node carries no action; every expanded edge costs one frame.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: GameState,
    pub action: Option<Action>,
    pub cost: i64,
}

impl Node {
    pub fn root(state: GameState) -> Self {
        Self {
            state,
            action: None,
            cost: 0,
        }
    }

    pub fn new(state: GameState, action: Action) -> Self {
        Self {
            state,
            action: Some(action),
            cost: 1,
        }
    }
}
