//! Observation extraction and state-space coarsening
//!
//! The learner does not see raw world states. Each frame is reduced to three
//! numbers relative to the pipe the bird must thread next, and the offsets
//! are bucketed asymmetrically: 10-pixel resolution near the pipe where
//! precision matters, 100-pixel resolution far away where it does not.
//! Velocity passes through unbucketed.

use serde::{Deserialize, Serialize};

use crate::world::{
    GameState,
    model::{PIPE_GAP_SIZE, PLAYER_HEIGHT, PLAYER_WIDTH},
};

/// A pipe whose trailing edge is this far behind the bird is already passed;
/// attention moves to the next pair
const FOCUS_BEHIND_LIMIT: i32 = -30;

/// Offsets at or below this magnitude keep fine 10-pixel buckets
const FINE_BUCKET_LIMIT: i32 = 100;

/// Raw per-frame observation, before bucketing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    /// Horizontal distance from the bird's trailing edge to the leading edge
    /// of the focus pipe
    pub x_offset: i32,
    /// Vertical distance from the bird's midpoint to the gap midpoint
    pub y_offset: i32,
    pub y_vel: i32,
}

impl Observation {
    /// Extract the observation for a live frame.
    ///
    /// The focus pipe is the lead lower pipe until it falls more than 30
    /// pixels behind the bird, then the next pair. `None` when the state has
    /// no pipes to aim for.
    pub fn from_state(state: &GameState) -> Option<Self> {
        let lead = state.lower.first()?;
        let focus = if lead.x - state.x > FOCUS_BEHIND_LIMIT {
            lead
        } else {
            state.lower.get(1).unwrap_or(lead)
        };

        Some(Self {
            x_offset: focus.x - (state.x + PLAYER_WIDTH),
            y_offset: focus.y - PIPE_GAP_SIZE / 2 - (state.y + PLAYER_HEIGHT / 2),
            y_vel: state.vel_y,
        })
    }
}

/// Coarsened key the Q-table is indexed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscreteState {
    pub x_offset: i32,
    pub y_offset: i32,
    pub y_vel: i32,
}

/// Bucket an observation into its table key.
///
/// Offsets floor to the nearest multiple of 10 inside the fine band and to
/// the nearest multiple of 100 beyond it. Flooring uses the Euclidean
/// remainder so negative offsets round toward negative infinity, the same
/// direction as positive ones.
pub fn discretize(observation: Observation) -> DiscreteState {
    let Observation {
        mut x_offset,
        mut y_offset,
        y_vel,
    } = observation;

    x_offset -= if x_offset <= FINE_BUCKET_LIMIT {
        x_offset.rem_euclid(10)
    } else {
        x_offset.rem_euclid(100)
    };
    y_offset -= if y_offset.abs() <= FINE_BUCKET_LIMIT {
        y_offset.rem_euclid(10)
    } else {
        y_offset.rem_euclid(100)
    };

    DiscreteState {
        x_offset,
        y_offset,
        y_vel,
    }
}
