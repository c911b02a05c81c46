//! Deterministic pipe-gap schedule

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    world::model::{GROUND_Y, PIPE_GAP_SIZE, PIPE_HEIGHT, SCREEN_WIDTH},
};

/// Horizontal position at which a freshly spawned pipe pair appears
pub const SPAWN_X: i32 = SCREEN_WIDTH + 10;

/// Number of gap positions in the standard schedule
pub const STANDARD_SCHEDULE_LEN: usize = 450;

/// Seed for the standard schedule. Fixed so that every plan and every
/// training episode sees the same pipe sequence.
const STANDARD_SEED: u64 = 0xb17d;

/// Fixed ordered table of pipe-gap positions, indexed sequentially as pipes
/// spawn. The table is the world's only source of level layout; with it the
/// transition function is fully deterministic and plans are replayable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipeSchedule {
    /// Vertical position of each gap's top edge
    gaps: Vec<i32>,
}

impl PipeSchedule {
    /// The standard 450-entry schedule, generated once from a fixed seed.
    ///
    /// Gap positions fall in the same band the original level generator used:
    /// the top fifth of the playfield down to where the gap still clears the
    /// ground.
    pub fn standard() -> Self {
        let lo = GROUND_Y / 5;
        let hi = lo + GROUND_Y * 3 / 5 - PIPE_GAP_SIZE;
        let mut rng = StdRng::seed_from_u64(STANDARD_SEED);
        let gaps = (0..STANDARD_SCHEDULE_LEN)
            .map(|_| rng.random_range(lo..hi))
            .collect();
        Self { gaps }
    }

    /// Build a schedule from explicit gap-top positions.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPipeSchedule`] when `gaps` is empty.
    pub fn from_gaps(gaps: Vec<i32>) -> Result<Self> {
        if gaps.is_empty() {
            return Err(Error::EmptyPipeSchedule);
        }
        Ok(Self { gaps })
    }

    /// Number of defined gap positions
    pub fn len(&self) -> usize {
        self.gaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaps.is_empty()
    }

    /// Gap-top position for the given spawn index.
    ///
    /// The cursor wraps modulo the table length, so the sequence is total:
    /// indexes past the table repeat it from the start.
    pub fn gap(&self, index: usize) -> i32 {
        self.gaps[index % self.gaps.len()]
    }

    /// Pipe pair for the given spawn index at the standard spawn position
    pub fn pair(&self, index: usize) -> (super::Pipe, super::Pipe) {
        self.pair_at(index, SPAWN_X)
    }

    /// Pipe pair for the given spawn index at an explicit horizontal position
    pub fn pair_at(&self, index: usize, x: i32) -> (super::Pipe, super::Pipe) {
        let gap_y = self.gap(index);
        let upper = super::Pipe {
            x,
            y: gap_y - PIPE_HEIGHT,
        };
        let lower = super::Pipe {
            x,
            y: gap_y + PIPE_GAP_SIZE,
        };
        (upper, lower)
    }
}
