//! Persisted plan format

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    world::Action,
};

/// Versioned on-disk envelope for a solved action path.
///
/// The action sequence is stored as flap-per-frame booleans so the file
/// stays a flat, human-readable list; the surrounding fields record where
/// the plan came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPlan {
    pub version: u32,
    /// Score the plan was searched for
    pub target_score: u32,
    /// Frontier pops the search took (diagnostic)
    pub expanded: usize,
    /// One boolean per frame: flap or fall
    pub flaps: Vec<bool>,
}

impl SavedPlan {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn new(target_score: u32, expanded: usize, plan: &[Action]) -> Self {
        Self {
            version: Self::VERSION,
            target_score,
            expanded,
            flaps: plan.iter().map(|a| a.is_flap()).collect(),
        }
    }

    /// Decode back into an action sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSnapshotVersion`] when the file was
    /// written by an incompatible format version.
    pub fn actions(&self) -> Result<Vec<Action>> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        Ok(self.flaps.iter().map(|&f| Action::from_flap(f)).collect())
    }

    pub fn len(&self) -> usize {
        self.flaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flaps.is_empty()
    }
}
