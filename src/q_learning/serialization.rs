//! Serialization support for the learning agent

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::agent::{LearnerConfig, LearnerState, QLearner},
};

/// Versioned on-disk envelope for a trained agent.
///
/// Serialized as pretty JSON so snapshots stay inspectable by hand; the
/// table keys encode the discretized state and action, and the envelope
/// carries everything needed to resume training exactly where it stopped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAgent {
    pub version: u32,
    state: LearnerState,
}

impl SavedAgent {
    /// Current save format version
    pub const VERSION: u32 = 1;

    pub fn from_agent(agent: &QLearner) -> Self {
        Self {
            version: Self::VERSION,
            state: agent.export_state(),
        }
    }

    /// Rebuild the agent, resuming at the recorded episode counter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSnapshotVersion`] for foreign format
    /// versions and [`Error::InvalidConfiguration`] when the recorded
    /// hyperparameters fail validation.
    pub fn into_agent(self) -> Result<QLearner> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        QLearner::from_state(self.state)
    }

    /// Rebuild the agent with fresh hyperparameters, keeping the learned
    /// table and the episode counter.
    ///
    /// Resuming a run is table-plus-progress; the rates, rewards, and
    /// lifecycle knobs come from the current invocation.
    ///
    /// # Errors
    ///
    /// Same contract as [`SavedAgent::into_agent`].
    pub fn into_agent_with(self, config: LearnerConfig) -> Result<QLearner> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedSnapshotVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }
        QLearner::from_state(LearnerState {
            config,
            ..self.state
        })
    }
}
