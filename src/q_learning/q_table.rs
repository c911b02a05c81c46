//! Q-table for temporal difference learning

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{q_learning::discretizer::DiscreteState, world::Action};

/// Q-table mapping (state, action) pairs to value estimates.
///
/// Keys are a lossless string encoding of the discretized state and the
/// action (`"x:y:vel/flap"`), so the serialized form is a flat JSON object
/// that round-trips exactly. A BTreeMap keeps the on-disk ordering stable
/// between snapshots. Unseen pairs read as zero, matching a table that
/// defaults every estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QTable {
    values: BTreeMap<String, f64>,
}

fn key(state: DiscreteState, action: Action) -> String {
    format!(
        "{}:{}:{}/{}",
        state.x_offset, state.y_offset, state.y_vel, action
    )
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimate for a state-action pair; zero when unseen
    pub fn get(&self, state: DiscreteState, action: Action) -> f64 {
        self.values.get(&key(state, action)).copied().unwrap_or(0.0)
    }

    pub fn set(&mut self, state: DiscreteState, action: Action, value: f64) {
        self.values.insert(key(state, action), value);
    }

    /// Maximum estimate over both actions
    pub fn state_value(&self, state: DiscreteState) -> f64 {
        Action::ALL
            .into_iter()
            .map(|action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Action with the higher estimate; ties break to `Fall`
    pub fn greedy_action(&self, state: DiscreteState) -> Action {
        if self.get(state, Action::Fall) >= self.get(state, Action::Flap) {
            Action::Fall
        } else {
            Action::Flap
        }
    }

    /// One Bellman-residual update:
    /// `Q(s,a) ← Q(s,a) + α (r + γ·next_value − Q(s,a))`
    pub fn update(
        &mut self,
        state: DiscreteState,
        action: Action,
        reward: f64,
        next_value: f64,
        alpha: f64,
        gamma: f64,
    ) {
        let current = self.get(state, action);
        let residual = reward + gamma * next_value - current;
        self.set(state, action, current + alpha * residual);
    }

    /// Number of stored estimates
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
