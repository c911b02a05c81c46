//! The two interchangeable controllers

use std::path::PathBuf;

use crate::{
    Result,
    ports::{
        controller::{Controller, EpisodeVerdict},
        repository::AgentRepository,
    },
    q_learning::{Observation, QLearner, SavedAgent},
    world::{Action, GameState},
};

/// Replays a solved plan, one action per frame.
///
/// Falls once the plan is exhausted and finishes after its single episode;
/// the planner already did the thinking.
pub struct PlanController {
    plan: Vec<Action>,
    cursor: usize,
}

impl PlanController {
    pub fn new(plan: Vec<Action>) -> Self {
        Self { plan, cursor: 0 }
    }
}

impl Controller for PlanController {
    fn name(&self) -> &str {
        "plan"
    }

    fn choose_action(&mut self, _state: &GameState) -> Result<Action> {
        let action = self.plan.get(self.cursor).copied().unwrap_or(Action::Fall);
        self.cursor += 1;
        Ok(action)
    }

    fn end_episode(&mut self, _score: u32) -> Result<EpisodeVerdict> {
        Ok(EpisodeVerdict::Finished)
    }
}

/// Drives the online Q-learner: one observation and action per frame, one
/// learning pass per crash, and a table snapshot every configured interval.
pub struct LearnerController {
    agent: QLearner,
    store: Option<(Box<dyn AgentRepository>, PathBuf)>,
}

impl LearnerController {
    pub fn new(agent: QLearner) -> Self {
        Self { agent, store: None }
    }

    /// Snapshot the table to `path` whenever the agent reports one due
    pub fn with_snapshots(mut self, store: Box<dyn AgentRepository>, path: PathBuf) -> Self {
        self.store = Some((store, path));
        self
    }

    pub fn agent(&self) -> &QLearner {
        &self.agent
    }

    pub fn into_agent(self) -> QLearner {
        self.agent
    }
}

impl Controller for LearnerController {
    fn name(&self) -> &str {
        "q-learner"
    }

    fn planned_episodes(&self) -> usize {
        self.agent
            .config()
            .max_episodes
            .saturating_sub(self.agent.episodes())
    }

    fn table_size(&self) -> usize {
        self.agent.table_size()
    }

    fn choose_action(&mut self, state: &GameState) -> Result<Action> {
        match Observation::from_state(state) {
            Some(observation) => Ok(self.agent.take_action(observation)),
            // no pipe to aim for; nothing worth recording
            None => Ok(Action::Fall),
        }
    }

    fn end_episode(&mut self, _score: u32) -> Result<EpisodeVerdict> {
        let report = self.agent.learn_from_episode();

        if report.snapshot_due
            && let Some((store, path)) = &self.store
        {
            store.save_agent(&SavedAgent::from_agent(&self.agent), path)?;
        }

        Ok(if report.finished {
            EpisodeVerdict::Finished
        } else {
            EpisodeVerdict::Continue
        })
    }
}
