//! Controller port - the per-frame decision seam
//!
//! Both brains of the system sit behind this trait: the planner's replayed
//! solution and the online Q-learner. The episode runner drives either one
//! through the same synchronous loop without knowing which it holds.

use crate::{Result, world::{Action, GameState}};

/// What the controller wants after an episode ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeVerdict {
    /// Start another episode
    Continue,
    /// The run is complete (plan exhausted, episode budget spent)
    Finished,
}

/// A per-frame decision maker.
///
/// The episode runner calls [`Controller::choose_action`] exactly once per
/// live frame and [`Controller::end_episode`] exactly once per crash; no
/// other lifecycle exists. Implementations may learn, replay, or ignore the
/// state entirely.
pub trait Controller {
    /// Name used in reports and progress output
    fn name(&self) -> &str;

    /// Upper bound on episodes this controller intends to run; used to size
    /// progress reporting
    fn planned_episodes(&self) -> usize {
        1
    }

    /// Number of value estimates the controller has stored, for reporting;
    /// zero for controllers that do not learn
    fn table_size(&self) -> usize {
        0
    }

    /// Decide the action for the current frame
    fn choose_action(&mut self, state: &GameState) -> Result<Action>;

    /// Close out a finished episode; `score` is the episode's final score
    fn end_episode(&mut self, score: u32) -> Result<EpisodeVerdict>;
}
