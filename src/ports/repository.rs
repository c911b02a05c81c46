//! Repository ports for snapshot persistence.
//!
//! These traits are the boundary between the learning/search core and
//! durable storage. The core never opens files; it hands a snapshot value to
//! a repository and gets one back.

use std::path::Path;

use crate::{Result, q_learning::SavedAgent, search::SavedPlan};

/// Port for persisting and loading trained agents.
pub trait AgentRepository {
    /// Save an agent snapshot.
    ///
    /// Implementations must replace the destination atomically: a crash
    /// mid-write may lose the new snapshot but never the last good one.
    fn save_agent(&self, agent: &SavedAgent, path: &Path) -> Result<()>;

    /// Load an agent snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error when the file is missing, unreadable, or malformed;
    /// callers that want to start fresh on a missing snapshot handle the
    /// error instead of treating it as fatal.
    fn load_agent(&self, path: &Path) -> Result<SavedAgent>;
}

/// Port for persisting and loading solved plans.
pub trait PlanRepository {
    /// Save a plan snapshot atomically, like [`AgentRepository::save_agent`].
    fn save_plan(&self, plan: &SavedPlan, path: &Path) -> Result<()>;

    /// Load a plan snapshot; same error contract as
    /// [`AgentRepository::load_agent`].
    fn load_plan(&self, path: &Path) -> Result<SavedPlan>;
}
