//! Observer port - composable episode monitoring
//!
//! Observers collect data during a run without coupling the episode loop to
//! any particular output: a progress bar, aggregate metrics, or nothing.

use crate::Result;

/// Observer of an episode-driven run.
///
/// Call order: `on_run_start(max_episodes)` once, then per episode
/// `on_episode_end(episode, score, table_size)`, then `on_run_end()` once.
pub trait EpisodeObserver {
    fn on_run_start(&mut self, _max_episodes: usize) -> Result<()> {
        Ok(())
    }

    fn on_episode_end(&mut self, _episode: usize, _score: u32, _table_size: usize) -> Result<()> {
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        Ok(())
    }
}
