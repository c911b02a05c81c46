//! Observer implementations for episode-driven runs
//!
//! Observers allow composable data collection during training without
//! coupling the episode loop to specific output formats.

use indicatif::{ProgressBar, ProgressStyle};

use crate::{Result, ports::observer::EpisodeObserver};

/// Progress bar observer - shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    best_score: u32,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            best_score: 0,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl EpisodeObserver for ProgressObserver {
    fn on_run_start(&mut self, max_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(max_episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, score: u32, _table_size: usize) -> Result<()> {
        self.best_score = self.best_score.max(score);
        if let Some(pb) = &self.progress_bar {
            pb.set_position(episode as u64);
            pb.set_message(format!("best: {}", self.best_score));
        }
        Ok(())
    }

    fn on_run_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!("best: {}", self.best_score));
        }
        Ok(())
    }
}

/// Metrics observer - tracks scores and prints a periodic report line
pub struct MetricsObserver {
    report_interval: usize,
    episodes: usize,
    best_score: u32,
    total_score: u64,
}

impl MetricsObserver {
    pub fn new(report_interval: usize) -> Self {
        Self {
            report_interval,
            episodes: 0,
            best_score: 0,
            total_score: 0,
        }
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn mean_score(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_score as f64 / self.episodes as f64
        }
    }
}

impl EpisodeObserver for MetricsObserver {
    fn on_episode_end(&mut self, episode: usize, score: u32, table_size: usize) -> Result<()> {
        self.episodes = episode;
        self.best_score = self.best_score.max(score);
        self.total_score += u64::from(score);

        if self.report_interval > 0 && episode.is_multiple_of(self.report_interval) {
            println!(
                "{episode} episodes complete; {table_size} states instantiated, best score {}",
                self.best_score
            );
        }
        Ok(())
    }
}
