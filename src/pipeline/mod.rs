//! Episode pipeline: runner, controllers, and observers

pub mod controllers;
pub mod episode;
pub mod observers;

pub use controllers::{LearnerController, PlanController};
pub use episode::{EpisodeRunner, RunReport};
pub use observers::{MetricsObserver, ProgressObserver};
