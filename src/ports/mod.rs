//! Port traits - boundaries between the core and its collaborators

pub mod collision;
pub mod controller;
pub mod observer;
pub mod repository;

pub use collision::{CollisionOracle, PixelMask, Rect};
pub use controller::{Controller, EpisodeVerdict};
pub use observer::EpisodeObserver;
pub use repository::{AgentRepository, PlanRepository};
