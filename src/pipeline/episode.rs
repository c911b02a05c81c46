//! Episode runner
//!
//! The synchronous per-frame loop that drives a controller against the world
//! model: one action per frame, one episode per crash, until the controller
//! reports it is done.

use crate::{
    Result,
    ports::{controller::{Controller, EpisodeVerdict}, observer::EpisodeObserver},
    world::WorldModel,
};

/// Result of a complete run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    /// Episodes played
    pub episodes: usize,
    /// Highest episode score seen
    pub best_score: u32,
    /// Score of the final episode
    pub last_score: u32,
}

/// Drives any [`Controller`] through repeated episodes.
pub struct EpisodeRunner<'w> {
    world: &'w WorldModel,
    observers: Vec<Box<dyn EpisodeObserver>>,
}

impl<'w> EpisodeRunner<'w> {
    pub fn new(world: &'w WorldModel) -> Self {
        Self {
            world,
            observers: Vec::new(),
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn EpisodeObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run episodes until the controller reports [`EpisodeVerdict::Finished`].
    pub fn run(&mut self, controller: &mut dyn Controller) -> Result<RunReport> {
        for observer in &mut self.observers {
            observer.on_run_start(controller.planned_episodes())?;
        }

        let mut episodes = 0usize;
        let mut best_score = 0u32;
        let mut last_score = 0u32;

        loop {
            let score = self.play_episode(controller)?;
            episodes += 1;
            best_score = best_score.max(score);
            last_score = score;

            let verdict = controller.end_episode(score)?;
            for observer in &mut self.observers {
                observer.on_episode_end(episodes, score, controller.table_size())?;
            }

            if verdict == EpisodeVerdict::Finished {
                break;
            }
        }

        for observer in &mut self.observers {
            observer.on_run_end()?;
        }

        Ok(RunReport {
            episodes,
            best_score,
            last_score,
        })
    }

    /// One episode: frames until the bird crashes or leaves the top of the
    /// screen (the driver-level end-of-episode rule). Returns the final score.
    fn play_episode(&self, controller: &mut dyn Controller) -> Result<u32> {
        let mut state = self.world.start();

        loop {
            let action = controller.choose_action(&state)?;
            state = self.world.step(&state, action)?;
            if state.crashed || state.y <= 0 {
                return Ok(state.score);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        pipeline::controllers::{LearnerController, PlanController},
        q_learning::{LearnerConfig, QLearner},
        search::{FringeKind, Planner, gap_heuristic},
        world::Action,
    };

    #[test]
    fn a_planned_solution_replays_to_its_target_score() {
        let world = WorldModel::standard();
        let solution = Planner::new(&world, FringeKind::Priority)
            .search_with(1, |node| gap_heuristic(&node.state).unwrap_or(0))
            .unwrap()
            .expect("target 1 is solvable");

        let mut controller = PlanController::new(solution.plan);
        let report = EpisodeRunner::new(&world).run(&mut controller).unwrap();
        assert_eq!(report.episodes, 1);
        assert_eq!(report.best_score, 1);
    }

    #[test]
    fn an_empty_plan_falls_to_the_ground() {
        let world = WorldModel::standard();
        let mut controller = PlanController::new(Vec::new());
        let report = EpisodeRunner::new(&world).run(&mut controller).unwrap();
        assert_eq!(report.episodes, 1);
        assert_eq!(report.last_score, 0);
    }

    #[test]
    fn the_learner_runs_its_episode_budget() {
        let world = WorldModel::standard();
        let agent = QLearner::new(
            LearnerConfig::default()
                .with_max_episodes(5)
                .with_seed(3)
                .with_epsilon(Some(0.1)),
        )
        .unwrap();
        let mut controller = LearnerController::new(agent);

        let report = EpisodeRunner::new(&world).run(&mut controller).unwrap();
        assert_eq!(report.episodes, 5);
        assert_eq!(controller.agent().episodes(), 5);
        assert!(controller.agent().table_size() > 0);
    }

    #[test]
    fn flap_every_frame_exits_through_the_ceiling_rule() {
        struct AlwaysFlap;
        impl crate::ports::Controller for AlwaysFlap {
            fn name(&self) -> &str {
                "always-flap"
            }
            fn choose_action(&mut self, _state: &crate::world::GameState) -> Result<Action> {
                Ok(Action::Flap)
            }
            fn end_episode(&mut self, _score: u32) -> Result<EpisodeVerdict> {
                Ok(EpisodeVerdict::Finished)
            }
        }

        let world = WorldModel::standard();
        let report = EpisodeRunner::new(&world).run(&mut AlwaysFlap).unwrap();
        assert_eq!(report.episodes, 1);
        assert_eq!(report.last_score, 0);
    }
}
