//! Tabular Q-learning agent with backward TD(λ) credit assignment

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    q_learning::{
        discretizer::{DiscreteState, Observation, discretize},
        q_table::QTable,
    },
    world::Action,
};

/// Hyperparameters and lifecycle settings for a [`QLearner`].
///
/// Defaults match the reference training runs: α = 0.7, γ = 1.0, λ = 0,
/// greedy selection (no exploration), −1000 crash penalty, +1 survival
/// reward, 3000 episodes, a table snapshot every 200 episodes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearnerConfig {
    /// Learning rate α
    pub alpha: f64,
    /// Discount factor γ
    pub gamma: f64,
    /// Backward eligibility window λ: how many preceding decisions each
    /// reward propagates to, beyond the step itself
    pub lambda: usize,
    /// Exploration rate; `None` disables exploration entirely
    pub epsilon: Option<f64>,
    /// Reward applied when the following frame crashed
    pub penalty: f64,
    /// Reward per surviving step
    pub reward: f64,
    /// Training halts after this many episodes
    pub max_episodes: usize,
    /// Snapshot the table every this many episodes
    pub snapshot_interval: usize,
    /// Emit a progress report every this many episodes
    pub report_interval: usize,
    /// Evaluation-only mode skips all table updates
    pub training: bool,
    /// Seed for the exploration RNG; `None` draws from the OS
    pub seed: Option<u64>,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            alpha: 0.7,
            gamma: 1.0,
            lambda: 0,
            epsilon: None,
            penalty: -1000.0,
            reward: 1.0,
            max_episodes: 3000,
            snapshot_interval: 200,
            report_interval: 5,
            training: true,
            seed: None,
        }
    }
}

impl LearnerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lambda(mut self, lambda: usize) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn with_epsilon(mut self, epsilon: Option<f64>) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_rates(mut self, alpha: f64, gamma: f64) -> Self {
        self.alpha = alpha;
        self.gamma = gamma;
        self
    }

    pub fn with_rewards(mut self, reward: f64, penalty: f64) -> Self {
        self.reward = reward;
        self.penalty = penalty;
        self
    }

    pub fn with_max_episodes(mut self, max_episodes: usize) -> Self {
        self.max_episodes = max_episodes;
        self
    }

    pub fn with_snapshot_interval(mut self, interval: usize) -> Self {
        self.snapshot_interval = interval;
        self
    }

    pub fn with_report_interval(mut self, interval: usize) -> Self {
        self.report_interval = interval;
        self
    }

    pub fn with_training(mut self, training: bool) -> Self {
        self.training = training;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate parameter ranges.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for out-of-range rates.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.alpha) || self.alpha == 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!("alpha must be in (0, 1], got {}", self.alpha),
            });
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(Error::InvalidConfiguration {
                message: format!("gamma must be in [0, 1], got {}", self.gamma),
            });
        }
        if let Some(eps) = self.epsilon
            && !(0.0..=1.0).contains(&eps)
        {
            return Err(Error::InvalidConfiguration {
                message: format!("epsilon must be in [0, 1], got {eps}"),
            });
        }
        Ok(())
    }

    fn current_epsilon(&self) -> f64 {
        self.epsilon.unwrap_or(0.0)
    }
}

/// Status of one completed learning pass
#[derive(Debug, Clone, Copy)]
pub struct EpisodeReport {
    /// Episodes completed so far, this one included
    pub episode: usize,
    /// Estimates stored in the table after the pass
    pub table_size: usize,
    /// A table snapshot is due after this episode
    pub snapshot_due: bool,
    /// The configured maximum episode count has been reached
    pub finished: bool,
}

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Online tabular Q-learning agent.
///
/// Driven synchronously by an external per-frame loop: [`QLearner::take_action`]
/// once per frame, [`QLearner::learn_from_episode`] once per crash. Episode
/// history accumulates between the two; the learning pass walks it backward,
/// propagating each reward across the λ most recent decisions instead of
/// only the last one.
#[derive(Debug)]
pub struct QLearner {
    config: LearnerConfig,
    q_table: QTable,
    episodes: usize,
    history: Vec<(DiscreteState, Action)>,
    rng: StdRng,
}

/// Serializable agent internals, split out so persistence can rebuild the
/// RNG from the recorded seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct LearnerState {
    pub config: LearnerConfig,
    pub q_table: QTable,
    pub episodes: usize,
}

impl QLearner {
    /// Create a fresh agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] when rates are out of range.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        config.validate()?;
        let rng = build_rng(config.seed);
        Ok(Self {
            config,
            q_table: QTable::new(),
            episodes: 0,
            history: Vec::new(),
            rng,
        })
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn episodes(&self) -> usize {
        self.episodes
    }

    pub fn table_size(&self) -> usize {
        self.q_table.len()
    }

    pub(crate) fn export_state(&self) -> LearnerState {
        LearnerState {
            config: self.config.clone(),
            q_table: self.q_table.clone(),
            episodes: self.episodes,
        }
    }

    pub(crate) fn from_state(state: LearnerState) -> Result<Self> {
        state.config.validate()?;
        let rng = build_rng(state.config.seed);
        Ok(Self {
            config: state.config,
            q_table: state.q_table,
            episodes: state.episodes,
            history: Vec::new(),
            rng,
        })
    }

    /// Choose the action for the current frame and record it in the episode
    /// history.
    ///
    /// ε-greedy: with probability ε a uniformly random action, otherwise the
    /// greedy action (ties break to `Fall`).
    pub fn take_action(&mut self, observation: Observation) -> Action {
        let state = discretize(observation);
        let action = if self.explore() {
            *Action::ALL
                .choose(&mut self.rng)
                .unwrap_or(&Action::Fall)
        } else {
            self.q_table.greedy_action(state)
        };
        self.history.push((state, action));
        action
    }

    fn explore(&mut self) -> bool {
        self.rng.random::<f64>() < self.config.current_epsilon()
    }

    /// Reward for a step, relative to the state that chronologically
    /// followed it; a vacant slot means the step preceded the crash
    fn step_reward(&self, next: Option<DiscreteState>) -> f64 {
        match next {
            None => self.config.penalty,
            Some(_) => self.config.reward,
        }
    }

    /// Bootstrapped value of the next state: the max estimate over actions,
    /// or the crash penalty when the slot is vacant
    fn next_value(&self, next: Option<DiscreteState>) -> f64 {
        match next {
            None => self.config.penalty,
            Some(state) => self.q_table.state_value(state),
        }
    }

    fn apply_update(
        &mut self,
        state: DiscreteState,
        action: Action,
        next: Option<DiscreteState>,
        reward: f64,
    ) {
        if !self.config.training {
            return;
        }
        let next_value = self.next_value(next);
        self.q_table.update(
            state,
            action,
            reward,
            next_value,
            self.config.alpha,
            self.config.gamma,
        );
    }

    /// Run the backward TD(λ) learning pass over the finished episode.
    ///
    /// Walking the history from last step to first: the reward at step `t`
    /// is computed once against the current next-state slot, then applied to
    /// the window of `min(t, λ) + 1` steps ending at `t`, sliding the slot
    /// to each step's state as the window moves. The terminal penalty thus
    /// reaches the λ most recent decisions, not only the final one.
    ///
    /// Clears the history, bumps the episode counter, and reports whether a
    /// snapshot is due and whether the configured episode budget is spent.
    /// In evaluation mode the walk is a no-op but the lifecycle still runs.
    pub fn learn_from_episode(&mut self) -> EpisodeReport {
        let history = std::mem::take(&mut self.history);

        let mut next: Option<DiscreteState> = None;
        for t in (0..history.len()).rev() {
            let reward = self.step_reward(next);
            let window = t.min(self.config.lambda) + 1;
            for t_inner in (t + 1 - window..=t).rev() {
                let (state, action) = history[t_inner];
                self.apply_update(state, action, next, reward);
                // the λ-window keeps the reward fixed but the slot still
                // slides to the state just updated
                next = Some(state);
            }
        }

        self.episodes += 1;

        EpisodeReport {
            episode: self.episodes,
            table_size: self.q_table.len(),
            snapshot_due: self.config.snapshot_interval > 0
                && self.episodes.is_multiple_of(self.config.snapshot_interval),
            finished: self.episodes >= self.config.max_episodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(x: i32, y: i32, vel: i32) -> DiscreteState {
        DiscreteState {
            x_offset: x,
            y_offset: y,
            y_vel: vel,
        }
    }

    fn learner(config: LearnerConfig) -> QLearner {
        QLearner::new(config).unwrap()
    }

    fn push_history(agent: &mut QLearner, steps: &[(DiscreteState, Action)]) {
        agent.history.extend_from_slice(steps);
    }

    #[test]
    fn greedy_selection_records_history() {
        let mut agent = learner(LearnerConfig::default());
        let observation = Observation {
            x_offset: 120,
            y_offset: -30,
            y_vel: -9,
        };
        let action = agent.take_action(observation);
        assert_eq!(action, Action::Fall, "fresh table ties break to fall");
        assert_eq!(agent.history.len(), 1);
        assert_eq!(agent.history[0].0, discretize(observation));
    }

    #[test]
    fn exploration_is_reproducible_under_a_seed() {
        let run = |seed: u64| {
            let mut agent = learner(
                LearnerConfig::default()
                    .with_epsilon(Some(1.0))
                    .with_seed(seed),
            );
            (0..32)
                .map(|i| {
                    agent.take_action(Observation {
                        x_offset: i,
                        y_offset: 0,
                        y_vel: 0,
                    })
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(7), run(7));
    }

    #[test]
    fn single_step_crash_applies_the_penalty_update() {
        // one action, then a crash: q ← 0 + α(penalty + γ·penalty − 0)
        let mut agent = learner(LearnerConfig::default());
        let s = state(50, 0, -9);
        push_history(&mut agent, &[(s, Action::Fall)]);

        let report = agent.learn_from_episode();
        let expected = 0.7 * (-1000.0 + 1.0 * -1000.0);
        assert!((agent.q_table.get(s, Action::Fall) - expected).abs() < 1e-9);
        assert_eq!(report.episode, 1);
        assert_eq!(report.table_size, 1);
    }

    #[test]
    fn lambda_zero_matches_the_hand_computed_trace() {
        // two steps, λ = 0, α = 1, γ = 1 for a readable trace:
        //   t=1 (last): r = penalty, next vacant  → Q(s1) = -2000
        //   t=0:        r = reward,  next = s1    → Q(s0) = 1 + max_a Q(s1, a)
        // max_a Q(s1) is 0 (the untouched flap estimate), so Q(s0) = 1
        let mut agent = learner(LearnerConfig::default().with_rates(1.0, 1.0));
        let s0 = state(100, 10, -8);
        let s1 = state(60, -10, -7);
        push_history(&mut agent, &[(s0, Action::Fall), (s1, Action::Fall)]);

        agent.learn_from_episode();
        assert!((agent.q_table.get(s1, Action::Fall) - -2000.0).abs() < 1e-9);
        assert!((agent.q_table.get(s0, Action::Fall) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn lambda_window_propagates_the_terminal_penalty() {
        // three steps, λ = 1, α = 1, γ = 1:
        //   t=2: r = penalty; window covers t=2 and t=1, slot slides inward:
        //        Q(s2) = penalty + value(None)  = -2000
        //        Q(s1) = penalty + value(s2)    = -1000 + 0 (flap untouched)
        //   t=1: slot is s1 (earliest state the window touched), r = reward;
        //        window covers t=1 and t=0:
        //        Q(s1) = 1 + value(s1) = 1 + 0       (flap estimate is 0)
        //        Q(s0) = 1 + value(s1) = 1 + 1
        //   t=0: slot is s0, r = reward; window covers t=0 only:
        //        Q(s0) = 1 + value(s0) = 1 + 2
        let mut agent = learner(
            LearnerConfig::default()
                .with_rates(1.0, 1.0)
                .with_lambda(1),
        );
        let s0 = state(200, 40, -5);
        let s1 = state(160, 20, -4);
        let s2 = state(120, 0, -3);
        push_history(
            &mut agent,
            &[(s0, Action::Fall), (s1, Action::Fall), (s2, Action::Fall)],
        );

        agent.learn_from_episode();
        assert!((agent.q_table.get(s2, Action::Fall) - -2000.0).abs() < 1e-9);
        assert!((agent.q_table.get(s1, Action::Fall) - 1.0).abs() < 1e-9);
        assert!((agent.q_table.get(s0, Action::Fall) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn evaluation_mode_skips_updates_but_advances_the_lifecycle() {
        let mut agent = learner(LearnerConfig::default().with_training(false));
        push_history(&mut agent, &[(state(10, 10, 1), Action::Flap)]);
        let report = agent.learn_from_episode();
        assert_eq!(agent.table_size(), 0);
        assert_eq!(report.episode, 1);
        assert!(agent.history.is_empty());
    }

    #[test]
    fn snapshot_and_finish_flags_follow_the_configured_intervals() {
        let mut agent = learner(
            LearnerConfig::default()
                .with_max_episodes(3)
                .with_snapshot_interval(2),
        );
        assert!(!agent.learn_from_episode().snapshot_due);
        let second = agent.learn_from_episode();
        assert!(second.snapshot_due);
        assert!(!second.finished);
        assert!(agent.learn_from_episode().finished);
    }

    #[test]
    fn invalid_rates_are_rejected() {
        assert!(QLearner::new(LearnerConfig::default().with_rates(0.0, 1.0)).is_err());
        assert!(QLearner::new(LearnerConfig::default().with_rates(0.5, 1.5)).is_err());
        assert!(QLearner::new(LearnerConfig::default().with_epsilon(Some(2.0))).is_err());
    }
}
