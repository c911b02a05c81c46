//! Deterministic world transition model
//!
//! One fixed frame of game time per transition: apply the chosen action,
//! integrate vertical motion, scroll the pipes, and resolve collisions and
//! scoring. The same model backs both the planner (via [`WorldModel::successors`])
//! and the learning loop (via [`WorldModel::step`]), so a plan found by
//! search replays frame-for-frame in the learner's world.

use crate::{
    error::{Error, Result},
    ports::collision::{CollisionOracle, PixelMask, Rect},
    world::{
        pipes::PipeSchedule,
        state::{Action, GameState, Node},
    },
};

pub const SCREEN_WIDTH: i32 = 288;
pub const SCREEN_HEIGHT: i32 = 512;
pub const PLAYER_WIDTH: i32 = 34;
pub const PLAYER_HEIGHT: i32 = 24;
pub const PIPE_WIDTH: i32 = 52;
pub const PIPE_HEIGHT: i32 = 320;
pub const PIPE_GAP_SIZE: i32 = 100;
/// Ground line; the playfield floor sits at 79% of the screen height
pub const GROUND_Y: i32 = SCREEN_HEIGHT * 79 / 100;
/// Max descend speed
pub const MAX_FALL_SPEED: i32 = 10;
/// Vertical velocity set on a flap
pub const FLAP_IMPULSE: i32 = -9;
/// Downward acceleration per fall frame
pub const GRAVITY: i32 = 1;
/// Horizontal pipe movement per frame
pub const PIPE_SPEED: i32 = -4;
/// Flapping is ignored above this bound
pub const CEILING_Y: i32 = -2 * PLAYER_HEIGHT;

/// Pixel-occupancy masks for every sprite the model collides
#[derive(Debug, Clone)]
pub struct SpriteMasks {
    /// One mask per bird animation frame
    pub player: [PixelMask; 3],
    /// Upper (flipped) and lower pipe masks
    pub pipe: [PixelMask; 2],
}

impl SpriteMasks {
    /// Fully-opaque masks at the sprite dimensions.
    ///
    /// Real sprite alpha masks are produced outside the core; solid masks
    /// make the oracle equivalent to rectangle overlap, which is what the
    /// planner and tests run against.
    pub fn solid() -> Self {
        let player = PixelMask::solid(PLAYER_WIDTH as usize, PLAYER_HEIGHT as usize);
        let pipe = PixelMask::solid(PIPE_WIDTH as usize, PIPE_HEIGHT as usize);
        Self {
            player: [player.clone(), player.clone(), player],
            pipe: [pipe.clone(), pipe],
        }
    }
}

/// Deterministic transition function over [`GameState`] values.
///
/// Owns the pipe-gap schedule and the collision machinery; the ambient
/// globals of the original arcade loop become fields here, so two models
/// with equal inputs behave identically.
pub struct WorldModel {
    schedule: PipeSchedule,
    masks: SpriteMasks,
    oracle: Box<dyn CollisionOracle>,
}

impl WorldModel {
    pub fn new(schedule: PipeSchedule, masks: SpriteMasks, oracle: Box<dyn CollisionOracle>) -> Self {
        Self {
            schedule,
            masks,
            oracle,
        }
    }

    /// The standard world: 450-pipe schedule, solid masks, pixel oracle
    pub fn standard() -> Self {
        Self::new(
            PipeSchedule::standard(),
            SpriteMasks::solid(),
            Box::new(crate::adapters::PixelOracle),
        )
    }

    pub fn schedule(&self) -> &PipeSchedule {
        &self.schedule
    }

    /// Fixed deterministic initial state.
    ///
    /// No randomness: repeated plans and episodes start from value-equal
    /// states. The first two schedule entries are already on screen (ahead of
    /// the bird), so the cursor starts at 2.
    pub fn start(&self) -> GameState {
        let (first_upper, first_lower) = self.schedule.pair_at(0, SCREEN_WIDTH + 200);
        let (second_upper, second_lower) = self
            .schedule
            .pair_at(1, SCREEN_WIDTH + 200 + SCREEN_WIDTH / 2);

        GameState {
            score: 0,
            x: SCREEN_WIDTH / 5,
            y: (SCREEN_HEIGHT - PLAYER_HEIGHT) / 2,
            vel_y: FLAP_IMPULSE,
            acc_y: GRAVITY,
            sprite_index: 0,
            pipe_cursor: 2,
            crashed: false,
            upper: vec![first_upper, second_upper],
            lower: vec![first_lower, second_lower],
        }
    }

    /// All children of a non-terminal state, one per legal action.
    ///
    /// A crashed state is terminal and has no successors. The flap branch is
    /// dropped entirely when the bird is already above the ceiling bound, so
    /// the result holds 0, 1, or 2 nodes.
    pub fn successors(&self, state: &GameState) -> Result<Vec<Node>> {
        if state.crashed {
            return Ok(Vec::new());
        }

        let mut children = Vec::with_capacity(2);
        for action in Action::ALL {
            if action == Action::Flap && state.y <= CEILING_Y {
                continue;
            }
            children.push(Node::new(self.advance(state, action)?, action));
        }
        Ok(children)
    }

    /// Apply one action to a non-terminal state.
    ///
    /// A flap above the ceiling bound is a defined no-op and degrades to a
    /// fall frame.
    pub fn step(&self, state: &GameState, action: Action) -> Result<GameState> {
        let effective = if action == Action::Flap && state.y <= CEILING_Y {
            Action::Fall
        } else {
            action
        };
        self.advance(state, effective)
    }

    pub fn is_goal(&self, state: &GameState, target_score: u32) -> bool {
        state.score == target_score
    }

    fn advance(&self, state: &GameState, action: Action) -> Result<GameState> {
        let mut next = state.clone();

        match action {
            Action::Flap => next.vel_y = FLAP_IMPULSE,
            Action::Fall => {
                if next.vel_y < MAX_FALL_SPEED {
                    next.vel_y += next.acc_y;
                }
            }
        }

        // vertical motion, clamped at the ground
        next.y += next.vel_y.min(GROUND_Y - next.y - PLAYER_HEIGHT);

        for pipe in next.upper.iter_mut().chain(next.lower.iter_mut()) {
            pipe.x += PIPE_SPEED;
        }

        if self.check_crash(&next)? {
            next.crashed = true;
        }

        // score when the bird's midpoint crosses a pipe midpoint; the window
        // is one frame wide (pipes move PIPE_SPEED per frame)
        let player_mid = next.x + PLAYER_WIDTH / 2;
        for pipe in &next.upper {
            let pipe_mid = pipe.x + PIPE_WIDTH / 2;
            if pipe_mid <= player_mid && player_mid < pipe_mid + 4 {
                next.score += 1;
            }
        }

        // spawn the next pair once the lead pipe nears the left edge
        if let Some(lead) = next.upper.first()
            && 0 < lead.x
            && lead.x < 5
        {
            let (upper, lower) = self.schedule.pair(next.pipe_cursor);
            next.pipe_cursor += 1;
            next.upper.push(upper);
            next.lower.push(lower);
        }

        // drop the lead pair once fully off screen
        if next.upper.first().is_some_and(|lead| lead.x < -PIPE_WIDTH) {
            next.upper.remove(0);
            next.lower.remove(0);
        }

        Ok(next)
    }

    fn check_crash(&self, state: &GameState) -> Result<bool> {
        if state.y + PLAYER_HEIGHT >= GROUND_Y - 1 {
            return Ok(true);
        }

        let player_mask = self
            .masks
            .player
            .get(state.sprite_index as usize)
            .ok_or(Error::InvalidSpriteIndex {
                index: state.sprite_index as usize,
                max: self.masks.player.len() - 1,
            })?;
        let player_rect = Rect::new(state.x, state.y, PLAYER_WIDTH, PLAYER_HEIGHT);

        for (upper, lower) in state.upper.iter().zip(&state.lower) {
            let upper_rect = Rect::new(upper.x, upper.y, PIPE_WIDTH, PIPE_HEIGHT);
            let lower_rect = Rect::new(lower.x, lower.y, PIPE_WIDTH, PIPE_HEIGHT);

            if self
                .oracle
                .masks_overlap(player_rect, upper_rect, player_mask, &self.masks.pipe[0])
                || self
                    .oracle
                    .masks_overlap(player_rect, lower_rect, player_mask, &self.masks.pipe[1])
            {
                return Ok(true);
            }
        }

        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> WorldModel {
        WorldModel::standard()
    }

    #[test]
    fn start_is_deterministic() {
        let world = world();
        assert_eq!(world.start(), world.start());
    }

    #[test]
    fn start_matches_fixed_layout() {
        let start = world().start();
        assert_eq!(start.x, 57);
        assert_eq!(start.y, 244);
        assert_eq!(start.vel_y, FLAP_IMPULSE);
        assert_eq!(start.pipe_cursor, 2);
        assert_eq!(start.upper.len(), 2);
        assert_eq!(start.upper[0].x, 488);
        assert_eq!(start.upper[1].x, 632);
    }

    #[test]
    fn crashed_state_has_no_successors() {
        let world = world();
        let mut state = world.start();
        state.crashed = true;
        assert!(world.successors(&state).unwrap().is_empty());
    }

    #[test]
    fn fall_successor_gains_gravity() {
        let world = world();
        let start = world.start();
        let children = world.successors(&start).unwrap();
        let fall = children
            .iter()
            .find(|n| n.action == Some(Action::Fall))
            .unwrap();
        assert_eq!(fall.state.vel_y, start.vel_y + GRAVITY);
    }

    #[test]
    fn flap_successor_resets_velocity() {
        let world = world();
        let children = world.successors(&world.start()).unwrap();
        let flap = children
            .iter()
            .find(|n| n.action == Some(Action::Flap))
            .unwrap();
        assert_eq!(flap.state.vel_y, FLAP_IMPULSE);
    }

    #[test]
    fn no_flap_child_above_the_ceiling() {
        let world = world();
        let mut state = world.start();
        state.y = CEILING_Y;
        let children = world.successors(&state).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].action, Some(Action::Fall));
    }

    #[test]
    fn step_flap_above_ceiling_degrades_to_fall() {
        let world = world();
        let mut state = world.start();
        state.y = CEILING_Y - 10;
        let stepped = world.step(&state, Action::Flap).unwrap();
        let fallen = world.step(&state, Action::Fall).unwrap();
        assert_eq!(stepped, fallen);
    }

    #[test]
    fn fall_speed_is_capped() {
        let world = world();
        let mut state = world.start();
        state.vel_y = MAX_FALL_SPEED;
        let next = world.step(&state, Action::Fall).unwrap();
        assert_eq!(next.vel_y, MAX_FALL_SPEED);
    }

    #[test]
    fn pipes_scroll_left_every_frame() {
        let world = world();
        let start = world.start();
        let next = world.step(&start, Action::Fall).unwrap();
        assert_eq!(next.upper[0].x, start.upper[0].x + PIPE_SPEED);
        assert_eq!(next.lower[1].x, start.lower[1].x + PIPE_SPEED);
    }

    #[test]
    fn grounding_crashes_the_bird() {
        let world = world();
        let mut state = world.start();
        state.y = GROUND_Y - PLAYER_HEIGHT - 2;
        state.vel_y = MAX_FALL_SPEED;
        let next = world.step(&state, Action::Fall).unwrap();
        assert!(next.crashed);
        assert!(world.successors(&next).unwrap().is_empty());
    }

    #[test]
    fn lead_pipe_spawn_and_despawn() {
        let world = world();
        let mut state = world.start();
        // place the lead pipe just before the spawn window
        for pipe in state.upper.iter_mut().chain(state.lower.iter_mut()) {
            pipe.x = 8;
        }
        state.y = 100; // clear of the pipes
        let next = world.step(&state, Action::Flap).unwrap();
        assert_eq!(next.upper.len(), 3, "a pair spawns when the lead nears 0");
        assert_eq!(next.pipe_cursor, state.pipe_cursor + 1);

        // drive the lead pair off screen
        let mut state = next;
        for pipe in state.upper.iter_mut().chain(state.lower.iter_mut()) {
            pipe.x -= 60;
        }
        let next = world.step(&state, Action::Flap).unwrap();
        assert_eq!(next.upper.len(), 2, "the lead pair drops once off screen");
    }
}
