//! Distance-to-gap heuristic for informed search

use crate::world::{
    GameState,
    model::{PIPE_GAP_SIZE, PIPE_WIDTH, PLAYER_WIDTH},
};

/// How far the estimate drops per point of score already banked. Large
/// enough to dominate any distance difference between equal-score states,
/// which is what keeps the estimate from overestimating remaining frames.
const SCORE_DOMINANCE: i64 = 1000;

/// Vertical offset from the lower pipe's top edge to the aim point inside
/// the gap (gap center, adjusted for the bird's height)
const GAP_AIM_OFFSET: i32 = -PIPE_GAP_SIZE + 37;

/// Manhattan distance from the bird to the midpoint of the nearest pipe gap
/// still ahead, discounted by the score already banked.
///
/// Returns `None` when no pipe lies ahead of the bird; the estimate is
/// undefined there and callers guard the call. During play that situation
/// cannot arise before the goal, because pipes respawn continuously.
pub fn gap_heuristic(state: &GameState) -> Option<i64> {
    let player_mid = state.x + PLAYER_WIDTH / 2;

    for (upper, lower) in state.upper.iter().zip(&state.lower) {
        let pipe_mid = upper.x + PIPE_WIDTH / 2;
        if pipe_mid > player_mid {
            let aim_y = lower.y + GAP_AIM_OFFSET;
            let distance =
                i64::from((state.y - aim_y).abs()) + i64::from((state.x - pipe_mid).abs());
            return Some(distance - SCORE_DOMINANCE * i64::from(state.score));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Pipe, WorldModel};

    #[test]
    fn start_state_estimate_targets_the_first_pipe() {
        let world = WorldModel::standard();
        let start = world.start();

        let pipe_mid = start.upper[0].x + PIPE_WIDTH / 2;
        let aim_y = start.lower[0].y + GAP_AIM_OFFSET;
        let expected = i64::from((start.y - aim_y).abs()) + i64::from((start.x - pipe_mid).abs());

        assert_eq!(gap_heuristic(&start), Some(expected));
    }

    #[test]
    fn pipes_behind_the_bird_are_skipped() {
        let world = WorldModel::standard();
        let mut state = world.start();
        // first pair already passed; estimate must target the second
        state.upper[0].x = -40;
        state.lower[0].x = -40;

        let pipe_mid = state.upper[1].x + PIPE_WIDTH / 2;
        let aim_y = state.lower[1].y + GAP_AIM_OFFSET;
        let expected = i64::from((state.y - aim_y).abs()) + i64::from((state.x - pipe_mid).abs());

        assert_eq!(gap_heuristic(&state), Some(expected));
    }

    #[test]
    fn undefined_when_no_pipe_is_ahead() {
        let world = WorldModel::standard();
        let mut state = world.start();
        for pipe in state.upper.iter_mut().chain(state.lower.iter_mut()) {
            pipe.x = -100;
        }
        assert_eq!(gap_heuristic(&state), None);
    }

    #[test]
    fn score_term_dominates_distance() {
        let world = WorldModel::standard();
        let mut near = world.start();
        near.upper = vec![Pipe { x: 80, y: -200 }];
        near.lower = vec![Pipe { x: 80, y: 220 }];

        let mut far_but_scored = near.clone();
        far_but_scored.upper[0].x = 280;
        far_but_scored.lower[0].x = 280;
        far_but_scored.score = 1;

        assert!(gap_heuristic(&far_but_scored).unwrap() < gap_heuristic(&near).unwrap());
    }
}
