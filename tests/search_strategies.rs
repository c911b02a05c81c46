//! Cross-strategy search properties: one search procedure, four strategies,
//! and the informed one never loses.

use fledge::{Action, FringeKind, Planner, WorldModel, gap_heuristic};

fn solve(world: &WorldModel, kind: FringeKind, informed: bool, target: u32) -> Vec<Action> {
    let planner = Planner::new(world, kind);
    let solution = if informed {
        planner.search_with(target, |node| gap_heuristic(&node.state).unwrap_or(0))
    } else {
        planner.search(target)
    };
    solution
        .expect("search must not fail")
        .expect("target must be reachable")
        .plan
}

fn replay_score(world: &WorldModel, plan: &[Action]) -> u32 {
    // intermediate states are never crashed (crashed states have no
    // successors, so only a path's final state can be terminal)
    let mut state = world.start();
    for (frame, &action) in plan.iter().enumerate() {
        assert!(!state.crashed, "plan crashed before frame {frame}");
        state = world.step(&state, action).unwrap();
    }
    state.score
}

#[test]
fn astar_is_never_longer_than_uninformed_strategies() {
    let world = WorldModel::standard();

    let astar = solve(&world, FringeKind::Priority, true, 1);
    let bfs = solve(&world, FringeKind::Queue, false, 1);
    let dfs = solve(&world, FringeKind::Stack, false, 1);

    assert!(astar.len() <= bfs.len());
    assert!(astar.len() <= dfs.len());

    // every strategy returns a feasible plan
    assert_eq!(replay_score(&world, &astar), 1);
    assert_eq!(replay_score(&world, &bfs), 1);
    assert_eq!(replay_score(&world, &dfs), 1);
}

#[test]
fn ucs_matches_bfs_on_unit_costs() {
    let world = WorldModel::standard();
    let ucs = solve(&world, FringeKind::Priority, false, 1);
    let bfs = solve(&world, FringeKind::Queue, false, 1);
    assert_eq!(ucs.len(), bfs.len());
}

#[test]
fn the_plan_scores_exactly_on_its_final_frame() {
    let world = WorldModel::standard();
    let plan = solve(&world, FringeKind::Priority, true, 1);

    let mut state = world.start();
    for (frame, &action) in plan.iter().enumerate() {
        assert_eq!(state.score, 0, "scored before frame {frame}");
        state = world.step(&state, action).unwrap();
    }
    assert_eq!(state.score, 1);
}

#[test]
fn a_two_pipe_target_extends_the_one_pipe_plan() {
    let world = WorldModel::standard();
    let one = solve(&world, FringeKind::Priority, true, 1);
    let two = solve(&world, FringeKind::Priority, true, 2);
    assert!(two.len() > one.len());
    assert_eq!(replay_score(&world, &two), 2);
}
