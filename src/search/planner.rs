//! Fringe-agnostic graph search over the world model
//!
//! One search procedure realizes four strategies purely by swapping the
//! fringe backing and the cost function: stack/DFS, queue/BFS, and the keyed
//! heap with a constant-zero or heuristic cost function for UCS and A*.

use std::collections::HashMap;

use crate::{
    error::Result,
    search::fringe::{Fringe, FringeEntry, FringeKind},
    world::{Action, GameState, Node, WorldModel},
};

/// A successful search: the action path start→goal and the number of
/// frontier pops it took (diagnostic only).
#[derive(Debug, Clone)]
pub struct Solution {
    pub plan: Vec<Action>,
    pub expanded: usize,
}

/// Best-first search driven by a fringe backing and a per-node cost function.
///
/// The visited map records the best cumulative cost found so far per state;
/// physically distinct frames can produce identical state values once pipes
/// recycle, so the state graph is a DAG with merges rather than a tree, and
/// relaxation matters. Costs in the map only ever decrease within one run.
pub struct Planner<'w> {
    world: &'w WorldModel,
    kind: FringeKind,
}

impl<'w> Planner<'w> {
    pub fn new(world: &'w WorldModel, kind: FringeKind) -> Self {
        Self { world, kind }
    }

    /// Uninformed search: constant-zero cost function.
    ///
    /// With the priority backing this is uniform-cost search; with stack or
    /// queue backings the cost function is ignored entirely.
    pub fn search(&self, target_score: u32) -> Result<Option<Solution>> {
        self.search_with(target_score, |_| 0)
    }

    /// Search with an explicit cost function over generated nodes.
    ///
    /// `Ok(None)` means the fringe drained without reaching the target —
    /// "unreachable", a normal outcome the caller must handle.
    pub fn search_with(
        &self,
        target_score: u32,
        cost_fn: impl Fn(&Node) -> i64,
    ) -> Result<Option<Solution>> {
        let mut fringe = Fringe::new(self.kind);
        let mut visited: HashMap<GameState, i64> = HashMap::new();

        let start = self.world.start();
        visited.insert(start.clone(), 0);

        for successor in self.world.successors(&start)? {
            let Some(action) = successor.action else {
                continue;
            };
            let estimate = cost_fn(&successor);
            visited.insert(successor.state.clone(), successor.cost);
            fringe.push(
                FringeEntry {
                    state: successor.state,
                    path: vec![action],
                },
                successor.cost,
                estimate,
            );
        }

        let mut expanded = 0usize;
        while let Some(current) = fringe.pop() {
            expanded += 1;
            if self.world.is_goal(&current.state, target_score) {
                return Ok(Some(Solution {
                    plan: current.path,
                    expanded,
                }));
            }

            // The relaxation is keyed off the parent's recorded cost, and the
            // entry is pushed with that same base; kept bit-for-bit from the
            // reference algorithm rather than normalized to strict Dijkstra.
            let current_cost = visited[&current.state];
            for successor in self.world.successors(&current.state)? {
                let Some(action) = successor.action else {
                    continue;
                };
                let through_parent = current_cost + successor.cost;

                match visited.get(&successor.state) {
                    Some(&recorded) if recorded > through_parent => {
                        let mut path = current.path.clone();
                        path.push(action);
                        let estimate = cost_fn(&successor);
                        visited.insert(successor.state.clone(), through_parent);
                        fringe.push(
                            FringeEntry {
                                state: successor.state,
                                path,
                            },
                            current_cost,
                            estimate,
                        );
                    }
                    Some(_) => {}
                    None => {
                        let mut path = current.path.clone();
                        path.push(action);
                        let estimate = cost_fn(&successor);
                        visited.insert(successor.state.clone(), through_parent);
                        fringe.push(
                            FringeEntry {
                                state: successor.state,
                                path,
                            },
                            current_cost,
                            estimate,
                        );
                    }
                }
            }
        }

        Ok(None)
    }
}
