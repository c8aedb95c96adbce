//! Path following
//!
//! Maps the agent's live tile onto the nearest point of the last completed
//! path and emits the next edge, or asks the planner to redo the path when
//! the agent has drifted too far off it.

use crate::core::config::BrainConfig;
use crate::core::types::TileCoord;
use crate::nav::movement::MovementEdge;
use crate::nav::planner::{Pathfinder, PlannerState};

/// Next movement intent along the planner's current path
///
/// Returns the hold edge when there is no path, when the remaining path is
/// exhausted, or for the tick in which a drift-triggered replan starts.
pub fn follow_path(
    planner: &mut Pathfinder,
    agent: TileCoord,
    config: &BrainConfig,
) -> MovementEdge {
    let path = planner.path();
    if path.is_empty() {
        return MovementEdge::hold(agent);
    }

    // node i is path[i].from for i < len, and the final edge's target at len
    let node_count = path.len() + 1;
    let node = |i: usize| -> TileCoord {
        if i < path.len() {
            path[i].from
        } else {
            path[path.len() - 1].to
        }
    };

    let mut nearest = 0;
    let mut shortest = f32::INFINITY;
    for i in 0..node_count {
        let d = node(i).float_dist(agent);
        if d < shortest {
            nearest = i;
            shortest = d;
        }
    }

    // too far from the path: redo it unless a search is already running
    if shortest > config.drift_threshold && planner.state() != PlannerState::Searching {
        tracing::debug!(drift = shortest, "agent drifted off path, replanning");
        planner.replan(agent);
        return MovementEdge::hold(agent);
    }

    if nearest < path.len() {
        path[nearest]
    } else {
        MovementEdge::hold(agent)
    }
}
