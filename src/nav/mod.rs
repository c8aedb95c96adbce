//! Movement graph, jump simulation, and the time-sliced path search

pub mod follower;
pub mod graph;
pub mod jump;
pub mod movement;
pub mod planner;

pub use follower::follow_path;
pub use graph::{is_tile_traversable, jump_edges, neighbors, walk_neighbors};
pub use jump::{can_reach_by_jump, simulate, JumpKind, JumpProfile, JumpTable};
pub use movement::{MovementEdge, MovementKind};
pub use planner::{PathResult, Pathfinder, PlannerState};
