//! Incremental best-first path search
//!
//! The search is time-sliced: [`Pathfinder::step`] performs a bounded number
//! of expansions and returns, persisting the open/closed sets so the next
//! tick resumes exactly where this one left off. This is ordinary resumable
//! state, not a coroutine.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use ordered_float::NotNan;

use crate::core::config::BrainConfig;
use crate::core::types::{TileCoord, EIGHT_DIRECTIONS};
use crate::nav::graph::{is_tile_traversable, neighbors};
use crate::nav::jump::JumpTable;
use crate::nav::movement::MovementEdge;
use crate::world::map::RoomGeometry;

/// Search lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlannerState {
    #[default]
    NotReady,
    Searching,
    Done,
}

/// Outcome of a search as visible to callers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathResult<'a> {
    Found(&'a [MovementEdge]),
    Unreachable,
    Pending,
}

/// Entry in the open set
///
/// Ordered for a min-heap on `f = g + h` (Manhattan heuristic), ties broken
/// by smaller Euclidean distance to the goal.
#[derive(Debug, Clone, Copy)]
struct OpenNode {
    f: NotNan<f32>,
    tie: NotNan<f32>,
    tile: TileCoord,
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.tie == other.tie
    }
}

impl Eq for OpenNode {}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // reverse order for min-heap
        other.f.cmp(&self.f).then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Resumable A*-style search over the movement graph of one room
#[derive(Debug, Default)]
pub struct Pathfinder {
    state: PlannerState,
    start: TileCoord,
    goal: TileCoord,
    open: BinaryHeap<OpenNode>,
    open_set: AHashSet<TileCoord>,
    closed: AHashSet<TileCoord>,
    g_score: AHashMap<TileCoord, f32>,
    predecessor: AHashMap<TileCoord, MovementEdge>,
    path: Vec<MovementEdge>,
    exhausted: bool,
}

impl Pathfinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlannerState {
        self.state
    }

    pub fn goal(&self) -> TileCoord {
        self.goal
    }

    pub fn path(&self) -> &[MovementEdge] {
        &self.path
    }

    /// Outcome of the current search
    pub fn result(&self) -> PathResult<'_> {
        if self.exhausted {
            return PathResult::Unreachable;
        }
        match self.state {
            PlannerState::Done => PathResult::Found(&self.path),
            _ => PathResult::Pending,
        }
    }

    /// Discard any search in flight, e.g. after the world changed under us
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Sets up the search from `start` (the agent's tile) to `goal`
    ///
    /// Idempotent while a search toward the same goal is in flight and the
    /// agent is still near its start or its expanded frontier; a materially
    /// different goal discards the old open/closed sets outright.
    pub fn set_goal(&mut self, start: TileCoord, goal: TileCoord, config: &BrainConfig) {
        match self.state {
            PlannerState::Searching if goal == self.goal => {
                if start.float_dist(self.start) < config.same_goal_start_tolerance
                    || self.near_expanded(start)
                {
                    return;
                }
            }
            // a finished path toward the same goal stays valid; the drift
            // check in the follower decides when to redo it
            PlannerState::Done if goal == self.goal => return,
            _ => {}
        }

        self.reset(start, goal);
        tracing::debug!(?start, ?goal, "planner set up");
    }

    /// Unconditionally restart the current goal from a new start tile
    pub fn replan(&mut self, from: TileCoord) {
        let goal = self.goal;
        self.reset(from, goal);
        tracing::debug!(?from, ?goal, "planner replanning");
    }

    fn reset(&mut self, start: TileCoord, goal: TileCoord) {
        self.state = PlannerState::Searching;
        self.start = start;
        self.goal = goal;
        self.open.clear();
        self.open_set.clear();
        self.closed.clear();
        self.g_score.clear();
        self.predecessor.clear();
        self.path.clear();
        self.exhausted = false;

        self.g_score.insert(start, 0.0);
        self.push_open(start, 0.0);
    }

    /// Is the agent 8-neighbor-adjacent (at one or two steps) to any tile
    /// the search has already expanded?
    fn near_expanded(&self, agent: TileCoord) -> bool {
        if agent == self.start || self.predecessor.contains_key(&agent) {
            return true;
        }
        EIGHT_DIRECTIONS.iter().any(|&d| {
            self.predecessor.contains_key(&(agent + d))
                || self.predecessor.contains_key(&(agent + d.scaled(2)))
        })
    }

    /// Advances the search by at most `expansions_per_tick` expansions
    pub fn step(&mut self, room: &dyn RoomGeometry, jumps: &JumpTable, config: &BrainConfig) {
        for _ in 0..config.expansions_per_tick {
            if self.state != PlannerState::Searching {
                return;
            }
            self.expand_once(room, jumps, config);
        }
    }

    fn expand_once(&mut self, room: &dyn RoomGeometry, jumps: &JumpTable, config: &BrainConfig) {
        // pop the open tile with lowest f, skipping entries already closed
        let current = loop {
            match self.open.pop() {
                Some(node) if self.closed.contains(&node.tile) => continue,
                Some(node) => break node.tile,
                None => {
                    // open set exhausted before reaching goal tolerance
                    self.exhausted = true;
                    self.state = PlannerState::NotReady;
                    tracing::debug!(goal = %self.goal, "goal unreachable");
                    return;
                }
            }
        };

        self.open_set.remove(&current);
        self.closed.insert(current);
        let g_current = self.g_score.get(&current).copied().unwrap_or(0.0);

        for edge in neighbors(room, jumps, current, config) {
            let tile = edge.to;
            if self.closed.contains(&tile) || self.open_set.contains(&tile) {
                continue;
            }

            self.g_score.insert(tile, g_current + edge.cost);
            self.predecessor.insert(tile, edge);
            self.push_open(tile, g_current + edge.cost);

            if tile.float_dist(self.goal) < config.goal_tolerance {
                self.state = PlannerState::Done;
                self.reconstruct(tile, room);
                tracing::debug!(len = self.path.len(), "planner done");
                return;
            }
        }
    }

    fn push_open(&mut self, tile: TileCoord, g: f32) {
        let h = tile.manhattan_dist(self.goal) as f32;
        self.open.push(OpenNode {
            f: NotNan::new(g + h).unwrap_or_default(),
            tie: NotNan::new(tile.float_dist(self.goal)).unwrap_or_default(),
            tile,
        });
        self.open_set.insert(tile);
    }

    /// Walks predecessor edges backward from `end` to the start, reverses,
    /// then snaps the tail onto the exact goal if the tolerance stop landed
    /// a tile short
    fn reconstruct(&mut self, end: TileCoord, room: &dyn RoomGeometry) {
        let mut edges = Vec::new();
        let mut current = end;
        // bounded by the number of recorded predecessors: no cycles
        let mut guard = self.predecessor.len();

        while current != self.start && guard > 0 {
            let Some(edge) = self.predecessor.get(&current) else {
                break;
            };
            edges.push(*edge);
            current = edge.from;
            guard -= 1;
        }
        edges.reverse();

        let mut tail = end;
        let mut snap_guard = 3;
        while tail != self.goal && snap_guard > 0 {
            let dx = (self.goal.x - tail.x).signum();
            let dy = (self.goal.y - tail.y).signum();
            let step = if dx != 0 {
                TileCoord::new(dx, 0)
            } else {
                TileCoord::new(0, dy)
            };
            let next = tail + step;
            if !is_tile_traversable(room, next) {
                break;
            }
            edges.push(MovementEdge::walk(tail, next));
            tail = next;
            snap_guard -= 1;
        }

        self.path = edges;
    }

    #[cfg(test)]
    pub(crate) fn debug_sets(&self) -> (Vec<TileCoord>, Vec<TileCoord>) {
        let mut open: Vec<TileCoord> = self.open_set.iter().copied().collect();
        let mut closed: Vec<TileCoord> = self.closed.iter().copied().collect();
        open.sort_by_key(|t| (t.x, t.y));
        closed.sort_by_key(|t| (t.x, t.y));
        (open, closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::movement::MovementKind;
    use crate::world::grid::GridRoom;
    use crate::world::terrain::Terrain;

    fn corridor(len: i32) -> GridRoom {
        GridRoom::filled(len, 1, Terrain::Floor)
    }

    #[test]
    fn finishes_a_straight_corridor() {
        let room = corridor(12);
        let config = BrainConfig::default();
        let mut planner = Pathfinder::new();
        planner.set_goal(TileCoord::new(0, 0), TileCoord::new(10, 0), &config);
        planner.step(&room, &JumpTable::standard(), &config);

        assert_eq!(planner.state(), PlannerState::Done);
        let path = planner.path();
        assert_eq!(path.len(), 10);
        assert!(path.iter().all(|e| e.kind == MovementKind::Walk));
        assert_eq!(path.last().unwrap().to, TileCoord::new(10, 0));
    }

    #[test]
    fn search_is_time_sliced() {
        let room = corridor(40);
        let config = BrainConfig {
            expansions_per_tick: 3,
            ..BrainConfig::default()
        };
        let mut planner = Pathfinder::new();
        planner.set_goal(TileCoord::new(0, 0), TileCoord::new(38, 0), &config);

        planner.step(&room, &JumpTable::standard(), &config);
        assert_eq!(planner.state(), PlannerState::Searching);
        assert_eq!(planner.result(), PathResult::Pending);

        for _ in 0..100 {
            if planner.state() != PlannerState::Searching {
                break;
            }
            planner.step(&room, &JumpTable::standard(), &config);
        }
        assert_eq!(planner.state(), PlannerState::Done);
    }

    #[test]
    fn same_goal_reissue_is_a_no_op() {
        let room = corridor(40);
        let config = BrainConfig {
            expansions_per_tick: 4,
            ..BrainConfig::default()
        };
        let mut planner = Pathfinder::new();
        let goal = TileCoord::new(38, 0);
        planner.set_goal(TileCoord::new(0, 0), goal, &config);
        planner.step(&room, &JumpTable::standard(), &config);
        assert_eq!(planner.state(), PlannerState::Searching);

        let before = planner.debug_sets();
        // agent has crept forward a couple of tiles; same goal, near start
        planner.set_goal(TileCoord::new(2, 0), goal, &config);
        assert_eq!(planner.debug_sets(), before);
        assert_eq!(planner.state(), PlannerState::Searching);
    }

    #[test]
    fn reissue_near_expanded_frontier_is_a_no_op() {
        let room = corridor(60);
        let config = BrainConfig {
            expansions_per_tick: 10,
            same_goal_start_tolerance: 5.0,
            ..BrainConfig::default()
        };
        let mut planner = Pathfinder::new();
        let goal = TileCoord::new(58, 0);
        planner.set_goal(TileCoord::new(0, 0), goal, &config);
        planner.step(&room, &JumpTable::standard(), &config);

        let before = planner.debug_sets();
        // 8 tiles out: past the start tolerance, but adjacent to tiles the
        // search has already expanded
        planner.set_goal(TileCoord::new(8, 0), goal, &config);
        assert_eq!(planner.debug_sets(), before);
    }

    #[test]
    fn new_goal_discards_the_old_search() {
        let room = corridor(40);
        let config = BrainConfig {
            expansions_per_tick: 4,
            ..BrainConfig::default()
        };
        let mut planner = Pathfinder::new();
        planner.set_goal(TileCoord::new(0, 0), TileCoord::new(38, 0), &config);
        planner.step(&room, &JumpTable::standard(), &config);

        planner.set_goal(TileCoord::new(0, 0), TileCoord::new(20, 0), &config);
        assert_eq!(planner.goal(), TileCoord::new(20, 0));
        let (open, closed) = planner.debug_sets();
        assert_eq!(open, vec![TileCoord::new(0, 0)]);
        assert!(closed.is_empty());
    }

    #[test]
    fn walled_off_goal_is_unreachable() {
        let mut room = corridor(12);
        room.set(TileCoord::new(5, 0), Terrain::Solid);
        let config = BrainConfig::default();
        let mut planner = Pathfinder::new();
        planner.set_goal(TileCoord::new(0, 0), TileCoord::new(10, 0), &config);

        for _ in 0..50 {
            if planner.state() != PlannerState::Searching {
                break;
            }
            planner.step(&room, &JumpTable::standard(), &config);
        }
        assert_eq!(planner.result(), PathResult::Unreachable);
        assert_eq!(planner.state(), PlannerState::NotReady);
    }

    #[test]
    fn done_same_goal_keeps_the_path() {
        let room = corridor(12);
        let config = BrainConfig::default();
        let mut planner = Pathfinder::new();
        planner.set_goal(TileCoord::new(0, 0), TileCoord::new(10, 0), &config);
        planner.step(&room, &JumpTable::standard(), &config);
        assert_eq!(planner.state(), PlannerState::Done);
        let len = planner.path().len();

        planner.set_goal(TileCoord::new(3, 0), TileCoord::new(10, 0), &config);
        assert_eq!(planner.state(), PlannerState::Done);
        assert_eq!(planner.path().len(), len);
    }
}
