//! Ballistic jump simulation
//!
//! Jump reachability is computed by integrating a discrete trajectory from a
//! launch tile until it hits blocking terrain. The integration is a pure
//! function of the profile tables and room geometry, so identical inputs
//! always yield identical edges.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::{TileCoord, Vec2};
use crate::nav::movement::{MovementEdge, MovementKind};
use crate::world::map::RoomGeometry;
use crate::world::terrain::Terrain;

/// Safety cap on integration length; generous compared to any real arc
const MAX_SIM_FRAMES: usize = 128;

/// Named jump maneuver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JumpKind {
    Standard,
}

/// Initial velocity and frame-indexed vertical acceleration of one jump
///
/// Frame `i` uses `vertical_accelerations[min(i, len - 1)]`; the last entry
/// repeats for the remainder of the arc.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpProfile {
    pub kind: JumpKind,
    pub horizontal_velocity: f32,
    pub vertical_accelerations: Vec<f32>,
}

impl JumpProfile {
    /// The tuned standard jump
    pub fn standard() -> Self {
        Self {
            kind: JumpKind::Standard,
            horizontal_velocity: 4.0,
            vertical_accelerations: vec![0.0, 5.5, 3.77, 1.36, 0.66, -0.01, -0.69, -1.36, -1.35],
        }
    }

    fn acceleration(&self, frame: usize) -> f32 {
        let i = frame.min(self.vertical_accelerations.len() - 1);
        self.vertical_accelerations[i]
    }

    /// Can this jump be launched from the given tile?
    pub fn launch_valid(&self, room: &dyn RoomGeometry, tile: TileCoord) -> bool {
        if !room.in_bounds(tile) {
            return false;
        }
        match self.kind {
            JumpKind::Standard => {
                room.terrain(tile).supports_jump_launch()
                    || room.terrain(tile + TileCoord::new(0, -1)) == Terrain::Slope
            }
        }
    }
}

/// The static set of jump profiles available to an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JumpTable {
    profiles: Vec<JumpProfile>,
}

impl JumpTable {
    /// Table holding only the standard jump
    pub fn standard() -> Self {
        Self { profiles: vec![JumpProfile::standard()] }
    }

    /// Loads profiles from JSON, e.g. for host-supplied tuning
    pub fn from_json(json: &str) -> crate::core::error::Result<Self> {
        let table: JumpTable = serde_json::from_str(json)?;
        if table.profiles.is_empty() {
            return Err(crate::core::error::BrainError::InvalidJumpTable(
                "no profiles defined".into(),
            ));
        }
        for profile in &table.profiles {
            if profile.vertical_accelerations.is_empty() {
                return Err(crate::core::error::BrainError::InvalidJumpTable(format!(
                    "profile {:?} has an empty acceleration table",
                    profile.kind
                )));
            }
        }
        Ok(table)
    }

    pub fn profiles(&self) -> &[JumpProfile] {
        &self.profiles
    }
}

impl Default for JumpTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Integrates one jump profile from a launch tile in both horizontal
/// directions, yielding an edge for every passable tile the arc visits
///
/// The arc ends the first time it enters blocking terrain (solid or
/// off-screen). Duplicate landing tiles are emitted once.
pub fn simulate(
    room: &dyn RoomGeometry,
    launch: TileCoord,
    profile: &JumpProfile,
    cost: f32,
) -> Vec<MovementEdge> {
    let mut edges = Vec::new();
    let mut seen: AHashSet<TileCoord> = AHashSet::new();
    seen.insert(launch);

    for direction in [1.0f32, -1.0] {
        let vx = profile.horizontal_velocity * direction;
        let mut vy = 0.0f32;
        let mut pos = launch.to_world();

        for frame in 0..MAX_SIM_FRAMES {
            vy += profile.acceleration(frame);
            pos = pos + Vec2::new(vx, vy);

            let tile = TileCoord::from_world(pos);
            if room.terrain(tile).blocks_jump() {
                break;
            }
            if seen.insert(tile) {
                edges.push(MovementEdge {
                    from: launch,
                    to: tile,
                    kind: MovementKind::Jump(profile.kind),
                    cost,
                });
            }
        }
    }

    edges
}

/// Is `to` reachable from `from` by any launchable jump?
pub fn can_reach_by_jump(
    room: &dyn RoomGeometry,
    jumps: &JumpTable,
    from: TileCoord,
    to: TileCoord,
) -> Option<JumpKind> {
    for profile in jumps.profiles() {
        if !profile.launch_valid(room, from) {
            continue;
        }
        if simulate(room, from, profile, 0.0).iter().any(|e| e.to == to) {
            return Some(profile.kind);
        }
    }
    None
}
