//! Brain configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

/// Configuration for one agent's brain
///
/// These values have been tuned to produce stable behavior. Changing them
/// affects decision pacing and path quality.
#[derive(Debug, Clone)]
pub struct BrainConfig {
    // === PATH PLANNER ===
    /// Node expansions performed per tick while a search is in flight
    ///
    /// The planner shares the frame with the host simulation, so the search
    /// is time-sliced. At 20 expansions a typical room path completes in a
    /// handful of ticks without a visible frame cost.
    pub expansions_per_tick: usize,

    /// Euclidean distance (tiles) at which a newly opened node counts as
    /// having reached the goal
    pub goal_tolerance: f32,

    /// Distance (tiles) between the agent and the nearest path node beyond
    /// which the follower discards the path and replans
    pub drift_threshold: f32,

    /// Re-issuing a goal is a no-op while the agent is within this distance
    /// of the in-flight search's start tile
    pub same_goal_start_tolerance: f32,

    /// Cost of a jump edge regardless of span
    ///
    /// A flat maneuver cost below the Manhattan heuristic of long jumps;
    /// this is the known admissibility relaxation of the search.
    pub jump_cost: f32,

    // === THREATS ===
    /// Distance (tiles) at which a threat in the same room produces maximum
    /// flee utility; utility falls off linearly to zero at this range
    pub threat_radius: f32,

    /// How long a threat sighting is remembered after it was last seen
    pub threat_memory_ticks: u64,

    /// Remembered threats at which a room counts as fully threatening for
    /// exploration scoring
    pub threat_limit: u32,

    // === FOOD ===
    /// Ticks between food-list refreshes (dropping vanished or unattractive
    /// entries)
    pub food_refresh_interval: u64,

    /// Maximum number of remembered food items; the least attractive entry
    /// is evicted beyond this
    pub max_food_count: usize,

    /// Multiplier applied to the previously chosen food when re-selecting,
    /// so the target does not flap between two similar items
    pub food_persistence: f32,

    /// Distance (tiles) at which a food item's attractiveness reaches zero
    pub discourage_distance: f32,

    /// Estimated tile distance added per room boundary between the agent
    /// and a food item in another room
    pub room_hop_penalty: f32,

    // === RAIN ===
    /// Fraction of the rain cycle at which shelter-seeking utility starts
    /// rising from zero
    pub rain_onset_fraction: f32,

    /// Fraction of the rain cycle at which shelter-seeking utility reaches
    /// its maximum
    pub rain_panic_fraction: f32,

    // === STUCK RECOVERY ===
    /// Length (ticks) of the position window inspected for stuck detection
    pub stuck_window: usize,

    /// Radius (tiles) the agent must leave within the window to not count
    /// as stuck
    pub stuck_radius: f32,

    // === IDLE / EXPLORATION ===
    /// Constant utility of the idle module; keeps the agent exploring when
    /// nothing else wants control while still losing to any real urge
    pub idle_utility: f32,

    /// Attractiveness floor below which the explorer picks a uniformly
    /// random exit instead of a scored one
    pub explore_floor: f32,

    /// Attractiveness multiplier for the candidate room closest to a known
    /// shelter
    pub shelter_bias: f32,

    /// Attractiveness multiplier for the room the agent just departed
    /// (anti-backtrack damping)
    pub backtrack_damping: f32,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            expansions_per_tick: 20,
            goal_tolerance: 2.0,
            drift_threshold: 5.0,
            same_goal_start_tolerance: 5.0,
            jump_cost: 2.0,
            threat_radius: 12.0,
            threat_memory_ticks: 200,
            threat_limit: 2,
            food_refresh_interval: 40,
            max_food_count: 10,
            food_persistence: 1.1,
            discourage_distance: 30.0,
            room_hop_penalty: 30.0,
            rain_onset_fraction: 0.5,
            rain_panic_fraction: 0.9,
            stuck_window: 40,
            stuck_radius: 2.0,
            idle_utility: 0.05,
            explore_floor: 0.2,
            shelter_bias: 1.25,
            backtrack_damping: 0.75,
        }
    }
}
