//! Utility modules and the arbiter that picks between them

pub mod arbiter;
pub mod idle;
pub mod rain;
pub mod shelter;
pub mod stuck;
pub mod threat;
pub mod treats;

pub use arbiter::{Behavior, ModuleTuning, UtilityArbiter, UtilityModule};
pub use idle::IdleModule;
pub use rain::RainTracker;
pub use shelter::ShelterFinder;
pub use stuck::StuckTracker;
pub use threat::ThreatTracker;
pub use treats::TreatTracker;

use crate::brain::AgentSnapshot;
use crate::core::config::BrainConfig;
use crate::core::types::Tick;
use crate::world::map::WorldMap;

/// Read-only view handed to utility modules each tick
pub struct ModuleContext<'a> {
    pub snapshot: &'a AgentSnapshot,
    pub world: &'a dyn WorldMap,
    pub config: &'a BrainConfig,
    pub shelter: &'a ShelterFinder,
    pub tick: Tick,
}
