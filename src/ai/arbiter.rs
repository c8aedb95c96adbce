//! Utility arbitration - the behavior state machine
//!
//! Every registered module scores its urge in [0, 1]; the arbiter compares
//! weighted scores with hysteresis damping so two modules with close
//! utilities do not flap control back and forth.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::ai::ModuleContext;
use crate::core::types::{Destination, ObjectId};
use crate::world::memory::RoomRepresentation;

/// The single externally visible decision state
///
/// Fully connected: any behavior can follow any other, driven only by
/// arbitration. Doubles as the module id for the tuning side table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Behavior {
    #[default]
    Idle,
    Flee,
    Hunt,
    EscapeRain,
    GetUnstuck,
}

/// Per-module arbitration tunables, held beside the modules rather than
/// inside them
#[derive(Debug, Clone, Copy)]
pub struct ModuleTuning {
    pub base_weight: f32,
    /// Multiplier the currently selected module carries; an inactive
    /// challenger must beat the damped incumbent to take over
    pub rising_multiplier: f32,
}

impl Default for ModuleTuning {
    fn default() -> Self {
        Self { base_weight: 1.0, rising_multiplier: 1.1 }
    }
}

/// Capability interface of one behavior scorer
pub trait UtilityModule {
    /// Which behavior this module drives; also its id in the tuning table
    fn behavior(&self) -> Behavior;

    /// Normalized desirability in [0, 1]
    fn utility(&self, ctx: &ModuleContext) -> f32;

    /// Preferred destination when selected; `None` defers to the explorer
    fn destination(&mut self, ctx: &ModuleContext) -> Option<Destination>;

    fn on_tick(&mut self, _ctx: &ModuleContext) {}

    fn on_new_room(&mut self, _ctx: &ModuleContext) {}

    fn update_room_representation(&mut self, _rep: &mut RoomRepresentation) {}

    fn on_food_consumed(&mut self, _id: ObjectId) {}
}

/// Holds the module set and picks the dominant one each tick
pub struct UtilityArbiter {
    modules: Vec<Box<dyn UtilityModule>>,
    tuning: AHashMap<Behavior, ModuleTuning>,
    current: Behavior,
}

impl UtilityArbiter {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            tuning: AHashMap::new(),
            current: Behavior::Idle,
        }
    }

    pub fn register(&mut self, module: Box<dyn UtilityModule>, tuning: ModuleTuning) {
        self.tuning.insert(module.behavior(), tuning);
        self.modules.push(module);
    }

    pub fn current(&self) -> Behavior {
        self.current
    }

    /// Weighted, hysteresis-damped comparison of all registered modules
    ///
    /// The winner becomes the new behavior; ties keep the incumbent, and a
    /// winner whose raw utility is exactly zero yields `Idle` regardless of
    /// weighting.
    pub fn evaluate(&mut self, ctx: &ModuleContext) -> Behavior {
        let mut best: Option<(Behavior, f32, f32)> = None;

        for module in &self.modules {
            let behavior = module.behavior();
            let utility = module.utility(ctx).clamp(0.0, 1.0);
            let tuning = self.tuning.get(&behavior).copied().unwrap_or_default();

            let multiplier = if behavior == self.current {
                tuning.rising_multiplier
            } else {
                1.0
            };
            let weighted = utility * tuning.base_weight * multiplier;

            let take = match best {
                None => true,
                Some((_, best_weighted, _)) => {
                    weighted > best_weighted
                        || (weighted == best_weighted && behavior == self.current)
                }
            };
            if take {
                best = Some((behavior, weighted, utility));
            }
        }

        self.current = match best {
            Some((_, _, utility)) if utility == 0.0 => Behavior::Idle,
            Some((behavior, _, _)) => behavior,
            None => Behavior::Idle,
        };
        self.current
    }

    /// Destination preferred by the currently selected module
    pub fn destination(&mut self, ctx: &ModuleContext) -> Option<Destination> {
        let current = self.current;
        self.modules
            .iter_mut()
            .find(|m| m.behavior() == current)
            .and_then(|m| m.destination(ctx))
    }

    pub fn on_tick(&mut self, ctx: &ModuleContext) {
        for module in &mut self.modules {
            module.on_tick(ctx);
        }
    }

    pub fn on_new_room(&mut self, ctx: &ModuleContext) {
        for module in &mut self.modules {
            module.on_new_room(ctx);
        }
    }

    pub fn update_room_representation(&mut self, rep: &mut RoomRepresentation) {
        for module in &mut self.modules {
            module.update_room_representation(rep);
        }
    }

    pub fn on_food_consumed(&mut self, id: ObjectId) {
        for module in &mut self.modules {
            module.on_food_consumed(id);
        }
    }
}

impl Default for UtilityArbiter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::AgentSnapshot;
    use crate::core::config::BrainConfig;
    use crate::core::types::RoomId;
    use crate::world::grid::GridWorld;

    struct FixedModule {
        behavior: Behavior,
        utility: f32,
    }

    impl UtilityModule for FixedModule {
        fn behavior(&self) -> Behavior {
            self.behavior
        }

        fn utility(&self, _ctx: &ModuleContext) -> f32 {
            self.utility
        }

        fn destination(&mut self, _ctx: &ModuleContext) -> Option<Destination> {
            None
        }
    }

    fn test_ctx<'a>(
        snapshot: &'a AgentSnapshot,
        world: &'a GridWorld,
        config: &'a BrainConfig,
        shelter: &'a crate::ai::ShelterFinder,
    ) -> ModuleContext<'a> {
        ModuleContext { snapshot, world, config, shelter, tick: 0 }
    }

    fn evaluate_two(active_utility: f32, challenger_utility: f32) -> Behavior {
        let mut arbiter = UtilityArbiter::new();
        arbiter.register(
            Box::new(FixedModule { behavior: Behavior::Flee, utility: active_utility }),
            ModuleTuning { base_weight: 1.0, rising_multiplier: 1.1 },
        );
        arbiter.register(
            Box::new(FixedModule { behavior: Behavior::Hunt, utility: challenger_utility }),
            ModuleTuning { base_weight: 1.0, rising_multiplier: 1.1 },
        );
        arbiter.current = Behavior::Flee;

        let snapshot = AgentSnapshot::stationary(RoomId(0));
        let world = GridWorld::new();
        let config = BrainConfig::default();
        let shelter = crate::ai::ShelterFinder::new();
        arbiter.evaluate(&test_ctx(&snapshot, &world, &config, &shelter))
    }

    #[test]
    fn hysteresis_keeps_close_incumbent() {
        // incumbent 0.90 * 1.1 = 0.99 beats challenger 0.95 * 1.0
        assert_eq!(evaluate_two(0.90, 0.95), Behavior::Flee);
    }

    #[test]
    fn clear_challenger_takes_over() {
        // 0.90 * 1.1 = 0.99 < 1.0
        assert_eq!(evaluate_two(0.90, 1.0), Behavior::Hunt);
    }

    #[test]
    fn zero_utility_winner_idles() {
        assert_eq!(evaluate_two(0.0, 0.0), Behavior::Idle);
    }

    #[test]
    fn empty_arbiter_idles() {
        let mut arbiter = UtilityArbiter::new();
        let snapshot = AgentSnapshot::stationary(RoomId(0));
        let world = GridWorld::new();
        let config = BrainConfig::default();
        let shelter = crate::ai::ShelterFinder::new();
        let behavior = arbiter.evaluate(&test_ctx(&snapshot, &world, &config, &shelter));
        assert_eq!(behavior, Behavior::Idle);
    }
}
