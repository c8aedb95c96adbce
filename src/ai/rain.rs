//! Rain-cycle shelter seeking

use crate::ai::arbiter::{Behavior, UtilityModule};
use crate::ai::ModuleContext;
use crate::core::types::Destination;

/// Watches the rain cycle and pushes toward shelter as the deadline nears.
///
/// Utility is zero until the onset fraction of the cycle, then ramps
/// linearly to 1.0 at the panic fraction.
#[derive(Debug, Default)]
pub struct RainTracker;

impl RainTracker {
    pub fn new() -> Self {
        Self
    }
}

impl UtilityModule for RainTracker {
    fn behavior(&self) -> Behavior {
        Behavior::EscapeRain
    }

    fn utility(&self, ctx: &ModuleContext) -> f32 {
        let onset = ctx.config.rain_onset_fraction;
        let panic = ctx.config.rain_panic_fraction;
        if panic <= onset {
            return 0.0;
        }
        ((ctx.snapshot.rain_fraction - onset) / (panic - onset)).clamp(0.0, 1.0)
    }

    fn destination(&mut self, ctx: &ModuleContext) -> Option<Destination> {
        ctx.shelter.shelter_target(ctx.world, ctx.snapshot.room)
    }
}
