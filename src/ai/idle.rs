//! Fallback module
//!
//! Claims control at a small constant utility when nothing else wants it.
//! It proposes no destination of its own; the brain falls through to the
//! explorer when the winning module has nowhere to go.

use crate::ai::arbiter::{Behavior, UtilityModule};
use crate::ai::ModuleContext;
use crate::core::types::Destination;

#[derive(Debug, Default)]
pub struct IdleModule;

impl IdleModule {
    pub fn new() -> Self {
        Self
    }
}

impl UtilityModule for IdleModule {
    fn behavior(&self) -> Behavior {
        Behavior::Idle
    }

    fn utility(&self, ctx: &ModuleContext) -> f32 {
        ctx.config.idle_utility
    }

    fn destination(&mut self, _ctx: &ModuleContext) -> Option<Destination> {
        None
    }
}
