//! Tilebrain - decision and navigation core for tile-based autonomous agents
//!
//! Each agent owns one [`brain::Brain`]. Every simulation tick the brain
//! updates its room memory, arbitrates between utility modules to pick a
//! behavior, advances a time-sliced path search, and emits the next movement
//! intent for the host's locomotion layer.

pub mod ai;
pub mod brain;
pub mod core;
pub mod diagnostics;
pub mod nav;
pub mod world;
