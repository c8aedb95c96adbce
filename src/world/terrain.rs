//! Tile terrain classification
//!
//! Dense geometry constrains movement - some tiles are only reachable by
//! jumping across open air.

use serde::{Deserialize, Serialize};

/// Terrain classification of a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    /// Impassable wall or ground
    Solid,
    /// Walkable ground
    Floor,
    /// Pole, vine, or other climbable geometry
    Climbable,
    /// In-wall passage (pipes, tunnels)
    Corridor,
    /// Angled ground; enables a jump launch from the tile above it
    Slope,
    /// Outside the room bounds
    OffScreen,
    /// Open space
    #[default]
    Air,
}

impl Terrain {
    /// Can the agent occupy this tile while walking or climbing?
    pub fn is_traversable(&self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Climbable | Terrain::Corridor)
    }

    /// Does this tile end a ballistic jump arc?
    pub fn blocks_jump(&self) -> bool {
        matches!(self, Terrain::Solid | Terrain::OffScreen)
    }

    /// Can a standing jump be launched from this tile?
    pub fn supports_jump_launch(&self) -> bool {
        matches!(self, Terrain::Floor | Terrain::Climbable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn traversability_classification() {
        assert!(Terrain::Floor.is_traversable());
        assert!(Terrain::Climbable.is_traversable());
        assert!(Terrain::Corridor.is_traversable());
        assert!(!Terrain::Slope.is_traversable());
        assert!(!Terrain::Solid.is_traversable());
        assert!(!Terrain::Air.is_traversable());
        assert!(!Terrain::OffScreen.is_traversable());
    }

    #[test]
    fn jump_arcs_pass_through_open_tiles() {
        assert!(!Terrain::Air.blocks_jump());
        assert!(!Terrain::Floor.blocks_jump());
        assert!(Terrain::Solid.blocks_jump());
        assert!(Terrain::OffScreen.blocks_jump());
    }
}
