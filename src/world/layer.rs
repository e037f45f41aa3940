//! Indexed collision layers

use crate::spatial::collision::CollisionGrid;

/// A collision grid at a stacking index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    index: u32,
    collisions: CollisionGrid,
}

impl Layer {
    /// Create a layer holding an empty (single cell) collision grid
    pub fn new(index: u32) -> Self {
        Self {
            index,
            collisions: CollisionGrid::empty(),
        }
    }

    /// Stacking index of this layer
    pub const fn index(&self) -> u32 {
        self.index
    }

    /// The current collision grid
    pub const fn collisions(&self) -> &CollisionGrid {
        &self.collisions
    }

    /// Replace the collision grid wholesale, discarding the previous one
    pub fn set_collisions(&mut self, grid: CollisionGrid) {
        self.collisions = grid;
    }
}
