//! Collision grids: grids whose writes translate tile ids into collision classes

use std::collections::HashMap;
use std::sync::Arc;

use crate::spatial::grid::{Cell, Grid, ValueMap};

/// Tile id to collision class translation applied when a collision grid is written
///
/// With no classes registered this is the identity. Ids without a registered
/// class are stored unchanged. The table is shared, so cloning a map (or a grid
/// holding one) does not copy the classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionMap {
    classes: Arc<HashMap<Cell, Cell>>,
}

impl CollisionMap {
    /// The identity mapping
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build a mapping from `(tile_id, collision_class)` pairs
    ///
    /// Later pairs override earlier ones for the same tile id.
    pub fn from_classes<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = (Cell, Cell)>,
    {
        Self {
            classes: Arc::new(classes.into_iter().collect()),
        }
    }

    /// Check if every id maps to itself
    pub fn is_identity(&self) -> bool {
        self.classes.iter().all(|(tile, class)| tile == class)
    }

    /// Number of registered tile ids
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if no tile ids are registered
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ValueMap for CollisionMap {
    fn map(&self, value: Cell) -> Cell {
        self.classes.get(&value).copied().unwrap_or(value)
    }
}

/// Grid storing collision classes
pub type CollisionGrid = Grid<CollisionMap>;

impl Grid<CollisionMap> {
    /// The extent-0 collision grid at the origin (a single zero cell)
    pub fn empty() -> Self {
        Self::single_cell(CollisionMap::identity())
    }
}
