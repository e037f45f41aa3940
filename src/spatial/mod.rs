//! Spatial data structures for collision lookup
//!
//! This module contains spatial-related functionality including:
//! - Bounded, origin-offset grids with bounds-checked access
//! - Chunked and flat cell data ingestion
//! - Collision grids with tile id to collision class mapping

/// Chunked and flat cell data decoding
pub mod chunk;
/// Collision class mapping and the collision grid type
pub mod collision;
/// Bounded grid storage and write-time value transforms
pub mod grid;

pub use chunk::{CellData, Chunk};
pub use collision::{CollisionGrid, CollisionMap};
pub use grid::{Cell, Grid, Identity, ValueMap};
