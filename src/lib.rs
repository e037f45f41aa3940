//! Collision grids extracted from tile-map editor JSON exports
//!
//! Maps are fetched by name from a [`io::source::JsonSource`]; every layer named
//! `Collision:<index>` is decoded, from chunked or flat cell data, into a bounded
//! origin-offset grid whose writes pass through a tile id to collision class
//! mapping.

#![forbid(unsafe_code)]

/// Input/output operations and error handling
pub mod io;
/// Bounded grids, cell data decoding and collision mapping
pub mod spatial;
/// Map loading, layers and multi-map management
pub mod world;

pub use io::error::{MapError, Result};
pub use io::source::{DirectorySource, JsonSource, MemorySource};
pub use spatial::{CellData, Chunk, CollisionGrid, CollisionMap, Grid};
pub use world::{Layer, MapManager, World};
