//! Map loading and collision layer management
//!
//! This module contains map-related functionality including:
//! - Raw map document parsing
//! - Collision layers keyed by stacking index
//! - Worlds and sequential multi-map loading

/// Indexed collision layers
pub mod layer;
/// Sequential loading of named maps
pub mod manager;
/// Single map loading and collision layer discovery
pub mod map;
/// Raw map document shapes
pub mod raw;

pub use layer::Layer;
pub use manager::MapManager;
pub use map::World;
