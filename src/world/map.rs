//! A single loaded map and its collision layers
//!
//! Loading walks the document's layers (descending into group layers) and picks
//! out every layer whose name contains the collision marker. The text after the
//! marker is the layer index; a later layer with the same index replaces the
//! earlier one's grid.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::io::configuration::COLLISION_LAYER_MARKER;
use crate::io::error::{Result, WithContext, malformed};
use crate::io::source::{JsonSource, map_path};
use crate::spatial::collision::CollisionMap;
use crate::world::layer::Layer;
use crate::world::raw::{RawLayer, RawMap, group_children, layer_name};

/// Collision layers of one map, ordered by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    name: String,
    layers: BTreeMap<u32, Layer>,
}

impl World {
    /// Create an unloaded world for the map named `name`
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: BTreeMap::new(),
        }
    }

    /// Map name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path this world's document is fetched from
    pub fn path(&self) -> String {
        map_path(&self.name)
    }

    /// Fetch this world's document and attach a collision grid per collision layer
    ///
    /// # Errors
    ///
    /// Returns an error, tagged with the map name, if the fetch fails or the
    /// document is malformed (see [`World::apply`])
    pub fn load<S: JsonSource + ?Sized>(
        &mut self,
        source: &S,
        mapping: &CollisionMap,
    ) -> Result<()> {
        let document = source.fetch(&self.path()).with_map(&self.name)?;
        self.apply(&document, mapping).with_map(&self.name)
    }

    /// Attach a collision grid per collision layer of an already fetched document
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The document has no `layers` array
    /// - A collision layer's index suffix is not a non-negative integer
    /// - A collision layer's extent or cell data is invalid
    pub fn apply(&mut self, document: &Value, mapping: &CollisionMap) -> Result<()> {
        let raw = RawMap::from_json(document)?;
        let layers = raw
            .layers
            .ok_or_else(|| malformed(&"map has no 'layers' array"))?;
        self.apply_layers(&layers, mapping)
    }

    fn apply_layers(&mut self, entries: &[Value], mapping: &CollisionMap) -> Result<()> {
        for entry in entries {
            if let Some(children) = group_children(entry) {
                self.apply_layers(children, mapping)?;
                continue;
            }

            let Some(name) = layer_name(entry) else {
                continue;
            };
            let Some(index) = collision_index(name).transpose().with_layer(name)? else {
                continue;
            };

            let grid = RawLayer::from_json(entry)
                .and_then(|raw| raw.collision_grid(mapping))
                .with_layer(name)?;

            self.layers
                .entry(index)
                .or_insert_with(|| Layer::new(index))
                .set_collisions(grid);
        }
        Ok(())
    }

    /// Layer at `index`, if the map defines one
    pub fn layer(&self, index: u32) -> Option<&Layer> {
        self.layers.get(&index)
    }

    /// Layers in ascending index order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.values()
    }

    /// Number of collision layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Check if no collision layers were found
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

/// Layer index encoded in a layer name
///
/// Returns `None` for names without the collision marker and an error when the
/// text after the marker is not a non-negative integer.
pub fn collision_index(name: &str) -> Option<Result<u32>> {
    let (_, suffix) = name.split_once(COLLISION_LAYER_MARKER)?;
    Some(suffix.trim().parse::<u32>().map_err(|e| {
        malformed(&format!("collision layer '{name}' has invalid index '{suffix}': {e}"))
    }))
}
