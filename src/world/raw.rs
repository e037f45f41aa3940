//! Raw map document shapes as exported by the map editor
//!
//! Layer entries stay raw JSON until their name marks them as collision layers,
//! so unrelated layers of any shape are skipped. Within a collision layer, the
//! values the loader checks itself (cell arrays, coordinates, extents) are kept
//! as raw JSON too, so a bad value surfaces as a typed error.

use serde::Deserialize;
use serde_json::Value;

use crate::io::configuration::{DEFAULT_ORIGIN, GROUP_LAYER_TYPE};
use crate::io::error::{Result, malformed};
use crate::spatial::chunk::{CellData, integer_value};
use crate::spatial::collision::{CollisionGrid, CollisionMap};

/// Top level of a map document
#[derive(Debug, Clone, Deserialize)]
pub struct RawMap {
    /// Layer entries in editor order; absent in malformed documents
    #[serde(default)]
    pub layers: Option<Vec<Value>>,
}

/// Fields of a collision layer entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLayer {
    /// Layer name as shown in the editor
    #[serde(default)]
    pub name: String,
    /// Chunk list of an infinite layer
    #[serde(default)]
    pub chunks: Option<Value>,
    /// Flat cell array of a finite layer
    #[serde(default)]
    pub data: Option<Value>,
    /// World x of the layer's first cell
    #[serde(default)]
    pub startx: Option<Value>,
    /// World y of the layer's first cell
    #[serde(default)]
    pub starty: Option<Value>,
    /// Layer width in cells
    #[serde(default)]
    pub width: Option<Value>,
    /// Layer height in cells
    #[serde(default)]
    pub height: Option<Value>,
}

impl RawMap {
    /// Interpret a fetched document as a map
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::MalformedInput`] if the document is not an
    /// object or its `layers` field is not an array
    pub fn from_json(document: &Value) -> Result<Self> {
        Self::deserialize(document).map_err(|e| malformed(&e))
    }
}

/// Name of a layer entry, when it is a string
pub fn layer_name(entry: &Value) -> Option<&str> {
    entry.get("name").and_then(Value::as_str)
}

/// Child entries of a group layer, `None` for any other entry
///
/// A group whose `layers` field is missing or not an array has no children.
pub fn group_children(entry: &Value) -> Option<&[Value]> {
    let is_group = entry.get("type").and_then(Value::as_str) == Some(GROUP_LAYER_TYPE);
    is_group.then(|| {
        entry
            .get("layers")
            .and_then(Value::as_array)
            .map_or(&[][..], Vec::as_slice)
    })
}

impl RawLayer {
    /// Read the fields of a collision layer entry
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::MalformedInput`] if the entry is not an object
    /// or its name is not a string
    pub fn from_json(entry: &Value) -> Result<Self> {
        Self::deserialize(entry).map_err(|e| malformed(&e))
    }

    /// World position of the layer's first cell, defaulting to the origin
    ///
    /// # Errors
    ///
    /// Returns [`crate::MapError::TypeConstraint`] if `startx`/`starty` are not integers
    pub fn start(&self) -> Result<[i32; 2]> {
        let axis = |field: &'static str, value: Option<&Value>| {
            value.map_or(Ok(DEFAULT_ORIGIN), |v| integer_value(field, v))
        };
        Ok([
            axis("startx", self.startx.as_ref())?,
            axis("starty", self.starty.as_ref())?,
        ])
    }

    /// Declared `(width, height)` of the layer
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is missing or not an integer
    pub fn extent(&self) -> Result<[i32; 2]> {
        let axis = |field: &'static str, value: Option<&Value>| {
            value
                .ok_or_else(|| malformed(&format!("layer '{}' is missing '{field}'", self.name)))
                .and_then(|v| integer_value(field, v))
        };
        Ok([
            axis("width", self.width.as_ref())?,
            axis("height", self.height.as_ref())?,
        ])
    }

    /// Cell payload, preferring `chunks` over `data`
    ///
    /// # Errors
    ///
    /// Returns an error if neither field is present, the chosen field is not an
    /// array (e.g. base64-encoded data), or its contents fail to decode
    pub fn cell_data(&self) -> Result<CellData> {
        let (field, value) = match (&self.chunks, &self.data) {
            (Some(chunks), _) => ("chunks", chunks),
            (None, Some(data)) => ("data", data),
            (None, None) => {
                return Err(malformed(&format!(
                    "layer '{}' has neither 'chunks' nor 'data'",
                    self.name
                )));
            }
        };

        let values = value.as_array().ok_or_else(|| {
            malformed(&format!(
                "layer '{}' field '{field}' must be an array (encoded layer data is not supported)",
                self.name
            ))
        })?;

        CellData::from_json(values)
    }

    /// Decode this layer into a collision grid written through `mapping`
    ///
    /// # Errors
    ///
    /// Returns an error if the layer's position, extent or cell data is invalid
    pub fn collision_grid(&self, mapping: &CollisionMap) -> Result<CollisionGrid> {
        let [x, y] = self.start()?;
        let [width, height] = self.extent()?;
        let data = self.cell_data()?;
        CollisionGrid::from_array_with(&data, x, y, width, height, mapping.clone())
    }
}
