//! Chunked and flat cell data ingestion
//!
//! Map editors export a tile layer either as one flat row-major array covering
//! the whole layer, or as a list of chunks, each a small flat array placed at its
//! own world offset. Both decode row-major: flat index `i` of a row `w` wide sits
//! at local `(i mod w, i div w)`.

use serde_json::Value;

use crate::io::error::{Result, malformed, type_constraint};
use crate::spatial::grid::{Cell, Grid, ValueMap};

/// A block of cells placed at its own world offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// World x coordinate of the chunk's first cell
    pub x: i32,
    /// World y coordinate of the chunk's first cell
    pub y: i32,
    /// Number of cells per chunk row
    pub width: i32,
    /// Number of chunk rows, when declared
    pub height: Option<i32>,
    /// Row-major cell values
    pub data: Vec<Cell>,
}

impl Chunk {
    /// Create a chunk without a declared height
    pub const fn new(x: i32, y: i32, width: i32, data: Vec<Cell>) -> Self {
        Self {
            x,
            y,
            width,
            height: None,
            data,
        }
    }

    /// Parse a chunk object `{x, y, width, height?, data}`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value is not an object or lacks `x`, `y`, `width` or `data`
    /// - A coordinate, size or cell is not an integer
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| malformed(&format!("expected a chunk object, found {value}")))?;

        let field = |name: &'static str| -> Result<i32> {
            object
                .get(name)
                .ok_or_else(|| malformed(&format!("chunk is missing '{name}'")))
                .and_then(|v| integer_value(name, v))
        };

        let height = match object.get("height") {
            Some(v) => Some(integer_value("chunk height", v)?),
            None => None,
        };

        let data = object
            .get("data")
            .and_then(Value::as_array)
            .ok_or_else(|| malformed(&"chunk is missing a 'data' array"))?
            .iter()
            .map(cell_value)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            x: field("x")?,
            y: field("y")?,
            width: field("width")?,
            height,
            data,
        })
    }

    // Checks the declared size against the payload before anything is written
    fn validate(&self) -> Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        if self.width <= 0 {
            return Err(malformed(&format!(
                "chunk at ({}, {}) has data but width {}",
                self.x, self.y, self.width
            )));
        }
        if let Some(height) = self.height {
            let expected = i64::from(self.width) * i64::from(height);
            if height < 0 || expected != self.data.len() as i64 {
                return Err(malformed(&format!(
                    "chunk at ({}, {}) declares {}x{height} cells but carries {}",
                    self.x,
                    self.y,
                    self.width,
                    self.data.len()
                )));
            }
        }
        Ok(())
    }
}

/// Cell payload of a tile layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellData {
    /// Sparse chunks, each at its own world offset
    Chunked(Vec<Chunk>),
    /// One row-major array laid out from the grid origin
    Flat(Vec<Cell>),
}

impl CellData {
    /// Interpret a JSON array as chunked or flat cell data
    ///
    /// An array whose first element is an object is read as chunks; anything
    /// else is read as flat cells. An empty array is empty flat data.
    ///
    /// # Errors
    ///
    /// Returns an error if a chunk is malformed or a flat cell is not an integer
    pub fn from_json(values: &[Value]) -> Result<Self> {
        match values.first() {
            Some(Value::Object(_)) => values
                .iter()
                .map(Chunk::from_json)
                .collect::<Result<Vec<_>>>()
                .map(Self::Chunked),
            _ => values
                .iter()
                .map(cell_value)
                .collect::<Result<Vec<_>>>()
                .map(Self::Flat),
        }
    }

    /// Total number of cell values carried
    pub fn len(&self) -> usize {
        match self {
            Self::Chunked(chunks) => chunks.iter().map(|chunk| chunk.data.len()).sum(),
            Self::Flat(cells) => cells.len(),
        }
    }

    /// Check if no cell values are carried
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write every value into `grid` through [`Grid::set`]
    ///
    /// Chunks are validated up front so a malformed chunk never leaves a
    /// partially written grid behind.
    pub(crate) fn write_into<M: ValueMap>(&self, grid: &mut Grid<M>) -> Result<()> {
        match self {
            Self::Chunked(chunks) => {
                for chunk in chunks {
                    chunk.validate()?;
                }
                for chunk in chunks {
                    write_row_major(grid, &chunk.data, chunk.width, [chunk.x, chunk.y])?;
                }
            }
            Self::Flat(cells) => {
                if !cells.is_empty() && grid.width() <= 0 {
                    return Err(malformed(&format!(
                        "flat data with {} cells needs a positive width",
                        cells.len()
                    )));
                }
                let origin = grid.origin();
                let row_width = grid.width();
                write_row_major(grid, cells, row_width, origin)?;
            }
        }
        Ok(())
    }
}

fn write_row_major<M: ValueMap>(
    grid: &mut Grid<M>,
    cells: &[Cell],
    row_width: i32,
    offset: [i32; 2],
) -> Result<()> {
    for (index, &value) in cells.iter().enumerate() {
        let [x, y] = decode_position(index, row_width, offset)?;
        grid.set(x, y, value)?;
    }
    Ok(())
}

/// World position of flat index `index` in rows `row_width` wide starting at `offset`
///
/// # Errors
///
/// Returns an error if `row_width` is not positive or the position overflows
/// the coordinate range
pub fn decode_position(index: usize, row_width: i32, offset: [i32; 2]) -> Result<[i32; 2]> {
    let width = usize::try_from(row_width)
        .ok()
        .filter(|&w| w > 0)
        .ok_or_else(|| malformed(&format!("row width {row_width} must be positive")))?;

    let local_x = index % width;
    let local_y = index / width;

    let x = i32::try_from(local_x)
        .ok()
        .and_then(|lx| offset[0].checked_add(lx));
    let y = i32::try_from(local_y)
        .ok()
        .and_then(|ly| offset[1].checked_add(ly));

    match (x, y) {
        (Some(x), Some(y)) => Ok([x, y]),
        _ => Err(malformed(&format!(
            "cell {index} lies beyond the coordinate range"
        ))),
    }
}

/// Read a JSON value as a cell
///
/// # Errors
///
/// Returns [`crate::MapError::TypeConstraint`] if the value is not an integer
/// representable as a cell
pub fn cell_value(value: &Value) -> Result<Cell> {
    value.as_i64().ok_or_else(|| type_constraint("cell", value))
}

/// Read a JSON value as a 32-bit integer
///
/// # Errors
///
/// Returns [`crate::MapError::TypeConstraint`] if the value is not an integer
/// or does not fit in 32 bits
pub fn integer_value(field: &'static str, value: &Value) -> Result<i32> {
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or_else(|| type_constraint(field, value))
}
