//! Bounded 2D cell storage with a world-space origin
//!
//! A grid covers the inclusive rectangle `[origin_x, origin_x + width] ×
//! [origin_y, origin_y + height]`, so its backing array holds `height + 1` rows of
//! `width + 1` columns. World coordinates are translated to storage indices by
//! subtracting the origin. Every write passes through the grid's [`ValueMap`].

use ndarray::{Array2, ArrayView2};

use crate::io::configuration::{MAX_GRID_CELLS, MAX_GRID_DIMENSION};
use crate::io::error::{MapError, Result};
use crate::spatial::chunk::CellData;

/// Value stored in a grid cell (tile id or collision class)
pub type Cell = i64;

/// Write-time transform applied to every value stored in a grid
pub trait ValueMap {
    /// Map an incoming value to the value actually stored
    fn map(&self, value: Cell) -> Cell;
}

/// Stores values unchanged
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl ValueMap for Identity {
    fn map(&self, value: Cell) -> Cell {
        value
    }
}

/// Fixed-size, origin-offset 2D array of cells
///
/// Cells are zero-filled at construction and never resized afterwards. Reads and
/// writes outside the extent fail with [`MapError::OutOfBounds`]; a failed write
/// leaves the grid untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<M = Identity> {
    origin: [i32; 2],
    extent: [i32; 2],
    cells: Array2<Cell>,
    mapping: M,
}

impl<M: ValueMap + Default> Grid<M> {
    /// Create a zero-filled grid using the default mapping
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidExtent`] if `width` or `height` is negative or
    /// exceeds the maximum grid dimension
    pub fn new(origin_x: i32, origin_y: i32, width: i32, height: i32) -> Result<Self> {
        Self::with_mapping(origin_x, origin_y, width, height, M::default())
    }

    /// Decode chunked or flat cell data into a new grid using the default mapping
    ///
    /// # Errors
    ///
    /// See [`Grid::from_array_with`]
    pub fn from_array(data: &CellData, x: i32, y: i32, width: i32, height: i32) -> Result<Self> {
        Self::from_array_with(data, x, y, width, height, M::default())
    }
}

impl<M: ValueMap> Grid<M> {
    /// Create a zero-filled grid that stores values through `mapping`
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidExtent`] if `width` or `height` is negative,
    /// exceeds the maximum grid dimension, covers more than the maximum cell
    /// count, or runs past `i32::MAX` from the origin
    pub fn with_mapping(
        origin_x: i32,
        origin_y: i32,
        width: i32,
        height: i32,
        mapping: M,
    ) -> Result<Self> {
        if width < 0 || height < 0 {
            return Err(MapError::InvalidExtent {
                width,
                height,
                reason: "extents must not be negative",
            });
        }
        if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
            return Err(MapError::InvalidExtent {
                width,
                height,
                reason: "extent exceeds the maximum grid dimension",
            });
        }
        if (i64::from(width) + 1) * (i64::from(height) + 1) > MAX_GRID_CELLS {
            return Err(MapError::InvalidExtent {
                width,
                height,
                reason: "extent exceeds the maximum cell count",
            });
        }
        if origin_x.checked_add(width).is_none() || origin_y.checked_add(height).is_none() {
            return Err(MapError::InvalidExtent {
                width,
                height,
                reason: "extent runs past the coordinate range",
            });
        }

        // Inclusive sizing: an extent of w covers w + 1 columns
        let rows = height as usize + 1;
        let cols = width as usize + 1;

        Ok(Self {
            origin: [origin_x, origin_y],
            extent: [width, height],
            cells: Array2::zeros((rows, cols)),
            mapping,
        })
    }

    /// The extent-0 grid at the origin: a single zero cell
    pub fn single_cell(mapping: M) -> Self {
        Self {
            origin: [0, 0],
            extent: [0, 0],
            cells: Array2::zeros((1, 1)),
            mapping,
        }
    }

    /// Decode chunked or flat cell data into a new grid
    ///
    /// The grid has origin `(x, y)` and inclusive extent `(width, height)`. Every
    /// decoded value is written through [`Grid::set`], and therefore through
    /// `mapping`. Chunk values land at the chunk's own world offset; flat values
    /// are laid out row-major from the grid origin with `width` values per row.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The extent is invalid
    /// - A chunk or flat array has data but a non-positive row width
    /// - A chunk's data length disagrees with its declared size
    /// - A decoded position falls outside the grid
    pub fn from_array_with(
        data: &CellData,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        mapping: M,
    ) -> Result<Self> {
        let mut grid = Self::with_mapping(x, y, width, height, mapping)?;
        data.write_into(&mut grid)?;
        Ok(grid)
    }

    /// World coordinates of storage cell (0, 0)
    pub const fn origin(&self) -> [i32; 2] {
        self.origin
    }

    /// Inclusive horizontal extent
    pub const fn width(&self) -> i32 {
        self.extent[0]
    }

    /// Inclusive vertical extent
    pub const fn height(&self) -> i32 {
        self.extent[1]
    }

    /// Number of stored columns (`width + 1`)
    pub fn columns(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of stored rows (`height + 1`)
    pub fn rows(&self) -> usize {
        self.cells.nrows()
    }

    /// The write-time transform of this grid
    pub const fn mapping(&self) -> &M {
        &self.mapping
    }

    /// Read-only view of the backing store, indexed `[row, col]`
    pub fn cells(&self) -> ArrayView2<'_, Cell> {
        self.cells.view()
    }

    /// Check if a world position lies within the extent
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.storage_index(x, y).is_some()
    }

    /// Read the value at a world position
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if the position lies outside the extent
    pub fn get(&self, x: i32, y: i32) -> Result<Cell> {
        self.storage_index(x, y)
            .and_then(|index| self.cells.get(index).copied())
            .ok_or_else(|| out_of_bounds(self.origin, self.extent, x, y))
    }

    /// Write a value at a world position after passing it through the mapping
    ///
    /// # Errors
    ///
    /// Returns [`MapError::OutOfBounds`] if the position lies outside the extent;
    /// the grid is not modified in that case
    pub fn set(&mut self, x: i32, y: i32, value: Cell) -> Result<()> {
        let (origin, extent) = (self.origin, self.extent);
        let index = self
            .storage_index(x, y)
            .ok_or_else(|| out_of_bounds(origin, extent, x, y))?;
        let mapped = self.mapping.map(value);
        let cell = self
            .cells
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(origin, extent, x, y))?;
        *cell = mapped;
        Ok(())
    }

    /// Iterate over `([x, y], value)` in row-major world order
    pub fn iter(&self) -> impl Iterator<Item = ([i32; 2], Cell)> + '_ {
        let [origin_x, origin_y] = self.origin;
        self.cells.indexed_iter().map(move |((row, col), &value)| {
            // Construction guarantees origin + extent fits in i32
            ([origin_x + col as i32, origin_y + row as i32], value)
        })
    }

    /// Number of cells holding a non-zero value
    pub fn count_nonzero(&self) -> usize {
        self.cells.iter().filter(|&&value| value != 0).count()
    }

    // Translates world coordinates into a [row, col] storage index
    fn storage_index(&self, x: i32, y: i32) -> Option<[usize; 2]> {
        let col = i64::from(x) - i64::from(self.origin[0]);
        let row = i64::from(y) - i64::from(self.origin[1]);

        if col < 0 || row < 0 || col > i64::from(self.extent[0]) || row > i64::from(self.extent[1])
        {
            return None;
        }

        Some([row as usize, col as usize])
    }
}

impl<M: ValueMap + Default> Default for Grid<M> {
    fn default() -> Self {
        Self::single_cell(M::default())
    }
}

const fn out_of_bounds(origin: [i32; 2], extent: [i32; 2], x: i32, y: i32) -> MapError {
    MapError::OutOfBounds {
        position: [x, y],
        origin,
        extent,
    }
}
