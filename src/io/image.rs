//! PNG export of collision grids, one pixel per cell

use crate::io::error::{MapError, Result, invalid_parameter};
use crate::spatial::grid::{Cell, Grid, ValueMap};
use image::{ImageBuffer, Rgba};
use num_traits::ToPrimitive;
use std::path::Path;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

// Non-zero ids cycle through the palette; zero and negative ids stay transparent
fn cell_color(value: Cell, palette: &[[u8; 4]]) -> Rgba<u8> {
    if value <= 0 {
        return TRANSPARENT;
    }
    (value - 1)
        .to_usize()
        .and_then(|id| id.checked_rem(palette.len()))
        .and_then(|slot| palette.get(slot))
        .map_or(TRANSPARENT, |&rgba| Rgba(rgba))
}

/// Render a grid to an RGBA image, storage cell `[row, col]` at pixel `(col, row)`
///
/// # Errors
///
/// Returns [`MapError::InvalidParameter`] if the palette is empty
pub fn render_grid<M: ValueMap>(
    grid: &Grid<M>,
    palette: &[[u8; 4]],
) -> Result<ImageBuffer<Rgba<u8>, Vec<u8>>> {
    if palette.is_empty() {
        return Err(invalid_parameter(
            "palette",
            &"[]",
            &"at least one color is required",
        ));
    }

    let width = grid.columns() as u32;
    let height = grid.rows() as u32;
    let cells = grid.cells();

    Ok(ImageBuffer::from_fn(width, height, |x, y| {
        cells
            .get([y as usize, x as usize])
            .map_or(TRANSPARENT, |&value| cell_color(value, palette))
    }))
}

/// Export a grid as a PNG image with transparent empty cells
///
/// # Errors
///
/// Returns an error if:
/// - The palette is empty
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_collision_png<M: ValueMap>(
    grid: &Grid<M>,
    palette: &[[u8; 4]],
    output_path: &Path,
) -> Result<()> {
    let img = render_grid(grid, palette)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MapError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path).map_err(|e| MapError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
