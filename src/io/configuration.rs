//! Map layout conventions and runtime configuration defaults

// Map document conventions
/// Substring marking a layer as a collision layer; the layer index follows it
pub const COLLISION_LAYER_MARKER: &str = "Collision:";
/// Directory prefix under which map documents are fetched
pub const MAP_PATH_PREFIX: &str = "/maps/";
/// Extension of map documents
pub const MAP_FILE_EXTENSION: &str = ".json";
/// Layer type marking an editor folder whose children are layers
pub const GROUP_LAYER_TYPE: &str = "group";

/// Origin used when a collision layer omits `startx`/`starty`
pub const DEFAULT_ORIGIN: i32 = 0;

// Allocation limits for grids decoded from untrusted maps
/// Maximum allowed grid extent along either axis
pub const MAX_GRID_DIMENSION: i32 = 10_000;
/// Maximum number of stored cells in one grid (128 MiB of cells)
pub const MAX_GRID_CELLS: i64 = 16_777_216;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;

// Output settings
/// Infix between map name and layer index in exported image names
pub const EXPORT_INFIX: &str = "_collision_";

/// Colors for non-zero collision ids, cycled by id
pub const DEFAULT_PALETTE: [[u8; 4]; 6] = [
    [220, 50, 47, 255],
    [38, 139, 210, 255],
    [133, 153, 0, 255],
    [181, 137, 0, 255],
    [108, 113, 196, 255],
    [42, 161, 152, 255],
];
