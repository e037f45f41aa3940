//! Error types and context management for map loading and grid access

use std::fmt;
use std::path::PathBuf;

/// Main error type for all grid and map operations
#[derive(Debug)]
pub enum MapError {
    /// A value that must be an integer was not, or did not fit its target type
    TypeConstraint {
        /// What the value was meant to be (cell, chunk x, width, ...)
        field: &'static str,
        /// Rendering of the offending value
        value: String,
    },

    /// Grid access outside the declared extent
    ///
    /// Raised before any mutation takes place.
    OutOfBounds {
        /// Requested world coordinates
        position: [i32; 2],
        /// World coordinates of storage cell (0, 0)
        origin: [i32; 2],
        /// Inclusive extent (width, height)
        extent: [i32; 2],
    },

    /// Grid dimensions rejected at construction
    InvalidExtent {
        /// Requested width
        width: i32,
        /// Requested height
        height: i32,
        /// Explanation of why the extent is invalid
        reason: &'static str,
    },

    /// Map JSON does not have the expected shape
    MalformedInput {
        /// Description of what's wrong with the input
        reason: String,
    },

    /// A JSON source has no document at the requested path
    MissingDocument {
        /// Requested map path
        path: String,
    },

    /// Map JSON could not be parsed
    Json {
        /// Path of the document being parsed
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to save an exported collision image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Error raised while processing a particular map or layer
    Context {
        /// Where the error occurred
        context: ErrorContext,
        /// The error being wrapped
        source: Box<MapError>,
    },
}

impl MapError {
    /// The innermost error, with all map/layer context stripped
    pub fn root(&self) -> &Self {
        let mut error = self;
        while let Self::Context { source, .. } = error {
            error = source;
        }
        error
    }
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TypeConstraint { field, value } => {
                write!(f, "Expected an integer for {field}, found {value}")
            }
            Self::OutOfBounds {
                position,
                origin,
                extent,
            } => {
                write!(
                    f,
                    "Position ({}, {}) is outside the grid ({}, {})..=({}, {})",
                    position[0],
                    position[1],
                    origin[0],
                    origin[1],
                    i64::from(origin[0]) + i64::from(extent[0]),
                    i64::from(origin[1]) + i64::from(extent[1])
                )
            }
            Self::InvalidExtent {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid grid extent {width}x{height}: {reason}")
            }
            Self::MalformedInput { reason } => {
                write!(f, "Malformed map data: {reason}")
            }
            Self::MissingDocument { path } => {
                write!(f, "No map document at '{path}'")
            }
            Self::Json { path, source } => {
                write!(f, "Failed to parse '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Context { context, source } => {
                write!(f, "{context}: {source}")
            }
        }
    }
}

impl std::error::Error for MapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::Context { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Convenience type alias for map results
pub type Result<T> = std::result::Result<T, MapError>;

/// Where in the loading process an error occurred
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Name of the map being loaded
    pub map: Option<String>,
    /// Name of the layer being decoded
    pub layer: Option<String>,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.map, &self.layer) {
            (Some(map), Some(layer)) => write!(f, "map '{map}', layer '{layer}'"),
            (Some(map), None) => write!(f, "map '{map}'"),
            (None, Some(layer)) => write!(f, "layer '{layer}'"),
            (None, None) => write!(f, "<unknown location>"),
        }
    }
}

/// Enriches errors with the map and layer being processed
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped with the given context
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the map name
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped with the map context
    fn with_map(self, map: &str) -> Result<T>;

    /// Add just the layer name
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped with the layer context
    fn with_layer(self, layer: &str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MapError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let error = e.into();
            // Merge into an existing layer context rather than nesting twice
            match error {
                MapError::Context {
                    context: inner,
                    source,
                } => MapError::Context {
                    context: ErrorContext {
                        map: inner.map.or(context.map),
                        layer: inner.layer.or(context.layer),
                    },
                    source,
                },
                other => MapError::Context {
                    context,
                    source: Box::new(other),
                },
            }
        })
    }

    fn with_map(self, map: &str) -> Result<T> {
        self.with_context(ErrorContext {
            map: Some(map.to_string()),
            ..Default::default()
        })
    }

    fn with_layer(self, layer: &str) -> Result<T> {
        self.with_context(ErrorContext {
            layer: Some(layer.to_string()),
            ..Default::default()
        })
    }
}

impl From<std::io::Error> for MapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create a malformed input error
pub fn malformed(reason: &impl ToString) -> MapError {
    MapError::MalformedInput {
        reason: reason.to_string(),
    }
}

/// Create a type constraint error for a non-integer value
pub fn type_constraint(field: &'static str, value: &impl ToString) -> MapError {
    MapError::TypeConstraint {
        field,
        value: value.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MapError {
    MapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
