//! Input/output: map sources, configuration, errors and the command line

/// Command-line interface and map processing
pub mod cli;
/// Map conventions and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG export of collision grids
pub mod image;
/// Progress display while maps load
pub mod progress;
/// Map document sources
pub mod source;
