//! Map document retrieval behind a fetch-by-path interface

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};

use serde_json::Value;

use crate::io::configuration::{MAP_FILE_EXTENSION, MAP_PATH_PREFIX};
use crate::io::error::{MapError, Result, invalid_parameter};

/// Supplies raw map JSON by path (e.g. `/maps/town.json`)
pub trait JsonSource {
    /// Fetch and parse the document at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the document is missing or is not valid JSON
    fn fetch(&self, path: &str) -> Result<Value>;
}

impl<S: JsonSource + ?Sized> JsonSource for &S {
    fn fetch(&self, path: &str) -> Result<Value> {
        (**self).fetch(path)
    }
}

/// Path under which the map named `name` is fetched
pub fn map_path(name: &str) -> String {
    format!("{MAP_PATH_PREFIX}{name}{MAP_FILE_EXTENSION}")
}

/// Reads documents from files below a root directory
///
/// The fetch path `/maps/town.json` resolves to `<root>/maps/town.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Serve documents from below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory documents are served from
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that backs a fetch path
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidParameter`] if the path would escape the root
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(invalid_parameter(
                "path",
                &path,
                &"must stay below the source directory",
            ));
        }
        Ok(self.root.join(relative))
    }
}

impl JsonSource for DirectorySource {
    fn fetch(&self, path: &str) -> Result<Value> {
        let file_path = self.resolve(path)?;
        let file = File::open(&file_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MapError::MissingDocument {
                    path: path.to_string(),
                }
            } else {
                MapError::FileSystem {
                    path: file_path.clone(),
                    operation: "open",
                    source: e,
                }
            }
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| MapError::Json {
            path: file_path,
            source: e,
        })
    }
}

/// Serves documents held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Value>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document at an explicit fetch path
    pub fn insert(&mut self, path: impl Into<String>, document: Value) {
        self.documents.insert(path.into(), document);
    }

    /// Store the document for the map named `name`
    pub fn insert_map(&mut self, name: &str, document: Value) {
        self.insert(map_path(name), document);
    }

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if no documents are stored
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl JsonSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<Value> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| MapError::MissingDocument {
                path: path.to_string(),
            })
    }
}
