//! Sequential loading of named maps

use crate::io::error::Result;
use crate::io::source::JsonSource;
use crate::spatial::collision::CollisionMap;
use crate::world::map::World;

/// Loads maps from a [`JsonSource`] and keeps them by load position
///
/// Maps are loaded one after another in the order given: the fetch for a map
/// is only issued once the previous map has finished loading.
#[derive(Debug)]
pub struct MapManager<S> {
    source: S,
    mapping: CollisionMap,
    worlds: Vec<World>,
}

impl<S: JsonSource> MapManager<S> {
    /// Create a manager storing collision ids unchanged
    pub fn new(source: S) -> Self {
        Self::with_mapping(source, CollisionMap::identity())
    }

    /// Create a manager that writes every collision grid through `mapping`
    pub const fn with_mapping(source: S, mapping: CollisionMap) -> Self {
        Self {
            source,
            mapping,
            worlds: Vec::new(),
        }
    }

    /// Load every named map in order, replacing previously loaded worlds
    ///
    /// The world for `names[i]` is stored at position `i`. Loading stops at the
    /// first failure; worlds loaded before it remain available.
    ///
    /// # Errors
    ///
    /// Returns the first map's load error
    pub fn load_maps<I>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.worlds.clear();
        for name in names {
            self.load_map(name.as_ref())?;
        }
        Ok(())
    }

    /// Load one map and append it, returning its position
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be fetched or decoded; nothing is
    /// stored in that case
    pub fn load_map(&mut self, name: &str) -> Result<usize> {
        let mut world = World::new(name);
        world.load(&self.source, &self.mapping)?;
        self.worlds.push(world);
        Ok(self.worlds.len() - 1)
    }

    /// World stored at `position`
    pub fn world(&self, position: usize) -> Option<&World> {
        self.worlds.get(position)
    }

    /// First stored world with the given name
    pub fn world_named(&self, name: &str) -> Option<&World> {
        self.worlds.iter().find(|world| world.name() == name)
    }

    /// All stored worlds in load order
    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    /// Number of stored worlds
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    /// Check if no worlds are stored
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// The source maps are fetched from
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The mapping applied to every loaded collision grid
    pub const fn mapping(&self) -> &CollisionMap {
        &self.mapping
    }
}
