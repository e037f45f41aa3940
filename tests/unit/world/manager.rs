//! Tests for sequential multi-map loading

#[cfg(test)]
mod tests {
    use collidemap::MapError;
    use collidemap::io::error::Result;
    use collidemap::io::source::{JsonSource, MemorySource};
    use collidemap::spatial::collision::CollisionMap;
    use collidemap::world::manager::MapManager;
    use collidemap::world::map::World;
    use serde_json::{Value, json};
    use std::cell::RefCell;

    /// Records fetch start and finish events around an inner source
    struct RecordingSource {
        inner: MemorySource,
        events: RefCell<Vec<String>>,
    }

    impl RecordingSource {
        fn new(inner: MemorySource) -> Self {
            Self {
                inner,
                events: RefCell::new(Vec::new()),
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    impl JsonSource for RecordingSource {
        fn fetch(&self, path: &str) -> Result<Value> {
            self.events.borrow_mut().push(format!("start {path}"));
            let document = self.inner.fetch(path);
            self.events.borrow_mut().push(format!("end {path}"));
            document
        }
    }

    fn map_with_layer(index: u32, value: i64) -> Value {
        json!({
            "layers": [
                {"name": format!("Collision:{index}"), "data": [value], "width": 1, "height": 1}
            ]
        })
    }

    fn source() -> MemorySource {
        let mut source = MemorySource::new();
        source.insert_map("a", map_with_layer(0, 1));
        source.insert_map("b", map_with_layer(1, 2));
        source.insert_map("broken", json!({"tiles": []}));
        source
    }

    // Tests maps are fetched one after another in input order
    // Verified by fetching all maps before decoding any
    #[test]
    fn test_load_maps_is_sequential() {
        let recorder = RecordingSource::new(source());
        let mut manager = MapManager::new(&recorder);

        assert!(manager.load_maps(["a", "b"]).is_ok());

        assert_eq!(
            recorder.events(),
            vec![
                "start /maps/a.json",
                "end /maps/a.json",
                "start /maps/b.json",
                "end /maps/b.json",
            ]
        );
    }

    // Tests worlds are stored by the position of their name
    // Verified by storing worlds in reverse order
    #[test]
    fn test_worlds_stored_by_position() {
        let mut manager = MapManager::new(source());
        assert!(manager.load_maps(["b", "a"]).is_ok());

        assert_eq!(manager.len(), 2);
        assert_eq!(manager.world(0).map(World::name), Some("b"));
        assert_eq!(manager.world(1).map(World::name), Some("a"));
        assert!(manager.world(0).and_then(|world| world.layer(1)).is_some());
        assert_eq!(manager.world_named("a").map(World::layer_count), Some(1));
        assert!(manager.world(2).is_none());
    }

    // Tests a failing map aborts the remaining names
    // Verified by continuing after a failed map
    #[test]
    fn test_failure_aborts_remaining_maps() {
        let recorder = RecordingSource::new(source());
        let mut manager = MapManager::new(&recorder);

        let err = manager.load_maps(["a", "broken", "b"]).unwrap_err();

        assert!(matches!(err.root(), MapError::MalformedInput { .. }));
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.world(0).map(World::name), Some("a"));
        assert!(
            !recorder
                .events()
                .iter()
                .any(|event| event.contains("/maps/b.json"))
        );
    }

    // Tests a second batch replaces the first
    // Verified by appending batches
    #[test]
    fn test_load_maps_replaces_previous_batch() {
        let mut manager = MapManager::new(source());
        assert!(manager.load_maps(["a", "b"]).is_ok());
        assert!(manager.load_maps(vec![String::from("b")]).is_ok());

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.worlds().first().map(|w| w.name()), Some("b"));
    }

    // Tests single map loading appends and reports the stored position
    // Verified by returning the position before appending
    #[test]
    fn test_load_map_appends() {
        let mut manager = MapManager::new(source());
        assert!(manager.is_empty());

        assert_eq!(manager.load_map("a").ok(), Some(0));
        assert_eq!(manager.load_map("b").ok(), Some(1));
        assert!(manager.load_map("missing").is_err());
        assert_eq!(manager.len(), 2);
    }

    // Tests the manager's mapping reaches every loaded grid
    // Verified by loading with the identity mapping
    #[test]
    fn test_manager_mapping() {
        let mut manager =
            MapManager::with_mapping(source(), CollisionMap::from_classes([(1, 7), (2, 8)]));
        assert!(manager.load_maps(["a", "b"]).is_ok());

        let cell = |position: usize, index: u32| {
            manager
                .world(position)
                .and_then(|world| world.layer(index))
                .and_then(|layer| layer.collisions().get(0, 0).ok())
        };
        assert_eq!(cell(0, 0), Some(7));
        assert_eq!(cell(1, 1), Some(8));
        assert_eq!(manager.mapping().len(), 2);
        assert_eq!(manager.source().len(), 3);
    }
}
