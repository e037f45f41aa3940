//! Tests for indexed collision layers

#[cfg(test)]
mod tests {
    use collidemap::spatial::chunk::CellData;
    use collidemap::spatial::collision::CollisionGrid;
    use collidemap::world::layer::Layer;

    // Tests a new layer holds an empty collision grid
    // Verified by leaving the grid at a non-zero extent
    #[test]
    fn test_new_layer() {
        let layer = Layer::new(3);

        assert_eq!(layer.index(), 3);
        assert_eq!(layer.collisions(), &CollisionGrid::empty());
    }

    // Tests successive replacements keep only the latest grid
    // Verified by merging non-zero cells of the previous grid
    #[test]
    fn test_set_collisions_replaces_without_merge() {
        let mut layer = Layer::new(0);

        let first = CollisionGrid::from_array(&CellData::Flat(vec![1, 1, 1, 1]), 0, 0, 2, 2)
            .expect("decodable cell data");
        let second = CollisionGrid::from_array(&CellData::Flat(vec![0, 2]), 0, 0, 2, 1)
            .expect("decodable cell data");

        layer.set_collisions(first);
        assert_eq!(layer.collisions().get(0, 1).ok(), Some(1));

        layer.set_collisions(second.clone());
        assert_eq!(layer.collisions(), &second);
        assert_eq!(layer.collisions().get(0, 0).ok(), Some(0));
        assert_eq!(layer.collisions().get(1, 0).ok(), Some(2));
        assert_eq!(layer.collisions().count_nonzero(), 1);
        assert_eq!(layer.index(), 0);
    }
}
