//! Tests for chunked and flat cell data decoding

#[cfg(test)]
mod tests {
    use collidemap::MapError;
    use collidemap::spatial::chunk::{CellData, Chunk, decode_position};
    use collidemap::spatial::grid::Grid;
    use serde_json::json;

    fn json_array(value: &serde_json::Value) -> Vec<serde_json::Value> {
        value.as_array().cloned().unwrap_or_default()
    }

    // Tests flat data decodes row-major with the grid width as row length
    // Verified by using height as the row length
    #[test]
    fn test_flat_row_major_decoding() {
        let data = CellData::Flat(vec![0, 1, 2, 3]);
        let grid: Grid = Grid::from_array(&data, 0, 0, 2, 2).expect("decodable cell data");

        assert_eq!(grid.get(0, 0).ok(), Some(0));
        assert_eq!(grid.get(1, 0).ok(), Some(1));
        assert_eq!(grid.get(0, 1).ok(), Some(2));
        assert_eq!(grid.get(1, 1).ok(), Some(3));
        // Inclusive sizing leaves the last column and row untouched
        assert_eq!(grid.get(2, 0).ok(), Some(0));
        assert_eq!(grid.get(0, 2).ok(), Some(0));
    }

    // Tests a chunk lands at its own world offset
    // Verified by ignoring the chunk offset
    #[test]
    fn test_chunk_offset_decoding() {
        let data = CellData::Chunked(vec![Chunk {
            x: 5,
            y: 5,
            width: 2,
            height: Some(2),
            data: vec![9, 8, 7, 6],
        }]);
        let grid: Grid = Grid::from_array(&data, 0, 0, 10, 10).expect("decodable cell data");

        assert_eq!(grid.get(5, 5).ok(), Some(9));
        assert_eq!(grid.get(6, 5).ok(), Some(8));
        assert_eq!(grid.get(5, 6).ok(), Some(7));
        assert_eq!(grid.get(6, 6).ok(), Some(6));
        assert_eq!(grid.count_nonzero(), 4);
    }

    // Tests flat data is laid out from the grid origin
    // Verified by writing flat data at absolute coordinates
    #[test]
    fn test_flat_data_is_origin_relative() {
        let data = CellData::Flat(vec![1, 2, 3, 4]);
        let grid: Grid = Grid::from_array(&data, -16, 32, 2, 2).expect("decodable cell data");

        assert_eq!(grid.get(-16, 32).ok(), Some(1));
        assert_eq!(grid.get(-15, 32).ok(), Some(2));
        assert_eq!(grid.get(-16, 33).ok(), Some(3));
        assert_eq!(grid.get(-15, 33).ok(), Some(4));
    }

    // Tests chunk offsets are absolute world positions, not origin-relative
    // Verified by adding the grid origin to chunk offsets
    #[test]
    fn test_chunk_offsets_are_absolute() {
        let data = CellData::Chunked(vec![Chunk::new(-16, -16, 2, vec![1, 2])]);
        let grid: Grid = Grid::from_array(&data, -16, -16, 32, 32).expect("decodable cell data");

        assert_eq!(grid.get(-16, -16).ok(), Some(1));
        assert_eq!(grid.get(-15, -16).ok(), Some(2));
    }

    // Tests multiple chunks tile the grid and later chunks overwrite earlier ones
    // Verified by decoding only the first chunk
    #[test]
    fn test_multiple_chunks() {
        let data = CellData::Chunked(vec![
            Chunk::new(0, 0, 2, vec![1, 1, 1, 1]),
            Chunk::new(2, 0, 2, vec![2, 2, 2, 2]),
            Chunk::new(1, 1, 1, vec![3]),
        ]);
        let grid: Grid = Grid::from_array(&data, 0, 0, 4, 2).expect("decodable cell data");

        assert_eq!(grid.get(0, 0).ok(), Some(1));
        assert_eq!(grid.get(3, 1).ok(), Some(2));
        assert_eq!(grid.get(1, 1).ok(), Some(3));
        assert_eq!(grid.get(4, 0).ok(), Some(0));
    }

    // Tests a chunk reaching past the grid extent fails with a bounds error
    // Verified by silently skipping out of range cells
    #[test]
    fn test_chunk_outside_extent_fails() {
        let data = CellData::Chunked(vec![Chunk::new(3, 0, 2, vec![1, 1])]);
        let result: Result<Grid, _> = Grid::from_array(&data, 0, 0, 3, 3);

        assert!(matches!(
            result,
            Err(MapError::OutOfBounds {
                position: [4, 0],
                ..
            })
        ));
    }

    // Tests zero-width rows with data are rejected instead of dividing by zero
    // Verified by removing the row width check
    #[test]
    fn test_zero_width_with_data_rejected() {
        let chunked = CellData::Chunked(vec![Chunk::new(0, 0, 0, vec![1])]);
        let result: Result<Grid, _> = Grid::from_array(&chunked, 0, 0, 4, 4);
        assert!(matches!(result, Err(MapError::MalformedInput { .. })));

        let flat = CellData::Flat(vec![1]);
        let result: Result<Grid, _> = Grid::from_array(&flat, 0, 0, 0, 0);
        assert!(matches!(result, Err(MapError::MalformedInput { .. })));

        let empty = CellData::Chunked(vec![Chunk::new(0, 0, 0, Vec::new())]);
        assert!(Grid::<collidemap::spatial::Identity>::from_array(&empty, 0, 0, 0, 0).is_ok());
    }

    // Tests declared chunk height must match the payload length
    // Verified by ignoring the declared height
    #[test]
    fn test_chunk_height_mismatch_rejected() {
        let data = CellData::Chunked(vec![
            Chunk::new(0, 0, 2, vec![5, 5]),
            Chunk {
                x: 0,
                y: 1,
                width: 2,
                height: Some(2),
                data: vec![1, 2, 3],
            },
        ]);
        let result: Result<Grid, _> = Grid::from_array(&data, 0, 0, 4, 4);

        match result {
            Err(MapError::MalformedInput { reason }) => {
                assert!(reason.contains("2x2"), "unexpected reason: {reason}");
            }
            other => unreachable!("Expected MalformedInput, got {other:?}"),
        }
    }

    // Tests JSON detection picks chunks when the first element is an object
    // Verified by always decoding as flat data
    #[test]
    fn test_from_json_detects_chunks() {
        let values = json_array(&json!([
            {"x": -32, "y": 0, "width": 2, "height": 1, "data": [4, 5]}
        ]));

        let data = CellData::from_json(&values);
        assert_eq!(
            data.as_ref().ok(),
            Some(&CellData::Chunked(vec![Chunk {
                x: -32,
                y: 0,
                width: 2,
                height: Some(1),
                data: vec![4, 5],
            }]))
        );
        assert_eq!(data.map(|d| d.len()).ok(), Some(2));
    }

    // Tests JSON detection falls back to flat data for numbers and empty arrays
    // Verified by treating empty arrays as chunk lists
    #[test]
    fn test_from_json_detects_flat() {
        let values = json_array(&json!([0, 3, 2147483649_u64]));
        assert_eq!(
            CellData::from_json(&values).ok(),
            Some(CellData::Flat(vec![0, 3, 2_147_483_649]))
        );

        let empty = CellData::from_json(&[]);
        assert!(matches!(&empty, Ok(CellData::Flat(cells)) if cells.is_empty()));
        assert!(empty.is_ok_and(|data| data.is_empty()));
    }

    // Tests non-integer cells raise a type constraint error
    // Verified by truncating floats to integers
    #[test]
    fn test_from_json_rejects_non_integer_cells() {
        let values = json_array(&json!([1, 2.5, 3]));
        assert!(matches!(
            CellData::from_json(&values),
            Err(MapError::TypeConstraint { field: "cell", .. })
        ));

        let values = json_array(&json!([1, "2"]));
        assert!(matches!(
            CellData::from_json(&values),
            Err(MapError::TypeConstraint { .. })
        ));

        let values = json_array(&json!([{"x": 0, "y": 0, "width": 1, "data": [true]}]));
        assert!(matches!(
            CellData::from_json(&values),
            Err(MapError::TypeConstraint { .. })
        ));
    }

    // Tests chunk parsing reports missing fields and mixed arrays
    // Verified by defaulting missing chunk fields to zero
    #[test]
    fn test_chunk_from_json_malformed() {
        let missing_width = json!({"x": 0, "y": 0, "data": [1]});
        assert!(matches!(
            Chunk::from_json(&missing_width),
            Err(MapError::MalformedInput { .. })
        ));

        let fractional_x = json!({"x": 0.5, "y": 0, "width": 1, "data": [1]});
        assert!(matches!(
            Chunk::from_json(&fractional_x),
            Err(MapError::TypeConstraint { field: "x", .. })
        ));

        let mixed = json_array(&json!([{"x": 0, "y": 0, "width": 1, "data": [1]}, 7]));
        assert!(matches!(
            CellData::from_json(&mixed),
            Err(MapError::MalformedInput { .. })
        ));
    }

    // Tests flat index decoding with offsets
    // Verified by swapping quotient and remainder
    #[test]
    fn test_decode_position() {
        assert_eq!(decode_position(0, 3, [0, 0]).ok(), Some([0, 0]));
        assert_eq!(decode_position(4, 3, [0, 0]).ok(), Some([1, 1]));
        assert_eq!(decode_position(7, 3, [10, -10]).ok(), Some([11, -8]));
        assert!(decode_position(1, 0, [0, 0]).is_err());
        assert!(decode_position(1, -2, [0, 0]).is_err());
        assert!(decode_position(1, 4, [i32::MAX, 0]).is_err());
    }
}
