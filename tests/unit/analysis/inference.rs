//! Tests for grid dimension inference

#[cfg(test)]
mod tests {
    use image::ImageFormat;
    use tilepuzzle::analysis::inference::{
        GridSource, dimension_hint, from_archive_name, from_indices, infer_grid, near_square,
    };
    use tilepuzzle::spatial::grid::{GridDimensions, GridPosition};
    use tilepuzzle::spatial::tiles::{Coordinates, Tile, TileId, TileImage, TileSet};

    fn tile_set(coordinates: &[Option<(usize, usize)>]) -> TileSet {
        TileSet::new(
            coordinates
                .iter()
                .enumerate()
                .map(|(index, coordinates)| Tile {
                    id: TileId(index),
                    display_name: format!("tile{index}.png"),
                    image: TileImage {
                        entry_path: format!("tile{index}.png"),
                        format: ImageFormat::Png,
                        data: vec![0],
                    },
                    coordinates: coordinates.map_or(Coordinates::Unknown, |(row, col)| {
                        Coordinates::Known(GridPosition::new(row, col))
                    }),
                })
                .collect(),
        )
    }

    // Tests exact inference on a perfect indexed grid
    #[test]
    fn test_perfect_grid_from_indices() {
        let tiles = tile_set(&[
            Some((0, 0)),
            Some((0, 1)),
            Some((0, 2)),
            Some((1, 0)),
            Some((1, 1)),
            Some((1, 2)),
        ]);

        let inference = infer_grid(&tiles, "anything.zip");
        assert_eq!(inference.dimensions, GridDimensions::new(2, 3));
        assert_eq!(inference.source, GridSource::Indices);
    }

    // Tests the indexed share threshold at exactly sixty percent
    // Verified by using a strict comparison
    #[test]
    fn test_index_threshold() {
        let enough = tile_set(&[Some((0, 0)), Some((0, 1)), Some((1, 1)), None, None]);
        assert_eq!(from_indices(&enough), Some(GridDimensions::new(2, 2)));

        let too_few = tile_set(&[Some((0, 0)), Some((2, 2)), None, None, None]);
        assert_eq!(from_indices(&too_few), None);
    }

    // Tests that index sets far sparser than the tile count are rejected
    #[test]
    fn test_sparse_indices_rejected() {
        let sparse = tile_set(&[Some((0, 0)), Some((9, 9))]);
        assert_eq!(from_indices(&sparse), None);

        let overflowing = tile_set(&[Some((usize::MAX, 1))]);
        assert_eq!(from_indices(&overflowing), None);

        let huge = tile_set(&[Some((10_000_000_000, 10_000_000_000))]);
        let inference = infer_grid(&huge, "huge.zip");
        assert_eq!(inference.source, GridSource::Fallback);
        assert_eq!(inference.dimensions, GridDimensions::new(1, 1));
    }

    // Tests that huge name hints are out of tolerance rather than overflowing
    #[test]
    fn test_huge_archive_name_hint() {
        assert_eq!(from_archive_name("p_1x1000000000000000000.zip", 1), None);
        assert_eq!(
            from_archive_name("p_100000000000x100000000000.zip", 1),
            None
        );
    }

    // Tests the archive name hint and its tolerance
    #[test]
    fn test_archive_name_hint() {
        assert_eq!(
            dimension_hint("uploads/puzzle_4X5.zip"),
            Some(GridDimensions::new(4, 5))
        );
        assert_eq!(dimension_hint("plain.zip"), None);

        assert_eq!(
            from_archive_name("p_3x4.zip", 11),
            Some(GridDimensions::new(3, 4))
        );
        assert_eq!(from_archive_name("p_3x4.zip", 10), None);
        assert_eq!(from_archive_name("p_0x4.zip", 0), None);
    }

    // Tests that the filename tier applies when indices are missing
    #[test]
    fn test_filename_tier() {
        let tiles = tile_set(&[None; 12]);

        let inference = infer_grid(&tiles, "city_3x4.zip");
        assert_eq!(inference.dimensions, GridDimensions::new(3, 4));
        assert_eq!(inference.source, GridSource::Filename);
    }

    // Tests near-square fallback shapes
    #[test]
    fn test_near_square() {
        assert_eq!(near_square(0), GridDimensions::new(0, 0));
        assert_eq!(near_square(1), GridDimensions::new(1, 1));
        assert_eq!(near_square(2), GridDimensions::new(1, 2));
        assert_eq!(near_square(5), GridDimensions::new(2, 3));
        assert_eq!(near_square(9), GridDimensions::new(3, 3));
        assert_eq!(near_square(10), GridDimensions::new(3, 4));
    }

    // Tests that the fallback always holds every tile
    #[test]
    fn test_fallback_capacity() {
        for count in 1..50 {
            let dimensions = near_square(count);
            assert!(dimensions.cell_count() >= count, "{count} tiles in {dimensions}");
        }

        let inference = infer_grid(&tile_set(&[None; 7]), "plain.zip");
        assert_eq!(inference.source, GridSource::Fallback);
        assert_eq!(inference.dimensions, GridDimensions::new(2, 4));
    }

    // Tests source labels
    #[test]
    fn test_source_display() {
        assert_eq!(GridSource::Indices.to_string(), "indices");
        assert_eq!(GridSource::Descriptor.to_string(), "descriptor");
    }
}
