//! Tests for auto-solve layout construction

#[cfg(test)]
mod tests {
    use image::ImageFormat;
    use tilepuzzle::algorithm::solver::solve_layout;
    use tilepuzzle::spatial::grid::{GridDimensions, GridPosition};
    use tilepuzzle::spatial::tiles::{Coordinates, Tile, TileId, TileImage, TileSet};

    fn tile(name: &str, coordinates: Option<(usize, usize)>) -> Tile {
        Tile {
            id: TileId(0),
            display_name: name.to_string(),
            image: TileImage {
                entry_path: name.to_string(),
                format: ImageFormat::Png,
                data: vec![0],
            },
            coordinates: coordinates.map_or(Coordinates::Unknown, |(row, col)| {
                Coordinates::Known(GridPosition::new(row, col))
            }),
        }
    }

    // Tests that indexed tiles land on their own cells
    #[test]
    fn test_indexed_tiles_go_home() {
        let tiles = TileSet::new(vec![
            tile("r1c1.png", Some((1, 1))),
            tile("r0c0.png", Some((0, 0))),
            tile("r1c0.png", Some((1, 0))),
            tile("r0c1.png", Some((0, 1))),
        ]);

        let layout = solve_layout(&tiles, GridDimensions::new(2, 2));

        assert!(layout.unplaced.is_empty());
        for tile in &tiles {
            let position = tile.coordinates.position().unwrap();
            assert_eq!(layout.board.get(position), Some(tile.id));
        }
    }

    // Tests that unindexed tiles fill in natural name order, row-major
    // Verified by filling in extraction order
    #[test]
    fn test_unindexed_fill_in_natural_order() {
        let tiles = TileSet::new(vec![
            tile("piece10.png", None),
            tile("piece2.png", None),
            tile("piece1.png", None),
        ]);

        let layout = solve_layout(&tiles, GridDimensions::new(2, 2));

        assert_eq!(layout.board.get(GridPosition::new(0, 0)), Some(TileId(2)));
        assert_eq!(layout.board.get(GridPosition::new(0, 1)), Some(TileId(1)));
        assert_eq!(layout.board.get(GridPosition::new(1, 0)), Some(TileId(0)));
        assert_eq!(layout.board.get(GridPosition::new(1, 1)), None);
    }

    // Tests that unindexed tiles skip cells already claimed by indexed ones
    #[test]
    fn test_mixed_layout() {
        let tiles = TileSet::new(vec![tile("b.png", None), tile("r0c0.png", Some((0, 0)))]);

        let layout = solve_layout(&tiles, GridDimensions::new(1, 2));

        assert_eq!(layout.board.get(GridPosition::new(0, 0)), Some(TileId(1)));
        assert_eq!(layout.board.get(GridPosition::new(0, 1)), Some(TileId(0)));
    }

    // Tests leftovers when the board is too small
    #[test]
    fn test_leftovers_are_reported() {
        let tiles = TileSet::new(vec![tile("a.png", None), tile("b.png", None)]);

        let layout = solve_layout(&tiles, GridDimensions::new(1, 1));

        assert_eq!(layout.unplaced, vec![TileId(1)]);
        assert!(layout.board.is_full());
    }
}
