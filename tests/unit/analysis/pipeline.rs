//! Tests for end-to-end archive ingestion

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use tilepuzzle::PuzzleError;
    use tilepuzzle::analysis::inference::GridSource;
    use tilepuzzle::analysis::normalization::IndexBase;
    use tilepuzzle::analysis::pipeline::{ingest_archive, ingest_entries};
    use tilepuzzle::spatial::grid::{GridDimensions, GridPosition};
    use tilepuzzle::spatial::tiles::Coordinates;
    use zip::write::SimpleFileOptions;
    use zip::{CompressionMethod, ZipWriter};

    fn zip_archive(names: &[&str]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        for name in names {
            if name.ends_with('/') {
                writer.add_directory(*name, options).unwrap();
            } else {
                writer.start_file(*name, options).unwrap();
                writer.write_all(b"pixels").unwrap();
            }
        }
        writer.finish().unwrap().into_inner()
    }

    fn positions(puzzle: &tilepuzzle::analysis::pipeline::IngestedPuzzle) -> Vec<(String, Coordinates)> {
        puzzle
            .tiles
            .iter()
            .map(|tile| (tile.display_name.clone(), tile.coordinates))
            .collect()
    }

    // Tests a clean zero-based archive with junk entries mixed in
    #[test]
    fn test_zero_based_archive() {
        let bytes = zip_archive(&[
            "pieces/",
            "pieces/r1c1.png",
            "pieces/r0c0.png",
            "pieces/r1c0.png",
            "pieces/r0c1.png",
            "__MACOSX/pieces/._r0c0.png",
            ".DS_Store",
            "readme.txt",
        ]);

        let puzzle = ingest_archive("set.zip", &bytes, None).unwrap();

        assert_eq!(puzzle.tiles.len(), 4);
        assert_eq!(puzzle.grid.dimensions, GridDimensions::new(2, 2));
        assert_eq!(puzzle.grid.source, GridSource::Indices);
        assert_eq!(puzzle.index_base, IndexBase::ZeroBased);
        assert_eq!(puzzle.report.entries, 4);
        assert_eq!(puzzle.report.indexed, 4);
        assert!(puzzle.tiles.all_indexed());
    }

    // Tests that a 1-based digit pair archive is shifted
    // Verified by disabling normalization
    #[test]
    fn test_one_based_archive() {
        let bytes = zip_archive(&["1_1.png", "1_2.png", "2_1.png", "2_2.png"]);

        let puzzle = ingest_archive("set.zip", &bytes, None).unwrap();

        assert_eq!(puzzle.index_base, IndexBase::OneBasedShifted);
        assert_eq!(puzzle.grid.dimensions, GridDimensions::new(2, 2));
        assert_eq!(
            positions(&puzzle),
            vec![
                ("1_1.png".to_string(), Coordinates::Known(GridPosition::new(0, 0))),
                ("1_2.png".to_string(), Coordinates::Known(GridPosition::new(0, 1))),
                ("2_1.png".to_string(), Coordinates::Known(GridPosition::new(1, 0))),
                ("2_2.png".to_string(), Coordinates::Known(GridPosition::new(1, 1))),
            ]
        );
    }

    // Tests that duplicates keep the first entry in extraction order
    #[test]
    fn test_duplicate_coordinates() {
        let bytes = zip_archive(&["r0c0.png", "copy/r0c0.png", "r0c1.png"]);

        let puzzle = ingest_archive("set.zip", &bytes, None).unwrap();

        assert_eq!(puzzle.tiles.len(), 2);
        assert_eq!(puzzle.report.duplicates, 1);
        let first = puzzle.tiles.iter().next().unwrap();
        assert_eq!(first.image.entry_path, "copy/r0c0.png");
    }

    // Tests that descriptor bounds win and drop tiles outside them
    #[test]
    fn test_descriptor_bounds() {
        let bytes = zip_archive(&["r0c0.png", "r0c1.png", "r5c5.png"]);

        let puzzle =
            ingest_archive("set.zip", &bytes, Some(GridDimensions::new(2, 2))).unwrap();

        assert_eq!(puzzle.grid.source, GridSource::Descriptor);
        assert_eq!(puzzle.grid.dimensions, GridDimensions::new(2, 2));
        assert_eq!(puzzle.tiles.len(), 2);
        assert_eq!(puzzle.report.out_of_bounds, 1);
    }

    // Tests that surplus tiles beyond the board capacity are trimmed
    #[test]
    fn test_capacity_trim() {
        let bytes = zip_archive(&["e.png", "a.png", "c.png", "b.png", "d.png"]);

        let puzzle =
            ingest_archive("set.zip", &bytes, Some(GridDimensions::new(2, 2))).unwrap();

        let names: Vec<&str> = puzzle.tiles.iter().map(|t| t.display_name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "b.png", "c.png", "d.png"]);
        assert_eq!(puzzle.report.overflow, 1);
    }

    // Tests that only tiles without coordinates give way when cells run out
    // Verified by trimming the first tiles in set order regardless of indices
    #[test]
    fn test_capacity_trim_keeps_indexed_tiles() {
        let bytes = zip_archive(&[
            "a.png", "b.png", "r0c0.png", "r0c1.png", "r1c0.png", "r1c1.png",
        ]);

        let puzzle = ingest_archive("mixed.zip", &bytes, None).unwrap();

        assert_eq!(puzzle.grid.source, GridSource::Indices);
        assert_eq!(puzzle.grid.dimensions, GridDimensions::new(2, 2));
        let names: Vec<&str> = puzzle.tiles.iter().map(|t| t.display_name.as_str()).collect();
        assert_eq!(names, vec!["r0c0.png", "r0c1.png", "r1c0.png", "r1c1.png"]);
        assert!(puzzle.tiles.all_indexed());
        assert_eq!(puzzle.report.overflow, 2);
    }

    // Tests that unindexed tiles fill only the cells indexed tiles leave free
    #[test]
    fn test_capacity_trim_fills_free_cells() {
        let bytes = zip_archive(&["a.png", "b.png", "r0c0.png"]);

        let puzzle =
            ingest_archive("set.zip", &bytes, Some(GridDimensions::new(1, 2))).unwrap();

        assert_eq!(puzzle.tiles.len(), 2);
        assert_eq!(puzzle.tiles.indexed_count(), 1);
        assert_eq!(puzzle.report.overflow, 1);
    }

    // Tests that oversized known dimensions are ignored in favour of inference
    #[test]
    fn test_oversized_bounds_ignored() {
        let bytes = zip_archive(&["r0c0.png", "r0c1.png"]);

        let puzzle = ingest_archive(
            "set.zip",
            &bytes,
            Some(GridDimensions::new(4_000_000_000, 4_000_000_000)),
        )
        .unwrap();

        assert_eq!(puzzle.grid.source, GridSource::Indices);
        assert_eq!(puzzle.grid.dimensions, GridDimensions::new(1, 2));
    }

    // Tests that huge numbers in names never overflow grid inference
    #[test]
    fn test_huge_numbers_in_names() {
        let overflowing = zip_archive(&["r10000000000c10000000000.png"]);
        let puzzle = ingest_archive("big.zip", &overflowing, None).unwrap();
        assert_eq!(puzzle.grid.source, GridSource::Fallback);
        assert_eq!(puzzle.grid.dimensions, GridDimensions::new(1, 1));

        let plain = zip_archive(&["a.png"]);
        let puzzle = ingest_archive("p_1x1000000000000000000.zip", &plain, None).unwrap();
        assert_eq!(puzzle.grid.source, GridSource::Fallback);
    }

    // Tests that unindexed archives fall back to a near-square board
    #[test]
    fn test_unindexed_archive_fallback() {
        let bytes = zip_archive(&["a.png", "b.png", "c.png", "d.png", "e.png"]);

        let puzzle = ingest_archive("photos.zip", &bytes, None).unwrap();

        assert_eq!(puzzle.index_base, IndexBase::NoIndices);
        assert_eq!(puzzle.grid.source, GridSource::Fallback);
        assert_eq!(puzzle.grid.dimensions, GridDimensions::new(2, 3));
        assert_eq!(puzzle.tiles.missing_count(), 5);
    }

    // Tests empty and unreadable archives
    #[test]
    fn test_empty_and_unreadable() {
        let only_junk = zip_archive(&["readme.txt", "folder/"]);
        assert!(matches!(
            ingest_archive("junk.zip", &only_junk, None),
            Err(PuzzleError::EmptyArchive { .. })
        ));

        assert!(matches!(
            ingest_archive("bad.zip", b"definitely not a zip", None),
            Err(PuzzleError::ArchiveRead { .. })
        ));

        assert!(matches!(
            ingest_entries("none.zip", Vec::new(), None),
            Err(PuzzleError::EmptyArchive { .. })
        ));
    }
}
