//! Tests for the filename coordinate grammar

#[cfg(test)]
mod tests {
    use image::ImageFormat;
    use tilepuzzle::analysis::coordinates::{
        CoordinatePattern, RawCoordinates, TileCandidate, parse_coordinates,
    };
    use tilepuzzle::io::archive::ArchiveEntry;

    fn pair(name: &str) -> Option<(i64, i64)> {
        parse_coordinates(name).map(|parsed| (parsed.coordinates.row, parsed.coordinates.col))
    }

    // Tests the short r/c convention with optional separators
    #[test]
    fn test_short_row_col() {
        assert_eq!(pair("r0c0.png"), Some((0, 0)));
        assert_eq!(pair("R12_C3.jpg"), Some((12, 3)));
        assert_eq!(pair("tile_r2-c5.png"), Some((2, 5)));
        assert_eq!(
            parse_coordinates("r1c2.png").map(|p| p.pattern),
            Some(CoordinatePattern::ShortRowCol)
        );
    }

    // Tests the long row/col convention
    #[test]
    fn test_long_row_col() {
        assert_eq!(pair("row3_col4.png"), Some((3, 4)));
        assert_eq!(pair("Row-1-Col-2.webp"), Some((1, 2)));
        assert_eq!(
            parse_coordinates("row3col4.png").map(|p| p.pattern),
            Some(CoordinatePattern::LongRowCol)
        );
    }

    // Tests the parenthesized pair convention
    #[test]
    fn test_parenthesized() {
        assert_eq!(pair("piece (2, 7).png"), Some((2, 7)));
        assert_eq!(
            parse_coordinates("(0,1).png").map(|p| p.pattern),
            Some(CoordinatePattern::Parenthesized)
        );
    }

    // Tests the bare digit pair convention and its separators
    #[test]
    fn test_digit_pair() {
        assert_eq!(pair("1_1.png"), Some((1, 1)));
        assert_eq!(pair("3x4.png"), Some((3, 4)));
        assert_eq!(pair("tile-5-6.png"), Some((5, 6)));
        assert_eq!(
            parse_coordinates("2_3.png").map(|p| p.pattern),
            Some(CoordinatePattern::DigitPair)
        );
    }

    // Tests that earlier patterns win when several could match
    // Verified by moving the digit pair pattern first
    #[test]
    fn test_pattern_priority() {
        assert_eq!(
            parse_coordinates("r1c2_3_4.png").map(|p| p.pattern),
            Some(CoordinatePattern::ShortRowCol)
        );
        assert_eq!(pair("r1c2_3_4.png"), Some((1, 2)));
    }

    // Tests that folders are ignored before matching
    #[test]
    fn test_folders_are_stripped() {
        assert_eq!(pair("set_9_9/r0c1.png"), Some((0, 1)));
        assert_eq!(pair("10x10\\plain.png"), None);
    }

    // Tests names without coordinates and letter-glued markers
    #[test]
    fn test_no_match() {
        assert_eq!(pair("tile.png"), None);
        assert_eq!(pair("tile_001.png"), None);
        assert_eq!(pair("color1c2.png"), None);
    }

    // Tests that overflowing digits count as no match
    #[test]
    fn test_overflow_is_no_match() {
        assert_eq!(pair("r99999999999999999999c1.png"), None);
    }

    // Tests candidate construction from an archive entry
    #[test]
    fn test_candidate_from_entry() {
        let entry = ArchiveEntry {
            path: "pieces/r2c3.png".to_string(),
            name: "r2c3.png".to_string(),
            format: ImageFormat::Png,
            data: vec![1],
        };

        let candidate = TileCandidate::from_entry(entry);
        assert_eq!(
            candidate.coordinates,
            Some(RawCoordinates { row: 2, col: 3 })
        );
    }
}
