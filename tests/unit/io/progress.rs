//! Tests for the extraction progress display

#[cfg(test)]
mod tests {
    use image::ImageFormat;
    use tilepuzzle::io::archive::{EntryKind, ExtractionObserver};
    use tilepuzzle::io::progress::ProgressManager;

    // Tests that accepted and skipped entries are counted separately
    // Verified by counting every entry as accepted
    #[test]
    fn test_counts_entries() {
        let mut progress = ProgressManager::hidden("uploads/set.zip");

        progress.started(3);
        progress.entry_scanned(0, "a.png", EntryKind::Image(ImageFormat::Png));
        progress.entry_scanned(1, "readme.txt", EntryKind::Junk);
        progress.entry_scanned(2, "b.png", EntryKind::Image(ImageFormat::Png));
        progress.finished(2);

        assert_eq!(progress.accepted(), 2);
        assert_eq!(progress.skipped(), 1);
        assert_eq!(progress.position(), 3);
    }

    // Tests that a new scan restarts the counters
    #[test]
    fn test_restart_resets_counts() {
        let mut progress = ProgressManager::hidden("set.zip");
        progress.started(1);
        progress.entry_scanned(0, "dir/", EntryKind::Directory);

        progress.started(2);

        assert_eq!(progress.skipped(), 0);
        assert_eq!(progress.position(), 0);
    }
}
