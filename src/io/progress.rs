//! Terminal progress display while archives are scanned

use crate::io::archive::{EntryKind, ExtractionObserver, base_name};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;

static ENTRY_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Progress bar over the entries of one archive
///
/// Counts accepted tiles as it goes and shows the entry being scanned.
pub struct ProgressManager {
    bar: ProgressBar,
    accepted: usize,
    skipped: usize,
}

impl ProgressManager {
    /// Progress bar drawn to the terminal, labelled with the archive name
    pub fn new(archive_name: &str) -> Self {
        Self::with_target(archive_name, ProgressDrawTarget::stderr())
    }

    /// Progress bar that never draws, for quiet runs
    pub fn hidden(archive_name: &str) -> Self {
        Self::with_target(archive_name, ProgressDrawTarget::hidden())
    }

    fn with_target(archive_name: &str, target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target);
        bar.set_style(ENTRY_STYLE.clone());
        bar.set_prefix(base_name(archive_name).to_string());
        Self {
            bar,
            accepted: 0,
            skipped: 0,
        }
    }

    /// Tiles accepted so far
    pub const fn accepted(&self) -> usize {
        self.accepted
    }

    /// Entries skipped so far
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Entries scanned so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ExtractionObserver for ProgressManager {
    fn started(&mut self, total_entries: usize) {
        self.accepted = 0;
        self.skipped = 0;
        self.bar.set_length(total_entries as u64);
        self.bar.set_position(0);
    }

    fn entry_scanned(&mut self, _index: usize, path: &str, kind: EntryKind) {
        if matches!(kind, EntryKind::Image(_)) {
            self.accepted += 1;
        } else {
            self.skipped += 1;
        }
        self.bar.set_message(base_name(path).to_string());
        self.bar.inc(1);
    }

    fn finished(&mut self, accepted: usize) {
        self.bar
            .finish_with_message(format!("{accepted} tiles, {} skipped", self.skipped));
    }
}
