//! Image entry extraction from ZIP archives
//!
//! Reads every entry of an archive, discards folders, operating-system junk,
//! metadata files and anything that is not a supported image, and returns
//! the rest in natural name order so downstream fallbacks are deterministic.

use crate::io::configuration::{
    ACCEPTED_EXTENSIONS, JUNK_FILE_NAMES, MACOS_METADATA_DIR, METADATA_STEMS,
};
use crate::io::error::{PuzzleError, Result};
use crate::math::natural::natural_cmp;
use image::ImageFormat;
use std::io::{Cursor, Read};

/// One qualifying image entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Full path inside the archive
    pub path: String,
    /// Path-stripped file name
    pub name: String,
    /// Image format derived from the extension
    pub format: ImageFormat,
    /// Raw entry bytes
    pub data: Vec<u8>,
}

/// Why an entry was kept or skipped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    /// Folder entry
    Directory,
    /// Resource forks, thumbnail caches, hidden files, readme/license files
    Junk,
    /// Extension outside the accepted image set
    Unsupported,
    /// Accepted image
    Image(ImageFormat),
}

/// Receives per-entry notifications while an archive is scanned
pub trait ExtractionObserver {
    /// Called once the entry count is known
    fn started(&mut self, _total_entries: usize) {}

    /// Called after each entry has been classified
    fn entry_scanned(&mut self, _index: usize, _path: &str, _kind: EntryKind) {}

    /// Called once with the number of accepted images
    fn finished(&mut self, _accepted: usize) {}
}

/// Observer that ignores every notification
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentObserver;

impl ExtractionObserver for SilentObserver {}

/// Strip folders from an archive path, accepting both separators
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Classify an archive entry by its path
pub fn classify_entry(path: &str, is_dir: bool) -> EntryKind {
    if is_dir || path.ends_with('/') || path.ends_with('\\') {
        return EntryKind::Directory;
    }

    if path
        .split(['/', '\\'])
        .any(|component| component == MACOS_METADATA_DIR)
    {
        return EntryKind::Junk;
    }

    let name = base_name(path);
    let lowered = name.to_ascii_lowercase();
    if lowered.starts_with('.') || JUNK_FILE_NAMES.contains(&lowered.as_str()) {
        return EntryKind::Junk;
    }

    let (stem, extension) = match lowered.rsplit_once('.') {
        Some((stem, extension)) => (stem, extension),
        None => (lowered.as_str(), ""),
    };
    if METADATA_STEMS.contains(&stem) {
        return EntryKind::Junk;
    }

    if !ACCEPTED_EXTENSIONS.contains(&extension) {
        return EntryKind::Unsupported;
    }

    ImageFormat::from_extension(extension).map_or(EntryKind::Unsupported, EntryKind::Image)
}

/// Extract qualifying image entries from archive bytes
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a readable ZIP archive or an entry fails to decompress
/// - No entry qualifies as an image tile
pub fn extract_image_entries(archive_name: &str, bytes: &[u8]) -> Result<Vec<ArchiveEntry>> {
    extract_image_entries_with(archive_name, bytes, &mut SilentObserver)
}

/// Extract qualifying image entries, reporting progress to an observer
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not a readable ZIP archive or an entry fails to decompress
/// - No entry qualifies as an image tile
pub fn extract_image_entries_with(
    archive_name: &str,
    bytes: &[u8],
    observer: &mut dyn ExtractionObserver,
) -> Result<Vec<ArchiveEntry>> {
    let read_error = |source| PuzzleError::ArchiveRead {
        archive: archive_name.to_string(),
        source,
    };

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(read_error)?;
    observer.started(archive.len());

    let mut entries = Vec::new();
    for index in 0..archive.len() {
        let mut file = archive.by_index(index).map_err(read_error)?;
        let path = file.name().to_string();
        let mut kind = classify_entry(&path, file.is_dir());

        if let EntryKind::Image(format) = kind {
            let mut data = Vec::new();
            file.read_to_end(&mut data)
                .map_err(|e| read_error(zip::result::ZipError::Io(e)))?;

            if data.is_empty() {
                log::debug!("Skipping empty entry '{path}'");
                kind = EntryKind::Junk;
            } else {
                entries.push(ArchiveEntry {
                    name: base_name(&path).to_string(),
                    path: path.clone(),
                    format,
                    data,
                });
            }
        } else {
            log::debug!("Skipping entry '{path}' ({kind:?})");
        }

        observer.entry_scanned(index, &path, kind);
    }

    observer.finished(entries.len());

    if entries.is_empty() {
        return Err(PuzzleError::EmptyArchive {
            archive: archive_name.to_string(),
        });
    }

    entries.sort_by(|a, b| natural_cmp(&a.name, &b.name).then_with(|| natural_cmp(&a.path, &b.path)));
    log::debug!(
        "Extracted {} image entries from '{archive_name}'",
        entries.len()
    );

    Ok(entries)
}
