//! Numeric-aware ordering for file names
//!
//! Splits names into digit and non-digit runs. Digit runs compare by numeric
//! value, text runs compare case-insensitively, so `tile2` sorts before
//! `tile10` and `Tile3` sits next to `tile3`.

use std::cmp::Ordering;

#[derive(Debug, PartialEq, Eq)]
enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(name: &str) -> Vec<Chunk<'_>> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut in_digits = None;

    for (index, ch) in name.char_indices() {
        let is_digit = ch.is_ascii_digit();
        match in_digits {
            Some(previous) if previous != is_digit => {
                if let Some(run) = name.get(start..index) {
                    result.push(if previous {
                        Chunk::Digits(run)
                    } else {
                        Chunk::Text(run)
                    });
                }
                start = index;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }

    if let (Some(digits), Some(run)) = (in_digits, name.get(start..)) {
        result.push(if digits {
            Chunk::Digits(run)
        } else {
            Chunk::Text(run)
        });
    }

    result
}

// Compares digit runs of arbitrary length without parsing them
fn compare_digits(a: &str, b: &str) -> Ordering {
    let a_trimmed = a.trim_start_matches('0');
    let b_trimmed = b.trim_start_matches('0');
    a_trimmed
        .len()
        .cmp(&b_trimmed.len())
        .then_with(|| a_trimmed.cmp(b_trimmed))
        // Fewer leading zeros first, so "7" precedes "007"
        .then_with(|| a.len().cmp(&b.len()))
}

fn compare_text(a: &str, b: &str) -> Ordering {
    let a_folded = a.chars().flat_map(char::to_lowercase);
    let b_folded = b.chars().flat_map(char::to_lowercase);
    a_folded.cmp(b_folded)
}

/// Compare two names in natural order
///
/// Total and deterministic: names that are equal under the natural rules
/// fall back to plain byte order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a_chunks = chunks(a);
    let b_chunks = chunks(b);

    for (left, right) in a_chunks.iter().zip(b_chunks.iter()) {
        let ordering = match (left, right) {
            (Chunk::Digits(x), Chunk::Digits(y)) => compare_digits(x, y),
            (Chunk::Text(x), Chunk::Text(y)) => compare_text(x, y),
            // Digits sort ahead of letters, matching common file browsers
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    a_chunks
        .len()
        .cmp(&b_chunks.len())
        .then_with(|| a.cmp(b))
}

/// Sort items in natural order of a string key
pub fn sort_naturally_by_key<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by(|a, b| natural_cmp(key(a), key(b)));
}
