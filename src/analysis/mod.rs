//! Ingestion analysis: from archive entries to an indexed tile set

/// Filename coordinate grammar
pub mod coordinates;
/// Grid dimension inference from coverage, names and counts
pub mod inference;
/// Index base normalization and deduplication
pub mod normalization;
/// End-to-end archive ingestion
pub mod pipeline;
