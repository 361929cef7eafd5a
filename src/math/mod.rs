//! Ordering utilities

/// Numeric-aware natural ordering of names
pub mod natural;
