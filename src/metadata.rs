//! Document metadata
//!
//! What a decode call learns about the document itself, independent of
//! which row sets the caller captured.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};

/// Metadata gathered while decoding one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Parsed `cachedUntil` value
    pub expires: DateTime<FixedOffset>,

    /// Every row set encountered, in document order
    pub row_sets: Vec<RowSet>,
}

impl Metadata {
    /// First row set with the given name
    pub fn row_set(&self, name: &str) -> Option<&RowSet> {
        self.row_sets.iter().find(|r| r.name == name)
    }

    /// Check if the cached result is stale at `now`
    pub fn is_expired_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> bool {
        *now >= self.expires
    }
}

/// Header information about a single row set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowSet {
    /// Name of the row set
    pub name: String,
    /// Key columns, in order of importance
    pub keys: Vec<String>,
    /// All columns present in the row set
    pub columns: Vec<String>,
}

impl RowSet {
    /// Check if a column is part of the row set's key
    pub fn is_key(&self, column: &str) -> bool {
        self.keys.iter().any(|k| k == column)
    }
}
