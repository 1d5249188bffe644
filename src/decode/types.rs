//! Decoder configuration

use crate::types::{default_timezone, TIME_FORMAT};
use chrono::FixedOffset;

/// Element holding the document's cache expiry
pub const EXPIRY_ELEMENT: &str = "cachedUntil";

/// Element wrapping one row set
pub const ROWSET_ELEMENT: &str = "rowset";

/// Element carrying one row
pub const ROW_ELEMENT: &str = "row";

/// Configuration for a decode call
///
/// Element names are matched against local names, case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Zone the expiry time is interpreted in
    pub timezone: FixedOffset,
    /// chrono format string for the expiry time
    pub time_format: String,
    /// Expiry element name
    pub expiry_element: String,
    /// Row set element name
    pub rowset_element: String,
    /// Row element name
    pub row_element: String,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            time_format: TIME_FORMAT.to_string(),
            expiry_element: EXPIRY_ELEMENT.to_string(),
            rowset_element: ROWSET_ELEMENT.to_string(),
            row_element: ROW_ELEMENT.to_string(),
        }
    }
}

impl DecoderConfig {
    /// Create a config with the API defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timezone
    #[must_use]
    pub fn with_timezone(mut self, timezone: FixedOffset) -> Self {
        self.timezone = timezone;
        self
    }

    /// Set the expiry time format
    #[must_use]
    pub fn with_time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Set the expiry element name
    #[must_use]
    pub fn with_expiry_element(mut self, name: impl Into<String>) -> Self {
        self.expiry_element = name.into();
        self
    }
}
