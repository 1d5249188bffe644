//! Attribute lists and typed lookups

use crate::types::{parse_time, TIME_FORMAT};
use chrono::{DateTime, FixedOffset};
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

/// Error raised while turning a row's attributes into a record
#[derive(Error, Debug)]
pub enum AttrError {
    #[error("Missing required attribute: {name}")]
    Missing { name: String },

    #[error("Invalid value '{value}' for attribute '{name}': {message}")]
    Invalid {
        name: String,
        value: String,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl AttrError {
    /// Create a missing attribute error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }

    /// Create an invalid value error
    pub fn invalid(
        name: impl Into<String>,
        value: impl Into<String>,
        message: impl Display,
    ) -> Self {
        Self::Invalid {
            name: name.into(),
            value: value.into(),
            message: message.to_string(),
        }
    }
}

/// Attributes of a single element, in document order.
///
/// Names are local names (any namespace prefix stripped). Values are
/// already unescaped. Lookups are case-sensitive and return the first
/// attribute with a matching name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    /// Create an empty attribute list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an attribute
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the element carried no attributes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Raw attribute value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value as an owned string, empty when missing
    pub fn string(&self, name: &str) -> String {
        self.get(name).unwrap_or_default().to_string()
    }

    /// Parse an attribute, falling back to `T::default()` when it is missing.
    pub fn parse<T>(&self, name: &str) -> Result<T, AttrError>
    where
        T: FromStr + Default,
        T::Err: Display,
    {
        Ok(self.parse_opt(name)?.unwrap_or_default())
    }

    /// Parse an attribute if present
    pub fn parse_opt<T>(&self, name: &str) -> Result<Option<T>, AttrError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.get(name)
            .map(|value| {
                value
                    .parse::<T>()
                    .map_err(|e| AttrError::invalid(name, value, e))
            })
            .transpose()
    }

    /// Parse an attribute that must be present
    pub fn required<T>(&self, name: &str) -> Result<T, AttrError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.parse_opt(name)?
            .ok_or_else(|| AttrError::missing(name))
    }

    /// Parse a boolean attribute. The API writes these as `1`/`0` or
    /// `True`/`False`; a missing attribute is `false`.
    pub fn flag(&self, name: &str) -> Result<bool, AttrError> {
        match self.get(name) {
            None => Ok(false),
            Some("1" | "t" | "T" | "TRUE" | "true" | "True") => Ok(true),
            Some("0" | "f" | "F" | "FALSE" | "false" | "False") => Ok(false),
            Some(other) => Err(AttrError::invalid(name, other, "not a boolean")),
        }
    }

    /// Parse a date-time attribute in the API time format.
    ///
    /// Always uses [`TIME_FORMAT`] with its exact `YYYY-MM-DD HH:MM:SS`
    /// layout, whatever `time_format` the decoder was configured with; that
    /// setting only governs the document expiry. Missing or empty
    /// attributes yield `None`.
    pub fn timestamp(
        &self,
        name: &str,
        timezone: FixedOffset,
    ) -> Result<Option<DateTime<FixedOffset>>, AttrError> {
        match self.get(name) {
            None | Some("") => Ok(None),
            Some(value) => parse_time(value, TIME_FORMAT, timezone)
                .map(Some)
                .map_err(|e| AttrError::invalid(name, value, e)),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
