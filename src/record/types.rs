//! Record traits
//!
//! Defines the unmarshaling capability rows rely on and the collection
//! abstraction row sets are decoded into.

use super::attributes::{AttrError, Attributes};

/// Smallest capacity a destination collection grows to
pub const MIN_ROW_CAPACITY: usize = 4;

/// Trait for building a record from one row's attributes
pub trait FromAttributes: Sized {
    /// Build the record. Missing optional attributes should map to defaults.
    fn from_attributes(attrs: &Attributes) -> Result<Self, AttrError>;
}

impl<T: FromAttributes> FromAttributes for Box<T> {
    fn from_attributes(attrs: &Attributes) -> Result<Self, AttrError> {
        T::from_attributes(attrs).map(Box::new)
    }
}

/// Trait for growable, ordered row collections
pub trait RowSink {
    /// Number of rows currently held
    fn row_count(&self) -> usize;

    /// Append one row parsed from `attrs`.
    ///
    /// On error the collection is left exactly as it was before the call.
    fn push_row(&mut self, attrs: &Attributes) -> Result<(), AttrError>;
}

impl<T: FromAttributes> RowSink for Vec<T> {
    fn row_count(&self) -> usize {
        self.len()
    }

    fn push_row(&mut self, attrs: &Attributes) -> Result<(), AttrError> {
        let row = T::from_attributes(attrs)?;

        let len = self.len();
        if len == self.capacity() {
            let target = (len * 2).max(MIN_ROW_CAPACITY);
            self.reserve_exact(target - len);
        }

        self.push(row);
        Ok(())
    }
}
