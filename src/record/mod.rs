//! Row record module
//!
//! Maps the attributes of a single `<row>` element onto a caller-defined
//! record type.
//!
//! # Overview
//!
//! The decoder never inspects row types itself. It collects the row's
//! attributes into an [`Attributes`] list and hands them to the row type's
//! [`FromAttributes`] implementation. Destination collections implement
//! [`RowSink`], which owns growth and rollback.

mod attributes;
mod types;

pub use attributes::{AttrError, Attributes};
pub use types::{FromAttributes, RowSink, MIN_ROW_CAPACITY};
