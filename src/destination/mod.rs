//! Destination record module
//!
//! Describes which fields of a caller's record receive which row sets.
//!
//! # Overview
//!
//! A destination type declares its fields once, in a static [`Schema`],
//! and exposes it through the [`Destination`] trait. Every decode call
//! resolves that declaration into a fresh field map (row-set name to
//! collection accessor); the map is discarded when the call returns.
//!
//! ```rust,ignore
//! use eve_rowset::destination::{Destination, Schema};
//! use std::sync::LazyLock;
//!
//! struct CallList {
//!     call_groups: Vec<CallGroup>,
//!     calls: Vec<Call>,
//! }
//!
//! impl Destination for CallList {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<CallList>> = LazyLock::new(|| {
//!             Schema::<CallList>::builder()
//!                 .rows("call_groups", "callGroups", |d| &mut d.call_groups)
//!                 .rows("calls", "calls", |d| &mut d.calls)
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//! ```
//!
//! Records that are only known at runtime (`&mut dyn Any`) go through a
//! [`Registry`]; anything not registered is rejected as an invalid target.

mod resolver;
mod types;

pub use resolver::{FieldMap, Registry};
pub use types::{Destination, Schema, SchemaBuilder, Tag, SKIP_MARKER};

pub(crate) use resolver::{Bindings, Bound};
