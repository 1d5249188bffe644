//! # eve-rowset
//!
//! Streaming decoder for EVE API "row set" XML responses.
//!
//! ## Features
//!
//! - **Single Pass**: One forward scan over the token stream, no buffering of the document tree
//! - **Typed Destinations**: Row sets land in caller-defined `Vec<T>` fields
//! - **Complete Metadata**: Every row set's name, keys and columns, plus the cache expiry
//! - **Fetch and Decode**: Optional reqwest-based client for the API
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eve_rowset::destination::{Destination, Schema};
//! use eve_rowset::record::{AttrError, Attributes, FromAttributes};
//! use std::sync::LazyLock;
//!
//! struct CallGroup {
//!     id: i32,
//!     name: String,
//! }
//!
//! impl FromAttributes for CallGroup {
//!     fn from_attributes(attrs: &Attributes) -> Result<Self, AttrError> {
//!         Ok(Self {
//!             id: attrs.parse("groupID")?,
//!             name: attrs.string("name"),
//!         })
//!     }
//! }
//!
//! #[derive(Default)]
//! struct CallList {
//!     call_groups: Vec<CallGroup>,
//! }
//!
//! impl Destination for CallList {
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: LazyLock<Schema<CallList>> = LazyLock::new(|| {
//!             Schema::<CallList>::builder()
//!                 .rows("call_groups", "callGroups", |d| &mut d.call_groups)
//!                 .build()
//!         });
//!         &SCHEMA
//!     }
//! }
//!
//! let mut out = CallList::default();
//! let meta = eve_rowset::decode(xml.as_bytes(), &mut out)?;
//! println!("cached until {}", meta.expires);
//! ```
//!
//! ## Architecture
//!
//! ```text
//! bytes ──► Decoder (token scan) ──► header ──► FieldMap lookup ──► rows ──► Vec<T>
//!                 │                                                   │
//!                 └── cachedUntil text                 FromAttributes ┘
//!                           │
//!                           └──► Metadata { expires, row_sets }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// Row records and the attribute unmarshaler
pub mod record;

/// Destination record declarations and field resolution
pub mod destination;

/// Document metadata
pub mod metadata;

/// Row set document decoder
pub mod decode;

/// HTTP transport
pub mod http;

// ============================================================================
// Re-exports
// ============================================================================

pub use decode::{decode, decode_reader, Decoder, DecoderConfig};
pub use destination::{Destination, Registry, Schema, Tag};
pub use error::{Error, Result};
pub use http::{call, Client, ClientConfig};
pub use metadata::{Metadata, RowSet};
pub use record::{AttrError, Attributes, FromAttributes, RowSink};
pub use types::{default_timezone, TIME_FORMAT};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
