//! Row set document decoder
//!
//! Decodes API responses of the form
//!
//! ```text
//! <eveapi version="2">
//!   <result>
//!     <rowset name="callGroups" key="groupID" columns="groupID,name">
//!       <row groupID="1" name="Account and Market"/>
//!     </rowset>
//!   </result>
//!   <cachedUntil>2020-01-02 15:04:05</cachedUntil>
//! </eveapi>
//! ```
//!
//! # Overview
//!
//! Decoding is a single forward scan over the token stream. Row sets bound
//! to a field of the destination record are appended to that field row by
//! row; unbound row sets are skipped whole but still reported in the
//! returned [`Metadata`](crate::Metadata). The expiry text is captured
//! during the scan and parsed once the scan is over.

mod decoder;
mod header;
mod rows;
mod types;

pub use decoder::{decode, decode_reader, Decoder};
pub use header::{parse_header, split_list};
pub use types::{DecoderConfig, EXPIRY_ELEMENT, ROWSET_ELEMENT, ROW_ELEMENT};
