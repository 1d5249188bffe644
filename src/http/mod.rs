//! HTTP transport module
//!
//! Fetches API documents and decodes them in one call.
//!
//! # Features
//!
//! - **Endpoint Resolution**: Relative endpoints resolve against a base URL
//! - **Single GET**: No retries; non-2xx responses surface as transport errors
//! - **Configuration**: Builder and YAML loading for client settings

mod client;

pub use client::{call, Client, ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL};
