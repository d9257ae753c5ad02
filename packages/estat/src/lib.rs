//! e-Stat client - Typed access to Japan's official statistics portal.
//!
//! This crate wraps the e-Stat REST API (version 3.0, XML responses): it
//! encodes typed request parameters, performs the HTTP exchange and decodes
//! the XML envelope into Rust types.
//!
//! # Example
//!
//! ```
//! use estat_client::params::{Condition, GetStatsDataParams};
//! use estat_client::query::ToQuery;
//!
//! let mut params = GetStatsDataParams::for_table("0003109741");
//! params.narrowing = params.narrowing.with_category(1, Condition::code("001"));
//! params.limit = Some(10);
//!
//! assert_eq!(
//!     params.to_query().encode(),
//!     "statsDataId=0003109741&cdCat01=001&limit=10"
//! );
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Environment configuration and client construction
//! - [`error`]: Error types and Result alias
//! - [`query`]: Ordered query-string building
//! - [`params`]: Request parameters for each operation
//! - [`xml`]: XML decoding helpers
//! - [`response`]: Response envelopes and records
//! - [`transport`]: HTTP transport
//! - [`context`]: Cancellation and deadlines for a call
//! - [`client`]: The operation methods
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod params;
pub mod query;
pub mod response;
pub mod transport;
pub mod xml;

// Re-export commonly used items
pub use client::EstatClient;
pub use config::EstatConfig;
pub use context::CallContext;
pub use error::{DecodeError, EstatError, Result, TransportError};
pub use transport::{HttpTransport, RawResponse, Transport};
