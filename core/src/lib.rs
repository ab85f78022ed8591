//! Client core for JSON APIs following the Brainstem convention.
//!
//! # Overview
//! Brainstem responses are paginated, side-load related records under
//! resource-type keys, and report failures as an array of typed errors. This
//! crate builds requests for such an API, sends them through a caller-supplied
//! [`Transport`], normalizes the outcome, and projects the parsed payload.
//!
//! # Design
//! - [`object`] holds the shallow key filters (`pick_by`, `compact`, `omit`).
//! - [`query`] flattens list options and encodes the query string.
//! - [`request`] builds the four operations and normalizes responses: a 2xx
//!   resolves with the parsed body, anything else rejects with it.
//! - [`response`] reads counts, pages, ids, error messages and side-loads.
//! - The crate never opens a socket; the transport owns all I/O.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod object;
pub mod query;
pub mod request;
pub mod response;
pub mod transport;

pub use client::BrainstemClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use http::{Credentials, HttpMethod, HttpRequest, HttpResponse};
pub use object::{compact, keep_all, omit, pick_by};
pub use query::{QueryParams, Selection};
pub use transport::{transport_fn, Transport, TransportError, TransportFn};
