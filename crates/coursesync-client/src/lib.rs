//! # coursesync-client - Course Service Transport
//!
//! Everything needed to talk to the course service: the catalogue of remote
//! operations, per-request cancellation handles and the transport trait with
//! its HTTP implementation.
//!
//! Depends on [`coursesync_core`] for domain types, payload validation and
//! error handling.
//!
//! ## Public API
//!
//! ### Requests
//! - [`ApiRequest`] - One remote operation (method, path, body, expected payload)
//! - [`Method`], [`RequestBody`] - HTTP method and encoded body
//!
//! ### Cancellation
//! - [`CancelHandle`] - Handle bound 1:1 to an issued request
//! - [`HandleState`] - `Pending`, `Settled` or `Cancelled`
//! - [`RequestId`] - Process-unique request identifier
//!
//! ### Transport
//! - [`Transport`] - `Send` async trait the app layer issues requests through
//! - [`HttpTransport`] - `reqwest`-backed implementation

pub mod cancel;
pub mod request;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;
pub mod transport;

// Public API re-exports
pub use cancel::{next_request_id, CancelHandle, HandleState, RequestId};
pub use request::{ApiRequest, Method, RequestBody};
pub use transport::{HttpTransport, LocalTransport, Transport};
