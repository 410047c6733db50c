//! # medhire-client
//!
//! HTTP plumbing shared by the session and jobs stores:
//! - [`ApiClient`]: reqwest wrapper with a fixed base URL, JSON headers, and a
//!   cookie jar so every request carries the backend's session cookie
//! - [`endpoints`]: logical operation → URL path registry
//! - Failure normalization: every non-2xx response becomes an [`ApiError`]
//!   whose message is the body's `message` field when present
//! - [`Transport`]: the seam the stores are generic over, so tests can swap
//!   in a scripted backend

mod client;
pub mod endpoints;
mod envelope;
mod error;
mod http;
mod request;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
mod transport;

pub use client::ApiClient;
pub use envelope::open_envelope;
pub use error::ApiError;
pub use request::{ApiRequest, FilePart, Method, MultipartForm, RequestBody};
pub use transport::Transport;
