//! Shared building blocks for tagbind.
//!
//! The validation engine only needs a read-only view of the inbound request
//! (so custom validators can inspect headers, method or path) and a way to
//! turn failures into a response. Those types live here together with the
//! framework error enum and the logging bootstrap.

pub mod error;
pub mod http;
pub mod logging;
pub mod status;

pub use error::Error;
pub use http::{HttpRequest, HttpResponse};
pub use status::HttpStatus;
