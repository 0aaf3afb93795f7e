//! # reply
//!
//! HTTP responses as plain values. Nothing more. Nothing less.
//!
//! ## The contract
//!
//! A handler computes a [`Response`] and returns it. It does not write to a
//! connection, set headers on a live object, or pick a serializer. The value
//! is handed to [`render`], which writes it onto whatever [`Transport`] the
//! host engine provides: status first, then headers, then the body.
//!
//! What the host owns and reply ignores:
//!
//! - **Routing** and **request parsing**
//! - **Connection lifecycle**, keep-alive, TLS
//! - **Fallback responses**: turning a render [`Error`] into a `500`
//!
//! What's left for reply:
//!
//! - Immutable response values, text or JSON, with multi-valued headers
//! - Case-insensitive, order-preserving header folding
//! - Content-type defaults, JSON serialization via [`serde_json`]
//! - Two transports: [`HttpTransport`] (hyper / `http`) and [`WireTransport`]
//!   (raw HTTP/1.1)
//!
//! ## Quick start
//!
//! ```rust
//! use reply::{Response, Status, transport::to_http};
//!
//! fn get_user(id: u64) -> Response {
//!     Response::json(serde_json::json!({ "id": id, "name": "alice" }))
//!         .with_header("Cache-Control", "no-store")
//! }
//!
//! fn create_user() -> Response {
//!     Response::text("created")
//!         .with_status(Status::Created.code())
//!         .with_header("Location", "/users/99")
//! }
//!
//! let res = to_http(get_user(42)).unwrap();
//! assert_eq!(res.headers()["content-type"], "application/json; charset=utf-8");
//!
//! let res = to_http(create_user()).unwrap();
//! assert_eq!(res.status(), 201);
//! assert_eq!(res.headers()["location"], "/users/99");
//! ```

mod error;
mod headers;
mod render;
mod response;
mod status;

pub mod transport;

pub use error::{Error, TransportError};
pub use headers::{HeaderTable, Headers};
pub use render::{Transport, render};
pub use response::{ContentType, IntoResponse, JsonResponse, Response, TextResponse};
pub use status::{Status, reason_phrase};
pub use transport::{HttpTransport, WireTransport};
