//! Concrete [`Transport`](crate::Transport) implementations.
//!
//! - [`http`] builds an `http::Response` for hyper (or anything else speaking
//!   the `http` crate types).
//! - [`wire`] writes raw HTTP/1.1 to any `std::io::Write`.

pub mod http;
pub mod wire;

pub use self::http::{HttpResponse, HttpTransport, to_http};
pub use self::wire::WireTransport;
