//! The adapter: turns a [`Response`] value into writes on a [`Transport`].
//!
//! ```text
//! handler ──► Response ──► render ──► write_status ──► write_header × n ──► write_body
//! ```
//!
//! The body is serialized before anything is written, so a serialization
//! error leaves the transport untouched and the caller can still answer on it.

use bytes::Bytes;
use tracing::{debug, warn};

use crate::error::{Error, TransportError};
use crate::response::{CONTENT_TYPE, ContentType, Response};

/// The three write primitives a host engine exposes for one response.
///
/// Each response calls `write_status` once, then `write_header` once per
/// header value, then `write_body` once. A transport is single-writer: do not
/// render two responses onto the same transport concurrently.
pub trait Transport {
    /// Receives the raw status code. Validation, if any, is up to the
    /// transport.
    fn write_status(&mut self, code: u16) -> Result<(), TransportError>;

    fn write_header(&mut self, name: &str, value: &str) -> Result<(), TransportError>;

    fn write_body(&mut self, body: Bytes) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_status(&mut self, code: u16) -> Result<(), TransportError> {
        (**self).write_status(code)
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        (**self).write_header(name, value)
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), TransportError> {
        (**self).write_body(body)
    }
}

/// Renders `response` onto `transport`.
///
/// Headers are folded case-insensitively and written with lower-cased names,
/// one `write_header` call per value, in order. A default `content-type` is
/// added only when the response has no explicit one.
///
/// # Errors
///
/// [`Error::Serialization`] when a JSON body cannot be serialized (nothing is
/// written), [`Error::Transport`] when a write fails. Neither is retried.
pub fn render<T>(response: Response, transport: &mut T) -> Result<(), Error>
where
    T: Transport + ?Sized,
{
    let status = response.status();
    let kind = response.kind();
    let headers = response.folded_headers();

    let (default_type, body) = match response {
        Response::Text(text) => (ContentType::Text, Bytes::from(text.into_body())),
        Response::Json(json) => match json.to_json() {
            Ok(bytes) => (ContentType::Json, Bytes::from(bytes)),
            Err(e) => {
                warn!(status, "json body serialization failed: {e}");
                return Err(e.into());
            }
        },
    };

    let explicit_type = headers.get(CONTENT_TYPE).is_some_and(|v| !v.is_empty());

    debug!(status, kind, headers = headers.len(), body_len = body.len(), "rendering response");

    transport.write_status(status)?;
    for (name, values) in headers.iter() {
        for value in values {
            transport.write_header(name, value)?;
        }
    }
    if !explicit_type {
        transport.write_header(CONTENT_TYPE, default_type.as_str())?;
    }
    transport.write_body(body)?;
    Ok(())
}
