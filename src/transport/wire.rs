//! Raw HTTP/1.1 onto any `std::io::Write`.
//!
//! ```rust
//! use reply::{Response, WireTransport, render};
//!
//! let mut wire = WireTransport::new(Vec::new());
//! render(Response::text("hi"), &mut wire).unwrap();
//! assert_eq!(
//!     wire.into_inner(),
//!     b"HTTP/1.1 200 OK\r\n\
//!       content-type: text/plain; charset=utf-8\r\n\
//!       content-length: 2\r\n\
//!       \r\n\
//!       hi",
//! );
//! ```

use std::io::Write;

use bytes::Bytes;

use crate::error::TransportError;
use crate::render::Transport;
use crate::status::reason_phrase;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    Status,
    Headers,
    Closed,
}

/// Writes one HTTP/1.1 response: status line, header lines,
/// `content-length`, blank line, body.
///
/// The transport owns message framing: `content-length` and
/// `transfer-encoding` headers from the response are dropped, and
/// `content-length` is omitted for 1xx, 204 and 304.
///
/// Rejects status codes that are not three digits, header names that are
/// not RFC 9110 tokens, and values containing CR or LF.
pub struct WireTransport<W> {
    writer: W,
    stage: Stage,
    status: u16,
}

impl<W: Write> WireTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, stage: Stage::Status, status: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn at_stage(&self, stage: Stage, what: &'static str) -> Result<(), TransportError> {
        match self.stage {
            s if s == stage => Ok(()),
            Stage::Closed => Err(TransportError::Closed),
            _ => Err(TransportError::OutOfOrder(what)),
        }
    }
}

// tchar = "!" / "#" / "$" / "%" / "&" / "'" / "*" / "+" / "-" / "." /
//         "^" / "_" / "`" / "|" / "~" / DIGIT / ALPHA
fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

fn valid_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(is_tchar)
}

fn is_framing(name: &str) -> bool {
    name.eq_ignore_ascii_case("content-length") || name.eq_ignore_ascii_case("transfer-encoding")
}

// RFC 9110 §8.6: no content-length on 1xx or 204; 304 would describe a body
// that is not sent.
fn has_length(status: u16) -> bool {
    !matches!(status, 100..=199 | 204 | 304)
}

fn valid_value(value: &str) -> bool {
    !value.bytes().any(|b| matches!(b, b'\r' | b'\n'))
}

impl<W: Write> Transport for WireTransport<W> {
    fn write_status(&mut self, code: u16) -> Result<(), TransportError> {
        self.at_stage(Stage::Status, "status")?;
        if !(100..=999).contains(&code) {
            return Err(TransportError::InvalidStatus(code));
        }
        let reason = reason_phrase(code).unwrap_or("");
        write!(self.writer, "HTTP/1.1 {code} {reason}\r\n")?;
        self.status = code;
        self.stage = Stage::Headers;
        Ok(())
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        self.at_stage(Stage::Headers, "header")?;
        if !valid_name(name) || !valid_value(value) {
            return Err(TransportError::InvalidHeader { name: name.to_owned() });
        }
        if is_framing(name) {
            return Ok(());
        }
        write!(self.writer, "{name}: {value}\r\n")?;
        Ok(())
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), TransportError> {
        self.at_stage(Stage::Headers, "body")?;
        self.stage = Stage::Closed;
        if has_length(self.status) {
            write!(self.writer, "content-length: {}\r\n", body.len())?;
        }
        self.writer.write_all(b"\r\n")?;
        self.writer.write_all(&body)?;
        self.writer.flush()?;
        Ok(())
    }
}
