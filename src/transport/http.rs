//! Rendering onto the `http` crate's response type, as served by hyper.
//!
//! ```rust
//! use reply::{Response, transport::to_http};
//!
//! let res = to_http(Response::text("hello").with_header("X-Id", "7")).unwrap();
//! assert_eq!(res.status(), 200);
//! assert_eq!(res.headers()["x-id"], "7");
//! ```

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::StatusCode;
use http_body_util::Full;

use crate::error::{Error, TransportError};
use crate::render::{Transport, render};
use crate::response::Response;

/// What hyper's `service_fn` expects a handler future to resolve to.
pub type HttpResponse = http::Response<Full<Bytes>>;

enum State {
    AwaitingStatus,
    Head { status: StatusCode, headers: HeaderMap },
    Done(HttpResponse),
}

/// Collects the writes of one [`render`] into an [`HttpResponse`].
///
/// Status codes outside `100..=999` and header names or values the `http`
/// crate rejects fail with [`TransportError`].
pub struct HttpTransport {
    state: State,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { state: State::AwaitingStatus }
    }

    /// Returns the finished response.
    ///
    /// # Errors
    ///
    /// [`TransportError::Incomplete`] if the body has not been written yet.
    pub fn finish(self) -> Result<HttpResponse, TransportError> {
        match self.state {
            State::Done(res) => Ok(res),
            _ => Err(TransportError::Incomplete),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self { Self::new() }
}

impl Transport for HttpTransport {
    fn write_status(&mut self, code: u16) -> Result<(), TransportError> {
        match self.state {
            State::AwaitingStatus => {}
            State::Head { .. } => return Err(TransportError::OutOfOrder("status")),
            State::Done(_) => return Err(TransportError::Closed),
        }
        let status = StatusCode::from_u16(code).map_err(|_| TransportError::InvalidStatus(code))?;
        self.state = State::Head { status, headers: HeaderMap::new() };
        Ok(())
    }

    fn write_header(&mut self, name: &str, value: &str) -> Result<(), TransportError> {
        let headers = match &mut self.state {
            State::Head { headers, .. } => headers,
            State::AwaitingStatus => return Err(TransportError::OutOfOrder("header")),
            State::Done(_) => return Err(TransportError::Closed),
        };
        let invalid = || TransportError::InvalidHeader { name: name.to_owned() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        headers.append(header_name, header_value);
        Ok(())
    }

    fn write_body(&mut self, body: Bytes) -> Result<(), TransportError> {
        match std::mem::replace(&mut self.state, State::AwaitingStatus) {
            State::Head { status, headers } => {
                let mut res = http::Response::new(Full::new(body));
                *res.status_mut() = status;
                *res.headers_mut() = headers;
                self.state = State::Done(res);
                Ok(())
            }
            State::AwaitingStatus => Err(TransportError::OutOfOrder("body")),
            done @ State::Done(_) => {
                self.state = done;
                Err(TransportError::Closed)
            }
        }
    }
}

/// Renders `response` into a fresh [`HttpTransport`] and returns the result.
///
/// # Errors
///
/// Whatever [`render`] reports. Mapping an error to a fallback response is
/// left to the caller.
pub fn to_http(response: Response) -> Result<HttpResponse, Error> {
    let mut transport = HttpTransport::new();
    render(response, &mut transport)?;
    Ok(transport.finish()?)
}
