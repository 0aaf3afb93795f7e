//! Response values and the [`IntoResponse`] conversion trait.
//!
//! A handler builds a [`Response`] and returns it. It never touches the
//! connection. Every `with_*` method consumes the value and returns a new one,
//! so a response is never changed after it has been handed somewhere else.
//! Clone it first if you need the original as well.
//!
//! ```rust
//! use reply::{Response, Status};
//!
//! let base = Response::text("hello");
//! let tagged = base.clone().with_header("X-Request-Id", "42");
//!
//! assert!(base.headers().is_empty());
//! assert_eq!(tagged.folded_headers().get("x-request-id").unwrap(), ["42"]);
//!
//! let created = Response::json(serde_json::json!({ "id": 42 }))
//!     .with_status(Status::Created.code())
//!     .with_header("Location", "/users/42");
//! assert_eq!(created.status(), 201);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::headers::{HeaderTable, Headers};
use crate::status::Status;

pub(crate) const CONTENT_TYPE: &str = "content-type";

// ── ContentType ───────────────────────────────────────────────────────────────

/// Content-type values for use with `with_content_type`. `Text` and `Json`
/// are the defaults `render` falls back to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Csv,
    Html,
    Json,
    OctetStream,
    Text,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Html => "text/html; charset=utf-8",
            Self::Json => "application/json; charset=utf-8",
            Self::OctetStream => "application/octet-stream",
            Self::Text => "text/plain; charset=utf-8",
        }
    }
}

// ── Shared head ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
struct Head {
    status: u16,
    headers: Headers,
}

impl Default for Head {
    fn default() -> Self {
        Self { status: Status::Ok.into(), headers: Headers::new() }
    }
}

impl Head {
    fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE))
            .find_map(|(_, values)| values.first())
            .map(String::as_str)
    }
}

/// Status, header and functional-update methods shared by both variants.
macro_rules! head_methods {
    () => {
        /// Status code, `200` unless changed.
        pub fn status(&self) -> u16 {
            self.head.status
        }

        /// Headers as stored, exact spelling preserved.
        pub fn headers(&self) -> &Headers {
            &self.head.headers
        }

        /// Case-insensitive fold of [`headers`](Self::headers).
        pub fn folded_headers(&self) -> HeaderTable {
            self.head.headers.fold()
        }

        /// First explicit `content-type` value under any casing.
        pub fn content_type(&self) -> Option<&str> {
            self.head.content_type()
        }

        /// Returns this response with `value` appended under `name`.
        pub fn with_header(self, name: &str, value: impl Into<String>) -> Self {
            self.with_headers(name, [value])
        }

        /// Returns this response with `values` appended under `name`, in order.
        pub fn with_headers<I, V>(mut self, name: &str, values: I) -> Self
        where
            I: IntoIterator<Item = V>,
            V: Into<String>,
        {
            self.head.headers.append(name, values);
            self
        }

        /// Returns this response with a different status code. Not validated.
        pub fn with_status(mut self, code: u16) -> Self {
            self.head.status = code;
            self
        }

        pub fn with_content_type(self, content_type: ContentType) -> Self {
            self.with_header(CONTENT_TYPE, content_type.as_str())
        }
    };
}

// ── TextResponse ──────────────────────────────────────────────────────────────

/// A plain-text response. Rendered as `text/plain; charset=utf-8` unless a
/// `content-type` header says otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextResponse {
    head: Head,
    body: String,
}

impl TextResponse {
    pub fn new(body: impl Into<String>) -> Self {
        Self { head: Head::default(), body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub(crate) fn into_body(self) -> String {
        self.body
    }

    head_methods!();
}

// ── JsonResponse ──────────────────────────────────────────────────────────────

/// Type-erased serializable body. `Arc` keeps responses cheap to clone.
pub(crate) trait JsonBody: Send + Sync {
    fn to_json(&self) -> serde_json::Result<Vec<u8>>;
}

impl<T: Serialize + Send + Sync> JsonBody for T {
    fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

/// A response whose body is serialized to JSON when it is rendered.
/// Rendered as `application/json; charset=utf-8` unless a `content-type`
/// header says otherwise.
#[derive(Clone)]
pub struct JsonResponse {
    head: Head,
    body: Arc<dyn JsonBody>,
}

impl JsonResponse {
    pub fn new<T>(body: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Self { head: Head::default(), body: Arc::new(body) }
    }

    /// Serializes the body. Fails for values serde_json cannot represent,
    /// such as maps with non-string keys.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        self.body.to_json()
    }

    head_methods!();
}

impl fmt::Debug for JsonResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonResponse")
            .field("head", &self.head)
            .finish_non_exhaustive()
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response value.
///
/// The variant set is closed: code that matches on a `Response` handles
/// every kind, and adding one is a compile error at each match.
///
/// ```rust
/// use reply::{ContentType, Response, Status};
///
/// Response::text("hello");
/// Response::json(vec![1, 2, 3]);
/// Response::empty(Status::NoContent.code());
///
/// Response::text("id,name\n1,alice\n")
///     .with_content_type(ContentType::Csv)
///     .with_headers("Cache-Control", ["no-cache", "no-store"]);
/// ```
#[derive(Clone, Debug)]
pub enum Response {
    Text(TextResponse),
    Json(JsonResponse),
}

impl Response {
    /// `200 OK` with a plain-text body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::Text(TextResponse::new(body))
    }

    /// `200 OK` with a body serialized to JSON at render time.
    pub fn json<T>(body: T) -> Self
    where
        T: Serialize + Send + Sync + 'static,
    {
        Self::Json(JsonResponse::new(body))
    }

    /// Text response with an empty body, e.g. `204 No Content`.
    pub fn empty(code: u16) -> Self {
        Self::text(String::new()).with_status(code)
    }

    fn head(&self) -> &Head {
        match self {
            Self::Text(r) => &r.head,
            Self::Json(r) => &r.head,
        }
    }

    fn head_mut(&mut self) -> &mut Head {
        match self {
            Self::Text(r) => &mut r.head,
            Self::Json(r) => &mut r.head,
        }
    }

    /// `"text"` or `"json"`, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Json(_) => "json",
        }
    }

    pub fn status(&self) -> u16 {
        self.head().status
    }

    pub fn headers(&self) -> &Headers {
        &self.head().headers
    }

    pub fn folded_headers(&self) -> HeaderTable {
        self.head().headers.fold()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.head().content_type()
    }

    /// Returns this response with `value` appended under `name`.
    pub fn with_header(self, name: &str, value: impl Into<String>) -> Self {
        self.with_headers(name, [value])
    }

    /// Returns this response with `values` appended under `name`, in order.
    pub fn with_headers<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.head_mut().headers.append(name, values);
        self
    }

    /// Any `u16` is kept as-is; use [`Status::code`] for the typed names.
    pub fn with_status(mut self, code: u16) -> Self {
        self.head_mut().status = code;
        self
    }

    pub fn with_content_type(self, content_type: ContentType) -> Self {
        self.with_header(CONTENT_TYPE, content_type.as_str())
    }
}

impl From<TextResponse> for Response {
    fn from(r: TextResponse) -> Self {
        Self::Text(r)
    }
}

impl From<JsonResponse> for Response {
    fn from(r: JsonResponse) -> Self {
        Self::Json(r)
    }
}

// ── IntoResponse ──────────────────────────────────────────────────────────────

/// Conversion into a [`Response`].
///
/// Implement on your own types to return them directly from handlers.
///
/// ```rust
/// use reply::{IntoResponse, Response, Status};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { id: u64, name: String }
///
/// impl IntoResponse for User {
///     fn into_response(self) -> Response {
///         Response::json(self)
///     }
/// }
///
/// fn get_user() -> impl IntoResponse {
///     User { id: 1, name: "alice".into() }
/// }
///
/// fn delete_user() -> impl IntoResponse {
///     Status::NoContent
/// }
/// ```
pub trait IntoResponse {
    fn into_response(self) -> Response;
}

impl IntoResponse for Response {
    fn into_response(self) -> Response { self }
}

impl IntoResponse for TextResponse {
    fn into_response(self) -> Response { Response::Text(self) }
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response { Response::Json(self) }
}

impl IntoResponse for &'static str {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for String {
    fn into_response(self) -> Response { Response::text(self) }
}

impl IntoResponse for serde_json::Value {
    fn into_response(self) -> Response { Response::json(self) }
}

/// Return a [`Status`] directly from a handler: `return Status::NotFound`
impl IntoResponse for Status {
    fn into_response(self) -> Response { Response::empty(self.code()) }
}
