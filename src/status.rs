//! HTTP status codes as a typed enum.
//!
//! A [`Response`](crate::Response) carries its status as a plain `u16`, so any
//! integer is accepted and handed to the transport untouched. [`Status`] is
//! the typed way to spell the registered ones:
//!
//! ```rust
//! use reply::{Response, Status};
//!
//! Response::empty(Status::NoContent.code());
//! Response::text("created").with_status(Status::Created.code());
//! Response::text("teapot").with_status(418);
//! ```

macro_rules! statuses {
    ($( $(#[$section:meta])* $variant:ident = $code:literal, $reason:literal; )*) => {
        /// All IANA-registered HTTP status codes.
        #[allow(clippy::enum_variant_names)]
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        pub enum Status {
            $( $(#[$section])* $variant, )*
        }

        impl Status {
            /// Looks up the typed status for a numeric code.
            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )*
                    _ => None,
                }
            }

            pub fn code(self) -> u16 {
                match self {
                    $( Self::$variant => $code, )*
                }
            }

            /// Canonical reason phrase, e.g. `"Not Found"`.
            pub fn reason(self) -> &'static str {
                match self {
                    $( Self::$variant => $reason, )*
                }
            }
        }
    };
}

statuses! {
    // ── 1xx Informational ─────────────────────────────────────────────────────
    Continue                      = 100, "Continue";
    SwitchingProtocols            = 101, "Switching Protocols";
    Processing                    = 102, "Processing";
    EarlyHints                    = 103, "Early Hints";

    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok                            = 200, "OK";
    Created                       = 201, "Created";
    Accepted                      = 202, "Accepted";
    NonAuthoritativeInformation   = 203, "Non-Authoritative Information";
    NoContent                     = 204, "No Content";
    ResetContent                  = 205, "Reset Content";
    PartialContent                = 206, "Partial Content";
    MultiStatus                   = 207, "Multi-Status";
    AlreadyReported               = 208, "Already Reported";
    ImUsed                        = 226, "IM Used";

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    MultipleChoices               = 300, "Multiple Choices";
    MovedPermanently              = 301, "Moved Permanently";
    Found                         = 302, "Found";
    SeeOther                      = 303, "See Other";
    NotModified                   = 304, "Not Modified";
    TemporaryRedirect             = 307, "Temporary Redirect";
    PermanentRedirect             = 308, "Permanent Redirect";

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest                    = 400, "Bad Request";
    Unauthorized                  = 401, "Unauthorized";
    PaymentRequired               = 402, "Payment Required";
    Forbidden                     = 403, "Forbidden";
    NotFound                      = 404, "Not Found";
    MethodNotAllowed              = 405, "Method Not Allowed";
    NotAcceptable                 = 406, "Not Acceptable";
    ProxyAuthenticationRequired   = 407, "Proxy Authentication Required";
    RequestTimeout                = 408, "Request Timeout";
    Conflict                      = 409, "Conflict";
    Gone                          = 410, "Gone";
    LengthRequired                = 411, "Length Required";
    PreconditionFailed            = 412, "Precondition Failed";
    ContentTooLarge               = 413, "Content Too Large";
    UriTooLong                    = 414, "URI Too Long";
    UnsupportedMediaType          = 415, "Unsupported Media Type";
    RangeNotSatisfiable           = 416, "Range Not Satisfiable";
    ExpectationFailed             = 417, "Expectation Failed";
    ImATeapot                     = 418, "I'm a Teapot";
    MisdirectedRequest            = 421, "Misdirected Request";
    UnprocessableContent          = 422, "Unprocessable Content";
    Locked                        = 423, "Locked";
    FailedDependency              = 424, "Failed Dependency";
    TooEarly                      = 425, "Too Early";
    UpgradeRequired               = 426, "Upgrade Required";
    PreconditionRequired          = 428, "Precondition Required";
    TooManyRequests               = 429, "Too Many Requests";
    RequestHeaderFieldsTooLarge   = 431, "Request Header Fields Too Large";
    UnavailableForLegalReasons    = 451, "Unavailable For Legal Reasons";

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError           = 500, "Internal Server Error";
    NotImplemented                = 501, "Not Implemented";
    BadGateway                    = 502, "Bad Gateway";
    ServiceUnavailable            = 503, "Service Unavailable";
    GatewayTimeout                = 504, "Gateway Timeout";
    HttpVersionNotSupported       = 505, "HTTP Version Not Supported";
    VariantAlsoNegotiates         = 506, "Variant Also Negotiates";
    InsufficientStorage           = 507, "Insufficient Storage";
    LoopDetected                  = 508, "Loop Detected";
    NotExtended                   = 510, "Not Extended";
    NetworkAuthenticationRequired = 511, "Network Authentication Required";
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        s.code()
    }
}

/// Reason phrase for a raw code, `None` for unregistered codes.
pub fn reason_phrase(code: u16) -> Option<&'static str> {
    Status::from_code(code).map(Status::reason)
}
