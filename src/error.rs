//! Unified error type.

/// The error type returned by [`render`](crate::render).
///
/// Application-level outcomes (404, 422, etc.) are expressed as
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// the two ways turning a response value into bytes can fail.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The JSON body could not be serialized. Nothing was written to the
    /// transport.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport rejected a write or is no longer usable.
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
}

/// Failure reported by a [`Transport`](crate::Transport) primitive.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The transport cannot represent this status code.
    #[error("invalid status code {0}")]
    InvalidStatus(u16),

    #[error("invalid header `{name}`")]
    InvalidHeader { name: String },

    /// A primitive was called out of the status → headers → body order.
    #[error("{0} written out of order")]
    OutOfOrder(&'static str),

    /// The response was taken before its body was written.
    #[error("response incomplete: body never written")]
    Incomplete,

    /// The body has already been written; the response is complete.
    #[error("transport closed")]
    Closed,
}
