//! Error types for request assembly and response decoding.
//!
//! # Design
//! Transport failures are not translated: [`Error::Transport`] is
//! transparent over whatever error type the caller's transport defines, so
//! matching on the concrete transport error keeps working through this
//! crate. Assembly and decoding failures live in non-generic enums so the
//! response accessors stay independent of the transport type. A non-2xx
//! status is never an error here.

use thiserror::Error;

/// Failure while assembling the outgoing request.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The base URL or the substituted path did not parse as a URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A header or cookie parameter produced an invalid header name or value.
    #[error("invalid header `{name}`: {source}")]
    Header {
        name: String,
        #[source]
        source: http::Error,
    },

    /// The request body could not be serialized to JSON text.
    #[error("body serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Failure while decoding a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body was not valid JSON for the requested type.
    #[error("body deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The body was not valid UTF-8 text.
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Per-call error: the transport rejected, or the request could not be
/// assembled.
#[derive(Debug, Error)]
pub enum Error<E: std::error::Error> {
    #[error(transparent)]
    Transport(E),

    #[error(transparent)]
    Build(#[from] BuildError),
}
