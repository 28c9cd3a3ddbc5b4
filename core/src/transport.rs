//! Transport contract and the plain-data types exchanged with it.
//!
//! # Design
//! This crate builds `HttpRequest` values and wraps `HttpResponse` values
//! without ever touching the network; the caller supplies a [`Transport`]
//! that performs the actual I/O. The separation keeps the client
//! deterministic and easy to test against any stack (reqwest, ureq, a
//! recorded fixture) without this crate taking a runtime dependency.
//!
//! Both types are plain data with owned fields. Response bodies are fully
//! buffered `Bytes`; there is no streaming half-read state to manage.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use url::Url;

/// An HTTP request described as plain data, ready for a transport to execute.
///
/// The URL is fully assembled (path parameters substituted, query string in
/// place) and the headers are final. `timeout` is carried through from the
/// call options untouched; enforcing it is the transport's concern.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an [`HttpRequest`]. `url` is
/// the final URL after any redirects the transport followed, and
/// `redirected` reports whether it followed any; transports that cannot
/// observe redirects report the request URL and `false`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub url: String,
    pub redirected: bool,
    pub body: Bytes,
}

/// A pluggable HTTP executor.
///
/// Implementations perform the network request described by an
/// [`HttpRequest`] and return the raw result. They must not branch on the
/// response status: a 404 is a successful `send` with `status` set, and
/// `Err` is reserved for failures that produced no response at all
/// (connect errors, DNS failures or protocol violations).
pub trait Transport: Send + Sync {
    /// Transport-specific failure type, surfaced to callers unmodified.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes the request and resolves with the raw response.
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send;
}
