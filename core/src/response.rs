//! Response wrapper and header views.
//!
//! # Design
//! The transport hands back a buffered [`HttpResponse`]; [`Response`] wraps
//! it once per call and owns every accessor the caller reads. Headers are
//! wrapped at construction and `headers()` always returns the same
//! reference, so repeated access never re-materializes a view. Decoding is
//! on demand: the body stays raw `Bytes` until `text`, `json` or `form` is
//! called, and each of those can be called any number of times.
//!
//! Status is never inspected here. A 404 wraps exactly like a 200; `ok()`
//! is the only success signal and branching on it is the caller's job.

use std::ops::Deref;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, SET_COOKIE};
use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::error::DecodeError;
use crate::transport::HttpResponse;

/// A wrapped transport response.
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,
    url: String,
    redirected: bool,
    headers: ResponseHeaders,
    body: Bytes,
}

impl Response {
    pub(crate) fn new(raw: HttpResponse) -> Self {
        Self {
            status: raw.status,
            url: raw.url,
            redirected: raw.redirected,
            headers: ResponseHeaders { map: raw.headers },
            body: raw.body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The canonical reason phrase for the status, or `""` for codes
    /// without one.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// `true` for 2xx statuses. The only success signal; non-2xx responses
    /// are returned normally with this set to `false`.
    pub fn ok(&self) -> bool {
        self.status.is_success()
    }

    /// Final URL as reported by the transport.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the transport followed a redirect to produce this response.
    pub fn redirected(&self) -> bool {
        self.redirected
    }

    /// The `content-type` header value, if present and readable as a string.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get_str(CONTENT_TYPE.as_str())
    }

    /// Header view for this response. Reference-stable: every call returns
    /// the same `ResponseHeaders` built when the response was wrapped.
    pub fn headers(&self) -> &ResponseHeaders {
        &self.headers
    }

    /// The raw body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// The body as an owned `Bytes` handle (cheap clone of the buffer).
    pub fn bytes(&self) -> Bytes {
        self.body.clone()
    }

    /// The body as UTF-8 text.
    pub fn text(&self) -> Result<&str, DecodeError> {
        Ok(std::str::from_utf8(&self.body)?)
    }

    /// Deserializes the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        serde_json::from_slice(&self.body).map_err(DecodeError::Deserialization)
    }

    /// Decodes the body as `application/x-www-form-urlencoded` pairs.
    pub fn form(&self) -> Vec<(String, String)> {
        url::form_urlencoded::parse(&self.body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Response headers: the native map plus convenience readers.
///
/// Derefs to [`http::HeaderMap`], so the full native API (`get`, `get_all`,
/// iteration) is available directly.
#[derive(Debug, Clone)]
pub struct ResponseHeaders {
    map: HeaderMap,
}

impl ResponseHeaders {
    /// First value for `name` as a string, if present and valid UTF-8.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.map.get(name).and_then(|v| v.to_str().ok())
    }

    /// Every `set-cookie` line, in response order.
    pub fn get_set_cookie(&self) -> Vec<&str> {
        self.map
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }
}

impl Deref for ResponseHeaders {
    type Target = HeaderMap;

    fn deref(&self) -> &HeaderMap {
        &self.map
    }
}

/// Schema-declared response headers, captured eagerly by name.
///
/// Built from an operation's declared header list when the response is
/// wrapped: each declared name is looked up once and stored, whether or not
/// the server sent it. Lookups are case-insensitive like any header name.
#[derive(Debug, Clone)]
pub struct TypedHeaders {
    entries: Vec<(&'static str, Option<String>)>,
}

impl TypedHeaders {
    pub(crate) fn capture(names: &'static [&'static str], map: &HeaderMap) -> Self {
        Self {
            entries: names
                .iter()
                .map(|&name| {
                    let value = map.get(name).and_then(|v| v.to_str().ok());
                    (name, value.map(str::to_owned))
                })
                .collect(),
        }
    }

    /// Value of a declared header. `None` when the name was not declared or
    /// the server did not send it.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .and_then(|(_, v)| v.as_deref())
    }

    /// Declared names and captured values, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> + '_ {
        self.entries.iter().map(|(n, v)| (*n, v.as_deref()))
    }
}
