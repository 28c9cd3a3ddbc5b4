//! Per-call request descriptor types.
//!
//! # Design
//! A call is described as plain data before anything is assembled: the
//! method, the parameter groups, an optional body with an optional
//! content-type label, the caller's starting headers, and a passthrough
//! timeout. The
//! descriptor is consumed by `Client::request`; nothing here touches the
//! network or validates against a schema.
//!
//! Parameter groups keep insertion order. Query, header and cookie values
//! are `Option` so a caller can thread through a value that may be absent;
//! absent entries are skipped during assembly and never serialized.

use std::time::Duration;

use http::{HeaderMap, Method};

/// Parameters for one call, grouped by where they end up in the request.
#[derive(Debug, Clone, Default)]
pub struct Params {
    /// Path template substitutions, applied in insertion order.
    pub path: Vec<(String, String)>,
    /// Query string pairs; `None` values are skipped.
    pub query: Vec<(String, Option<String>)>,
    /// Extra request headers, appended; `None` values are skipped.
    pub header: Vec<(String, Option<String>)>,
    /// Cookies, each appended as its own `cookie` header line; `None`
    /// values are skipped.
    pub cookie: Vec<(String, Option<String>)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path substitution for the `{name}` placeholder.
    pub fn path(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.path.push((name.into(), value.to_string()));
        self
    }

    /// Adds a query pair.
    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((name.into(), Some(value.to_string())));
        self
    }

    /// Adds a query pair that may be absent. `None` never reaches the URL.
    pub fn query_opt(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.query.push((name.into(), value.map(|v| v.to_string())));
        self
    }

    /// Adds a header parameter.
    pub fn header(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.header.push((name.into(), Some(value.to_string())));
        self
    }

    /// Adds a header parameter that may be absent.
    pub fn header_opt(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.header.push((name.into(), value.map(|v| v.to_string())));
        self
    }

    /// Adds a cookie parameter.
    pub fn cookie(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.cookie.push((name.into(), Some(value.to_string())));
        self
    }

    /// Adds a cookie parameter that may be absent.
    pub fn cookie_opt(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.cookie.push((name.into(), value.map(|v| v.to_string())));
        self
    }
}

/// A request body: the JSON value to serialize plus an optional
/// content-type label.
///
/// Only JSON serialization exists. When a label is present it is sent
/// as-is in the `content-type` header, so a caller declaring some other
/// type gets that label over JSON-encoded text. When it is absent the
/// body text travels with no `content-type` header at all.
#[derive(Debug, Clone)]
pub struct RequestBody {
    pub content_type: Option<String>,
    pub data: serde_json::Value,
}

impl RequestBody {
    /// Body with no content-type label; nothing is added to the headers.
    pub fn new<T: serde::Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content_type: None,
            data: serde_json::to_value(data)?,
        })
    }

    /// JSON body with the standard `application/json` label.
    pub fn json<T: serde::Serialize>(data: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content_type: Some("application/json".to_owned()),
            data: serde_json::to_value(data)?,
        })
    }

    /// Body with an explicit content-type label.
    pub fn with_content_type<T: serde::Serialize>(
        content_type: impl Into<String>,
        data: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            content_type: Some(content_type.into()),
            data: serde_json::to_value(data)?,
        })
    }
}

/// Everything describing one call.
///
/// `headers` is the caller's starting header map; header and cookie
/// parameters are appended to it during assembly, and the body's
/// content-type label, when one is set, overwrites any `content-type` it
/// contains. `timeout` is handed to the transport untouched.
#[derive(Debug, Clone, Default)]
pub struct RequestInit {
    /// Defaults to `GET`.
    pub method: Method,
    pub params: Params,
    pub body: Option<RequestBody>,
    pub headers: HeaderMap,
    pub timeout: Option<Duration>,
}
