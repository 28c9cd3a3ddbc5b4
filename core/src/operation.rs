//! Statically typed operations over the untyped call pipeline.
//!
//! # Design
//! An [`Operation`] impl pins down everything the schema knows about one
//! path + method pair: the template, the method, the content-type label,
//! the declared response headers, the body type and the success payload
//! type. `Client::send` turns a [`Call`] into the same `RequestInit` the
//! untyped path uses, so the two entries share one pipeline and the typed
//! layer adds no behavior of its own.
//!
//! Parameter names stay dynamic strings. The types pin down the body, the
//! success payload and the declared header names; a wrong parameter name
//! produces the same unsubstituted-placeholder URL the untyped path
//! would, for the server to reject.

use std::marker::PhantomData;
use std::ops::Deref;
use std::time::Duration;

use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{BuildError, DecodeError};
use crate::request::{Params, RequestBody, RequestInit};
use crate::response::{Response, TypedHeaders};

/// One API operation with a fixed signature.
pub trait Operation {
    /// Path template relative to the client's base, with `{name}`
    /// placeholders.
    const PATH: &'static str;

    /// HTTP method.
    const METHOD: Method;

    /// Content-type label sent when the call carries a body. The body is
    /// JSON-serialized regardless of the label.
    const CONTENT_TYPE: &'static str = "application/json";

    /// Response header names captured into the typed header view.
    const RESPONSE_HEADERS: &'static [&'static str] = &[];

    /// Request body type. Operations without a body use [`NoBody`].
    type Body: Serialize;

    /// Success payload type decoded by [`TypedResponse::json`].
    type Output: DeserializeOwned;
}

/// Marker body type for operations that never send a body.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoBody;

/// Builder for one typed call.
pub struct Call<O: Operation> {
    params: Params,
    body: Option<O::Body>,
    timeout: Option<Duration>,
    _operation: PhantomData<O>,
}

impl<O: Operation> Call<O> {
    pub fn new() -> Self {
        Self {
            params: Params::new(),
            body: None,
            timeout: None,
            _operation: PhantomData,
        }
    }

    /// Substitution for the `{name}` placeholder in the operation's path.
    pub fn path(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params = self.params.path(name, value);
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params = self.params.query(name, value);
        self
    }

    pub fn query_opt(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.params = self.params.query_opt(name, value);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params = self.params.header(name, value);
        self
    }

    pub fn header_opt(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.params = self.params.header_opt(name, value);
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params = self.params.cookie(name, value);
        self
    }

    pub fn cookie_opt(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.params = self.params.cookie_opt(name, value);
        self
    }

    /// Request body, serialized at dispatch with the operation's
    /// content-type label.
    pub fn body(mut self, body: O::Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Timeout handed to the transport untouched.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn into_init(self) -> Result<RequestInit, BuildError> {
        let body = self
            .body
            .as_ref()
            .map(|data| RequestBody::with_content_type(O::CONTENT_TYPE, data))
            .transpose()
            .map_err(BuildError::Serialization)?;

        Ok(RequestInit {
            method: O::METHOD,
            params: self.params,
            body,
            headers: HeaderMap::new(),
            timeout: self.timeout,
        })
    }
}

impl<O: Operation> Default for Call<O> {
    fn default() -> Self {
        Self::new()
    }
}

/// A response to a typed call.
///
/// Derefs to [`Response`] for the untyped accessors; adds decoding to the
/// operation's output type and the typed header view.
pub struct TypedResponse<O: Operation> {
    response: Response,
    headers: TypedHeaders,
    _operation: PhantomData<O>,
}

impl<O: Operation> TypedResponse<O> {
    pub(crate) fn new(response: Response) -> Self {
        let headers = TypedHeaders::capture(O::RESPONSE_HEADERS, response.headers());
        Self {
            response,
            headers,
            _operation: PhantomData,
        }
    }

    /// Decodes the body as the operation's output type.
    ///
    /// Callers branch on `ok()` first; a non-2xx body is decoded through
    /// [`Response::json`] on the deref target with whatever error shape
    /// the server uses.
    pub fn json(&self) -> Result<O::Output, DecodeError> {
        self.response.json()
    }

    /// The operation's declared response headers, captured when the
    /// response was wrapped.
    pub fn typed_headers(&self) -> &TypedHeaders {
        &self.headers
    }

    /// Discards the typed view and returns the plain response.
    pub fn into_inner(self) -> Response {
        self.response
    }
}

impl<O: Operation> Deref for TypedResponse<O> {
    type Target = Response;

    fn deref(&self) -> &Response {
        &self.response
    }
}
