//! Request assembly and the client entry points.
//!
//! # Design
//! `Client` holds only the parsed origin, the base path and the transport,
//! and carries no mutable state between calls. Each call runs the same
//! fixed pipeline: substitute the path template, set query pairs, merge
//! header and cookie parameters, serialize the body, then hand the
//! finished `HttpRequest` to the transport and wrap whatever comes back.
//! The build steps are free functions so each one is testable without a
//! transport.
//!
//! The pipeline never inspects the response status. A transport `Err` is
//! the only failure after dispatch; any HTTP status, 404 included, comes
//! back as a normal [`Response`].

use http::header::{HeaderName, HeaderValue, CONTENT_TYPE, COOKIE};
use http::HeaderMap;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::debug;
use url::Url;

use crate::error::{BuildError, Error};
use crate::operation::{Call, Operation, TypedResponse};
use crate::request::{Params, RequestInit};
use crate::response::Response;
use crate::transport::{HttpRequest, Transport};

/// Characters percent-encoded in substituted path values.
///
/// RFC 2396 unreserved and reserved characters plus `#` stay literal;
/// everything else, `{` and `}` included, is encoded as UTF-8 bytes.
const PATH_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b',')
    .remove(b'#');

/// Assembles the request URL from the origin, base path, path template and
/// parameters.
///
/// Path substitution is sequential in parameter insertion order and
/// replaces every occurrence of the literal `{name}`. Values are
/// percent-encoded before insertion. Replacement is textual, so a
/// substituted value can complete a later key's placeholder and be
/// substituted again. Placeholders without a matching parameter are not
/// an error; they travel on in the URL (percent-encoded by the parser)
/// for the server to reject.
///
/// Query pairs use set semantics: a pair overwrites the first existing
/// pair with the same name and drops any later duplicates. Pairs with an
/// absent value are skipped entirely.
pub fn build_url(
    origin: &str,
    base: &str,
    pathname: &str,
    params: &Params,
) -> Result<Url, BuildError> {
    let mut template = format!("{base}{pathname}");

    for (name, value) in &params.path {
        let placeholder = format!("{{{name}}}");
        let encoded = utf8_percent_encode(value, PATH_VALUE_ENCODE_SET).to_string();
        template = template.replace(&placeholder, &encoded);
    }

    let mut url = Url::parse(origin)?.join(&template)?;

    for (name, value) in &params.query {
        if let Some(value) = value {
            set_query_pair(&mut url, name, value);
        }
    }

    Ok(url)
}

/// Overwrites the first `name` pair and drops later duplicates; appends
/// when absent. The `url` crate only appends, so the pair list is rebuilt.
fn set_query_pair(url: &mut Url, name: &str, value: &str) {
    let existing: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    let mut replaced = false;
    for (k, v) in existing {
        if k == name {
            if !replaced {
                pairs.append_pair(&k, value);
                replaced = true;
            }
        } else {
            pairs.append_pair(&k, &v);
        }
    }
    if !replaced {
        pairs.append_pair(name, value);
    }
}

/// Merges the caller's starting headers with header and cookie parameters.
///
/// Header parameters are appended, never overwritten, so repeated names
/// accumulate values. Each cookie parameter becomes its own `cookie`
/// header line formatted `name=value`. The content-type label, when
/// present, is inserted last and replaces anything set before it.
pub fn build_headers(
    headers: &HeaderMap,
    params: &Params,
    content_type: Option<&str>,
) -> Result<HeaderMap, BuildError> {
    let mut result = headers.clone();

    for (name, value) in &params.header {
        if let Some(value) = value {
            result.append(header_name(name)?, header_value(name, value)?);
        }
    }

    for (name, value) in &params.cookie {
        if let Some(value) = value {
            let line = format!("{name}={value}");
            result.append(COOKIE, header_value(name, &line)?);
        }
    }

    if let Some(content_type) = content_type {
        result.insert(CONTENT_TYPE, header_value("content-type", content_type)?);
    }

    Ok(result)
}

fn header_name(name: &str) -> Result<HeaderName, BuildError> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| BuildError::Header {
        name: name.to_owned(),
        source: e.into(),
    })
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, BuildError> {
    HeaderValue::from_str(value).map_err(|e| BuildError::Header {
        name: name.to_owned(),
        source: e.into(),
    })
}

/// Serializes the request body to JSON text. `None` stays `None`.
pub fn build_body(data: Option<&serde_json::Value>) -> Result<Option<String>, BuildError> {
    data.map(|value| serde_json::to_string(value).map_err(BuildError::Serialization))
        .transpose()
}

/// An HTTP client bound to one base URL and one transport.
///
/// The base URL is parsed once at construction into an origin and a base
/// path that is prefixed to every call's path template. The transport is
/// required; there is no ambient default.
#[derive(Debug, Clone)]
pub struct Client<T: Transport> {
    origin: String,
    base: String,
    transport: T,
}

impl<T: Transport> Client<T> {
    /// Creates a client for `base_url`, dispatching through `transport`.
    ///
    /// A base URL path of `/` contributes nothing to call URLs; any other
    /// path is kept verbatim as the prefix.
    pub fn new(base_url: &str, transport: T) -> Result<Self, BuildError> {
        let parsed = Url::parse(base_url)?;
        let base = match parsed.path() {
            "/" => String::new(),
            path => path.to_owned(),
        };

        Ok(Self {
            origin: parsed.origin().ascii_serialization(),
            base,
            transport,
        })
    }

    /// Performs one call described by `init` against `pathname`.
    ///
    /// Returns `Err` only when the request could not be assembled or the
    /// transport itself failed. Every HTTP status resolves to `Ok`; check
    /// [`Response::ok`] for the status class.
    pub async fn request(
        &self,
        pathname: &str,
        init: RequestInit,
    ) -> Result<Response, Error<T::Error>> {
        let RequestInit {
            method,
            params,
            body,
            headers,
            timeout,
        } = init;

        let url = build_url(&self.origin, &self.base, pathname, &params).map_err(Error::Build)?;
        let headers = build_headers(
            &headers,
            &params,
            body.as_ref().and_then(|b| b.content_type.as_deref()),
        )
        .map_err(Error::Build)?;
        let body = build_body(body.as_ref().map(|b| &b.data)).map_err(Error::Build)?;

        debug!(method = %method, url = %url, "sending request");
        let request = HttpRequest {
            method,
            url,
            headers,
            body,
            timeout,
        };
        let raw = self
            .transport
            .send(request)
            .await
            .map_err(Error::Transport)?;
        debug!(status = %raw.status, url = %raw.url, "received response");

        Ok(Response::new(raw))
    }

    /// Performs a typed operation call.
    ///
    /// The path, method and content type come from the [`Operation`] impl;
    /// parameters and body from the [`Call`]. The returned
    /// [`TypedResponse`] decodes to the operation's output type and
    /// captures its declared response headers.
    pub async fn send<O: Operation>(
        &self,
        call: Call<O>,
    ) -> Result<TypedResponse<O>, Error<T::Error>> {
        let init = call.into_init().map_err(Error::Build)?;
        let response = self.request(O::PATH, init).await?;
        Ok(TypedResponse::new(response))
    }
}
