//! Typed HTTP client core over a caller-supplied transport.
//!
//! # Overview
//! Assembles `HttpRequest` values from per-call descriptors (path template
//! substitution, query pairs, header and cookie parameters, JSON body) and
//! wraps the `HttpResponse` a [`Transport`] returns. The transport performs
//! the actual network round-trip, keeping this crate deterministic,
//! runtime-agnostic and testable.
//!
//! # Design
//! - `Client` is stateless between calls; it holds only the parsed origin,
//!   the base path and the transport.
//! - The untyped entry (`request`) and the typed entry (`send`, driven by
//!   [`Operation`] impls) share one assembly pipeline.
//! - Response statuses are never branched on: any status resolves to an
//!   `Ok(Response)` with `ok()` reporting the class, and transport errors
//!   pass through unmodified.
//! - Only JSON serialization exists; content-type labels are carried
//!   verbatim.

pub mod client;
pub mod error;
pub mod operation;
pub mod request;
pub mod response;
pub mod transport;

pub use client::{build_body, build_headers, build_url, Client};
pub use error::{BuildError, DecodeError, Error};
pub use operation::{Call, NoBody, Operation, TypedResponse};
pub use request::{Params, RequestBody, RequestInit};
pub use response::{Response, ResponseHeaders, TypedHeaders};
pub use transport::{HttpRequest, HttpResponse, Transport};
