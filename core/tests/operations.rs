//! Typed operation calls against the live mock server.
//!
//! # Design
//! Each operation is a unit struct pinning the path template, method and
//! payload types; the tests drive them through `Client::send` over real
//! HTTP and check that the typed surface (output decoding, declared
//! response headers) agrees with what the server actually sent.

mod common;

use common::{start_server, UreqTransport};
use http::Method;
use serde::{Deserialize, Serialize};
use typefetch_core::{Call, Client, NoBody, Operation};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
struct User {
    id: Uuid,
    name: String,
    active: bool,
}

#[derive(Debug, Serialize)]
struct UserDraft {
    name: String,
    active: bool,
}

#[derive(Debug, Deserialize)]
struct EchoSeen {
    path: String,
    query: Vec<(String, String)>,
    cookies: Vec<String>,
}

struct ListUsers;

impl Operation for ListUsers {
    const PATH: &'static str = "/users";
    const METHOD: Method = Method::GET;
    const RESPONSE_HEADERS: &'static [&'static str] = &["x-total-count"];

    type Body = NoBody;
    type Output = Vec<User>;
}

struct CreateUser;

impl Operation for CreateUser {
    const PATH: &'static str = "/users";
    const METHOD: Method = Method::POST;

    type Body = UserDraft;
    type Output = User;
}

struct GetUser;

impl Operation for GetUser {
    const PATH: &'static str = "/users/{id}";
    const METHOD: Method = Method::GET;

    type Body = NoBody;
    type Output = User;
}

struct EchoItem;

impl Operation for EchoItem {
    const PATH: &'static str = "/echo/items/{id}";
    const METHOD: Method = Method::GET;
    const RESPONSE_HEADERS: &'static [&'static str] = &["x-request-id"];

    type Body = NoBody;
    type Output = EchoSeen;
}

#[tokio::test]
async fn create_then_get_round_trip() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}"), UreqTransport).unwrap();

    let created = client
        .send(Call::<CreateUser>::new().body(UserDraft {
            name: "Grace".to_string(),
            active: true,
        }))
        .await
        .unwrap();
    assert_eq!(created.status().as_u16(), 201);
    let user = created.json().unwrap();
    assert_eq!(user.name, "Grace");

    let fetched = client
        .send(Call::<GetUser>::new().path("id", user.id))
        .await
        .unwrap();
    assert!(fetched.ok());
    assert_eq!(fetched.json().unwrap(), user);
}

#[tokio::test]
async fn list_captures_declared_headers() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}"), UreqTransport).unwrap();

    for name in ["Ada", "Grace"] {
        client
            .send(Call::<CreateUser>::new().body(UserDraft {
                name: name.to_string(),
                active: true,
            }))
            .await
            .unwrap();
    }

    let resp = client
        .send(Call::<ListUsers>::new().query("active", true))
        .await
        .unwrap();
    assert!(resp.ok());
    assert_eq!(resp.json().unwrap().len(), 2);

    // Declared names are captured, case-insensitively; undeclared are not.
    assert_eq!(resp.typed_headers().get("x-total-count"), Some("2"));
    assert_eq!(resp.typed_headers().get("X-Total-Count"), Some("2"));
    assert_eq!(resp.typed_headers().get("content-type"), None);
}

#[tokio::test]
async fn missing_user_resolves_with_ok_false() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}"), UreqTransport).unwrap();

    let resp = client
        .send(Call::<GetUser>::new().path("id", Uuid::new_v4()))
        .await
        .unwrap();

    assert!(!resp.ok());
    assert_eq!(resp.status().as_u16(), 404);
    // The typed decode is for the success payload; an empty 404 body
    // simply fails to decode.
    assert!(resp.json().is_err());
}

#[tokio::test]
async fn echo_operation_reflects_params_and_headers() {
    let addr = start_server();
    let client = Client::new(&format!("http://{addr}"), UreqTransport).unwrap();

    let resp = client
        .send(
            Call::<EchoItem>::new()
                .path("id", 9)
                .query("verbose", true)
                .cookie("session", "s1"),
        )
        .await
        .unwrap();
    assert!(resp.ok());

    let seen = resp.json().unwrap();
    assert_eq!(seen.path, "/echo/items/9");
    assert_eq!(seen.query, vec![("verbose".to_string(), "true".to_string())]);
    assert_eq!(seen.cookies, ["session=s1"]);
    assert!(resp.typed_headers().get("x-request-id").is_some());
}
