//! Shared plumbing for live-server tests: spawns the mock server on a
//! random port and executes requests with a ureq-backed transport.

use std::future::Future;
use std::net::SocketAddr;

use bytes::Bytes;
use typefetch_core::{HttpRequest, HttpResponse, Transport};

/// Starts the mock server on a random port. The server thread outlives the
/// test; each test starts its own instance for isolation.
pub fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Executes requests with ureq on a blocking thread.
///
/// Every request gets a fresh agent with status-as-error disabled, so
/// 4xx/5xx responses come back as data and no cookie store carries state
/// between calls.
pub struct UreqTransport;

impl Transport for UreqTransport {
    type Error = ureq::Error;

    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, Self::Error>> + Send {
        async move {
            tokio::task::spawn_blocking(move || execute(request))
                .await
                .expect("transport thread panicked")
        }
    }
}

fn execute(request: HttpRequest) -> Result<HttpResponse, ureq::Error> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let url = request.url.to_string();
    let headers = request.headers;

    let mut response = match (request.method.as_str(), request.body) {
        ("GET", _) => {
            let mut rb = agent.get(&url);
            for (name, value) in headers.iter() {
                rb = rb.header(name.as_str(), value.to_str().unwrap());
            }
            rb.call()?
        }
        ("DELETE", _) => {
            let mut rb = agent.delete(&url);
            for (name, value) in headers.iter() {
                rb = rb.header(name.as_str(), value.to_str().unwrap());
            }
            rb.call()?
        }
        ("POST", Some(body)) => {
            let mut rb = agent.post(&url);
            for (name, value) in headers.iter() {
                rb = rb.header(name.as_str(), value.to_str().unwrap());
            }
            rb.send(body.as_bytes())?
        }
        ("POST", None) => {
            let mut rb = agent.post(&url);
            for (name, value) in headers.iter() {
                rb = rb.header(name.as_str(), value.to_str().unwrap());
            }
            rb.send_empty()?
        }
        ("PUT", Some(body)) => {
            let mut rb = agent.put(&url);
            for (name, value) in headers.iter() {
                rb = rb.header(name.as_str(), value.to_str().unwrap());
            }
            rb.send(body.as_bytes())?
        }
        ("PUT", None) => {
            let mut rb = agent.put(&url);
            for (name, value) in headers.iter() {
                rb = rb.header(name.as_str(), value.to_str().unwrap());
            }
            rb.send_empty()?
        }
        (method, _) => panic!("method not wired into the test transport: {method}"),
    };

    let status = response.status();
    let response_headers = response.headers().clone();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    Ok(HttpResponse {
        status,
        headers: response_headers,
        url,
        redirected: false,
        body: Bytes::from(body),
    })
}
