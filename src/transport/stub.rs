//! Scripted in-memory transport
//!
//! Routes are keyed by method and full URL (query string included). Every
//! request is recorded so callers can assert on exactly what was sent.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::common::{Error, Result};

type JsonHandler = Arc<dyn Fn(&HttpRequest) -> (u16, serde_json::Value) + Send + Sync>;

#[derive(Clone)]
enum StubReply {
    Respond {
        status: u16,
        content_type: String,
        body: Bytes,
    },
    Json(JsonHandler),
    Fail(String),
}

impl fmt::Debug for StubReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StubReply::Respond { status, .. } => write!(f, "Respond({status})"),
            StubReply::Json(_) => f.write_str("Json(<handler>)"),
            StubReply::Fail(message) => write!(f, "Fail({message:?})"),
        }
    }
}

#[derive(Debug, Clone)]
struct StubRoute {
    reply: StubReply,
    delay: Option<Duration>,
}

/// Transport that answers from a routing table instead of the network
#[derive(Debug, Default)]
pub struct StubTransport {
    routes: Mutex<HashMap<(HttpMethod, String), StubRoute>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with a JSON body
    pub fn respond_json(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.respond(
            method,
            url,
            status,
            "application/json; charset=utf-8",
            Bytes::from(body.to_string()),
        );
    }

    /// Answer `method url` with JSON computed from the request
    pub fn respond_json_with(
        &self,
        method: HttpMethod,
        url: &str,
        handler: impl Fn(&HttpRequest) -> (u16, serde_json::Value) + Send + Sync + 'static,
    ) {
        self.insert(method, url, StubReply::Json(Arc::new(handler)));
    }

    /// Answer `method url` with a text body
    pub fn respond_text(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.respond(
            method,
            url,
            status,
            "text/plain; charset=utf-8",
            Bytes::from(body.to_string()),
        );
    }

    /// Answer `method url` with an arbitrary body
    pub fn respond(
        &self,
        method: HttpMethod,
        url: &str,
        status: u16,
        content_type: &str,
        body: Bytes,
    ) {
        self.insert(
            method,
            url,
            StubReply::Respond {
                status,
                content_type: content_type.to_string(),
                body,
            },
        );
    }

    /// Fail `method url` with a transport error carrying `message`
    pub fn fail(&self, method: HttpMethod, url: &str, message: &str) {
        self.insert(method, url, StubReply::Fail(message.to_string()));
    }

    /// Hold the reply for `method url` back by `delay`
    pub fn delay(&self, method: HttpMethod, url: &str, delay: Duration) {
        if let Some(route) = lock(&self.routes).get_mut(&(method, url.to_string())) {
            route.delay = Some(delay);
        }
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    fn insert(&self, method: HttpMethod, url: &str, reply: StubReply) {
        lock(&self.routes).insert(
            (method, url.to_string()),
            StubRoute { reply, delay: None },
        );
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = (request.method, request.url.clone());
        lock(&self.requests).push(request.clone());
        let route = lock(&self.routes).get(&key).cloned();

        let Some(route) = route else {
            return Err(Error::Network(format!(
                "connection refused (no stub for {} {})",
                key.0, key.1
            )));
        };

        if let Some(delay) = route.delay {
            tokio::time::sleep(delay).await;
        }

        match route.reply {
            StubReply::Respond {
                status,
                content_type,
                body,
            } => Ok(HttpResponse {
                status,
                url: key.1,
                headers: HashMap::from([("content-type".to_string(), content_type)]),
                body,
            }),
            StubReply::Json(handler) => {
                let (status, body) = handler(&request);
                Ok(HttpResponse {
                    status,
                    url: key.1,
                    headers: HashMap::from([(
                        "content-type".to_string(),
                        "application/json; charset=utf-8".to_string(),
                    )]),
                    body: Bytes::from(body.to_string()),
                })
            }
            StubReply::Fail(message) => Err(Error::Network(message)),
        }
    }
}

// A panicking test thread must not hide the table from the others
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_routes_and_records() {
        let stub = StubTransport::new();
        stub.respond_json(HttpMethod::Get, "http://s.test/a", 200, json!({"ok": true}));

        let resp = stub.execute(HttpRequest::get("http://s.test/a")).await.unwrap();
        assert_eq!(resp.status, 200);
        assert_eq!(resp.content_type(), Some("application/json; charset=utf-8"));
        assert_eq!(resp.json::<serde_json::Value>().unwrap(), json!({"ok": true}));
        assert_eq!(stub.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_handler_sees_request_body() {
        let stub = StubTransport::new();
        stub.respond_json_with(HttpMethod::Post, "http://s.test/echo", |req| {
            (200, req.body_json().unwrap_or_default())
        });
        let req = HttpRequest::post("http://s.test/echo").json(&json!({"id": "1"})).unwrap();
        let resp = stub.execute(req).await.unwrap();
        assert_eq!(resp.json::<serde_json::Value>().unwrap(), json!({"id": "1"}));
    }

    #[tokio::test]
    async fn test_unrouted_request_is_network_error() {
        let stub = StubTransport::new();
        let err = stub.execute(HttpRequest::get("http://s.test/none")).await.unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[tokio::test]
    async fn test_fail_route() {
        let stub = StubTransport::new();
        stub.fail(HttpMethod::Post, "http://s.test/p", "socket hang up");
        let err = stub.execute(HttpRequest::post("http://s.test/p")).await.unwrap_err();
        assert_eq!(err.to_string(), "Network error: socket hang up");
    }
}
