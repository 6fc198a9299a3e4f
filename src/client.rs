//! Promise-style API client
//!
//! Unlike bare fetch, the client rejects any non-2xx status and decodes the
//! body for the caller: JSON when it parses, a plain string otherwise.

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::common::{Error, Result};
use crate::transport::{HttpRequest, HttpTransport};

const ACCEPT: &str = "application/json, text/plain, */*";

/// A decoded client response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub data: Value,
}

#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn HttpTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        self.send(HttpRequest::get(url)).await
    }

    pub async fn post<T: Serialize>(&self, url: &str, body: &T) -> Result<ApiResponse> {
        self.send(HttpRequest::post(url).json(body)?).await
    }

    async fn send(&self, request: HttpRequest) -> Result<ApiResponse> {
        let request = request.header("Accept", ACCEPT).timeout(self.timeout);
        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            return Err(Error::http_status(response.status, &response.url));
        }

        let data = match serde_json::from_slice(&response.body) {
            Ok(value) => value,
            Err(_) => Value::String(response.text()),
        };
        Ok(ApiResponse {
            status: response.status,
            data,
        })
    }
}
