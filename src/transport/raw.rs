//! Callback-style raw transfer
//!
//! A request object is opened, given completion callbacks, and sent; the
//! caller is not handed a future. `on_load` fires for any HTTP status and
//! `on_error` only for transport failures. [`completion`] bridges a transfer
//! back into an awaitable so the dispatcher can treat it like any other call.

use bytes::Bytes;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use super::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::common::{Error, Result};

/// How the response body is handed to `on_load`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    #[default]
    Text,
    Blob,
}

/// Opaque binary payload
#[derive(Debug, Clone)]
pub struct Blob {
    pub content_type: String,
    data: Bytes,
}

impl Blob {
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

#[derive(Debug, Clone)]
pub enum RawBody {
    Text(String),
    Blob(Blob),
}

#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: RawBody,
}

impl RawResponse {
    fn from_http(response: HttpResponse, response_type: ResponseType) -> Self {
        let body = match response_type {
            ResponseType::Text => RawBody::Text(response.text()),
            ResponseType::Blob => RawBody::Blob(Blob {
                content_type: response
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string(),
                data: response.body,
            }),
        };
        Self {
            status: response.status,
            body,
        }
    }
}

type LoadCallback = Box<dyn FnOnce(&RawResponse) + Send>;
type ErrorCallback = Box<dyn FnOnce(&Error) + Send>;

/// A single raw transfer, configured before `send`
pub struct RawTransfer {
    transport: Arc<dyn HttpTransport>,
    method: HttpMethod,
    url: String,
    response_type: ResponseType,
    on_load: Option<LoadCallback>,
    on_error: Option<ErrorCallback>,
}

impl RawTransfer {
    pub fn open(transport: Arc<dyn HttpTransport>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            transport,
            method,
            url: url.into(),
            response_type: ResponseType::default(),
            on_load: None,
            on_error: None,
        }
    }

    pub fn set_response_type(&mut self, response_type: ResponseType) {
        self.response_type = response_type;
    }

    pub fn on_load(&mut self, callback: impl FnOnce(&RawResponse) + Send + 'static) {
        self.on_load = Some(Box::new(callback));
    }

    pub fn on_error(&mut self, callback: impl FnOnce(&Error) + Send + 'static) {
        self.on_error = Some(Box::new(callback));
    }

    /// Start the transfer in the background; exactly one callback fires
    pub fn send(self) -> JoinHandle<()> {
        let RawTransfer {
            transport,
            method,
            url,
            response_type,
            on_load,
            on_error,
        } = self;

        tokio::spawn(async move {
            match transport.execute(HttpRequest::new(method, url)).await {
                Ok(response) => {
                    let response = RawResponse::from_http(response, response_type);
                    if let Some(callback) = on_load {
                        callback(&response);
                    }
                }
                Err(e) => {
                    if let Some(callback) = on_error {
                        callback(&e);
                    }
                }
            }
        })
    }
}

/// Send `transfer` and resolve when one of its callbacks fires
///
/// Callbacks already registered on the transfer still run first.
pub async fn completion(mut transfer: RawTransfer) -> Result<RawResponse> {
    let (tx, rx) = oneshot::channel::<Result<RawResponse>>();
    let tx = Arc::new(Mutex::new(Some(tx)));

    let user_load = transfer.on_load.take();
    let load_tx = tx.clone();
    transfer.on_load(move |response| {
        if let Some(callback) = user_load {
            callback(response);
        }
        deliver(&load_tx, Ok(response.clone()));
    });

    let user_error = transfer.on_error.take();
    let error_tx = tx;
    transfer.on_error(move |error| {
        if let Some(callback) = user_error {
            callback(error);
        }
        deliver(&error_tx, Err(Error::Network(error_message(error))));
    });

    let handle = transfer.send();
    match rx.await {
        Ok(result) => result,
        Err(_) => {
            // The sender only drops unused if the task died inside a callback
            let reason = match handle.await {
                Err(e) if e.is_panic() => "completion callback panicked".to_string(),
                _ => "transfer finished without completing".to_string(),
            };
            Err(Error::Internal(reason))
        }
    }
}

fn deliver(slot: &Mutex<Option<oneshot::Sender<Result<RawResponse>>>>, value: Result<RawResponse>) {
    let sender = slot.lock().unwrap_or_else(|e| e.into_inner()).take();
    if let Some(sender) = sender {
        let _ = sender.send(value);
    }
}

fn error_message(error: &Error) -> String {
    match error {
        Error::Network(message) => message.clone(),
        other => other.to_string(),
    }
}
