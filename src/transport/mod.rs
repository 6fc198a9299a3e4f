//! Outbound transports
//!
//! `http` holds the awaitable request/response API, `raw` the
//! callback-driven transfer used for binary payloads, and `stub` (tests only)
//! a scripted transport that never touches the network.

pub mod http;
pub mod raw;
#[cfg(test)]
mod stub;

pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use raw::{completion, RawBody, RawResponse, RawTransfer, ResponseType};
#[cfg(test)]
pub use stub::StubTransport;
