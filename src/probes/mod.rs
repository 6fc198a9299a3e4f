//! Probe execution
//!
//! [`Clients`] is built once and owned by the dispatcher; every probe reads
//! its endpoints and clients from it. A probe returns the text to show on
//! success, or an error the dispatcher renders.

mod fetch;
mod http_client;
mod logging;
mod query;
mod transfer;

use serde::Serialize;
use std::sync::Arc;

use crate::catalog::Action;
use crate::client::ApiClient;
use crate::common::config::Config;
use crate::common::config::Endpoints;
use crate::common::Result;
use crate::console::Console;
use crate::graphql::GraphQlClient;
use crate::transport::HttpTransport;

/// Process-wide collaborators shared by every probe
#[derive(Clone)]
pub struct Clients {
    pub transport: Arc<dyn HttpTransport>,
    pub api: ApiClient,
    pub graphql: GraphQlClient,
    pub console: Console,
    pub endpoints: Endpoints,
}

impl Clients {
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>, console: Console) -> Self {
        let timeout = config.timeouts.request();
        Self {
            api: ApiClient::new(transport.clone(), timeout),
            graphql: GraphQlClient::new(transport.clone(), &config.endpoints.graphql, timeout),
            transport,
            console,
            endpoints: config.endpoints.clone(),
        }
    }
}

impl Action {
    /// Run the probe and render its successful outcome
    pub async fn execute(&self, clients: &Clients) -> Result<String> {
        match *self {
            Action::Fetch(probe) => fetch::run(probe, clients).await,
            Action::HttpClient(probe) => http_client::run(probe, clients).await,
            Action::GraphQl(probe) => query::run(probe, clients).await,
            Action::BinaryTransfer(probe) => transfer::run(probe, clients).await,
            Action::Logging(probe) => Ok(logging::run(probe, &clients.console)),
        }
    }
}

/// Pretty-print a payload for the result sink
fn pretty<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
