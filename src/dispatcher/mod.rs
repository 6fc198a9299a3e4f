//! Operation dispatcher
//!
//! Holds the single in-flight slot and the result sink. Each `run` takes a
//! generation number when it starts; a completion only commits if no newer
//! run has started since, so when runs overlap the last one invoked wins and
//! older completions are discarded.

mod sink;

pub use sink::ResultSink;

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::Instrument;

use crate::catalog::{self, Operation};
use crate::common::config::Config;
use crate::common::{Error, Result};
use crate::console::Console;
use crate::console_args;
use crate::probes::Clients;
use crate::transport::{HttpTransport, ReqwestTransport};

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure { code: &'static str },
}

/// What happened to one `run` call
#[derive(Debug, Clone)]
pub struct RunReport {
    pub operation: &'static str,
    pub generation: u64,
    pub outcome: Outcome,
    /// Rendered result or `Error: ...` text
    pub text: String,
    /// False when a newer run had started and this completion was dropped
    pub committed: bool,
}

#[derive(Debug)]
struct RunState {
    generation: u64,
    in_flight: Option<&'static str>,
    sink: ResultSink,
}

struct Inner {
    clients: Clients,
    state: Mutex<RunState>,
}

/// Runs catalog operations against one set of clients
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<Inner>,
}

impl Dispatcher {
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>, console: Console) -> Self {
        let clients = Clients::new(config, transport, console);
        Self {
            inner: Arc::new(Inner {
                clients,
                state: Mutex::new(RunState {
                    generation: 0,
                    in_flight: None,
                    sink: ResultSink::new(config.output.max_result_bytes),
                }),
            }),
        }
    }

    /// Build a dispatcher on the real network transport
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeouts.request())?;
        Ok(Self::new(config, Arc::new(transport), Console::new()))
    }

    pub fn clients(&self) -> &Clients {
        &self.inner.clients
    }

    /// Run the named operation to completion
    ///
    /// Fails only with [`Error::UnknownOperation`], in which case the run
    /// state and last result are left untouched. Every probe failure is
    /// rendered into the report and the sink instead.
    pub async fn run(&self, name: &str) -> Result<RunReport> {
        let operation =
            catalog::find(name).ok_or_else(|| Error::UnknownOperation(name.to_string()))?;
        Ok(self.run_operation(operation).await)
    }

    pub async fn run_operation(&self, operation: &'static Operation) -> RunReport {
        let generation = {
            let mut state = self.inner.state.lock().await;
            state.generation += 1;
            state.in_flight = Some(operation.name);
            state.generation
        };

        let span = tracing::info_span!("run", operation = operation.name, generation);
        let result = operation
            .action
            .execute(&self.inner.clients)
            .instrument(span)
            .await;

        let (outcome, text) = match result {
            Ok(text) => (Outcome::Success, text),
            Err(e) => {
                self.inner
                    .clients
                    .console
                    .error(console_args![format!("{} error:", operation.title), &e]);
                (Outcome::Failure { code: e.code() }, format!("Error: {e}"))
            }
        };

        let committed = {
            let mut state = self.inner.state.lock().await;
            if state.generation == generation {
                state.in_flight = None;
                state.sink.set(text.clone());
                true
            } else {
                false
            }
        };

        if committed {
            tracing::info!(operation = operation.name, generation, ?outcome, "Operation finished");
        } else {
            tracing::debug!(
                operation = operation.name,
                generation,
                "Discarding completion superseded by a newer run"
            );
        }

        RunReport {
            operation: operation.name,
            generation,
            outcome,
            text,
            committed,
        }
    }

    /// Name of the operation currently holding the in-flight slot
    pub async fn in_flight(&self) -> Option<&'static str> {
        self.inner.state.lock().await.in_flight
    }

    /// The last committed result text, empty before the first completion
    pub async fn last_result(&self) -> String {
        self.inner.state.lock().await.sink.get().to_string()
    }
}
