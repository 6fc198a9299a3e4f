//! GraphQL probes

use serde_json::json;

use super::{pretty, Clients};
use crate::catalog::GraphQlProbe;
use crate::common::Result;
use crate::console_args;
use crate::graphql::{GraphQlRequest, GET_CHARACTER, GET_CHARACTERS};

/// Character looked up by the variables probe
const CHARACTER_ID: &str = "1";

pub(super) async fn run(probe: GraphQlProbe, clients: &Clients) -> Result<String> {
    let console = &clients.console;

    let (label, request) = match probe {
        GraphQlProbe::Query => ("GraphQL Query", GraphQlRequest::new(GET_CHARACTERS)),
        GraphQlProbe::WithVariables => (
            "GraphQL with variables",
            GraphQlRequest::new(GET_CHARACTER).variables(json!({ "id": CHARACTER_ID })),
        ),
    };

    console.log(console_args![format!("Starting {label} test")]);
    let data = clients.graphql.query(&request).await?;
    console.log(console_args![format!("{label} success:"), &data]);
    pretty(&data)
}
