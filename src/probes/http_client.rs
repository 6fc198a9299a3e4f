//! Promise-style client probes

use serde_json::json;

use super::{pretty, Clients};
use crate::catalog::ClientProbe;
use crate::common::Result;
use crate::console_args;

pub(super) async fn run(probe: ClientProbe, clients: &Clients) -> Result<String> {
    let console = &clients.console;
    let json_api = &clients.endpoints.json_api;

    match probe {
        ClientProbe::Get => {
            console.log(console_args!["Starting client GET test"]);
            let response = clients.api.get(&format!("{json_api}/users/1")).await?;
            console.log(console_args!["Client GET success:", &response.data]);
            pretty(&response.data)
        }

        ClientProbe::Post => {
            console.log(console_args!["Starting client POST test"]);
            let body = json!({
                "title": "Client Test",
                "body": "Testing client POST",
                "userId": 1,
            });
            let response = clients.api.post(&format!("{json_api}/posts"), &body).await?;
            console.log(console_args!["Client POST success:", &response.data]);
            pretty(&response.data)
        }

        ClientProbe::Error => {
            console.warn(console_args!["Testing client error handling"]);
            // Only the rejection is interesting; a 2xx here is still reported
            let response = clients
                .api
                .get(&format!("{json_api}/invalid-endpoint-12345"))
                .await?;
            pretty(&response.data)
        }
    }
}
