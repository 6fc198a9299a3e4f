//! Fetch-style probes
//!
//! `Get` and `Post` decode the body whatever the status; only `NotFound`
//! guards on it.

use serde_json::{json, Value};

use super::{pretty, Clients};
use crate::catalog::FetchProbe;
use crate::common::Result;
use crate::console_args;
use crate::transport::HttpRequest;

pub(super) async fn run(probe: FetchProbe, clients: &Clients) -> Result<String> {
    let console = &clients.console;
    let json_api = &clients.endpoints.json_api;
    let text_api = &clients.endpoints.text_api;

    match probe {
        FetchProbe::Get => {
            console.log(console_args!["Starting Fetch GET test"]);
            let response = clients
                .transport
                .execute(HttpRequest::get(format!("{json_api}/posts/1")))
                .await?;
            let data: Value = response.json()?;
            console.log(console_args!["Fetch GET success:", &data]);
            pretty(&data)
        }

        FetchProbe::Post => {
            console.log(console_args!["Starting Fetch POST test"]);
            let request = HttpRequest::post(format!("{json_api}/posts")).json(&json!({
                "title": "Test Post",
                "body": "This is a test",
                "userId": 1,
            }))?;
            let response = clients.transport.execute(request).await?;
            let data: Value = response.json()?;
            console.log(console_args!["Fetch POST success:", &data]);
            pretty(&data)
        }

        FetchProbe::NotFound => {
            console.warn(console_args!["Testing 404 error"]);
            let response = clients
                .transport
                .execute(HttpRequest::get(format!("{json_api}/posts/99999999")))
                .await?;
            console.log(console_args!["Response status:", response.status]);
            let response = response.error_for_status()?;
            Ok(format!("Response status: {}", response.status))
        }

        FetchProbe::PlainText => {
            let response = clients
                .transport
                .execute(
                    HttpRequest::get(format!("{json_api}/posts/1")).header("Accept", "text/plain"),
                )
                .await?;

            let robots = clients
                .transport
                .execute(HttpRequest::get(format!("{text_api}/robots.txt")))
                .await?;
            console.log(console_args![robots.text()]);

            let text = response.text();
            console.log(console_args!["Plain text response:", text.as_str()]);
            Ok(non_empty(text))
        }

        FetchProbe::CustomPlainText => {
            let url = format!("{text_api}/response-headers?Content-Type=text/plain;%20charset=utf-8");
            let response = clients.transport.execute(HttpRequest::get(url)).await?;
            if !response.content_type().is_some_and(|ct| ct.starts_with("text/plain")) {
                tracing::debug!(
                    content_type = response.content_type().unwrap_or("none"),
                    "Plain text probe answered with another content type"
                );
            }
            let text = response.text();
            console.log(console_args!["Plain text response:", text.as_str()]);
            Ok(non_empty(text))
        }
    }
}

fn non_empty(text: String) -> String {
    if text.is_empty() {
        "(empty response body)".to_string()
    } else {
        text
    }
}
