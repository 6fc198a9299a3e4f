//! Binary transfer probe
//!
//! Drives the callback API directly and only then bridges it, so an
//! interception layer sees the callback shape of the call.

use serde_json::json;

use super::{pretty, Clients};
use crate::catalog::TransferProbe;
use crate::common::Result;
use crate::console_args;
use crate::transport::{completion, HttpMethod, RawBody, RawTransfer, ResponseType};

pub(super) async fn run(probe: TransferProbe, clients: &Clients) -> Result<String> {
    match probe {
        TransferProbe::ImageBlob => {
            let url = format!("{}/200/300", clients.endpoints.image_api);
            let mut transfer = RawTransfer::open(clients.transport.clone(), HttpMethod::Get, url);
            transfer.set_response_type(ResponseType::Blob);

            let console = clients.console.clone();
            transfer.on_load(move |response| {
                if response.status == 200 {
                    if let RawBody::Blob(blob) = &response.body {
                        console.log(console_args![
                            "Got blob:",
                            json!({ "size": blob.size(), "type": blob.content_type })
                        ]);
                    }
                }
            });

            let console = clients.console.clone();
            transfer.on_error(move |_| console.error(console_args!["Transfer error"]));

            let response = completion(transfer).await?;
            let summary = match &response.body {
                RawBody::Blob(blob) => json!({
                    "status": response.status,
                    "content_type": blob.content_type,
                    "size": blob.size(),
                }),
                RawBody::Text(text) => json!({
                    "status": response.status,
                    "content_type": "text/plain",
                    "size": text.len(),
                }),
            };
            pretty(&summary)
        }
    }
}
