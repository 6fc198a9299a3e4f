//! Minimal GraphQL-over-HTTP client
//!
//! Queries are POSTed as `{"query", "operationName", "variables"}`. A
//! response carrying `errors` fails even when it also carries partial data.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::common::{Error, Result};
use crate::transport::{HttpRequest, HttpTransport};

/// List every character with id, name and status
pub const GET_CHARACTERS: &str = r#"query GetCharacters {
  characters {
    results {
      id
      name
      status
    }
  }
}"#;

/// Fetch one character by id
pub const GET_CHARACTER: &str = r#"query GetCharacter($id: ID!) {
  character(id: $id) {
    id
    name
    status
    species
  }
}"#;

/// Request body sent to the endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphQlRequest {
    pub fn new(query: &str) -> Self {
        Self {
            operation_name: operation_name(query),
            query: query.to_string(),
            variables: None,
        }
    }

    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = Some(variables);
        self
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlErrorItem>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorItem {
    message: String,
}

#[derive(Clone)]
pub struct GraphQlClient {
    transport: Arc<dyn HttpTransport>,
    endpoint: String,
    timeout: Duration,
}

impl GraphQlClient {
    pub fn new(transport: Arc<dyn HttpTransport>, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
            timeout,
        }
    }

    /// Execute a query and return its `data` member
    pub async fn query(&self, request: &GraphQlRequest) -> Result<Value> {
        let http = HttpRequest::post(&self.endpoint)
            .json(request)?
            .header("Accept", "application/json")
            .timeout(self.timeout);

        tracing::debug!(
            operation = request.operation_name.as_deref().unwrap_or("anonymous"),
            "Sending GraphQL query"
        );

        let response = self.transport.execute(http).await?;
        let parsed: Option<GraphQlResponse> = serde_json::from_slice(&response.body).ok();

        match parsed {
            Some(body) if !body.errors.is_empty() => {
                let messages: Vec<&str> = body.errors.iter().map(|e| e.message.as_str()).collect();
                Err(Error::graphql(&messages))
            }
            _ if !response.is_success() => Err(Error::http_status(response.status, &response.url)),
            Some(GraphQlResponse { data: Some(data), .. }) if !data.is_null() => Ok(data),
            Some(_) => Err(Error::Serialization(
                "GraphQL response has no data".to_string(),
            )),
            None => Err(Error::Serialization(format!(
                "GraphQL response from {} is not JSON",
                response.url
            ))),
        }
    }
}

/// Name of the first named operation in a query document
fn operation_name(query: &str) -> Option<String> {
    let rest = query.trim_start();
    let rest = rest
        .strip_prefix("query")
        .or_else(|| rest.strip_prefix("mutation"))?;
    let name: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpMethod, StubTransport};
    use serde_json::json;

    const URL: &str = "http://gql.test/graphql";

    fn client(stub: Arc<StubTransport>) -> GraphQlClient {
        GraphQlClient::new(stub, URL, Duration::from_secs(5))
    }

    #[test]
    fn test_operation_name() {
        assert_eq!(operation_name(GET_CHARACTERS).as_deref(), Some("GetCharacters"));
        assert_eq!(operation_name(GET_CHARACTER).as_deref(), Some("GetCharacter"));
        assert_eq!(operation_name("{ characters { id } }"), None);
    }

    #[tokio::test]
    async fn test_variables_sent_verbatim() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(
            HttpMethod::Post,
            URL,
            200,
            json!({"data": {"character": {"id": "1"}}}),
        );

        let request = GraphQlRequest::new(GET_CHARACTER).variables(json!({"id": "1"}));
        let data = client(stub.clone()).query(&request).await.unwrap();
        assert_eq!(data, json!({"character": {"id": "1"}}));

        let body = stub.requests()[0].body_json().unwrap();
        assert_eq!(body["variables"], json!({"id": "1"}));
        assert_eq!(body["operationName"], "GetCharacter");
        assert_eq!(body["query"], GET_CHARACTER);
    }

    #[tokio::test]
    async fn test_server_errors() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(
            HttpMethod::Post,
            URL,
            200,
            json!({"data": null, "errors": [{"message": "Cannot query field \"x\""}]}),
        );
        let err = client(stub).query(&GraphQlRequest::new(GET_CHARACTERS)).await.unwrap_err();
        assert_eq!(err.to_string(), "GraphQL error: Cannot query field \"x\"");
    }

    #[tokio::test]
    async fn test_http_failure_without_errors() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_text(HttpMethod::Post, URL, 502, "Bad Gateway");
        let err = client(stub).query(&GraphQlRequest::new(GET_CHARACTERS)).await.unwrap_err();
        assert!(matches!(err, Error::HttpStatus { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_missing_data() {
        let stub = Arc::new(StubTransport::new());
        stub.respond_json(HttpMethod::Post, URL, 200, json!({}));
        let err = client(stub).query(&GraphQlRequest::new(GET_CHARACTERS)).await.unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
