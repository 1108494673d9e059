//! Greeting forwarding tool definition.
//!
//! Forwards a greeting request to a REST backend and returns its message.
//! Only registered when a greeting endpoint is configured.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domains::tools::{
    CallContext, ParamContract, ParamSpec, ToolArguments, ToolEntry, ToolError, ToolHandler,
    ToolOutput,
};

/// Request body sent to the greeting backend.
#[derive(Debug, Serialize)]
struct GreetingRequest<'a> {
    name: &'a str,
}

/// Response body expected from the greeting backend.
#[derive(Debug, Deserialize)]
struct GreetingResponse {
    message: String,
}

/// Greeting forwarding tool - asks a REST backend to greet someone.
pub struct HelloRestTool {
    client: Client,
    endpoint: Url,
}

impl HelloRestTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "hello_rest";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Say hello to someone through the configured REST greeting service";

    /// Create the tool for a backend endpoint.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn contract() -> ParamContract {
        ParamContract::new(vec![
            ParamSpec::required("name").with_description("Name of the person to greet"),
        ])
        .unwrap_or_default()
    }

    /// Create the registry entry for this tool.
    pub fn into_entry(self) -> Result<ToolEntry, ToolError> {
        ToolEntry::new(Self::NAME, Self::DESCRIPTION, Self::contract(), self)
    }

    async fn forward(&self, name: &str) -> Result<(u16, String), ToolError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GreetingRequest { name })
            .send()
            .await
            .map_err(|e| {
                ToolError::execution_failed(format!("failed to call greeting endpoint: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ToolError::execution_failed(format!(
                "received non-success response: {}, body: {}",
                status.as_u16(),
                body
            )));
        }

        let greeting: GreetingResponse = response.json().await.map_err(|e| {
            ToolError::execution_failed(format!("failed to decode response body: {}", e))
        })?;
        Ok((status.as_u16(), greeting.message))
    }
}

#[async_trait]
impl ToolHandler for HelloRestTool {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn call(&self, args: &ToolArguments, ctx: &CallContext) -> Result<ToolOutput, ToolError> {
        let name = args.require_str("name")?;
        info!("Forwarding greeting for '{}'", name);

        ctx.notify_event(
            "forwarding",
            json!({ "tool": Self::NAME, "endpoint": self.endpoint.as_str() }),
        )
        .await;

        match self.forward(name).await {
            Ok((status, message)) => {
                ctx.notify_event("received", json!({ "tool": Self::NAME, "status": status }))
                    .await;
                Ok(ToolOutput::text(message.clone()).with_data(json!({ "message": message })))
            }
            Err(e) => {
                warn!("Greeting backend call failed: {}", e);
                Err(e)
            }
        }
    }
}
