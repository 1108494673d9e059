//! Tool handler trait and call plumbing.
//!
//! A [`ToolHandler`] is the behavior stored inside a registry entry. It gets
//! the (already validated) call arguments plus a [`CallContext`] through which
//! it can push events to the calling session.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::arguments::ToolArguments;
use super::error::ToolError;
use super::notify::{EventSink, NoopSink, SessionEvent};

/// Successful output of a tool execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Human-readable result text.
    pub text: String,

    /// Optional structured result data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ToolOutput {
    /// Create a text-only output.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: None,
        }
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Per-call context handed to a handler.
#[derive(Clone)]
pub struct CallContext {
    sink: Arc<dyn EventSink>,
}

impl CallContext {
    /// Context whose events go to `sink`.
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }

    /// Context with no session attached; events are dropped.
    pub fn detached() -> Self {
        Self::new(Arc::new(NoopSink))
    }

    /// Push an event to the originating session.
    pub async fn notify(&self, event: SessionEvent) {
        self.sink.push(event).await;
    }

    /// Push a `{"event": kind, ...fields}` event.
    pub async fn notify_event(&self, kind: &str, fields: Value) {
        let mut event = SessionEvent::new();
        event.insert("event".into(), json!(kind));
        if let Value::Object(fields) = fields {
            event.extend(fields);
        }
        self.notify(event).await;
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::detached()
    }
}

impl std::fmt::Debug for CallContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallContext").finish_non_exhaustive()
    }
}

/// Behavior of one registered tool.
///
/// Handlers may fail with any [`ToolError`]; the dispatcher returns it to the
/// caller unchanged.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Execute the tool with the given arguments.
    async fn call(&self, args: &ToolArguments, ctx: &CallContext)
    -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
pub mod testing {
    //! Handlers used by tests across the tools domain.

    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Replies with a fixed text.
    pub struct FixedHandler(pub &'static str);

    #[async_trait]
    impl ToolHandler for FixedHandler {
        async fn call(
            &self,
            _args: &ToolArguments,
            _ctx: &CallContext,
        ) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::text(self.0))
        }
    }

    /// Greets `name` and counts how often it ran.
    #[derive(Default)]
    pub struct CountingGreeter {
        pub calls: Arc<AtomicUsize>,
    }

    impl CountingGreeter {
        pub fn calls(&self) -> Arc<AtomicUsize> {
            self.calls.clone()
        }
    }

    #[async_trait]
    impl ToolHandler for CountingGreeter {
        async fn call(
            &self,
            args: &ToolArguments,
            _ctx: &CallContext,
        ) -> Result<ToolOutput, ToolError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let name = args.require_str("name")?;
            Ok(ToolOutput::text(format!("Hello, {}!", name)))
        }
    }

    /// Always fails with an application error.
    pub struct FailingHandler;

    #[async_trait]
    impl ToolHandler for FailingHandler {
        async fn call(
            &self,
            _args: &ToolArguments,
            _ctx: &CallContext,
        ) -> Result<ToolOutput, ToolError> {
            Err(ToolError::execution_failed("backend unavailable"))
        }
    }
}
