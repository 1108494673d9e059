//! Outbound session notifications.
//!
//! Handlers may push key/value events back to the session that issued the
//! call. Delivery is fire-and-forget: a handler never sees a delivery error.
//! Events pushed by one handler invocation reach the session in issue order
//! because each push is awaited before the next one starts.
//!
//! Separately, every initialized session gets a `list_changed` forwarder that
//! watches the registry and tells the session whenever the tool set changes,
//! whichever session caused the change.

use async_trait::async_trait;
use rmcp::{
    RoleServer,
    model::{LoggingLevel, LoggingMessageNotificationParam},
    service::Peer,
};
use serde_json::{Map, Value};
use tokio::{sync::watch, task::JoinHandle};
use tracing::debug;

/// Key/value payload of one session event.
pub type SessionEvent = Map<String, Value>;

/// Destination for events pushed by a handler.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Deliver one event to the originating session.
    async fn push(&self, event: SessionEvent);
}

/// Sink that drops every event. Used where there is no session stream.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

#[async_trait]
impl EventSink for NoopSink {
    async fn push(&self, _event: SessionEvent) {}
}

/// Sink that forwards events to an MCP peer as logging notifications.
pub struct PeerEventSink {
    peer: Peer<RoleServer>,
    logger: String,
}

impl PeerEventSink {
    pub fn new(peer: Peer<RoleServer>, logger: impl Into<String>) -> Self {
        Self {
            peer,
            logger: logger.into(),
        }
    }
}

#[async_trait]
impl EventSink for PeerEventSink {
    async fn push(&self, event: SessionEvent) {
        let param = LoggingMessageNotificationParam {
            level: LoggingLevel::Info,
            logger: Some(self.logger.clone()),
            data: Value::Object(event),
        };
        if let Err(e) = self.peer.notify_logging_message(param).await {
            debug!(logger = %self.logger, error = %e, "failed to deliver session event");
        }
    }
}

/// A session that can be told its tool list is stale.
#[async_trait]
pub trait ListChangedSink: Send + Sync + 'static {
    /// Send `notifications/tools/list_changed`. An error means the session
    /// is gone.
    async fn tool_list_changed(&self) -> Result<(), String>;
}

#[async_trait]
impl ListChangedSink for Peer<RoleServer> {
    async fn tool_list_changed(&self) -> Result<(), String> {
        self.notify_tool_list_changed()
            .await
            .map_err(|e| e.to_string())
    }
}

/// Forward registry changes to one session until the session goes away.
///
/// Changes that happen while a notification is in flight are coalesced into
/// one further notification.
pub fn forward_list_changes<S: ListChangedSink>(
    mut changes: watch::Receiver<u64>,
    session: S,
    session_id: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let generation = *changes.borrow_and_update();
            if let Err(e) = session.tool_list_changed().await {
                debug!(
                    session_id,
                    error = %e,
                    "failed to send tools list_changed, dropping session"
                );
                return;
            }
            debug!(session_id, generation, "sent tools list_changed");
        }
    })
}

/// Sink that keeps every event in memory, in delivery order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: parking_lot::Mutex<Vec<SessionEvent>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl EventSink for RecordingSink {
    async fn push(&self, event: SessionEvent) {
        self.events.lock().push(event);
    }
}
