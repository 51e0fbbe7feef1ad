//! Chat messages injected into the player's client to report what was captured.

use crate::config::CaptureConfig;
use crate::coordinates::Coordinate3D;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JSON text component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Chat {
    pub fn new(text: impl Into<String>) -> Self {
        Chat {
            text: text.into(),
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Where the client shows the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageTarget {
    Chat,
    System,
    /// The action bar above the hotbar.
    GameInfo,
}

impl MessageTarget {
    pub fn position_byte(&self) -> u8 {
        match self {
            MessageTarget::Chat => 0,
            MessageTarget::System => 1,
            MessageTarget::GameInfo => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientMessage {
    pub chat: Chat,
    pub target: MessageTarget,
}

impl ClientMessage {
    pub fn new(chat: Chat, target: MessageTarget) -> Self {
        ClientMessage { chat, target }
    }

    /// The chat component as JSON. `target` travels beside it as the
    /// position byte.
    pub fn chat_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.chat)
    }
}

/// Fire-and-forget delivery of messages to the client.
pub trait NotificationSink: Send + Sync {
    fn accept(&self, message: ClientMessage);
}

/// Discards everything.
pub struct NoopSink;

impl NotificationSink for NoopSink {
    fn accept(&self, _message: ClientMessage) {}
}

/// Formats and gates the inventory messages.
#[derive(Clone)]
pub struct InventoryNotifier {
    sink: Arc<dyn NotificationSink>,
    enabled: bool,
    failure_color: String,
}

impl InventoryNotifier {
    pub fn from_config(config: &CaptureConfig, sink: Arc<dyn NotificationSink>) -> Self {
        InventoryNotifier {
            sink,
            enabled: config.send_info_messages,
            failure_color: config.failure_message_color.clone(),
        }
    }

    pub fn disabled() -> Self {
        InventoryNotifier {
            sink: Arc::new(NoopSink),
            enabled: false,
            failure_color: String::new(),
        }
    }

    pub fn inventory_recorded(&self, location: Coordinate3D) {
        if self.enabled {
            let chat = Chat::new(format!("Recorded inventory at {}", location));
            self.sink
                .accept(ClientMessage::new(chat, MessageTarget::GameInfo));
        }
    }

    pub fn inventory_failed(&self, location: Coordinate3D) {
        if self.enabled {
            let chat = Chat::new(format!(
                "Unable to save inventory at {}. Try reloading the chunk.",
                location
            ))
            .with_color(self.failure_color.clone());
            self.sink
                .accept(ClientMessage::new(chat, MessageTarget::GameInfo));
        }
    }
}

impl std::fmt::Debug for InventoryNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InventoryNotifier")
            .field("enabled", &self.enabled)
            .finish()
    }
}
