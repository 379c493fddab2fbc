use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A pragmatic view of a callback event. Senders attach wildly different
/// `data` shapes per event type, so every field is optional and an absent
/// field is a no-op branch, never a fault.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CallbackEvent {
    /// Event tag; `"qr"`, `"message"` and `"message_create"` are acted on.
    pub data_type: Option<String>,
    pub data: Option<EventData>,
    /// Key into the session registry.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EventData {
    /// Pairing payload for `"qr"` events.
    pub qr: Option<String>,
    /// Message body for `"message"` / `"message_create"` events.
    pub message: Option<MessagePayload>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagePayload {
    /// Outbound echo of our own send; these are ignored.
    pub from_me: bool,
    /// Only `"chat"` messages get a poll back.
    pub r#type: Option<String>,
    /// Sender address, used as the poll recipient.
    pub from: Option<String>,
}
