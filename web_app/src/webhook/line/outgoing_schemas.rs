//! # LINE Outgoing Message Schemas
//!
//! Payloads for the LINE push message API.

use serde::{Deserialize, Serialize};

/// Body of a push message request
#[derive(Debug, Serialize, Deserialize)]
pub struct PushMessageRequest {
    /// Recipient's LINE user id or group id
    pub to: String,
    /// Up to five messages delivered in order
    pub messages: Vec<OutgoingMessage>,
}

impl PushMessageRequest {
    /// Creates a push request carrying a single text message
    pub fn new_text(to: String, text: String) -> Self {
        Self {
            to,
            messages: vec![OutgoingMessage::Text { text }],
        }
    }
}

/// A message object, tagged by its `type`
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingMessage {
    Text { text: String },
}

/// Response from the LINE push message API
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessageResponse {
    #[serde(default)]
    pub sent_messages: Vec<SentMessage>,
}

/// Sent message information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote_token: Option<String>,
}
