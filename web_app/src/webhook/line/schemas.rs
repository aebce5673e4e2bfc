//! # LINE Webhook Schemas
//!
//! Data structures for the JSON batch LINE posts to the webhook. Every field
//! the dispatcher does not strictly need is optional or defaulted, so an event
//! type we do not handle never makes the whole batch unreadable.

use serde::{Deserialize, Serialize};

/// Root webhook payload from LINE
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// User id of the bot that received the events
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Events in delivery order. Empty for the console's verification request.
    #[serde(default)]
    pub events: Vec<Event>,
}

/// A single webhook event
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event type (message, follow, unfollow, postback, ...)
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// Who triggered the event
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Message content (if type is "message")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    /// Token to reply with the reply API (not used: replies are pushed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_token: Option<String>,
    /// Milliseconds since epoch
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_event_id: Option<String>,
}

/// Source of an event
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Source type (user, group, room)
    #[serde(rename = "type", default)]
    pub source_type: String,
    /// LINE user id of the sender
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

/// Message object
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Message ID
    #[serde(default)]
    pub id: String,
    /// Message type (text, image, sticker, location, ...)
    #[serde(rename = "type", default)]
    pub msg_type: String,
    /// Text content (if type is "text")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Event {
    /// Sender's LINE user id, if the event carries one
    pub fn user_id(&self) -> Option<&str> {
        self.source.as_ref()?.user_id.as_deref()
    }

    /// Raw text of a text message event
    pub fn text(&self) -> Option<&str> {
        self.message.as_ref()?.text.as_deref()
    }
}
