//! Manual push of a text message to a LINE user or group.

use crate::{metric, services, webhook::line::outgoing_schemas::PushMessageResponse};
use serde::{Deserialize, Serialize};

/// Request body of the manual push endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct SendLineRequest {
    /// LINE user id or group id
    pub to: String,
    /// Text to send
    pub message: String,
}

impl SendLineRequest {
    /// Both fields must contain something other than whitespace
    pub fn fields_are_valid(&self) -> bool {
        !self.to.trim().is_empty() && !self.message.trim().is_empty()
    }
}

/// Sends `request.message` to `request.to` and returns LINE's answer.
///
/// # Errors
/// Returns an error when the push call fails or LINE rejects it.
pub async fn send_manual_message(
    request: &SendLineRequest,
    notifier: &services::ImplNotifier,
) -> anyhow::Result<PushMessageResponse> {
    let response = notifier.send(request.to.trim(), &request.message).await?;

    metric::incr_push_statds("manual");
    Ok(response)
}
