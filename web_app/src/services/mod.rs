use crate::webhook::line::outgoing_schemas::PushMessageResponse;
use async_trait::async_trait;
use std::sync::Arc;

/// Outbound push-message collaborator
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Pushes a single text message to `to` (a LINE user or group id).
    async fn send(&self, to: &str, text: &str) -> anyhow::Result<PushMessageResponse>;
}

/// Shared so deliveries can outlive the webhook request that produced them
pub type ImplNotifier = Arc<dyn Notifier>;
