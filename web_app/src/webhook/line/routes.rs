//! LINE webhook endpoint handler
//!
//! LINE expects a fast `200` for every delivery and penalizes webhooks that
//! fail, so this endpoint acknowledges with `{"status": "ok"}` whatever
//! happens to the individual events.

use super::{handler, schemas};
use crate::{front::AppState, metric};
use ntex::{util::Bytes, web};
use tracing::Instrument;

fn acknowledge() -> web::HttpResponse {
    web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "ok"
    }))
}

/// Webhook receiver endpoint (POST)
///
/// Parses the batch, runs the registration state machine for each text event
/// and acknowledges. Replies are pushed from a spawned task once the roster
/// changes of the whole batch are committed.
///
/// A body that is not an event batch (the console's verify call, an empty
/// body, random JSON) is acknowledged without processing.
#[web::post("/webhook")]
pub async fn receive(body: Bytes, app_state: web::types::State<AppState>) -> impl web::Responder {
    let payload: schemas::WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            metric::incr_webhook_statds("unparseable");
            logfire::warn!(
                "Webhook body is not an event batch, acknowledging: {error}",
                error = e.to_string()
            );
            return acknowledge();
        }
    };

    metric::incr_webhook_statds("received");
    let outbound = handler::process_webhook(&payload, &app_state.registration)
        .instrument(logfire::span!("line_webhook"))
        .await;

    if !outbound.is_empty() {
        let notifier = app_state.notifier.clone();
        ntex::rt::spawn(async move {
            handler::deliver(outbound, notifier.as_ref()).await;
        });
    }

    acknowledge()
}
