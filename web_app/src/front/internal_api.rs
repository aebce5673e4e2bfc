//! Internal API endpoints for operators.
//!
//! These endpoints are not meant for the public internet. They require
//! authentication via the X-Internal-Secret header.

use crate::{
    api::{self, push::SendLineRequest},
    config,
    front::{AppState, errors},
};
use ntex::web;

/// Checks the `X-Internal-Secret` header against `expected`.
///
/// An empty `expected` secret rejects every request.
fn verify_internal_secret(req: &web::HttpRequest, expected: &str) -> bool {
    let secret = req
        .headers()
        .get("X-Internal-Secret")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    !expected.is_empty() && secret == expected
}

/// Pushes an arbitrary text message to a LINE user or group.
///
/// # Returns
/// - 200 with `{"status": "success", "line_response": ...}`
/// - 400 if `to` or `message` is blank
/// - 401 without a valid internal secret
/// - 502 if LINE rejects the push
#[web::post("/send-line")]
pub async fn send_line(
    req: web::HttpRequest,
    body: web::types::Json<SendLineRequest>,
    app_state: web::types::State<AppState>,
) -> Result<impl web::Responder, web::Error> {
    let expected = config::APP_CONFIG
        .get()
        .map(|config| config.internal_api_secret.as_str())
        .unwrap_or("");
    if !verify_internal_secret(&req, expected) {
        return Err(errors::ApiError::Unauthorized.into());
    }

    if !body.fields_are_valid() {
        return Err(errors::ApiError::InvalidInput("`to` and `message` are required".into()).into());
    }

    let line_response = api::push::send_manual_message(&body, &app_state.notifier)
        .await
        .map_err(|e| errors::ApiError::ExternalServiceError(format!("{e:#}")))?;

    Ok(web::HttpResponse::Ok().json(&serde_json::json!({
        "status": "success",
        "line_response": line_response,
    })))
}
