//! Route configuration for the non-webhook endpoints.

use super::internal_api;
use ntex::web;

/// Configures internal operator routes.
///
/// # Routes
/// - `POST /send-line` - Push a text message to a LINE user or group
pub fn internal_api(cfg: &mut web::ServiceConfig) {
    cfg.service(internal_api::send_line);
}
