use ntex::web;

/// Configures webhook routes for external integrations.
///
/// These routes are public endpoints that don't require authentication.
///
/// # Routes
/// - `POST /webhook` - LINE webhook receiver (also answers the console's verify call)
pub fn line(cfg: &mut web::ServiceConfig) {
    cfg.service(super::line::receive);
}
