pub mod errors;
pub mod internal_api;
pub mod routes;
pub mod server;

use crate::{api::registration::RegistrationMachine, services};

/// Per-worker application state
pub struct AppState {
    /// Registration state machine, owning its roster repository
    pub registration: RegistrationMachine,
    pub notifier: services::ImplNotifier,
}
