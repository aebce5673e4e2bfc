//! LINE webhook integration module
//!
//! ## Submodules
//!
//! - [`handler`] - Event dispatcher feeding the registration state machine
//! - [`routes`] - HTTP endpoint receiving LINE webhook batches
//! - [`schemas`] - Incoming webhook payloads
//! - [`outgoing_schemas`] - Push message payloads
//! - [`client`] - LINE API client for pushing messages
//!
//! ## Security
//!
//! Webhook callers are not authenticated here; put the endpoint behind a
//! reverse proxy that only forwards LINE traffic.

pub mod client;
pub mod handler;
pub mod outgoing_schemas;
pub mod routes;
pub mod schemas;

pub use routes::receive;
