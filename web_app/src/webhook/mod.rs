//! Webhook handlers for external integrations
//!
//! ## Modules
//!
//! - [`line`] - LINE Messaging API webhook handlers

pub mod line;
pub mod routes;
