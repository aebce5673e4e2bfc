//! # API Module
//!
//! Business logic of the roster service, independent from HTTP plumbing.
//!
//! ## Modules
//!
//! - [`registration`] - LINE account registration state machine
//! - [`push`] - Manual push of an arbitrary text message

pub mod push;
pub mod registration;
