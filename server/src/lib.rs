//! Studio class booking server.
//!
//! Wires the JSON file stores and the audit log into the admission
//! controller and serves the HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod config;

pub use app::BookingApp;
pub use config::Config;
