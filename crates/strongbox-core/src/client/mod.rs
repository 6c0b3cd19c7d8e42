//! Strongbox SDK client
//!
//! Contains the [Client] struct, the entry point for feature crates.

#[allow(clippy::module_inception)]
mod client;
pub use client::Client;
mod client_settings;
pub use client_settings::{ClientSettings, DeviceType};
mod internal;
pub use internal::{ApiConfigurations, IdentityConfig, InternalClient};
mod session;
pub use session::Session;
