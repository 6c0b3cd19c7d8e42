#![doc = include_str!("../README.md")]

mod client;
pub use client::{
    ApiConfigurations, Client, ClientSettings, DeviceType, IdentityConfig, InternalClient, Session,
};
mod error;
pub use error::{ApiError, MissingFieldError, NotAuthenticatedError};
mod messaging;
pub use messaging::Message;
mod two_factor_store;
pub use two_factor_store::{InMemoryTwoFactorTokenStore, StoreError, TwoFactorTokenStore};
mod types;
pub use types::UserId;
