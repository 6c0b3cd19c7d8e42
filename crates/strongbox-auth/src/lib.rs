#![doc = include_str!("../README.md")]

mod auth_client;
pub use auth_client::{AuthClient, AuthClientExt};

pub(crate) mod api;

mod jwt_token;
pub use jwt_token::{InvalidJwtTokenError, JwtToken};

pub mod login;

pub use api::enums::TwoFactorProvider;
