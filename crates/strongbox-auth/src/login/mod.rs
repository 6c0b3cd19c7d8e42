//! The password login handshake.

mod password;
pub use password::{PasswordLoginRequest, PasswordLoginResponse, TwoFactorRequest};
pub(crate) use password::{login_via_password, TwoFactorInput};
mod response;
pub use response::TwoFactorProviders;

use strongbox_core::{ApiError, MissingFieldError, StoreError};
use strongbox_crypto::CryptoError;
use thiserror::Error;

use crate::jwt_token::InvalidJwtTokenError;

/// Errors from a login attempt. None of these mutate session state: a failed re-login leaves
/// any previously committed session untouched.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    InvalidJwtToken(#[from] InvalidJwtTokenError),
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("JWT token is missing email")]
    JwtTokenMissingEmail,
    #[error("JWT token subject is not a valid user id")]
    JwtTokenMalformedSubject,
}
