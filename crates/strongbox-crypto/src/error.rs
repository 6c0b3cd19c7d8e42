use thiserror::Error;

/// Errors from the key derivation primitives.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The KDF parameters are below the allowed minimums.
    #[error("Insufficient KDF parameters")]
    InsufficientKdfParameters,

    /// The underlying Argon2 implementation rejected the parameters or failed.
    #[error("Argon2 error, {0}")]
    Argon2(#[from] argon2::Error),
}
