#![doc = include_str!("../README.md")]

mod error;
pub use error::CryptoError;
mod keys;
pub use keys::{
    default_argon2_iterations, default_argon2_memory, default_argon2_parallelism,
    default_pbkdf2_iterations, HashPurpose, Kdf, MasterKey,
};
pub(crate) mod util;
