mod kdf;
pub use kdf::{
    default_argon2_iterations, default_argon2_memory, default_argon2_parallelism,
    default_pbkdf2_iterations, Kdf,
};
mod master_key;
pub use master_key::{HashPurpose, MasterKey};
