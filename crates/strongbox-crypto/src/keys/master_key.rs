use std::{fmt, pin::Pin};

use base64::{engine::general_purpose::STANDARD, Engine};
use generic_array::{typenum::U32, GenericArray};
use sha2::Digest;
use zeroize::Zeroize;

use crate::{util, CryptoError, Kdf};

const PBKDF2_MIN_ITERATIONS: u32 = 5000;

const ARGON2ID_MIN_MEMORY: u32 = 16 * 1024;
const ARGON2ID_MIN_ITERATIONS: u32 = 2;
const ARGON2ID_MIN_PARALLELISM: u32 = 1;

/// The purpose of a master password hash. The discriminant doubles as the round count of the
/// final PBKDF2 stretch, so the server-bound verifier and the local unlock verifier can never
/// collide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HashPurpose {
    /// Verifier sent to the identity server in place of the raw password.
    ServerAuthorization = 1,
    /// Verifier kept on the device for offline unlock checks.
    LocalAuthorization = 2,
}

/// A user's master key, derived deterministically from their master password and account email.
///
/// The key never leaves the client. The only value derived from it that goes over the wire is
/// the server-authorization hash produced by [MasterKey::derive_master_key_hash].
pub struct MasterKey(Pin<Box<GenericArray<u8, U32>>>);

impl MasterKey {
    /// Derives a user's master key from their password, email and KDF.
    ///
    /// Note: the email is trimmed and converted to lowercase before being used as the salt, so
    /// two emails differing only in case produce the same key.
    pub fn derive(password: &str, email: &str, kdf: &Kdf) -> Result<Self, CryptoError> {
        derive_kdf_key(
            password.as_bytes(),
            email.trim().to_lowercase().as_bytes(),
            kdf,
        )
    }

    /// Derive the master key hash, used for server authorization or local unlock.
    ///
    /// The hash is a function of the derived key, not of the raw password alone: the key
    /// material is stretched once more with the password as salt.
    pub fn derive_master_key_hash(
        &self,
        password: &[u8],
        purpose: HashPurpose,
    ) -> Result<String, CryptoError> {
        let hash = util::pbkdf2(&self.0, password, purpose as u32);

        Ok(STANDARD.encode(hash))
    }
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MasterKey")
    }
}

impl Drop for MasterKey {
    fn drop(&mut self) {
        self.0.as_mut().get_mut().zeroize();
    }
}

/// Derive a key from a secret and salt using the provided KDF.
fn derive_kdf_key(secret: &[u8], salt: &[u8], kdf: &Kdf) -> Result<MasterKey, CryptoError> {
    let mut hash = match kdf {
        Kdf::PBKDF2 { iterations } => {
            let iterations = iterations.get();
            if iterations < PBKDF2_MIN_ITERATIONS {
                return Err(CryptoError::InsufficientKdfParameters);
            }

            util::pbkdf2(secret, salt, iterations)
        }
        Kdf::Argon2id {
            iterations,
            memory,
            parallelism,
        } => {
            let memory = memory.get() * 1024; // Convert MiB to KiB;
            let iterations = iterations.get();
            let parallelism = parallelism.get();

            if memory < ARGON2ID_MIN_MEMORY
                || iterations < ARGON2ID_MIN_ITERATIONS
                || parallelism < ARGON2ID_MIN_PARALLELISM
            {
                return Err(CryptoError::InsufficientKdfParameters);
            }

            use argon2::*;

            let params = Params::new(memory, iterations, parallelism, Some(32))?;
            let argon = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

            let salt_sha = sha2::Sha256::new().chain_update(salt).finalize();

            let mut hash = [0u8; 32];
            argon.hash_password_into(secret, &salt_sha, &mut hash)?;

            // Argon2 is using some stack memory that is not zeroed. Eventually some function
            // will overwrite the stack, but we use this trick to force the used
            // stack to be zeroed.
            #[inline(never)]
            fn clear_stack() {
                std::hint::black_box([0u8; 4096]);
            }
            clear_stack();

            hash
        }
    };
    let key_material = Box::pin(GenericArray::clone_from_slice(&hash));
    hash.zeroize();
    Ok(MasterKey(key_material))
}
