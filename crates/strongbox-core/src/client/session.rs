use std::fmt;

use strongbox_crypto::{Kdf, MasterKey};

use crate::UserId;

/// The state of a successfully authenticated login.
///
/// A session is assembled in full before it is committed to the client, and committing replaces
/// any previous session as a whole. Observers can therefore never see a half-populated session,
/// and a repeated login is last-writer-wins.
pub struct Session {
    /// OAuth2 access token for the API.
    pub access_token: String,
    /// OAuth2 refresh token, when the server issued one.
    pub refresh_token: Option<String>,
    /// KDF parameters the master key was derived with.
    pub kdf: Kdf,
    /// The master key derived during this login. Never transmitted.
    pub master_key: MasterKey,
    /// The server-authorization hash of the master password.
    pub master_password_hash: String,
    /// The authenticated user's id, sourced from the access token payload.
    pub user_id: UserId,
    /// The authenticated user's email, sourced from the access token payload.
    pub email: String,
    /// The user's encrypted symmetric key as supplied by the server. Opaque to this crate.
    pub user_key: String,
    /// The user's encrypted private key as supplied by the server. Opaque to this crate.
    pub private_key: String,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Key material and tokens are intentionally left out.
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .field("kdf", &self.kdf)
            .finish_non_exhaustive()
    }
}
