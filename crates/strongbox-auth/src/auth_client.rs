use strongbox_core::Client;

use crate::login::{login_via_password, LoginError, PasswordLoginRequest, PasswordLoginResponse};

/// The subclient for the authentication operations of a [Client].
pub struct AuthClient {
    pub(crate) client: Client,
}

impl AuthClient {
    /// Authenticate with an email address and master password.
    ///
    /// Derives the master key locally, exchanges the derived hash for tokens and, when the
    /// server accepts, commits the session and notifies subscribers. When the server requires
    /// a second factor, the returned response lists the available providers so the caller can
    /// re-submit with an explicit [crate::TwoFactorRequest].
    pub async fn login_via_password(
        &self,
        input: &PasswordLoginRequest,
    ) -> Result<PasswordLoginResponse, LoginError> {
        login_via_password(&self.client, input).await
    }
}

/// The extension trait that hangs the [AuthClient] off a [Client].
pub trait AuthClientExt {
    /// The authentication operations.
    fn auth(&self) -> AuthClient;
}

impl AuthClientExt for Client {
    fn auth(&self) -> AuthClient {
        AuthClient {
            client: self.clone(),
        }
    }
}
