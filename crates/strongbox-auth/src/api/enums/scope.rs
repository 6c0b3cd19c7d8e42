use serde::{Deserialize, Serialize};

/// The OAuth 2.0 scopes recognized by the identity endpoint.
/// Scopes define the specific permissions an access token grants to the client.
#[derive(Serialize, Deserialize, Debug)]
pub(crate) enum Scope {
    /// Full API access plus a refresh token, requested by user logins.
    #[serde(rename = "api offline_access")]
    ApiOfflineAccess,
}
