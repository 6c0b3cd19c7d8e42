mod identity_success_response;
pub(crate) use identity_success_response::IdentityTokenSuccessResponse;
mod identity_two_factor_response;
pub(crate) use identity_two_factor_response::IdentityTwoFactorResponse;

use reqwest::StatusCode;
use tracing::warn;

use crate::login::LoginError;

/// The two shapes a token exchange can come back in. Exactly one of them is produced per
/// attempt; exchanges that produce neither resolve to `None` (see [parse_identity_response]).
#[derive(Debug)]
pub(crate) enum IdentityTokenResponse {
    Authenticated(IdentityTokenSuccessResponse),
    TwoFactorRequired(IdentityTwoFactorResponse),
}

/// Interprets the raw identity response.
///
/// A success status must carry a well-formed token payload. A failure status carrying the
/// available two-factor providers is the challenge outcome, not an error. Anything else has
/// already been reported by the transport layer and resolves to `None` so the caller can bail
/// out without touching any state.
pub(crate) fn parse_identity_response(
    status: StatusCode,
    response: String,
) -> Result<Option<IdentityTokenResponse>, LoginError> {
    if status.is_success() {
        let success: IdentityTokenSuccessResponse =
            serde_json::from_str(&response).map_err(strongbox_core::ApiError::from)?;
        return Ok(Some(IdentityTokenResponse::Authenticated(success)));
    }

    if let Ok(two_factor) = serde_json::from_str::<IdentityTwoFactorResponse>(&response) {
        return Ok(Some(IdentityTokenResponse::TwoFactorRequired(two_factor)));
    }

    warn!(%status, "identity returned an unrecognized error response");
    Ok(None)
}
