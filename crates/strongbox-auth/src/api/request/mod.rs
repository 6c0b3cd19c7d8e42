mod password_token_request;
pub(crate) use password_token_request::PasswordTokenRequest;

use strongbox_core::{ApiConfigurations, ApiError};
use tracing::warn;

use crate::{
    api::response::{parse_identity_response, IdentityTokenResponse},
    login::LoginError,
};

pub(crate) async fn send_identity_connect_request(
    configurations: &ApiConfigurations,
    body: impl serde::Serialize,
) -> Result<Option<IdentityTokenResponse>, LoginError> {
    let config = &configurations.identity;

    let mut request = config
        .client
        .post(format!("{}/connect/token", &config.base_path))
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded; charset=utf-8",
        )
        .header(reqwest::header::ACCEPT, "application/json")
        // per OAuth2 spec recommendation for token requests (https://www.rfc-editor.org/rfc/rfc6749.html#section-5.1)
        // we include no-cache headers to prevent caching of sensitive token requests / responses.
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .header("Device-Type", configurations.device_type as usize);

    if let Some(ref user_agent) = config.user_agent {
        request = request.header(reqwest::header::USER_AGENT, user_agent.clone());
    }

    let response = match request
        .body(serde_qs::to_string(&body).expect("Serialize should be infallible"))
        .send()
        .await
    {
        Ok(response) => response,
        Err(e) => {
            // The transport is responsible for reporting its own failures; callers treat a
            // missing response as already handled and leave all state untouched.
            // TODO: revisit whether transport failures should surface to the caller instead
            // of resolving to an empty exchange.
            warn!("identity token request failed to send: {e}");
            return Ok(None);
        }
    };

    let status = response.status();
    let text = response.text().await.map_err(ApiError::from)?;

    parse_identity_response(status, text)
}
