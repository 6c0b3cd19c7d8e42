use serde::{Deserialize, Serialize};
use strongbox_core::{require, Client, Message, Session, UserId};
use strongbox_crypto::{HashPurpose, Kdf, MasterKey};
use tracing::{debug, instrument};

use crate::{
    api::{
        enums::TwoFactorProvider, request::PasswordTokenRequest, response::IdentityTokenResponse,
    },
    login::{LoginError, TwoFactorProviders},
    JwtToken,
};

/// Login with email and master password.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PasswordLoginRequest {
    /// Account email address. Normalized to lower-case before any use.
    pub email: String,
    /// Account master password. Only the derived hash goes over the wire.
    pub password: String,
    /// KDF parameters to derive the master key with. Defaults to the account default.
    pub kdf: Option<Kdf>,
    /// Explicit two-factor input, supplied when re-submitting after a challenge.
    pub two_factor: Option<TwoFactorRequest>,
}

impl std::fmt::Debug for PasswordLoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The password stays out of logs.
        f.debug_struct("PasswordLoginRequest")
            .field("email", &self.email)
            .field("kdf", &self.kdf)
            .field("two_factor", &self.two_factor)
            .finish_non_exhaustive()
    }
}

/// Explicit two-factor data for a login request.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TwoFactorRequest {
    /// The provider the user completed the challenge with.
    pub provider: TwoFactorProvider,
    /// The token produced by that provider.
    pub token: String,
    /// Whether the server should issue a remembered-device token.
    pub remember: bool,
}

/// Outcome of a login attempt. Exactly one of the two outcomes is populated: an authenticated
/// session, or a two-factor challenge listing the available providers.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PasswordLoginResponse {
    /// Whether the session was committed.
    pub authenticated: bool,
    /// The pending challenge, when the server requires a second factor.
    pub two_factor: Option<TwoFactorProviders>,
}

/// The three mutually exclusive ways a token request carries two-factor data. Keeping this a
/// closed set makes the precedence order exhaustive: explicit caller input wins over a
/// remembered device token, which wins over nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TwoFactorInput {
    /// Interactive re-submission after a challenge; used verbatim.
    Explicit {
        provider: TwoFactorProvider,
        token: String,
        remember: bool,
    },
    /// A token from a previously remembered device.
    Remembered { token: String },
    /// First attempt with no memory: the request carries no two-factor fields.
    None,
}

impl TwoFactorInput {
    pub(crate) fn resolve(explicit: Option<&TwoFactorRequest>, remembered: Option<String>) -> Self {
        match (explicit, remembered) {
            (Some(request), _) => Self::Explicit {
                provider: request.provider,
                token: request.token.clone(),
                remember: request.remember,
            },
            (None, Some(token)) => Self::Remembered { token },
            (None, None) => Self::None,
        }
    }
}

#[instrument(err, skip(client, input), fields(email = %input.email))]
pub(crate) async fn login_via_password(
    client: &Client,
    input: &PasswordLoginRequest,
) -> Result<PasswordLoginResponse, LoginError> {
    let email = input.email.trim().to_lowercase();
    let kdf = input.kdf.clone().unwrap_or_default();

    // Key material comes first: a crypto failure must abort before any network traffic.
    let master_key = MasterKey::derive(&input.password, &email, &kdf)?;
    let master_password_hash = master_key
        .derive_master_key_hash(input.password.as_bytes(), HashPurpose::ServerAuthorization)?;

    let config = client.internal.get_api_configurations();
    let app_id = client.internal.get_app_id();
    let stored_two_factor_token = client.internal.get_two_factor_store().get(&email).await?;

    let two_factor = TwoFactorInput::resolve(input.two_factor.as_ref(), stored_two_factor_token);
    let request = PasswordTokenRequest::new(
        &email,
        &master_password_hash,
        &two_factor,
        app_id,
        config.device_type,
        client.internal.get_device_name(),
    );

    let Some(response) = request.send(&config).await? else {
        // The transport already reported this failure; leave any existing session untouched.
        return Ok(PasswordLoginResponse {
            authenticated: false,
            two_factor: None,
        });
    };

    match response {
        IdentityTokenResponse::TwoFactorRequired(challenge) => {
            debug!("two-factor challenge required");
            Ok(PasswordLoginResponse {
                authenticated: false,
                two_factor: Some(challenge.into()),
            })
        }
        IdentityTokenResponse::Authenticated(success) => {
            // The authenticated identity comes from the token payload, not from re-deriving it.
            let claims: JwtToken = success.access_token.parse()?;
            let user_id: UserId = claims
                .sub
                .parse()
                .map_err(|_| LoginError::JwtTokenMalformedSubject)?;
            let user_email = claims.email.ok_or(LoginError::JwtTokenMissingEmail)?;

            // Assemble the full session before writing anything, so a missing field aborts the
            // whole transition and no partial state is ever visible.
            let session = Session {
                access_token: success.access_token.clone(),
                refresh_token: success.refresh_token.clone(),
                kdf,
                master_key,
                master_password_hash,
                user_id,
                email: user_email,
                user_key: require!(success.key),
                private_key: require!(success.private_key),
            };

            if let Some(two_factor_token) = &success.two_factor_token {
                client
                    .internal
                    .get_two_factor_store()
                    .set(&email, two_factor_token.clone())
                    .await?;
            }

            client.internal.set_session(session);

            // Only after every write above has landed; subscribers must never observe the
            // message with a half-populated session.
            client.internal.send_message(Message::LoggedIn);

            Ok(PasswordLoginResponse {
                authenticated: true,
                two_factor: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use strongbox_core::{Client, ClientSettings, Message};
    use strongbox_test::start_identity_mock;
    use tokio::sync::broadcast::error::TryRecvError;
    use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::AuthClientExt;

    const TEST_USER_ID: &str = "ec8c58a4-7400-4243-b5a8-1d96c0de5ae6";
    const TEST_EMAIL: &str = "user@example.com";
    const TEST_PASSWORD: &str = "asdfasdfasdf";

    /// KDF small enough to keep tests fast while staying above the enforced minimum.
    fn test_kdf() -> Kdf {
        Kdf::PBKDF2 {
            iterations: NonZeroU32::new(5000).expect("Non-zero number"),
        }
    }

    fn test_access_token() -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(
            serde_json::json!({
                "sub": TEST_USER_ID,
                "email": TEST_EMAIL,
                "name": "User",
            })
            .to_string(),
        );
        format!("{header}.{payload}.signature")
    }

    fn success_body(two_factor_token: Option<&str>) -> serde_json::Value {
        let mut body = serde_json::json!({
            "access_token": test_access_token(),
            "expires_in": 3600,
            "refresh_token": "test_refresh_token",
            "token_type": "Bearer",
            "Key": "encrypted-user-key",
            "PrivateKey": "encrypted-private-key",
        });
        if let Some(token) = two_factor_token {
            body["TwoFactorToken"] = token.into();
        }
        body
    }

    fn challenge_body() -> serde_json::Value {
        serde_json::json!({
            "TwoFactorProviders": ["0", "1"],
            "TwoFactorProviders2": {"0": null, "1": {"Email": "u***@example.com"}},
        })
    }

    fn client_for(server: &MockServer) -> Client {
        Client::new(Some(ClientSettings {
            identity_url: server.uri(),
            ..ClientSettings::default()
        }))
    }

    fn login_request(two_factor: Option<TwoFactorRequest>) -> PasswordLoginRequest {
        PasswordLoginRequest {
            email: TEST_EMAIL.to_owned(),
            password: TEST_PASSWORD.to_owned(),
            kdf: Some(test_kdf()),
            two_factor,
        }
    }

    async fn last_request_body(server: &MockServer) -> String {
        let requests = server
            .received_requests()
            .await
            .expect("request recording is enabled");
        let last = requests.last().expect("at least one request");
        String::from_utf8(last.body.clone()).expect("form bodies are utf-8")
    }

    #[test]
    fn test_explicit_input_overrides_remembered_token() {
        let explicit = TwoFactorRequest {
            provider: TwoFactorProvider::Email,
            token: "123456".to_owned(),
            remember: true,
        };

        let resolved =
            TwoFactorInput::resolve(Some(&explicit), Some("remembered-token".to_owned()));

        assert_eq!(
            resolved,
            TwoFactorInput::Explicit {
                provider: TwoFactorProvider::Email,
                token: "123456".to_owned(),
                remember: true,
            }
        );
    }

    #[test]
    fn test_remembered_token_used_when_no_explicit_input() {
        let resolved = TwoFactorInput::resolve(None, Some("remembered-token".to_owned()));

        assert_eq!(
            resolved,
            TwoFactorInput::Remembered {
                token: "remembered-token".to_owned(),
            }
        );
    }

    #[test]
    fn test_no_input_and_no_memory_resolves_to_none() {
        assert_eq!(TwoFactorInput::resolve(None, None), TwoFactorInput::None);
    }

    #[tokio::test]
    async fn test_login_success_commits_session_and_notifies_once() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(success_body(Some("remember-me"))),
            );
        let (server, _) = start_identity_mock(vec![mock]).await;

        let client = client_for(&server);
        let mut messages = client.internal.subscribe();

        let result = client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("login succeeds");

        assert!(result.authenticated);
        assert_eq!(result.two_factor, None);

        client
            .internal
            .with_session(|session| {
                assert_eq!(session.access_token, test_access_token());
                assert_eq!(session.refresh_token.as_deref(), Some("test_refresh_token"));
                assert_eq!(session.user_id.to_string(), TEST_USER_ID);
                assert_eq!(session.email, TEST_EMAIL);
                assert_eq!(session.user_key, "encrypted-user-key");
                assert_eq!(session.private_key, "encrypted-private-key");
                assert!(!session.master_password_hash.is_empty());
            })
            .expect("session is committed");

        // The issued remembered-device token is stored under the normalized email.
        assert_eq!(
            client
                .internal
                .get_two_factor_store()
                .get(TEST_EMAIL)
                .await
                .expect("get works"),
            Some("remember-me".to_owned())
        );

        // Exactly one notification, only after all writes.
        assert_eq!(messages.try_recv(), Ok(Message::LoggedIn));
        assert_eq!(messages.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_login_normalizes_email_before_any_use() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .and(matchers::body_string_contains("username=user%40example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body(None)))
            .expect(1);
        let (server, _) = start_identity_mock(vec![mock]).await;

        let client = client_for(&server);
        let result = client
            .auth()
            .login_via_password(&PasswordLoginRequest {
                email: "  USER@Example.COM ".to_owned(),
                ..login_request(None)
            })
            .await
            .expect("login succeeds");

        assert!(result.authenticated);
    }

    #[tokio::test]
    async fn test_challenge_surfaces_providers_without_touching_state() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(challenge_body()));
        let (server, _) = start_identity_mock(vec![mock]).await;

        let client = client_for(&server);
        let mut messages = client.internal.subscribe();

        let result = client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("challenge is not an error");

        assert!(!result.authenticated);
        assert_eq!(
            result.two_factor,
            Some(TwoFactorProviders {
                available: vec![TwoFactorProvider::Authenticator, TwoFactorProvider::Email],
            })
        );
        assert!(!client.internal.is_authenticated());
        assert_eq!(messages.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_explicit_two_factor_wins_over_remembered_token() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body(None)));
        let (server, _) = start_identity_mock(vec![mock]).await;

        let client = client_for(&server);
        client
            .internal
            .get_two_factor_store()
            .set(TEST_EMAIL, "remembered-token".to_owned())
            .await
            .expect("set works");

        client
            .auth()
            .login_via_password(&login_request(Some(TwoFactorRequest {
                provider: TwoFactorProvider::Email,
                token: "123456".to_owned(),
                remember: true,
            })))
            .await
            .expect("login succeeds");

        let body = last_request_body(&server).await;
        assert!(body.contains("twoFactorProvider=1"));
        assert!(body.contains("twoFactorToken=123456"));
        assert!(body.contains("twoFactorRemember=true"));
        assert!(!body.contains("remembered-token"));
    }

    #[tokio::test]
    async fn test_remembered_token_uses_remember_provider_with_flag_unset() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body(None)));
        let (server, _) = start_identity_mock(vec![mock]).await;

        let client = client_for(&server);
        client
            .internal
            .get_two_factor_store()
            .set(TEST_EMAIL, "remembered-token".to_owned())
            .await
            .expect("set works");

        client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("login succeeds");

        let body = last_request_body(&server).await;
        assert!(body.contains("twoFactorProvider=5"));
        assert!(body.contains("twoFactorToken=remembered-token"));
        assert!(body.contains("twoFactorRemember=false"));
    }

    #[tokio::test]
    async fn test_first_attempt_carries_no_two_factor_fields() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body(None)));
        let (server, _) = start_identity_mock(vec![mock]).await;

        let client = client_for(&server);
        client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("login succeeds");

        let body = last_request_body(&server).await;
        assert!(!body.contains("twoFactor"));
    }

    #[tokio::test]
    async fn test_unrecognized_error_is_a_quiet_no_op() {
        let mock = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"));
        let (server, _) = start_identity_mock(vec![mock]).await;

        let client = client_for(&server);
        let mut messages = client.internal.subscribe();

        let result = client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("empty exchange does not error");

        assert!(!result.authenticated);
        assert_eq!(result.two_factor, None);
        assert!(!client.internal.is_authenticated());
        assert_eq!(messages.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_crypto_failure_aborts_before_any_network_call() {
        let (server, _) = start_identity_mock(vec![]).await;

        let client = client_for(&server);
        let result = client
            .auth()
            .login_via_password(&PasswordLoginRequest {
                kdf: Some(Kdf::PBKDF2 {
                    iterations: NonZeroU32::new(1000).expect("Non-zero number"),
                }),
                ..login_request(None)
            })
            .await;

        assert!(matches!(result, Err(LoginError::Crypto(_))));
        assert!(server
            .received_requests()
            .await
            .expect("request recording is enabled")
            .is_empty());
    }

    #[tokio::test]
    async fn test_repeated_login_is_last_writer_wins() {
        let second_jwt = test_access_token();
        let first = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body(None)))
            .up_to_n_times(1);
        let mut second_body = success_body(None);
        second_body["refresh_token"] = "second_refresh_token".into();
        second_body["Key"] = "second-user-key".into();
        let second = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(second_body));
        let (server, _) = start_identity_mock(vec![first, second]).await;

        let client = client_for(&server);
        client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("first login succeeds");
        client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("second login succeeds");

        client
            .internal
            .with_session(|session| {
                assert_eq!(session.access_token, second_jwt);
                assert_eq!(
                    session.refresh_token.as_deref(),
                    Some("second_refresh_token")
                );
                assert_eq!(session.user_key, "second-user-key");
            })
            .expect("session is committed");
    }

    #[tokio::test]
    async fn test_failed_relogin_leaves_previous_session_untouched() {
        let first = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(success_body(None)))
            .up_to_n_times(1);
        let second = Mock::given(matchers::method("POST"))
            .and(matchers::path("/connect/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(challenge_body()));
        let (server, _) = start_identity_mock(vec![first, second]).await;

        let client = client_for(&server);
        client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("first login succeeds");

        let result = client
            .auth()
            .login_via_password(&login_request(None))
            .await
            .expect("challenge is not an error");

        assert!(!result.authenticated);
        client
            .internal
            .with_session(|session| {
                assert_eq!(session.access_token, test_access_token());
                assert_eq!(session.email, TEST_EMAIL);
            })
            .expect("previous session survives");
    }
}
