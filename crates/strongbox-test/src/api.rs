use strongbox_core::IdentityConfig;

/// Helper for testing the identity API using wiremock.
///
/// Warning: when using `Mock::expect` ensure `server` is not dropped before the test completes,
/// otherwise the expectation is verified against a dead server.
pub async fn start_identity_mock(mocks: Vec<wiremock::Mock>) -> (wiremock::MockServer, IdentityConfig) {
    let server = wiremock::MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let config = IdentityConfig {
        base_path: server.uri(),
        user_agent: Some("test-agent".to_string()),
        client: reqwest::Client::new(),
        oauth_access_token: None,
    };

    (server, config)
}
