use std::sync::{Arc, OnceLock, RwLock};

use super::internal::InternalClient;
use crate::{
    client::{
        client_settings::ClientSettings,
        internal::{ApiConfigurations, IdentityConfig},
    },
    messaging::Messenger,
    InMemoryTwoFactorTokenStore, TwoFactorTokenStore,
};

/// The main struct to interact with the Strongbox SDK.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: The [`Client`] struct requires its `Clone` implementation to return an owned
    // reference to the same instance. Any mutable state needs to be behind an Arc, ideally as
    // part of the existing [`InternalClient`] struct.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new Strongbox client with a process-local two-factor token store.
    pub fn new(settings: Option<ClientSettings>) -> Self {
        Self::new_internal(settings, Arc::new(InMemoryTwoFactorTokenStore::default()))
    }

    /// Create a new Strongbox client with a host-supplied two-factor token store, for
    /// applications that persist remembered-device tokens.
    pub fn new_with_two_factor_store(
        settings: Option<ClientSettings>,
        two_factor_store: Arc<dyn TwoFactorTokenStore>,
    ) -> Self {
        Self::new_internal(settings, two_factor_store)
    }

    fn new_internal(
        settings_input: Option<ClientSettings>,
        two_factor_store: Arc<dyn TwoFactorTokenStore>,
    ) -> Self {
        let settings = settings_input.unwrap_or_default();

        let http_client = reqwest::Client::builder()
            .build()
            .expect("HTTP Client build should not fail");

        let identity = IdentityConfig {
            base_path: settings.identity_url,
            user_agent: Some(settings.user_agent),
            client: http_client,
            oauth_access_token: None,
        };

        Self {
            internal: Arc::new(InternalClient {
                app_id: OnceLock::new(),
                session: RwLock::new(None),
                device_name: settings.device_name,
                __api_configurations: RwLock::new(ApiConfigurations::new(
                    identity,
                    settings.device_type,
                )),
                messenger: Messenger::new(),
                two_factor_store,
            }),
        }
    }
}
