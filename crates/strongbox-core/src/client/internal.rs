use std::sync::{Arc, OnceLock, RwLock};

use tokio::sync::broadcast;
use tracing::debug;
use uuid::Uuid;

use crate::{
    client::session::Session,
    messaging::{Message, Messenger},
    DeviceType, TwoFactorTokenStore, UserId,
};

/// Configuration for reaching the identity endpoint.
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// Base url of the identity service, without a trailing slash.
    pub base_path: String,
    /// User agent sent with every request.
    pub user_agent: Option<String>,
    /// The HTTP client used for requests.
    pub client: reqwest::Client,
    /// Bearer token attached to authenticated requests, set after login.
    pub oauth_access_token: Option<String>,
}

#[allow(missing_docs)]
pub struct ApiConfigurations {
    pub identity: IdentityConfig,
    pub device_type: DeviceType,
}

impl std::fmt::Debug for ApiConfigurations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfigurations")
            .field("device_type", &self.device_type)
            .finish_non_exhaustive()
    }
}

impl ApiConfigurations {
    pub(crate) fn new(identity: IdentityConfig, device_type: DeviceType) -> Arc<Self> {
        Arc::new(Self {
            identity,
            device_type,
        })
    }

    fn set_tokens(self: &mut Arc<Self>, token: String) {
        let mut identity = self.identity.clone();
        identity.oauth_access_token = Some(token);

        *self = ApiConfigurations::new(identity, self.device_type);
    }
}

/// Mutable state shared by all clones of a [crate::Client].
pub struct InternalClient {
    pub(crate) app_id: OnceLock<Uuid>,
    pub(crate) session: RwLock<Option<Session>>,
    pub(crate) device_name: String,

    /// Use get_api_configurations() to access this.
    #[doc(hidden)]
    pub(crate) __api_configurations: RwLock<Arc<ApiConfigurations>>,

    pub(crate) messenger: Messenger,
    pub(crate) two_factor_store: Arc<dyn TwoFactorTokenStore>,
}

impl std::fmt::Debug for InternalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InternalClient")
            .field("app_id", &self.app_id)
            .field("__api_configurations", &self.__api_configurations)
            .finish_non_exhaustive()
    }
}

impl InternalClient {
    /// Returns the stable per-install application identifier, allocating a fresh one on the
    /// first ever call. Idempotent: every subsequent call observes the same value.
    pub fn get_app_id(&self) -> Uuid {
        *self.app_id.get_or_init(|| {
            let app_id = Uuid::new_v4();
            debug!(%app_id, "allocated application id");
            app_id
        })
    }

    /// The human-readable device name sent with authentication requests.
    pub fn get_device_name(&self) -> &str {
        &self.device_name
    }

    #[allow(missing_docs)]
    pub fn get_api_configurations(&self) -> Arc<ApiConfigurations> {
        self.__api_configurations
            .read()
            .expect("RwLock is not poisoned")
            .clone()
    }

    /// Commits a fully-assembled session, replacing any previous one.
    ///
    /// The access token is propagated into the API configuration first, then the session value
    /// is swapped in with a single write. Callers must only emit [Message::LoggedIn] after this
    /// returns.
    pub fn set_session(&self, session: Session) {
        self.__api_configurations
            .write()
            .expect("RwLock is not poisoned")
            .set_tokens(session.access_token.clone());

        debug!(user_id = %session.user_id, "committing session");
        *self.session.write().expect("RwLock is not poisoned") = Some(session);
    }

    #[allow(missing_docs)]
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .expect("RwLock is not poisoned")
            .is_some()
    }

    #[allow(missing_docs)]
    pub fn get_user_id(&self) -> Option<UserId> {
        self.session
            .read()
            .expect("RwLock is not poisoned")
            .as_ref()
            .map(|s| s.user_id)
    }

    /// Runs `f` against the current session, if any. Used instead of returning the session
    /// because the contained key material is neither `Clone` nor safe to hand out.
    pub fn with_session<T>(&self, f: impl FnOnce(&Session) -> T) -> Option<T> {
        self.session
            .read()
            .expect("RwLock is not poisoned")
            .as_ref()
            .map(f)
    }

    /// The store holding remembered two-factor tokens, keyed by normalized email.
    pub fn get_two_factor_store(&self) -> &Arc<dyn TwoFactorTokenStore> {
        &self.two_factor_store
    }

    /// Subscribe to client messages. Any number of subscribers is supported.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.messenger.subscribe()
    }

    /// Broadcast a message to all current subscribers without awaiting delivery.
    pub fn send_message(&self, message: Message) {
        self.messenger.send(message);
    }
}
