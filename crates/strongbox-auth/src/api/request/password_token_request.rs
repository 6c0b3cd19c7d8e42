use serde::{Deserialize, Serialize};
use strongbox_core::{ApiConfigurations, DeviceType};
use uuid::Uuid;

use crate::{
    api::{
        enums::{GrantType, Scope, TwoFactorProvider},
        response::IdentityTokenResponse,
    },
    login::{LoginError, TwoFactorInput},
};

/// The payload sent to the `connect/token` endpoint for a password login.
///
/// At most one two-factor (provider, token, remember) triple is populated, decided by the
/// [TwoFactorInput] the orchestrator resolved. The `password` field carries the master
/// password hash, never the raw password.
#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct PasswordTokenRequest {
    // Standard OAuth2 fields.
    // Note: snake_case is intentional to match the API expectations.
    scope: Scope,
    client_id: String,
    grant_type: GrantType,
    username: String,
    password: String,

    /// The device type making the request.
    #[serde(rename = "deviceType")]
    device_type: DeviceType,

    /// The stable per-install identifier of the device.
    #[serde(rename = "deviceIdentifier")]
    device_identifier: String,

    /// The name of the device.
    #[serde(rename = "deviceName")]
    device_name: String,

    /// The two-factor authentication token.
    #[serde(rename = "twoFactorToken", skip_serializing_if = "Option::is_none")]
    two_factor_token: Option<String>,

    /// The two-factor authentication provider.
    #[serde(rename = "twoFactorProvider", skip_serializing_if = "Option::is_none")]
    two_factor_provider: Option<TwoFactorProvider>,

    /// Whether to remember two-factor authentication on this device.
    #[serde(rename = "twoFactorRemember", skip_serializing_if = "Option::is_none")]
    two_factor_remember: Option<bool>,
}

impl PasswordTokenRequest {
    pub(crate) fn new(
        email: &str,
        master_password_hash: &str,
        two_factor: &TwoFactorInput,
        app_id: Uuid,
        device_type: DeviceType,
        device_name: &str,
    ) -> Self {
        let (provider, token, remember) = match two_factor {
            TwoFactorInput::Explicit {
                provider,
                token,
                remember,
            } => (Some(*provider), Some(token.clone()), Some(*remember)),
            // A remembered token never re-requests remembering.
            TwoFactorInput::Remembered { token } => (
                Some(TwoFactorProvider::Remember),
                Some(token.clone()),
                Some(false),
            ),
            TwoFactorInput::None => (None, None, None),
        };

        Self {
            scope: Scope::ApiOfflineAccess,
            client_id: client_id(device_type).to_owned(),
            grant_type: GrantType::Password,
            username: email.to_owned(),
            password: master_password_hash.to_owned(),
            device_type,
            device_identifier: app_id.to_string(),
            device_name: device_name.to_owned(),
            two_factor_token: token,
            two_factor_provider: provider,
            two_factor_remember: remember,
        }
    }

    pub(crate) async fn send(
        &self,
        configurations: &ApiConfigurations,
    ) -> Result<Option<IdentityTokenResponse>, LoginError> {
        super::send_identity_connect_request(configurations, &self).await
    }
}

/// The OAuth client identifier registered for each family of devices.
fn client_id(device_type: DeviceType) -> &'static str {
    match device_type {
        DeviceType::Android | DeviceType::iOS => "mobile",

        DeviceType::ChromeBrowser | DeviceType::FirefoxBrowser | DeviceType::SafariBrowser => {
            "web"
        }

        DeviceType::ChromeExtension
        | DeviceType::FirefoxExtension
        | DeviceType::OperaExtension
        | DeviceType::EdgeExtension => "browser",

        DeviceType::WindowsDesktop | DeviceType::MacOsDesktop | DeviceType::LinuxDesktop => {
            "desktop"
        }

        DeviceType::WindowsCLI | DeviceType::MacOsCLI | DeviceType::LinuxCLI => "cli",

        DeviceType::SDK => "sdk",
    }
}
