use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the various targets and behavior of the
/// Strongbox client. They are optional and uneditable once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use strongbox_core::{ClientSettings, DeviceType};
/// let settings = ClientSettings {
///     identity_url: "https://identity.strongbox.app".to_string(),
///     user_agent: "Strongbox Rust-SDK".to_string(),
///     device_type: DeviceType::SDK,
///     device_name: "sdk".to_string(),
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, JsonSchema)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The identity url of the targeted Strongbox instance. Defaults to `https://identity.strongbox.app`
    pub identity_url: String,
    /// The user_agent to sent to Strongbox. Defaults to `Strongbox Rust-SDK`
    pub user_agent: String,
    /// Device type to send to Strongbox. Defaults to SDK
    pub device_type: DeviceType,
    /// Human-readable device name sent with authentication requests. Defaults to `sdk`
    pub device_name: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            identity_url: "https://identity.strongbox.app".into(),
            user_agent: "Strongbox Rust-SDK".into(),
            device_type: DeviceType::SDK,
            device_name: "sdk".into(),
        }
    }
}

/// The type of device making a request. The discriminants are part of the wire protocol and
/// must not be renumbered.
#[expect(non_camel_case_types, missing_docs)]
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub enum DeviceType {
    Android = 0,
    iOS = 1,
    ChromeExtension = 2,
    FirefoxExtension = 3,
    OperaExtension = 4,
    EdgeExtension = 5,
    WindowsDesktop = 6,
    MacOsDesktop = 7,
    LinuxDesktop = 8,
    ChromeBrowser = 9,
    FirefoxBrowser = 10,
    SafariBrowser = 17,
    SDK = 21,
    WindowsCLI = 23,
    MacOsCLI = 24,
    LinuxCLI = 25,
}
