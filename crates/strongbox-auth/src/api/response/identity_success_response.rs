use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw payload of a successful token exchange.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub(crate) struct IdentityTokenSuccessResponse {
    pub access_token: String,
    pub expires_in: u64,
    pub refresh_token: Option<String>,
    token_type: String,

    /// The user's encrypted private key.
    #[serde(rename = "privateKey", alias = "PrivateKey")]
    pub(crate) private_key: Option<String>,
    /// The user's encrypted symmetric key.
    #[serde(alias = "Key")]
    pub(crate) key: Option<String>,
    /// Freshly-issued remembered-device token; present when the completed two-factor
    /// challenge asked for this device to be remembered.
    #[serde(rename = "twoFactorToken", alias = "TwoFactorToken")]
    pub(crate) two_factor_token: Option<String>,

    /// Stores unknown api response fields
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
