use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw payload of a two-factor challenge. The server reports the providers the account can
/// complete the challenge with; no tokens are issued.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub(crate) struct IdentityTwoFactorResponse {
    /// Available provider identifiers, as decimal strings. Required: its presence is what
    /// distinguishes a challenge from an ordinary error body.
    #[serde(rename = "TwoFactorProviders", alias = "twoFactorProviders")]
    pub two_factor_providers: Vec<String>,

    /// Stores unknown api response fields
    #[serde(flatten)]
    extra: HashMap<String, Value>,
}
