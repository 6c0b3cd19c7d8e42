use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{enums::TwoFactorProvider, response::IdentityTwoFactorResponse};

/// The two-factor providers an account can complete a pending challenge with, surfaced to the
/// caller so it can prompt the user and re-submit the login with an explicit provider/token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TwoFactorProviders {
    /// The providers available for this account, in the order the server reported them.
    pub available: Vec<TwoFactorProvider>,
}

impl From<IdentityTwoFactorResponse> for TwoFactorProviders {
    fn from(response: IdentityTwoFactorResponse) -> Self {
        let available = response
            .two_factor_providers
            .iter()
            .filter_map(|raw| {
                let parsed = raw
                    .parse::<u8>()
                    .ok()
                    .and_then(|id| TwoFactorProvider::try_from(id).ok());
                if parsed.is_none() {
                    // Skipped for forward compatibility with providers this SDK predates.
                    warn!(provider = %raw, "ignoring unknown two-factor provider");
                }
                parsed
            })
            .collect();

        Self { available }
    }
}
