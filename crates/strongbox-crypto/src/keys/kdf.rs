use std::num::NonZeroU32;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Key Derivation Function for a Strongbox account
///
/// Accounts can use multiple KDFs to derive their master key from their password. This
/// enum represents all the possible KDFs.
#[derive(Serialize, Deserialize, Debug, JsonSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub enum Kdf {
    #[allow(missing_docs)]
    PBKDF2 {
        #[allow(missing_docs)]
        iterations: NonZeroU32,
    },
    #[allow(missing_docs)]
    Argon2id {
        #[allow(missing_docs)]
        iterations: NonZeroU32,
        #[allow(missing_docs)]
        memory: NonZeroU32,
        #[allow(missing_docs)]
        parallelism: NonZeroU32,
    },
}

impl Default for Kdf {
    /// Default KDF for new accounts.
    fn default() -> Self {
        Kdf::PBKDF2 {
            iterations: default_pbkdf2_iterations(),
        }
    }
}

/// Default PBKDF2 iterations
pub fn default_pbkdf2_iterations() -> NonZeroU32 {
    NonZeroU32::new(600_000).expect("Non-zero number")
}
/// Default Argon2 iterations
pub fn default_argon2_iterations() -> NonZeroU32 {
    NonZeroU32::new(3).expect("Non-zero number")
}
/// Default Argon2 memory
pub fn default_argon2_memory() -> NonZeroU32 {
    NonZeroU32::new(64).expect("Non-zero number")
}
/// Default Argon2 parallelism
pub fn default_argon2_parallelism() -> NonZeroU32 {
    NonZeroU32::new(4).expect("Non-zero number")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kdf_serializes_camel_case() {
        let kdf = Kdf::PBKDF2 {
            iterations: default_pbkdf2_iterations(),
        };

        assert_eq!(
            serde_json::to_value(&kdf).expect("serializes"),
            serde_json::json!({"pBKDF2": {"iterations": 600_000}})
        );
    }

    #[test]
    fn test_kdf_round_trips() {
        let kdf = Kdf::Argon2id {
            iterations: default_argon2_iterations(),
            memory: default_argon2_memory(),
            parallelism: default_argon2_parallelism(),
        };

        let json = serde_json::to_string(&kdf).expect("serializes");
        let parsed: Kdf = serde_json::from_str(&json).expect("deserializes");

        assert_eq!(parsed, kdf);
    }
}
