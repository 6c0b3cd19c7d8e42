use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::Deserialize;
use thiserror::Error;

/// Errors from parsing an access token.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum InvalidJwtTokenError {
    #[error("JWT token is malformed")]
    Malformed,
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// The identity claims of an access token issued by the identity server.
///
/// The signature is deliberately not validated here: the server is the authority on token
/// validity, the client only reads its own identity back out of the payload.
#[derive(Debug, Deserialize)]
pub struct JwtToken {
    /// The subject claim, the authenticated user's id.
    pub sub: String,
    /// The authenticated user's email address.
    pub email: Option<String>,
    /// The authenticated user's display name.
    pub name: Option<String>,
}

impl std::str::FromStr for JwtToken {
    type Err = InvalidJwtTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split: Vec<&str> = s.split('.').collect();
        if split.len() != 3 {
            return Err(InvalidJwtTokenError::Malformed);
        }
        let decoded = URL_SAFE_NO_PAD.decode(split[1])?;
        Ok(serde_json::from_slice(&decoded)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_token(payload: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn test_parse_claims() {
        let token = encode_token(&serde_json::json!({
            "sub": "ec8c58a4-7400-4243-b5a8-1d96c0de5ae6",
            "email": "user@example.com",
            "name": "User",
        }));

        let parsed: JwtToken = token.parse().expect("valid token");

        assert_eq!(parsed.sub, "ec8c58a4-7400-4243-b5a8-1d96c0de5ae6");
        assert_eq!(parsed.email.as_deref(), Some("user@example.com"));
        assert_eq!(parsed.name.as_deref(), Some("User"));
    }

    #[test]
    fn test_reject_wrong_segment_count() {
        let result: Result<JwtToken, _> = "header.payload".parse();

        assert!(matches!(result, Err(InvalidJwtTokenError::Malformed)));
    }

    #[test]
    fn test_reject_invalid_base64_payload() {
        let result: Result<JwtToken, _> = "header.!!!.signature".parse();

        assert!(matches!(result, Err(InvalidJwtTokenError::Base64(_))));
    }
}
