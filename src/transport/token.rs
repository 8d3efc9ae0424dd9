use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TransportError;
use crate::domain::{AccessToken, Credentials};

pub const GRANT_TYPE: &str = "client_credentials";
pub const INVALID_CLIENT: &str = "invalid_client";

#[derive(Debug, Serialize)]
struct TokenJsonRequest<'a> {
    grant_type: &'static str,
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenJsonResponse {
    #[serde(default)]
    access_token: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ErrorJsonResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Error details from a rejected request, when the body carries any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

pub fn encode_token_request(credentials: &Credentials) -> Result<Value, TransportError> {
    let request = TokenJsonRequest {
        grant_type: GRANT_TYPE,
        client_id: credentials.client_id().as_str(),
        client_secret: credentials.client_secret().as_str(),
    };
    Ok(serde_json::to_value(request)?)
}

pub fn decode_token_response(json: &str) -> Result<AccessToken, TransportError> {
    let parsed: TokenJsonResponse = serde_json::from_str(json)?;
    let token = parsed
        .access_token
        .filter(|token| !token.is_empty())
        .ok_or(TransportError::MissingField {
            field: AccessToken::FIELD,
        })?;
    Ok(AccessToken::new(token)?)
}

/// Best-effort parse of an error body. Non-JSON bodies yield `None`.
pub fn decode_error_body(body: &str) -> Option<ApiErrorBody> {
    let parsed: ErrorJsonResponse = serde_json::from_str(body).ok()?;
    Some(ApiErrorBody {
        error: parsed.error,
        message: parsed.message.or(parsed.error_description),
    })
}

/// Whether a 401 body says the client id/secret pair itself was rejected.
pub fn is_invalid_client(body: &str) -> bool {
    let by_field = decode_error_body(body)
        .and_then(|parsed| parsed.error)
        .is_some_and(|error| error == INVALID_CLIENT);
    by_field || body.contains(INVALID_CLIENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_request_uses_client_credentials_grant() {
        let credentials = Credentials::new("id-1", "secret-1").unwrap();
        let value = encode_token_request(&credentials).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "grant_type": "client_credentials",
                "client_id": "id-1",
                "client_secret": "secret-1",
            })
        );
    }

    #[test]
    fn token_response_yields_access_token() {
        let json = r#"{"access_token": "abc", "token_type": "Bearer", "expires_in": 3600}"#;
        assert_eq!(decode_token_response(json).unwrap().as_str(), "abc");
    }

    #[test]
    fn token_response_without_token_is_rejected() {
        assert!(matches!(
            decode_token_response(r#"{"access_token": ""}"#),
            Err(TransportError::MissingField { .. })
        ));
        assert!(matches!(
            decode_token_response(r#"{"error": "invalid_grant"}"#),
            Err(TransportError::MissingField { .. })
        ));
        assert!(matches!(
            decode_token_response("<html>"),
            Err(TransportError::Json(_))
        ));
    }

    #[test]
    fn invalid_client_is_detected_in_json_and_plain_bodies() {
        assert!(is_invalid_client(
            r#"{"error": "invalid_client", "error_description": "Client authentication failed"}"#
        ));
        assert!(is_invalid_client("error=invalid_client"));
        assert!(!is_invalid_client(
            r#"{"error": "invalid_token", "message": "expired"}"#
        ));
        assert!(!is_invalid_client(""));
    }

    #[test]
    fn error_body_prefers_message_over_description() {
        let parsed = decode_error_body(
            r#"{"error": "invalid_client", "error_description": "d", "message": "m"}"#,
        )
        .unwrap();
        assert_eq!(parsed.error.as_deref(), Some("invalid_client"));
        assert_eq!(parsed.message.as_deref(), Some("m"));
        assert!(decode_error_body("not json").is_none());
    }
}
