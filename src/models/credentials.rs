use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Room credentials returned by the token endpoint.
///
/// Both fields are guaranteed non-empty once constructed through
/// [`Credentials::new`] or [`CredentialsResponse::into_credentials`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    server_url: String,
    token: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialsIncomplete {
    #[error("serverUrl is missing or empty")]
    MissingServerUrl,
    #[error("token is missing or empty")]
    MissingToken,
}

impl Credentials {
    pub fn new(server_url: impl Into<String>, token: impl Into<String>) -> Result<Self, CredentialsIncomplete> {
        let server_url = server_url.into();
        let token = token.into();

        if server_url.trim().is_empty() {
            return Err(CredentialsIncomplete::MissingServerUrl);
        }
        if token.trim().is_empty() {
            return Err(CredentialsIncomplete::MissingToken);
        }

        Ok(Self { server_url, token })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Raw body of `POST /api/app/get-testing-token`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CredentialsResponse {
    #[serde(rename = "serverUrl", default)]
    pub server_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl CredentialsResponse {
    pub fn into_credentials(self) -> Result<Credentials, CredentialsIncomplete> {
        Credentials::new(
            self.server_url.unwrap_or_default(),
            self.token.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        assert!(Credentials::new("wss://x", "t").is_ok());
        assert_eq!(Credentials::new("", "t"), Err(CredentialsIncomplete::MissingServerUrl));
        assert_eq!(Credentials::new("wss://x", "  "), Err(CredentialsIncomplete::MissingToken));
    }

    #[test]
    fn test_response_with_missing_token_is_incomplete() {
        let response: CredentialsResponse =
            serde_json::from_str(r#"{"serverUrl":"wss://room.example"}"#).unwrap();
        assert_eq!(response.into_credentials(), Err(CredentialsIncomplete::MissingToken));
    }

    #[test]
    fn test_response_parses_camel_case_fields() {
        let response: CredentialsResponse =
            serde_json::from_str(r#"{"serverUrl":"wss://room.example","token":"abc"}"#).unwrap();
        let credentials = response.into_credentials().unwrap();
        assert_eq!(credentials.server_url(), "wss://room.example");
        assert_eq!(credentials.token(), "abc");
    }
}
