//! Credential Provider backed by the token endpoint.

use async_trait::async_trait;

use super::client::ApiClient;
use crate::call::{CredentialError, CredentialProvider};
use crate::models::{Credentials, CredentialsResponse};

pub const TOKEN_PATH: &str = "/api/app/get-testing-token";

pub struct HttpCredentialProvider {
    client: ApiClient,
}

impl HttpCredentialProvider {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait(?Send)]
impl CredentialProvider for HttpCredentialProvider {
    async fn fetch(&self) -> Result<Credentials, CredentialError> {
        tracing::debug!("Requesting call token from {}{}", self.client.base_url(), TOKEN_PATH);
        let response: CredentialsResponse = self.client.post_empty(TOKEN_PATH).await?;
        Ok(response.into_credentials()?)
    }
}
