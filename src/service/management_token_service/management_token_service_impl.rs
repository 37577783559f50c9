use super::{dto::ClientCredentialsResponse, ManagementTokenService, ManagementTokenServiceConfig};
use crate::error::Error;
use axum::async_trait;

pub struct ManagementTokenServiceImpl {
    config: ManagementTokenServiceConfig,
    http_client: reqwest::Client,
}

impl ManagementTokenServiceImpl {
    pub fn new(config: ManagementTokenServiceConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn client_credentials_form(&self) -> Vec<(&'static str, String)> {
        vec![
            ("grant_type", "client_credentials".to_string()),
            ("client_id", self.config.client_id.clone()),
            ("client_secret", self.config.client_secret.clone()),
            ("audience", format!("https://{}/api/v2/", self.config.domain)),
        ]
    }
}

#[async_trait]
impl ManagementTokenService for ManagementTokenServiceImpl {
    async fn access_token(&self) -> Result<String, Error> {
        tracing::info!("requesting management API token");

        let response = self
            .http_client
            .post(format!("https://{}/oauth/token", self.config.domain))
            .form(&self.client_credentials_form())
            .send()
            .await
            .map_err(|err| Error::Upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "client credentials request failed with {status}"
            )));
        }

        let response = response
            .json::<ClientCredentialsResponse>()
            .await
            .map_err(|err| Error::Upstream(err.to_string()))?;
        tracing::info!(expires_in = response.expires_in, "received management API token");

        Ok(response.access_token)
    }
}
