use super::{dto::TokenResponse, IdentityService, IdentityServiceConfig, UserProfile};
use crate::{auth::ScreenHint, error::Error};
use axum::async_trait;

const SCOPE: &str = "openid profile email";

pub struct IdentityServiceImpl {
    config: IdentityServiceConfig,
    http_client: reqwest::Client,
}

impl IdentityServiceImpl {
    pub fn new(config: IdentityServiceConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("https://{}{path}", self.config.domain)
    }

    fn encode_query(params: &[(&str, &str)]) -> Result<String, Error> {
        serde_urlencoded::to_string(params).map_err(|err| Error::UnexpectedError(err.into()))
    }
}

#[async_trait]
impl IdentityService for IdentityServiceImpl {
    fn authorization_url(&self, state: &str, screen_hint: ScreenHint) -> Result<String, Error> {
        let mut params = vec![
            ("response_type", "code"),
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("scope", SCOPE),
            ("state", state),
        ];
        if screen_hint == ScreenHint::SignUp {
            params.push(("screen_hint", screen_hint.as_ref()));
        }

        let query = Self::encode_query(&params)?;

        Ok(format!("{}?{query}", self.endpoint("/authorize")))
    }

    async fn exchange_code(&self, code: &str) -> Result<String, Error> {
        tracing::info!("exchanging authorization code");

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];

        let response = self
            .http_client
            .post(self.endpoint("/oauth/token"))
            .form(&params)
            .send()
            .await
            .map_err(|err| Error::Upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Upstream(format!(
                "token exchange failed with {status}: {body}"
            )));
        }

        let token_response = response
            .json::<TokenResponse>()
            .await
            .map_err(|err| Error::Upstream(err.to_string()))?;

        Ok(token_response.access_token)
    }

    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, Error> {
        tracing::info!("fetching user profile");

        let response = self
            .http_client
            .get(self.endpoint("/userinfo"))
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|err| Error::Upstream(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream(format!(
                "userinfo request failed with {status}"
            )));
        }

        let profile = response
            .json::<UserProfile>()
            .await
            .map_err(|err| Error::Upstream(err.to_string()))?;
        tracing::info!(sub = %profile.sub, "fetched user profile");

        Ok(profile)
    }

    fn logout_url(&self) -> Result<String, Error> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("returnTo", self.config.logout_return_to.as_str()),
        ];
        let query = Self::encode_query(&params)?;

        Ok(format!("{}?{query}", self.endpoint("/v2/logout")))
    }
}
