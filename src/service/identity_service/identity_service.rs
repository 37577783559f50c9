use super::UserProfile;
use crate::{auth::ScreenHint, error::Error};
use axum::async_trait;

///
/// OpenID Connect authorization code flow against the identity provider
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityService: Send + Sync {
    ///
    /// Builds URL of the provider's login page
    ///
    fn authorization_url(&self, state: &str, screen_hint: ScreenHint) -> Result<String, Error>;

    ///
    /// Exchanges authorization code from the callback for an access token
    ///
    /// ### Errors
    /// - [Error::Upstream] when provider rejects the code or can't be reached
    ///
    async fn exchange_code(&self, code: &str) -> Result<String, Error>;

    ///
    /// Fetches profile of the user the access token was issued for
    ///
    /// ### Errors
    /// - [Error::Upstream] when provider rejects the token or can't be reached
    ///
    async fn fetch_profile(&self, access_token: &str) -> Result<UserProfile, Error>;

    ///
    /// Builds URL that ends session at the provider
    ///
    fn logout_url(&self) -> Result<String, Error>;
}
