use crate::error::Error;
use axum::async_trait;

///
/// Machine-to-machine token for identity provider's management API
///
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ManagementTokenService: Send + Sync {
    ///
    /// Requests new token with client credentials grant
    ///
    /// ### Errors
    /// - [Error::Upstream] when provider refuses client credentials or can't be reached
    ///
    async fn access_token(&self) -> Result<String, Error>;
}
