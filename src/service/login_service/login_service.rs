use crate::{
    auth::ScreenHint,
    dto::{input, output},
    error::Error,
};
use axum::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    ///
    /// Starts login at the identity provider
    ///
    /// ### Returns
    /// [output::LoginRedirect] with provider URL and cookie
    /// that has to be presented back in [LoginService::complete_login]
    ///
    fn begin_login(
        &self,
        screen_hint: ScreenHint,
        return_to: String,
    ) -> Result<output::LoginRedirect, Error>;

    ///
    /// Finishes login after identity provider redirected user back
    ///
    /// ### Returns
    /// [output::LoginCompleted] with session cookie of the user
    ///
    /// ### Errors
    /// - [Error::Upstream] when provider reported an error or refused the code
    /// - [Error::InvalidLoginState] when
    ///     - login state cookie is missing, expired or forged
    ///     - `state` doesn't match the one from the cookie
    ///
    async fn complete_login(
        &self,
        callback: input::LoginCallback,
        login_state_cookie: Option<String>,
    ) -> Result<output::LoginCompleted, Error>;

    ///
    /// Ends session of the user
    ///
    fn logout(&self) -> Result<output::LogoutRedirect, Error>;
}
