use super::LoginService;
use crate::{
    auth::{ScreenHint, SessionCodec, User, LOGIN_STATE_COOKIE, SESSION_COOKIE},
    dto::{input, output},
    error::Error,
    service::identity_service::IdentityService,
};
use axum::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct LoginServiceImpl {
    identity_service: Arc<dyn IdentityService>,
    session_codec: Arc<SessionCodec>,
}

impl LoginServiceImpl {
    pub fn new(identity_service: Arc<dyn IdentityService>, session_codec: Arc<SessionCodec>) -> Self {
        Self {
            identity_service,
            session_codec,
        }
    }

    fn sign_error(err: jsonwebtoken::errors::Error) -> Error {
        Error::UnexpectedError(err.into())
    }

    // Only local paths are accepted as return target.
    fn sanitize_return_to(return_to: String) -> String {
        let local = return_to.starts_with('/')
            && !return_to.starts_with("//")
            && !return_to.starts_with("/\\");

        match local {
            true => return_to,
            false => "/".to_string(),
        }
    }
}

#[async_trait]
impl LoginService for LoginServiceImpl {
    fn begin_login(
        &self,
        screen_hint: ScreenHint,
        return_to: String,
    ) -> Result<output::LoginRedirect, Error> {
        tracing::info!(screen_hint = screen_hint.as_ref(), "starting login");

        let state = Uuid::new_v4().simple().to_string();
        let return_to = Self::sanitize_return_to(return_to);

        let authorization_url = self
            .identity_service
            .authorization_url(&state, screen_hint)?;
        let login_state_cookie = self
            .session_codec
            .login_state_cookie(&state, &return_to)
            .map_err(Self::sign_error)?;

        Ok(output::LoginRedirect {
            authorization_url,
            login_state_cookie,
        })
    }

    async fn complete_login(
        &self,
        callback: input::LoginCallback,
        login_state_cookie: Option<String>,
    ) -> Result<output::LoginCompleted, Error> {
        tracing::info!("completing login");

        if let Some(error) = callback.error {
            let description = callback.error_description.unwrap_or_default();
            return Err(Error::Upstream(format!("{error}: {description}")));
        }

        let login_state_cookie =
            login_state_cookie.ok_or(Error::InvalidLoginState("missing login state cookie"))?;
        let login_state = self
            .session_codec
            .decode_login_state(&login_state_cookie)
            .map_err(|err| {
                tracing::info!(%err, "rejected login state cookie");
                Error::InvalidLoginState("invalid login state cookie")
            })?;

        let state = callback
            .state
            .ok_or(Error::InvalidLoginState("missing state"))?;
        if state != login_state.state {
            return Err(Error::InvalidLoginState("state mismatch"));
        }

        let code = callback
            .code
            .ok_or(Error::InvalidLoginState("missing code"))?;

        let access_token = self.identity_service.exchange_code(&code).await?;
        let profile = self.identity_service.fetch_profile(&access_token).await?;

        let user = User::new(profile.sub, profile.name);
        let session_cookie = self
            .session_codec
            .session_cookie(&user)
            .map_err(Self::sign_error)?;
        tracing::info!(user_id = %user.id, "user logged in");

        Ok(output::LoginCompleted {
            return_to: login_state.return_to,
            session_cookie,
            clear_login_state_cookie: self.session_codec.clear_cookie(LOGIN_STATE_COOKIE),
        })
    }

    fn logout(&self) -> Result<output::LogoutRedirect, Error> {
        tracing::info!("logging out");

        Ok(output::LogoutRedirect {
            logout_url: self.identity_service.logout_url()?,
            clear_session_cookie: self.session_codec.clear_cookie(SESSION_COOKIE),
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::service::identity_service::{MockIdentityService, UserProfile};
    use mockall::predicate::eq;
    use std::time::Duration;

    fn codec() -> Arc<SessionCodec> {
        Arc::new(SessionCodec::new(
            b"0123456789abcdef0123456789abcdef",
            Duration::from_secs(3600),
            false,
        ))
    }

    fn cookie_value(set_cookie: &str) -> String {
        let (pair, _) = set_cookie.split_once(';').unwrap();
        let (_, value) = pair.split_once('=').unwrap();
        value.to_string()
    }

    fn callback(code: Option<&str>, state: Option<&str>) -> input::LoginCallback {
        input::LoginCallback {
            code: code.map(str::to_string),
            state: state.map(str::to_string),
            error: None,
            error_description: None,
        }
    }

    fn identity_service_never_called() -> MockIdentityService {
        let mut identity_service = MockIdentityService::new();
        identity_service.expect_exchange_code().never();
        identity_service.expect_fetch_profile().never();
        identity_service
    }

    #[test]
    fn begin_login_state_in_cookie() {
        let codec = codec();
        let mut identity_service = MockIdentityService::new();
        identity_service
            .expect_authorization_url()
            .returning(|state, screen_hint| {
                Ok(format!(
                    "https://idp/authorize?state={state}&hint={}",
                    screen_hint.as_ref()
                ))
            });
        let service = LoginServiceImpl::new(Arc::new(identity_service), codec.clone());

        let redirect = service
            .begin_login(ScreenHint::SignUp, "/".to_string())
            .unwrap();

        let claims = codec
            .decode_login_state(&cookie_value(&redirect.login_state_cookie))
            .unwrap();
        assert_eq!(
            redirect.authorization_url,
            format!("https://idp/authorize?state={}&hint=signup", claims.state)
        );
        assert_eq!(claims.return_to, "/");
    }

    #[test]
    fn begin_login_external_return_to() {
        let codec = codec();
        let mut identity_service = MockIdentityService::new();
        identity_service
            .expect_authorization_url()
            .returning(|_, _| Ok("https://idp/authorize".to_string()));
        let service = LoginServiceImpl::new(Arc::new(identity_service), codec.clone());

        let redirect = service
            .begin_login(ScreenHint::Login, "//evil.example.com".to_string())
            .unwrap();

        let claims = codec
            .decode_login_state(&cookie_value(&redirect.login_state_cookie))
            .unwrap();
        assert_eq!(claims.return_to, "/");
    }

    #[test]
    fn begin_login_local_return_to_kept() {
        let codec = codec();
        let mut identity_service = MockIdentityService::new();
        identity_service
            .expect_authorization_url()
            .returning(|_, _| Ok("https://idp/authorize".to_string()));
        let service = LoginServiceImpl::new(Arc::new(identity_service), codec.clone());

        let redirect = service
            .begin_login(ScreenHint::Login, "/ticket/1?print=true".to_string())
            .unwrap();

        let claims = codec
            .decode_login_state(&cookie_value(&redirect.login_state_cookie))
            .unwrap();
        assert_eq!(claims.return_to, "/ticket/1?print=true");
    }

    #[test]
    fn begin_login_backslash_return_to() {
        let codec = codec();
        let mut identity_service = MockIdentityService::new();
        identity_service
            .expect_authorization_url()
            .returning(|_, _| Ok("https://idp/authorize".to_string()));
        let service = LoginServiceImpl::new(Arc::new(identity_service), codec.clone());

        let redirect = service
            .begin_login(ScreenHint::Login, "/\\evil.example.com".to_string())
            .unwrap();

        let claims = codec
            .decode_login_state(&cookie_value(&redirect.login_state_cookie))
            .unwrap();
        assert_eq!(claims.return_to, "/");
    }

    #[tokio::test]
    async fn complete_login_issues_session() {
        let codec = codec();
        let login_state_cookie = codec.login_state_cookie("state-1", "/").unwrap();
        let mut identity_service = MockIdentityService::new();
        identity_service
            .expect_exchange_code()
            .with(eq("code-1"))
            .times(1)
            .returning(|_| Ok("access-token".to_string()));
        identity_service
            .expect_fetch_profile()
            .with(eq("access-token"))
            .times(1)
            .returning(|_| {
                Ok(UserProfile {
                    sub: "auth0|42".to_string(),
                    name: Some("Ana Anić".to_string()),
                })
            });
        let service = LoginServiceImpl::new(Arc::new(identity_service), codec.clone());

        let completed = service
            .complete_login(
                callback(Some("code-1"), Some("state-1")),
                Some(cookie_value(&login_state_cookie)),
            )
            .await
            .unwrap();

        let user = codec
            .decode_session(&cookie_value(&completed.session_cookie))
            .unwrap();
        assert_eq!(user.id, "auth0|42");
        assert_eq!(user.name.as_deref(), Some("Ana Anić"));
        assert_eq!(completed.return_to, "/");
        assert!(completed
            .clear_login_state_cookie
            .starts_with("ticket_issuer_login_state=;"));
    }

    #[tokio::test]
    async fn complete_login_state_mismatch() {
        let codec = codec();
        let login_state_cookie = codec.login_state_cookie("state-1", "/").unwrap();
        let service = LoginServiceImpl::new(Arc::new(identity_service_never_called()), codec);

        let result = service
            .complete_login(
                callback(Some("code-1"), Some("state-2")),
                Some(cookie_value(&login_state_cookie)),
            )
            .await;

        assert!(matches!(result, Err(Error::InvalidLoginState(_))));
    }

    #[tokio::test]
    async fn complete_login_missing_cookie() {
        let service = LoginServiceImpl::new(Arc::new(identity_service_never_called()), codec());

        let result = service
            .complete_login(callback(Some("code-1"), Some("state-1")), None)
            .await;

        assert!(matches!(result, Err(Error::InvalidLoginState(_))));
    }

    #[tokio::test]
    async fn complete_login_forged_cookie() {
        let service = LoginServiceImpl::new(Arc::new(identity_service_never_called()), codec());

        let result = service
            .complete_login(
                callback(Some("code-1"), Some("state-1")),
                Some("not.a.token".to_string()),
            )
            .await;

        assert!(matches!(result, Err(Error::InvalidLoginState(_))));
    }

    #[tokio::test]
    async fn complete_login_session_cookie_is_not_login_state() {
        let codec = codec();
        let session_cookie = codec
            .session_cookie(&User::new("auth0|42".to_string(), None))
            .unwrap();
        let service = LoginServiceImpl::new(Arc::new(identity_service_never_called()), codec);

        let result = service
            .complete_login(
                callback(Some("code-1"), Some("state-1")),
                Some(cookie_value(&session_cookie)),
            )
            .await;

        assert!(matches!(result, Err(Error::InvalidLoginState(_))));
    }

    #[tokio::test]
    async fn complete_login_provider_error() {
        let service = LoginServiceImpl::new(Arc::new(identity_service_never_called()), codec());
        let callback = input::LoginCallback {
            code: None,
            state: Some("state-1".to_string()),
            error: Some("access_denied".to_string()),
            error_description: Some("user cancelled".to_string()),
        };

        let result = service.complete_login(callback, None).await;

        assert!(matches!(result, Err(Error::Upstream(_))));
    }

    #[tokio::test]
    async fn complete_login_exchange_failed() {
        let codec = codec();
        let login_state_cookie = codec.login_state_cookie("state-1", "/").unwrap();
        let mut identity_service = MockIdentityService::new();
        identity_service
            .expect_exchange_code()
            .returning(|_| Err(Error::Upstream("invalid_grant".to_string())));
        identity_service.expect_fetch_profile().never();
        let service = LoginServiceImpl::new(Arc::new(identity_service), codec);

        let result = service
            .complete_login(
                callback(Some("code-1"), Some("state-1")),
                Some(cookie_value(&login_state_cookie)),
            )
            .await;

        assert!(matches!(result, Err(Error::Upstream(_))));
    }

    #[test]
    fn logout_clears_session() {
        let mut identity_service = MockIdentityService::new();
        identity_service
            .expect_logout_url()
            .returning(|| Ok("https://idp/v2/logout".to_string()));
        let service = LoginServiceImpl::new(Arc::new(identity_service), codec());

        let redirect = service.logout().unwrap();

        assert_eq!(redirect.logout_url, "https://idp/v2/logout");
        assert!(redirect
            .clear_session_cookie
            .starts_with("ticket_issuer_session=;"));
    }
}
