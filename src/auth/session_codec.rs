use super::dto::{LoginStateClaims, SessionClaims, User};
use axum::http::{header::COOKIE, HeaderMap};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use time::OffsetDateTime;

pub const SESSION_COOKIE: &str = "ticket_issuer_session";
pub const LOGIN_STATE_COOKIE: &str = "ticket_issuer_login_state";

const SESSION_AUDIENCE: &str = "ticket-issuer-session";
const LOGIN_STATE_AUDIENCE: &str = "ticket-issuer-login-state";
const LOGIN_STATE_LIFESPAN: Duration = Duration::from_secs(300);

///
/// Signs and verifies cookies issued by the application.
///
/// Both session and login state are HS256 JWTs signed with the session secret.
/// They use different audiences so one can't be used in place of the other.
///
pub struct SessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    session_validation: Validation,
    login_state_validation: Validation,
    session_lifespan: Duration,
    secure_cookies: bool,
}

impl SessionCodec {
    pub fn new(secret: &[u8], session_lifespan: Duration, secure_cookies: bool) -> Self {
        let mut session_validation = Validation::new(Algorithm::HS256);
        session_validation.set_audience(&[SESSION_AUDIENCE]);

        let mut login_state_validation = Validation::new(Algorithm::HS256);
        login_state_validation.set_audience(&[LOGIN_STATE_AUDIENCE]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            session_validation,
            login_state_validation,
            session_lifespan,
            secure_cookies,
        }
    }

    ///
    /// Creates `Set-Cookie` value with signed session of the user
    ///
    pub fn session_cookie(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: user.id.clone(),
            name: user.name.clone(),
            aud: SESSION_AUDIENCE.to_string(),
            exp: Self::expire_at(self.session_lifespan),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(self.cookie(SESSION_COOKIE, &token, self.session_lifespan))
    }

    pub fn decode_session(&self, token: &str) -> Result<User, jsonwebtoken::errors::Error> {
        let token_data = jsonwebtoken::decode::<SessionClaims>(
            token,
            &self.decoding_key,
            &self.session_validation,
        )?;

        Ok(User::new(token_data.claims.sub, token_data.claims.name))
    }

    ///
    /// Creates `Set-Cookie` value that remembers OAuth `state`
    /// and where to go after login completes
    ///
    pub fn login_state_cookie(
        &self,
        state: &str,
        return_to: &str,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = LoginStateClaims {
            state: state.to_string(),
            return_to: return_to.to_string(),
            aud: LOGIN_STATE_AUDIENCE.to_string(),
            exp: Self::expire_at(LOGIN_STATE_LIFESPAN),
        };
        let token = jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(self.cookie(LOGIN_STATE_COOKIE, &token, LOGIN_STATE_LIFESPAN))
    }

    pub fn decode_login_state(
        &self,
        token: &str,
    ) -> Result<LoginStateClaims, jsonwebtoken::errors::Error> {
        let token_data = jsonwebtoken::decode::<LoginStateClaims>(
            token,
            &self.decoding_key,
            &self.login_state_validation,
        )?;

        Ok(token_data.claims)
    }

    ///
    /// Creates `Set-Cookie` value that removes cookie from the browser
    ///
    pub fn clear_cookie(&self, name: &str) -> String {
        self.cookie(name, "", Duration::ZERO)
    }

    fn cookie(&self, name: &str, value: &str, max_age: Duration) -> String {
        let mut cookie = format!(
            "{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            max_age.as_secs()
        );
        if self.secure_cookies {
            cookie.push_str("; Secure");
        }

        cookie
    }

    fn expire_at(lifespan: Duration) -> i64 {
        let lifespan = i64::try_from(lifespan.as_secs()).unwrap_or(i64::MAX);
        OffsetDateTime::now_utc()
            .unix_timestamp()
            .saturating_add(lifespan)
    }
}

///
/// Finds value of the cookie in `Cookie` headers
///
pub fn find_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(cookie_name, _)| *cookie_name == name)
        .map(|(_, value)| value)
}
