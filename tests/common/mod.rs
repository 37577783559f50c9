#![allow(dead_code)]

use axum::{
    async_trait,
    body::{to_bytes, Body},
    http::{header::SET_COOKIE, Request, Response},
    Router,
};
use std::{sync::Arc, time::Duration};
use ticket_issuer::{
    application::{create_application, create_middleware, ApplicationEnv, ApplicationState},
    auth::{ScreenHint, SessionCodec, User},
    error::Error,
    repository::{self, InsertedTicket, TicketsRepository},
    service::{
        identity_service::{IdentityService, UserProfile},
        login_service::LoginServiceImpl,
        qr_code_service::QrCodeServiceImpl,
        tickets_service::{TicketsServiceConfig, TicketsServiceImpl},
    },
};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

pub const PUBLIC_BASE_URL: &str = "https://tickets.example.com";
pub const MAX_TICKETS_PER_VATIN: i64 = 3;
pub const MAX_HTTP_CONTENT_LEN: usize = 1024;
pub const SESSION_SECRET: &str = "integration tests session secret";

///
/// Tickets kept in memory, quota is checked under the same lock as insert
///
#[derive(Default)]
pub struct InMemoryTicketsRepository {
    tickets: Mutex<Vec<repository::Ticket>>,
}

#[async_trait]
impl TicketsRepository for InMemoryTicketsRepository {
    async fn count_by_vatin(&self, vatin: &str) -> Result<i64, repository::Error> {
        let tickets = self.tickets.lock().await;
        let count = tickets.iter().filter(|ticket| ticket.vatin == vatin).count();

        Ok(count as i64)
    }

    async fn count_all(&self) -> Result<i64, repository::Error> {
        Ok(self.tickets.lock().await.len() as i64)
    }

    async fn insert(
        &self,
        id: Uuid,
        vatin: &str,
        first_name: &str,
        last_name: &str,
        max_per_vatin: i64,
    ) -> Result<InsertedTicket, repository::Error> {
        let mut tickets = self.tickets.lock().await;

        let count = tickets.iter().filter(|ticket| ticket.vatin == vatin).count();
        if count as i64 >= max_per_vatin {
            return Err(repository::Error::QuotaExceeded);
        }
        if tickets.iter().any(|ticket| ticket.id == id) {
            return Err(repository::Error::InsertUniqueViolation);
        }

        let created_at = OffsetDateTime::now_utc();
        tickets.push(repository::Ticket {
            id,
            vatin: vatin.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            created_at,
        });

        Ok(InsertedTicket { id, created_at })
    }

    async fn find(&self, id: Uuid) -> Result<Option<repository::Ticket>, repository::Error> {
        let tickets = self.tickets.lock().await;
        let ticket = tickets
            .iter()
            .find(|ticket| ticket.id == id)
            .map(|ticket| repository::Ticket {
                id: ticket.id,
                vatin: ticket.vatin.clone(),
                first_name: ticket.first_name.clone(),
                last_name: ticket.last_name.clone(),
                created_at: ticket.created_at,
            });

        Ok(ticket)
    }
}

///
/// Identity provider that accepts only `valid-code`
///
pub struct FakeIdentityService;

#[async_trait]
impl IdentityService for FakeIdentityService {
    fn authorization_url(&self, state: &str, screen_hint: ScreenHint) -> Result<String, Error> {
        Ok(format!(
            "https://idp.example.com/authorize?state={state}&screen_hint={}",
            screen_hint.as_ref()
        ))
    }

    async fn exchange_code(&self, code: &str) -> Result<String, Error> {
        match code {
            "valid-code" => Ok("access-token".to_string()),
            _ => Err(Error::Upstream("invalid_grant".to_string())),
        }
    }

    async fn fetch_profile(&self, _access_token: &str) -> Result<UserProfile, Error> {
        Ok(UserProfile {
            sub: "auth0|integration".to_string(),
            name: Some("Ana Anić".to_string()),
        })
    }

    fn logout_url(&self) -> Result<String, Error> {
        Ok("https://idp.example.com/v2/logout".to_string())
    }
}

pub struct TestApplication {
    pub router: Router,
    pub session_codec: Arc<SessionCodec>,
}

impl TestApplication {
    pub fn new() -> Self {
        let env = test_env();
        let session_codec = Arc::new(SessionCodec::new(
            env.session_secret.as_bytes(),
            env.session_lifespan,
            false,
        ));

        let tickets_repository = Arc::new(InMemoryTicketsRepository::default());
        let config = TicketsServiceConfig {
            public_base_url: env.public_base_url.clone(),
            max_tickets_per_vatin: env.max_tickets_per_vatin,
        };
        let tickets_service = Arc::new(TicketsServiceImpl::new(
            config,
            tickets_repository,
            Arc::new(QrCodeServiceImpl::new()),
        ));
        let login_service = Arc::new(LoginServiceImpl::new(
            Arc::new(FakeIdentityService),
            session_codec.clone(),
        ));

        let state = ApplicationState {
            tickets_service,
            login_service,
        };
        let middleware = create_middleware(&env, session_codec.clone());

        Self {
            router: create_application(state, middleware),
            session_codec,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    ///
    /// `Cookie` header value with session of logged-in user
    ///
    pub fn session_cookie(&self) -> String {
        let user = User::new("auth0|integration".to_string(), Some("Ana Anić".to_string()));
        let set_cookie = self.session_codec.session_cookie(&user).unwrap();

        cookie_pair(&set_cookie)
    }
}

pub fn test_env() -> ApplicationEnv {
    ApplicationEnv {
        log_directory: "./logs".to_string(),
        log_filename: "ticket-issuer.log".to_string(),
        bind_address: "127.0.0.1:3000".parse().unwrap(),
        public_base_url: PUBLIC_BASE_URL.to_string(),
        db_connection_string: "postgres://localhost/tickets".to_string(),
        db_max_connections: 1,
        session_secret: SESSION_SECRET.to_string(),
        session_lifespan: Duration::from_secs(3600),
        oidc_domain: "idp.example.com".to_string(),
        oidc_client_id: "client".to_string(),
        oidc_client_secret: "secret".to_string(),
        m2m: None,
        max_tickets_per_vatin: MAX_TICKETS_PER_VATIN,
        max_http_content_len: MAX_HTTP_CONTENT_LEN,
        http_timeout: Duration::from_secs(10),
    }
}

///
/// `name=value` part of `Set-Cookie` header
///
pub fn cookie_pair(set_cookie: &str) -> String {
    let (pair, _) = set_cookie.split_once(';').unwrap();
    pair.to_string()
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}
