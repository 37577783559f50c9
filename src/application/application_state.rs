use super::ApplicationEnv;
use crate::{
    auth::SessionCodec,
    repository::TicketsRepositoryImpl,
    service::{
        identity_service::{IdentityServiceConfig, IdentityServiceImpl},
        login_service::{LoginService, LoginServiceImpl},
        management_token_service::{
            ManagementTokenService, ManagementTokenServiceConfig, ManagementTokenServiceImpl,
        },
        qr_code_service::QrCodeServiceImpl,
        tickets_service::{TicketsService, TicketsServiceConfig, TicketsServiceImpl},
    },
};
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub tickets_service: Arc<dyn TicketsService>,
    pub login_service: Arc<dyn LoginService>,
}

pub struct ApplicationStateToClose {
    pub db_pool: PgPool,
}

pub async fn create_state(
    env: &ApplicationEnv,
    session_codec: Arc<SessionCodec>,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_pool = PgPoolOptions::new()
        .max_connections(env.db_max_connections)
        .acquire_timeout(env.http_timeout)
        .connect(&env.db_connection_string)
        .await?;

    tracing::info!("creating repositories");
    let tickets_repository = TicketsRepositoryImpl::new(db_pool.clone());
    let tickets_repository = Arc::new(tickets_repository);

    tracing::info!("creating services");
    let http_client = reqwest::Client::builder()
        .timeout(env.http_timeout)
        .build()?;

    if let Some(m2m) = &env.m2m {
        let config = ManagementTokenServiceConfig {
            domain: m2m.domain.clone(),
            client_id: m2m.client_id.clone(),
            client_secret: m2m.client_secret.clone(),
        };
        let management_token_service = ManagementTokenServiceImpl::new(config, http_client.clone());

        tracing::info!("verifying management API credentials");
        management_token_service.access_token().await?;
    }

    let qr_code_service = QrCodeServiceImpl::new();
    let qr_code_service = Arc::new(qr_code_service);

    let config = TicketsServiceConfig {
        public_base_url: env.public_base_url.clone(),
        max_tickets_per_vatin: env.max_tickets_per_vatin,
    };
    let tickets_service = TicketsServiceImpl::new(config, tickets_repository, qr_code_service);
    let tickets_service = Arc::new(tickets_service);

    let config = IdentityServiceConfig {
        domain: env.oidc_domain.clone(),
        client_id: env.oidc_client_id.clone(),
        client_secret: env.oidc_client_secret.clone(),
        redirect_uri: format!("{}/callback", env.public_base_url),
        logout_return_to: env.public_base_url.clone(),
    };
    let identity_service = IdentityServiceImpl::new(config, http_client);
    let identity_service = Arc::new(identity_service);

    let login_service = LoginServiceImpl::new(identity_service, session_codec);
    let login_service = Arc::new(login_service);

    Ok((
        ApplicationState {
            tickets_service,
            login_service,
        },
        ApplicationStateToClose { db_pool },
    ))
}
