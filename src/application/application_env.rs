use anyhow::anyhow;
use std::{net::SocketAddr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,
    /// Address under which users reach the application,
    /// used in ticket URLs and OAuth redirects
    pub public_base_url: String,

    pub db_connection_string: String,
    pub db_max_connections: u32,

    pub session_secret: String,
    pub session_lifespan: Duration,

    pub oidc_domain: String,
    pub oidc_client_id: String,
    pub oidc_client_secret: String,

    /// Credentials for identity provider management API.
    /// `None` when any of the M2M variables is missing
    pub m2m: Option<M2mCredentials>,

    pub max_tickets_per_vatin: i64,
    pub max_http_content_len: usize,
    pub http_timeout: Duration,
}

pub struct M2mCredentials {
    pub domain: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("TICKET_ISSUER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("TICKET_ISSUER_LOG_FILENAME")?;
        let bind_address = Self::env_var("TICKET_ISSUER_BIND_ADDRESS")?.parse()?;
        let public_base_url = Self::env_var("TICKET_ISSUER_PUBLIC_BASE_URL")?
            .trim_end_matches('/')
            .to_string();
        let db_connection_string = Self::env_var("TICKET_ISSUER_DB_CONNECTION_STRING")?;
        let db_max_connections = Self::env_var("TICKET_ISSUER_DB_MAX_CONNECTIONS")?.parse()?;
        let session_secret = Self::env_var("TICKET_ISSUER_SESSION_SECRET")?;
        if session_secret.len() < 32 {
            return Err(anyhow!(
                "TICKET_ISSUER_SESSION_SECRET needs to be at least 32 characters long"
            ));
        }
        let session_lifespan = Self::env_var("TICKET_ISSUER_SESSION_LIFESPAN")?.parse()?;
        let session_lifespan = Duration::from_secs(session_lifespan);
        let oidc_domain = Self::env_var("TICKET_ISSUER_OIDC_DOMAIN")?;
        let oidc_client_id = Self::env_var("TICKET_ISSUER_OIDC_CLIENT_ID")?;
        let oidc_client_secret = Self::env_var("TICKET_ISSUER_OIDC_CLIENT_SECRET")?;
        let m2m = Self::parse_m2m_credentials();
        let max_tickets_per_vatin =
            Self::env_var("TICKET_ISSUER_MAX_TICKETS_PER_VATIN")?.parse()?;
        let max_http_content_len = Self::env_var("TICKET_ISSUER_MAX_HTTP_CONTENT_LEN")?.parse()?;
        let http_timeout = Self::env_var("TICKET_ISSUER_HTTP_TIMEOUT")?.parse()?;
        let http_timeout = Duration::from_secs(http_timeout);

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            public_base_url,
            db_connection_string,
            db_max_connections,
            session_secret,
            session_lifespan,
            oidc_domain,
            oidc_client_id,
            oidc_client_secret,
            m2m,
            max_tickets_per_vatin,
            max_http_content_len,
            http_timeout,
        })
    }

    fn parse_m2m_credentials() -> Option<M2mCredentials> {
        let domain = Self::env_var("TICKET_ISSUER_M2M_DOMAIN").ok()?;
        let client_id = Self::env_var("TICKET_ISSUER_M2M_CLIENT_ID").ok()?;
        let client_secret = Self::env_var("TICKET_ISSUER_M2M_CLIENT_SECRET").ok()?;

        Some(M2mCredentials {
            domain,
            client_id,
            client_secret,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }
}
