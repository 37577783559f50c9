mod client_credentials_response;
mod management_token_service_config;

pub use client_credentials_response::ClientCredentialsResponse;
pub use management_token_service_config::ManagementTokenServiceConfig;
