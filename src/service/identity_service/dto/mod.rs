mod identity_service_config;
mod token_response;
mod user_profile;

pub use identity_service_config::IdentityServiceConfig;
pub use token_response::TokenResponse;
pub use user_profile::UserProfile;
