mod dto;
mod management_token_service;
mod management_token_service_impl;

pub use dto::ManagementTokenServiceConfig;
pub use management_token_service::*;
pub use management_token_service_impl::*;
