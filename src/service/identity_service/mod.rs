mod dto;
mod identity_service;
mod identity_service_impl;

pub use dto::{IdentityServiceConfig, UserProfile};
pub use identity_service::*;
pub use identity_service_impl::*;
