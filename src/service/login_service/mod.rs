mod login_service;
mod login_service_impl;

pub use login_service::*;
pub use login_service_impl::*;
