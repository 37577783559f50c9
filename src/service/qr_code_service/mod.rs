mod qr_code_service;
mod qr_code_service_impl;

pub use qr_code_service::*;
pub use qr_code_service_impl::*;
