pub mod identity_service;
pub mod login_service;
pub mod management_token_service;
pub mod qr_code_service;
pub mod tickets_service;
