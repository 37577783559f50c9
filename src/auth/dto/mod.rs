mod login_state_claims;
mod session_claims;
mod user;

pub use login_state_claims::LoginStateClaims;
pub use session_claims::SessionClaims;
pub use user::User;
