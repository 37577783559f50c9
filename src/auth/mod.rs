//!
//! Identity gate: session cookies issued after OpenID Connect login
//! and the middleware that attaches the logged-in [User] to requests.
//!

mod dto;
mod middleware;
mod redirect;
mod require_authenticated;
mod screen_hint;
mod session_codec;

pub use dto::User;
pub use middleware::SessionLayer;
pub use redirect::redirect_found;
pub use require_authenticated::RequireAuthenticated;
pub use screen_hint::ScreenHint;
pub use session_codec::*;
