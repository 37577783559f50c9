use super::{redirect_found, User};
use axum::{
    body::Body,
    http::{Request, Response},
};
use tower_http::validate_request::ValidateRequest;

///
/// Guard for routes that need logged-in user.
///
/// Depends only on the request: [User] must already be in extensions
/// (put there by [SessionLayer](super::SessionLayer)), otherwise
/// the request is redirected to login page with `returnTo`
/// pointing back at the requested path.
///
#[derive(Clone, Default)]
pub struct RequireAuthenticated {}

impl RequireAuthenticated {
    pub fn new() -> Self {
        Self {}
    }
}

impl<B> ValidateRequest<B> for RequireAuthenticated {
    type ResponseBody = Body;

    fn validate(&mut self, request: &mut Request<B>) -> Result<(), Response<Self::ResponseBody>> {
        if request.extensions().get::<User>().is_some() {
            return Ok(());
        }

        tracing::info!(uri = %request.uri(), "unauthenticated request, redirecting to login");

        let return_to = request
            .uri()
            .path_and_query()
            .map(|path_and_query| path_and_query.as_str())
            .unwrap_or("/");

        Err(redirect_found(&login_location(return_to)))
    }
}

fn login_location(return_to: &str) -> String {
    match serde_urlencoded::to_string(&[("returnTo", return_to)]) {
        Ok(query) => format!("/login?{query}"),
        Err(err) => {
            tracing::warn!(%err, "failed to encode return target");
            "/login".to_string()
        }
    }
}
