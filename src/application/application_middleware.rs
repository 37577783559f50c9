use super::ApplicationEnv;
use crate::auth::{RequireAuthenticated, SessionCodec, SessionLayer};
use std::sync::Arc;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
    validate_request::ValidateRequestHeaderLayer,
};

///
/// All layers are created once at startup and shared by every request.
///
pub struct ApplicationMiddleware {
    pub session: SessionLayer,
    pub require_authenticated: ValidateRequestHeaderLayer<RequireAuthenticated>,
    pub body_limit: RequestBodyLimitLayer,
    pub timeout: TimeoutLayer,
    pub trace: TraceLayer<SharedClassifier<ServerErrorsAsFailures>>,
}

pub fn create_middleware(
    env: &ApplicationEnv,
    session_codec: Arc<SessionCodec>,
) -> ApplicationMiddleware {
    let session = SessionLayer::new(session_codec);

    let require_authenticated = ValidateRequestHeaderLayer::custom(RequireAuthenticated::new());

    let body_limit = RequestBodyLimitLayer::new(env.max_http_content_len);

    let timeout = TimeoutLayer::new(env.http_timeout);

    let trace = TraceLayer::new_for_http();

    ApplicationMiddleware {
        session,
        require_authenticated,
        body_limit,
        timeout,
        trace,
    }
}
