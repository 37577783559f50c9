use super::session_service::SessionService;
use crate::auth::SessionCodec;
use std::sync::Arc;
use tower::Layer;

///
/// Middleware that reads session cookie.
/// If session is valid [User](crate::auth::User) is added to request extensions,
/// otherwise request continues as anonymous.
///
#[derive(Clone)]
pub struct SessionLayer {
    codec: Arc<SessionCodec>,
}

impl SessionLayer {
    pub fn new(codec: Arc<SessionCodec>) -> Self {
        Self { codec }
    }
}

impl<S> Layer<S> for SessionLayer {
    type Service = SessionService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SessionService::new(inner, self.codec.clone())
    }
}
