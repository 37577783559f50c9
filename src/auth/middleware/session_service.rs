use super::session_future::SessionFuture;
use crate::auth::{find_cookie, SessionCodec, User, SESSION_COOKIE};
use axum::http::{HeaderMap, Request};
use std::{
    sync::Arc,
    task::{Context, Poll},
};
use tower::Service;

#[derive(Clone)]
pub struct SessionService<S> {
    inner: S,
    codec: Arc<SessionCodec>,
}

impl<S> SessionService<S> {
    pub fn new(inner: S, codec: Arc<SessionCodec>) -> Self {
        Self { inner, codec }
    }

    fn parse_session_cookie(&self, headers: &HeaderMap) -> Option<User> {
        let token = find_cookie(headers, SESSION_COOKIE)?;

        match self.codec.decode_session(token) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::debug!(%err, "ignoring invalid session");
                None
            }
        }
    }
}

impl<S, B> Service<Request<B>> for SessionService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = SessionFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        match self.parse_session_cookie(req.headers()) {
            Some(user) => {
                // create span that holds user information
                let span = tracing::info_span!("user", id = %user.id);

                req.extensions_mut().insert(user);

                SessionFuture::Authenticated {
                    inner: self.inner.call(req),
                    span,
                }
            }
            None => SessionFuture::Anonymous {
                inner: self.inner.call(req),
            },
        }
    }
}
