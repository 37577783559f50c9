use pin_project::pin_project;
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tracing::Span;

#[pin_project(project = SessionFutureProj)]
pub enum SessionFuture<F> {
    Authenticated {
        #[pin]
        inner: F,

        /// span that should be used to add
        /// user context to request processing
        span: Span,
    },
    Anonymous {
        #[pin]
        inner: F,
    },
}

impl<F> Future for SessionFuture<F>
where
    F: Future,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.project() {
            SessionFutureProj::Authenticated { inner, span } => {
                let _entered = span.enter();
                inner.poll(cx)
            }
            SessionFutureProj::Anonymous { inner } => inner.poll(cx),
        }
    }
}
