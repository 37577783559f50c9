use crate::repository;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(&'static str),

    #[error("request body too large")]
    BodyTooLarge,

    #[error("maximum of {max} tickets per vatin reached")]
    QuotaExceeded { max: i64 },

    #[error("ticket not exist")]
    TicketNotExist,

    #[error("invalid login state: {0}")]
    InvalidLoginState(&'static str),

    #[error("identity provider error: {0}")]
    Upstream(String),

    #[error("database error: {0}")]
    Database(#[from] repository::Error),

    #[error("qr code error: {0}")]
    QrCode(String),

    ///
    /// This error should be returned only in situations
    /// that should never occur when system is setup correctly.
    ///
    #[error("unexpected error: {0}")]
    UnexpectedError(#[from] anyhow::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Error::QuotaExceeded { max: _ } => StatusCode::CONFLICT,
            Error::TicketNotExist => StatusCode::NOT_FOUND,
            Error::InvalidLoginState(_) => StatusCode::BAD_REQUEST,
            Error::Upstream(_) => StatusCode::BAD_GATEWAY,
            Error::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::QrCode(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    ///
    /// Message safe to show to the user.
    /// Details of internal failures stay in logs.
    ///
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(message) => message.to_string(),
            Error::BodyTooLarge => "Request body too large".to_string(),
            Error::QuotaExceeded { max } => format!("Maximum of {max} tickets per person."),
            Error::TicketNotExist => "Ticket not found".to_string(),
            Error::InvalidLoginState(_) => "Login expired, please try again".to_string(),
            Error::Upstream(_) => "Identity provider error".to_string(),
            Error::Database(_) | Error::QrCode(_) | Error::UnexpectedError(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

///
/// JSON error body `{"error": "..."}` used by API endpoints
///
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::warn!(err = %self);

        let status = self.status_code();
        let body = json!({ "error": self.public_message() });

        (status, Json(body)).into_response()
    }
}

///
/// Plain text error used by endpoints that render pages
///
#[derive(Debug)]
pub struct PageError(pub Error);

impl From<Error> for PageError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let PageError(err) = self;
        tracing::warn!(%err);

        let status = err.status_code();
        let body = match status {
            StatusCode::NOT_FOUND => "Not Found",
            StatusCode::BAD_REQUEST => "Bad Request",
            StatusCode::BAD_GATEWAY => "Bad Gateway",
            _ => "Internal Server Error",
        };

        (status, body).into_response()
    }
}
