use axum::{
    http::{header::LOCATION, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

///
/// `302 Found` redirect, the status browsers follow with GET
///
pub fn redirect_found(location: &str) -> Response {
    match HeaderValue::try_from(location) {
        Ok(location) => (StatusCode::FOUND, [(LOCATION, location)]).into_response(),
        Err(_) => {
            tracing::warn!(location, "invalid redirect location");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
