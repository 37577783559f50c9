use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::{find_cookie, redirect_found, ScreenHint, User, LOGIN_STATE_COOKIE},
    dto::{input, output},
    error::{Error, PageError},
    service::{login_service::LoginService, tickets_service::TicketsService},
    view,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header::SET_COOKIE, HeaderMap, HeaderValue, StatusCode},
    response::{Html, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/ticket/:id", get(get_ticket))
        .route_layer(application_middleware.require_authenticated.clone())
        .route("/", get(get_index))
        .route("/create-ticket", post(create_ticket))
        .route("/login", get(login))
        .route("/sign-up", get(sign_up))
        .route("/callback", get(callback))
        .route("/logout", get(logout))
}

async fn get_index(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    user: Option<Extension<User>>,
) -> Result<Html<String>, PageError> {
    let ticket_count = tickets_service.count_tickets().await?;
    let user = user.map(|Extension(user)| user);

    Ok(Html(view::index_page(ticket_count, user.as_ref())))
}

async fn create_ticket(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    ticket: Result<Json<input::Ticket>, JsonRejection>,
) -> Result<(StatusCode, Json<output::CreatedTicket>), Error> {
    let Json(ticket) = ticket.map_err(|rejection| {
        tracing::info!(%rejection, "rejected create ticket body");
        match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => Error::BodyTooLarge,
            _ => Error::Validation("invalid request body"),
        }
    })?;

    let created_ticket = tickets_service.create_ticket(ticket).await?;

    Ok((StatusCode::CREATED, Json(created_ticket)))
}

async fn get_ticket(
    State(tickets_service): State<Arc<dyn TicketsService>>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = Uuid::parse_str(&id).map_err(|_| Error::TicketNotExist)?;

    let ticket = tickets_service.find_ticket(id).await?;

    Ok(Html(view::ticket_page(&ticket, &user)?))
}

async fn login(
    State(login_service): State<Arc<dyn LoginService>>,
    Query(login_query): Query<input::LoginQuery>,
) -> Result<Response, PageError> {
    begin_login(login_service.as_ref(), ScreenHint::Login, login_query)
}

async fn sign_up(
    State(login_service): State<Arc<dyn LoginService>>,
    Query(login_query): Query<input::LoginQuery>,
) -> Result<Response, PageError> {
    begin_login(login_service.as_ref(), ScreenHint::SignUp, login_query)
}

fn begin_login(
    login_service: &dyn LoginService,
    screen_hint: ScreenHint,
    login_query: input::LoginQuery,
) -> Result<Response, PageError> {
    let return_to = login_query.return_to.unwrap_or_else(|| "/".to_string());

    let output::LoginRedirect {
        authorization_url,
        login_state_cookie,
    } = login_service.begin_login(screen_hint, return_to)?;

    Ok(with_cookies(
        redirect_found(&authorization_url),
        [login_state_cookie],
    )?)
}

async fn callback(
    State(login_service): State<Arc<dyn LoginService>>,
    Query(login_callback): Query<input::LoginCallback>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let login_state_cookie = find_cookie(&headers, LOGIN_STATE_COOKIE).map(str::to_string);

    let output::LoginCompleted {
        return_to,
        session_cookie,
        clear_login_state_cookie,
    } = login_service
        .complete_login(login_callback, login_state_cookie)
        .await?;

    Ok(with_cookies(
        redirect_found(&return_to),
        [session_cookie, clear_login_state_cookie],
    )?)
}

async fn logout(
    State(login_service): State<Arc<dyn LoginService>>,
) -> Result<Response, PageError> {
    let output::LogoutRedirect {
        logout_url,
        clear_session_cookie,
    } = login_service.logout()?;

    Ok(with_cookies(
        redirect_found(&logout_url),
        [clear_session_cookie],
    )?)
}

fn with_cookies<const N: usize>(
    mut response: Response,
    cookies: [String; N],
) -> Result<Response, Error> {
    for cookie in cookies {
        let cookie =
            HeaderValue::try_from(cookie).map_err(|err| Error::UnexpectedError(err.into()))?;
        response.headers_mut().append(SET_COOKIE, cookie);
    }

    Ok(response)
}
