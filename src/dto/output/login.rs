///
/// Redirect to identity provider together with cookie
/// that needs to be presented back on callback
///
pub struct LoginRedirect {
    pub authorization_url: String,
    pub login_state_cookie: String,
}

pub struct LoginCompleted {
    pub return_to: String,
    pub session_cookie: String,
    pub clear_login_state_cookie: String,
}

pub struct LogoutRedirect {
    pub logout_url: String,
    pub clear_session_cookie: String,
}
