use serde::Deserialize;

///
/// Query parameters of `/login` and `/sign-up`
///
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginQuery {
    /// Local path user returns to after login
    pub return_to: Option<String>,
}
