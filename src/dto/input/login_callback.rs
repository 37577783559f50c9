use serde::Deserialize;

///
/// Query parameters identity provider sends to `/callback`
///
#[derive(Debug, Deserialize)]
pub struct LoginCallback {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
