use serde::Deserialize;

///
/// Claims returned by `/userinfo` endpoint
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    pub sub: String,
    pub name: Option<String>,
}
