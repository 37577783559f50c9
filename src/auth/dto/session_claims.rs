use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject assigned by the identity provider
    pub sub: String,
    pub name: Option<String>,
    pub aud: String,
    pub exp: i64,
}
